#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp16::*;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 20),
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    let Ok(decoded) = DecodeRequest::new(data).with_limits(&limits).decode(enough::Unstoppable)
    else {
        return;
    };

    // Re-encoding what we decoded must give the same image back
    let bytes = encode(&decoded, enough::Unstoppable).expect("encode of decoded image");
    let again = decode(&bytes, enough::Unstoppable).expect("re-encoded data failed to decode");
    assert_eq!(decoded, again, "roundtrip mismatch");

    // Every converter that accepts the depth must produce a valid bitmap
    let converted = match decoded.layout() {
        PixelLayout::Bgr888 => vec![
            to_bgr555(&decoded, enough::Unstoppable),
            to_bgr555_dithered(&decoded, Diffusion::Row, enough::Unstoppable),
            to_bgr555_dithered(&decoded, Diffusion::FloydSteinberg, enough::Unstoppable),
        ],
        _ => vec![to_bgr888(&decoded, enough::Unstoppable)],
    };
    for out in converted.into_iter().chain([crop_top_half(&decoded, enough::Unstoppable)]) {
        let out = out.expect("conversion of valid image");
        assert!(out.header().is_valid());
        let bytes = encode(&out, enough::Unstoppable).expect("encode converted");
        assert_eq!(bytes.len() as u64, u64::from(out.header().file_size));
    }
});
