#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp16::{BitmapHeader, DecodeRequest, HEADER_SIZE, Limits, read_image_with_limits};

fuzz_target!(|data: &[u8]| {
    // Headers can claim gigabytes; keep the stream reader from reserving them
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };

    // Slice and stream decoders must never panic and must agree
    let sliced = DecodeRequest::new(data).with_limits(&limits).decode(enough::Unstoppable);
    let streamed = read_image_with_limits(data, &limits);
    match (sliced, streamed) {
        (Ok(a), Ok(b)) => assert_eq!(a, b, "slice/stream mismatch"),
        (Ok(_), Err(e)) | (Err(e), Ok(_)) => panic!("decoders disagree: {e}"),
        (Err(_), Err(_)) => {}
    }

    if let Some(bytes) = data.first_chunk::<HEADER_SIZE>() {
        let header = BitmapHeader::from_bytes(bytes);
        let _ = header.validate();
        assert_eq!(&header.to_bytes(), bytes);
    }
});
