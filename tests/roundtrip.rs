use enough::Unstoppable;
use zenbmp16::*;

/// 5x3 24-bit image, stored bytes filled with a known pattern (padding zero).
fn pattern_5x3() -> Image {
    let mut pixels = Vec::with_capacity(5 * 3 * 3);
    for i in 0..(5 * 3 * 3) {
        pixels.push((i * 7 + 3) as u8);
    }
    Image::from_pixels(&pixels, 5, 3, PixelLayout::Bgr888, Unstoppable).unwrap()
}

#[test]
fn write_then_read_is_identical() {
    let mut original = pattern_5x3();
    assert_eq!(original.stride(), 16);
    assert_eq!(original.header().image_size, 48);

    // Reserved words and resolution must survive verbatim.
    let (mut header, pixels) = original.into_parts();
    header.reserved1 = 0x1234;
    header.reserved2 = 0xBEEF;
    header.x_ppm = -1;
    original = Image::new(header, pixels).unwrap();

    let mut bytes = Vec::new();
    write_image(&mut bytes, &original).unwrap();
    assert_eq!(bytes.len(), 54 + 48);
    assert_eq!(&bytes[0..2], b"BM");

    let read = read_image(bytes.as_slice()).unwrap();
    assert_eq!(read.header(), original.header());
    assert_eq!(read.pixels(), original.pixels());
}

#[test]
fn slice_codec_matches_stream_codec() {
    let image = pattern_5x3();
    let encoded = encode(&image, Unstoppable).unwrap();

    let mut streamed = Vec::new();
    write_image(&mut streamed, &image).unwrap();
    assert_eq!(encoded, streamed);

    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn sixteen_bit_roundtrip() {
    let pixels: Vec<u8> = (0..3 * 2 * 2).map(|i| (i * 29) as u8).collect();
    let image = Image::from_pixels(&pixels, 3, 2, PixelLayout::Bgr555, Unstoppable).unwrap();
    assert_eq!(image.stride(), 8);
    let encoded = encode(&image, Unstoppable).unwrap();
    let decoded = decode(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.to_pixels(Unstoppable).unwrap(), pixels);
}

// ── Rejections ───────────────────────────────────────────────────────

fn encoded_with(mutate: impl FnOnce(&mut [u8])) -> Vec<u8> {
    let mut bytes = encode(&pattern_5x3(), Unstoppable).unwrap();
    mutate(&mut bytes);
    bytes
}

#[test]
fn rejects_bad_magic() {
    let bytes = encoded_with(|b| b[0] = b'X');
    assert!(matches!(
        decode(&bytes, Unstoppable),
        Err(BitmapError::InvalidHeader(HeaderViolation::Magic(_)))
    ));
}

#[test]
fn rejects_32_bit() {
    let bytes = encoded_with(|b| b[28..30].copy_from_slice(&32u16.to_le_bytes()));
    assert!(matches!(
        decode(&bytes, Unstoppable),
        Err(BitmapError::InvalidHeader(HeaderViolation::BitsPerPixel(32)))
    ));
}

#[test]
fn rejects_compressed() {
    let bytes = encoded_with(|b| b[30..34].copy_from_slice(&1u32.to_le_bytes()));
    assert!(matches!(
        read_image(bytes.as_slice()),
        Err(BitmapError::InvalidHeader(HeaderViolation::Compression(1)))
    ));
}

#[test]
fn rejects_unpadded_image_size() {
    let bytes = encoded_with(|b| b[34..38].copy_from_slice(&45u32.to_le_bytes()));
    assert!(matches!(
        decode(&bytes, Unstoppable),
        Err(BitmapError::InvalidHeader(HeaderViolation::ImageSize { .. }))
    ));
}

#[test]
fn truncated_header() {
    let bytes = encode(&pattern_5x3(), Unstoppable).unwrap();
    assert!(matches!(
        decode(&bytes[..53], Unstoppable),
        Err(BitmapError::TruncatedHeader)
    ));
    assert!(matches!(
        read_image(&bytes[..20]),
        Err(BitmapError::TruncatedHeader)
    ));
}

#[test]
fn truncated_pixels() {
    let bytes = encode(&pattern_5x3(), Unstoppable).unwrap();
    let short = &bytes[..bytes.len() - 1];
    assert!(matches!(
        decode(short, Unstoppable),
        Err(BitmapError::TruncatedPixelData {
            needed: 48,
            actual: 47
        })
    ));
    assert!(matches!(
        read_image(short),
        Err(BitmapError::TruncatedPixelData {
            needed: 48,
            actual: 47
        })
    ));
}

#[test]
fn limits_reject_before_allocation() {
    let bytes = encode(&pattern_5x3(), Unstoppable).unwrap();
    let limits = Limits {
        max_pixels: Some(10),
        ..Default::default()
    };
    match DecodeRequest::new(&bytes).with_limits(&limits).decode(Unstoppable) {
        Err(BitmapError::LimitExceeded(msg)) => assert!(msg.contains("pixel count 15")),
        other => panic!("expected LimitExceeded, got {other:?}"),
    }

    let memory = Limits {
        max_memory_bytes: Some(47),
        ..Default::default()
    };
    assert!(matches!(
        read_image_with_limits(bytes.as_slice(), &memory),
        Err(BitmapError::LimitExceeded(_))
    ));

    let roomy = Limits {
        max_width: Some(5),
        max_height: Some(3),
        max_pixels: Some(15),
        max_memory_bytes: Some(48),
    };
    assert!(
        DecodeRequest::new(&bytes)
            .with_limits(&roomy)
            .decode(Unstoppable)
            .is_ok()
    );
}

#[test]
fn hand_built_file_decodes() {
    // 1x1 24-bit: one BGR pixel plus one padding byte.
    let mut bmp = vec![0u8; 58];
    bmp[0] = b'B';
    bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&58u32.to_le_bytes());
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes());
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes());
    bmp[18..22].copy_from_slice(&1i32.to_le_bytes());
    bmp[22..26].copy_from_slice(&1i32.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes());
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes());
    bmp[34..38].copy_from_slice(&4u32.to_le_bytes());
    bmp[54] = 0xFF;

    let image = decode(&bmp, Unstoppable).unwrap();
    assert_eq!(image.width(), 1);
    assert_eq!(image.pixels(), &[0xFF, 0, 0, 0]);
    assert_eq!(encode(&image, Unstoppable).unwrap(), bmp);
}
