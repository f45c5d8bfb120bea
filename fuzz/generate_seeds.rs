#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: u32, height: u32, bits: u16, pixel_byte: u8) -> Vec<u8> {
    let stride = (width as usize * bits as usize).div_ceil(8).next_multiple_of(4);
    let image_size = stride * height as usize;
    let file_size = 54 + image_size;

    let mut out = vec![0u8; file_size];
    out[0] = b'B'; out[1] = b'M';
    out[2..6].copy_from_slice(&(file_size as u32).to_le_bytes());
    out[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    out[18..22].copy_from_slice(&(width as i32).to_le_bytes());
    out[22..26].copy_from_slice(&(height as i32).to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&bits.to_le_bytes());
    out[34..38].copy_from_slice(&(image_size as u32).to_le_bytes());
    out[38..42].copy_from_slice(&2835i32.to_le_bytes());
    out[42..46].copy_from_slice(&2835i32.to_le_bytes());

    let row_bytes = width as usize * bits as usize / 8;
    for row in out[54..].chunks_exact_mut(stride) {
        for (i, b) in row[..row_bytes].iter_mut().enumerate() {
            *b = pixel_byte.wrapping_add(i as u8 * 37);
        }
    }
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/bgr888_1x1.bmp"), bmp(1, 1, 24, 0xff)).unwrap();
    fs::write(format!("{dir}/bgr888_5x3.bmp"), bmp(5, 3, 24, 0x10)).unwrap();
    fs::write(format!("{dir}/bgr555_3x2.bmp"), bmp(3, 2, 16, 0x42)).unwrap();
    fs::write(format!("{dir}/bgr555_4x4.bmp"), bmp(4, 4, 16, 0x00)).unwrap();

    // Truncated/malformed seeds for edge coverage
    let full = bmp(2, 2, 24, 0x80);
    fs::write(format!("{dir}/short_pixels.bmp"), &full[..full.len() - 1]).unwrap();
    fs::write(format!("{dir}/short_header.bin"), &full[..53]).unwrap();
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();

    println!("Generated seed corpus in {dir}/");
}
