#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bpp: u16, palette: &[u8], body: &[u8]) -> Vec<u8> {
    let offset = 54 + palette.len() as u32;
    let mut out = vec![0u8; 54];
    out[0] = b'B'; out[1] = b'M';
    out[2..6].copy_from_slice(&(offset + body.len() as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(palette);
    out.extend_from_slice(body);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 24-bit 1x1, canonical padding
    fs::write(format!("{dir}/rgb_1x1.bmp"), bmp(1, 1, 24, &[], &[0xff, 0, 0, 0])).unwrap();

    // 24-bit 1x2, legacy whole-pixel padding
    let mut legacy = vec![1, 2, 3];
    legacy.extend_from_slice(&[0; 9]);
    legacy.extend_from_slice(&[4, 5, 6]);
    legacy.extend_from_slice(&[0; 9]);
    fs::write(format!("{dir}/rgb_legacy_1x2.bmp"), bmp(1, 2, 24, &[], &legacy)).unwrap();

    // 8-bit 3x2 with grey palette
    let palette: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i, 0]).collect();
    let grey = [0x00, 0x40, 0x80, 0, 0xc0, 0xff, 0x64, 0];
    fs::write(format!("{dir}/grey_3x2.bmp"), bmp(3, 2, 8, &palette, &grey)).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/top_down.bmp"), bmp(2, -2, 8, &[], &[1, 2, 0, 0, 3, 4, 0, 0])).unwrap();

    println!("Generated seed corpus in {dir}/");
}
