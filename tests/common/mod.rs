//! BMP fixture builders shared by the integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Assemble a BITMAPINFOHEADER file: 54 header bytes, `palette`, then `body`.
pub fn bmp_file(width: i32, height: i32, bpp: u16, palette: &[u8], body: &[u8]) -> Vec<u8> {
    let offset = 54 + palette.len() as u32;
    let file_size = offset + body.len() as u32;

    let mut out = Vec::with_capacity(file_size as usize);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&offset.to_le_bytes());

    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&((palette.len() / 4) as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    out.extend_from_slice(palette);
    out.extend_from_slice(body);
    out
}

/// 256-entry identity grey palette (B, G, R, reserved).
pub fn grey_palette() -> Vec<u8> {
    (0..=255u8).flat_map(|i| [i, i, i, 0]).collect()
}

/// Join bottom-up disk rows, appending `pad` copies of `fill` to each.
pub fn disk_body(rows: &[&[u8]], pad: usize, fill: u8) -> Vec<u8> {
    let mut out = Vec::new();
    for row in rows {
        out.extend_from_slice(row);
        out.extend(std::iter::repeat_n(fill, pad));
    }
    out
}

/// Deterministic pseudo-random bytes.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

/// Canonical 8-bit or 24-bit file with noise pixels and zero padding.
///
/// Returns the file bytes and the unpadded disk rows, bottom-up.
pub fn noise_bmp(width: usize, height: usize, bpp: u16, seed: u32) -> (Vec<u8>, Vec<Vec<u8>>) {
    let unit = usize::from(bpp / 8);
    let pad = (4 - (width * unit) % 4) % 4;
    let rows: Vec<Vec<u8>> = (0..height)
        .map(|y| noise(width * unit, seed.wrapping_add(y as u32 * 7919)))
        .collect();
    let row_refs: Vec<&[u8]> = rows.iter().map(Vec::as_slice).collect();
    let palette = if bpp == 8 { grey_palette() } else { Vec::new() };
    let file = bmp_file(
        width as i32,
        height as i32,
        bpp,
        &palette,
        &disk_body(&row_refs, pad, 0),
    );
    (file, rows)
}

pub fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}
