//! Header-preserving BMP row writer.
//!
//! The output begins with the first `data_offset` bytes of a reference file,
//! copied without interpretation, followed by bottom-up pixel rows with zero
//! padding.

use std::io::{self, Read, Seek, SeekFrom, Write};

use enough::Stop;
use log::{debug, trace};

use super::utils::PAD_FILL;
use crate::error::BitmapError;
use crate::header::BitmapHeader;
use crate::options::BmpOptions;
use crate::pixel::PixelLayout;

/// Check `pixels` against the reference header before anything is written.
///
/// `reference` is rewound first, so a stream that was just decoded can serve
/// as its own reference. Returns the validated reference header.
pub(crate) fn check_against_reference<R: Read + Seek>(
    reference: &mut R,
    pixels: &[u8],
    rows: u32,
    cols: u32,
    layout: PixelLayout,
) -> Result<BitmapHeader, BitmapError> {
    reference.seek(SeekFrom::Start(0))?;
    let header = BitmapHeader::read_from(reference)?;
    let (width, height) = header.validate(layout)?;
    if (cols, rows) != (width, height) {
        return Err(BitmapError::DimensionMismatch {
            expected: (width, height),
            actual: (cols, rows),
        });
    }
    let needed = (cols as usize)
        .checked_mul(rows as usize)
        .and_then(|px| px.checked_mul(layout.bytes_per_pixel()))
        .ok_or(BitmapError::DimensionsTooLarge {
            width: cols,
            height: rows,
        })?;
    if pixels.len() < needed {
        return Err(BitmapError::BufferTooSmall {
            needed,
            actual: pixels.len(),
        });
    }
    Ok(header)
}

/// Write the reference header bytes and the pixel body of `pixels` to `out`.
///
/// `header` must come from [`check_against_reference`] on the same reference.
pub(crate) fn encode_bmp<R: Read + Seek, W: Write>(
    pixels: &[u8],
    header: &BitmapHeader,
    reference: &mut R,
    out: &mut W,
    layout: PixelLayout,
    options: &BmpOptions,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    reference.seek(SeekFrom::Start(0))?;
    copy_header(reference, out, header.data_offset)?;
    stop.check()?;

    let w = header.width as usize;
    let h = header.height as usize;
    // Extra trailing bytes in the caller's buffer are ignored.
    let body = &pixels[..w * h * layout.bytes_per_pixel()];
    let pad = options.padding.pad_bytes(w, layout);
    trace!("writing {pad} padding bytes per row");

    match layout {
        PixelLayout::Gray8 => write_gray_rows(body, w, pad, out, stop),
        PixelLayout::Rgba8 => write_rgb_rows(body, w, pad, out, stop),
    }
}

/// Copy exactly `offset` leading bytes of `reference` into `out`.
fn copy_header<R: Read, W: Write>(
    reference: &mut R,
    out: &mut W,
    offset: u32,
) -> Result<(), BitmapError> {
    let expected = u64::from(offset);
    let written = io::copy(&mut reference.by_ref().take(expected), out)?;
    if written != expected {
        return Err(BitmapError::ShortWrite { expected, written });
    }
    debug!("copied {written} header bytes from reference");
    Ok(())
}

fn write_gray_rows<W: Write>(
    pixels: &[u8],
    w: usize,
    pad: usize,
    out: &mut W,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    for (i, row) in pixels.chunks_exact(w).rev().enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        out.write_all(row)?;
        out.write_all(&PAD_FILL[..pad])?;
    }
    Ok(())
}

fn write_rgb_rows<W: Write>(
    pixels: &[u8],
    w: usize,
    pad: usize,
    out: &mut W,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let mut disk_row = Vec::with_capacity(w * 3 + pad);
    for (i, row) in pixels.chunks_exact(w * 4).rev().enumerate() {
        if i % 16 == 0 {
            stop.check()?;
        }
        disk_row.clear();
        // Alpha is dropped.
        for px in row.chunks_exact(4) {
            disk_row.extend_from_slice(&px[..3]);
        }
        disk_row.extend_from_slice(&PAD_FILL[..pad]);
        out.write_all(&disk_row)?;
    }
    Ok(())
}
