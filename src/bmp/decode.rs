//! Row reader for uncompressed 8-bit and 24-bit BMP.
//!
//! Rows are stored bottom-up on disk. They are appended in disk order and
//! flipped in place once the body has been read, so pages of the output are
//! only touched as pixel bytes actually arrive.

use std::io::{self, Read, Seek, SeekFrom};

use enough::Stop;
use log::{debug, trace};

use crate::buffer::PixelBuffer;
use crate::error::BitmapError;
use crate::header::BitmapHeader;
use crate::options::BmpOptions;
use crate::pixel::PixelLayout;

/// Alpha written for every decoded 24-bit pixel.
const OPAQUE: u8 = 255;

/// Decode a BMP whose bit depth matches `layout`.
///
/// The BMP starts at the reader's current position; `data_offset` is taken
/// relative to it.
pub(crate) fn decode_bmp<R: Read + Seek>(
    reader: &mut R,
    layout: PixelLayout,
    options: &BmpOptions,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    let base = reader.stream_position()?;
    let header = BitmapHeader::read_from(reader)?;
    let (width, height) = header.validate(layout)?;
    debug!(
        "BMP {width}x{height}, {} bpp, pixel data at {}",
        header.bits_per_pixel, header.data_offset
    );

    let out_bytes = options.limits.buffer_size(width, height, layout)?;
    let w = width as usize;
    let h = height as usize;
    let pad = options.padding.pad_bytes(w, layout);
    let body_start = base.saturating_add(u64::from(header.data_offset));
    check_body_length(reader, body_start, w, h, pad, layout)?;

    let mut pixels = try_alloc(out_bytes)?;
    stop.check()?;

    reader.seek(SeekFrom::Start(body_start))?;
    trace!("skipping {pad} padding bytes per row");

    match layout {
        PixelLayout::Gray8 => read_gray_rows(reader, &mut pixels, w, h, pad, stop)?,
        PixelLayout::Rgba8 => read_rgb_rows(reader, &mut pixels, w, h, pad, stop)?,
    }
    flip_rows(&mut pixels, w * layout.bytes_per_pixel());

    Ok(PixelBuffer::owned(pixels, width, height, layout))
}

/// Reject a stream too short to hold every pixel row before the output is
/// allocated. Only the final row's padding may be missing.
fn check_body_length<R: Seek>(
    reader: &mut R,
    body_start: u64,
    w: usize,
    h: usize,
    pad: usize,
    layout: PixelLayout,
) -> Result<(), BitmapError> {
    let row = (w as u64).saturating_mul(layout.disk_bytes_per_pixel() as u64);
    let needed = (h as u64 - 1)
        .saturating_mul(row.saturating_add(pad as u64))
        .saturating_add(row);
    let end = reader.seek(SeekFrom::End(0))?;
    let available = end.saturating_sub(body_start);
    if available < needed {
        debug!("pixel body needs {needed} bytes, stream holds {available}");
        return Err(BitmapError::UnexpectedEof);
    }
    Ok(())
}

fn read_gray_rows<R: Read>(
    reader: &mut R,
    pixels: &mut Vec<u8>,
    w: usize,
    h: usize,
    pad: usize,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        let start = pixels.len();
        pixels.resize(start + w, 0);
        reader.read_exact(&mut pixels[start..])?;
        skip_padding(reader, pad)?;
    }
    Ok(())
}

fn read_rgb_rows<R: Read>(
    reader: &mut R,
    pixels: &mut Vec<u8>,
    w: usize,
    h: usize,
    pad: usize,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let mut scratch = vec![0u8; w * 3];
    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        reader.read_exact(&mut scratch)?;
        // Triples keep their file byte order; only alpha is added.
        for px in scratch.chunks_exact(3) {
            pixels.extend_from_slice(px);
            pixels.push(OPAQUE);
        }
        skip_padding(reader, pad)?;
    }
    Ok(())
}

/// Consume up to `pad` bytes. A file that ends inside the final row's
/// padding still decodes.
fn skip_padding<R: Read>(reader: &mut R, pad: usize) -> Result<(), BitmapError> {
    if pad > 0 {
        io::copy(&mut reader.by_ref().take(pad as u64), &mut io::sink())?;
    }
    Ok(())
}

/// Turn bottom-up rows of `stride` bytes into top-down order.
fn flip_rows(pixels: &mut [u8], stride: usize) {
    let mid = pixels.len() / 2;
    let (top, bottom) = pixels.split_at_mut(mid);
    for (upper, lower) in top
        .chunks_exact_mut(stride)
        .zip(bottom.rchunks_exact_mut(stride))
    {
        upper.swap_with_slice(lower);
    }
}

/// Empty buffer with room for `bytes`, reporting a refused reservation
/// instead of aborting.
fn try_alloc(bytes: usize) -> Result<Vec<u8>, BitmapError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes)
        .map_err(|_| BitmapError::AllocationFailure { bytes })?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_rows_reverses_row_order() {
        let mut odd = vec![1, 2, 3, 4, 5, 6];
        flip_rows(&mut odd, 2);
        assert_eq!(odd, [5, 6, 3, 4, 1, 2]);

        let mut even = vec![1, 2, 3, 4];
        flip_rows(&mut even, 1);
        assert_eq!(even, [4, 3, 2, 1]);

        let mut single = vec![7, 8, 9];
        flip_rows(&mut single, 3);
        assert_eq!(single, [7, 8, 9]);
    }
}
