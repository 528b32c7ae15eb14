//! # zenbmpio
//!
//! Header-preserving codec for uncompressed 8-bit greyscale and 24-bit BMP
//! files.
//!
//! Decoding produces a top-down, row-major [`PixelBuffer`]: 1 byte per pixel
//! for greyscale, 4 bytes per pixel (three color bytes in file order plus a
//! constant 255 alpha) for 24-bit files. Encoding takes such a buffer and a
//! *reference* BMP, copies the reference's first `data_offset` bytes verbatim
//! (file header, info header, palette and anything else before the pixel
//! body), then writes the rows back bottom-up with zero padding.
//!
//! That makes the crate a fit for filter pipelines: read an image, hand the
//! buffer to a transform that keeps its dimensions, write the result using
//! the input as reference.
//!
//! ## Validation
//!
//! Before touching pixels every operation checks the `BM` signature, that
//! the bit depth matches the codec used (8 for greyscale, 24 for RGB), that
//! the file is uncompressed and bottom-up, and, when encoding, that the
//! buffer dimensions match the reference file.
//!
//! ## Non-Goals
//!
//! - Compressed (RLE, bitfields) BMP
//! - Other bit depths, palette lookup, top-down files
//! - Building BMP headers from scratch (a reference file is always needed)
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmpio::{read_rgb, write_rgb, Unstoppable};
//!
//! let mut image = read_rgb("lena.bmp", Unstoppable)?;
//! for px in image.pixels_mut().chunks_exact_mut(4) {
//!     px[..3].iter_mut().for_each(|c| *c = 255 - *c);
//! }
//! write_rgb(image.pixels(), "inverted.bmp", image.height, image.width, "lena.bmp", Unstoppable)?;
//! # Ok::<(), zenbmpio::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod bmp;
mod buffer;
mod error;
mod header;
mod options;
mod pixel;

use std::io::{Read, Seek, Write};
use std::path::Path;

// Re-exports
pub use bmp::RowPadding;
pub use buffer::PixelBuffer;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::{BitmapError, FileRole};
pub use header::{BitmapHeader, HEADER_PROBE_LEN};
pub use options::{BmpOptions, Limits};
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;

/// Read the header fields of a BMP file without validating them.
///
/// Fails only if the file can't be opened or is shorter than
/// [`HEADER_PROBE_LEN`] bytes.
pub fn parse_header(path: impl AsRef<Path>) -> Result<BitmapHeader, BitmapError> {
    bmp::locate_header(path.as_ref())
}

// ── Greyscale ────────────────────────────────────────────────────────

/// Decode an 8-bit greyscale BMP to [`PixelLayout::Gray8`].
pub fn read_grey(path: impl AsRef<Path>, stop: impl Stop) -> Result<PixelBuffer, BitmapError> {
    read_grey_with_options(path, &BmpOptions::default(), stop)
}

/// Decode an 8-bit greyscale BMP with explicit options.
pub fn read_grey_with_options(
    path: impl AsRef<Path>,
    options: &BmpOptions,
    stop: impl Stop,
) -> Result<PixelBuffer, BitmapError> {
    bmp::decode_file(path.as_ref(), PixelLayout::Gray8, options, &stop)
}

/// Decode an 8-bit greyscale BMP from a stream positioned at its first byte.
///
/// The BMP may sit anywhere in the stream: its data offset is taken relative
/// to the position on entry.
pub fn decode_grey<R: Read + Seek>(
    reader: &mut R,
    options: &BmpOptions,
    stop: impl Stop,
) -> Result<PixelBuffer, BitmapError> {
    bmp::decode(reader, PixelLayout::Gray8, options, &stop)
}

/// Write a `rows` x `cols` greyscale buffer to `out_path`, copying header
/// bytes from the 8-bit BMP at `reference_path`.
pub fn write_grey(
    pixels: &[u8],
    out_path: impl AsRef<Path>,
    rows: u32,
    cols: u32,
    reference_path: impl AsRef<Path>,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    write_grey_with_options(
        pixels,
        out_path,
        rows,
        cols,
        reference_path,
        &BmpOptions::default(),
        stop,
    )
}

/// [`write_grey`] with explicit options.
pub fn write_grey_with_options(
    pixels: &[u8],
    out_path: impl AsRef<Path>,
    rows: u32,
    cols: u32,
    reference_path: impl AsRef<Path>,
    options: &BmpOptions,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    bmp::encode_file(
        pixels,
        rows,
        cols,
        out_path.as_ref(),
        reference_path.as_ref(),
        PixelLayout::Gray8,
        options,
        &stop,
    )
}

/// Stream form of [`write_grey`]. `reference` is rewound to its start before
/// its header is read, and again before its header bytes are copied.
pub fn encode_grey<R: Read + Seek, W: Write>(
    pixels: &[u8],
    rows: u32,
    cols: u32,
    reference: &mut R,
    out: &mut W,
    options: &BmpOptions,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    bmp::encode(
        pixels,
        rows,
        cols,
        reference,
        out,
        PixelLayout::Gray8,
        options,
        &stop,
    )
}

// ── RGB ──────────────────────────────────────────────────────────────

/// Decode a 24-bit BMP to [`PixelLayout::Rgba8`] with alpha fixed at 255.
pub fn read_rgb(path: impl AsRef<Path>, stop: impl Stop) -> Result<PixelBuffer, BitmapError> {
    read_rgb_with_options(path, &BmpOptions::default(), stop)
}

/// Decode a 24-bit BMP with explicit options.
pub fn read_rgb_with_options(
    path: impl AsRef<Path>,
    options: &BmpOptions,
    stop: impl Stop,
) -> Result<PixelBuffer, BitmapError> {
    bmp::decode_file(path.as_ref(), PixelLayout::Rgba8, options, &stop)
}

/// Decode a 24-bit BMP from a stream positioned at its first byte.
///
/// The BMP may sit anywhere in the stream: its data offset is taken relative
/// to the position on entry.
pub fn decode_rgb<R: Read + Seek>(
    reader: &mut R,
    options: &BmpOptions,
    stop: impl Stop,
) -> Result<PixelBuffer, BitmapError> {
    bmp::decode(reader, PixelLayout::Rgba8, options, &stop)
}

/// Write a `rows` x `cols` RGBA buffer to `out_path` as 24-bit rows (alpha
/// dropped), copying header bytes from the 24-bit BMP at `reference_path`.
pub fn write_rgb(
    pixels: &[u8],
    out_path: impl AsRef<Path>,
    rows: u32,
    cols: u32,
    reference_path: impl AsRef<Path>,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    write_rgb_with_options(
        pixels,
        out_path,
        rows,
        cols,
        reference_path,
        &BmpOptions::default(),
        stop,
    )
}

/// [`write_rgb`] with explicit options.
pub fn write_rgb_with_options(
    pixels: &[u8],
    out_path: impl AsRef<Path>,
    rows: u32,
    cols: u32,
    reference_path: impl AsRef<Path>,
    options: &BmpOptions,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    bmp::encode_file(
        pixels,
        rows,
        cols,
        out_path.as_ref(),
        reference_path.as_ref(),
        PixelLayout::Rgba8,
        options,
        &stop,
    )
}

/// Stream form of [`write_rgb`]. `reference` is rewound to its start before
/// its header is read, and again before its header bytes are copied.
pub fn encode_rgb<R: Read + Seek, W: Write>(
    pixels: &[u8],
    rows: u32,
    cols: u32,
    reference: &mut R,
    out: &mut W,
    options: &BmpOptions,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    bmp::encode(
        pixels,
        rows,
        cols,
        reference,
        out,
        PixelLayout::Rgba8,
        options,
        &stop,
    )
}

// ── Layout dispatch ──────────────────────────────────────────────────

/// Write a decoded (and possibly transformed) buffer with the encoder that
/// matches its layout.
pub fn write_buffer(
    buffer: &PixelBuffer,
    out_path: impl AsRef<Path>,
    reference_path: impl AsRef<Path>,
    options: &BmpOptions,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    bmp::encode_file(
        buffer.pixels(),
        buffer.height,
        buffer.width,
        out_path.as_ref(),
        reference_path.as_ref(),
        buffer.layout,
        options,
        &stop,
    )
}

/// Decode with the codec for `layout`.
pub fn read_layout(
    path: impl AsRef<Path>,
    layout: PixelLayout,
    options: &BmpOptions,
    stop: impl Stop,
) -> Result<PixelBuffer, BitmapError> {
    bmp::decode_file(path.as_ref(), layout, options, &stop)
}
