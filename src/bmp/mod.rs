//! Uncompressed 8-bit and 24-bit BMP codec (internal).
//!
//! Use the top-level [`crate::read_grey`], [`crate::write_rgb`], etc.

mod decode;
mod encode;
mod utils;

pub use utils::RowPadding;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use enough::Stop;
use log::info;

use crate::buffer::PixelBuffer;
use crate::error::{BitmapError, FileRole};
use crate::header::BitmapHeader;
use crate::options::BmpOptions;
use crate::pixel::PixelLayout;

fn open(path: &Path, role: FileRole) -> Result<BufReader<File>, BitmapError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| BitmapError::open(role, path, e))
}

/// Read the header fields of the file at `path` without validating them.
pub(crate) fn locate_header(path: &Path) -> Result<BitmapHeader, BitmapError> {
    let mut reader = open(path, FileRole::Input)?;
    BitmapHeader::read_from(&mut reader)
}

/// Decode from a stream positioned at the start of a BMP file, which need not
/// be the start of the stream.
pub(crate) fn decode<R: Read + Seek>(
    reader: &mut R,
    layout: PixelLayout,
    options: &BmpOptions,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    decode::decode_bmp(reader, layout, options, stop)
}

/// Decode the file at `path`.
pub(crate) fn decode_file(
    path: &Path,
    layout: PixelLayout,
    options: &BmpOptions,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    info!("reading input image from {}", path.display());
    let mut reader = open(path, FileRole::Input)?;
    let decoded = decode(&mut reader, layout, options, stop)?;
    info!("width = {}, height = {}", decoded.width, decoded.height);
    Ok(decoded)
}

/// Encode `pixels` to `out`, taking header bytes from `reference`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn encode<R: Read + Seek, W: Write>(
    pixels: &[u8],
    rows: u32,
    cols: u32,
    reference: &mut R,
    out: &mut W,
    layout: PixelLayout,
    options: &BmpOptions,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let header = encode::check_against_reference(reference, pixels, rows, cols, layout)?;
    encode::encode_bmp(pixels, &header, reference, out, layout, options, stop)
}

/// Encode `pixels` to the file at `out_path`, taking header bytes from the
/// file at `reference_path`.
///
/// The output file is only created once the reference has been validated
/// against `rows` and `cols`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn encode_file(
    pixels: &[u8],
    rows: u32,
    cols: u32,
    out_path: &Path,
    reference_path: &Path,
    layout: PixelLayout,
    options: &BmpOptions,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let mut reference = open(reference_path, FileRole::Reference)?;
    let header = encode::check_against_reference(&mut reference, pixels, rows, cols, layout)?;

    info!("writing output image to {}", out_path.display());
    let file =
        File::create(out_path).map_err(|e| BitmapError::open(FileRole::Output, out_path, e))?;
    let mut out = BufWriter::new(file);
    encode::encode_bmp(pixels, &header, &mut reference, &mut out, layout, options, stop)?;
    out.flush()?;
    Ok(())
}
