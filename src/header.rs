//! BMP file/info header locator.
//!
//! Only a handful of fixed-offset fields are read. Everything between the
//! info header and the pixel data (palettes, colour masks, ICC blobs) is
//! treated as opaque and copied verbatim by the encoder.

use std::io::Read;

use crate::error::BitmapError;
use crate::pixel::PixelLayout;

/// Bytes read from the start of a file to locate the header fields.
pub const HEADER_PROBE_LEN: usize = 34;

const SIGNATURE: [u8; 2] = *b"BM";
const BI_RGB: u32 = 0;

/// The header fields the codec consumes.
///
/// Parsed fresh on every call and never cached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    /// Byte offset of the pixel body (file header @10).
    pub data_offset: u32,
    /// Image width in pixels (info header @18).
    pub width: i32,
    /// Image height in pixels (info header @22). Positive means bottom-up.
    pub height: i32,
    /// Magic bytes (@0), `BM` for a Windows bitmap.
    pub signature: [u8; 2],
    /// Bit count (@28).
    pub bits_per_pixel: u16,
    /// Compression scheme (@30), 0 for uncompressed.
    pub compression: u32,
}

impl BitmapHeader {
    /// Locate the header fields in the first [`HEADER_PROBE_LEN`] bytes.
    ///
    /// Does no validation; see [`BitmapHeader::validate`].
    pub fn parse(bytes: &[u8]) -> Result<Self, BitmapError> {
        let bytes: &[u8; HEADER_PROBE_LEN] = bytes
            .get(..HEADER_PROBE_LEN)
            .and_then(|b| b.try_into().ok())
            .ok_or(BitmapError::UnexpectedEof)?;

        let u16_at = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);
        let u32_at = |at: usize| {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };

        Ok(Self {
            data_offset: u32_at(10),
            width: u32_at(18) as i32,
            height: u32_at(22) as i32,
            signature: [bytes[0], bytes[1]],
            bits_per_pixel: u16_at(28),
            compression: u32_at(30),
        })
    }

    /// Read and locate the header from the current position of `reader`.
    pub(crate) fn read_from<R: Read>(reader: &mut R) -> Result<Self, BitmapError> {
        let mut probe = [0u8; HEADER_PROBE_LEN];
        reader.read_exact(&mut probe)?;
        Self::parse(&probe)
    }

    /// Check that the file is an uncompressed bottom-up BMP whose bit depth
    /// matches `layout`, returning `(width, height)`.
    pub fn validate(&self, layout: PixelLayout) -> Result<(u32, u32), BitmapError> {
        if self.signature != SIGNATURE {
            return Err(BitmapError::UnrecognizedFormat);
        }
        if self.bits_per_pixel != layout.disk_bits_per_pixel() {
            return Err(BitmapError::FormatMismatch {
                layout,
                bits_per_pixel: self.bits_per_pixel,
            });
        }
        if self.compression != BI_RGB {
            return Err(BitmapError::UnsupportedVariant(format!(
                "BMP compression {} unsupported",
                self.compression
            )));
        }
        if self.width <= 0 {
            return Err(BitmapError::InvalidHeader(format!(
                "BMP width is {}",
                self.width
            )));
        }
        if self.height <= 0 {
            // Negative heights are top-down files.
            return Err(BitmapError::InvalidHeader(format!(
                "BMP height is {}",
                self.height
            )));
        }
        if (self.data_offset as usize) < HEADER_PROBE_LEN {
            return Err(BitmapError::InvalidHeader(format!(
                "pixel data offset {} overlaps the header",
                self.data_offset
            )));
        }
        Ok((self.width as u32, self.height as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(bpp: u16) -> Vec<u8> {
        let mut b = vec![0u8; 54];
        b[0..2].copy_from_slice(b"BM");
        b[10..14].copy_from_slice(&54u32.to_le_bytes());
        b[14..18].copy_from_slice(&40u32.to_le_bytes());
        b[18..22].copy_from_slice(&7i32.to_le_bytes());
        b[22..26].copy_from_slice(&3i32.to_le_bytes());
        b[26..28].copy_from_slice(&1u16.to_le_bytes());
        b[28..30].copy_from_slice(&bpp.to_le_bytes());
        b
    }

    #[test]
    fn locates_fixed_fields() {
        let h = BitmapHeader::parse(&probe(24)).unwrap();
        assert_eq!(h.data_offset, 54);
        assert_eq!(h.width, 7);
        assert_eq!(h.height, 3);
        assert_eq!(h.bits_per_pixel, 24);
        assert_eq!(h.validate(PixelLayout::Rgba8).unwrap(), (7, 3));
    }

    #[test]
    fn short_probe_is_eof() {
        assert!(matches!(
            BitmapHeader::parse(&probe(8)[..20]),
            Err(BitmapError::UnexpectedEof)
        ));
    }

    #[test]
    fn parse_does_not_validate() {
        let mut b = probe(8);
        b[0..2].copy_from_slice(b"XX");
        let h = BitmapHeader::parse(&b).unwrap();
        assert_eq!(h.signature, *b"XX");
        assert!(matches!(
            h.validate(PixelLayout::Gray8),
            Err(BitmapError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn bit_depth_must_match_layout() {
        let h = BitmapHeader::parse(&probe(8)).unwrap();
        assert!(h.validate(PixelLayout::Gray8).is_ok());
        assert!(matches!(
            h.validate(PixelLayout::Rgba8),
            Err(BitmapError::FormatMismatch {
                layout: PixelLayout::Rgba8,
                bits_per_pixel: 8
            })
        ));
    }

    #[test]
    fn rejects_compressed_and_top_down() {
        let mut b = probe(8);
        b[30..34].copy_from_slice(&1u32.to_le_bytes());
        let h = BitmapHeader::parse(&b).unwrap();
        assert!(matches!(
            h.validate(PixelLayout::Gray8),
            Err(BitmapError::UnsupportedVariant(_))
        ));

        let mut b = probe(8);
        b[22..26].copy_from_slice(&(-3i32).to_le_bytes());
        let h = BitmapHeader::parse(&b).unwrap();
        assert_eq!(h.height, -3);
        assert!(matches!(
            h.validate(PixelLayout::Gray8),
            Err(BitmapError::InvalidHeader(_))
        ));
    }
}
