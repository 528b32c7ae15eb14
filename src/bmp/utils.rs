//! Row stride arithmetic.

use crate::pixel::PixelLayout;

/// Zero bytes written after a row; large enough for any [`RowPadding`].
pub(crate) const PAD_FILL: [u8; 9] = [0; 9];

/// Bytes needed after `units` items of `unit_bytes` each to reach a multiple
/// of 4. Always in `0..=3`.
pub(crate) fn row_padding(units: usize, unit_bytes: usize) -> usize {
    // Reduce first so huge widths can't overflow.
    let tail = ((units % 4) * (unit_bytes % 4)) % 4;
    (4 - tail) % 4
}

/// How much padding follows each row of the pixel body.
///
/// The two policies agree for 8-bit files; they differ only for 24-bit rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowPadding {
    /// Pad each row's byte length (`width * 3` for 24-bit) up to a multiple
    /// of 4, as every standard BMP writer does.
    #[default]
    Canonical,
    /// Pad by `(4 - width % 4) % 4` whole pixels of 3 bytes each.
    ///
    /// This is how some older tools laid out 24-bit rows. Files written this
    /// way are not readable by standard decoders unless `width % 4 == 0`;
    /// use it only to read or reproduce such files.
    PixelUnits,
}

impl RowPadding {
    /// Padding bytes after one on-disk row of `width` pixels.
    pub fn pad_bytes(self, width: usize, layout: PixelLayout) -> usize {
        let unit = layout.disk_bytes_per_pixel();
        match self {
            Self::Canonical => row_padding(width, unit),
            Self::PixelUnits => row_padding(width, 1) * unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_rounds_rows_to_four_bytes() {
        for unit in [1, 3] {
            for width in 1..=64 {
                let p = row_padding(width, unit);
                assert!(p <= 3);
                assert_eq!((width * unit + p) % 4, 0, "width {width} unit {unit}");
            }
        }
        assert_eq!(row_padding(usize::MAX, 3), 3);
    }

    #[test]
    fn policies_agree_for_greyscale() {
        for width in 1..=16 {
            assert_eq!(
                RowPadding::Canonical.pad_bytes(width, PixelLayout::Gray8),
                RowPadding::PixelUnits.pad_bytes(width, PixelLayout::Gray8)
            );
        }
    }

    #[test]
    fn pixel_units_pads_whole_triples() {
        // width 1: canonical pads 3 -> 4 bytes, legacy skips 3 triples
        assert_eq!(RowPadding::Canonical.pad_bytes(1, PixelLayout::Rgba8), 1);
        assert_eq!(RowPadding::PixelUnits.pad_bytes(1, PixelLayout::Rgba8), 9);
        assert_eq!(RowPadding::Canonical.pad_bytes(2, PixelLayout::Rgba8), 2);
        assert_eq!(RowPadding::PixelUnits.pad_bytes(2, PixelLayout::Rgba8), 6);
        assert_eq!(RowPadding::PixelUnits.pad_bytes(4, PixelLayout::Rgba8), 0);
    }
}
