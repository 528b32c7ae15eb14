use crate::bmp::RowPadding;
use crate::error::BitmapError;
use crate::pixel::PixelLayout;

/// Resource caps applied to a decode before the pixel buffer is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the decoded buffer in bytes.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Size in bytes of a `width` x `height` buffer in `layout`, or the
    /// first limit it breaks.
    pub(crate) fn buffer_size(
        &self,
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<usize, BitmapError> {
        let over = |what: &str, value: u64, max: Option<u64>| match max {
            Some(max) if value > max => Err(BitmapError::LimitExceeded(format!(
                "{what} {value} exceeds limit {max}"
            ))),
            _ => Ok(()),
        };
        over("width", u64::from(width), self.max_width)?;
        over("height", u64::from(height), self.max_height)?;
        over(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )?;

        let bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(layout.bytes_per_pixel()))
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        over("buffer size", bytes as u64, self.max_memory_bytes)?;
        Ok(bytes)
    }
}

/// Per-call codec configuration.
///
/// The plain `read_*`/`write_*` functions use `BmpOptions::default()`.
#[derive(Clone, Debug, Default)]
pub struct BmpOptions {
    pub limits: Limits,
    /// How many padding bytes follow each 24-bit row.
    pub padding: RowPadding,
}

impl BmpOptions {
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_padding(mut self, padding: RowPadding) -> Self {
        self.padding = padding;
        self
    }
}
