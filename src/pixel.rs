/// In-memory pixel layout produced by a decoder and consumed by an encoder.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// Single channel, 8-bit intensity. Stored on disk as 8-bit BMP.
    Gray8,
    /// 4 channels, 8-bit RGBA with constant 255 alpha. Stored on disk as
    /// 24-bit BMP triples in file byte order; alpha never reaches the disk.
    Rgba8,
}

impl PixelLayout {
    /// Bytes per pixel in memory.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgba8 => 4,
        }
    }

    /// Number of channels in memory.
    pub fn channels(&self) -> usize {
        self.bytes_per_pixel()
    }

    /// Bytes per pixel in the BMP pixel body.
    pub fn disk_bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgba8 => 3,
        }
    }

    /// Value the BMP info header must carry in its bit-count field.
    pub fn disk_bits_per_pixel(&self) -> u16 {
        match self {
            Self::Gray8 => 8,
            Self::Rgba8 => 24,
        }
    }
}

/// Pixel types that can view a decoded buffer without copying.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy + 'static {
    /// The buffer layout this pixel type reinterprets.
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::Gray<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::Gray8
    }
}
