use std::fmt;
use std::io;
use std::path::PathBuf;

use enough::StopReason;

use crate::pixel::PixelLayout;

/// Which file an operation failed to open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileRole {
    /// The BMP being decoded.
    Input,
    /// The BMP whose header bytes are copied into an encoded file.
    Reference,
    /// The BMP being written.
    Output,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Input => "input",
            Self::Reference => "reference",
            Self::Output => "output",
        })
    }
}

/// Errors from BMP decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("cannot open {role} file {}: {source}", .path.display())]
    OpenFailure {
        role: FileRole,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot allocate {bytes} bytes for pixel data")]
    AllocationFailure { bytes: usize },

    #[error("header copy wrote {written} bytes, expected {expected}")]
    ShortWrite { expected: u64, written: u64 },

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("{layout:?} codec needs a {}-bit BMP, file is {bits_per_pixel}-bit", .layout.disk_bits_per_pixel())]
    FormatMismatch {
        layout: PixelLayout,
        bits_per_pixel: u16,
    },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error(
        "pixel buffer is {}x{}, reference file is {}x{}",
        .actual.0, .actual.1, .expected.0, .expected.1
    )]
    DimensionMismatch {
        /// (width, height) declared by the reference file.
        expected: (u32, u32),
        /// (cols, rows) supplied by the caller.
        actual: (u32, u32),
    },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: PixelLayout,
        actual: PixelLayout,
    },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("i/o error: {0}")]
    Io(#[source] io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl BitmapError {
    pub(crate) fn open(role: FileRole, path: impl Into<PathBuf>, source: io::Error) -> Self {
        BitmapError::OpenFailure {
            role,
            path: path.into(),
            source,
        }
    }
}

impl From<io::Error> for BitmapError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            BitmapError::UnexpectedEof
        } else {
            BitmapError::Io(e)
        }
    }
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
