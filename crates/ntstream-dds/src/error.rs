//! Error types for DDS handling.

use thiserror::Error;

use crate::format::DxgiFormat;
use crate::header::FourCC;

/// Errors that can occur when working with DDS files.
///
/// Every variant describes a malformed or unsupported header or pixel format.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] ntstream_common::Error),

    /// Invalid DDS magic.
    #[error("invalid DDS magic: expected 'DDS ', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// The data ends before the named part is complete.
    #[error("truncated DDS {part}: needed {needed} bytes but only {available} available")]
    Truncated {
        part: &'static str,
        needed: u64,
        available: u64,
    },

    /// The DXT10 header names `DXGI_FORMAT_UNKNOWN`.
    #[error("DXGI format is UNKNOWN")]
    UnknownDxgiFormat,

    /// The DXT10 header names a format without a defined size.
    #[error("unsupported DXGI format {0}")]
    UnsupportedDxgiFormat(u32),

    /// The legacy pixel format has no usable FourCC or bit count.
    #[error("unsupported legacy pixel format (FourCC {four_cc}, {rgb_bit_count} bits per pixel)")]
    UnsupportedPixelFormat { four_cc: FourCC, rgb_bit_count: u32 },

    /// The header declares more mip levels than a 32-bit width can halve into.
    #[error("mipmap count of {count} exceeds the maximum of {max}")]
    TooManyMipLevels { count: u32, max: u32 },

    /// A planar format was given odd dimensions.
    #[error("{format} requires even dimensions, got {width}x{height}")]
    DimensionAlignment {
        format: DxgiFormat,
        width: u64,
        height: u64,
    },
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
