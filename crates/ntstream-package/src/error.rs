//! Error types for texture streaming containers.

use std::path::PathBuf;

use ntstream_common::FileKind;
use thiserror::Error;

/// A texture that cannot be split into the streaming layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Wider than a 16-bit package entry can describe.
    #[error("texture is too large ({width}px wide); must be smaller than 65536x65536")]
    TooLarge { width: u32 },

    /// The depth flag is set.
    #[error("texture is 3D; only 2D textures are supported")]
    VolumeTexture,

    /// Width and height differ.
    #[error("texture is not square ({width}x{height})")]
    NotSquare { width: u32, height: u32 },

    /// Smaller than the resident 4x4 level.
    #[error("texture is too small ({width}x{width}); needs to be at least 4x4")]
    TooSmall { width: u32 },

    /// The mip chain stops before reaching 4x4.
    #[error(
        "invalid mipmap count of {mipmap_count}; needs to be at least {required} to contain a 4x4 image"
    )]
    InsufficientMipLevels { mipmap_count: u32, required: u32 },

    /// Bytes remain after the last declared mip level.
    #[error("{bytes} bytes of data after the mip chain (texture arrays and cube maps are unsupported)")]
    TrailingData { bytes: usize },
}

/// Errors that can occur when packing or unpacking streamed textures.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] ntstream_common::Error),

    /// Malformed or unsupported DDS header or pixel format.
    #[error("{0}")]
    Dds(#[from] ntstream_dds::Error),

    /// The texture violates a geometry or mip count constraint.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Invalid glob pattern built from an input path.
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// The file does not start with the expected signature.
    #[error("not a {expected} file")]
    UnexpectedKind { expected: FileKind },

    /// A container written by a newer or foreign tool.
    #[error("unsupported {kind} version {version}")]
    UnsupportedVersion { kind: FileKind, version: u32 },

    /// The package named by an info record does not exist.
    #[error("package \"{package}\" not found at {}", .path.display())]
    PackageNotFound { package: String, path: PathBuf },

    /// The package has no entry for the texture.
    #[error("package \"{package}\" has no entry named \"{name}\"")]
    EntryNotFound { name: String, package: String },

    /// A package entry declares more mip levels than there are blocks.
    #[error("entry \"{name}\" needs {needed} blocks but only {available} are available")]
    InsufficientBlocks {
        name: String,
        needed: u64,
        available: usize,
    },

    /// The embedded 4x4 level disagrees with the package's copy.
    #[error("embedded 4x4 level of \"{name}\" is {embedded} bytes but the package block is {package} bytes")]
    Mip4x4Mismatch {
        name: String,
        embedded: usize,
        package: usize,
    },

    /// A block table entry points outside the package file.
    #[error("block {index} at offset {position:#x} ({length} bytes) lies outside the package")]
    BlockOutOfRange {
        index: usize,
        position: u64,
        length: u32,
    },

    /// A mip level does not fit in a 32-bit block length.
    #[error("mip level of {0} bytes is too large for a package block")]
    BlockTooLarge(u64),

    /// More entries or blocks than a 32-bit count can hold.
    #[error("too many {0} for one package")]
    TooMany(&'static str),

    /// Two textures with the same name in one package.
    #[error("package already contains an entry named \"{0}\"")]
    DuplicateEntry(String),

    /// The top-level input path does not exist.
    #[error("input path {} does not exist", .0.display())]
    InputNotFound(PathBuf),
}

/// Result type for streaming container operations.
pub type Result<T> = std::result::Result<T, Error>;
