//! DDS format model for texture streaming.
//!
//! This crate decodes DDS headers (including the DXT10 extension) and
//! computes the exact byte size of every mip level for the supported pixel
//! formats:
//!
//! - [`Dds`] - A decoded header with mip chain size calculation
//! - [`DxgiFormat`] - The DXGI format catalogue with bits-per-pixel data
//! - [`surface_size`] - Pitch/slice formulas for any surface
//!
//! # Example
//!
//! ```no_run
//! use ntstream_dds::Dds;
//!
//! let data = std::fs::read("texture.dds")?;
//! let dds = Dds::parse(&data)?;
//!
//! for (level, size) in dds.mip_sizes()?.iter().enumerate() {
//!     println!("mip {level}: {size} bytes");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod dds;
mod error;
mod format;
mod header;
mod size;

pub use dds::{Dds, MAX_MIP_LEVELS};
pub use error::{Error, Result};
pub use format::DxgiFormat;
pub use header::{
    AlphaMode, DdsCaps, DdsCaps2, DdsFlags, DdsHeader, DdsHeaderDxt10, DdsPixelFormat,
    DxgiMiscFlags, FourCC, PixelFormatFlags, ResourceDimension,
};
pub use size::surface_size;

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";
