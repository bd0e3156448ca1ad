//! Texture streaming containers.
//!
//! A DDS texture is split into a small info file (`NTSI`) that keeps the
//! original header and the resident 4x4 mip level, and a shared package
//! (`NTSP`, `.ntsp`) that holds every mip level as a data block.
//!
//! # Example
//!
//! ```no_run
//! use ntstream_package::{split_dds, Package};
//!
//! let data = std::fs::read("rock.dds")?;
//! let mut package = Package::new();
//! let info = package.add_texture(split_dds(&data, "rock.dds", "rocks")?)?;
//!
//! let restored = info.unpack(&package)?;
//! assert_eq!(restored, data);
//! # Ok::<(), ntstream_package::Error>(())
//! ```

mod batch;
mod cache;
mod error;
mod info;
mod package;
mod split;
mod validate;

#[cfg(test)]
mod test_util;

pub use batch::{dds_files, pack_directory, unpack_path, BatchReport, PackOutput, OUTPUT_DIR_NAME};
pub use cache::{PackageCache, PACKAGE_EXTENSION};
pub use error::{Error, Result, ValidationError};
pub use info::{InfoRecord, INFO_VERSION};
pub use package::{DataBlock, Package, PackageEntry, BLOCK_ALIGNMENT, PACKAGE_VERSION};
pub use split::{split_dds, SplitTexture};
pub use validate::{mip4x4_index, validate, MAX_DIMENSION, RESIDENT_MIP_SIZE};
