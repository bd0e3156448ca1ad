//! ntstream - texture streaming container library.
//!
//! This crate provides a unified interface to the ntstream crates for
//! splitting DDS textures into streamed packages and restoring them.
//!
//! # Crates
//!
//! - [`ntstream_common`] - Common utilities (binary reading and writing, signatures, name hash)
//! - [`ntstream_dds`] - DDS header model and mip level sizes
//! - [`ntstream_package`] - Info files, packages, validation and batch drivers
//!
//! # Example
//!
//! ```no_run
//! use ntstream::prelude::*;
//!
//! // Restore one texture from its info file
//! let info = InfoRecord::read("Output/rock.dds")?;
//! let mut cache = PackageCache::new(Some("Output".into()));
//! let dds = info.unpack(cache.get(&info.package_name)?)?;
//! std::fs::write("rock.dds", dds)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use ntstream_common as common;
pub use ntstream_dds as dds;
pub use ntstream_package as package;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use ntstream_common::{hash, BinaryReader, BinaryWriter, FileKind};
    pub use ntstream_dds::{Dds, DxgiFormat};
    pub use ntstream_package::{
        pack_directory, split_dds, unpack_path, InfoRecord, Package, PackageCache, PackageEntry,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
