//! Common utilities for ntstream.
//!
//! This crate provides the foundational pieces shared by the DDS model and
//! the streaming containers:
//!
//! - [`BinaryReader`] - Zero-copy little-endian reading from byte slices
//! - [`BinaryWriter`] - Little-endian writing into a growable buffer
//! - [`FileKind`] - File type detection from the leading signature
//! - [`hash`] - The name hash stored in package entries

mod error;
mod reader;
mod signature;
mod writer;

pub mod hash;

pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use signature::{signature, FileKind};
pub use writer::BinaryWriter;
