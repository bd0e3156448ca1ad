//! The info record: the always-resident part of a streamed texture.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! "NTSI" | version u32 | package name | mip4x4 index u32 | mip4x4 bytes | DDS header bytes
//! ```
//!
//! Strings and byte arrays are a `u32` length followed by the data. The
//! record's name is the info file's own file name and is not stored.

use std::fs;
use std::path::Path;

use ntstream_common::{BinaryReader, BinaryWriter, FileKind};
use ntstream_dds::Dds;
use tracing::debug;

use crate::{Error, Package, Result};

/// Info format version written by this crate.
pub const INFO_VERSION: u32 = 1;

/// The resident fragment of a streamed texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRecord {
    /// File name of the texture, including its extension.
    pub name: String,
    /// Name of the package holding the streamed levels (without `.ntsp`).
    pub package_name: String,
    /// Mip level (0 = largest) that is 4x4.
    pub mip4x4_index: u32,
    /// Bytes of the 4x4 level.
    pub mip4x4: Vec<u8>,
    /// The original file's bytes from the magic up to the pixel data.
    pub dds_header: Vec<u8>,
}

impl InfoRecord {
    /// Read an info file, naming the record after the file.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data = fs::read(path)?;
        Self::parse(name, &data)
    }

    /// Write the record to disk.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// The texture name without its extension, as used for package entries.
    pub fn base_name(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }

    /// Decode the stored DDS header.
    pub fn dds(&self) -> Result<Dds> {
        Ok(Dds::parse(&self.dds_header)?)
    }

    /// Decode an info record from its file contents.
    pub fn parse(name: impl Into<String>, data: &[u8]) -> Result<Self> {
        if FileKind::detect(data) != Some(FileKind::Info) {
            return Err(Error::UnexpectedKind {
                expected: FileKind::Info,
            });
        }

        let mut reader = BinaryReader::new_at(data, 4);
        let version = reader.read_u32()?;
        if version != INFO_VERSION {
            return Err(Error::UnsupportedVersion {
                kind: FileKind::Info,
                version,
            });
        }

        let package_name = reader.read_sized_string()?.to_owned();
        let mip4x4_index = reader.read_u32()?;
        let mip4x4 = reader.read_sized_bytes()?.to_vec();
        let dds_header = reader.read_sized_bytes()?.to_vec();

        Ok(Self {
            name: name.into(),
            package_name,
            mip4x4_index,
            mip4x4,
            dds_header,
        })
    }

    /// Encode the record into its file contents.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer =
            BinaryWriter::with_capacity(24 + self.package_name.len() + self.mip4x4.len() + self.dds_header.len());
        writer.write_bytes(&FileKind::Info.magic());
        writer.write_u32(INFO_VERSION);
        writer.write_sized_str(&self.package_name)?;
        writer.write_u32(self.mip4x4_index);
        writer.write_sized_bytes(&self.mip4x4)?;
        writer.write_sized_bytes(&self.dds_header)?;
        Ok(writer.into_inner())
    }

    /// Rebuild the original DDS file from this record and its package.
    ///
    /// The output is the stored header followed by every mip level, largest
    /// first. The 4x4 level comes from this record; all others come from the
    /// package, which must still hold a same-sized copy of the 4x4 level.
    pub fn unpack(&self, package: &Package) -> Result<Vec<u8>> {
        let name = self.base_name();
        let entry = package.find_entry(name).ok_or_else(|| Error::EntryNotFound {
            name: name.to_owned(),
            package: self.package_name.clone(),
        })?;
        let blocks = package.entry_blocks(entry)?;

        let mip4x4_index = self.mip4x4_index as usize;
        let Some(package_mip4x4) = blocks.get(mip4x4_index) else {
            return Err(Error::InsufficientBlocks {
                name: name.to_owned(),
                needed: u64::from(self.mip4x4_index) + 1,
                available: blocks.len(),
            });
        };
        if package_mip4x4.len() != self.mip4x4.len() {
            return Err(Error::Mip4x4Mismatch {
                name: name.to_owned(),
                embedded: self.mip4x4.len(),
                package: package_mip4x4.len(),
            });
        }

        let total = self.dds_header.len() + blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut output = Vec::with_capacity(total);
        output.extend_from_slice(&self.dds_header);

        for (level, block) in blocks.iter().enumerate() {
            let data = if level == mip4x4_index {
                &self.mip4x4
            } else {
                &block.data
            };
            debug!(texture = name, level, size = data.len(), "restoring mip level");
            output.extend_from_slice(data);
        }

        Ok(output)
    }
}
