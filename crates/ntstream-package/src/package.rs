//! The streaming package: per-texture entries plus the streamed mip blocks.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! "PSTN" | version u32 | entry count u32 | block count u32
//! entries: hash u32 | block index u32 | width u16 | height u16 | mip levels u32 | name
//! blocks:  position u64 | length u32
//! zero padding, then block data with every block 16-byte aligned
//! ```
//!
//! Names are a `u32` byte length followed by UTF-8.

use std::fs;
use std::path::Path;

use ntstream_common::{hash, BinaryReader, BinaryWriter, FileKind};
use tracing::debug;

use crate::split::SplitTexture;
use crate::{Error, InfoRecord, Result};

/// Package format version written by this crate.
pub const PACKAGE_VERSION: u32 = 1;

/// Alignment of block data inside the package file.
pub const BLOCK_ALIGNMENT: usize = 16;

/// Summary of one texture stored in a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// Texture base name (file name without extension), unique in a package.
    pub name: String,
    /// Index of the texture's first block; its levels follow contiguously.
    pub block_index: u32,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// Number of mip levels, and so of blocks.
    pub mip_levels: u32,
    /// Hash of `name`, used by the runtime for lookups.
    pub hash: u32,
}

impl PackageEntry {
    /// Create an entry with its hash computed from `name`.
    ///
    /// The block index is assigned when the entry is added to a package.
    pub fn new(name: impl Into<String>, width: u16, height: u16, mip_levels: u32) -> Self {
        let name = name.into();
        Self {
            hash: hash::hash_str(&name),
            name,
            block_index: 0,
            width,
            height,
            mip_levels,
        }
    }
}

/// One mip level's bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataBlock {
    /// Offset of the data in the package file it was read from, 0 otherwise.
    pub position: u64,
    /// The level's bytes.
    pub data: Vec<u8>,
}

impl DataBlock {
    /// Create a block that has not been written yet.
    pub fn new(data: Vec<u8>) -> Self {
        Self { position: 0, data }
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the block holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A texture streaming package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    /// Texture entries, in insertion order.
    pub entries: Vec<PackageEntry>,
    /// All blocks of all textures, addressed by [`PackageEntry::block_index`].
    pub blocks: Vec<DataBlock>,
}

impl Package {
    /// Create an empty package.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a package file from disk.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::parse(&data)
    }

    /// Write the package to disk.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Find the entry for a texture by its exact (case-sensitive) name.
    pub fn find_entry(&self, name: &str) -> Option<&PackageEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// The blocks belonging to an entry, one per mip level.
    pub fn entry_blocks(&self, entry: &PackageEntry) -> Result<&[DataBlock]> {
        let start = entry.block_index as usize;
        let needed = u64::from(entry.mip_levels);
        let available = self.blocks.len().saturating_sub(start);

        if needed > available as u64 {
            return Err(Error::InsufficientBlocks {
                name: entry.name.clone(),
                needed,
                available,
            });
        }

        Ok(&self.blocks[start..start + entry.mip_levels as usize])
    }

    /// Append a split texture and return the info record that refers to it.
    pub fn add_texture(&mut self, texture: SplitTexture) -> Result<InfoRecord> {
        let SplitTexture {
            info,
            mut entry,
            blocks,
        } = texture;

        if self.find_entry(&entry.name).is_some() {
            return Err(Error::DuplicateEntry(entry.name));
        }

        entry.block_index = u32::try_from(self.blocks.len()).map_err(|_| Error::TooMany("blocks"))?;
        debug!(
            texture = %entry.name,
            block_index = entry.block_index,
            blocks = blocks.len(),
            "adding texture to package"
        );

        self.entries.push(entry);
        self.blocks.extend(blocks);
        Ok(info)
    }

    /// Decode a package from its file contents.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);

        if FileKind::detect(data) != Some(FileKind::Package) {
            return Err(Error::UnexpectedKind {
                expected: FileKind::Package,
            });
        }
        reader.advance(4);

        let version = reader.read_u32()?;
        if version != PACKAGE_VERSION {
            return Err(Error::UnsupportedVersion {
                kind: FileKind::Package,
                version,
            });
        }

        let entry_count = reader.read_u32()? as usize;
        let block_count = reader.read_u32()? as usize;

        // Counts come from the file, so cap the preallocation by what the data can hold
        let mut entries = Vec::with_capacity(entry_count.min(reader.remaining() / 20));
        for _ in 0..entry_count {
            let hash = reader.read_u32()?;
            let block_index = reader.read_u32()?;
            let width = reader.read_u16()?;
            let height = reader.read_u16()?;
            let mip_levels = reader.read_u32()?;
            let name = reader.read_sized_string()?.to_owned();

            entries.push(PackageEntry {
                name,
                block_index,
                width,
                height,
                mip_levels,
                hash,
            });
        }

        let mut blocks = Vec::with_capacity(block_count.min(reader.remaining() / 12));
        for index in 0..block_count {
            let position = reader.read_u64()?;
            let length = reader.read_u32()?;

            let range = usize::try_from(position)
                .ok()
                .and_then(|start| Some(start..start.checked_add(length as usize)?))
                .filter(|range| range.end <= data.len())
                .ok_or(Error::BlockOutOfRange {
                    index,
                    position,
                    length,
                })?;

            blocks.push(DataBlock {
                position,
                data: data[range].to_vec(),
            });
        }

        Ok(Self { entries, blocks })
    }

    /// Encode the package into its file contents.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let entry_count = u32::try_from(self.entries.len()).map_err(|_| Error::TooMany("entries"))?;
        let block_count = u32::try_from(self.blocks.len()).map_err(|_| Error::TooMany("blocks"))?;

        let lengths = self
            .blocks
            .iter()
            .map(|b| u32::try_from(b.len()).map_err(|_| Error::BlockTooLarge(b.len() as u64)))
            .collect::<Result<Vec<u32>>>()?;

        let mut writer = BinaryWriter::new();
        writer.write_bytes(&FileKind::Package.magic());
        writer.write_u32(PACKAGE_VERSION);
        writer.write_u32(entry_count);
        writer.write_u32(block_count);

        for entry in &self.entries {
            writer.write_u32(entry.hash);
            writer.write_u32(entry.block_index);
            writer.write_u16(entry.width);
            writer.write_u16(entry.height);
            writer.write_u32(entry.mip_levels);
            writer.write_sized_str(&entry.name)?;
        }

        // Block positions are known once the table size is
        let mut position = (writer.position() + self.blocks.len() * 12).next_multiple_of(BLOCK_ALIGNMENT);
        for length in &lengths {
            writer.write_u64(position as u64);
            writer.write_u32(*length);
            position = (position + *length as usize).next_multiple_of(BLOCK_ALIGNMENT);
        }

        for block in &self.blocks {
            writer.align(BLOCK_ALIGNMENT);
            writer.write_bytes(&block.data);
        }

        Ok(writer.into_inner())
    }
}
