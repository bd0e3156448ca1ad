//! Splitting a DDS file into its info record and package blocks.

use std::path::Path;

use ntstream_common::{BinaryReader, FileKind};
use ntstream_dds::Dds;
use tracing::debug;

use crate::package::{DataBlock, PackageEntry};
use crate::validate::validate;
use crate::{Error, InfoRecord, Result, ValidationError};

/// A DDS file carved into the pieces of the streaming layout.
///
/// Add it to a [`crate::Package`] with [`crate::Package::add_texture`] to
/// assign its block index.
#[derive(Debug, Clone)]
pub struct SplitTexture {
    /// The resident fragment.
    pub info: InfoRecord,
    /// The package summary, with its block index still unassigned.
    pub entry: PackageEntry,
    /// One block per mip level, largest first.
    pub blocks: Vec<DataBlock>,
}

/// Split the bytes of a DDS file.
///
/// `file_name` names the info record; its stem names the package entry.
/// Every mip level becomes a block, including the 4x4 level, which is also
/// embedded in the info record.
pub fn split_dds(data: &[u8], file_name: &str, package_name: &str) -> Result<SplitTexture> {
    if FileKind::detect(data) != Some(FileKind::Dds) {
        return Err(Error::UnexpectedKind {
            expected: FileKind::Dds,
        });
    }

    let dds = Dds::parse(data)?;
    let mip4x4_index = validate(&dds)?;
    let header_len = dds.header_len();

    let sizes = dds.mip_sizes()?;
    let mut reader = BinaryReader::new_at(data, header_len);
    let mut blocks = Vec::with_capacity(sizes.len());
    let mut width = dds.width();

    for (level, size) in sizes.into_iter().enumerate() {
        let available = reader.remaining();
        let bytes = usize::try_from(size)
            .ok()
            .and_then(|size| reader.read_bytes(size).ok())
            .ok_or(ntstream_dds::Error::Truncated {
                part: "mip level",
                needed: size,
                available: available as u64,
            })?;

        debug!(file = file_name, level, width, size, "split mip level");
        blocks.push(DataBlock::new(bytes.to_vec()));
        width >>= 1;
    }

    if !reader.is_empty() {
        return Err(ValidationError::TrailingData {
            bytes: reader.remaining(),
        }
        .into());
    }

    let width = u16::try_from(dds.width()).map_err(|_| ValidationError::TooLarge { width: dds.width() })?;
    let height = u16::try_from(dds.height()).map_err(|_| ValidationError::TooLarge { width: dds.height() })?;

    let base_name = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);

    let info = InfoRecord {
        name: file_name.to_owned(),
        package_name: package_name.to_owned(),
        mip4x4_index,
        mip4x4: blocks[mip4x4_index as usize].data.clone(),
        dds_header: data[..header_len].to_vec(),
    };
    let entry = PackageEntry::new(base_name, width, height, dds.mipmap_count());

    Ok(SplitTexture {
        info,
        entry,
        blocks,
    })
}
