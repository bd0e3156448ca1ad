//! File type detection from the leading four bytes.

use byteorder::{BigEndian, ByteOrder};

/// The kinds of file the tool understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// A plain DirectDraw Surface file.
    Dds,
    /// A texture streaming info file (the resident fragment).
    Info,
    /// A texture streaming package (the streamed mip blocks).
    Package,
}

impl FileKind {
    /// Signature of a DDS file ("DDS ").
    pub const DDS_SIGNATURE: u32 = 0x4444_5320;
    /// Signature of an info file ("NTSI").
    pub const INFO_SIGNATURE: u32 = 0x4E54_5349;
    /// Signature of a package file ("PSTN" on disk).
    pub const PACKAGE_SIGNATURE: u32 = 0x5053_544E;

    /// Detect the file kind from the start of its contents.
    pub fn detect(data: &[u8]) -> Option<Self> {
        match signature(data)? {
            Self::DDS_SIGNATURE => Some(Self::Dds),
            Self::INFO_SIGNATURE => Some(Self::Info),
            Self::PACKAGE_SIGNATURE => Some(Self::Package),
            _ => None,
        }
    }

    /// The signature value for this kind.
    pub const fn signature(self) -> u32 {
        match self {
            Self::Dds => Self::DDS_SIGNATURE,
            Self::Info => Self::INFO_SIGNATURE,
            Self::Package => Self::PACKAGE_SIGNATURE,
        }
    }

    /// The signature as it appears in the first four bytes of a file.
    pub const fn magic(self) -> [u8; 4] {
        self.signature().to_be_bytes()
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Dds => "DDS",
            Self::Info => "NTSI info",
            Self::Package => "NTSP package",
        })
    }
}

/// Read the first four bytes as a big-endian signature.
pub fn signature(data: &[u8]) -> Option<u32> {
    data.get(..4).map(BigEndian::read_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(FileKind::detect(b"DDS \x7c\x00\x00\x00"), Some(FileKind::Dds));
        assert_eq!(FileKind::detect(b"NTSI\x01"), Some(FileKind::Info));
        assert_eq!(FileKind::detect(b"PSTN"), Some(FileKind::Package));
        assert_eq!(FileKind::detect(b"NTSP"), None);
        assert_eq!(FileKind::detect(b"DDS"), None);
    }

    #[test]
    fn test_magic_matches_signature() {
        for kind in [FileKind::Dds, FileKind::Info, FileKind::Package] {
            assert_eq!(FileKind::detect(&kind.magic()), Some(kind));
        }
        assert_eq!(&FileKind::Info.magic(), b"NTSI");
    }
}
