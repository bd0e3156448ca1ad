//! Geometry and mip chain checks applied before splitting.

use ntstream_dds::{Dds, DdsFlags};

use crate::ValidationError;

/// Largest width or height a package entry can record.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

/// Edge length of the level embedded in the info record.
pub const RESIDENT_MIP_SIZE: u32 = 4;

/// Number of halvings from `width` down to 4.
///
/// For `width = 4 << k` this is `k`. Widths that are not a power of two
/// stop at the first value of 4 or below reached by shifting, e.g. 12 gives
/// 2 (12 -> 6 -> 3).
pub fn mip4x4_index(width: u32) -> u32 {
    let mut size = width;
    let mut index = 0;
    while size > RESIDENT_MIP_SIZE {
        size >>= 1;
        index += 1;
    }
    index
}

/// Check that a texture can be streamed and return its 4x4 mip index.
pub fn validate(dds: &Dds) -> Result<u32, ValidationError> {
    let width = dds.width();
    let height = dds.height();

    if width > MAX_DIMENSION {
        return Err(ValidationError::TooLarge { width });
    }
    if dds.header().flags().contains(DdsFlags::DEPTH) {
        return Err(ValidationError::VolumeTexture);
    }
    if width != height {
        return Err(ValidationError::NotSquare { width, height });
    }
    if width < RESIDENT_MIP_SIZE {
        return Err(ValidationError::TooSmall { width });
    }

    let index = mip4x4_index(width);
    let mipmap_count = dds.mipmap_count();
    if index >= mipmap_count {
        return Err(ValidationError::InsufficientMipLevels {
            mipmap_count,
            required: index + 1,
        });
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{dds_header, LegacyFormat};

    fn check(width: u32, height: u32, mips: u32) -> Result<u32, ValidationError> {
        let bytes = dds_header(width, height, mips, LegacyFormat::Dxt1);
        validate(&Dds::parse(&bytes).unwrap())
    }

    #[test]
    fn test_mip4x4_index_powers_of_two() {
        for k in 0..14 {
            assert_eq!(mip4x4_index(4 << k), k);
        }
    }

    #[test]
    fn test_mip4x4_index_other_widths() {
        assert_eq!(mip4x4_index(4), 0);
        assert_eq!(mip4x4_index(5), 1);
        assert_eq!(mip4x4_index(12), 2);
        assert_eq!(mip4x4_index(100), 5);
        assert_eq!(mip4x4_index(u32::MAX), 30);
    }

    #[test]
    fn test_accepts_valid() {
        assert_eq!(check(64, 64, 5), Ok(4));
        assert_eq!(check(64, 64, 7), Ok(4));
        assert_eq!(check(4, 4, 1), Ok(0));
    }

    #[test]
    fn test_rejects_too_large() {
        assert_eq!(
            check(70000, 70000, 16),
            Err(ValidationError::TooLarge { width: 70000 })
        );
    }

    #[test]
    fn test_rejects_not_square() {
        assert_eq!(
            check(64, 32, 5),
            Err(ValidationError::NotSquare { width: 64, height: 32 })
        );
    }

    #[test]
    fn test_rejects_too_small() {
        assert_eq!(check(2, 2, 2), Err(ValidationError::TooSmall { width: 2 }));
    }

    #[test]
    fn test_rejects_short_mip_chain() {
        let error = check(64, 64, 2).unwrap_err();
        assert_eq!(
            error,
            ValidationError::InsufficientMipLevels {
                mipmap_count: 2,
                required: 5
            }
        );
        assert!(error.to_string().contains("at least 5"));
    }

    #[test]
    fn test_rejects_volume() {
        let mut bytes = dds_header(64, 64, 5, LegacyFormat::Dxt1);
        // dwFlags lives right after the magic and dwSize
        let flags = u32::from_le_bytes(bytes[8..12].try_into().unwrap()) | DdsFlags::DEPTH.bits();
        bytes[8..12].copy_from_slice(&flags.to_le_bytes());

        assert_eq!(
            validate(&Dds::parse(&bytes).unwrap()),
            Err(ValidationError::VolumeTexture)
        );
    }
}
