//! The DXGI format catalogue.

use crate::header::FourCC;

/// A DXGI surface format, as stored in the DXT10 extension header.
///
/// Values follow `DXGI_FORMAT` from the Direct3D headers.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DxgiFormat {
    UNKNOWN = 0,
    R32G32B32A32_TYPELESS = 1,
    R32G32B32A32_FLOAT = 2,
    R32G32B32A32_UINT = 3,
    R32G32B32A32_SINT = 4,
    R32G32B32_TYPELESS = 5,
    R32G32B32_FLOAT = 6,
    R32G32B32_UINT = 7,
    R32G32B32_SINT = 8,
    R16G16B16A16_TYPELESS = 9,
    R16G16B16A16_FLOAT = 10,
    R16G16B16A16_UNORM = 11,
    R16G16B16A16_UINT = 12,
    R16G16B16A16_SNORM = 13,
    R16G16B16A16_SINT = 14,
    R32G32_TYPELESS = 15,
    R32G32_FLOAT = 16,
    R32G32_UINT = 17,
    R32G32_SINT = 18,
    R32G8X24_TYPELESS = 19,
    D32_FLOAT_S8X24_UINT = 20,
    R32_FLOAT_X8X24_TYPELESS = 21,
    X32_TYPELESS_G8X24_UINT = 22,
    R10G10B10A2_TYPELESS = 23,
    R10G10B10A2_UNORM = 24,
    R10G10B10A2_UINT = 25,
    R11G11B10_FLOAT = 26,
    R8G8B8A8_TYPELESS = 27,
    R8G8B8A8_UNORM = 28,
    R8G8B8A8_UNORM_SRGB = 29,
    R8G8B8A8_UINT = 30,
    R8G8B8A8_SNORM = 31,
    R8G8B8A8_SINT = 32,
    R16G16_TYPELESS = 33,
    R16G16_FLOAT = 34,
    R16G16_UNORM = 35,
    R16G16_UINT = 36,
    R16G16_SNORM = 37,
    R16G16_SINT = 38,
    R32_TYPELESS = 39,
    D32_FLOAT = 40,
    R32_FLOAT = 41,
    R32_UINT = 42,
    R32_SINT = 43,
    R24G8_TYPELESS = 44,
    D24_UNORM_S8_UINT = 45,
    R24_UNORM_X8_TYPELESS = 46,
    X24_TYPELESS_G8_UINT = 47,
    R8G8_TYPELESS = 48,
    R8G8_UNORM = 49,
    R8G8_UINT = 50,
    R8G8_SNORM = 51,
    R8G8_SINT = 52,
    R16_TYPELESS = 53,
    R16_FLOAT = 54,
    D16_UNORM = 55,
    R16_UNORM = 56,
    R16_UINT = 57,
    R16_SNORM = 58,
    R16_SINT = 59,
    R8_TYPELESS = 60,
    R8_UNORM = 61,
    R8_UINT = 62,
    R8_SNORM = 63,
    R8_SINT = 64,
    A8_UNORM = 65,
    R1_UNORM = 66,
    R9G9B9E5_SHAREDEXP = 67,
    R8G8_B8G8_UNORM = 68,
    G8R8_G8B8_UNORM = 69,
    BC1_TYPELESS = 70,
    BC1_UNORM = 71,
    BC1_UNORM_SRGB = 72,
    BC2_TYPELESS = 73,
    BC2_UNORM = 74,
    BC2_UNORM_SRGB = 75,
    BC3_TYPELESS = 76,
    BC3_UNORM = 77,
    BC3_UNORM_SRGB = 78,
    BC4_TYPELESS = 79,
    BC4_UNORM = 80,
    BC4_SNORM = 81,
    BC5_TYPELESS = 82,
    BC5_UNORM = 83,
    BC5_SNORM = 84,
    B5G6R5_UNORM = 85,
    B5G5R5A1_UNORM = 86,
    B8G8R8A8_UNORM = 87,
    B8G8R8X8_UNORM = 88,
    R10G10B10_XR_BIAS_A2_UNORM = 89,
    B8G8R8A8_TYPELESS = 90,
    B8G8R8A8_UNORM_SRGB = 91,
    B8G8R8X8_TYPELESS = 92,
    B8G8R8X8_UNORM_SRGB = 93,
    BC6H_TYPELESS = 94,
    BC6H_UF16 = 95,
    BC6H_SF16 = 96,
    BC7_TYPELESS = 97,
    BC7_UNORM = 98,
    BC7_UNORM_SRGB = 99,
    AYUV = 100,
    Y410 = 101,
    Y416 = 102,
    NV12 = 103,
    P010 = 104,
    P016 = 105,
    OPAQUE_420 = 106,
    YUY2 = 107,
    Y210 = 108,
    Y216 = 109,
    NV11 = 110,
    AI44 = 111,
    IA44 = 112,
    P8 = 113,
    A8P8 = 114,
    B4G4R4A4_UNORM = 115,
    P208 = 130,
    V208 = 131,
    V408 = 132,
    SAMPLER_FEEDBACK_MIN_MIP_OPAQUE = 189,
    SAMPLER_FEEDBACK_MIP_REGION_USED_OPAQUE = 190,
    FORCE_UINT = 0xFFFF_FFFF,
}

impl DxgiFormat {
    /// Look up a format by its raw value.
    pub fn from_u32(value: u32) -> Option<Self> {
        let format = match value {
            0 => Self::UNKNOWN,
            1 => Self::R32G32B32A32_TYPELESS,
            2 => Self::R32G32B32A32_FLOAT,
            3 => Self::R32G32B32A32_UINT,
            4 => Self::R32G32B32A32_SINT,
            5 => Self::R32G32B32_TYPELESS,
            6 => Self::R32G32B32_FLOAT,
            7 => Self::R32G32B32_UINT,
            8 => Self::R32G32B32_SINT,
            9 => Self::R16G16B16A16_TYPELESS,
            10 => Self::R16G16B16A16_FLOAT,
            11 => Self::R16G16B16A16_UNORM,
            12 => Self::R16G16B16A16_UINT,
            13 => Self::R16G16B16A16_SNORM,
            14 => Self::R16G16B16A16_SINT,
            15 => Self::R32G32_TYPELESS,
            16 => Self::R32G32_FLOAT,
            17 => Self::R32G32_UINT,
            18 => Self::R32G32_SINT,
            19 => Self::R32G8X24_TYPELESS,
            20 => Self::D32_FLOAT_S8X24_UINT,
            21 => Self::R32_FLOAT_X8X24_TYPELESS,
            22 => Self::X32_TYPELESS_G8X24_UINT,
            23 => Self::R10G10B10A2_TYPELESS,
            24 => Self::R10G10B10A2_UNORM,
            25 => Self::R10G10B10A2_UINT,
            26 => Self::R11G11B10_FLOAT,
            27 => Self::R8G8B8A8_TYPELESS,
            28 => Self::R8G8B8A8_UNORM,
            29 => Self::R8G8B8A8_UNORM_SRGB,
            30 => Self::R8G8B8A8_UINT,
            31 => Self::R8G8B8A8_SNORM,
            32 => Self::R8G8B8A8_SINT,
            33 => Self::R16G16_TYPELESS,
            34 => Self::R16G16_FLOAT,
            35 => Self::R16G16_UNORM,
            36 => Self::R16G16_UINT,
            37 => Self::R16G16_SNORM,
            38 => Self::R16G16_SINT,
            39 => Self::R32_TYPELESS,
            40 => Self::D32_FLOAT,
            41 => Self::R32_FLOAT,
            42 => Self::R32_UINT,
            43 => Self::R32_SINT,
            44 => Self::R24G8_TYPELESS,
            45 => Self::D24_UNORM_S8_UINT,
            46 => Self::R24_UNORM_X8_TYPELESS,
            47 => Self::X24_TYPELESS_G8_UINT,
            48 => Self::R8G8_TYPELESS,
            49 => Self::R8G8_UNORM,
            50 => Self::R8G8_UINT,
            51 => Self::R8G8_SNORM,
            52 => Self::R8G8_SINT,
            53 => Self::R16_TYPELESS,
            54 => Self::R16_FLOAT,
            55 => Self::D16_UNORM,
            56 => Self::R16_UNORM,
            57 => Self::R16_UINT,
            58 => Self::R16_SNORM,
            59 => Self::R16_SINT,
            60 => Self::R8_TYPELESS,
            61 => Self::R8_UNORM,
            62 => Self::R8_UINT,
            63 => Self::R8_SNORM,
            64 => Self::R8_SINT,
            65 => Self::A8_UNORM,
            66 => Self::R1_UNORM,
            67 => Self::R9G9B9E5_SHAREDEXP,
            68 => Self::R8G8_B8G8_UNORM,
            69 => Self::G8R8_G8B8_UNORM,
            70 => Self::BC1_TYPELESS,
            71 => Self::BC1_UNORM,
            72 => Self::BC1_UNORM_SRGB,
            73 => Self::BC2_TYPELESS,
            74 => Self::BC2_UNORM,
            75 => Self::BC2_UNORM_SRGB,
            76 => Self::BC3_TYPELESS,
            77 => Self::BC3_UNORM,
            78 => Self::BC3_UNORM_SRGB,
            79 => Self::BC4_TYPELESS,
            80 => Self::BC4_UNORM,
            81 => Self::BC4_SNORM,
            82 => Self::BC5_TYPELESS,
            83 => Self::BC5_UNORM,
            84 => Self::BC5_SNORM,
            85 => Self::B5G6R5_UNORM,
            86 => Self::B5G5R5A1_UNORM,
            87 => Self::B8G8R8A8_UNORM,
            88 => Self::B8G8R8X8_UNORM,
            89 => Self::R10G10B10_XR_BIAS_A2_UNORM,
            90 => Self::B8G8R8A8_TYPELESS,
            91 => Self::B8G8R8A8_UNORM_SRGB,
            92 => Self::B8G8R8X8_TYPELESS,
            93 => Self::B8G8R8X8_UNORM_SRGB,
            94 => Self::BC6H_TYPELESS,
            95 => Self::BC6H_UF16,
            96 => Self::BC6H_SF16,
            97 => Self::BC7_TYPELESS,
            98 => Self::BC7_UNORM,
            99 => Self::BC7_UNORM_SRGB,
            100 => Self::AYUV,
            101 => Self::Y410,
            102 => Self::Y416,
            103 => Self::NV12,
            104 => Self::P010,
            105 => Self::P016,
            106 => Self::OPAQUE_420,
            107 => Self::YUY2,
            108 => Self::Y210,
            109 => Self::Y216,
            110 => Self::NV11,
            111 => Self::AI44,
            112 => Self::IA44,
            113 => Self::P8,
            114 => Self::A8P8,
            115 => Self::B4G4R4A4_UNORM,
            130 => Self::P208,
            131 => Self::V208,
            132 => Self::V408,
            189 => Self::SAMPLER_FEEDBACK_MIN_MIP_OPAQUE,
            190 => Self::SAMPLER_FEEDBACK_MIP_REGION_USED_OPAQUE,
            0xFFFF_FFFF => Self::FORCE_UINT,
            _ => return None,
        };
        Some(format)
    }

    /// The raw `DXGI_FORMAT` value.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    /// Bits per pixel for this format.
    ///
    /// Block-compressed formats report their average rate (4 or 8). Formats
    /// with no meaningful per-pixel size report 0.
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::R32G32B32A32_TYPELESS
            | Self::R32G32B32A32_FLOAT
            | Self::R32G32B32A32_UINT
            | Self::R32G32B32A32_SINT => 128,
            Self::R32G32B32_TYPELESS
            | Self::R32G32B32_FLOAT
            | Self::R32G32B32_UINT
            | Self::R32G32B32_SINT => 96,
            Self::R16G16B16A16_TYPELESS
            | Self::R16G16B16A16_FLOAT
            | Self::R16G16B16A16_UNORM
            | Self::R16G16B16A16_UINT
            | Self::R16G16B16A16_SNORM
            | Self::R16G16B16A16_SINT
            | Self::R32G32_TYPELESS
            | Self::R32G32_FLOAT
            | Self::R32G32_UINT
            | Self::R32G32_SINT
            | Self::R32G8X24_TYPELESS
            | Self::D32_FLOAT_S8X24_UINT
            | Self::R32_FLOAT_X8X24_TYPELESS
            | Self::X32_TYPELESS_G8X24_UINT
            | Self::Y416
            | Self::Y210
            | Self::Y216 => 64,
            Self::R10G10B10A2_TYPELESS
            | Self::R10G10B10A2_UNORM
            | Self::R10G10B10A2_UINT
            | Self::R11G11B10_FLOAT
            | Self::R8G8B8A8_TYPELESS
            | Self::R8G8B8A8_UNORM
            | Self::R8G8B8A8_UNORM_SRGB
            | Self::R8G8B8A8_UINT
            | Self::R8G8B8A8_SNORM
            | Self::R8G8B8A8_SINT
            | Self::R16G16_TYPELESS
            | Self::R16G16_FLOAT
            | Self::R16G16_UNORM
            | Self::R16G16_UINT
            | Self::R16G16_SNORM
            | Self::R16G16_SINT
            | Self::R32_TYPELESS
            | Self::D32_FLOAT
            | Self::R32_FLOAT
            | Self::R32_UINT
            | Self::R32_SINT
            | Self::R24G8_TYPELESS
            | Self::D24_UNORM_S8_UINT
            | Self::R24_UNORM_X8_TYPELESS
            | Self::X24_TYPELESS_G8_UINT
            | Self::R9G9B9E5_SHAREDEXP
            | Self::R8G8_B8G8_UNORM
            | Self::G8R8_G8B8_UNORM
            | Self::B8G8R8A8_UNORM
            | Self::B8G8R8X8_UNORM
            | Self::R10G10B10_XR_BIAS_A2_UNORM
            | Self::B8G8R8A8_TYPELESS
            | Self::B8G8R8A8_UNORM_SRGB
            | Self::B8G8R8X8_TYPELESS
            | Self::B8G8R8X8_UNORM_SRGB
            | Self::AYUV
            | Self::Y410
            | Self::YUY2 => 32,
            Self::P010
            | Self::P016
            | Self::V408 => 24,
            Self::R8G8_TYPELESS
            | Self::R8G8_UNORM
            | Self::R8G8_UINT
            | Self::R8G8_SNORM
            | Self::R8G8_SINT
            | Self::R16_TYPELESS
            | Self::R16_FLOAT
            | Self::D16_UNORM
            | Self::R16_UNORM
            | Self::R16_UINT
            | Self::R16_SNORM
            | Self::R16_SINT
            | Self::B5G6R5_UNORM
            | Self::B5G5R5A1_UNORM
            | Self::A8P8
            | Self::B4G4R4A4_UNORM
            | Self::P208
            | Self::V208 => 16,
            Self::NV12
            | Self::OPAQUE_420
            | Self::NV11 => 12,
            Self::R8_TYPELESS
            | Self::R8_UNORM
            | Self::R8_UINT
            | Self::R8_SNORM
            | Self::R8_SINT
            | Self::A8_UNORM
            | Self::BC2_TYPELESS
            | Self::BC2_UNORM
            | Self::BC2_UNORM_SRGB
            | Self::BC3_TYPELESS
            | Self::BC3_UNORM
            | Self::BC3_UNORM_SRGB
            | Self::BC5_TYPELESS
            | Self::BC5_UNORM
            | Self::BC5_SNORM
            | Self::BC6H_TYPELESS
            | Self::BC6H_UF16
            | Self::BC6H_SF16
            | Self::BC7_TYPELESS
            | Self::BC7_UNORM
            | Self::BC7_UNORM_SRGB
            | Self::AI44
            | Self::IA44
            | Self::P8 => 8,
            Self::R1_UNORM => 1,
            Self::BC1_TYPELESS
            | Self::BC1_UNORM
            | Self::BC1_UNORM_SRGB
            | Self::BC4_TYPELESS
            | Self::BC4_UNORM
            | Self::BC4_SNORM => 4,
            Self::UNKNOWN
            | Self::SAMPLER_FEEDBACK_MIN_MIP_OPAQUE
            | Self::SAMPLER_FEEDBACK_MIP_REGION_USED_OPAQUE
            | Self::FORCE_UINT => 0,
        }
    }
}
impl DxgiFormat {
    /// Bytes per 4x4 block, for block-compressed formats.
    pub const fn block_size(self) -> Option<u64> {
        match self {
            Self::BC1_TYPELESS
            | Self::BC1_UNORM
            | Self::BC1_UNORM_SRGB
            | Self::BC4_TYPELESS
            | Self::BC4_UNORM
            | Self::BC4_SNORM => Some(8),
            Self::BC2_TYPELESS
            | Self::BC2_UNORM
            | Self::BC2_UNORM_SRGB
            | Self::BC3_TYPELESS
            | Self::BC3_UNORM
            | Self::BC3_UNORM_SRGB
            | Self::BC5_TYPELESS
            | Self::BC5_UNORM
            | Self::BC5_SNORM
            | Self::BC6H_TYPELESS
            | Self::BC6H_UF16
            | Self::BC6H_SF16
            | Self::BC7_TYPELESS
            | Self::BC7_UNORM
            | Self::BC7_UNORM_SRGB => Some(16),
            _ => None,
        }
    }

    /// Whether the format stores 4x4 compressed blocks.
    #[inline]
    pub const fn is_block_compressed(self) -> bool {
        self.block_size().is_some()
    }
}

impl std::fmt::Display for DxgiFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

// Legacy D3DFMT codes stored numerically in the FourCC field.
const D3DFMT_A16B16G16R16: FourCC = FourCC(36u32.to_le_bytes());
const D3DFMT_Q16W16V16U16: FourCC = FourCC(110u32.to_le_bytes());
const D3DFMT_R16F: FourCC = FourCC(111u32.to_le_bytes());
const D3DFMT_G16R16F: FourCC = FourCC(112u32.to_le_bytes());
const D3DFMT_A16B16G16R16F: FourCC = FourCC(113u32.to_le_bytes());
const D3DFMT_R32F: FourCC = FourCC(114u32.to_le_bytes());
const D3DFMT_G32R32F: FourCC = FourCC(115u32.to_le_bytes());
const D3DFMT_A32B32G32R32F: FourCC = FourCC(116u32.to_le_bytes());

impl TryFrom<FourCC> for DxgiFormat {
    type Error = FourCC;

    /// Map a legacy FourCC to the DXGI format with the same memory layout.
    fn try_from(four_cc: FourCC) -> Result<Self, Self::Error> {
        let format = match four_cc {
            FourCC::DXT1 => Self::BC1_UNORM,
            FourCC::DXT2 | FourCC::DXT3 => Self::BC2_UNORM,
            FourCC::DXT4 | FourCC::DXT5 => Self::BC3_UNORM,
            // BC4 is a single-channel 8-byte block format, whatever the legacy tag
            FourCC::ATI1 | FourCC::BC4U => Self::BC4_UNORM,
            FourCC::BC4S => Self::BC4_SNORM,
            FourCC::ATI2 | FourCC::BC5U => Self::BC5_UNORM,
            FourCC::BC5S => Self::BC5_SNORM,
            FourCC::RGBG => Self::R8G8_B8G8_UNORM,
            FourCC::GRGB => Self::G8R8_G8B8_UNORM,
            FourCC::YUY2 => Self::YUY2,
            // No DXGI equivalent; same 2-pixels-per-4-bytes pitch as RGBG
            FourCC::UYVY => Self::R8G8_B8G8_UNORM,
            D3DFMT_A16B16G16R16 => Self::R16G16B16A16_UNORM,
            D3DFMT_Q16W16V16U16 => Self::R16G16B16A16_SNORM,
            D3DFMT_R16F => Self::R16_FLOAT,
            D3DFMT_G16R16F => Self::R16G16_FLOAT,
            D3DFMT_A16B16G16R16F => Self::R16G16B16A16_FLOAT,
            D3DFMT_R32F => Self::R32_FLOAT,
            D3DFMT_G32R32F => Self::R32G32_FLOAT,
            D3DFMT_A32B32G32R32F => Self::R32G32B32A32_FLOAT,
            other => return Err(other),
        };
        Ok(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u32() {
        assert_eq!(DxgiFormat::from_u32(0), Some(DxgiFormat::UNKNOWN));
        assert_eq!(DxgiFormat::from_u32(71), Some(DxgiFormat::BC1_UNORM));
        assert_eq!(DxgiFormat::from_u32(98), Some(DxgiFormat::BC7_UNORM));
        assert_eq!(DxgiFormat::from_u32(132), Some(DxgiFormat::V408));
        // Gap between B4G4R4A4 and P208
        assert_eq!(DxgiFormat::from_u32(116), None);
        assert_eq!(DxgiFormat::from_u32(0xFFFF_FFFF), Some(DxgiFormat::FORCE_UINT));
    }

    #[test]
    fn test_round_trip_values() {
        for value in (0..=200).chain([0xFFFF_FFFF]) {
            if let Some(format) = DxgiFormat::from_u32(value) {
                assert_eq!(format.to_u32(), value);
            }
        }
    }

    #[test]
    fn test_bits_per_pixel() {
        assert_eq!(DxgiFormat::R32G32B32A32_FLOAT.bits_per_pixel(), 128);
        assert_eq!(DxgiFormat::R32G32B32_FLOAT.bits_per_pixel(), 96);
        assert_eq!(DxgiFormat::Y216.bits_per_pixel(), 64);
        assert_eq!(DxgiFormat::R8G8B8A8_UNORM_SRGB.bits_per_pixel(), 32);
        assert_eq!(DxgiFormat::P010.bits_per_pixel(), 24);
        assert_eq!(DxgiFormat::B5G6R5_UNORM.bits_per_pixel(), 16);
        assert_eq!(DxgiFormat::NV12.bits_per_pixel(), 12);
        assert_eq!(DxgiFormat::BC7_UNORM.bits_per_pixel(), 8);
        assert_eq!(DxgiFormat::BC1_UNORM.bits_per_pixel(), 4);
        assert_eq!(DxgiFormat::R1_UNORM.bits_per_pixel(), 1);
        assert_eq!(DxgiFormat::UNKNOWN.bits_per_pixel(), 0);
        assert_eq!(DxgiFormat::SAMPLER_FEEDBACK_MIN_MIP_OPAQUE.bits_per_pixel(), 0);
    }

    #[test]
    fn test_block_size_agrees_with_bits_per_pixel() {
        for value in 0..=200 {
            let Some(format) = DxgiFormat::from_u32(value) else {
                continue;
            };
            if let Some(block) = format.block_size() {
                // 16 pixels per block
                assert_eq!(u64::from(format.bits_per_pixel()) * 2, block, "{format}");
            }
        }
    }

    #[test]
    fn test_legacy_four_cc() {
        assert_eq!(DxgiFormat::try_from(FourCC::DXT1), Ok(DxgiFormat::BC1_UNORM));
        assert_eq!(DxgiFormat::try_from(FourCC::DXT5), Ok(DxgiFormat::BC3_UNORM));
        assert_eq!(DxgiFormat::try_from(FourCC::BC4S), Ok(DxgiFormat::BC4_SNORM));
        assert_eq!(DxgiFormat::try_from(FourCC::ATI2), Ok(DxgiFormat::BC5_UNORM));
        assert_eq!(DxgiFormat::try_from(FourCC::YUY2), Ok(DxgiFormat::YUY2));
        assert_eq!(DxgiFormat::try_from(FourCC::UYVY), Ok(DxgiFormat::R8G8_B8G8_UNORM));
        assert_eq!(DxgiFormat::try_from(FourCC::ATI1), Ok(DxgiFormat::BC4_UNORM));
        assert_eq!(DxgiFormat::BC4_SNORM.block_size(), Some(8));
        assert_eq!(
            DxgiFormat::try_from(FourCC(113u32.to_le_bytes())),
            Ok(DxgiFormat::R16G16B16A16_FLOAT)
        );
        assert_eq!(DxgiFormat::try_from(FourCC::DX10), Err(FourCC::DX10));
    }
}
