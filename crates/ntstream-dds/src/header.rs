//! DDS header structures.

use bitflags::bitflags;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::format::DxgiFormat;

/// DDS file header.
///
/// This is the 124-byte `DDS_HEADER` that follows the `"DDS "` magic.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Header size (should be 124).
    pub size: u32,
    /// Header flags, see [`DdsFlags`].
    pub flags: u32,
    /// Image height.
    pub height: u32,
    /// Image width.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels.
    pub mipmap_count: u32,
    /// Reserved.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities, see [`DdsCaps`].
    pub caps: u32,
    /// Surface capabilities 2, see [`DdsCaps2`].
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

impl DdsHeader {
    /// Expected header size.
    pub const SIZE: u32 = 124;

    /// Header flags.
    #[inline]
    pub fn flags(&self) -> DdsFlags {
        DdsFlags::from_bits_retain(self.flags)
    }

    /// Surface capabilities.
    #[inline]
    pub fn caps(&self) -> DdsCaps {
        DdsCaps::from_bits_retain(self.caps)
    }

    /// Cube map and volume capabilities.
    #[inline]
    pub fn caps2(&self) -> DdsCaps2 {
        DdsCaps2::from_bits_retain(self.caps2)
    }

    /// Check if this header announces a DX10 extended header.
    pub fn is_dx10(&self) -> bool {
        self.pixel_format.flags().contains(PixelFormatFlags::FOURCC)
            && self.pixel_format.four_cc == FourCC::DX10
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: u32,
    /// Pixel format flags, see [`PixelFormatFlags`].
    pub flags: u32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// Pixel format flags.
    #[inline]
    pub fn flags(&self) -> PixelFormatFlags {
        PixelFormatFlags::from_bits_retain(self.flags)
    }
}

/// Four-character code for compression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT2 compression (premultiplied DXT3).
    pub const DXT2: Self = Self(*b"DXT2");
    /// DXT3 compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT4 compression (premultiplied DXT5).
    pub const DXT4: Self = Self(*b"DXT4");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
    /// DX10 extended header.
    pub const DX10: Self = Self(*b"DX10");
    /// ATI1 compression (BC4).
    pub const ATI1: Self = Self(*b"ATI1");
    /// ATI2 compression (BC5).
    pub const ATI2: Self = Self(*b"ATI2");
    /// BC4U compression.
    pub const BC4U: Self = Self(*b"BC4U");
    /// BC4S compression.
    pub const BC4S: Self = Self(*b"BC4S");
    /// BC5U compression.
    pub const BC5U: Self = Self(*b"BC5U");
    /// BC5S compression.
    pub const BC5S: Self = Self(*b"BC5S");
    /// Packed R8G8_B8G8.
    pub const RGBG: Self = Self(*b"RGBG");
    /// Packed G8R8_G8B8.
    pub const GRGB: Self = Self(*b"GRGB");
    /// Packed YUV 4:2:2.
    pub const YUY2: Self = Self(*b"YUY2");
    /// Packed YUV 4:2:2, byte-swapped.
    pub const UYVY: Self = Self(*b"UYVY");

    /// The code as a little-endian integer, the way it is stored on disk.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

impl std::fmt::Display for FourCC {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            write!(f, "{}", String::from_utf8_lossy(&self.0))
        } else {
            write!(f, "{:08X}", self.to_u32())
        }
    }
}

/// DX10 extended header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeaderDxt10 {
    /// DXGI format, see [`DxgiFormat`].
    pub dxgi_format: u32,
    /// Resource dimension, see [`ResourceDimension`].
    pub resource_dimension: u32,
    /// Misc flags, see [`DxgiMiscFlags`].
    pub misc_flag: u32,
    /// Array size.
    pub array_size: u32,
    /// Alpha mode, see [`AlphaMode`].
    pub alpha_mode: u32,
}

impl DdsHeaderDxt10 {
    /// Size of the extension in bytes.
    pub const SIZE: u32 = 20;

    /// The DXGI format, if the raw value names one.
    #[inline]
    pub fn format(&self) -> Option<DxgiFormat> {
        DxgiFormat::from_u32(self.dxgi_format)
    }

    /// The resource dimension.
    #[inline]
    pub fn resource_dimension(&self) -> ResourceDimension {
        ResourceDimension::from(self.resource_dimension)
    }

    /// Misc flags.
    #[inline]
    pub fn misc_flags(&self) -> DxgiMiscFlags {
        DxgiMiscFlags::from_bits_retain(self.misc_flag)
    }

    /// The alpha mode.
    #[inline]
    pub fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::from(self.alpha_mode)
    }
}

bitflags! {
    /// `DDS_HEADER.dwFlags`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DdsFlags: u32 {
        const CAPS = 0x1;
        const HEIGHT = 0x2;
        const WIDTH = 0x4;
        const PITCH = 0x8;
        const PIXEL_FORMAT = 0x1000;
        const MIPMAP_COUNT = 0x20000;
        const LINEAR_SIZE = 0x80000;
        const DEPTH = 0x800000;
    }

    /// `DDS_HEADER.dwCaps`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DdsCaps: u32 {
        const COMPLEX = 0x8;
        const MIPMAP = 0x1000;
        const TEXTURE = 0x400000;
    }

    /// `DDS_HEADER.dwCaps2`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DdsCaps2: u32 {
        const CUBEMAP = 0x200;
        const CUBEMAP_POSITIVE_X = 0x400;
        const CUBEMAP_NEGATIVE_X = 0x800;
        const CUBEMAP_POSITIVE_Y = 0x1000;
        const CUBEMAP_NEGATIVE_Y = 0x2000;
        const CUBEMAP_POSITIVE_Z = 0x4000;
        const CUBEMAP_NEGATIVE_Z = 0x8000;
        const VOLUME = 0x200000;
    }

    /// `DDS_PIXELFORMAT.dwFlags`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PixelFormatFlags: u32 {
        const ALPHA_PIXELS = 0x1;
        const ALPHA = 0x2;
        const FOURCC = 0x4;
        const RGB = 0x40;
        const YUV = 0x200;
        const LUMINANCE = 0x20000;
    }

    /// `DDS_HEADER_DXT10.miscFlag` (shares values with `D3D11_RESOURCE_MISC_FLAG`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DxgiMiscFlags: u32 {
        const GENERATE_MIPS = 0x1;
        const SHARED = 0x2;
        const TEXTURE_CUBE = 0x4;
        const DRAW_INDIRECT_ARGS = 0x10;
        const BUFFER_ALLOW_RAW_VIEWS = 0x20;
        const BUFFER_STRUCTURED = 0x40;
        const RESOURCE_CLAMP = 0x80;
        const SHARED_KEYED_MUTEX = 0x100;
        const GDI_COMPATIBLE = 0x200;
        const SHARED_NT_HANDLE = 0x800;
        const RESTRICTED_CONTENT = 0x1000;
        const RESTRICT_SHARED_RESOURCE = 0x2000;
        const RESTRICT_SHARED_RESOURCE_DRIVER = 0x4000;
        const GUARDED = 0x8000;
        const TILE_POOL = 0x20000;
        const TILED = 0x40000;
        const HW_PROTECTED = 0x80000;
    }
}

/// `DDS_HEADER_DXT10.resourceDimension`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceDimension {
    Unknown,
    Buffer,
    Texture1D,
    Texture2D,
    Texture3D,
    /// A value outside the documented range.
    Other(u32),
}

impl From<u32> for ResourceDimension {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::Unknown,
            1 => Self::Buffer,
            2 => Self::Texture1D,
            3 => Self::Texture2D,
            4 => Self::Texture3D,
            other => Self::Other(other),
        }
    }
}

/// `DDS_HEADER_DXT10.miscFlags2` alpha mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlphaMode {
    Unknown,
    Straight,
    Premultiplied,
    Opaque,
    Custom,
    /// A value outside the documented range.
    Other(u32),
}

impl From<u32> for AlphaMode {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::Unknown,
            1 => Self::Straight,
            2 => Self::Premultiplied,
            3 => Self::Opaque,
            4 => Self::Custom,
            other => Self::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_sizes() {
        assert_eq!(std::mem::size_of::<DdsHeader>(), DdsHeader::SIZE as usize);
        assert_eq!(std::mem::size_of::<DdsPixelFormat>(), 32);
        assert_eq!(std::mem::size_of::<DdsHeaderDxt10>(), DdsHeaderDxt10::SIZE as usize);
    }

    #[test]
    fn test_four_cc_values() {
        assert_eq!(FourCC::DXT1.to_u32(), 0x3154_5844);
        assert_eq!(FourCC::DX10.to_u32(), 0x3031_5844);
        assert_eq!(FourCC::BC4U.to_u32(), 0x5534_4342);
        assert_eq!(FourCC::ATI2.to_u32(), 0x3249_5441);
    }

    #[test]
    fn test_four_cc_display() {
        assert_eq!(FourCC::DXT5.to_string(), "DXT5");
        assert_eq!(FourCC(113u32.to_le_bytes()).to_string(), "00000071");
    }

    #[test]
    fn test_enum_fallbacks() {
        assert_eq!(ResourceDimension::from(3), ResourceDimension::Texture2D);
        assert_eq!(ResourceDimension::from(9), ResourceDimension::Other(9));
        assert_eq!(AlphaMode::from(2), AlphaMode::Premultiplied);
        assert_eq!(AlphaMode::from(7), AlphaMode::Other(7));
    }
}
