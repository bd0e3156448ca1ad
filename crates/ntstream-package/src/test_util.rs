//! DDS builders shared by the unit tests.

use ntstream_dds::{
    Dds, DdsFlags, DdsHeader, DdsHeaderDxt10, FourCC, PixelFormatFlags, DDS_MAGIC,
};
use zerocopy::{FromZeros, IntoBytes};

#[derive(Debug, Clone, Copy)]
pub(crate) enum LegacyFormat {
    Dxt1,
    Dxt5,
    Rgba8,
}

fn base_header(width: u32, height: u32, mips: u32) -> DdsHeader {
    let mut header = DdsHeader::new_zeroed();
    header.size = DdsHeader::SIZE;
    header.flags = (DdsFlags::CAPS
        | DdsFlags::HEIGHT
        | DdsFlags::WIDTH
        | DdsFlags::PIXEL_FORMAT
        | DdsFlags::MIPMAP_COUNT)
        .bits();
    header.width = width;
    header.height = height;
    header.mipmap_count = mips;
    header.pixel_format.size = 32;
    header
}

/// Magic plus a legacy header, no pixel data.
pub(crate) fn dds_header(width: u32, height: u32, mips: u32, format: LegacyFormat) -> Vec<u8> {
    let mut header = base_header(width, height, mips);
    match format {
        LegacyFormat::Dxt1 | LegacyFormat::Dxt5 => {
            header.pixel_format.flags = PixelFormatFlags::FOURCC.bits();
            header.pixel_format.four_cc = match format {
                LegacyFormat::Dxt1 => FourCC::DXT1,
                _ => FourCC::DXT5,
            };
        }
        LegacyFormat::Rgba8 => {
            header.pixel_format.flags = (PixelFormatFlags::RGB | PixelFormatFlags::ALPHA_PIXELS).bits();
            header.pixel_format.rgb_bit_count = 32;
            header.pixel_format.r_bit_mask = 0x0000_00FF;
            header.pixel_format.g_bit_mask = 0x0000_FF00;
            header.pixel_format.b_bit_mask = 0x00FF_0000;
            header.pixel_format.a_bit_mask = 0xFF00_0000;
        }
    }

    let mut bytes = DDS_MAGIC.to_vec();
    bytes.extend_from_slice(header.as_bytes());
    bytes
}

/// Magic plus a header with a DXT10 extension, no pixel data.
pub(crate) fn dds_header_dxgi(width: u32, mips: u32, dxgi_format: u32) -> Vec<u8> {
    let mut header = base_header(width, width, mips);
    header.pixel_format.flags = PixelFormatFlags::FOURCC.bits();
    header.pixel_format.four_cc = FourCC::DX10;
    let dxt10 = DdsHeaderDxt10 {
        dxgi_format,
        resource_dimension: 3,
        misc_flag: 0,
        array_size: 1,
        alpha_mode: 0,
    };

    let mut bytes = DDS_MAGIC.to_vec();
    bytes.extend_from_slice(header.as_bytes());
    bytes.extend_from_slice(dxt10.as_bytes());
    bytes
}

/// Append a full mip chain of recognisable bytes to a header.
pub(crate) fn with_pixels(mut header: Vec<u8>) -> Vec<u8> {
    let sizes = Dds::parse(&header).unwrap().mip_sizes().unwrap();
    for (level, size) in sizes.into_iter().enumerate() {
        header.extend((0..size).map(|i| (i as u8).wrapping_mul(31).wrapping_add(level as u8)));
    }
    header
}

/// A complete legacy DDS file.
pub(crate) fn dds_file(width: u32, mips: u32, format: LegacyFormat) -> Vec<u8> {
    with_pixels(dds_header(width, width, mips, format))
}
