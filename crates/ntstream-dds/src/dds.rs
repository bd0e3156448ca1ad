//! Parsed DDS headers and mip chain sizes.

use ntstream_common::BinaryReader;

use crate::format::DxgiFormat;
use crate::header::{DdsHeader, DdsHeaderDxt10, PixelFormatFlags};
use crate::size::{surface_size, uncompressed_size};
use crate::{Error, Result, DDS_MAGIC};

/// Most mip levels any texture can have: one per bit of a `u32` width.
pub const MAX_MIP_LEVELS: u32 = u32::BITS;

/// A decoded DDS header, with the DXT10 extension when one is present.
#[derive(Debug, Clone, Copy)]
pub struct Dds {
    header: DdsHeader,
    dxt10: Option<DdsHeaderDxt10>,
}

impl Dds {
    /// Decode the header of a DDS file, starting at its `"DDS "` magic.
    ///
    /// Reserved regions are skipped without validation.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let magic: [u8; 4] = data
            .get(..4)
            .and_then(|m| m.try_into().ok())
            .ok_or(Error::Truncated {
                part: "magic",
                needed: 4,
                available: data.len() as u64,
            })?;
        if &magic != DDS_MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        Self::read(&mut BinaryReader::new_at(data, DDS_MAGIC.len()))
    }

    /// Decode a header from the reader's position (just past the magic).
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let header: DdsHeader = read_part(reader, "header")?;
        let dxt10 = if header.is_dx10() {
            Some(read_part(reader, "DXT10 header")?)
        } else {
            None
        };

        Ok(Self { header, dxt10 })
    }

    /// The main header.
    #[inline]
    pub fn header(&self) -> &DdsHeader {
        &self.header
    }

    /// The DXT10 extension header, if present.
    #[inline]
    pub fn dxt10(&self) -> Option<&DdsHeaderDxt10> {
        self.dxt10.as_ref()
    }

    /// Texture width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.header.width
    }

    /// Texture height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.header.height
    }

    /// Declared number of mip levels.
    #[inline]
    pub fn mipmap_count(&self) -> u32 {
        self.header.mipmap_count
    }

    /// Length of everything before the pixel data: magic, header and the
    /// DXT10 extension if present.
    pub fn header_len(&self) -> usize {
        let mut len = DDS_MAGIC.len() + DdsHeader::SIZE as usize;
        if self.dxt10.is_some() {
            len += DdsHeaderDxt10::SIZE as usize;
        }
        len
    }

    /// Byte size of a `width` x `height` surface in this texture's format.
    ///
    /// The DXT10 format is authoritative when present. Otherwise the legacy
    /// FourCC is mapped to its DXGI equivalent, falling back to the pixel
    /// format's bit count for uncompressed data.
    pub fn surface_size(&self, width: u32, height: u32) -> Result<u64> {
        if let Some(dxt10) = &self.dxt10 {
            let raw = dxt10.dxgi_format;
            let format = DxgiFormat::from_u32(raw).ok_or(Error::UnsupportedDxgiFormat(raw))?;
            return surface_size(format, width, height);
        }

        let pixel_format = self.header.pixel_format;
        let four_cc = pixel_format.four_cc;
        let rgb_bit_count = pixel_format.rgb_bit_count;

        if pixel_format.flags().contains(PixelFormatFlags::FOURCC) || four_cc.to_u32() != 0 {
            if let Ok(format) = DxgiFormat::try_from(four_cc) {
                return surface_size(format, width, height);
            }
        }

        if rgb_bit_count == 0 {
            return Err(Error::UnsupportedPixelFormat {
                four_cc,
                rgb_bit_count,
            });
        }

        Ok(uncompressed_size(
            rgb_bit_count,
            u64::from(width.max(1)),
            u64::from(height.max(1)),
        ))
    }

    /// Byte size of one mip level of a square texture at the given width.
    ///
    /// The width is used for both dimensions. Callers must only use this for
    /// square textures.
    #[inline]
    pub fn image_size(&self, width: u32) -> Result<u64> {
        self.surface_size(width, width)
    }

    /// Sizes of every declared mip level of a square texture, largest first.
    ///
    /// The width is halved with a plain shift per level; the size formula
    /// clamps it to at least one pixel. Counts above [`MAX_MIP_LEVELS`] are
    /// rejected.
    pub fn mip_sizes(&self) -> Result<Vec<u64>> {
        let count = self.mipmap_count();
        if count > MAX_MIP_LEVELS {
            return Err(Error::TooManyMipLevels {
                count,
                max: MAX_MIP_LEVELS,
            });
        }

        let mut sizes = Vec::with_capacity(count as usize);
        let mut width = self.width();

        for _ in 0..count {
            sizes.push(self.image_size(width)?);
            width >>= 1;
        }

        Ok(sizes)
    }
}

fn read_part<T: zerocopy::FromBytes>(reader: &mut BinaryReader<'_>, part: &'static str) -> Result<T> {
    let needed = std::mem::size_of::<T>();
    let available = reader.remaining();
    if available < needed {
        return Err(Error::Truncated {
            part,
            needed: needed as u64,
            available: available as u64,
        });
    }
    Ok(reader.read_struct()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{DdsFlags, FourCC};
    use zerocopy::{FromZeros, IntoBytes};

    /// Build a DDS header with the given geometry and legacy FourCC.
    fn build_header(width: u32, height: u32, mips: u32, four_cc: FourCC) -> DdsHeader {
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
        header.pixel_format.flags = PixelFormatFlags::FOURCC.bits();
        header.pixel_format.four_cc = four_cc;
        header
    }

    fn header_bytes(header: &DdsHeader, dxt10: Option<&DdsHeaderDxt10>) -> Vec<u8> {
        let mut bytes = DDS_MAGIC.to_vec();
        bytes.extend_from_slice(header.as_bytes());
        if let Some(dxt10) = dxt10 {
            bytes.extend_from_slice(dxt10.as_bytes());
        }
        bytes
    }

    fn dxt10(format: u32) -> DdsHeaderDxt10 {
        DdsHeaderDxt10 {
            dxgi_format: format,
            resource_dimension: 3,
            misc_flag: 0,
            array_size: 1,
            alpha_mode: 0,
        }
    }

    #[test]
    fn test_parse_legacy() {
        let header = build_header(64, 64, 5, FourCC::DXT1);
        let dds = Dds::parse(&header_bytes(&header, None)).unwrap();

        assert_eq!(dds.width(), 64);
        assert_eq!(dds.mipmap_count(), 5);
        assert!(dds.dxt10().is_none());
        assert_eq!(dds.header_len(), 128);
    }

    #[test]
    fn test_parse_dxt10() {
        let header = build_header(16, 16, 3, FourCC::DX10);
        let bytes = header_bytes(&header, Some(&dxt10(98)));
        let dds = Dds::parse(&bytes).unwrap();

        assert_eq!(dds.header_len(), 148);
        assert_eq!(dds.dxt10().and_then(|h| h.format()), Some(DxgiFormat::BC7_UNORM));
    }

    #[test]
    fn test_dx10_four_cc_without_flag_is_legacy() {
        let mut header = build_header(16, 16, 1, FourCC::DX10);
        header.pixel_format.flags = 0;
        let dds = Dds::parse(&header_bytes(&header, None)).unwrap();
        assert!(dds.dxt10().is_none());
    }

    #[test]
    fn test_truncated_header() {
        let header = build_header(64, 64, 5, FourCC::DXT1);
        let bytes = header_bytes(&header, None);

        assert!(matches!(
            Dds::parse(&bytes[..100]),
            Err(Error::Truncated { part: "header", needed: 124, available: 96 })
        ));
    }

    #[test]
    fn test_truncated_dxt10() {
        let header = build_header(16, 16, 3, FourCC::DX10);
        let bytes = header_bytes(&header, Some(&dxt10(98)));

        assert!(matches!(
            Dds::parse(&bytes[..140]),
            Err(Error::Truncated { part: "DXT10 header", .. })
        ));
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = header_bytes(&build_header(4, 4, 1, FourCC::DXT1), None);
        bytes[..4].copy_from_slice(b"NTSI");
        assert!(matches!(Dds::parse(&bytes), Err(Error::InvalidMagic(m)) if &m == b"NTSI"));
    }

    #[test]
    fn test_bc1_mip_sizes() {
        let header = build_header(64, 64, 5, FourCC::DXT1);
        let dds = Dds::parse(&header_bytes(&header, None)).unwrap();

        assert_eq!(dds.mip_sizes().unwrap(), vec![2048, 512, 128, 32, 8]);
    }

    #[test]
    fn test_mip_sizes_length_and_monotonic() {
        let formats = [71u32, 74, 80, 98, 28, 2, 10, 85, 61, 107];
        for format in formats {
            let header = build_header(256, 256, 9, FourCC::DX10);
            let dds = Dds::parse(&header_bytes(&header, Some(&dxt10(format)))).unwrap();
            let sizes = dds.mip_sizes().unwrap();

            assert_eq!(sizes.len(), 9, "format {format}");
            assert!(sizes.windows(2).all(|w| w[1] <= w[0]), "format {format}: {sizes:?}");
        }
    }

    #[test]
    fn test_unknown_dxgi_format() {
        let header = build_header(64, 64, 5, FourCC::DX10);
        let dds = Dds::parse(&header_bytes(&header, Some(&dxt10(0)))).unwrap();

        assert!(matches!(dds.image_size(64), Err(Error::UnknownDxgiFormat)));
        assert!(dds.mip_sizes().is_err());
    }

    #[test]
    fn test_unnamed_dxgi_format() {
        let header = build_header(64, 64, 1, FourCC::DX10);
        let dds = Dds::parse(&header_bytes(&header, Some(&dxt10(120)))).unwrap();

        assert!(matches!(dds.image_size(64), Err(Error::UnsupportedDxgiFormat(120))));
    }

    #[test]
    fn test_legacy_uncompressed() {
        let mut header = build_header(8, 8, 1, FourCC([0; 4]));
        header.pixel_format.flags = PixelFormatFlags::RGB.bits();
        header.pixel_format.rgb_bit_count = 24;
        let dds = Dds::parse(&header_bytes(&header, None)).unwrap();

        assert_eq!(dds.image_size(8).unwrap(), 8 * 3 * 8);
    }

    #[test]
    fn test_header_len_ignores_size_field() {
        let mut header = build_header(16, 16, 3, FourCC::DXT1);
        header.size = 100;
        let dds = Dds::parse(&header_bytes(&header, None)).unwrap();
        assert_eq!(dds.header_len(), 128);

        header.size = 0;
        let dds = Dds::parse(&header_bytes(&header, None)).unwrap();
        assert_eq!(dds.header_len(), 128);
    }

    #[test]
    fn test_too_many_mip_levels() {
        let header = build_header(64, 64, u32::MAX, FourCC::DXT1);
        let dds = Dds::parse(&header_bytes(&header, None)).unwrap();
        assert!(matches!(
            dds.mip_sizes(),
            Err(Error::TooManyMipLevels { count: u32::MAX, max: 32 })
        ));

        // One level per halving down to zero is still accepted
        let header = build_header(64, 64, MAX_MIP_LEVELS, FourCC::DXT1);
        let dds = Dds::parse(&header_bytes(&header, None)).unwrap();
        assert_eq!(dds.mip_sizes().unwrap().len(), 32);
    }

    #[test]
    fn test_legacy_packed_yuv() {
        for four_cc in [FourCC::UYVY, FourCC::YUY2, FourCC::RGBG] {
            let header = build_header(6, 6, 1, four_cc);
            let dds = Dds::parse(&header_bytes(&header, None)).unwrap();
            assert_eq!(dds.image_size(6).unwrap(), 3 * 4 * 6, "{four_cc}");
            assert_eq!(dds.image_size(5).unwrap(), 3 * 4 * 5, "{four_cc}");
        }
    }

    #[test]
    fn test_legacy_bc4_uses_8_byte_blocks() {
        for four_cc in [FourCC::ATI1, FourCC::BC4U, FourCC::BC4S] {
            let header = build_header(16, 16, 1, four_cc);
            let dds = Dds::parse(&header_bytes(&header, None)).unwrap();
            assert_eq!(dds.image_size(16).unwrap(), 16 * 8, "{four_cc}");
        }
    }

    #[test]
    fn test_legacy_unsupported() {
        let header = build_header(8, 8, 1, FourCC(*b"ZZZZ"));
        let dds = Dds::parse(&header_bytes(&header, None)).unwrap();

        assert!(matches!(
            dds.image_size(8),
            Err(Error::UnsupportedPixelFormat { rgb_bit_count: 0, .. })
        ));
    }
}
