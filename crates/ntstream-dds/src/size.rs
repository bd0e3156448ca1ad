//! Byte sizes of image surfaces.
//!
//! The pitch and slice formulas follow `ComputePitch` from DirectXTex. All
//! arithmetic is done in `u64` so that 65535x65535 surfaces of 128-bit
//! formats do not overflow.

use crate::format::DxgiFormat;
use crate::{Error, Result};

/// Number of 4x4 blocks needed to cover `extent` pixels, at least one.
#[inline]
fn block_count(extent: u64) -> u64 {
    extent.div_ceil(4).max(1)
}

/// Half of `extent`, rounded up.
#[inline]
fn half_up(extent: u64) -> u64 {
    (extent + 1) >> 1
}

fn require_even(format: DxgiFormat, width: u64, height: u64) -> Result<()> {
    if width % 2 != 0 || height % 2 != 0 {
        return Err(Error::DimensionAlignment {
            format,
            width,
            height,
        });
    }
    Ok(())
}

/// Size in bytes of one `width` x `height` surface in the given DXGI format.
///
/// Dimensions of zero are treated as one.
pub fn surface_size(format: DxgiFormat, width: u32, height: u32) -> Result<u64> {
    let width = u64::from(width.max(1));
    let height = u64::from(height.max(1));

    if let Some(block_size) = format.block_size() {
        return Ok(block_count(width) * block_count(height) * block_size);
    }

    let slice = match format {
        DxgiFormat::UNKNOWN => return Err(Error::UnknownDxgiFormat),

        DxgiFormat::R8G8_B8G8_UNORM | DxgiFormat::G8R8_G8B8_UNORM | DxgiFormat::YUY2 => {
            half_up(width) * 4 * height
        }

        DxgiFormat::Y210 | DxgiFormat::Y216 => half_up(width) * 8 * height,

        DxgiFormat::NV12 | DxgiFormat::OPAQUE_420 => {
            require_even(format, width, height)?;
            half_up(width) * 2 * (height + half_up(height))
        }

        DxgiFormat::P010 | DxgiFormat::P016 => {
            require_even(format, width, height)?;
            half_up(width) * 4 * (height + half_up(height))
        }

        DxgiFormat::NV11 => ((width + 3) >> 2) * 4 * height * 2,

        DxgiFormat::P208 => half_up(width) * 2 * height * 2,

        DxgiFormat::V208 => {
            require_even(format, width, height)?;
            width * (height + half_up(height) * 2)
        }

        DxgiFormat::V408 => width * (height + (height >> 1) * 4),

        _ => {
            let bits = format.bits_per_pixel();
            if bits == 0 {
                return Err(Error::UnsupportedDxgiFormat(format.to_u32()));
            }
            uncompressed_size(bits, width, height)
        }
    };

    Ok(slice)
}

/// Size in bytes of an uncompressed surface with `bits` bits per pixel.
#[inline]
pub(crate) fn uncompressed_size(bits: u32, width: u64, height: u64) -> u64 {
    let pitch = (width * u64::from(bits)).div_ceil(8);
    pitch * height
}
