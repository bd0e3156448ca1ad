//! Name hashing for package entries.
//!
//! The runtime looks textures up by a 32-bit hash of their base name. The
//! hash is a multiply-and-add rolling hash over the UTF-8 bytes.

/// Starting value of the rolling hash.
pub const SEED: u32 = 5381;

/// Per-byte multiplier of the rolling hash.
pub const MULTIPLIER: u32 = 33;

/// Hash a byte slice.
#[inline]
pub fn hash_bytes(data: &[u8]) -> u32 {
    data.iter().fold(SEED, |hash, &byte| {
        hash.wrapping_mul(MULTIPLIER).wrapping_add(u32::from(byte))
    })
}

/// Hash a texture name.
#[inline]
pub fn hash_str(name: &str) -> u32 {
    hash_bytes(name.as_bytes())
}
