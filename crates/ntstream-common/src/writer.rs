//! Binary writer producing little-endian output.

use byteorder::{ByteOrder, LittleEndian};

use crate::{Error, Result};

/// A growable little-endian output buffer.
///
/// This is the write-side counterpart of [`crate::BinaryReader`].
///
/// # Example
///
/// ```
/// use ntstream_common::{BinaryReader, BinaryWriter};
///
/// let mut writer = BinaryWriter::new();
/// writer.write_u32(7);
/// writer.write_sized_str("cube").unwrap();
///
/// let bytes = writer.into_inner();
/// let mut reader = BinaryReader::new(&bytes);
/// assert_eq!(reader.read_u32().unwrap(), 7);
/// assert_eq!(reader.read_sized_string().unwrap(), "cube");
/// ```
#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
}

impl BinaryWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    /// Write raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Write a u16.
    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        let mut bytes = [0u8; 2];
        LittleEndian::write_u16(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    /// Write a u32.
    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        let mut bytes = [0u8; 4];
        LittleEndian::write_u32(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    /// Write a u64.
    #[inline]
    pub fn write_u64(&mut self, value: u64) {
        let mut bytes = [0u8; 8];
        LittleEndian::write_u64(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    /// Write a `u32` length followed by the bytes.
    pub fn write_sized_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let length = u32::try_from(bytes.len()).map_err(|_| Error::LengthOverflow(bytes.len()))?;
        self.write_u32(length);
        self.write_bytes(bytes);
        Ok(())
    }

    /// Write a `u32` length followed by the UTF-8 bytes of `value`.
    pub fn write_sized_str(&mut self, value: &str) -> Result<()> {
        self.write_sized_bytes(value.as_bytes())
    }

    /// Pad with zeros until the position is a multiple of `alignment`.
    pub fn align(&mut self, alignment: usize) {
        let padding = self.buffer.len().next_multiple_of(alignment) - self.buffer.len();
        self.buffer.resize(self.buffer.len() + padding, 0);
    }

    /// Consume the writer, returning the written bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_layout() {
        let mut writer = BinaryWriter::new();
        writer.write_u16(0x0102);
        writer.write_u32(0x03040506);
        writer.write_u64(1);

        assert_eq!(
            writer.into_inner(),
            [0x02, 0x01, 0x06, 0x05, 0x04, 0x03, 1, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_align() {
        let mut writer = BinaryWriter::new();
        writer.write_bytes(&[1, 2, 3]);
        writer.align(16);
        assert_eq!(writer.position(), 16);

        // Already aligned positions are left alone
        writer.align(16);
        assert_eq!(writer.position(), 16);
    }
}
