//! Primitive encoding/decoding over byte buffers.
//!
//! Implements varint, signed varint (zigzag), length-prefixed strings, and
//! fixed-width integers in an explicit byte order.

use crate::buffer::Buffer;
use crate::codec::endian::{native_endian, Endian};
use crate::error::DecodeError;
use crate::limits::MAX_VARINT_BYTES;

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides methods for reading primitives
/// with bounds checking and error handling.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(DecodeError::UnexpectedEof { context })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads a fixed-size array of bytes.
    #[inline]
    pub fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], DecodeError> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N, context)?);
        Ok(array)
    }

    /// Reads an unsigned varint (LEB128).
    #[inline]
    pub fn read_varint(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let mut result: u64 = 0;
        let mut shift = 0;

        for i in 0..MAX_VARINT_BYTES {
            let byte = self.read_byte(context)?;
            let value = (byte & 0x7F) as u64;

            // Check for overflow
            if shift >= 64 || (shift == 63 && value > 1) {
                return Err(DecodeError::VarintOverflow);
            }

            result |= value << shift;

            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;

            if i == MAX_VARINT_BYTES - 1 {
                return Err(DecodeError::VarintTooLong);
            }
        }

        Err(DecodeError::VarintTooLong)
    }

    /// Reads a signed varint (zigzag encoded).
    pub fn read_signed_varint(&mut self, context: &'static str) -> Result<i64, DecodeError> {
        let unsigned = self.read_varint(context)?;
        Ok(zigzag_decode(unsigned))
    }

    /// Reads a varint length and checks it against `max_len`.
    pub fn read_length(&mut self, max_len: usize, field: &'static str) -> Result<usize, DecodeError> {
        let len = usize::try_from(self.read_varint(field)?).unwrap_or(usize::MAX);
        if len > max_len {
            return Err(DecodeError::LengthExceedsLimit {
                field,
                len,
                max: max_len,
            });
        }
        Ok(len)
    }

    /// Reads a length-prefixed UTF-8 string.
    #[inline]
    pub fn read_string(
        &mut self,
        max_len: usize,
        field: &'static str,
    ) -> Result<String, DecodeError> {
        let len = self.read_length(max_len, field)?;
        let bytes = self.read_bytes(len, field)?;
        // Validate UTF-8 on borrowed slice, then allocate once
        std::str::from_utf8(bytes)
            .map(|s| s.to_string())
            .map_err(|_| DecodeError::InvalidUtf8 { field })
    }

    /// Reads a little-endian f64.
    #[inline]
    pub fn read_f64(&mut self, context: &'static str) -> Result<f64, DecodeError> {
        Ok(f64::from_le_bytes(self.read_array(context)?))
    }

    /// Reads a u16 stored in the given byte order.
    ///
    /// The bytes are shifted into position individually, so the result does
    /// not depend on the byte order of the running process.
    #[inline]
    pub fn read_u16(&mut self, endian: Endian, context: &'static str) -> Result<u16, DecodeError> {
        let [first, second] = self.read_array::<2>(context)?.map(u16::from);
        Ok(match endian {
            Endian::Big => (first << 8) | second,
            Endian::Little => (second << 8) | first,
        })
    }

    /// Reads a u32 stored in the given byte order.
    #[inline]
    pub fn read_u32(&mut self, endian: Endian, context: &'static str) -> Result<u32, DecodeError> {
        let [first, second, third, fourth] = self.read_array::<4>(context)?.map(u32::from);
        Ok(match endian {
            Endian::Big => (first << 24) | (second << 16) | (third << 8) | fourth,
            Endian::Little => (fourth << 24) | (third << 16) | (second << 8) | first,
        })
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data into a [`Buffer`].
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Buffer,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Buffer::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Buffer::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_buffer(self) -> Buffer {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_slice()
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.size()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.append(byte, 1);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.append_bytes(bytes, false);
    }

    /// Writes an unsigned varint (LEB128).
    #[inline]
    pub fn write_varint(&mut self, mut value: u64) {
        // Use stack buffer to batch writes
        let mut buf = [0u8; MAX_VARINT_BYTES];
        let mut len = 0;
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            buf[len] = byte;
            len += 1;
            if value == 0 {
                break;
            }
        }
        self.write_bytes(&buf[..len]);
    }

    /// Writes a signed varint (zigzag encoded).
    pub fn write_signed_varint(&mut self, value: i64) {
        self.write_varint(zigzag_encode(value));
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, s: &str) {
        self.write_varint(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    /// Writes a little-endian f64.
    pub fn write_f64(&mut self, value: f64) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Writes a u16 in the given byte order.
    pub fn write_u16(&mut self, value: u16, endian: Endian) {
        self.buf.append_bytes(&value.to_ne_bytes(), endian != native_endian());
    }

    /// Writes a u32 in the given byte order.
    pub fn write_u32(&mut self, value: u32, endian: Endian) {
        self.buf.append_bytes(&value.to_ne_bytes(), endian != native_endian());
    }
}

// =============================================================================
// ZIGZAG ENCODING
// =============================================================================

/// Encodes a signed integer using zigzag encoding.
///
/// Maps negative numbers to odd positive numbers:
/// 0 -> 0, -1 -> 1, 1 -> 2, -2 -> 3, 2 -> 4, ...
#[inline]
pub fn zigzag_encode(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Decodes a zigzag-encoded unsigned integer back to signed.
#[inline]
pub fn zigzag_decode(n: u64) -> i64 {
    ((n >> 1) as i64) ^ (-((n & 1) as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zigzag_values() {
        assert_eq!(zigzag_encode(0), 0);
        assert_eq!(zigzag_encode(-1), 1);
        assert_eq!(zigzag_encode(1), 2);
        assert_eq!(zigzag_encode(-2), 3);
        assert_eq!(zigzag_encode(2), 4);
        assert_eq!(zigzag_decode(zigzag_encode(i64::MIN)), i64::MIN);
    }

    #[test]
    fn test_varint_boundaries() {
        for v in [0u64, 127, 128, 16383, 16384, u64::MAX] {
            let mut writer = Writer::new();
            writer.write_varint(v);

            let mut reader = Reader::new(writer.as_bytes());
            assert_eq!(reader.read_varint("test").unwrap(), v, "failed for {}", v);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_signed_varint_extremes() {
        let mut writer = Writer::new();
        writer.write_signed_varint(i64::MIN);
        writer.write_signed_varint(-1);

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_signed_varint("test").unwrap(), i64::MIN);
        assert_eq!(reader.read_signed_varint("test").unwrap(), -1);
    }

    #[test]
    fn test_string_with_unicode() {
        let mut writer = Writer::new();
        writer.write_string("unicode: \u{1F600}");

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_string(1000, "test").unwrap(), "unicode: \u{1F600}");
    }

    #[test]
    fn test_fixed_width_byte_order() {
        let mut writer = Writer::new();
        writer.write_u16(0x0102, Endian::Big);
        writer.write_u16(0x0102, Endian::Little);
        writer.write_u32(0x0102_0304, Endian::Big);
        writer.write_u32(0x0102_0304, Endian::Little);
        assert_eq!(
            writer.as_bytes(),
            &[0x01, 0x02, 0x02, 0x01, 0x01, 0x02, 0x03, 0x04, 0x04, 0x03, 0x02, 0x01]
        );

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_u16(Endian::Big, "test").unwrap(), 0x0102);
        assert_eq!(reader.read_u16(Endian::Little, "test").unwrap(), 0x0102);
        assert_eq!(reader.read_u32(Endian::Big, "test").unwrap(), 0x0102_0304);
        assert_eq!(reader.read_u32(Endian::Little, "test").unwrap(), 0x0102_0304);
    }

    #[test]
    fn test_f64_bits_preserved() {
        let mut writer = Writer::new();
        writer.write_f64(f64::NAN);
        writer.write_f64(-0.0);

        let mut reader = Reader::new(writer.as_bytes());
        assert!(reader.read_f64("test").unwrap().is_nan());
        assert!(reader.read_f64("test").unwrap().is_sign_negative());
    }

    #[test]
    fn test_varint_too_long() {
        // 11 continuation bytes should fail
        let data = [0x80u8; 11];
        let mut reader = Reader::new(&data);
        let result = reader.read_varint("test");
        assert!(matches!(result, Err(DecodeError::VarintTooLong)));
    }

    #[test]
    fn test_string_too_long() {
        let mut writer = Writer::new();
        writer.write_varint(1000);
        writer.write_bytes(&[b'a'; 1000]);

        let mut reader = Reader::new(writer.as_bytes());
        let result = reader.read_string(100, "test");
        assert!(matches!(
            result,
            Err(DecodeError::LengthExceedsLimit { max: 100, .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_string() {
        let mut writer = Writer::new();
        writer.write_varint(2);
        writer.write_bytes(&[0xC3, 0x28]);

        let mut reader = Reader::new(writer.as_bytes());
        assert!(matches!(
            reader.read_string(100, "key"),
            Err(DecodeError::InvalidUtf8 { field: "key" })
        ));
    }

    #[test]
    fn test_unexpected_eof() {
        let data = [0u8; 5];
        let mut reader = Reader::new(&data);
        let result = reader.read_bytes(10, "test");
        assert!(matches!(result, Err(DecodeError::UnexpectedEof { .. })));
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.remaining_len(), 5);
    }
}
