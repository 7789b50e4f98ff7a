//! Base64 with the standard alphabet and `=` padding.
//!
//! [`from_base64`] is lenient: characters outside the alphabet decode as
//! index 64 and silently corrupt their group instead of failing. Use
//! [`try_from_base64`] when the input is untrusted.

use ::base64::engine::general_purpose::STANDARD;
use ::base64::Engine;

use crate::buffer::Buffer;
use crate::error::DecodeError;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const PAD: u8 = b'=';

/// Encodes `bytes` as padded Base64.
///
/// The final partial group is zero-filled before encoding, then its
/// trailing `(3 - len % 3) % 3` characters are replaced with `=`.
pub fn to_base64(bytes: &[u8]) -> String {
    let padding = (3 - bytes.len() % 3) % 3;
    let mut text = String::with_capacity((bytes.len() + padding) / 3 * 4);

    for chunk in bytes.chunks(3) {
        let mut group = [0u8; 3];
        group[..chunk.len()].copy_from_slice(chunk);
        text.extend(encode_group(group).map(char::from));
    }

    text.truncate(text.len() - padding);
    text.extend(std::iter::repeat_n(PAD as char, padding));
    text
}

/// Decodes padded Base64 without validation.
///
/// The output size is `len * 3 / 4`, less 2 if the second-to-last
/// character is `=` or less 1 if only the last one is. Inputs too short for
/// that arithmetic decode to an empty buffer, and a trailing partial group
/// leaves its output bytes zeroed.
pub fn from_base64(text: &str) -> Buffer {
    let input = text.as_bytes();
    let output_size = (input.len() * 3 / 4).saturating_sub(padding_len(input));

    let mut buffer = Buffer::new();
    buffer.set_size(output_size);

    let output = buffer.as_mut_slice();
    let mut written = 0;
    for group in input.chunks_exact(4) {
        let indices = [
            alphabet_index(group[0]),
            alphabet_index(group[1]),
            alphabet_index(group[2]),
            alphabet_index(group[3]),
        ];
        for byte in decode_group(indices) {
            if written < output_size {
                output[written] = byte;
                written += 1;
            }
        }
    }

    buffer
}

/// Decodes padded Base64, rejecting malformed input.
///
/// Validation is delegated to the `base64` crate's standard engine, which
/// also requires canonical padding and zero unused bits in the last
/// character.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidBase64Length`] if the length is not a
/// multiple of 4, [`DecodeError::InvalidBase64Char`] for characters outside
/// the alphabet or misplaced `=`, [`DecodeError::InvalidBase64LastSymbol`]
/// when the final character carries non-zero unused bits, and
/// [`DecodeError::InvalidBase64Padding`] for malformed padding.
pub fn try_from_base64(text: &str) -> Result<Buffer, DecodeError> {
    let len = text.len();
    if len % 4 != 0 {
        return Err(DecodeError::InvalidBase64Length { len });
    }

    STANDARD
        .decode(text)
        .map(Buffer::from)
        .map_err(|e| map_decode_error(text, e))
}

fn map_decode_error(text: &str, error: ::base64::DecodeError) -> DecodeError {
    let char_at = |index: usize, byte: u8| {
        text.get(index..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::from(byte))
    };
    match error {
        ::base64::DecodeError::InvalidByte(index, byte) => DecodeError::InvalidBase64Char {
            ch: char_at(index, byte),
            index,
        },
        ::base64::DecodeError::InvalidLastSymbol(index, byte) => {
            DecodeError::InvalidBase64LastSymbol {
                ch: char_at(index, byte),
                index,
            }
        }
        ::base64::DecodeError::InvalidLength(_) => DecodeError::InvalidBase64Length { len: text.len() },
        #[allow(unreachable_patterns)]
        _ => DecodeError::InvalidBase64Padding,
    }
}

fn padding_len(input: &[u8]) -> usize {
    let len = input.len();
    if len >= 2 && input[len - 2] == PAD {
        2
    } else if len >= 1 && input[len - 1] == PAD {
        1
    } else {
        0
    }
}

/// Returns the alphabet position of `c`, or 64 if it is not in the alphabet.
#[inline]
fn alphabet_index(c: u8) -> u8 {
    ALPHABET
        .iter()
        .position(|a| *a == c)
        .unwrap_or(ALPHABET.len()) as u8
}

#[inline]
fn encode_group(input: [u8; 3]) -> [u8; 4] {
    [
        ALPHABET[usize::from((input[0] & 0xFC) >> 2)],
        ALPHABET[usize::from(((input[0] & 0x03) << 4) | ((input[1] & 0xF0) >> 4))],
        ALPHABET[usize::from(((input[1] & 0x0F) << 2) | ((input[2] & 0xC0) >> 6))],
        ALPHABET[usize::from(input[2] & 0x3F)],
    ]
}

#[inline]
fn decode_group(input: [u8; 4]) -> [u8; 3] {
    // out-of-alphabet indices (64) can overflow a byte, so combine in u32
    let [a, b, c, d] = input.map(u32::from);
    [
        ((a << 2) + ((b & 0x30) >> 4)) as u8,
        (((b & 0x0F) << 4) + ((c & 0x3C) >> 2)) as u8,
        (((c & 0x03) << 6) + d) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_values() {
        assert_eq!(to_base64(&[0x4D, 0x61, 0x6E]), "TWFu");
        assert_eq!(to_base64(&[0x4D]), "TQ==");
        assert_eq!(to_base64(&[0x4D, 0x61]), "TWE=");
        assert_eq!(to_base64(&[]), "");
        assert_eq!(to_base64(&[0xFB, 0xFF]), "+/8=");
    }

    #[test]
    fn test_decode_known_values() {
        assert_eq!(from_base64("TWFu"), Buffer::from(vec![0x4D, 0x61, 0x6E]));
        assert_eq!(from_base64("TQ=="), Buffer::from(vec![0x4D]));
        assert_eq!(from_base64("TWE="), Buffer::from(vec![0x4D, 0x61]));
        assert_eq!(from_base64("+/8="), Buffer::from(vec![0xFB, 0xFF]));
    }

    #[test]
    fn test_roundtrip_all_padding_lengths() {
        for len in 0..32usize {
            let bytes: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
            let text = to_base64(&bytes);
            assert_eq!(text.len() % 4, 0);
            assert_eq!(from_base64(&text).into_vec(), bytes, "failed for length {}", len);
        }
    }

    #[test]
    fn test_short_input_is_empty() {
        assert!(from_base64("").is_empty());
        assert!(from_base64("T").is_empty());
        assert!(from_base64("==").is_empty());
        assert!(from_base64("=").is_empty());
    }

    #[test]
    fn test_unknown_character_is_lenient() {
        // '*' decodes as index 64: no failure, same output size
        let decoded = from_base64("TW*u");
        assert_eq!(decoded.size(), 3);
        assert_ne!(decoded.view(), &[0x4D, 0x61, 0x6E]);
    }

    #[test]
    fn test_partial_group_leaves_zeroes() {
        let decoded = from_base64("TWFuTW");
        assert_eq!(decoded.view(), &[0x4D, 0x61, 0x6E, 0x00]);
    }

    #[test]
    fn test_strict_accepts_valid() {
        let decoded = try_from_base64("TWFuTQ==").unwrap();
        assert_eq!(decoded.view(), &[0x4D, 0x61, 0x6E, 0x4D]);
        assert!(try_from_base64("").unwrap().is_empty());
    }

    #[test]
    fn test_strict_rejects_malformed() {
        assert!(matches!(
            try_from_base64("TWF"),
            Err(DecodeError::InvalidBase64Length { len: 3 })
        ));
        assert!(matches!(
            try_from_base64("TW*u"),
            Err(DecodeError::InvalidBase64Char { ch: '*', index: 2 })
        ));
        assert!(matches!(
            try_from_base64("T=Fu"),
            Err(DecodeError::InvalidBase64Char { .. })
        ));
        assert!(try_from_base64("TQ=A").is_err());
        assert!(try_from_base64("TW\u{e9}u").is_err());
    }

    #[test]
    fn test_strict_rejects_unused_bits() {
        // 'R' leaves a set bit past the single decoded byte
        assert!(matches!(
            try_from_base64("TR=="),
            Err(DecodeError::InvalidBase64LastSymbol { ch: 'R', index: 1 })
        ));
        assert!(try_from_base64("TWF=").is_err());

        // the lenient decoder still accepts it
        assert_eq!(from_base64("TR==").view(), &[0x4D]);
    }

    #[test]
    fn test_strict_agrees_with_lenient_on_valid_input() {
        for len in 0..16usize {
            let bytes: Vec<u8> = (0..len).map(|i| (i * 53 + 7) as u8).collect();
            let text = to_base64(&bytes);
            assert_eq!(try_from_base64(&text).unwrap(), from_base64(&text));
        }
    }
}
