//! Text encodings and byte order mark sniffing.

use crate::codec::endian::{native_endian, Endian};
use crate::limits::{SNIFF_MAX_LEN, SNIFF_SAMPLE_LEN};

/// A byte-level text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    #[default]
    Unknown,
    Ascii,
    Utf8,
    Utf16Little,
    Utf16Big,
    Utf32Little,
    Utf32Big,
}

impl Encoding {
    /// UTF-16 in the given byte order.
    pub fn utf16(endian: Endian) -> Encoding {
        match endian {
            Endian::Big => Encoding::Utf16Big,
            Endian::Little => Encoding::Utf16Little,
        }
    }

    /// UTF-32 in the given byte order.
    pub fn utf32(endian: Endian) -> Encoding {
        match endian {
            Endian::Big => Encoding::Utf32Big,
            Endian::Little => Encoding::Utf32Little,
        }
    }

    /// UTF-16 in the byte order of the running process.
    pub fn native_utf16() -> Encoding {
        Encoding::utf16(native_endian())
    }

    /// UTF-32 in the byte order of the running process.
    pub fn native_utf32() -> Encoding {
        Encoding::utf32(native_endian())
    }

    /// Returns the byte order of multi-byte encodings.
    pub fn endian(self) -> Option<Endian> {
        match self {
            Encoding::Utf16Big | Encoding::Utf32Big => Some(Endian::Big),
            Encoding::Utf16Little | Encoding::Utf32Little => Some(Endian::Little),
            _ => None,
        }
    }

    /// Returns the byte order mark of this encoding, empty if it has none.
    pub fn bom(self) -> &'static [u8] {
        match self {
            Encoding::Utf8 => &[0xEF, 0xBB, 0xBF],
            Encoding::Utf16Big => &[0xFE, 0xFF],
            Encoding::Utf16Little => &[0xFF, 0xFE],
            Encoding::Utf32Big => &[0x00, 0x00, 0xFE, 0xFF],
            Encoding::Utf32Little => &[0xFF, 0xFE, 0x00, 0x00],
            Encoding::Unknown | Encoding::Ascii => &[],
        }
    }
}

/// Guesses the encoding of `bytes`.
///
/// Byte order marks are checked first, longest candidates before the ones
/// they prefix (`FF FE 00 00` is UTF-32 LE, not UTF-16 LE). Without a mark,
/// the first 1000 bytes are sampled and the input is classified as
/// [`Encoding::Ascii`] when every sampled byte is printable ASCII or
/// whitespace. Inputs over 1,000,000 bytes without a mark are never
/// scanned and come back [`Encoding::Unknown`].
pub fn guess_encoding(bytes: &[u8]) -> Encoding {
    const BY_PRIORITY: [Encoding; 5] = [
        Encoding::Utf32Big,
        Encoding::Utf32Little,
        Encoding::Utf16Big,
        Encoding::Utf16Little,
        Encoding::Utf8,
    ];

    if let Some(encoding) = BY_PRIORITY.into_iter().find(|e| bytes.starts_with(e.bom())) {
        return encoding;
    }

    if bytes.len() > SNIFF_MAX_LEN {
        return Encoding::Unknown;
    }

    let sample = &bytes[..bytes.len().min(SNIFF_SAMPLE_LEN)];
    if sample.iter().all(|b| is_text_byte(*b)) {
        Encoding::Ascii
    } else {
        Encoding::Unknown
    }
}

/// Printable ASCII plus tab, line feed, vertical tab, form feed and
/// carriage return.
#[inline]
fn is_text_byte(byte: u8) -> bool {
    matches!(byte, 9..=13 | 32..=126)
}
