//! UTF-8 backed code point sequences and transcoding.
//!
//! [`Text`] always holds valid UTF-8. It is built from UTF-8, UTF-16,
//! UTF-32 or platform wide strings, and from raw bytes in any
//! [`Encoding`]. The lenient constructors never fail:
//!
//! - malformed UTF-8 is repaired, each bad sequence becoming U+FFFD
//! - malformed UTF-16/UTF-32 drops the whole conversion and yields an empty
//!   text
//!
//! Every lenient constructor has a `try_` sibling that reports the first
//! problem as a [`TextError`] instead.
//!
//! Length and indexed access scan from the start (O(n)); walk with a
//! [`TextCursor`] rather than calling [`Text::character`] in a loop.

pub mod cursor;

use std::fmt;

use crate::buffer::Buffer;
use crate::codec::encoding::{guess_encoding, Encoding};
use crate::codec::endian::Endian;
use crate::codec::primitives::{Reader, Writer};
use crate::error::TextError;

pub use cursor::TextCursor;

/// Platform wide character: UTF-16 code unit on Windows, UTF-32 elsewhere.
#[cfg(windows)]
pub type WideChar = u16;

/// Platform wide character: UTF-16 code unit on Windows, UTF-32 elsewhere.
#[cfg(not(windows))]
pub type WideChar = u32;

/// A sequence of Unicode code points stored as UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Text {
    string: String,
}

impl Text {
    /// Creates an empty text.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Builds a text from UTF-8 bytes, replacing invalid sequences with
    /// U+FFFD.
    pub fn from_utf8(bytes: &[u8]) -> Self {
        Self {
            string: String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Builds a text from UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::InvalidUtf8`] at the first invalid sequence.
    pub fn try_from_utf8(bytes: &[u8]) -> Result<Self, TextError> {
        std::str::from_utf8(bytes)
            .map(Self::from)
            .map_err(|e| TextError::InvalidUtf8 {
                offset: e.valid_up_to(),
            })
    }

    /// Builds a text from UTF-16 code units. Empty if any surrogate is
    /// unpaired.
    pub fn from_utf16(units: &[u16]) -> Self {
        Self::try_from_utf16(units).unwrap_or_default()
    }

    /// Builds a text from UTF-16 code units.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::UnpairedSurrogate`] with the index of the first
    /// unpaired surrogate.
    pub fn try_from_utf16(units: &[u16]) -> Result<Self, TextError> {
        let mut string = String::with_capacity(units.len());
        let mut index = 0;
        for decoded in char::decode_utf16(units.iter().copied()) {
            match decoded {
                Ok(c) => {
                    string.push(c);
                    index += c.len_utf16();
                }
                Err(e) => {
                    return Err(TextError::UnpairedSurrogate {
                        index,
                        unit: e.unpaired_surrogate(),
                    });
                }
            }
        }
        Ok(Self { string })
    }

    /// Builds a text from UTF-32 code units. Empty if any unit is not a
    /// Unicode scalar value.
    pub fn from_utf32(units: &[u32]) -> Self {
        Self::try_from_utf32(units).unwrap_or_default()
    }

    /// Builds a text from UTF-32 code units.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::InvalidCodePoint`] for the first surrogate or
    /// out-of-range value.
    pub fn try_from_utf32(units: &[u32]) -> Result<Self, TextError> {
        units
            .iter()
            .enumerate()
            .map(|(index, &value)| char::from_u32(value).ok_or(TextError::InvalidCodePoint { index, value }))
            .collect::<Result<String, _>>()
            .map(Self::from)
    }

    /// Builds a text from a platform wide string. Empty if the string does
    /// not convert cleanly.
    pub fn from_wide(units: &[WideChar]) -> Self {
        #[cfg(windows)]
        {
            Self::from_utf16(units)
        }
        #[cfg(not(windows))]
        {
            Self::from_utf32(units)
        }
    }

    /// Builds a text from raw bytes in the given encoding.
    ///
    /// [`Encoding::Unknown`] guesses the encoding first; bytes that still
    /// cannot be classified are read as UTF-8. A byte order mark matching
    /// the encoding is skipped, and a trailing partial UTF-16/UTF-32 code
    /// unit is ignored.
    ///
    /// The mark is consumed rather than kept as a leading U+FEFF, so text
    /// round-trips through a file written with a BOM compare equal to the
    /// text that was written. A mark that does not match the declared
    /// encoding is decoded like any other bytes.
    pub fn from_bytes(bytes: &[u8], encoding: Encoding) -> Self {
        let encoding = resolve(bytes, encoding);
        let body = strip_bom(bytes, encoding);
        match (encoding, encoding.endian()) {
            (Encoding::Utf16Big | Encoding::Utf16Little, Some(endian)) => {
                Self::from_utf16(&utf16_units(body, endian))
            }
            (Encoding::Utf32Big | Encoding::Utf32Little, Some(endian)) => {
                Self::from_utf32(&utf32_units(body, endian))
            }
            _ => Self::from_utf8(body),
        }
    }

    /// Strict counterpart of [`Text::from_bytes`].
    ///
    /// # Errors
    ///
    /// Returns the first transcoding error, or
    /// [`TextError::UnknownEncoding`] when the encoding had to be guessed,
    /// could not be, and the bytes are not valid UTF-8 either.
    pub fn try_from_bytes(bytes: &[u8], encoding: Encoding) -> Result<Self, TextError> {
        let guessed = encoding == Encoding::Unknown;
        let encoding = resolve(bytes, encoding);
        let body = strip_bom(bytes, encoding);
        match (encoding, encoding.endian()) {
            (Encoding::Utf16Big | Encoding::Utf16Little, Some(endian)) => {
                Self::try_from_utf16(&utf16_units(body, endian))
            }
            (Encoding::Utf32Big | Encoding::Utf32Little, Some(endian)) => {
                Self::try_from_utf32(&utf32_units(body, endian))
            }
            (Encoding::Unknown, _) if guessed => {
                Self::try_from_utf8(body).map_err(|_| TextError::UnknownEncoding)
            }
            _ => Self::try_from_utf8(body),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns true if the text has no code points.
    pub fn is_empty(&self) -> bool {
        self.string.is_empty()
    }

    /// Returns the number of code points. O(n).
    pub fn len(&self) -> usize {
        self.string.chars().count()
    }

    /// Returns the number of UTF-8 bytes.
    pub fn byte_len(&self) -> usize {
        self.string.len()
    }

    /// Returns the code point at `index`, or `'\0'` past the end. O(n).
    pub fn character(&self, index: usize) -> char {
        self.string.chars().nth(index).unwrap_or('\0')
    }

    /// Returns the UTF-8 contents.
    pub fn as_str(&self) -> &str {
        &self.string
    }

    /// Consumes the text, returning its UTF-8 contents.
    pub fn into_string(self) -> String {
        self.string
    }

    /// Returns a cursor at the first code point.
    pub fn begin(&self) -> TextCursor<'_> {
        TextCursor::new(&self.string, 0)
    }

    /// Returns a cursor one past the last code point.
    pub fn end(&self) -> TextCursor<'_> {
        TextCursor::new(&self.string, self.string.len())
    }

    /// Returns a cursor at code point `index`, clamped to the end. O(n).
    pub fn cursor_at(&self, index: usize) -> TextCursor<'_> {
        self.begin() + index
    }

    /// Iterates over the code points.
    pub fn chars(&self) -> std::str::Chars<'_> {
        self.string.chars()
    }

    // =========================================================================
    // Appending
    // =========================================================================

    /// Appends a code point.
    pub fn push(&mut self, c: char) {
        self.string.push(c);
    }

    /// Appends a byte as the Latin-1 code point of the same value.
    pub fn push_byte(&mut self, byte: u8) {
        self.string.push(char::from(byte));
    }

    /// Appends a single UTF-16 code unit. Surrogates become U+FFFD.
    pub fn push_utf16(&mut self, unit: u16) {
        self.push_code_point(u32::from(unit));
    }

    /// Appends a raw code point. Surrogates and values above U+10FFFF become
    /// U+FFFD.
    pub fn push_code_point(&mut self, value: u32) {
        self.string
            .push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    /// Appends a platform wide character.
    pub fn push_wide(&mut self, c: WideChar) {
        self.push_code_point(u32::from(c));
    }

    /// Appends a string.
    pub fn push_str(&mut self, s: &str) {
        self.string.push_str(s);
    }

    /// Appends another text.
    pub fn push_text(&mut self, text: &Text) {
        self.string.push_str(&text.string);
    }

    // =========================================================================
    // Extraction
    // =========================================================================

    /// Returns the UTF-8 bytes with every non-ASCII byte replaced by 0.
    pub fn to_ascii(&self) -> Vec<u8> {
        self.string
            .bytes()
            .map(|b| if b.is_ascii() { b } else { 0 })
            .collect()
    }

    /// Returns the UTF-16 code units.
    pub fn to_utf16(&self) -> Vec<u16> {
        self.string.encode_utf16().collect()
    }

    /// Returns the UTF-32 code units.
    pub fn to_utf32(&self) -> Vec<u32> {
        self.string.chars().map(u32::from).collect()
    }

    /// Returns the platform wide string.
    pub fn to_wide(&self) -> Vec<WideChar> {
        #[cfg(windows)]
        {
            self.to_utf16()
        }
        #[cfg(not(windows))]
        {
            self.to_utf32()
        }
    }

    /// Encodes the text as bytes, without a byte order mark.
    ///
    /// [`Encoding::Ascii`] applies [`Text::to_ascii`];
    /// [`Encoding::Unknown`] writes UTF-8.
    pub fn to_bytes(&self, encoding: Encoding) -> Buffer {
        let mut writer = Writer::with_capacity(self.string.len());
        match (encoding, encoding.endian()) {
            (Encoding::Utf16Big | Encoding::Utf16Little, Some(endian)) => {
                for unit in self.string.encode_utf16() {
                    writer.write_u16(unit, endian);
                }
            }
            (Encoding::Utf32Big | Encoding::Utf32Little, Some(endian)) => {
                for c in self.string.chars() {
                    writer.write_u32(u32::from(c), endian);
                }
            }
            (Encoding::Ascii, _) => writer.write_bytes(&self.to_ascii()),
            _ => writer.write_bytes(self.string.as_bytes()),
        }
        writer.into_buffer()
    }
}

fn resolve(bytes: &[u8], encoding: Encoding) -> Encoding {
    match encoding {
        Encoding::Unknown => guess_encoding(bytes),
        known => known,
    }
}

fn strip_bom(bytes: &[u8], encoding: Encoding) -> &[u8] {
    bytes.strip_prefix(encoding.bom()).unwrap_or(bytes)
}

fn utf16_units(bytes: &[u8], endian: Endian) -> Vec<u16> {
    let mut reader = Reader::new(bytes);
    let mut units = Vec::with_capacity(bytes.len() / 2);
    while let Ok(unit) = reader.read_u16(endian, "utf-16 code unit") {
        units.push(unit);
    }
    units
}

fn utf32_units(bytes: &[u8], endian: Endian) -> Vec<u32> {
    let mut reader = Reader::new(bytes);
    let mut units = Vec::with_capacity(bytes.len() / 4);
    while let Ok(unit) = reader.read_u32(endian, "utf-32 code unit") {
        units.push(unit);
    }
    units
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string)
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.string
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self {
            string: s.to_string(),
        }
    }
}

impl From<String> for Text {
    fn from(string: String) -> Self {
        Self { string }
    }
}

impl From<Text> for String {
    fn from(text: Text) -> Self {
        text.string
    }
}

impl FromIterator<char> for Text {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            string: iter.into_iter().collect(),
        }
    }
}

impl Extend<char> for Text {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        self.string.extend(iter);
    }
}
