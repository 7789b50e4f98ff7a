//! Error types for transcoding and the Blueprint binary codec.
//!
//! Most operations in this crate are soft: they return an empty or default
//! result instead of failing. These errors are produced by the strict
//! `try_*` entry points and by the binary codec.

use thiserror::Error;

use crate::model::BlueprintKind;

/// Error during strict text transcoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("invalid UTF-8 sequence at byte offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("unpaired UTF-16 surrogate {unit:#06x} at unit {index}")]
    UnpairedSurrogate { index: usize, unit: u16 },

    #[error("invalid code point {value:#x} at unit {index}")]
    InvalidCodePoint { index: usize, value: u32 },

    #[error("input encoding could not be determined")]
    UnknownEncoding,
}

/// Error during decoding of Base64 text or Blueprint bytes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === Base64 ===
    #[error("invalid Base64 character {ch:?} at index {index}")]
    InvalidBase64Char { ch: char, index: usize },

    #[error("Base64 length {len} is not a multiple of 4")]
    InvalidBase64Length { len: usize },

    #[error("final Base64 character {ch:?} at index {index} has non-zero unused bits")]
    InvalidBase64LastSymbol { ch: char, index: usize },

    #[error("invalid Base64 padding")]
    InvalidBase64Padding,

    // === Blueprint binary format ===
    #[error("invalid magic bytes: expected BPRT, found {found:?}")]
    InvalidMagic { found: [u8; 4] },

    #[error("unsupported version: {version}")]
    UnsupportedVersion { version: u8 },

    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("varint exceeds maximum length (10 bytes)")]
    VarintTooLong,

    #[error("varint overflow (value exceeds u64)")]
    VarintOverflow,

    #[error("invalid kind tag: {kind}")]
    InvalidKind { kind: u8 },

    #[error("invalid bool value: {value} (expected 0x00 or 0x01)")]
    InvalidBool { value: u8 },

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("nesting depth exceeds maximum {max}")]
    DepthExceeded { max: usize },

    #[error("duplicate object key {key:?}")]
    DuplicateKey { key: String },

    #[error("{count} trailing bytes after root node")]
    TrailingBytes { count: usize },
}

/// Error during binary encoding of a Blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{kind:?} nodes cannot be encoded")]
    InvalidKind { kind: BlueprintKind },

    #[error("nesting depth exceeds maximum {max}")]
    DepthExceeded { max: usize },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },
}
