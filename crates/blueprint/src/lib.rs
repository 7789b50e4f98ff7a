//! Blueprint: a self-describing tagged value tree with byte and text codecs.
//!
//! This crate provides a dynamically typed value tree ([`Blueprint`]) together
//! with the byte-level primitives it is built on: a growable byte
//! [`Buffer`], UTF-8/16/32 transcoding through [`Text`], Base64, byte order
//! mark sniffing and native endianness detection.
//!
//! # Quick Start
//!
//! ```rust
//! use blueprint::{decode_blueprint, encode_blueprint, Blueprint, ObjectBuilder};
//!
//! let config = ObjectBuilder::new()
//!     .string("name", "server")
//!     .integer("port", 8080)
//!     .array("hosts", |a| a.string("alpha").string("beta"))
//!     .build();
//!
//! assert_eq!(config["port"].as_integer(), 8080);
//! assert!(config["missing"].is_invalid());
//!
//! // Encode to binary
//! let bytes = encode_blueprint(&config).unwrap();
//!
//! // Decode back
//! let decoded = decode_blueprint(&bytes).unwrap();
//! assert_eq!(decoded, config);
//! ```
//!
//! # Modules
//!
//! - [`model`]: The value tree and its builders
//! - [`buffer`]: Growable byte buffer with bounds-checked views
//! - [`text`]: UTF-8 text with UTF-16/UTF-32/wide transcoding and cursors
//! - [`codec`]: Base64, encoding sniffing, endianness, binary serialization
//! - [`error`]: Error types
//! - [`limits`]: Sniffing constants and decode limits
//!
//! # Failure Model
//!
//! Conversions are soft by default: malformed input yields an empty or
//! default result rather than an error. Every conversion that can fail also
//! has a strict `try_*` form returning a typed error:
//!
//! ```rust
//! use blueprint::{from_base64, try_from_base64, Text};
//!
//! assert!(Text::from_utf16(&[0xD800]).is_empty());
//! assert!(Text::try_from_utf16(&[0xD800]).is_err());
//!
//! assert_eq!(from_base64("TWFu").as_slice(), b"Man");
//! assert!(try_from_base64("TW!u").is_err());
//! ```
//!
//! Out-of-range indexing into a [`Buffer`] is a caller contract violation
//! and panics.
//!
//! # Security
//!
//! The binary decoder is designed to safely handle untrusted input:
//! - Allocations and nesting depth are bounded by [`limits`]
//! - Varints are limited to prevent overflow
//! - Invalid data is rejected with descriptive errors

pub mod buffer;
pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod text;

// Re-export commonly used types at crate root
pub use buffer::{subreference, subview, Buffer};
pub use codec::{
    decode_blueprint, encode_blueprint, encode_blueprint_with_options, from_base64,
    guess_encoding, native_endian, to_base64, try_from_base64, EncodeOptions, Encoding, Endian,
    NATIVE_ENDIAN,
};
pub use error::{DecodeError, EncodeError, TextError};
pub use model::{Array, ArrayBuilder, Blueprint, BlueprintKind, Object, ObjectBuilder};
pub use text::{Text, TextCursor, WideChar};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
