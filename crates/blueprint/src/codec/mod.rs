//! Byte-level codecs.
//!
//! - [`base64`]: Base64 encode/decode
//! - [`encoding`]: byte order mark and ASCII sniffing
//! - [`endian`]: native byte order
//! - [`primitives`]: varint/zigzag/fixed-width readers and writers
//! - [`blueprint`]: binary serialization of [`Blueprint`](crate::Blueprint) trees

pub mod base64;
pub mod blueprint;
pub mod encoding;
pub mod endian;
pub mod primitives;

pub use self::base64::{from_base64, to_base64, try_from_base64};
pub use blueprint::{decode_blueprint, encode_blueprint, encode_blueprint_with_options, EncodeOptions};
pub use encoding::{guess_encoding, Encoding};
pub use endian::{native_endian, Endian, NATIVE_ENDIAN};
pub use primitives::{zigzag_decode, zigzag_encode, Reader, Writer};
