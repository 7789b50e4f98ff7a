//! Blueprint encoding/decoding for the binary format.
//!
//! Layout:
//!
//! ```text
//! "BPRT" version:u8 node
//!
//! node := kind:u8 payload
//!   Null          (empty)
//!   Boolean       u8 (0 or 1)
//!   Integer       signed varint
//!   FloatingPoint f64 little-endian
//!   String        varint length, UTF-8 bytes
//!   Array         varint count, node*
//!   Object        varint count, (varint length, UTF-8 key, node)*
//! ```
//!
//! Invalid nodes have no encoding. Decoding rejects duplicate object keys
//! and bytes left over after the root node.

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{FORMAT_VERSION, MAGIC, MAX_CHILDREN, MAX_DEPTH, MAX_STRING_LEN};
use crate::model::{Array, Blueprint, BlueprintKind, Object};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a Blueprint tree from binary data.
pub fn decode_blueprint(input: &[u8]) -> Result<Blueprint, DecodeError> {
    let mut reader = Reader::new(input);

    let found: [u8; 4] = reader.read_array::<4>("magic")?;
    if &found != MAGIC {
        return Err(DecodeError::InvalidMagic { found });
    }

    let version = reader.read_byte("version")?;
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion { version });
    }

    let root = decode_node(&mut reader, 0)?;

    if !reader.is_empty() {
        return Err(DecodeError::TrailingBytes {
            count: reader.remaining_len(),
        });
    }
    Ok(root)
}

fn decode_node(reader: &mut Reader<'_>, depth: usize) -> Result<Blueprint, DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::DepthExceeded { max: MAX_DEPTH });
    }

    let tag = reader.read_byte("kind")?;
    let kind = match BlueprintKind::from_u8(tag) {
        Some(BlueprintKind::Invalid) | None => return Err(DecodeError::InvalidKind { kind: tag }),
        Some(kind) => kind,
    };

    let node = match kind {
        BlueprintKind::Invalid => unreachable!("rejected above"),
        BlueprintKind::Null => Blueprint::Null,
        BlueprintKind::Boolean => match reader.read_byte("boolean")? {
            0 => Blueprint::Boolean(false),
            1 => Blueprint::Boolean(true),
            value => return Err(DecodeError::InvalidBool { value }),
        },
        BlueprintKind::Integer => Blueprint::Integer(reader.read_signed_varint("integer")?),
        BlueprintKind::FloatingPoint => Blueprint::FloatingPoint(reader.read_f64("floating_point")?),
        BlueprintKind::String => Blueprint::String(reader.read_string(MAX_STRING_LEN, "string")?),
        BlueprintKind::Array => {
            let count = reader.read_length(MAX_CHILDREN, "array_count")?;
            // Every child takes at least one byte
            let mut children = Array::with_capacity(count.min(reader.remaining_len()));
            for _ in 0..count {
                children.push(decode_node(reader, depth + 1)?);
            }
            Blueprint::Array(children)
        }
        BlueprintKind::Object => {
            let count = reader.read_length(MAX_CHILDREN, "object_count")?;
            let mut children = Object::with_capacity_and_hasher(
                count.min(reader.remaining_len()),
                Default::default(),
            );
            for _ in 0..count {
                let key = reader.read_string(MAX_STRING_LEN, "object_key")?;
                if children.contains_key(&key) {
                    return Err(DecodeError::DuplicateKey { key });
                }
                let child = decode_node(reader, depth + 1)?;
                children.insert(key, child);
            }
            Blueprint::Object(children)
        }
    };
    Ok(node)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Options for encoding Blueprint trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Enable canonical encoding mode.
    ///
    /// When enabled, object keys are written in ascending byte order instead
    /// of insertion order and negative zero is written as positive zero, so
    /// trees that compare equal encode to identical bytes. NaN payloads are
    /// written as-is.
    pub canonical: bool,
}

impl EncodeOptions {
    /// Creates default (non-canonical) encoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates canonical encoding options.
    pub fn canonical() -> Self {
        Self { canonical: true }
    }
}

/// Encodes a Blueprint tree to binary format (non-canonical).
pub fn encode_blueprint(value: &Blueprint) -> Result<Vec<u8>, EncodeError> {
    encode_blueprint_with_options(value, EncodeOptions::default())
}

/// Encodes a Blueprint tree to binary format with the given options.
pub fn encode_blueprint_with_options(
    value: &Blueprint,
    options: EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::with_capacity(64);
    writer.write_bytes(MAGIC);
    writer.write_byte(FORMAT_VERSION);
    encode_node(&mut writer, value, options, 0)?;
    Ok(writer.into_buffer().into_vec())
}

fn encode_node(
    writer: &mut Writer,
    value: &Blueprint,
    options: EncodeOptions,
    depth: usize,
) -> Result<(), EncodeError> {
    if depth > MAX_DEPTH {
        return Err(EncodeError::DepthExceeded { max: MAX_DEPTH });
    }

    let kind = value.kind();
    if kind == BlueprintKind::Invalid {
        return Err(EncodeError::InvalidKind { kind });
    }
    writer.write_byte(kind as u8);

    match value {
        Blueprint::Invalid | Blueprint::Null => {}
        Blueprint::Boolean(b) => writer.write_byte(u8::from(*b)),
        Blueprint::Integer(i) => writer.write_signed_varint(*i),
        // -0.0 == 0.0, so canonical output writes both as +0.0
        Blueprint::FloatingPoint(f) if options.canonical && *f == 0.0 => writer.write_f64(0.0),
        Blueprint::FloatingPoint(f) => writer.write_f64(*f),
        Blueprint::String(s) => {
            check_length("string", s.len(), MAX_STRING_LEN)?;
            writer.write_string(s);
        }
        Blueprint::Array(children) => {
            check_length("array_count", children.len(), MAX_CHILDREN)?;
            writer.write_varint(children.len() as u64);
            for child in children {
                encode_node(writer, child, options, depth + 1)?;
            }
        }
        Blueprint::Object(children) => {
            check_length("object_count", children.len(), MAX_CHILDREN)?;
            writer.write_varint(children.len() as u64);

            let mut entries: Vec<(&String, &Blueprint)> = children.iter().collect();
            if options.canonical {
                entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            }
            for (key, child) in entries {
                check_length("object_key", key.len(), MAX_STRING_LEN)?;
                writer.write_string(key);
                encode_node(writer, child, options, depth + 1)?;
            }
        }
    }
    Ok(())
}

fn check_length(field: &'static str, len: usize, max: usize) -> Result<(), EncodeError> {
    if len > max {
        return Err(EncodeError::LengthExceedsLimit { field, len, max });
    }
    Ok(())
}
