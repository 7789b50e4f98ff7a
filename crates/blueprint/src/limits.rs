//! Fixed limits and format constants.
//!
//! The sniffing constants are part of the encoding detection contract. The
//! decode limits bound allocations when reading untrusted Blueprint bytes.

/// Number of leading bytes inspected by the ASCII heuristic.
pub const SNIFF_SAMPLE_LEN: usize = 1000;

/// Buffers larger than this are never scanned by the ASCII heuristic.
pub const SNIFF_MAX_LEN: usize = 1_000_000;

/// Maximum encoded length of a 64-bit varint.
pub const MAX_VARINT_BYTES: usize = 10;

/// Maximum byte length of a string payload or object key.
pub const MAX_STRING_LEN: usize = 16 * 1024 * 1024;

/// Maximum number of children in a single Array or Object.
pub const MAX_CHILDREN: usize = 1_000_000;

/// Maximum nesting depth accepted by the binary codec.
pub const MAX_DEPTH: usize = 512;

/// Magic bytes at the start of an encoded Blueprint.
pub const MAGIC: &[u8; 4] = b"BPRT";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
