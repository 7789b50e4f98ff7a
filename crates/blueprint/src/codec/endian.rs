//! Native byte order detection.

use lazy_static::lazy_static;

/// Byte order of multi-byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    Big,
    Little,
}

impl Endian {
    /// Returns the other byte order.
    pub fn swapped(self) -> Endian {
        match self {
            Endian::Big => Endian::Little,
            Endian::Little => Endian::Big,
        }
    }
}

lazy_static! {
    /// Byte order of the running process, detected once on first use.
    pub static ref NATIVE_ENDIAN: Endian = detect();
}

/// Returns the byte order of the running process.
#[inline]
pub fn native_endian() -> Endian {
    *NATIVE_ENDIAN
}

fn detect() -> Endian {
    let probe = 0x0102_0304u32.to_ne_bytes();
    if probe[0] == 0x04 {
        Endian::Little
    } else {
        Endian::Big
    }
}
