//! Growable owned byte storage.
//!
//! A [`Buffer`] tracks its used size separately from its allocated
//! capacity. Growing past the capacity reallocates to one and a half times
//! the used size (or the requested size, if larger); shrinking only moves
//! the used mark, so truncate/append cycles never touch the allocator.
//!
//! Views (`&[u8]`) and references (`&mut [u8]`) borrow the buffer, so the
//! borrow checker rejects any resize while one of them is alive.

use std::fmt;

/// Owned, growable byte storage with separate used and available sizes.
#[derive(Default)]
pub struct Buffer {
    data: Box<[u8]>,
    used: usize,
}

impl Buffer {
    /// Creates an empty buffer without allocating.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with `capacity` bytes available.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            used: 0,
        }
    }

    /// Returns true if no bytes are in use.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Returns the number of bytes in use.
    #[inline]
    pub fn size(&self) -> usize {
        self.used
    }

    /// Returns the number of bytes allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the used bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.used]
    }

    /// Returns the used bytes mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data[..self.used]
    }

    /// Consumes the buffer, returning its used bytes.
    pub fn into_vec(self) -> Vec<u8> {
        let mut bytes = self.data.into_vec();
        bytes.truncate(self.used);
        bytes
    }

    /// Returns the byte at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`size`](Self::size).
    #[inline]
    pub fn byte(&self, index: usize) -> u8 {
        debug_assert!(index < self.used, "byte index {index} out of range (size {})", self.used);
        self.as_slice()[index]
    }

    /// Overwrites the byte at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`size`](Self::size).
    #[inline]
    pub fn set_byte(&mut self, index: usize, value: u8) {
        debug_assert!(index < self.used, "byte index {index} out of range (size {})", self.used);
        self.as_mut_slice()[index] = value;
    }

    /// Overwrites `bytes.len()` bytes starting at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the range does not lie within the used bytes.
    pub fn set_bytes(&mut self, index: usize, bytes: &[u8]) {
        debug_assert!(
            index.checked_add(bytes.len()).is_some_and(|end| end <= self.used),
            "byte range {index}+{} out of range (size {})",
            bytes.len(),
            self.used
        );
        self.as_mut_slice()[index..index + bytes.len()].copy_from_slice(bytes);
    }

    /// Sets the used size.
    ///
    /// Growing keeps the existing bytes and zeroes the new ones. Shrinking
    /// never reallocates.
    pub fn set_size(&mut self, size: usize) {
        if size > self.data.len() {
            let capacity = size.max(self.used + self.used / 2);
            let mut data = vec![0u8; capacity].into_boxed_slice();
            data[..self.used].copy_from_slice(&self.data[..self.used]);
            self.data = data;
        } else if size > self.used {
            // bytes past the used mark may be left over from an earlier shrink
            self.data[self.used..size].fill(0);
        }

        self.used = size;
    }

    /// Appends `count` copies of `value`.
    pub fn append(&mut self, value: u8, count: usize) {
        self.reserve(count).fill(value);
    }

    /// Appends `bytes`, optionally in reverse order.
    pub fn append_bytes(&mut self, bytes: &[u8], reverse: bool) {
        let target = self.reserve(bytes.len());
        target.copy_from_slice(bytes);
        if reverse {
            target.reverse();
        }
    }

    /// Extends the buffer by `count` zeroed bytes and returns them for
    /// writing.
    pub fn reserve(&mut self, count: usize) -> &mut [u8] {
        let start = self.used;
        self.set_size(start + count);
        &mut self.data[start..self.used]
    }

    /// Sets every used byte to `value`.
    pub fn fill(&mut self, value: u8) {
        self.as_mut_slice().fill(value);
    }

    /// Releases the storage.
    pub fn clear(&mut self) {
        self.data = Box::default();
        self.used = 0;
    }

    /// Returns a view of all used bytes.
    pub fn view(&self) -> &[u8] {
        self.as_slice()
    }

    /// Returns a view from `start` to the end, or an empty view if `start`
    /// is past the end.
    pub fn view_from(&self, start: usize) -> &[u8] {
        match self.used.checked_sub(start) {
            Some(count) => self.view_range(start, count),
            None => &[],
        }
    }

    /// Returns a view of `count` bytes at `start`, or an empty view if the
    /// range is out of bounds.
    pub fn view_range(&self, start: usize, count: usize) -> &[u8] {
        subview(self.as_slice(), start, count)
    }

    /// Returns a writable reference to all used bytes.
    pub fn reference(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }

    /// Returns a writable reference from `start` to the end, or an empty
    /// reference if `start` is past the end.
    pub fn reference_from(&mut self, start: usize) -> &mut [u8] {
        match self.used.checked_sub(start) {
            Some(count) => self.reference_range(start, count),
            None => &mut [],
        }
    }

    /// Returns a writable reference to `count` bytes at `start`, or an empty
    /// reference if the range is out of bounds.
    pub fn reference_range(&mut self, start: usize, count: usize) -> &mut [u8] {
        subreference(self.as_mut_slice(), start, count)
    }
}

/// Returns `count` bytes of `bytes` at `start`, or an empty slice if the
/// range is out of bounds.
pub fn subview(bytes: &[u8], start: usize, count: usize) -> &[u8] {
    match start.checked_add(count) {
        Some(end) if end <= bytes.len() => &bytes[start..end],
        _ => &[],
    }
}

/// Mutable counterpart of [`subview`].
pub fn subreference(bytes: &mut [u8], start: usize, count: usize) -> &mut [u8] {
    match start.checked_add(count) {
        Some(end) if end <= bytes.len() => &mut bytes[start..end],
        _ => &mut [],
    }
}

impl Clone for Buffer {
    fn clone(&self) -> Self {
        Self::from(self.as_slice())
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Buffer {}

impl PartialEq<[u8]> for Buffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("size", &self.used)
            .field("capacity", &self.data.len())
            .field("bytes", &self.as_slice())
            .finish()
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsMut<[u8]> for Buffer {
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        Self {
            data: bytes.into(),
            used: bytes.len(),
        }
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        let used = bytes.len();
        Self {
            data: bytes.into_boxed_slice(),
            used,
        }
    }
}

impl From<Buffer> for Vec<u8> {
    fn from(buffer: Buffer) -> Self {
        buffer.into_vec()
    }
}

impl<'a> IntoIterator for &'a Buffer {
    type Item = &'a u8;
    type IntoIter = std::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_does_not_allocate() {
        let buffer = Buffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 0);
    }

    #[test]
    fn test_set_size_preserves_prefix() {
        let mut buffer = Buffer::from(&[1u8, 2, 3, 4][..]);

        buffer.set_size(10);
        assert_eq!(buffer.size(), 10);
        assert_eq!(buffer.view_range(0, 4), &[1, 2, 3, 4]);
        assert!(buffer.view_from(4).iter().all(|b| *b == 0));

        buffer.set_size(2);
        assert_eq!(buffer.view(), &[1, 2]);
    }

    #[test]
    fn test_growth_factor() {
        let mut buffer = Buffer::new();
        buffer.set_size(100);
        assert_eq!(buffer.capacity(), 100);

        // 100 + 50 beats the requested 101
        buffer.set_size(101);
        assert_eq!(buffer.capacity(), 150);

        // requested size beats 1.5x
        buffer.set_size(1000);
        assert_eq!(buffer.capacity(), 1000);
    }

    #[test]
    fn test_shrink_keeps_capacity() {
        let mut buffer = Buffer::with_capacity(64);
        buffer.append(7, 64);
        buffer.set_size(8);
        assert_eq!(buffer.capacity(), 64);
        assert_eq!(buffer.size(), 8);
    }

    #[test]
    fn test_regrow_zeroes_stale_bytes() {
        let mut buffer = Buffer::new();
        buffer.append(0xAA, 8);
        buffer.set_size(2);
        buffer.set_size(8);
        assert_eq!(buffer.view(), &[0xAA, 0xAA, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_append_bytes() {
        let mut buffer = Buffer::new();
        buffer.append_bytes(&[1, 2, 3], false);
        buffer.append_bytes(&[4, 5, 6], true);
        buffer.append(9, 2);
        assert_eq!(buffer.view(), &[1, 2, 3, 6, 5, 4, 9, 9]);
    }

    #[test]
    fn test_reserve_returns_new_region() {
        let mut buffer = Buffer::from(vec![1u8, 2]);
        let region = buffer.reserve(3);
        assert_eq!(region.len(), 3);
        region.copy_from_slice(&[7, 8, 9]);
        assert_eq!(buffer.view(), &[1, 2, 7, 8, 9]);
    }

    #[test]
    fn test_set_bytes_and_fill() {
        let mut buffer = Buffer::new();
        buffer.set_size(5);
        buffer.set_bytes(1, &[1, 2, 3]);
        assert_eq!(buffer.view(), &[0, 1, 2, 3, 0]);
        buffer.set_byte(4, 9);
        assert_eq!(buffer.byte(4), 9);
        buffer.fill(0xFF);
        assert_eq!(buffer.view(), &[0xFF; 5]);
    }

    #[test]
    fn test_clear_releases_storage() {
        let mut buffer = Buffer::from(vec![1u8; 32]);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 0);
    }

    #[test]
    fn test_invalid_ranges_are_empty() {
        let mut buffer = Buffer::from(vec![1u8, 2, 3, 4]);
        assert!(buffer.view_range(2, 3).is_empty());
        assert!(buffer.view_range(usize::MAX, 2).is_empty());
        assert!(buffer.view_from(5).is_empty());
        assert!(buffer.reference_range(4, 1).is_empty());
        assert!(buffer.reference_from(9).is_empty());
        assert_eq!(buffer.view_range(1, 2), &[2, 3]);
        assert!(buffer.view_from(4).is_empty());
    }

    #[test]
    fn test_reference_writes_through() {
        let mut buffer = Buffer::from(vec![0u8; 4]);
        buffer.reference_range(1, 2).fill(5);
        let tail = buffer.reference_from(3);
        tail[0] = 6;
        assert_eq!(buffer.view(), &[0, 5, 5, 6]);
    }

    #[test]
    fn test_subview_helpers() {
        let bytes = [1u8, 2, 3, 4, 5];
        assert_eq!(subview(&bytes, 1, 3), &[2, 3, 4]);
        assert!(subview(&bytes, 4, 2).is_empty());

        let mut bytes = bytes;
        subreference(&mut bytes, 0, 2).fill(0);
        assert_eq!(bytes, [0, 0, 3, 4, 5]);
    }

    #[test]
    fn test_clone_and_eq_ignore_capacity() {
        let mut buffer = Buffer::with_capacity(100);
        buffer.append_bytes(b"abc", false);
        let copy = buffer.clone();
        assert_eq!(copy, buffer);
        assert_eq!(copy.capacity(), 3);
        assert_eq!(copy.into_vec(), b"abc".to_vec());
    }

    #[test]
    #[should_panic]
    fn test_byte_out_of_range_panics() {
        let buffer = Buffer::from(vec![1u8]);
        buffer.byte(1);
    }
}
