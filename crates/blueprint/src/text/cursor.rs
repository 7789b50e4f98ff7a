//! Bidirectional code point cursor over UTF-8 text.

use std::cmp::Ordering;
use std::ops::{Add, Sub};

/// A position inside a UTF-8 string, stepped one code point at a time.
///
/// The cursor is a byte offset plus a borrow of the text; it never builds an
/// index table, so moving by `n` code points costs O(n). It always sits on a
/// code point boundary.
///
/// Cursors compare by position and are only comparable when they point into
/// the same text.
#[derive(Debug, Clone, Copy)]
pub struct TextCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TextCursor<'a> {
    pub(crate) fn new(text: &'a str, pos: usize) -> Self {
        debug_assert!(text.is_char_boundary(pos));
        Self { text, pos }
    }

    /// Returns the byte offset of the cursor.
    pub fn byte_offset(&self) -> usize {
        self.pos
    }

    pub fn is_at_start(&self) -> bool {
        self.pos == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.pos == self.text.len()
    }

    /// Returns the code point under the cursor, or `None` at the end.
    #[inline]
    pub fn get(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// Moves forward one code point. Returns false at the end.
    #[inline]
    pub fn step_forward(&mut self) -> bool {
        match self.get() {
            Some(c) => {
                self.pos += c.len_utf8();
                true
            }
            None => false,
        }
    }

    /// Moves back one code point. Returns false at the start.
    #[inline]
    pub fn step_back(&mut self) -> bool {
        match self.text[..self.pos].chars().next_back() {
            Some(c) => {
                self.pos -= c.len_utf8();
                true
            }
            None => false,
        }
    }

    /// Moves forward up to `count` code points, stopping at the end.
    pub fn advance(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            if !self.step_forward() {
                break;
            }
        }
        self
    }

    /// Moves back up to `count` code points, stopping at the start.
    pub fn retreat(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            if !self.step_back() {
                break;
            }
        }
        self
    }

    /// Number of code points from this cursor to `other`, negative if
    /// `other` comes first.
    ///
    /// # Panics
    ///
    /// Both cursors must point into the same text.
    pub fn distance_to(&self, other: &TextCursor<'a>) -> isize {
        let count = self.slice_to(other).chars().count() as isize;
        if other.pos >= self.pos { count } else { -count }
    }

    /// Returns the text between this cursor and `other`, in either order.
    ///
    /// # Panics
    ///
    /// Both cursors must point into the same text.
    pub fn slice_to(&self, other: &TextCursor<'a>) -> &'a str {
        debug_assert!(
            std::ptr::eq(self.text, other.text),
            "cursors point into different texts"
        );
        let (start, end) = if self.pos <= other.pos {
            (self.pos, other.pos)
        } else {
            (other.pos, self.pos)
        };
        &self.text[start..end]
    }

    /// Returns the text from the cursor to the end.
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }
}

impl Iterator for TextCursor<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let c = self.get()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}

impl PartialEq for TextCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.text, other.text) && self.pos == other.pos
    }
}

impl PartialOrd for TextCursor<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        std::ptr::eq(self.text, other.text).then(|| self.pos.cmp(&other.pos))
    }
}

impl Add<usize> for TextCursor<'_> {
    type Output = Self;

    fn add(mut self, count: usize) -> Self {
        self.advance(count);
        self
    }
}

impl Sub<usize> for TextCursor<'_> {
    type Output = Self;

    fn sub(mut self, count: usize) -> Self {
        self.retreat(count);
        self
    }
}

/// `b - a` is the number of code points from `a` to `b`.
impl<'a> Sub for TextCursor<'a> {
    type Output = isize;

    fn sub(self, other: TextCursor<'a>) -> isize {
        other.distance_to(&self)
    }
}
