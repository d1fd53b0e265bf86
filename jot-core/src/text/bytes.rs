use std::ops::Range;

use gapbuf::GapBuffer;

use super::Change;

/// A position in the [`Text`], in lines and `char` columns
///
/// [`Text`]: super::Text
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Point {
    /// The line, starting at `0`
    pub line: usize,
    /// The column, in `char`s from the start of the line
    pub col: usize,
}

impl Point {
    /// Returns a new [`Point`]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// The bytes of a [`Text`], encoded in UTF-8
///
/// Every modification goes through [`Bytes::apply`] with `&str`
/// edits on `char` boundaries, so the two halves of the
/// [`GapBuffer`] are always valid UTF-8 when split at the gap.
///
/// [`Text`]: super::Text
#[derive(Default, Clone)]
pub struct Bytes {
    buf: GapBuffer<u8>,
}

impl Bytes {
    /// Returns a new instance of [`Bytes`]
    pub fn new(string: &str) -> Self {
        Self { buf: GapBuffer::from_iter(string.bytes()) }
    }

    ////////// Querying functions

    /// The length in bytes
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether there are no bytes at all
    pub fn is_empty(&self) -> bool {
        self.buf.len() == 0
    }

    /// The two `&str`s within a byte range
    ///
    /// The reason why this function returns two strings is that the
    /// contents are stored in a [`GapBuffer`], which works with two
    /// slices. The range is clamped to the length of the buffer.
    ///
    /// # Panics
    ///
    /// Panics if the range doesn't start or end on a `char`
    /// boundary.
    #[track_caller]
    pub fn strs(&self, range: Range<usize>) -> [&str; 2] {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        let (s0, s1) = self.buf.range(start..end).as_slices();
        [to_str(s0), to_str(s1)]
    }

    /// The number of lines, which is always at least `1`
    pub fn line_count(&self) -> usize {
        self.buf.iter().filter(|b| **b == b'\n').count() + 1
    }

    /// The byte range of a line, not including its `'\n'`
    ///
    /// If the line is past the end, returns an empty range at the
    /// end of the buffer.
    pub fn line_range(&self, line: usize) -> Range<usize> {
        let mut start = 0;
        let mut cur_line = 0;
        for (i, b) in self.buf.iter().enumerate() {
            if *b == b'\n' {
                if cur_line == line {
                    return start..i;
                }
                cur_line += 1;
                start = i + 1;
            }
        }

        if cur_line == line {
            start..self.len()
        } else {
            self.len()..self.len()
        }
    }

    /// The [`Point`] at a given byte
    pub fn point_at(&self, byte: usize) -> Point {
        let byte = byte.min(self.len());
        let [s0, s1] = self.strs(0..byte);

        let mut point = Point::default();
        for char in s0.chars().chain(s1.chars()) {
            if char == '\n' {
                point.line += 1;
                point.col = 0;
            } else {
                point.col += 1;
            }
        }

        point
    }

    /// The byte at a given line and column
    ///
    /// The column is clamped to the end of the line, and the line is
    /// clamped to the last line.
    pub fn byte_at(&self, line: usize, col: usize) -> usize {
        let line = line.min(self.line_count() - 1);
        let range = self.line_range(line);
        let [s0, s1] = self.strs(range.clone());

        let mut byte = range.start;
        for char in s0.chars().chain(s1.chars()).take(col) {
            byte += char.len_utf8();
        }

        byte
    }

    /// The `char` that ends at the given byte, if there is one
    pub fn char_before(&self, byte: usize) -> Option<char> {
        let start = byte.min(self.len()).saturating_sub(4);
        let start = (start..byte).find(|b| self.is_char_boundary(*b))?;
        let [s0, s1] = self.strs(start..byte);
        s0.chars().chain(s1.chars()).next_back()
    }

    /// The `char` that starts at the given byte, if there is one
    pub fn char_after(&self, byte: usize) -> Option<char> {
        let end = (byte + 4).min(self.len());
        let end = (byte + 1..=end).find(|b| self.is_char_boundary(*b))?;
        let [s0, s1] = self.strs(byte..end);
        s0.chars().chain(s1.chars()).next()
    }

    /// Whether the byte is on a `char` boundary
    ///
    /// The start and end of the buffer are boundaries.
    pub fn is_char_boundary(&self, byte: usize) -> bool {
        match self.buf.get(byte) {
            // Continuation bytes are of the form 0b10xx_xxxx.
            Some(b) => (*b as i8) >= -0x40,
            None => byte == self.len(),
        }
    }

    ////////// Modification functions

    /// Applies a [`Change`] to the [`GapBuffer`] within
    pub(crate) fn apply(&mut self, change: &Change) {
        let range = change.start()..change.taken_end();
        self.buf.splice(range, change.added().bytes());
    }
}

impl std::fmt::Display for Bytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [s0, s1] = self.strs(0..self.len());
        write!(f, "{s0}{s1}")
    }
}

impl std::fmt::Debug for Bytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Bytes").field(&self.to_string()).finish()
    }
}

impl PartialEq<&str> for Bytes {
    fn eq(&self, other: &&str) -> bool {
        let [s0, s1] = self.strs(0..self.len());
        other.len() == s0.len() + s1.len() && other.starts_with(s0) && other.ends_with(s1)
    }
}

#[track_caller]
fn to_str(slice: &[u8]) -> &str {
    std::str::from_utf8(slice).unwrap_or_else(|err| panic!("range not on char boundary: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_and_points() {
        let bytes = Bytes::new("one\ntwo\n\nçé");

        assert_eq!(bytes.line_count(), 4);
        assert_eq!(bytes.line_range(1), 4..7);
        assert_eq!(bytes.line_range(2), 8..8);
        assert_eq!(bytes.line_range(3), 9..13);
        assert_eq!(bytes.line_range(7), 13..13);

        assert_eq!(bytes.point_at(5), Point::new(1, 1));
        assert_eq!(bytes.point_at(13), Point::new(3, 2));
        assert_eq!(bytes.byte_at(3, 1), 11);
        assert_eq!(bytes.byte_at(0, 99), 3);
        assert_eq!(bytes.byte_at(99, 0), 9);
    }

    #[test]
    fn chars_around_multibyte_boundaries() {
        let bytes = Bytes::new("aé€");

        assert_eq!(bytes.char_after(0), Some('a'));
        assert_eq!(bytes.char_after(1), Some('é'));
        assert_eq!(bytes.char_before(3), Some('é'));
        assert_eq!(bytes.char_before(6), Some('€'));
        assert_eq!(bytes.char_before(0), None);
        assert_eq!(bytes.char_after(6), None);
        assert!(!bytes.is_char_boundary(2));
    }

    #[test]
    fn applying_changes_across_the_gap() {
        let mut bytes = Bytes::new("hello world");

        bytes.apply(&Change::new(5, "", ","));
        bytes.apply(&Change::new(0, "hello", "goodbye"));
        assert!(bytes == "goodbye, world");

        let [s0, s1] = bytes.strs(3..10);
        assert_eq!(format!("{s0}{s1}"), "dbye, w");
        assert_eq!(bytes.to_string(), "goodbye, world");
    }
}
