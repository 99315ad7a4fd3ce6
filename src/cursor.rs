//! Byte cursor for speculative grammar matching.
//!
//! The cursor is `Copy`: a matcher takes it by value, advances its own copy,
//! and returns the advanced cursor on success. A failed alternative is
//! abandoned simply by dropping the copy, so the scanner never needs to
//! rewind shared state. All scan position lives here, never in a global.

/// A cursor over the input bytes.
///
/// # Example
/// ```
/// use ferrolink::cursor::Cursor;
///
/// let mut cursor = Cursor::new(b"hello world");
/// cursor.advance(6);
/// assert_eq!(cursor.peek(), Some(b'w'));
/// assert_eq!(cursor.offset(), 6);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of the input.
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Create a cursor at a byte offset.
    #[inline]
    pub fn new_at(input: &'a [u8], offset: usize) -> Self {
        debug_assert!(offset <= input.len());
        Self { input, pos: offset }
    }

    /// Current offset from the start of the input.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Number of bytes remaining.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Check if the cursor is at end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Peek the current byte without advancing.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Peek at the byte n positions ahead.
    #[inline]
    pub fn peek_ahead(&self, n: usize) -> Option<u8> {
        self.input.get(self.pos + n).copied()
    }

    /// Advance by one byte.
    #[inline]
    pub fn bump(&mut self) {
        debug_assert!(!self.is_eof());
        self.pos += 1;
    }

    /// Advance by n bytes.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.pos += n;
    }

    /// Consume a specific byte if present.
    #[inline]
    pub fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a byte sequence if present, ignoring ASCII case.
    #[inline]
    pub fn eat_ignore_ascii_case(&mut self, bytes: &[u8]) -> bool {
        let Some(slice) = self.input.get(self.pos..self.pos + bytes.len()) else {
            return false;
        };
        if slice.eq_ignore_ascii_case(bytes) {
            self.pos += bytes.len();
            true
        } else {
            false
        }
    }

    /// Advance while the predicate holds, returning the number of bytes consumed.
    #[inline]
    pub fn skip_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !predicate(b) {
                break;
            }
            self.pos += 1;
        }
        self.pos - start
    }

    /// The bytes from the current position to end of input.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }
}
