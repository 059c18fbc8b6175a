//! Module with the cursor handed to rule consumers.
//!
//! A consumer never touches the scan context directly. It walks a [`Cursor`] over the input,
//! which keeps the byte offset, line and column in step. When the consumer returns, the engine
//! either takes over the cursor's position (commit) or throws the cursor away (decline).

use std::borrow::Cow;

use crate::{source::Haystack, Position, Span};

/// A saved cursor location: a byte offset together with its line and column.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Mark {
    offset: usize,
    position: Position,
}

impl Mark {
    pub(crate) fn new(offset: usize, position: Position) -> Self {
        Self { offset, position }
    }

    /// Get the byte offset of the mark.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get the line and column of the mark.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }
}

/// A rewindable cursor over the input of a scan.
///
/// The cursor starts on the character the rule's condition accepted. It can never be moved
/// before that character.
pub struct Cursor<'a> {
    haystack: &'a mut dyn Haystack,
    start: Mark,
    current: Mark,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(haystack: &'a mut dyn Haystack, start: Mark) -> Self {
        Self {
            haystack,
            start,
            current: start,
        }
    }

    /// Returns the character under the cursor without consuming it.
    #[inline]
    pub fn peek(&mut self) -> Option<char> {
        self.haystack.char_at(self.current.offset)
    }

    /// Returns the character `n` characters after the cursor without consuming anything.
    /// `peek_nth(0)` is the same as `peek()`.
    pub fn peek_nth(&mut self, n: usize) -> Option<char> {
        let mut offset = self.current.offset;
        for _ in 0..n {
            offset += self.haystack.char_at(offset)?.len_utf8();
        }
        self.haystack.char_at(offset)
    }

    /// Consumes the character under the cursor and returns it.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current = Mark::new(
            self.current.offset + c.len_utf8(),
            self.current.position.advanced_by(c),
        );
        Some(c)
    }

    /// Consumes the character under the cursor if it equals `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes characters as long as the predicate holds and returns their number.
    pub fn eat_while<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(char) -> bool,
    {
        let mut count = 0;
        while self.peek().is_some_and(&predicate) {
            self.bump();
            count += 1;
        }
        count
    }

    /// Returns the current location for a later [`Cursor::rewind`].
    #[inline]
    pub fn mark(&self) -> Mark {
        self.current
    }

    /// Moves the cursor back to a location returned by [`Cursor::mark`].
    /// Marks before the start of the attempt are clamped to the start.
    pub fn rewind(&mut self, mark: Mark) {
        debug_assert!(
            mark.offset >= self.start.offset,
            "cannot rewind before the start of the attempt"
        );
        self.current = if mark.offset < self.start.offset {
            self.start
        } else {
            mark
        };
    }

    /// Moves the cursor back to where the attempt started.
    #[inline]
    pub fn reset(&mut self) {
        self.current = self.start;
    }

    /// Get the location where the attempt started.
    #[inline]
    pub fn start(&self) -> Mark {
        self.start
    }

    /// Get the line and column of the cursor.
    #[inline]
    pub fn position(&self) -> Position {
        self.current.position
    }

    /// Get the byte offset of the cursor.
    #[inline]
    pub fn offset(&self) -> usize {
        self.current.offset
    }

    /// Get the number of bytes consumed since the start of the attempt.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.current.offset - self.start.offset
    }

    /// Get the span consumed since the start of the attempt.
    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.start.offset, self.current.offset)
    }

    /// Get the text consumed since the start of the attempt.
    pub fn lexeme(&self) -> Cow<'_, str> {
        self.haystack.text(self.span())
    }
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("start", &self.start)
            .field("current", &self.current)
            .finish()
    }
}
