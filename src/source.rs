//! Module with the input sources a scan can run over.
//!
//! A scan either runs over an in-memory string or over a readable byte stream. Both are accessed
//! by the engine through the [`Haystack`] trait, so rules are written once and behave the same
//! for both kinds of input.

use std::{borrow::Cow, io::Read};

use log::trace;

use crate::{Span, TokaError, TokaErrorKind};

/// The number of bytes read from a stream at once.
pub(crate) const CHUNK_SIZE: usize = 8 * 1024;

/// The input of a scan.
pub enum Source<'s> {
    /// An in-memory input.
    Text(&'s str),
    /// A readable byte stream. The stream must contain UTF-8 encoded text.
    Reader(Box<dyn Read + 's>),
}

impl<'s> From<&'s str> for Source<'s> {
    fn from(text: &'s str) -> Self {
        Source::Text(text)
    }
}

impl std::fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Source::Reader(_) => f.debug_tuple("Reader").finish_non_exhaustive(),
        }
    }
}

/// Character level access to the input of a scan.
///
/// Offsets are byte offsets from the start of the input and always lie on character boundaries.
pub(crate) trait Haystack {
    /// Returns the character that starts at the given offset or `None` at the end of the input.
    fn char_at(&mut self, offset: usize) -> Option<char>;

    /// Returns the text in the given span. The span must have been read before.
    fn text(&self, span: Span) -> Cow<'_, str>;

    /// Signals that offsets below the given one are never requested again.
    fn release(&mut self, offset: usize);

    /// Takes the error that cut the input short, if any.
    fn take_error(&mut self) -> Option<TokaError>;
}

/// A haystack over an in-memory string.
#[derive(Debug)]
pub(crate) struct TextHaystack<'h> {
    input: &'h str,
}

impl<'h> TextHaystack<'h> {
    pub(crate) fn new(input: &'h str) -> Self {
        Self { input }
    }
}

impl Haystack for TextHaystack<'_> {
    #[inline]
    fn char_at(&mut self, offset: usize) -> Option<char> {
        self.input.get(offset..)?.chars().next()
    }

    fn text(&self, span: Span) -> Cow<'_, str> {
        self.input
            .get(span.range())
            .map(Cow::Borrowed)
            .unwrap_or_default()
    }

    fn release(&mut self, _offset: usize) {}

    fn take_error(&mut self) -> Option<TokaError> {
        None
    }
}

/// A haystack over a byte stream.
///
/// The stream is read lazily in chunks of [`CHUNK_SIZE`] bytes. Bytes that lie before a released
/// offset are dropped once at least one chunk of them has accumulated.
pub(crate) struct StreamHaystack<R> {
    reader: R,
    // The bytes read so far and not yet released.
    buffer: Vec<u8>,
    // The offset of the first byte in the buffer.
    base: usize,
    eof: bool,
    error: Option<TokaError>,
}

impl<R: Read> StreamHaystack<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            base: 0,
            eof: false,
            error: None,
        }
    }

    // Reads from the stream until the buffer reaches the given offset. Returns false if the
    // stream ended or failed before.
    fn fill_to(&mut self, end: usize) -> bool {
        while self.base + self.buffer.len() < end {
            if self.eof || self.error.is_some() {
                return false;
            }
            match self
                .reader
                .by_ref()
                .take(CHUNK_SIZE as u64)
                .read_to_end(&mut self.buffer)
            {
                Ok(0) => self.eof = true,
                Ok(n) => trace!("Read {} bytes at offset {}", n, self.base),
                Err(e) => self.error = Some(e.into()),
            }
        }
        true
    }

    fn invalid_utf8(&mut self, offset: usize) {
        if self.error.is_none() {
            self.error = Some(TokaError::new(TokaErrorKind::InvalidUtf8(offset)));
        }
    }
}

impl<R: Read> Haystack for StreamHaystack<R> {
    fn char_at(&mut self, offset: usize) -> Option<char> {
        if offset < self.base || !self.fill_to(offset + 1) {
            return None;
        }
        let start = offset - self.base;
        let width = utf8_width(self.buffer[start]);
        if width == 0 || !self.fill_to(offset + width) {
            self.invalid_utf8(offset);
            return None;
        }
        match std::str::from_utf8(&self.buffer[start..start + width]) {
            Ok(s) => s.chars().next(),
            Err(_) => {
                self.invalid_utf8(offset);
                None
            }
        }
    }

    fn text(&self, span: Span) -> Cow<'_, str> {
        debug_assert!(span.start >= self.base, "span was already released");
        span.start
            .checked_sub(self.base)
            .and_then(|start| self.buffer.get(start..start + span.len()))
            .map(String::from_utf8_lossy)
            .unwrap_or_default()
    }

    fn release(&mut self, offset: usize) {
        let consumed = offset.saturating_sub(self.base);
        if consumed >= CHUNK_SIZE && consumed <= self.buffer.len() {
            self.buffer.drain(..consumed);
            self.base = offset;
        }
    }

    fn take_error(&mut self) -> Option<TokaError> {
        self.error.take()
    }
}

impl<R> std::fmt::Debug for StreamHaystack<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHaystack")
            .field("base", &self.base)
            .field("buffered", &self.buffer.len())
            .field("eof", &self.eof)
            .finish()
    }
}

// The length of the UTF-8 sequence introduced by the given byte, 0 if the byte cannot start one.
#[inline]
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}
