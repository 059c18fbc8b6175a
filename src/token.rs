#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Position, Span};

/// A token emitted by a rule.
///
/// `K` is the token kind type of the rule set that produced the token.
/// The text of a committed token is never empty.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token<K> {
    /// The lexical category of the token.
    kind: K,
    /// The matched text.
    text: String,
    /// The byte range of the token in the input.
    span: Span,
    /// The position of the first character of the token.
    position: Position,
}

impl<K> Token<K> {
    pub(crate) fn new(kind: K, text: String, span: Span, position: Position) -> Self {
        debug_assert!(!text.is_empty(), "a token must not be empty");
        Self {
            kind,
            text,
            span,
            position,
        }
    }

    /// Get the kind of the token.
    #[inline]
    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// Get the matched text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the byte range of the token.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the position of the first character.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Get the 1-based line of the first character.
    #[inline]
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// Get the 1-based column of the first character.
    #[inline]
    pub fn column(&self) -> usize {
        self.position.column
    }
}

/// Formats the token as `[line,column]: kind: text`.
impl<K: std::fmt::Display> std::fmt::Display for Token<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{},{}]: {}: {}",
            self.position.line, self.position.column, self.kind, self.text
        )
    }
}
