use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The token kinds of the C rule set.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CTokenKind {
    /// A single character token, carrying its configured name, e.g. `SEMICOLON`.
    Punctuation(String),
    /// An identifier that is a configured keyword, carrying the keyword.
    Keyword(String),
    /// A double quoted string, quotes included.
    StringLiteral,
    /// A sequence of decimal digits.
    Integer,
    /// Decimal digits with a fractional part.
    Float,
    /// An identifier that is not a keyword.
    Identifier,
    /// A line or block comment. Only emitted if comments are kept.
    Comment,
}

impl CTokenKind {
    /// Check if the kind is a keyword.
    #[inline]
    pub fn is_keyword(&self) -> bool {
        matches!(self, CTokenKind::Keyword(_))
    }

    /// Returns the name of the kind as printed in token listings.
    pub fn name(&self) -> &str {
        match self {
            CTokenKind::Punctuation(name) => name,
            CTokenKind::Keyword(keyword) => keyword,
            CTokenKind::StringLiteral => "STRING_LITERAL",
            CTokenKind::Integer => "INTEGER",
            CTokenKind::Float => "FLOAT",
            CTokenKind::Identifier => "IDENTIFIER",
            CTokenKind::Comment => "COMMENT",
        }
    }
}

impl fmt::Display for CTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
