//! Rule conditions of the C rule set.
//! All of them are pure predicates over the character under the cursor.

/// ASCII letters.
#[inline]
pub fn is_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// ASCII decimal digits.
#[inline]
pub fn is_numeric(c: char) -> bool {
    c.is_ascii_digit()
}

/// ASCII letters and decimal digits.
#[inline]
pub fn is_alphanumeric(c: char) -> bool {
    is_alphabetic(c) || is_numeric(c)
}

/// The opening double quote of a string.
#[inline]
pub fn is_string_start(c: char) -> bool {
    c == '"'
}

/// The slash that may open a comment.
#[inline]
pub fn is_comment_start(c: char) -> bool {
    c == '/'
}

/// ASCII letters and underscores.
#[inline]
pub fn is_identifier_start(c: char) -> bool {
    is_alphabetic(c) || c == '_'
}

/// ASCII letters, digits and underscores.
#[inline]
pub fn is_identifier_continue(c: char) -> bool {
    is_alphanumeric(c) || c == '_'
}

/// Spaces, tabs, carriage returns and newlines.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\n' | '\t' | '\r')
}
