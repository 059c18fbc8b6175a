//! Rule consumers of the C rule set.
//!
//! Every consumer walks the cursor forward over its candidate token and either reports what it
//! found or declines. A declining consumer does not need to move the cursor back.

use super::{
    conditions::{is_identifier_continue, is_numeric, is_whitespace},
    CTokenKind, Tables,
};
use crate::{Attempt, Cursor};

/// Consumes a double quoted string that ends on the same line.
/// A backslash escapes the following character. Declines on a newline or the end of the input
/// before the closing quote.
pub fn consume_string(cursor: &mut Cursor<'_>, first: char) -> Attempt<CTokenKind> {
    if first != '"' || !cursor.eat('"') {
        return Attempt::Decline;
    }
    loop {
        match cursor.bump() {
            Some('"') => return Attempt::Token(CTokenKind::StringLiteral),
            Some('\\') => {
                if cursor.peek().is_some_and(|c| c != '\n') {
                    cursor.bump();
                }
            }
            Some('\n') | None => return Attempt::Decline,
            Some(_) => {}
        }
    }
}

/// Consumes a `//` line comment up to the newline or a `/* */` block comment.
/// Declines if the slash does not start a comment or a block comment is never closed.
///
/// An unclosed block comment is only detected at the end of the input, and every `/*` that
/// follows it reads the rest of the input again. Input with many unclosed `/*` is therefore
/// scanned in quadratic time.
pub(crate) fn consume_comment(
    cursor: &mut Cursor<'_>,
    first: char,
    emit_comments: bool,
) -> Attempt<CTokenKind> {
    if first != '/' || !cursor.eat('/') {
        return Attempt::Decline;
    }
    let closed = match cursor.bump() {
        Some('/') => {
            cursor.eat_while(|c| c != '\n');
            true
        }
        Some('*') => loop {
            match cursor.bump() {
                Some('*') => {
                    if cursor.eat('/') {
                        break true;
                    }
                }
                Some(_) => {}
                None => break false,
            }
        },
        _ => false,
    };
    match (closed, emit_comments) {
        (false, _) => Attempt::Decline,
        (true, true) => Attempt::Token(CTokenKind::Comment),
        (true, false) => Attempt::Skip,
    }
}

/// Consumes an integer or a float with a fractional part.
/// A period that is not followed by a digit is left for the next token.
pub fn consume_number(cursor: &mut Cursor<'_>, _first: char) -> Attempt<CTokenKind> {
    if cursor.eat_while(is_numeric) == 0 {
        return Attempt::Decline;
    }
    if cursor.peek() == Some('.') && cursor.peek_nth(1).is_some_and(is_numeric) {
        cursor.bump();
        cursor.eat_while(is_numeric);
        Attempt::Token(CTokenKind::Float)
    } else {
        Attempt::Token(CTokenKind::Integer)
    }
}

/// Consumes an identifier and reclassifies it if it is a keyword.
/// Declines on a run of underscores without any letter or digit.
pub(crate) fn consume_identifier(
    cursor: &mut Cursor<'_>,
    _first: char,
    tables: &Tables,
) -> Attempt<CTokenKind> {
    cursor.eat_while(is_identifier_continue);
    let lexeme = cursor.lexeme();
    if lexeme.chars().all(|c| c == '_') {
        return Attempt::Decline;
    }
    if tables.keywords.contains(&*lexeme) {
        Attempt::Token(CTokenKind::Keyword(lexeme.into_owned()))
    } else {
        Attempt::Token(CTokenKind::Identifier)
    }
}

/// Consumes one configured single character token.
pub(crate) fn consume_punctuation(
    cursor: &mut Cursor<'_>,
    first: char,
    tables: &Tables,
) -> Attempt<CTokenKind> {
    match tables.punctuation.get(&first) {
        Some(name) if cursor.eat(first) => Attempt::Token(CTokenKind::Punctuation(name.clone())),
        _ => Attempt::Decline,
    }
}

/// Consumes a run of whitespace without emitting a token.
pub fn consume_whitespace(cursor: &mut Cursor<'_>, _first: char) -> Attempt<CTokenKind> {
    cursor.eat_while(is_whitespace);
    Attempt::Skip
}
