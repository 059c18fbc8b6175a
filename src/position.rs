//! Module with the position type and functions.
//! A position is a struct that contains a line and column number.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position in the input.
/// The position is represented by a line and column number.
/// The line and column numbers are 1-based. The column counts characters, not bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// The line number of the position.
    pub line: usize,
    /// The column number of the position.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        debug_assert!(line > 0, "line number must be greater than 0");
        debug_assert!(column > 0, "column number must be greater than 0");
        Self { line, column }
    }

    /// Get the line number of the position.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the column number of the position.
    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the position after the given character has been consumed.
    /// A newline moves to the first column of the next line, every other character moves one
    /// column to the right.
    #[inline]
    pub(crate) fn advanced_by(self, c: char) -> Self {
        if c == '\n' {
            Self {
                line: self.line + 1,
                column: 1,
            }
        } else {
            Self {
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line: {}, column: {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() {
        let pos = Position::new(1, 1);
        assert_eq!(pos.line(), 1);
        assert_eq!(pos.column(), 1);
        assert_eq!(format!("{}", pos), "line: 1, column: 1");
        assert_eq!(Position::default(), pos);
    }

    #[test]
    fn test_advanced_by() {
        let pos = Position::default().advanced_by('a').advanced_by(' ');
        assert_eq!(pos, Position::new(1, 3));
        let pos = pos.advanced_by('\n');
        assert_eq!(pos, Position::new(2, 1));
        // Carriage returns and tabs count as a single column.
        let pos = pos.advanced_by('\r').advanced_by('\t');
        assert_eq!(pos, Position::new(2, 3));
    }
}
