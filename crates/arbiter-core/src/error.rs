//! Error types for the input boundary and position setup validation.

use crate::color::Color;
use crate::square::Square;

/// Errors from parsing algebraic square notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseSquareError {
    /// The input is not exactly two characters.
    #[error("expected two characters like \"e4\", got {found:?}")]
    WrongLength {
        /// The offending input.
        found: String,
    },
    /// The file character is not in `a..h`.
    #[error("file must be a..h, got '{character}'")]
    InvalidFile {
        /// The offending character.
        character: char,
    },
    /// The rank character is not in `1..8`.
    #[error("rank must be 1..8, got '{character}'")]
    InvalidRank {
        /// The offending character.
        character: char,
    },
}

/// Errors from structural validation of an explicit piece setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: Color,
        /// Number of kings found.
        count: usize,
    },
    /// Two pieces claim the same square.
    #[error("two pieces share {square}")]
    DuplicateSquare {
        /// The contested square.
        square: Square,
    },
    /// A pawn is placed on the first or eighth rank.
    #[error("pawn placed on back rank at {square}")]
    PawnOnBackRank {
        /// The pawn's square.
        square: Square,
    },
}

#[cfg(test)]
mod tests {
    use super::{ParseSquareError, SetupError};
    use crate::color::Color;
    use crate::square::Square;

    #[test]
    fn parse_error_display() {
        let err = ParseSquareError::InvalidFile { character: 'x' };
        assert_eq!(format!("{err}"), "file must be a..h, got 'x'");
    }

    #[test]
    fn setup_error_display() {
        let err = SetupError::InvalidKingCount {
            color: Color::White,
            count: 0,
        };
        assert_eq!(format!("{err}"), "expected 1 king for white, found 0");
        let err = SetupError::DuplicateSquare { square: Square::E4 };
        assert_eq!(format!("{err}"), "two pieces share e4");
    }
}
