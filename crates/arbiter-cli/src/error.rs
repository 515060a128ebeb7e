//! Input boundary errors.

/// Errors from parsing a player's move input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The line does not contain exactly four square characters.
    #[error("expected a move like \"e2 e4\", got {found:?}")]
    MalformedMove {
        /// The offending line.
        found: String,
    },
    /// A square token failed algebraic parsing.
    #[error("invalid square {token:?}: {source}")]
    InvalidSquare {
        /// The offending token.
        token: String,
        /// The underlying parse failure.
        source: arbiter_core::ParseSquareError,
    },
    /// Source and destination are the same square.
    #[error("source and destination are both {square}")]
    IdenticalSquares {
        /// The repeated square.
        square: arbiter_core::Square,
    },
}

#[cfg(test)]
mod tests {
    use super::InputError;

    #[test]
    fn display() {
        let err = InputError::MalformedMove {
            found: "e2".to_string(),
        };
        assert_eq!(format!("{err}"), "expected a move like \"e2 e4\", got \"e2\"");
    }
}
