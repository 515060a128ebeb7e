//! Move input parsing.

use arbiter_core::Square;

use crate::error::InputError;

/// Parse a single line of player input into a source and destination square.
///
/// Accepts "e2 e4" and "e2e4" alike: whitespace is insignificant, but the
/// line must contain exactly four square characters. Identical source and
/// destination are rejected here, before the rules engine is consulted.
pub fn parse_move_line(line: &str) -> Result<(Square, Square), InputError> {
    let compact: String = line.split_whitespace().collect();
    if compact.len() != 4 {
        return Err(InputError::MalformedMove {
            found: line.trim().to_string(),
        });
    }

    let (source_token, dest_token) = compact.split_at(2);
    let source = parse_square(source_token)?;
    let dest = parse_square(dest_token)?;
    if source == dest {
        return Err(InputError::IdenticalSquares { square: source });
    }
    Ok((source, dest))
}

fn parse_square(token: &str) -> Result<Square, InputError> {
    Square::from_algebraic(token).map_err(|source| InputError::InvalidSquare {
        token: token.to_string(),
        source,
    })
}
