//! The board: a derived occupancy view over the piece arena.
//!
//! The board never stores piece state of its own. It is an index rebuilt
//! from the arena after every committed move, so occupancy always equals
//! the union of the live pieces' squares.

use crate::arena::{PieceArena, PieceId};
use crate::square::Square;

/// Occupancy index: which piece, if any, stands on each square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<PieceId>; Square::COUNT],
}

impl Board {
    /// Build the occupancy index for the arena's current piece positions.
    ///
    /// # Panics
    ///
    /// Panics if two live pieces claim the same square: a broken engine
    /// invariant, not a recoverable condition.
    pub fn from_arena(arena: &PieceArena) -> Board {
        let mut squares = [None; Square::COUNT];
        for (id, piece) in arena.live_pieces() {
            let slot = &mut squares[piece.square.index()];
            assert!(
                slot.is_none(),
                "two live pieces claim {}",
                piece.square
            );
            *slot = Some(id);
        }
        Board { squares }
    }

    /// Return the id of the piece on the given square, if any.
    #[inline]
    pub fn id_on(&self, square: Square) -> Option<PieceId> {
        self.squares[square.index()]
    }

    /// Return `true` if the given square is occupied.
    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.squares[square.index()].is_some()
    }

    /// Return `true` if this view matches the arena square-for-square.
    pub fn is_consistent_with(&self, arena: &PieceArena) -> bool {
        let rebuilt = Board::from_arena(arena);
        *self == rebuilt
    }
}
