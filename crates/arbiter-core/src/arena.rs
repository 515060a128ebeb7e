//! The piece arena: slot storage with stable ids and per-side live lists.
//!
//! Captures and promotions are single arena operations; nothing else in the
//! crate holds a piece by reference, so removal can never dangle.

use crate::color::Color;
use crate::error::SetupError;
use crate::file::File;
use crate::piece::{Piece, PieceKind};
use crate::rank::Rank;
use crate::square::Square;

/// Stable identity of a piece within a [`PieceArena`].
///
/// Ids are never reused; a captured piece's slot stays dead. Promotion spawns
/// a fresh queen under a new id; the pawn's identity ends there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(u8);

impl PieceId {
    #[inline]
    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Owns every piece of a game, live or captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceArena {
    /// All slots ever allocated, indexed by [`PieceId`].
    slots: Vec<Piece>,
    /// Live piece ids per side, indexed by [`Color::index()`].
    sides: [Vec<PieceId>; Color::COUNT],
    /// The king id per side, indexed by [`Color::index()`].
    kings: [PieceId; Color::COUNT],
}

impl PieceArena {
    /// Build the standard starting arrangement: 16 pieces per side.
    pub fn standard() -> PieceArena {
        let mut pieces = Vec::with_capacity(32);
        for color in Color::ALL {
            let back = color.back_rank();
            let pawn_rank = back
                .offset(color.push_direction())
                .expect("pawn rank adjoins the back rank");
            pieces.push(Piece::new(PieceKind::King, color, Square::new(back, File::FileE)));
            pieces.push(Piece::new(PieceKind::Queen, color, Square::new(back, File::FileD)));
            pieces.push(Piece::new(PieceKind::Rook, color, Square::new(back, File::FileA)));
            pieces.push(Piece::new(PieceKind::Rook, color, Square::new(back, File::FileH)));
            pieces.push(Piece::new(PieceKind::Knight, color, Square::new(back, File::FileB)));
            pieces.push(Piece::new(PieceKind::Knight, color, Square::new(back, File::FileG)));
            pieces.push(Piece::new(PieceKind::Bishop, color, Square::new(back, File::FileC)));
            pieces.push(Piece::new(PieceKind::Bishop, color, Square::new(back, File::FileF)));
            for file in File::ALL {
                pieces.push(Piece::new(PieceKind::Pawn, color, Square::new(pawn_rank, file)));
            }
        }
        PieceArena::from_pieces(pieces).expect("standard arrangement is structurally valid")
    }

    /// Build an arena from an explicit piece list, validating structure:
    /// exactly one king per side, no shared squares, no pawns on either
    /// back rank.
    pub fn from_pieces(pieces: Vec<Piece>) -> Result<PieceArena, SetupError> {
        let mut seen = [false; Square::COUNT];
        for piece in &pieces {
            if seen[piece.square.index()] {
                return Err(SetupError::DuplicateSquare {
                    square: piece.square,
                });
            }
            seen[piece.square.index()] = true;
            if piece.kind == PieceKind::Pawn
                && matches!(piece.square.rank(), Rank::Rank1 | Rank::Rank8)
            {
                return Err(SetupError::PawnOnBackRank {
                    square: piece.square,
                });
            }
        }

        for color in Color::ALL {
            let count = pieces
                .iter()
                .filter(|p| p.kind == PieceKind::King && p.color == color)
                .count();
            if count != 1 {
                return Err(SetupError::InvalidKingCount { color, count });
            }
        }

        let mut sides = [Vec::new(), Vec::new()];
        let mut kings = [PieceId(0); Color::COUNT];
        for (index, piece) in pieces.iter().enumerate() {
            let id = PieceId(index as u8);
            sides[piece.color.index()].push(id);
            if piece.kind == PieceKind::King {
                kings[piece.color.index()] = id;
            }
        }

        Ok(PieceArena {
            slots: pieces,
            sides,
            kings,
        })
    }

    /// Return the piece for an id.
    ///
    /// # Panics
    ///
    /// Panics if the slot is dead: callers must only hold live ids.
    pub fn get(&self, id: PieceId) -> &Piece {
        let piece = &self.slots[id.as_usize()];
        assert!(piece.alive, "piece id {id:?} refers to a captured piece");
        piece
    }

    /// Return the king id for a side.
    #[inline]
    pub fn king(&self, color: Color) -> PieceId {
        self.kings[color.index()]
    }

    /// Iterate over the live piece ids of one side.
    pub fn side(&self, color: Color) -> impl Iterator<Item = PieceId> + '_ {
        self.sides[color.index()].iter().copied()
    }

    /// Iterate over all live pieces with their ids.
    pub fn live_pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, piece)| piece.alive)
            .map(|(index, piece)| (PieceId(index as u8), piece))
    }

    /// Move a live piece to `dest` and mark it as having moved.
    pub(crate) fn relocate(&mut self, id: PieceId, dest: Square) {
        let piece = &mut self.slots[id.as_usize()];
        assert!(piece.alive, "relocating a captured piece");
        piece.square = dest;
        piece.has_moved = true;
    }

    /// Remove a captured piece from play.
    ///
    /// # Panics
    ///
    /// Panics if the piece is already dead or is a king; capturing a king
    /// means an illegal move slipped past validation.
    pub(crate) fn capture(&mut self, id: PieceId) {
        let piece = &mut self.slots[id.as_usize()];
        assert!(piece.alive, "capturing an already-captured piece");
        assert!(piece.kind != PieceKind::King, "a king can never be captured");
        piece.alive = false;
        let list = &mut self.sides[piece.color.index()];
        let position = list
            .iter()
            .position(|&other| other == id)
            .expect("live piece is listed on its side");
        list.swap_remove(position);
    }

    /// Replace a pawn on its promotion rank with a fresh queen on the same
    /// square. Returns the queen's id; the pawn's slot is dead afterwards.
    ///
    /// # Panics
    ///
    /// Panics if the piece is not a live pawn standing on its promotion rank.
    pub(crate) fn promote_to_queen(&mut self, id: PieceId) -> PieceId {
        let pawn = *self.get(id);
        assert!(pawn.kind == PieceKind::Pawn, "only pawns promote");
        assert!(
            pawn.square.rank() == pawn.color.promotion_rank(),
            "promotion away from the farthest rank"
        );

        self.slots[id.as_usize()].alive = false;
        let list = &mut self.sides[pawn.color.index()];
        let position = list
            .iter()
            .position(|&other| other == id)
            .expect("live pawn is listed on its side");
        list.swap_remove(position);

        let queen_id = PieceId(self.slots.len() as u8);
        let mut queen = Piece::new(PieceKind::Queen, pawn.color, pawn.square);
        queen.has_moved = true;
        self.slots.push(queen);
        self.sides[pawn.color.index()].push(queen_id);
        queen_id
    }
}

#[cfg(test)]
mod tests {
    use super::PieceArena;
    use crate::color::Color;
    use crate::error::SetupError;
    use crate::piece::{Piece, PieceKind};
    use crate::square::Square;

    #[test]
    fn standard_setup_counts() {
        let arena = PieceArena::standard();
        assert_eq!(arena.side(Color::White).count(), 16);
        assert_eq!(arena.side(Color::Black).count(), 16);
        assert_eq!(arena.get(arena.king(Color::White)).square, Square::E1);
        assert_eq!(arena.get(arena.king(Color::Black)).square, Square::E8);
    }

    #[test]
    fn capture_removes_from_side() {
        let mut arena = PieceArena::standard();
        let (pawn_id, _) = arena
            .live_pieces()
            .find(|(_, p)| p.square == Square::E2)
            .unwrap();
        arena.capture(pawn_id);
        assert_eq!(arena.side(Color::White).count(), 15);
        assert!(arena.live_pieces().all(|(_, p)| p.square != Square::E2));
    }

    #[test]
    fn relocate_sets_has_moved() {
        let mut arena = PieceArena::standard();
        let (knight_id, _) = arena
            .live_pieces()
            .find(|(_, p)| p.square == Square::G1)
            .unwrap();
        arena.relocate(knight_id, Square::F3);
        let knight = arena.get(knight_id);
        assert_eq!(knight.square, Square::F3);
        assert!(knight.has_moved);
    }

    #[test]
    fn promotion_changes_identity() {
        let mut arena = PieceArena::from_pieces(vec![
            Piece::new(PieceKind::King, Color::White, Square::E1),
            Piece::new(PieceKind::King, Color::Black, Square::H1),
            Piece::new(PieceKind::Pawn, Color::White, Square::A7),
        ])
        .unwrap();
        let (pawn_id, _) = arena
            .live_pieces()
            .find(|(_, p)| p.kind == PieceKind::Pawn)
            .unwrap();
        arena.relocate(pawn_id, Square::A8);
        let queen_id = arena.promote_to_queen(pawn_id);
        assert_ne!(queen_id, pawn_id);
        let queen = arena.get(queen_id);
        assert_eq!(queen.kind, PieceKind::Queen);
        assert_eq!(queen.color, Color::White);
        assert_eq!(queen.square, Square::A8);
        assert_eq!(arena.side(Color::White).count(), 2);
    }

    #[test]
    fn setup_rejects_missing_king() {
        let result = PieceArena::from_pieces(vec![Piece::new(
            PieceKind::King,
            Color::White,
            Square::E1,
        )]);
        assert_eq!(
            result.unwrap_err(),
            SetupError::InvalidKingCount {
                color: Color::Black,
                count: 0
            }
        );
    }

    #[test]
    fn setup_rejects_shared_square() {
        let result = PieceArena::from_pieces(vec![
            Piece::new(PieceKind::King, Color::White, Square::E1),
            Piece::new(PieceKind::Queen, Color::White, Square::E1),
        ]);
        assert_eq!(
            result.unwrap_err(),
            SetupError::DuplicateSquare { square: Square::E1 }
        );
    }

    #[test]
    fn setup_rejects_pawn_on_back_rank() {
        let result = PieceArena::from_pieces(vec![
            Piece::new(PieceKind::King, Color::White, Square::E1),
            Piece::new(PieceKind::King, Color::Black, Square::E8),
            Piece::new(PieceKind::Pawn, Color::White, Square::D8),
        ]);
        assert_eq!(
            result.unwrap_err(),
            SetupError::PawnOnBackRank { square: Square::D8 }
        );
    }
}
