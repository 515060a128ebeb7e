//! Per-kind attack generation: slider rays, fixed offset sets, and pawn
//! pushes. Everything here is a pure query over a piece and the occupancy
//! view; legality is the engine's concern.

mod king;
mod knights;
mod pawns;
mod sliders;

use crate::board::Board;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

impl Piece {
    /// The squares this piece attacks from where it stands.
    ///
    /// Sliders cast a ray per direction and stop at (but include) the
    /// first occupied square, whatever its color; whether that square may
    /// actually be captured is decided later, by the legality pipeline.
    /// King and knight use fixed offset sets filtered to the board. A pawn
    /// attacks only its two forward diagonals, never its push squares.
    pub fn attacking_squares(&self, board: &Board) -> Vec<Square> {
        match self.kind {
            PieceKind::King => king::attacks(self.square),
            PieceKind::Knight => knights::attacks(self.square),
            PieceKind::Pawn => pawns::attacks(self),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                sliders::attacks(self, board)
            }
        }
    }

    /// The full ordered ray from this piece's square to `dest`, both ends
    /// inclusive. Pure geometry, ignoring occupancy.
    ///
    /// Non-empty only for sliders, and only when `dest` lies exactly on one
    /// of the piece's ray directions. Used to test whether a check can be
    /// blocked and whether vacating a square exposes the king.
    pub fn attacking_path(&self, dest: Square) -> Vec<Square> {
        if self.kind.is_slider() {
            sliders::path(self, dest)
        } else {
            Vec::new()
        }
    }

    /// A pawn's forward, non-capturing moves: one square ahead, plus two
    /// while the pawn has not yet moved. Empty for every other kind.
    ///
    /// Occupancy of the push squares is the legality pipeline's concern.
    pub fn pawn_quiet_moves(&self) -> Vec<Square> {
        if self.kind == PieceKind::Pawn {
            pawns::quiet_moves(self)
        } else {
            Vec::new()
        }
    }

    /// Every square this piece could be asked to move to: its attacking
    /// squares, unioned with the quiet pushes for pawns. The enumeration
    /// used by stalemate and check-elimination search.
    pub fn candidate_destinations(&self, board: &Board) -> Vec<Square> {
        let mut destinations = self.attacking_squares(board);
        if self.kind == PieceKind::Pawn {
            destinations.extend(self.pawn_quiet_moves());
        }
        destinations
    }
}
