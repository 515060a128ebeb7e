//! Pawn attack and push generation.
//!
//! A pawn's attack set (the two forward diagonals) and its reachable set
//! (the forward pushes) are disjoint; full-destination enumeration unions
//! the two.

use crate::piece::Piece;
use crate::square::Square;

/// The two forward-diagonal capture targets that stay on the board.
pub(super) fn attacks(piece: &Piece) -> Vec<Square> {
    let forward = piece.color.push_direction();
    [(-1, forward), (1, forward)]
        .iter()
        .filter_map(|&(file_delta, rank_delta)| piece.square.offset(file_delta, rank_delta))
        .collect()
}

/// Forward, non-capturing moves: one square ahead, plus two squares ahead
/// while the pawn has not yet moved.
pub(super) fn quiet_moves(piece: &Piece) -> Vec<Square> {
    let forward = piece.color.push_direction();
    let mut moves = Vec::with_capacity(2);
    if let Some(single) = piece.square.offset(0, forward) {
        moves.push(single);
    }
    if !piece.has_moved
        && let Some(double) = piece.square.offset(0, forward * 2)
    {
        moves.push(double);
    }
    moves
}

#[cfg(test)]
mod tests {
    use crate::color::Color;
    use crate::piece::{Piece, PieceKind};
    use crate::square::Square;

    fn pawn(color: Color, square: Square) -> Piece {
        Piece::new(PieceKind::Pawn, color, square)
    }

    #[test]
    fn white_pawn_attacks_forward_diagonals() {
        let attacks = super::attacks(&pawn(Color::White, Square::E4));
        assert_eq!(attacks.len(), 2);
        assert!(attacks.contains(&Square::D5));
        assert!(attacks.contains(&Square::F5));
    }

    #[test]
    fn black_pawn_attacks_toward_rank_one() {
        let attacks = super::attacks(&pawn(Color::Black, Square::E4));
        assert_eq!(attacks.len(), 2);
        assert!(attacks.contains(&Square::D3));
        assert!(attacks.contains(&Square::F3));
    }

    #[test]
    fn rim_pawn_attacks_one_square() {
        let attacks = super::attacks(&pawn(Color::White, Square::A2));
        assert_eq!(attacks, vec![Square::B3]);
    }

    #[test]
    fn unmoved_pawn_pushes_one_or_two() {
        let moves = super::quiet_moves(&pawn(Color::White, Square::E2));
        assert_eq!(moves, vec![Square::E3, Square::E4]);
    }

    #[test]
    fn moved_pawn_pushes_one() {
        let mut piece = pawn(Color::Black, Square::E5);
        piece.has_moved = true;
        assert_eq!(super::quiet_moves(&piece), vec![Square::E4]);
    }
}
