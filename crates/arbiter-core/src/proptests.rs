//! Property-based invariants: attack-ray geometry over random positions,
//! pin rejection, and king safety along random game walks.

use proptest::prelude::*;

use crate::chess_move::Classification;
use crate::color::Color;
use crate::engine::{Engine, PieceSpec};
use crate::file::File;
use crate::piece::{Piece, PieceKind};
use crate::rank::Rank;
use crate::square::Square;

fn sq(index: u8) -> Square {
    Square::from_index(index).expect("index is 0..64")
}

const NON_KING_KINDS: [PieceKind; 5] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

/// A structurally valid random setup: one king per side plus a handful of
/// other pieces, all on distinct squares, pawns kept off the back ranks.
fn arbitrary_setup() -> impl Strategy<Value = Vec<PieceSpec>> {
    prop::collection::hash_set(0u8..64, 3..14).prop_flat_map(|squares| {
        let squares: Vec<u8> = squares.into_iter().collect();
        let extras = squares.len() - 2;
        (
            Just(squares),
            prop::collection::vec((0usize..NON_KING_KINDS.len(), any::<bool>()), extras),
        )
            .prop_map(|(squares, extras)| {
                let mut pieces = vec![
                    PieceSpec::moved(PieceKind::King, Color::White, sq(squares[0])),
                    PieceSpec::moved(PieceKind::King, Color::Black, sq(squares[1])),
                ];
                for (&index, &(kind_index, is_white)) in squares[2..].iter().zip(extras.iter()) {
                    let square = sq(index);
                    let mut kind = NON_KING_KINDS[kind_index];
                    if kind == PieceKind::Pawn
                        && matches!(square.rank(), Rank::Rank1 | Rank::Rank8)
                    {
                        kind = PieceKind::Knight;
                    }
                    let color = if is_white { Color::White } else { Color::Black };
                    pieces.push(PieceSpec::moved(kind, color, square));
                }
                pieces
            })
    })
}

/// Every legal (source, dest, classification) for `color`, by exhaustive
/// candidate enumeration. Castling is not offered here; the walk does not
/// need it.
fn legal_moves(engine: &Engine, color: Color) -> Vec<(Square, Square, Classification)> {
    let mut moves = Vec::new();
    for id in engine.arena.side(color) {
        let piece = engine.arena.get(id);
        for dest in piece.candidate_destinations(&engine.board) {
            if let Some(classification) = engine.validate_move(piece.square, dest) {
                moves.push((piece.square, dest, classification));
            }
        }
    }
    moves
}

proptest! {
    #[test]
    fn no_piece_attacks_its_own_square(pieces in arbitrary_setup()) {
        let engine = Engine::from_setup(pieces).expect("setup is structurally valid");
        for (_, piece) in engine.arena.live_pieces() {
            prop_assert!(!piece.attacking_squares(&engine.board).contains(&piece.square));
        }
    }

    #[test]
    fn slider_rays_stop_at_the_first_blocker(pieces in arbitrary_setup()) {
        let engine = Engine::from_setup(pieces).expect("setup is structurally valid");
        for (_, piece) in engine.arena.live_pieces() {
            if !piece.kind.is_slider() {
                continue;
            }
            for target in piece.attacking_squares(&engine.board) {
                // The target itself may be occupied (the blocker is seen),
                // but everything strictly before it must be empty.
                let path = piece.attacking_path(target);
                prop_assert!(!path.is_empty());
                for &between in &path[1..path.len() - 1] {
                    prop_assert!(!engine.board.is_occupied(between));
                }
            }
        }
    }

    #[test]
    fn slider_paths_match_ray_alignment(
        kind_index in 0usize..3,
        source_index in 0u8..64,
        dest_index in 0u8..64,
    ) {
        let kind = [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen][kind_index];
        let piece = Piece::new(kind, Color::White, sq(source_index));
        let dest = sq(dest_index);

        let file_delta = dest.file().index() as i8 - piece.square.file().index() as i8;
        let rank_delta = dest.rank().index() as i8 - piece.square.rank().index() as i8;
        let orthogonal = file_delta == 0 || rank_delta == 0;
        let diagonal = file_delta.abs() == rank_delta.abs();
        let aligned = dest != piece.square
            && match kind {
                PieceKind::Rook => orthogonal,
                PieceKind::Bishop => diagonal,
                _ => orthogonal || diagonal,
            };

        let path = piece.attacking_path(dest);
        if aligned {
            prop_assert_eq!(path.first(), Some(&piece.square));
            prop_assert_eq!(path.last(), Some(&dest));
        } else {
            prop_assert!(path.is_empty());
        }
    }

    #[test]
    fn a_pinned_knight_has_no_legal_move(
        rook_rank in 2u8..8,
        knight_rank in 1u8..7,
    ) {
        prop_assume!(knight_rank < rook_rank);
        let rook_square = Square::new(Rank::from_index(rook_rank).unwrap(), File::FileE);
        let knight_square = Square::new(Rank::from_index(knight_rank).unwrap(), File::FileE);
        let engine = Engine::from_setup([
            PieceSpec::new(PieceKind::King, Color::White, Square::E1),
            PieceSpec::new(PieceKind::King, Color::Black, Square::H8),
            PieceSpec::moved(PieceKind::Rook, Color::Black, rook_square),
            PieceSpec::moved(PieceKind::Knight, Color::White, knight_square),
        ])
        .expect("setup is structurally valid");

        let knight = Piece::new(PieceKind::Knight, Color::White, knight_square);
        for dest in knight.attacking_squares(&engine.board) {
            prop_assert!(engine.validate_move(knight_square, dest).is_none());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn random_walks_never_leave_a_king_behind(
        choices in prop::collection::vec(any::<prop::sample::Index>(), 40),
    ) {
        let mut engine = Engine::new();
        let mut to_move = Color::White;
        for choice in choices {
            let moves = legal_moves(&engine, to_move);
            if moves.is_empty() {
                break;
            }
            let (source, dest, classification) = moves[choice.index(moves.len())];
            engine.commit_move(source, dest, classification);
            // The mover may never end its own turn in check, and the board
            // view must agree with the arena after every commit.
            prop_assert!(!engine.in_check(to_move));
            prop_assert!(engine.board.is_consistent_with(&engine.arena));
            to_move = !to_move;
        }
    }
}
