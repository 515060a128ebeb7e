//! Sliding piece (bishop, rook, queen) rays and attack paths.

use crate::board::Board;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

/// The four orthogonal ray directions as (file delta, rank delta).
const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// The four diagonal ray directions.
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// All eight ray directions, orthogonal first.
const ALL: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

fn directions(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::Rook => &ORTHOGONAL,
        PieceKind::Bishop => &DIAGONAL,
        PieceKind::Queen => &ALL,
        _ => unreachable!("only sliders cast rays"),
    }
}

/// Cast a ray per direction, appending squares until leaving the board or
/// reaching the first occupied square. The blocker is included whatever its
/// color: a slider "sees" as far as, and including, the nearest piece.
pub(super) fn attacks(piece: &Piece, board: &Board) -> Vec<Square> {
    let mut squares = Vec::new();
    for &(file_delta, rank_delta) in directions(piece.kind) {
        let mut current = piece.square;
        while let Some(next) = current.offset(file_delta, rank_delta) {
            squares.push(next);
            if board.is_occupied(next) {
                break;
            }
            current = next;
        }
    }
    squares
}

/// The ordered ray from the piece's square to `dest`, both inclusive,
/// ignoring occupancy. Empty when `dest` is off every ray of this kind.
pub(super) fn path(piece: &Piece, dest: Square) -> Vec<Square> {
    let file_delta = dest.file().index() as i8 - piece.square.file().index() as i8;
    let rank_delta = dest.rank().index() as i8 - piece.square.rank().index() as i8;
    if file_delta == 0 && rank_delta == 0 {
        return Vec::new();
    }

    let aligned = match piece.kind {
        PieceKind::Rook => file_delta == 0 || rank_delta == 0,
        PieceKind::Bishop => file_delta.abs() == rank_delta.abs(),
        PieceKind::Queen => {
            file_delta == 0 || rank_delta == 0 || file_delta.abs() == rank_delta.abs()
        }
        _ => unreachable!("only sliders cast rays"),
    };
    if !aligned {
        return Vec::new();
    }

    let step = (file_delta.signum(), rank_delta.signum());
    let mut squares = vec![piece.square];
    let mut current = piece.square;
    while current != dest {
        current = current
            .offset(step.0, step.1)
            .expect("an aligned ray stays on the board until dest");
        squares.push(current);
    }
    squares
}
