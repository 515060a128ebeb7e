//! The engine: owns the piece arena, the derived board view, and the move
//! history, and runs the legality pipeline over them.

mod endgame;
mod legality;

use tracing::debug;

use crate::arena::PieceArena;
use crate::board::Board;
use crate::chess_move::{Classification, MoveClass, MoveRecord};
use crate::color::Color;
use crate::error::SetupError;
use crate::file::File;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

/// One piece of an explicit position setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSpec {
    /// The piece kind.
    pub kind: PieceKind,
    /// The side the piece belongs to.
    pub color: Color,
    /// Where the piece starts.
    pub square: Square,
    /// Whether the piece counts as already moved (gates castling and the
    /// two-square pawn advance).
    pub has_moved: bool,
}

impl PieceSpec {
    /// A piece that has not moved yet.
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> PieceSpec {
        PieceSpec {
            kind,
            color,
            square,
            has_moved: false,
        }
    }

    /// A piece that counts as already moved.
    pub const fn moved(kind: PieceKind, color: Color, square: Square) -> PieceSpec {
        PieceSpec {
            kind,
            color,
            square,
            has_moved: true,
        }
    }
}

/// The chess rules engine.
///
/// Owns both side collections (through the arena), the derived board view,
/// and the append-only move history. Exclusively owned by one game session;
/// the caller alternates turns and always validates before committing.
#[derive(Debug, Clone)]
pub struct Engine {
    pub(crate) arena: PieceArena,
    pub(crate) board: Board,
    pub(crate) history: Vec<MoveRecord>,
}

impl Engine {
    /// Create an engine holding the standard starting position.
    pub fn new() -> Engine {
        let arena = PieceArena::standard();
        let board = Board::from_arena(&arena);
        Engine {
            arena,
            board,
            history: Vec::new(),
        }
    }

    /// Create an engine from an explicit piece list.
    ///
    /// # Errors
    ///
    /// Fails if the setup is structurally invalid: not exactly one king per
    /// side, two pieces on one square, or a pawn on either back rank.
    pub fn from_setup(pieces: impl IntoIterator<Item = PieceSpec>) -> Result<Engine, SetupError> {
        let pieces = pieces
            .into_iter()
            .map(|spec| Piece {
                kind: spec.kind,
                color: spec.color,
                square: spec.square,
                has_moved: spec.has_moved,
                alive: true,
            })
            .collect();
        let arena = PieceArena::from_pieces(pieces)?;
        let board = Board::from_arena(&arena);
        Ok(Engine {
            arena,
            board,
            history: Vec::new(),
        })
    }

    /// Return the piece kind on the given square, if any. Read-only view
    /// for rendering collaborators.
    pub fn piece_on(&self, square: Square) -> Option<PieceKind> {
        self.board.id_on(square).map(|id| self.arena.get(id).kind)
    }

    /// Return the color of the piece on the given square, if any.
    pub fn color_on(&self, square: Square) -> Option<Color> {
        self.board.id_on(square).map(|id| self.arena.get(id).color)
    }

    /// All committed half-moves, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The most recently committed half-move.
    pub fn last_move(&self) -> Option<MoveRecord> {
        self.history.last().copied()
    }

    /// Apply a validated move.
    ///
    /// The classification must come from a [`validate_move`](Engine::validate_move)
    /// call for the same square pair on the current position; it is consumed
    /// here and must not be reused.
    ///
    /// # Panics
    ///
    /// Panics when the classification does not match the position (missing
    /// mover, missing capture victim, missing castling rook); those are
    /// broken caller invariants, not recoverable conditions.
    pub fn commit_move(&mut self, source: Square, dest: Square, classification: Classification) {
        let id = self
            .board
            .id_on(source)
            .expect("commit_move: no piece on the source square");

        match classification.class {
            MoveClass::Normal => {
                if let Some(victim) = self.board.id_on(dest) {
                    self.arena.capture(victim);
                }
                self.arena.relocate(id, dest);
            }
            MoveClass::PawnCapture => {
                let victim = self
                    .board
                    .id_on(dest)
                    .expect("pawn capture without a piece to take");
                self.arena.capture(victim);
                self.arena.relocate(id, dest);
            }
            MoveClass::EnPassant => {
                let last = self
                    .last_move()
                    .expect("en passant without a preceding move");
                let victim = self
                    .board
                    .id_on(last.dest)
                    .expect("en passant victim is missing");
                self.arena.capture(victim);
                self.arena.relocate(id, dest);
            }
            MoveClass::CastleKingside | MoveClass::CastleQueenside => {
                let back = self.arena.get(id).color.back_rank();
                let (corner, rook_dest) = if classification.class == MoveClass::CastleKingside {
                    (Square::new(back, File::FileH), Square::new(back, File::FileF))
                } else {
                    (Square::new(back, File::FileA), Square::new(back, File::FileD))
                };
                let rook = self
                    .board
                    .id_on(corner)
                    .expect("castling rook is missing from its corner");
                self.arena.relocate(id, dest);
                self.arena.relocate(rook, rook_dest);
            }
        }

        if classification.promotes {
            self.arena.promote_to_queen(id);
        }

        self.history.push(MoveRecord::new(source, dest));
        self.board = Board::from_arena(&self.arena);
        debug!(
            %source,
            %dest,
            class = ?classification.class,
            promotes = classification.promotes,
            "move committed"
        );
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine::new()
    }
}
