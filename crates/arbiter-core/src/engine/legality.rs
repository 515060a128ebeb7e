//! Move legality: the validation pipeline and king-safety analysis.

use crate::arena::PieceId;
use crate::chess_move::{Classification, MoveClass};
use crate::color::Color;
use crate::engine::Engine;
use crate::file::File;
use crate::piece::{Piece, PieceKind};
use crate::rank::Rank;
use crate::square::Square;

impl Engine {
    /// Validate a candidate move from `source` to `dest`.
    ///
    /// Returns `None` for an illegal move, an ordinary outcome rather than an
    /// error. Returns the move's classification otherwise; the caller feeds
    /// it to [`commit_move`](Engine::commit_move) for the same square pair.
    ///
    /// The pipeline: resolve the mover, admit the move geometrically
    /// (attacking squares, castling for the king, pushes and captures for
    /// pawns), enforce pawn occupancy rules, keep the king off attacked
    /// squares, reject own-color destinations, and finally reject anything
    /// that would leave the mover's own king attacked.
    pub fn validate_move(&self, source: Square, dest: Square) -> Option<Classification> {
        let id = self.board.id_on(source)?;
        let piece = *self.arena.get(id);

        let class = match piece.kind {
            PieceKind::Pawn => self.classify_pawn(&piece, dest)?,
            PieceKind::King if !piece.attacking_squares(&self.board).contains(&dest) => {
                return self.classify_castle(&piece, dest);
            }
            _ => {
                if !piece.attacking_squares(&self.board).contains(&dest) {
                    return None;
                }
                MoveClass::Normal
            }
        };

        if piece.kind == PieceKind::King && !self.king_destination_is_safe(&piece, dest) {
            return None;
        }

        if self.color_on(dest) == Some(piece.color) {
            return None;
        }

        if self.exposes_own_king(&piece, source, dest) {
            return None;
        }

        let promotes =
            piece.kind == PieceKind::Pawn && dest.rank() == piece.color.promotion_rank();
        Some(Classification::new(class, promotes))
    }

    /// Whether any piece of `by` attacks `square`.
    ///
    /// Includes the king of `by`: a square next to the enemy king is never
    /// safe to step onto. Contrast with [`in_check`](Engine::in_check).
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        self.arena.side(by).any(|id| {
            self.arena
                .get(id)
                .attacking_squares(&self.board)
                .contains(&square)
        })
    }

    /// Whether `color`'s king is in check. The enemy king is excluded from
    /// the attacker union: kings cannot attack each other.
    pub fn in_check(&self, color: Color) -> bool {
        let king_square = self.arena.get(self.arena.king(color)).square;
        let enemy_king = self.arena.king(!color);
        self.arena
            .side(!color)
            .filter(|&id| id != enemy_king)
            .any(|id| {
                self.arena
                    .get(id)
                    .attacking_squares(&self.board)
                    .contains(&king_square)
            })
    }

    /// The enemy pieces (never the enemy king) currently attacking
    /// `color`'s king.
    pub(crate) fn king_attackers(&self, color: Color) -> Vec<PieceId> {
        let king_square = self.arena.get(self.arena.king(color)).square;
        let enemy_king = self.arena.king(!color);
        self.arena
            .side(!color)
            .filter(|&id| id != enemy_king)
            .filter(|&id| {
                self.arena
                    .get(id)
                    .attacking_squares(&self.board)
                    .contains(&king_square)
            })
            .collect()
    }

    /// Classify a pawn move: straight push, diagonal capture, or en passant.
    fn classify_pawn(&self, pawn: &Piece, dest: Square) -> Option<MoveClass> {
        // Straight pushes: the destination must be empty, and a double push
        // must not jump over anything.
        if pawn.pawn_quiet_moves().contains(&dest) {
            if self.board.is_occupied(dest) {
                return None;
            }
            let rank_delta = dest.rank().index() as i8 - pawn.square.rank().index() as i8;
            if rank_delta.abs() == 2 {
                let crossed = pawn.square.offset(0, pawn.color.push_direction())?;
                if self.board.is_occupied(crossed) {
                    return None;
                }
            }
            return Some(MoveClass::Normal);
        }

        // Diagonals: an enemy piece to take, or the en passant square.
        if !pawn.attacking_squares(&self.board).contains(&dest) {
            return None;
        }
        if let Some(victim) = self.color_on(dest) {
            return (victim != pawn.color).then_some(MoveClass::PawnCapture);
        }
        self.en_passant_square(pawn)
            .filter(|&capture| capture == dest)
            .map(|_| MoveClass::EnPassant)
    }

    /// The square this pawn could capture on en passant, if the immediately
    /// preceding half-move was an adjacent pawn's two-square advance ending
    /// beside it. The capture square sits on the bypassed rank.
    fn en_passant_square(&self, pawn: &Piece) -> Option<Square> {
        let last = self.last_move()?;
        let mover = self.arena.get(self.board.id_on(last.dest)?);
        if mover.kind != PieceKind::Pawn {
            return None;
        }
        let source_rank = last.source.rank().index() as i8;
        let dest_rank = last.dest.rank().index() as i8;
        if (source_rank - dest_rank).abs() != 2 {
            return None;
        }
        let file_gap = last.dest.file().index() as i8 - pawn.square.file().index() as i8;
        if file_gap.abs() != 1 || last.dest.rank() != pawn.square.rank() {
            return None;
        }
        let midway = Rank::from_index(((source_rank + dest_rank) / 2) as u8)
            .expect("the bypassed rank of a double push is on the board");
        Some(Square::new(midway, last.dest.file()))
    }

    /// Castling admission. Complete in itself: when this accepts, the move
    /// has already passed every safety condition it needs.
    fn classify_castle(&self, king: &Piece, dest: Square) -> Option<Classification> {
        if king.has_moved || self.in_check(king.color) {
            return None;
        }
        let back = king.color.back_rank();
        if king.square != Square::new(back, File::FileE) {
            return None;
        }

        let them = !king.color;
        let class = if dest == Square::new(back, File::FileG) {
            let crossing = Square::new(back, File::FileF);
            if self.board.is_occupied(crossing) || self.board.is_occupied(dest) {
                return None;
            }
            if self.is_square_attacked(crossing, them) || self.is_square_attacked(dest, them) {
                return None;
            }
            self.castling_rook(Square::new(back, File::FileH), king.color)?;
            MoveClass::CastleKingside
        } else if dest == Square::new(back, File::FileC) {
            let knight_home = Square::new(back, File::FileB);
            let crossing = Square::new(back, File::FileD);
            if self.board.is_occupied(knight_home)
                || self.board.is_occupied(dest)
                || self.board.is_occupied(crossing)
            {
                return None;
            }
            if self.is_square_attacked(crossing, them) || self.is_square_attacked(dest, them) {
                return None;
            }
            self.castling_rook(Square::new(back, File::FileA), king.color)?;
            MoveClass::CastleQueenside
        } else {
            return None;
        };
        Some(Classification::new(class, false))
    }

    /// The own, unmoved rook standing on `corner`, if there is one.
    fn castling_rook(&self, corner: Square, color: Color) -> Option<PieceId> {
        let id = self.board.id_on(corner)?;
        let rook = self.arena.get(id);
        (rook.kind == PieceKind::Rook && rook.color == color && !rook.has_moved).then_some(id)
    }

    /// King moves only: the destination must not be attacked, and a slider
    /// currently checking the king must not still hit the destination on
    /// the same ray once the king vacates its square. Attack sets stop at
    /// the king itself, so the ray is re-tested as pure path geometry.
    fn king_destination_is_safe(&self, king: &Piece, dest: Square) -> bool {
        if self.is_square_attacked(dest, !king.color) {
            return false;
        }
        self.king_attackers(king.color)
            .into_iter()
            .all(|attacker| self.arena.get(attacker).attacking_path(dest).is_empty())
    }

    /// The self-check test: would this move leave the mover's own king
    /// attacked?
    ///
    /// The move is applied hypothetically: the source square counts as
    /// empty, the destination as occupied, and an enemy piece standing on
    /// the destination is out of the fight. Enemy slider rays are walked as
    /// pure geometry against that occupancy; knight, pawn, and king attacks
    /// are occupancy-independent and tested directly.
    fn exposes_own_king(&self, piece: &Piece, source: Square, dest: Square) -> bool {
        let us = piece.color;
        let captured = self.board.id_on(dest);
        let king_moves = piece.kind == PieceKind::King;
        let king_square = if king_moves {
            dest
        } else {
            self.arena.get(self.arena.king(us)).square
        };

        for enemy_id in self.arena.side(!us) {
            if Some(enemy_id) == captured {
                continue;
            }
            let enemy = self.arena.get(enemy_id);
            if enemy.kind.is_slider() {
                let path = enemy.attacking_path(king_square);
                for &square in path.iter().skip(1) {
                    if square == king_square {
                        return true;
                    }
                    if !king_moves && square == source {
                        // The mover has left this square.
                        continue;
                    }
                    if self.board.is_occupied(square) || square == dest {
                        break;
                    }
                }
            } else if enemy
                .attacking_squares(&self.board)
                .contains(&king_square)
            {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::chess_move::MoveClass;
    use crate::color::Color;
    use crate::engine::{Engine, PieceSpec};
    use crate::piece::PieceKind;
    use crate::square::Square;

    fn play(engine: &mut Engine, source: Square, dest: Square) {
        let classification = engine
            .validate_move(source, dest)
            .unwrap_or_else(|| panic!("{source}{dest} should be legal"));
        engine.commit_move(source, dest, classification);
    }

    fn setup(pieces: Vec<PieceSpec>) -> Engine {
        Engine::from_setup(pieces).unwrap()
    }

    #[test]
    fn opening_moves() {
        let engine = Engine::new();
        assert!(engine.validate_move(Square::E2, Square::E4).is_some());
        assert!(engine.validate_move(Square::E2, Square::E3).is_some());
        assert!(engine.validate_move(Square::G1, Square::F3).is_some());
        // Too far, blocked, or not a move at all.
        assert!(engine.validate_move(Square::E2, Square::E5).is_none());
        assert!(engine.validate_move(Square::D1, Square::D3).is_none());
        assert!(engine.validate_move(Square::E4, Square::E5).is_none());
    }

    #[test]
    fn own_color_destination_rejected() {
        let engine = Engine::new();
        assert!(engine.validate_move(Square::A1, Square::A2).is_none());
        assert!(engine.validate_move(Square::E1, Square::D1).is_none());
    }

    #[test]
    fn double_push_cannot_jump_a_blocker() {
        let engine = setup(vec![
            PieceSpec::new(PieceKind::King, Color::White, Square::E1),
            PieceSpec::new(PieceKind::King, Color::Black, Square::E8),
            PieceSpec::new(PieceKind::Pawn, Color::White, Square::E2),
            PieceSpec::moved(PieceKind::Knight, Color::Black, Square::E3),
        ]);
        assert!(engine.validate_move(Square::E2, Square::E4).is_none());
        assert!(engine.validate_move(Square::E2, Square::E3).is_none());
    }

    #[test]
    fn pawn_diagonal_requires_a_victim() {
        let mut engine = Engine::new();
        play(&mut engine, Square::E2, Square::E4);
        // Nothing on d5 or f5 yet.
        assert!(engine.validate_move(Square::E4, Square::D5).is_none());
        assert!(engine.validate_move(Square::E4, Square::F5).is_none());
        play(&mut engine, Square::D7, Square::D5);
        assert_eq!(
            engine.validate_move(Square::E4, Square::D5).map(|c| c.class),
            Some(MoveClass::PawnCapture)
        );
    }

    #[test]
    fn pinned_piece_cannot_move() {
        let engine = setup(vec![
            PieceSpec::new(PieceKind::King, Color::White, Square::E1),
            PieceSpec::new(PieceKind::King, Color::Black, Square::H8),
            PieceSpec::new(PieceKind::Knight, Color::White, Square::E2),
            PieceSpec::moved(PieceKind::Rook, Color::Black, Square::E8),
        ]);
        let knight = crate::piece::Piece::new(PieceKind::Knight, Color::White, Square::E2);
        let board = crate::board::Board::from_arena(&engine.arena);
        for dest in knight.attacking_squares(&board) {
            assert!(
                engine.validate_move(Square::E2, dest).is_none(),
                "pinned knight must not move to {dest}"
            );
        }
    }

    #[test]
    fn interposing_on_the_pin_ray_is_legal() {
        let engine = setup(vec![
            PieceSpec::new(PieceKind::King, Color::White, Square::E1),
            PieceSpec::new(PieceKind::King, Color::Black, Square::H8),
            PieceSpec::moved(PieceKind::Rook, Color::White, Square::A3),
            PieceSpec::moved(PieceKind::Rook, Color::Black, Square::E8),
        ]);
        // The rook may step onto the check ray (e3) but nowhere else.
        assert!(engine.validate_move(Square::A3, Square::E3).is_some());
        assert!(engine.validate_move(Square::A3, Square::A4).is_none());
        assert!(engine.validate_move(Square::A3, Square::B3).is_none());
    }

    #[test]
    fn king_cannot_retreat_along_the_check_ray() {
        let engine = setup(vec![
            PieceSpec::new(PieceKind::King, Color::White, Square::D1),
            PieceSpec::new(PieceKind::King, Color::Black, Square::H8),
            PieceSpec::moved(PieceKind::Rook, Color::Black, Square::H1),
        ]);
        assert!(engine.in_check(Color::White));
        // c1 is on the rook's ray, only shadowed by the king itself.
        assert!(engine.validate_move(Square::D1, Square::C1).is_none());
        // Stepping toward the rook stays on the ray too.
        assert!(engine.validate_move(Square::D1, Square::E1).is_none());
        // Leaving the rank is fine.
        assert!(engine.validate_move(Square::D1, Square::C2).is_some());
        assert!(engine.validate_move(Square::D1, Square::D2).is_some());
    }

    #[test]
    fn king_cannot_capture_a_protected_piece() {
        let engine = setup(vec![
            PieceSpec::new(PieceKind::King, Color::White, Square::E1),
            PieceSpec::new(PieceKind::King, Color::Black, Square::H8),
            PieceSpec::moved(PieceKind::Queen, Color::Black, Square::D2),
            PieceSpec::moved(PieceKind::Bishop, Color::Black, Square::C1),
        ]);
        // The bishop "sees" its own queen, so d2 counts as attacked.
        assert!(engine.validate_move(Square::E1, Square::D2).is_none());
    }

    #[test]
    fn king_may_capture_an_unprotected_checker() {
        let engine = setup(vec![
            PieceSpec::new(PieceKind::King, Color::White, Square::E1),
            PieceSpec::new(PieceKind::King, Color::Black, Square::H8),
            PieceSpec::moved(PieceKind::Queen, Color::Black, Square::D2),
        ]);
        assert!(engine.validate_move(Square::E1, Square::D2).is_some());
    }

    #[test]
    fn kings_never_stand_adjacent() {
        let engine = setup(vec![
            PieceSpec::new(PieceKind::King, Color::White, Square::E4),
            PieceSpec::new(PieceKind::King, Color::Black, Square::E6),
        ]);
        assert!(engine.validate_move(Square::E4, Square::E5).is_none());
        assert!(engine.validate_move(Square::E4, Square::D5).is_none());
        assert!(engine.validate_move(Square::E4, Square::D4).is_some());
    }

    #[test]
    fn castling_from_the_opening_corridor() {
        let mut engine = Engine::new();
        play(&mut engine, Square::E2, Square::E4);
        play(&mut engine, Square::A7, Square::A6);
        play(&mut engine, Square::G1, Square::F3);
        play(&mut engine, Square::B7, Square::B6);
        play(&mut engine, Square::F1, Square::E2);
        play(&mut engine, Square::C7, Square::C6);
        assert_eq!(
            engine.validate_move(Square::E1, Square::G1).map(|c| c.class),
            Some(MoveClass::CastleKingside)
        );
    }

    #[test]
    fn castling_blocked_by_an_attacked_crossing_square() {
        let engine = setup(vec![
            PieceSpec::new(PieceKind::King, Color::White, Square::E1),
            PieceSpec::new(PieceKind::Rook, Color::White, Square::H1),
            PieceSpec::new(PieceKind::King, Color::Black, Square::H8),
            PieceSpec::moved(PieceKind::Rook, Color::Black, Square::F8),
        ]);
        assert!(engine.validate_move(Square::E1, Square::G1).is_none());
    }

    #[test]
    fn castling_requires_an_unmoved_rook() {
        let engine = setup(vec![
            PieceSpec::new(PieceKind::King, Color::White, Square::E1),
            PieceSpec::moved(PieceKind::Rook, Color::White, Square::H1),
            PieceSpec::new(PieceKind::King, Color::Black, Square::H8),
        ]);
        assert!(engine.validate_move(Square::E1, Square::G1).is_none());
    }

    #[test]
    fn castling_refused_while_in_check() {
        let engine = setup(vec![
            PieceSpec::new(PieceKind::King, Color::White, Square::E1),
            PieceSpec::new(PieceKind::Rook, Color::White, Square::H1),
            PieceSpec::new(PieceKind::King, Color::Black, Square::H8),
            PieceSpec::moved(PieceKind::Rook, Color::Black, Square::E8),
        ]);
        assert!(engine.in_check(Color::White));
        assert!(engine.validate_move(Square::E1, Square::G1).is_none());
    }

    #[test]
    fn queenside_needs_the_knight_square_empty() {
        let engine = setup(vec![
            PieceSpec::new(PieceKind::King, Color::White, Square::E1),
            PieceSpec::new(PieceKind::Rook, Color::White, Square::A1),
            PieceSpec::new(PieceKind::Knight, Color::White, Square::B1),
            PieceSpec::new(PieceKind::King, Color::Black, Square::H8),
        ]);
        // b1 is never crossed by the king but must still be empty.
        assert!(engine.validate_move(Square::E1, Square::C1).is_none());
    }

    #[test]
    fn queenside_castle_available() {
        let engine = setup(vec![
            PieceSpec::new(PieceKind::King, Color::White, Square::E1),
            PieceSpec::new(PieceKind::Rook, Color::White, Square::A1),
            PieceSpec::new(PieceKind::King, Color::Black, Square::H8),
        ]);
        assert_eq!(
            engine.validate_move(Square::E1, Square::C1).map(|c| c.class),
            Some(MoveClass::CastleQueenside)
        );
    }

    #[test]
    fn en_passant_only_immediately_after_the_double_push() {
        let mut engine = Engine::new();
        play(&mut engine, Square::E2, Square::E4);
        play(&mut engine, Square::A7, Square::A6);
        play(&mut engine, Square::E4, Square::E5);
        play(&mut engine, Square::D7, Square::D5);
        assert_eq!(
            engine.validate_move(Square::E5, Square::D6).map(|c| c.class),
            Some(MoveClass::EnPassant)
        );

        // One unrelated move each way and the window has closed.
        play(&mut engine, Square::H2, Square::H3);
        play(&mut engine, Square::H7, Square::H6);
        assert!(engine.validate_move(Square::E5, Square::D6).is_none());
    }

    #[test]
    fn en_passant_destination_must_be_the_capture_square() {
        let mut engine = Engine::new();
        play(&mut engine, Square::E2, Square::E4);
        play(&mut engine, Square::A7, Square::A6);
        play(&mut engine, Square::E4, Square::E5);
        play(&mut engine, Square::D7, Square::D5);
        // f6 is an empty diagonal of the e5 pawn, but not the bypassed square.
        assert!(engine.validate_move(Square::E5, Square::F6).is_none());
    }

    #[test]
    fn en_passant_needs_a_two_square_advance() {
        let mut engine = Engine::new();
        play(&mut engine, Square::E2, Square::E4);
        play(&mut engine, Square::D7, Square::D6);
        play(&mut engine, Square::E4, Square::E5);
        play(&mut engine, Square::D6, Square::D5);
        // The d-pawn arrived in two single steps; no en passant.
        assert!(engine.validate_move(Square::E5, Square::D6).is_none());
    }

    #[test]
    fn pawn_pinned_on_the_king_diagonal() {
        let mut engine = Engine::new();
        play(&mut engine, Square::E2, Square::E4);
        play(&mut engine, Square::E7, Square::E5);
        play(&mut engine, Square::F1, Square::B5);
        assert!(!engine.in_check(Color::Black));
        // The d7 pawn shields e8 from the bishop and may not leave the ray.
        assert!(engine.validate_move(Square::D7, Square::D6).is_none());
        assert!(engine.validate_move(Square::D7, Square::D5).is_none());
        // Interposing on c6 blocks the ray instead.
        assert!(engine.validate_move(Square::C7, Square::C6).is_some());
    }

    #[test]
    fn moves_while_in_check_must_address_it() {
        let engine = setup(vec![
            PieceSpec::new(PieceKind::King, Color::White, Square::E1),
            PieceSpec::new(PieceKind::King, Color::Black, Square::H8),
            PieceSpec::moved(PieceKind::Rook, Color::Black, Square::E8),
            PieceSpec::moved(PieceKind::Rook, Color::White, Square::A2),
        ]);
        assert!(engine.in_check(Color::White));
        // An unrelated rook move leaves the check standing.
        assert!(engine.validate_move(Square::A2, Square::A5).is_none());
        // Interposing resolves it.
        assert!(engine.validate_move(Square::A2, Square::E2).is_some());
    }
}
