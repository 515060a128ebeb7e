//! Game-end detection: checkmate, stalemate, and the repetition heuristic.

use crate::color::Color;
use crate::engine::Engine;
use crate::square::Square;

/// Number of most-recent half-moves the repetition heuristic inspects.
const REPETITION_WINDOW: usize = 12;
/// Length of the cycle that must repeat three times within the window.
const REPETITION_CYCLE: usize = 4;

impl Engine {
    /// Whether `color` is checkmated: in check with no legal reply.
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.in_check(color) && !self.check_can_be_eliminated(color)
    }

    /// Whether `color` has any legal reply to the current check: a king
    /// move, a capture of the single attacker, or an interposition on a
    /// sliding attacker's path.
    ///
    /// # Panics
    ///
    /// Panics if the king is not actually attacked; asking to resolve a
    /// check that does not exist is a logic fault.
    fn check_can_be_eliminated(&self, color: Color) -> bool {
        let king_id = self.arena.king(color);
        let king = *self.arena.get(king_id);

        // Can the king step out?
        for dest in king.attacking_squares(&self.board) {
            if self.validate_move(king.square, dest).is_some() {
                return true;
            }
        }

        let attackers = self.king_attackers(color);
        assert!(
            !attackers.is_empty(),
            "check-elimination analysis requires an attacked king"
        );
        // Double check: only a king move could have resolved it.
        if attackers.len() > 1 {
            return false;
        }

        // One attacker: capture it, or block a slider's path to the king.
        let attacker = *self.arena.get(attackers[0]);
        let path = attacker.attacking_path(king.square);
        let blockable: &[Square] = if path.is_empty() {
            &[]
        } else {
            &path[1..path.len() - 1]
        };

        for id in self.arena.side(color) {
            if id == king_id {
                continue;
            }
            let piece = self.arena.get(id);
            for dest in piece.candidate_destinations(&self.board) {
                let resolves = dest == attacker.square || blockable.contains(&dest);
                if resolves && self.validate_move(piece.square, dest).is_some() {
                    return true;
                }
            }
        }
        false
    }

    /// Whether `color` is stalemated: not in check, yet no piece of that
    /// side has a single legal destination.
    pub fn is_stalemate(&self, color: Color) -> bool {
        if self.in_check(color) {
            return false;
        }
        for id in self.arena.side(color) {
            let piece = self.arena.get(id);
            for dest in piece.candidate_destinations(&self.board) {
                if self.validate_move(piece.square, dest).is_some() {
                    return false;
                }
            }
        }
        true
    }

    /// Whether the most recent twelve half-moves decompose into three
    /// consecutive repetitions of the same four-half-move cycle.
    ///
    /// A structural heuristic over the move history, not true
    /// position-equality repetition.
    pub fn is_repetition(&self) -> bool {
        if self.history.len() < REPETITION_WINDOW {
            return false;
        }
        let window = &self.history[self.history.len() - REPETITION_WINDOW..];
        (0..REPETITION_CYCLE).all(|offset| {
            window[offset] == window[offset + REPETITION_CYCLE]
                && window[offset + REPETITION_CYCLE] == window[offset + 2 * REPETITION_CYCLE]
        })
    }
}
