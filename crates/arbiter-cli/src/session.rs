//! The turn-taking game loop over the rules engine.

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use arbiter_core::{Color, Engine};

use crate::command::parse_move_line;
use crate::render::render;

/// How a game session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The side to move was checkmated; `winner` delivered it.
    Checkmate {
        /// The winning side.
        winner: Color,
    },
    /// The side to move has no legal move and is not in check.
    Stalemate {
        /// The stalemated side.
        color: Color,
    },
    /// The last twelve half-moves were three copies of one cycle.
    Repetition,
    /// Input ended before the game did.
    Aborted,
}

/// One interactive game: alternates turns, validates input at the boundary,
/// and consults the engine for legality and game end.
///
/// The session is the engine's single writer; it always validates before
/// committing and feeds each classification straight back to the commit for
/// the same square pair.
pub struct Session {
    engine: Engine,
    to_move: Color,
}

impl Session {
    /// Create a session holding the standard starting position.
    pub fn new() -> Session {
        Session {
            engine: Engine::new(),
            to_move: Color::White,
        }
    }

    /// Read-only view of the underlying engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run the loop until the game ends or input is exhausted.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<Outcome> {
        writeln!(out, "********** WELCOME TO CHESS **********")?;
        let mut lines = input.lines();

        loop {
            write!(out, "{}", render(&self.engine))?;
            write!(out, "{}'s turn: ", self.to_move)?;
            out.flush()?;

            let Some(line) = lines.next() else {
                info!("input closed, aborting game");
                return Ok(Outcome::Aborted);
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            debug!(input = %line.trim(), "received move input");

            let (source, dest) = match parse_move_line(&line) {
                Ok(squares) => squares,
                Err(error) => {
                    warn!(%error, "rejected input");
                    writeln!(out, "invalid input: {error}")?;
                    continue;
                }
            };

            match self.engine.color_on(source) {
                None => {
                    writeln!(out, "no piece on {source}")?;
                    continue;
                }
                Some(color) if color != self.to_move => {
                    writeln!(out, "it is {}'s turn", self.to_move)?;
                    continue;
                }
                Some(_) => {}
            }

            let Some(classification) = self.engine.validate_move(source, dest) else {
                writeln!(out, "illegal move: {source} {dest}")?;
                continue;
            };
            self.engine.commit_move(source, dest, classification);

            let opponent = !self.to_move;
            if self.engine.is_checkmate(opponent) {
                write!(out, "{}", render(&self.engine))?;
                writeln!(out, "checkmate, {} wins", self.to_move)?;
                return Ok(Outcome::Checkmate {
                    winner: self.to_move,
                });
            }
            if self.engine.is_stalemate(opponent) {
                write!(out, "{}", render(&self.engine))?;
                writeln!(out, "{opponent} is stalemated, draw")?;
                return Ok(Outcome::Stalemate { color: opponent });
            }
            if self.engine.is_repetition() {
                write!(out, "{}", render(&self.engine))?;
                writeln!(out, "draw by repetition")?;
                return Ok(Outcome::Repetition);
            }
            if self.engine.in_check(opponent) {
                writeln!(out, "{opponent} is in check")?;
            }

            self.to_move = opponent;
        }
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}
