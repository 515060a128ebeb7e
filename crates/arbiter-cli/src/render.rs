//! Board rendering over the engine's read-only occupancy view.

use arbiter_core::{Color, Engine, File, PieceKind, Rank, Square};

/// The unicode glyph for a piece.
pub fn glyph(color: Color, kind: PieceKind) -> char {
    match (color, kind) {
        (Color::White, PieceKind::King) => '\u{2654}',
        (Color::White, PieceKind::Queen) => '\u{2655}',
        (Color::White, PieceKind::Rook) => '\u{2656}',
        (Color::White, PieceKind::Bishop) => '\u{2657}',
        (Color::White, PieceKind::Knight) => '\u{2658}',
        (Color::White, PieceKind::Pawn) => '\u{2659}',
        (Color::Black, PieceKind::King) => '\u{265A}',
        (Color::Black, PieceKind::Queen) => '\u{265B}',
        (Color::Black, PieceKind::Rook) => '\u{265C}',
        (Color::Black, PieceKind::Bishop) => '\u{265D}',
        (Color::Black, PieceKind::Knight) => '\u{265E}',
        (Color::Black, PieceKind::Pawn) => '\u{265F}',
    }
}

/// Draw the framed board, rank 8 at the top, empty squares as underscores.
pub fn render(engine: &Engine) -> String {
    let mut out = String::new();
    out.push_str("__________________\n");
    for rank in Rank::ALL.iter().rev() {
        out.push_str(&rank.to_string());
        for file in File::ALL {
            let square = Square::new(*rank, file);
            out.push('|');
            match (engine.color_on(square), engine.piece_on(square)) {
                (Some(color), Some(kind)) => out.push(glyph(color, kind)),
                _ => out.push('_'),
            }
        }
        out.push_str("|\n");
    }
    out.push_str("__________________\n");
    out.push_str("  a b c d e f g h\n");
    out
}
