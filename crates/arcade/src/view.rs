//! Plain text rendering of a game snapshot.

use std::fmt::Write;

use chess_core::{Color, Overlay, Piece, PieceKind, Position, BOARD_SIZE};
use chess_engine::RenderState;

use crate::config::{ArcadeConfig, Glyphs};

const FILES: &str = "abcdefgh";

/// Width of one square in the ASCII art style, markers included.
const ART_WIDTH: usize = 9;

fn glyph(piece: Option<Piece>, glyphs: Glyphs) -> char {
    match (piece, glyphs) {
        (None, _) => '.',
        (Some(piece), Glyphs::Letters | Glyphs::Ascii) => piece.to_char(),
        (Some(piece), Glyphs::Unicode) => piece.to_unicode(),
    }
}

/// Three-line drawings; `@` on the middle line is replaced by the piece letter.
fn art(kind: PieceKind) -> [&'static str; 3] {
    match kind {
        PieceKind::Pawn => ["  ( )  ", "  )@(  ", " (___) "],
        PieceKind::Rook => ["[ U U ]", " | @ | ", "[_____]"],
        PieceKind::Knight => [r" /\v/\ ", r"/(o@o)\", "  (_)  "],
        PieceKind::Bishop => [r"  /^\  ", "  (@)  ", " (___) "],
        PieceKind::Queen => [r"  /o\  ", " ( @ ) ", "(_____)"],
        PieceKind::King => ["  (+)  ", " ( @ ) ", "(_____)"],
    }
}

fn markers(overlay: Option<Overlay>) -> (char, char) {
    match overlay {
        None | Some(Overlay::Move) => (' ', ' '),
        Some(Overlay::Selected) => ('[', ']'),
        Some(overlay) => (overlay.marker(), overlay.marker()),
    }
}

/// Draws one square as three characters: marker, glyph, marker.
fn cell(piece: Option<Piece>, overlay: Option<Overlay>, glyphs: Glyphs) -> String {
    let center = match overlay {
        Some(Overlay::Move) => Overlay::Move.marker(),
        _ => glyph(piece, glyphs),
    };
    let (left, right) = markers(overlay);
    format!("{}{}{}", left, center, right)
}

/// Draws one square as three lines of `ART_WIDTH` characters. Markers sit on
/// the middle line.
fn art_cell(piece: Option<Piece>, overlay: Option<Overlay>) -> Vec<String> {
    let (left, right) = markers(overlay);
    let blank = " ".repeat(ART_WIDTH);
    match piece {
        Some(piece) => {
            let [top, middle, bottom] = art(piece.kind);
            let middle = middle.replace('@', &piece.to_char().to_string());
            vec![
                format!(" {} ", top),
                format!("{}{}{}", left, middle, right),
                format!(" {} ", bottom),
            ]
        }
        None => {
            let center = match overlay {
                Some(Overlay::Move) => Overlay::Move.marker(),
                _ => '.',
            };
            vec![
                blank.clone(),
                format!("{}   {}   {}", left, center, right),
                blank,
            ]
        }
    }
}

fn cell_lines(piece: Option<Piece>, overlay: Option<Overlay>, glyphs: Glyphs) -> Vec<String> {
    match glyphs {
        Glyphs::Ascii => art_cell(piece, overlay),
        Glyphs::Letters | Glyphs::Unicode => vec![cell(piece, overlay, glyphs)],
    }
}

fn file_labels(out: &mut String, width: usize) {
    out.push_str("   ");
    for file in FILES.chars() {
        let _ = write!(out, "{:^width$}", file, width = width);
    }
    out.push('\n');
}

fn captured_line(out: &mut String, state: &RenderState<'_>, color: Color, glyphs: Glyphs) {
    let pieces: Vec<String> = state
        .captured_by(color)
        .iter()
        .map(|piece| glyph(Some(*piece), glyphs).to_string())
        .collect();
    let _ = writeln!(out, "{} has taken: {}", color, pieces.join(" "));
}

/// Returns the status line shown under the board.
pub fn status(state: &RenderState<'_>) -> String {
    if let Some(outcome) = state.outcome {
        return format!("{}. Type 'reset' to play again.", outcome);
    }
    if let Some(square) = state.promotion {
        let choices: Vec<String> = state
            .promotion_choices()
            .iter()
            .map(|choice| choice.kind().to_char().to_string())
            .collect();
        return format!(
            "{} pawn on {} promotes: choose {}",
            state.turn,
            square,
            choices.join(", ")
        );
    }
    if state.in_check(state.turn) {
        format!("{} to move, in check", state.turn)
    } else {
        format!("{} to move", state.turn)
    }
}

/// Draws the board, captures and status line.
pub fn render(state: &RenderState<'_>, config: &ArcadeConfig) -> String {
    let (width, height) = match config.glyphs {
        Glyphs::Ascii => (ART_WIDTH, 3),
        Glyphs::Letters | Glyphs::Unicode => (3, 1),
    };
    let label_line = height / 2;

    let mut out = String::new();
    if config.show_coordinates {
        file_labels(&mut out, width);
    }

    for y in 0..BOARD_SIZE as i8 {
        let rank = BOARD_SIZE as i8 - y;
        let cells: Vec<Vec<String>> = (0..BOARD_SIZE as i8)
            .filter_map(|x| Position::new(x, y))
            .map(|pos| {
                cell_lines(
                    state.board.piece_at(pos),
                    state.overlay_at(pos),
                    config.glyphs,
                )
            })
            .collect();

        for line in 0..height {
            if config.show_coordinates {
                if line == label_line {
                    let _ = write!(out, " {} ", rank);
                } else {
                    out.push_str("   ");
                }
            }
            for square in &cells {
                out.push_str(&square[line]);
            }
            if config.show_coordinates && line == label_line {
                let _ = write!(out, " {}", rank);
            }
            out.push('\n');
        }
    }

    if config.show_coordinates {
        file_labels(&mut out, width);
    }
    if config.show_captures {
        out.push('\n');
        captured_line(&mut out, state, Color::White, config.glyphs);
        captured_line(&mut out, state, Color::Black, config.glyphs);
    }
    out.push('\n');
    out.push_str(&status(state));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use chess_engine::{Board, ChessGame};

    use super::*;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn plain() -> ArcadeConfig {
        ArcadeConfig {
            glyphs: Glyphs::Letters,
            show_coordinates: false,
            show_captures: false,
        }
    }

    #[test]
    fn test_start_position_rows() {
        let game = ChessGame::new();
        let text = render(&game.render_state(), &plain());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], " r  n  b  q  k  b  n  r ");
        assert_eq!(lines[3], " .  .  .  .  .  .  .  . ");
        assert_eq!(lines[7], " R  N  B  Q  K  B  N  R ");
        assert_eq!(lines[9], "White to move");
    }

    #[test]
    fn test_selection_markers() {
        let mut game = ChessGame::new();
        game.select(pos("e2")).unwrap();
        let text = render(&game.render_state(), &plain());
        let lines: Vec<&str> = text.lines().collect();
        // Rank 4 and rank 3 show move markers on the e-file.
        assert_eq!(lines[4], " .  .  .  .  *  .  .  . ");
        assert_eq!(lines[5], " .  .  .  .  *  .  .  . ");
        assert_eq!(lines[6], " P  P  P  P [P] P  P  P ");
    }

    #[test]
    fn test_coordinates_and_unicode() {
        let game = ChessGame::new();
        let config = ArcadeConfig {
            glyphs: Glyphs::Unicode,
            ..ArcadeConfig::default()
        };
        let text = render(&game.render_state(), &config);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "    a  b  c  d  e  f  g  h ");
        assert!(lines[1].starts_with(" 8  ♜ "));
        assert!(lines[1].ends_with(" 8"));
        assert!(text.contains("White has taken: \n"));
    }

    #[test]
    fn test_check_and_capture_markers() {
        let board: Board = "....k...
                            ........
                            ........
                            ........
                            ........
                            ........
                            ....q...
                            ...QK..."
            .parse()
            .unwrap();
        let mut game = ChessGame::from_board(board, Color::White);
        let text = render(&game.render_state(), &plain());
        assert!(text.contains("!K!"));
        assert!(text.ends_with("White to move, in check\n"));

        game.select(pos("d1")).unwrap();
        let text = render(&game.render_state(), &plain());
        assert!(text.contains("xqx"));
        assert!(text.contains("[Q]"));
    }

    #[test]
    fn test_promotion_and_outcome_status() {
        let board: Board = "....k...
                            .P......
                            ........
                            ........
                            ........
                            ........
                            ........
                            ....K..."
            .parse()
            .unwrap();
        let mut game = ChessGame::from_board(board, Color::White);
        game.attempt_move(pos("b7"), pos("b8")).unwrap();
        assert_eq!(
            status(&game.render_state()),
            "White pawn on b8 promotes: choose n, b, r, q"
        );

        let mut game = ChessGame::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            game.attempt_move(pos(from), pos(to)).unwrap();
        }
        assert_eq!(
            status(&game.render_state()),
            "Checkmate, Black wins. Type 'reset' to play again."
        );
    }

    #[test]
    fn test_ascii_art_squares() {
        let mut game = ChessGame::new();
        game.select(pos("e2")).unwrap();
        let config = ArcadeConfig {
            glyphs: Glyphs::Ascii,
            ..plain()
        };
        let text = render(&game.render_state(), &config);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].len(), 8 * ART_WIDTH);
        assert!(lines[1].starts_with(r"  | r |   /(ono)\ "));
        // Rank 3 holds a move marker on the e-file, rank 2 the selected pawn.
        assert_eq!(&lines[16][36..45], "    *    ");
        assert_eq!(&lines[19][36..45], "[  )P(  ]");
        assert_eq!(&lines[10][0..9], "    .    ");
        assert_eq!(lines[25], "White to move");
    }
}
