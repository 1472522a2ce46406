//! Player command parsing.

use chess_core::{Position, PositionParseError, Promotion};
use thiserror::Error;

/// Errors produced while parsing a command line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: '{0}' (type 'help' for a list)")]
    Unknown(String),
    #[error(transparent)]
    InvalidSquare(#[from] PositionParseError),
    #[error("cannot promote to '{0}'; choose q, r, b or n")]
    InvalidPromotion(String),
}

/// Commands typed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A single square, handled like a click on the board.
    Square(Position),
    /// Select `from`, then move it to `to`.
    Move { from: Position, to: Position },
    /// Resolve a pending promotion.
    Promote(Promotion),
    /// Drop the current selection.
    Deselect,
    /// Switch to the next piece style.
    Style,
    /// Start a new game.
    Reset,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Input is case insensitive.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim().to_ascii_lowercase();
        let parts: Vec<&str> = input.split_whitespace().collect();

        match parts.as_slice() {
            ["quit" | "exit"] => Ok(Command::Quit),
            ["help" | "?"] => Ok(Command::Help),
            ["reset" | "new"] => Ok(Command::Reset),
            ["style"] => Ok(Command::Style),
            ["clear" | "deselect"] => Ok(Command::Deselect),
            ["promote", piece] => Self::parse_promotion(piece).map(Command::Promote),
            [word] if word.len() == 1 => Self::parse_promotion(word).map(Command::Promote),
            [word] if word.len() == 2 => Ok(Command::Square(word.parse()?)),
            [word] if word.len() == 4 => {
                let (from, to) = match (word.get(..2), word.get(2..)) {
                    (Some(from), Some(to)) => (from, to),
                    _ => return Err(CommandError::Unknown(input.clone())),
                };
                Ok(Command::Move {
                    from: from.parse()?,
                    to: to.parse()?,
                })
            }
            [from, to] if from.len() == 2 && to.len() == 2 => Ok(Command::Move {
                from: from.parse()?,
                to: to.parse()?,
            }),
            _ => Err(CommandError::Unknown(input.clone())),
        }
    }

    fn parse_promotion(word: &str) -> Result<Promotion, CommandError> {
        let choice = match word {
            "knight" => Some(Promotion::Knight),
            "bishop" => Some(Promotion::Bishop),
            "rook" => Some(Promotion::Rook),
            "queen" => Some(Promotion::Queen),
            _ => {
                let mut chars = word.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Promotion::from_char(c),
                    _ => None,
                }
            }
        };
        choice.ok_or_else(|| CommandError::InvalidPromotion(word.to_string()))
    }
}
