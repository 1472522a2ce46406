//! Line-driven play session.
//!
//! A [`Session`] reads one command per line, applies it to the game and
//! redraws the board. Rejected input is reported on a single notice line and
//! leaves the game untouched.

use std::io::{self, BufRead, Write};

use chess_core::Position;
use chess_engine::{ChessGame, GameError};

use crate::command::Command;
use crate::config::ArcadeConfig;
use crate::view;

const HELP: &str = "\
Commands:
  e2          select a piece, or move the selected piece there
  e2e4, e2 e4 move a piece
  q r b n     choose a promotion (also: promote queen)
  clear       drop the selection
  style       switch piece style
  reset       start a new game
  help        show this list
  quit        leave";

/// Whether the session keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Help,
    Quit,
}

/// A game bound to an input and an output stream.
pub struct Session<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    game: ChessGame,
    config: ArcadeConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W, config: ArcadeConfig) -> Self {
        Self {
            reader,
            writer,
            game: ChessGame::new(),
            config,
        }
    }

    /// Returns the game being played.
    pub fn game(&self) -> &ChessGame {
        &self.game
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.draw()?;
        loop {
            write!(self.writer, "> ")?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                tracing::debug!("end of input");
                writeln!(self.writer)?;
                return Ok(());
            }
            if line.trim().is_empty() {
                continue;
            }

            match Command::parse(&line) {
                Ok(command) => {
                    tracing::trace!(?command, "command");
                    match self.apply(command) {
                        Ok(Flow::Quit) => return Ok(()),
                        Ok(Flow::Continue) => self.draw()?,
                        Ok(Flow::Help) => writeln!(self.writer, "{}", HELP)?,
                        Err(e) => self.notice(&e.to_string())?,
                    }
                }
                Err(e) => self.notice(&e.to_string())?,
            }
        }
    }

    /// Applies one command to the game.
    pub fn apply(&mut self, command: Command) -> Result<Flow, GameError> {
        match command {
            Command::Square(square) => self.click(square)?,
            Command::Move { from, to } => {
                self.game.attempt_move(from, to)?;
            }
            Command::Promote(choice) => {
                self.game.resolve_promotion(choice)?;
            }
            Command::Deselect => self.game.deselect(),
            Command::Style => {
                self.config.glyphs = self.config.glyphs.next();
                tracing::debug!(glyphs = ?self.config.glyphs, "style changed");
            }
            Command::Reset => self.game.reset(),
            Command::Help => return Ok(Flow::Help),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Handles a square picked on its own, the way a click on the board would.
    ///
    /// A valid destination of the selected piece moves it there. The selected
    /// square itself or an empty square drops the selection. Any other square
    /// is a new selection.
    fn click(&mut self, square: Position) -> Result<(), GameError> {
        if let Some(selected) = self.game.selected() {
            if self.game.valid_moves().contains(&square) {
                self.game.attempt_move(selected, square)?;
                return Ok(());
            }
            if selected == square || self.game.board().is_empty(square) {
                self.game.deselect();
                return Ok(());
            }
        }
        self.game.select(square)?;
        Ok(())
    }

    fn draw(&mut self) -> io::Result<()> {
        let frame = view::render(&self.game.render_state(), &self.config);
        write!(self.writer, "\n{}", frame)?;
        self.writer.flush()
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        tracing::debug!(notice = message, "input rejected");
        writeln!(self.writer, "! {}", message)?;
        self.writer.flush()
    }
}
