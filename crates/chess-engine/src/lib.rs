//! Chess rule engine for the terminal arcade.
//!
//! This crate provides:
//! - [`Board`] - the 8x8 grid of optional pieces
//! - [`movegen`] - per-piece candidate generation, castling and en passant
//! - [`check`] - attack and king-safety tests
//! - [`ChessGame`] - the select / move / promote state machine a view drives
//! - [`RenderState`] - the read-only snapshot a view draws from
//!
//! # Architecture
//!
//! The board is a small `Copy` value. Every "what if" question (would this
//! move expose the king?) is answered on a copy, so the live board only ever
//! changes inside [`ChessGame::attempt_move`] and
//! [`ChessGame::resolve_promotion`].
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Position};
//! use chess_engine::ChessGame;
//!
//! let mut game = ChessGame::new();
//! let e2 = Position::from_algebraic("e2").unwrap();
//! let e4 = Position::from_algebraic("e4").unwrap();
//!
//! assert_eq!(game.select(e2).unwrap().len(), 2);
//! game.attempt_move(e2, e4).unwrap();
//! assert_eq!(game.turn(), Color::Black);
//! ```

mod board;
mod castling;
pub mod check;
mod game;
pub mod movegen;
mod render;
pub mod rules;

pub use board::{Board, BoardParseError};
pub use castling::{CastleSide, CastlingRights};
pub use check::{is_king_in_check, is_square_attacked, would_be_in_check};
pub use game::{ChessGame, GameError, MoveKind, MoveRecord};
pub use movegen::{can_piece_reach, legal_moves, pseudo_legal_moves, MoveContext};
pub use render::RenderState;
pub use rules::Outcome;
