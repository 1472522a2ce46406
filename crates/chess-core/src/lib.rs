//! Core types for the arcade chess engine.
//!
//! This crate provides the value types shared by the engine and its views:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Position`] for board coordinates
//! - [`Promotion`] for pawn promotion choices
//! - [`Overlay`] for render-only square highlights

mod color;
mod overlay;
mod piece;
mod position;

pub use color::Color;
pub use overlay::Overlay;
pub use piece::{Piece, PieceKind, Promotion};
pub use position::{in_bounds, Position, PositionParseError, BOARD_SIZE};
