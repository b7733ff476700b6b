//! Read-only render projection of a board.
//!
//! # Responsibility
//! - Give presentation and image export a draw list for the current board.
//!
//! # Invariants
//! - Building a view never mutates the board.

pub mod board_view;
