//! Pixel <-> board geometry.
//!
//! # Responsibility
//! - Convert between normalized board coordinates and pixels.
//! - Fit the pitch into a stage and answer pointer hit-tests.
//!
//! # Invariants
//! - Nothing in this module produces non-finite coordinates.
//! - All functions are pure.

pub mod coords;
pub mod field;
