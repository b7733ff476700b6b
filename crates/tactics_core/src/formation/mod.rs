//! Formation catalog.
//!
//! # Responsibility
//! - Provide the closed set of canonical single-team starting layouts.
//! - Provide the ball token factory.
//!
//! # Invariants
//! - Every formation yields exactly six players with ids `p1..p6`.
//! - Every call builds fresh values; results never share state.

pub mod catalog;
