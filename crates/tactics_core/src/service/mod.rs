//! Presentation-facing use-case services.
//!
//! # Responsibility
//! - Orchestrate store, editor and slot repository into UI-level actions.
//! - Keep presentation layers decoupled from storage details.

pub mod board_service;
