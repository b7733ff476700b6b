//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tactics_core` linkage.
//! - Print the default board so its wire format can be eyeballed.

use std::process::ExitCode;
use tactics_core::BoardStore;

fn main() -> ExitCode {
    println!("tactics_core ping={}", tactics_core::ping());
    println!("tactics_core version={}", tactics_core::core_version());

    let board = BoardStore::new();
    match serde_json::to_string_pretty(board.state()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to serialize default board: {err}");
            ExitCode::FAILURE
        }
    }
}
