//! `issueboard` (ib) - Issue board for small teams
//!
//! Issues live in a `.issueboard/` directory next to the project, as JSONL.

use issueboard::{BoardError, run};

fn main() {
    if let Err(e) = run() {
        tracing::debug!(error = ?e, "command failed");
        let message = e
            .downcast_ref::<BoardError>()
            .map_or_else(|| format!("{e:#}"), BoardError::user_message);
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}
