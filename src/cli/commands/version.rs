//! Version command implementation.

use issueboard_core::Result;
use serde::Serialize;

use crate::cli::CommandContext;
use crate::format::print_json;

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    build: &'a str,
    core: &'a str,
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    if ctx.is_json() {
        print_json(&VersionOutput {
            version,
            build,
            core: issueboard_core::VERSION,
        })?;
    } else {
        println!("ib version {version} ({build})");
    }
    Ok(())
}
