use issueboard_core::Result;

use crate::cli::{CommandContext, InitArgs};
use crate::storage;

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if the board already exists (without `--force`) or the
/// directory cannot be written.
pub fn execute(args: &InitArgs, ctx: &CommandContext) -> Result<()> {
    let target = ctx.init_target()?;
    let paths = storage::init_board(&target, args.force)?;

    if ctx.is_json() {
        crate::format::print_json(&serde_json::json!({
            "initialized": true,
            "path": paths.root,
        }))?;
    } else {
        println!("Initialized issue board in {}", paths.root.display());
    }
    Ok(())
}
