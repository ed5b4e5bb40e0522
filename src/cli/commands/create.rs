//! Create command implementation.
//!
//! Runs the similarity check first and asks on stdin before creating a
//! likely duplicate, unless `--yes` is given.

use std::io::{self, BufRead, Write};

use issueboard_core::{CreateOutcome, IssueDraft, Result, workflow};

use crate::cli::{CommandContext, CreateArgs};
use crate::format::{CreateResult, format_similar_prompt, print_json};

/// Execute the create command.
///
/// # Errors
///
/// Returns an error if nobody is signed in, validation fails, or the issue
/// cannot be written.
pub fn execute(args: CreateArgs, ctx: &CommandContext) -> Result<()> {
    let paths = ctx.paths()?;
    let author = super::signed_in(&paths)?;
    let mut store = paths.open_store()?;

    let draft = IssueDraft {
        title: args.title,
        description: args.description,
        priority: args.priority.unwrap_or(ctx.config.default_priority),
        assigned_to: args.assignee,
    };

    let assume_yes = args.yes;
    let outcome = workflow::create_issue(&mut store, &author, draft, |similar| {
        if assume_yes {
            return true;
        }
        let stdin = io::stdin();
        confirm(&mut stdin.lock(), &mut io::stderr(), &format_similar_prompt(similar))
    })?;

    match outcome {
        CreateOutcome::Created(issue) => {
            store.save()?;
            if ctx.is_json() {
                print_json(&CreateResult {
                    created: true,
                    issue: Some(issue),
                    similar: Vec::new(),
                })?;
            } else {
                println!("Created {}: {}", issue.id, issue.title);
            }
        }
        CreateOutcome::Declined { similar } => {
            if ctx.is_json() {
                print_json(&CreateResult {
                    created: false,
                    issue: None,
                    similar,
                })?;
            } else {
                println!("Not created.");
            }
        }
    }
    Ok(())
}

/// Ask a yes/no question. End of input or a read failure counts as no.
fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> bool {
    let _ = write!(output, "{prompt} [y/N] ");
    let _ = output.flush();

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) | Err(_) => false,
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
    }
}
