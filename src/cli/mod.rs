//! Command-line interface for `issueboard`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use issueboard_core::{BoardError, Priority, Selection, Status};

use crate::config::{self, BOARD_DIR_NAME, CliOverrides, Config};
use crate::logging;
use crate::storage::BoardPaths;

/// `issueboard` (ib) - Issue board for small teams.
#[derive(Parser, Debug)]
#[command(name = "ib")]
#[command(
    author,
    version,
    about = "Issue board for small teams",
    long_about = None,
    after_help = "Issues move Open -> In Progress -> Done; Open cannot jump straight to Done."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Issue board directory (default: nearest .issueboard/)
    #[arg(long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize an issue board in the current directory
    Init(InitArgs),

    /// Create an account
    Signup(CredentialArgs),

    /// Sign in
    Login(CredentialArgs),

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Create a new issue
    Create(CreateArgs),

    /// List issues, newest first
    List(ListArgs),

    /// Show issue details
    Show(ShowArgs),

    /// Move an issue to another status
    Status(StatusArgs),

    /// List existing issues with titles similar to TITLE
    Similar(SimilarArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Reuse an existing board directory
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CredentialArgs {
    /// Account email
    pub email: String,

    /// Account password
    #[arg(long, env = "ISSUEBOARD_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// Issue title
    pub title: String,

    /// Longer description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Priority: low, medium or high (default from config)
    #[arg(short, long)]
    pub priority: Option<Priority>,

    /// Assignee name
    #[arg(short, long)]
    pub assignee: Option<String>,

    /// Create without asking when similar issues exist
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Status filter: all, open, in-progress or done
    #[arg(short, long, default_value_t)]
    pub status: Selection<Status>,

    /// Priority filter: all, low, medium or high
    #[arg(short, long, default_value_t)]
    pub priority: Selection<Priority>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Issue ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Issue ID
    pub id: String,

    /// New status: open, in-progress or done
    pub status: Status,
}

#[derive(Args, Debug)]
pub struct SimilarArgs {
    /// Candidate title
    pub title: String,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// State shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: Config,
    board_dir: Option<PathBuf>,
    explicit_dir: Option<PathBuf>,
}

impl CommandContext {
    #[must_use]
    pub fn new(
        config: Config,
        board_dir: Option<PathBuf>,
        explicit_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            config,
            board_dir,
            explicit_dir,
        }
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.config.json
    }

    /// Paths of the resolved board.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` when no board was found.
    pub fn paths(&self) -> issueboard_core::Result<BoardPaths> {
        self.board_dir
            .clone()
            .map(BoardPaths::new)
            .ok_or(BoardError::NotInitialized)
    }

    /// Where `init` should create the board.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the current directory is unavailable.
    pub fn init_target(&self) -> issueboard_core::Result<PathBuf> {
        if let Some(dir) = &self.explicit_dir {
            return Ok(dir.clone());
        }
        Ok(env::current_dir()?.join(BOARD_DIR_NAME))
    }
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Run an already parsed command line.
///
/// # Errors
///
/// Returns an error if configuration, logging setup or the command fails.
pub fn execute(cli: Cli) -> Result<()> {
    let explicit_dir = config::explicit_board_dir(cli.dir.as_deref());
    let board_dir = config::resolve_board_dir(cli.dir.as_deref()).ok();

    let overrides = CliOverrides {
        json: cli.json.then_some(true),
        default_priority: None,
        log_file: cli.log_file.clone(),
    };
    let cfg = config::load_config(board_dir.as_deref(), &overrides)?;

    logging::init_logging(cli.verbose, cli.quiet, cfg.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let ctx = CommandContext::new(cfg, board_dir, explicit_dir);
    let Some(command) = cli.command else {
        println!("ib - Issue board for small teams. Use --help for usage.");
        return Ok(());
    };
    tracing::debug!(command = command.name(), "dispatching");

    match command {
        Commands::Init(args) => commands::init::execute(&args, &ctx)?,
        Commands::Signup(args) => commands::auth::signup(&args, &ctx)?,
        Commands::Login(args) => commands::auth::login(&args, &ctx)?,
        Commands::Logout => commands::auth::logout(&ctx)?,
        Commands::Whoami => commands::auth::whoami(&ctx)?,
        Commands::Create(args) => commands::create::execute(args, &ctx)?,
        Commands::List(args) => commands::list::execute(&args, &ctx)?,
        Commands::Show(args) => commands::show::execute(&args, &ctx)?,
        Commands::Status(args) => commands::status::execute(&args, &ctx)?,
        Commands::Similar(args) => commands::similar::execute(&args, &ctx)?,
        Commands::Completions(args) => commands::completions::execute(&args),
        Commands::Version => commands::version::execute(&ctx)?,
    }

    Ok(())
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::Signup(_) => "signup",
            Self::Login(_) => "login",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::Create(_) => "create",
            Self::List(_) => "list",
            Self::Show(_) => "show",
            Self::Status(_) => "status",
            Self::Similar(_) => "similar",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_filters_default_to_all() {
        let cli = Cli::try_parse_from(["ib", "list"]).unwrap();
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.status, Selection::All);
        assert_eq!(args.priority, Selection::All);
    }

    #[test]
    fn test_list_filter_parsing() {
        let cli =
            Cli::try_parse_from(["ib", "list", "--status", "in-progress", "-p", "High"]).unwrap();
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.status, Selection::Only(Status::InProgress));
        assert_eq!(args.priority, Selection::Only(Priority::High));
    }

    #[test]
    fn test_invalid_status_rejected_by_parser() {
        assert!(Cli::try_parse_from(["ib", "status", "iss-1", "closed"]).is_err());
    }

    #[test]
    fn test_create_flags() {
        let cli = Cli::try_parse_from([
            "ib", "create", "Login bug", "-d", "details", "-p", "medium", "-a", "alex", "--yes",
        ])
        .unwrap();
        let Some(Commands::Create(args)) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(args.title, "Login bug");
        assert_eq!(args.priority, Some(Priority::Medium));
        assert_eq!(args.assignee.as_deref(), Some("alex"));
        assert!(args.yes);
    }
}
