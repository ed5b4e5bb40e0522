//! Configuration management for `issueboard`.
//!
//! Configuration is layered, later layers winning:
//! - Built-in defaults
//! - User config (`$XDG_CONFIG_HOME/issueboard/config.yaml`, else `~/.config/issueboard/config.yaml`)
//! - Workspace config (`.issueboard/config.yaml`)
//! - Environment variable overrides (`ISSUEBOARD_*`)
//! - Command-line flags

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use issueboard_core::{BoardError, Priority, Result};
use serde::Deserialize;

/// Name of the per-project workspace directory.
pub const BOARD_DIR_NAME: &str = ".issueboard";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

pub const ENV_BOARD_DIR: &str = "ISSUEBOARD_DIR";
pub const ENV_DEFAULT_PRIORITY: &str = "ISSUEBOARD_DEFAULT_PRIORITY";
pub const ENV_LOG_FILE: &str = "ISSUEBOARD_LOG_FILE";

/// Effective configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Priority used by `create` when `-p` is not given.
    pub default_priority: Priority,
    /// Append logs here instead of stderr.
    pub log_file: Option<PathBuf>,
    /// Emit JSON instead of text.
    pub json: bool,
}

/// Values taken from command-line flags. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub json: Option<bool>,
    pub default_priority: Option<Priority>,
    pub log_file: Option<PathBuf>,
}

/// One YAML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    #[serde(default)]
    default_priority: Option<String>,
    #[serde(default)]
    log_file: Option<String>,
    #[serde(default)]
    json: Option<bool>,
}

/// Load the effective configuration.
///
/// `board_dir` is the workspace directory, if one was found; its
/// `config.yaml` is layered over the user config.
///
/// # Errors
///
/// Returns `Config` if a config file cannot be parsed or holds an invalid
/// value, or if an environment override is invalid.
pub fn load_config(board_dir: Option<&Path>, overrides: &CliOverrides) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(path) = default_config_path() {
        apply_file(&mut cfg, &path)?;
    }
    if let Some(dir) = board_dir {
        apply_file(&mut cfg, &dir.join(CONFIG_FILE_NAME))?;
    }
    apply_env(&mut cfg)?;
    apply_overrides(&mut cfg, overrides);

    tracing::debug!(?cfg, "configuration loaded");
    Ok(cfg)
}

/// Location of the user-level config file.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        if !xdg.trim().is_empty() {
            return Some(PathBuf::from(xdg).join("issueboard").join(CONFIG_FILE_NAME));
        }
    }
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(
                PathBuf::from(home)
                    .join(".config")
                    .join("issueboard")
                    .join(CONFIG_FILE_NAME),
            );
        }
    }
    None
}

/// Walk up from `start` looking for a `.issueboard` directory.
#[must_use]
pub fn discover_board_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(BOARD_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Resolve the workspace directory.
///
/// An explicit `--dir` wins, then `ISSUEBOARD_DIR`, then discovery from the
/// current directory.
///
/// # Errors
///
/// Returns `NotInitialized` if no workspace can be found, or `Io` if the
/// current directory is unavailable.
pub fn resolve_board_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit_board_dir(explicit) {
        if dir.is_dir() {
            return Ok(normalize(&dir));
        }
        return Err(BoardError::NotInitialized);
    }

    let cwd = env::current_dir()?;
    discover_board_dir(&cwd)
        .map(|dir| normalize(&dir))
        .ok_or(BoardError::NotInitialized)
}

/// The directory `--dir` or `ISSUEBOARD_DIR` names, whether or not it exists.
#[must_use]
pub fn explicit_board_dir(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(|| {
        env::var(ENV_BOARD_DIR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    })
}

fn normalize(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn apply_file(cfg: &mut Config, path: &Path) -> Result<()> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(BoardError::Io(e)),
    };
    if text
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'))
    {
        return Ok(());
    }

    let partial: PartialConfig = serde_yaml::from_str(&text)
        .map_err(|e| BoardError::Config(format!("{}: {e}", path.display())))?;
    apply_partial(cfg, partial)
        .map_err(|e| BoardError::Config(format!("{}: {e}", path.display())))?;

    tracing::debug!(path = %path.display(), "applied config file");
    Ok(())
}

fn apply_partial(cfg: &mut Config, partial: PartialConfig) -> Result<()> {
    if let Some(priority) = partial.default_priority.filter(|p| !p.trim().is_empty()) {
        cfg.default_priority = priority.parse()?;
    }
    if let Some(log_file) = partial.log_file.filter(|p| !p.trim().is_empty()) {
        cfg.log_file = Some(expand_tilde(log_file.trim()));
    }
    if let Some(json) = partial.json {
        cfg.json = json;
    }
    Ok(())
}

fn apply_env(cfg: &mut Config) -> Result<()> {
    if let Ok(priority) = env::var(ENV_DEFAULT_PRIORITY) {
        if !priority.trim().is_empty() {
            cfg.default_priority = priority
                .parse()
                .map_err(|e| BoardError::Config(format!("{ENV_DEFAULT_PRIORITY}: {e}")))?;
        }
    }
    if let Ok(log_file) = env::var(ENV_LOG_FILE) {
        if !log_file.trim().is_empty() {
            cfg.log_file = Some(expand_tilde(log_file.trim()));
        }
    }
    Ok(())
}

fn apply_overrides(cfg: &mut Config, overrides: &CliOverrides) {
    if let Some(json) = overrides.json {
        cfg.json = json;
    }
    if let Some(priority) = overrides.default_priority {
        cfg.default_priority = priority;
    }
    if let Some(log_file) = &overrides.log_file {
        cfg.log_file = Some(log_file.clone());
    }
}

fn expand_tilde(input: &str) -> PathBuf {
    let Some(home) = env::var("HOME").ok().filter(|h| !h.trim().is_empty()) else {
        return PathBuf::from(input);
    };
    if input == "~" {
        return PathBuf::from(home);
    }
    input
        .strip_prefix("~/")
        .map_or_else(|| PathBuf::from(input), |rest| PathBuf::from(&home).join(rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.default_priority, Priority::Low);
        assert!(!cfg.json);
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn test_workspace_file_applied() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "default_priority: high\njson: true\n",
        )
        .unwrap();

        let mut cfg = Config::default();
        apply_file(&mut cfg, &temp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(cfg.default_priority, Priority::High);
        assert!(cfg.json);
    }

    #[test]
    fn test_comment_only_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "# nothing set\n# default_priority: medium\n").unwrap();

        let mut cfg = Config::default();
        apply_file(&mut cfg, &path).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_missing_file_ignored() {
        let temp = TempDir::new().unwrap();
        let mut cfg = Config::default();
        apply_file(&mut cfg, &temp.path().join("absent.yaml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_invalid_priority_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "default_priority: urgent\n").unwrap();

        let mut cfg = Config::default();
        let err = apply_file(&mut cfg, &path).unwrap_err();
        assert!(matches!(err, BoardError::Config(_)));
    }

    #[test]
    fn test_overrides_win() {
        let mut cfg = Config {
            default_priority: Priority::High,
            log_file: None,
            json: true,
        };
        apply_overrides(
            &mut cfg,
            &CliOverrides {
                json: Some(false),
                default_priority: Some(Priority::Medium),
                log_file: Some(PathBuf::from("ib.log")),
            },
        );
        assert_eq!(cfg.default_priority, Priority::Medium);
        assert!(!cfg.json);
        assert_eq!(cfg.log_file, Some(PathBuf::from("ib.log")));
    }

    #[test]
    fn test_discover_walks_up() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(BOARD_DIR_NAME)).unwrap();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let found = discover_board_dir(&nested).unwrap();
        assert_eq!(found, temp.path().join(BOARD_DIR_NAME));
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/var/log/ib.log"), PathBuf::from("/var/log/ib.log"));
        assert_eq!(expand_tilde("ib.log"), PathBuf::from("ib.log"));
    }
}
