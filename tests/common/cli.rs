//! CLI harness: an isolated temp workspace and a runner for the `ib` binary.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub const EMAIL: &str = "kim@example.com";
pub const PASSWORD: &str = "hunter22";

/// A temp directory used as both project root and `HOME`.
pub struct BoardWorkspace {
    pub temp: TempDir,
    pub root: PathBuf,
}

impl BoardWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("temp dir");
        let root = temp.path().to_path_buf();
        Self { temp, root }
    }

    /// Workspace that is initialized with a signed-in user.
    pub fn signed_in() -> Self {
        let workspace = Self::new();
        let init = run_ib(&workspace, ["init"], "init");
        assert!(init.status.success(), "init failed: {}", init.stderr);
        let signup = run_ib(&workspace, ["signup", EMAIL, "--password", PASSWORD], "signup");
        assert!(signup.status.success(), "signup failed: {}", signup.stderr);
        let login = run_ib(&workspace, ["login", EMAIL, "--password", PASSWORD], "login");
        assert!(login.status.success(), "login failed: {}", login.stderr);
        workspace
    }

    pub fn board_dir(&self) -> PathBuf {
        self.root.join(".issueboard")
    }

    pub fn path(&self) -> &Path {
        &self.root
    }
}

/// Captured result of one `ib` run.
pub struct RunOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", self.stdout))
    }
}

/// An `ib` command isolated to `workspace`: cwd, HOME and config dirs point
/// inside it and `ISSUEBOARD_*` variables are cleared.
pub fn ib(workspace: &BoardWorkspace) -> Command {
    let mut cmd = cargo_bin_cmd!("ib");
    cmd.current_dir(&workspace.root)
        .env("HOME", &workspace.root)
        .env("XDG_CONFIG_HOME", workspace.root.join(".config"))
        .env_remove("ISSUEBOARD_DIR")
        .env_remove("ISSUEBOARD_DEFAULT_PRIORITY")
        .env_remove("ISSUEBOARD_LOG_FILE")
        .env_remove("ISSUEBOARD_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

/// Run `ib` with `args` inside `workspace`. `label` names the step in failures.
pub fn run_ib<I, S>(workspace: &BoardWorkspace, args: I, label: &str) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    run_ib_with_stdin(workspace, args, "", label)
}

/// Like [`run_ib`], feeding `stdin` to the process.
pub fn run_ib_with_stdin<I, S>(
    workspace: &BoardWorkspace,
    args: I,
    stdin: &str,
    label: &str,
) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let output = ib(workspace)
        .args(args)
        .write_stdin(stdin)
        .output()
        .unwrap_or_else(|e| panic!("{label}: failed to run ib: {e}"));
    RunOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Create an issue with `--yes --json` and return its id.
pub fn create_issue(workspace: &BoardWorkspace, title: &str, extra: &[&str]) -> String {
    let mut args = vec!["create", title, "--yes", "--json"];
    args.extend_from_slice(extra);
    let out = run_ib(workspace, &args, "create");
    assert!(out.status.success(), "create failed: {}", out.stderr);
    out.json()["issue"]["id"]
        .as_str()
        .expect("issue id")
        .to_string()
}
