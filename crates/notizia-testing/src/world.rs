//! TestWorld pattern for CLI integration tests.
//!
//! Each world owns a temporary data directory, so tests never touch the
//! user's real practice database or saved queries.

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated environment for running the `notizia` binary.
///
/// # Example
/// ```no_run
/// use notizia_testing::TestWorld;
///
/// let world = TestWorld::new();
/// world.run(&["client", "add", "Anna"]).unwrap();
/// let clients = world.run_json(&["client", "list"]).unwrap();
/// assert_eq!(clients.as_array().unwrap().len(), 1);
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    env_vars: HashMap<String, String>,
    data_dir_flag: bool,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".notizia");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            temp_dir,
            data_dir,
            env_vars: HashMap::new(),
            data_dir_flag: true,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Locate the data directory through `NOTIZIA_PATH` instead of `--data-dir`.
    pub fn with_data_dir_from_env(self) -> Self {
        let data_dir = self.data_dir.to_string_lossy().to_string();
        let mut world = self.with_env("NOTIZIA_PATH", data_dir);
        world.data_dir_flag = false;
        world
    }

    /// Write `config.toml` into the data directory.
    pub fn with_config(self, contents: &str) -> Self {
        std::fs::write(self.data_dir.join("config.toml"), contents)
            .expect("Failed to write config");
        self
    }

    /// Point a command at this world's data directory and output format.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command, format: &str) -> &'a mut Command {
        if self.data_dir_flag {
            cmd.arg("--data-dir").arg(self.data_dir());
        }
        cmd.arg("--format")
            .arg(format)
            .current_dir(self.temp_dir.path())
            .env_remove("NOTIZIA_PATH");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run the binary with plain output.
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        self.run_with_format(args, "plain")
    }

    /// Run the binary with JSON output and parse stdout.
    ///
    /// Fails when the command exits unsuccessfully.
    pub fn run_json(&self, args: &[&str]) -> Result<serde_json::Value> {
        let result = self.run_with_format(args, "json")?;
        if !result.success() {
            anyhow::bail!(
                "notizia {:?} failed: {}",
                args,
                result.stderr().trim_end()
            );
        }
        result
            .json()
            .with_context(|| format!("stdout of {:?} is not JSON", args))
    }

    #[allow(deprecated)]
    fn run_with_format(&self, args: &[&str], format: &str) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("notizia")
            .map_err(|e| anyhow::anyhow!("Failed to find notizia binary: {}", e))?;
        self.configure_command(&mut cmd, format);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
