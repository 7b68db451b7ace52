//! External command execution: the one place that spawns OS processes.

pub mod normalize;

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Failure of an external tool invocation.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be launched at all.
    #[error("failed to launch {bin}: {source}")]
    Launch {
        bin: String,
        #[source]
        source: std::io::Error,
    },
    /// The process ran but exited non-zero. Carries the tool's error text
    /// (stderr, or the exit status when stderr is empty) — never its stdout.
    #[error("{0}")]
    Failed(String),
}

/// Captured stdout on success, error text on failure.
pub type CommandResult = Result<String, CommandError>;

/// Seam for spawning external tools, so orchestration and route handlers can
/// be driven by a fake in tests.
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Run the tool to completion and capture its stdout. Blocks the calling
    /// request for the process's full runtime; no timeout is enforced, so a
    /// hung tool hangs that one request. No retry on failure.
    async fn run(&self, bin: &str, args: &[String], dir: Option<&Path>) -> CommandResult;

    /// Launch the tool without waiting. `Ok` means only that the spawn call
    /// returned; the child's exit status and output are never observed.
    async fn spawn_detached(
        &self,
        bin: &str,
        args: &[String],
        dir: Option<&Path>,
    ) -> Result<(), CommandError>;
}

/// The real invoker: `tokio::process` against the local OS.
pub struct ProcessInvoker;

#[async_trait]
impl Invoker for ProcessInvoker {
    async fn run(&self, bin: &str, args: &[String], dir: Option<&Path>) -> CommandResult {
        debug!(bin, ?args, "running external command");
        let mut cmd = Command::new(bin);
        cmd.args(args);
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }
        let output = cmd.output().await.map_err(|source| CommandError::Launch {
            bin: bin.to_string(),
            source,
        })?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        let text = if stderr.trim().is_empty() {
            format!("exit status {}", output.status.code().unwrap_or(-1))
        } else {
            stderr.trim_end().to_string()
        };
        Err(CommandError::Failed(text))
    }

    async fn spawn_detached(
        &self,
        bin: &str,
        args: &[String],
        dir: Option<&Path>,
    ) -> Result<(), CommandError> {
        debug!(bin, ?args, "launching detached command");
        let mut cmd = Command::new(bin);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }
        // Dropping the Child leaves it running; the runtime reaps it when it
        // eventually exits. That is the point: restart-start is fire-and-forget.
        cmd.spawn()
            .map(drop)
            .map_err(|source| CommandError::Launch {
                bin: bin.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn run_captures_stdout() {
        let out = ProcessInvoker
            .run("echo", &args(&["hello", "world"]), None)
            .await
            .unwrap();
        assert_eq!(out, "hello world\n");
    }

    #[tokio::test]
    async fn run_honors_working_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let out = ProcessInvoker
            .run("pwd", &[], Some(tmp.path()))
            .await
            .unwrap();
        let reported = std::path::Path::new(out.trim());
        // Compare canonicalized: the tempdir may sit behind a symlink.
        assert_eq!(
            reported.canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn nonzero_exit_reports_exit_status_not_stdout() {
        let err = ProcessInvoker.run("false", &[], None).await.unwrap_err();
        assert_eq!(err.to_string(), "exit status 1");
    }

    #[tokio::test]
    async fn launch_failure_names_the_binary() {
        let err = ProcessInvoker
            .run("definitely-not-a-real-binary", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Launch { .. }));
        assert!(err.to_string().contains("definitely-not-a-real-binary"));
    }

    #[tokio::test]
    async fn spawn_detached_returns_without_waiting() {
        ProcessInvoker
            .spawn_detached("sleep", &args(&["5"]), None)
            .await
            .unwrap();
        // Returned well before the 5s sleep finished — nothing to join on.
    }

    #[tokio::test]
    async fn spawn_detached_surfaces_launch_failure() {
        let err = ProcessInvoker
            .spawn_detached("definitely-not-a-real-binary", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Launch { .. }));
    }
}
