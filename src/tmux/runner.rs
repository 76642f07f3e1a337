use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

/// Executes one tmux subcommand.
///
/// With `capture` set the decoded stdout is returned; otherwise all output is
/// discarded and `None` comes back. A spawn failure or nonzero exit is a
/// [`Error::CommandFailed`]. Calls are never retried: most subcommands create
/// state in the server.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, args: &[String], capture: bool) -> Result<Option<String>>;
}

/// Runner that spawns the real tmux binary
#[derive(Debug, Clone)]
pub struct TmuxRunner {
    bin: String,
    socket_name: Option<String>,
}

impl TmuxRunner {
    pub fn new(bin: impl Into<String>, socket_name: Option<String>) -> Self {
        Self {
            bin: bin.into(),
            socket_name,
        }
    }

    fn tmux_cmd(&self) -> Command {
        let mut cmd = Command::new(&self.bin);
        if let Some(socket) = &self.socket_name {
            cmd.args(["-L", socket.as_str()]);
        }
        cmd
    }

    fn describe(&self, args: &[String]) -> String {
        format!("{} {}", self.bin, args.join(" "))
    }
}

#[async_trait]
impl CommandRunner for TmuxRunner {
    async fn run(&self, args: &[String], capture: bool) -> Result<Option<String>> {
        debug!(command = %self.describe(args), capture, "running tmux");

        let output = self
            .tmux_cmd()
            .args(args)
            .output()
            .await
            .map_err(|e| Error::command_failed(format!("{}: {}", self.describe(args), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::command_failed(format!(
                "{} ({}): {}",
                self.describe(args),
                output.status,
                stderr.trim()
            )));
        }

        if !capture {
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_capture_returns_stdout() {
        let runner = TmuxRunner::new("echo", None);
        let out = runner.run(&args(&["hello"]), true).await.unwrap();
        assert_eq!(out.as_deref(), Some("hello\n"));
    }

    #[tokio::test]
    async fn test_no_capture_discards_output() {
        let runner = TmuxRunner::new("echo", None);
        let out = runner.run(&args(&["hello"]), false).await.unwrap();
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn test_socket_name_is_passed_first() {
        let runner = TmuxRunner::new("echo", Some("layouts".to_string()));
        let out = runner.run(&args(&["list-windows"]), true).await.unwrap();
        assert_eq!(out.as_deref(), Some("-L layouts list-windows\n"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_command_failed() {
        let runner = TmuxRunner::new("false", None);
        let err = runner.run(&args(&["new-window"]), false).await.unwrap_err();
        assert!(matches!(err, Error::CommandFailed(_)));
    }

    #[tokio::test]
    async fn test_spawn_failure_is_command_failed() {
        let runner = TmuxRunner::new("/nonexistent/tmux-binary", None);
        let err = runner.run(&args(&["start-server"]), true).await.unwrap_err();
        assert!(matches!(err, Error::CommandFailed(_)));
        assert!(err.to_string().contains("start-server"));
    }
}
