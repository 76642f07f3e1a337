use std::fmt::Display;

use tracing::debug;

use super::listing::list_windows_format;
use super::runner::CommandRunner;
use crate::error::Result;

/// Rows and columns of the controlling terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub rows: u16,
    pub cols: u16,
}

impl Default for TerminalSize {
    fn default() -> Self {
        Self { rows: 24, cols: 80 }
    }
}

/// Query the size of the terminal we are running in.
/// Falls back to 24x80 when stdout is not a terminal.
pub fn terminal_size() -> TerminalSize {
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => TerminalSize { rows, cols },
        _ => TerminalSize::default(),
    }
}

/// Typed tmux operations on top of a [`CommandRunner`].
///
/// Each method maps to one tmux invocation (two for `send_keys`) and does
/// no interpretation beyond trimming captured output.
#[derive(Debug)]
pub struct TmuxManager<R> {
    runner: R,
}

impl<R: CommandRunner> TmuxManager<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    async fn exec(&self, args: &[&str]) -> Result<()> {
        let args = to_owned_args(args);
        self.runner.run(&args, false).await?;
        Ok(())
    }

    async fn query(&self, args: &[&str]) -> Result<String> {
        let args = to_owned_args(args);
        Ok(self.runner.run(&args, true).await?.unwrap_or_default())
    }

    /// Start the server without creating any session
    pub async fn start_server(&self) -> Result<()> {
        self.exec(&["start-server"]).await
    }

    /// Name of the session the current client is attached to
    pub async fn current_session(&self) -> Result<String> {
        let out = self.query(&["display-message", "-p", "#S"]).await?;
        let name = out.trim().to_string();
        debug!(session = %name, "current tmux session");
        Ok(name)
    }

    /// Raw `list-windows -a` output for every session on the server
    pub async fn list_windows(&self, capture_cmd: bool) -> Result<String> {
        let format = list_windows_format(capture_cmd);
        self.query(&["list-windows", "-a", "-F", &format]).await
    }

    pub async fn new_window(&self) -> Result<()> {
        self.exec(&["new-window"]).await
    }

    pub async fn select_window(&self, index: impl Display) -> Result<()> {
        let target = index.to_string();
        self.exec(&["select-window", "-t", &target]).await
    }

    /// Type `keys` into the current pane as literal text, then press Enter.
    /// Without `-l` a word such as `Escape` or `C-c` would be sent as a key.
    pub async fn send_keys(&self, keys: &str) -> Result<()> {
        self.exec(&["send-keys", "-l", keys]).await?;
        self.exec(&["send-keys", "Enter"]).await
    }

    /// Rename the current window
    pub async fn rename_window(&self, title: &str) -> Result<()> {
        self.exec(&["rename-window", title]).await
    }

    /// Create a detached session of the given size
    pub async fn new_session(&self, name: &str, size: TerminalSize) -> Result<()> {
        let cols = size.cols.to_string();
        let rows = size.rows.to_string();
        self.exec(&["new-session", "-d", "-s", name, "-x", &cols, "-y", &rows])
            .await
    }
}

fn to_owned_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Quote `s` for a POSIX shell prompt
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmux::fake::RecordingRunner;

    #[tokio::test]
    async fn test_current_session_is_trimmed() {
        let runner = RecordingRunner::new().with_output("display-message", "work\n");
        let tmux = TmuxManager::new(runner);
        assert_eq!(tmux.current_session().await.unwrap(), "work");
        assert_eq!(
            tmux.runner().calls(),
            vec![vec!["display-message", "-p", "#S"]]
        );
    }

    #[tokio::test]
    async fn test_window_commands() {
        let tmux = TmuxManager::new(RecordingRunner::new());
        tmux.new_window().await.unwrap();
        tmux.select_window(3).await.unwrap();
        tmux.send_keys("cd '/tmp'").await.unwrap();
        tmux.rename_window("logs").await.unwrap();

        assert_eq!(
            tmux.runner().calls(),
            vec![
                vec!["new-window"],
                vec!["select-window", "-t", "3"],
                vec!["send-keys", "-l", "cd '/tmp'"],
                vec!["send-keys", "Enter"],
                vec!["rename-window", "logs"],
            ]
        );
    }

    #[tokio::test]
    async fn test_send_keys_key_names_stay_literal() {
        let tmux = TmuxManager::new(RecordingRunner::new());
        tmux.send_keys("C-c").await.unwrap();

        assert_eq!(
            tmux.runner().calls(),
            vec![vec!["send-keys", "-l", "C-c"], vec!["send-keys", "Enter"]]
        );
    }

    #[tokio::test]
    async fn test_new_session_uses_size() {
        let tmux = TmuxManager::new(RecordingRunner::new());
        tmux.start_server().await.unwrap();
        tmux.new_session("work", TerminalSize { rows: 50, cols: 200 })
            .await
            .unwrap();

        assert_eq!(
            tmux.runner().calls(),
            vec![
                vec!["start-server"],
                vec!["new-session", "-d", "-s", "work", "-x", "200", "-y", "50"],
            ]
        );
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("/home/u/proj"), "'/home/u/proj'");
        assert_eq!(shell_quote("/tmp/it's"), "'/tmp/it'\\''s'");
    }
}
