use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use super::storage::Store;
use super::window::{index_rows, Sessions, Window};
use crate::error::{Error, Result};
use crate::tmux::{rows_for_session, shell_quote, CommandRunner, TerminalSize, TmuxManager};

/// What `ls` prints
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Listing {
    /// Session name to a "N windows" count
    Summary(BTreeMap<String, String>),
    /// The stored mapping as is
    Full(Sessions),
}

/// Captures live tmux sessions into the store and replays them back.
pub struct SessionManager<R, S> {
    tmux: TmuxManager<R>,
    store: S,
}

impl<R: CommandRunner, S: Store> SessionManager<R, S> {
    pub fn new(tmux: TmuxManager<R>, store: S) -> Self {
        Self { tmux, store }
    }

    pub fn tmux(&self) -> &TmuxManager<R> {
        &self.tmux
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Capture the session the client is attached to and store it under
    /// `target`, replacing any previous entry of that name.
    ///
    /// Windows are numbered in tmux's listing order. With `capture_cmd`
    /// unset every window records the default shell instead of its
    /// foreground command. A session without windows is stored as an
    /// empty list.
    pub async fn save(&self, target: Option<&str>, capture_cmd: bool) -> Result<Vec<Window>> {
        let name = require_session_name(target)?;

        let current = self.tmux.current_session().await?;
        let listing = self.tmux.list_windows(capture_cmd).await?;
        let windows = index_rows(rows_for_session(&listing, &current)?);

        let mut sessions = self.store.load().await?;
        sessions.insert(name.to_string(), windows.clone());
        self.store.save(&sessions).await?;

        info!(
            session = name,
            captured_from = %current,
            windows = windows.len(),
            "saved session"
        );
        Ok(windows)
    }

    /// Recreate the windows stored under `target` in the current session.
    ///
    /// Each window is created, selected by its stored index, moved to its
    /// directory, optionally given its command, and renamed, before the
    /// next one starts. The first failing tmux call aborts the replay;
    /// windows created up to that point stay.
    pub async fn load(&self, target: Option<&str>, capture_cmd: bool) -> Result<usize> {
        let name = require_session_name(target)?;

        let sessions = self.store.load().await?;
        let windows = sessions
            .get(name)
            .ok_or_else(|| Error::SessionNotFound(name.to_string()))?;

        for window in windows {
            self.tmux.new_window().await?;
            // Assumes tmux numbers new windows in creation order
            self.tmux.select_window(window.idx).await?;

            let cd = format!("cd {}", shell_quote(&window.path.to_string_lossy()));
            self.tmux.send_keys(&cd).await?;
            if capture_cmd {
                self.tmux.send_keys(&window.cmd).await?;
            }

            self.tmux.rename_window(&window.title).await?;
        }

        info!(session = name, windows = windows.len(), "loaded session");
        Ok(windows.len())
    }

    /// Read-only view of the store
    pub async fn list(&self, verbose: bool) -> Result<Listing> {
        let sessions = self.store.load().await?;
        if verbose {
            return Ok(Listing::Full(sessions));
        }

        Ok(Listing::Summary(
            sessions
                .into_iter()
                .map(|(name, windows)| (name, format!("{} windows", windows.len())))
                .collect(),
        ))
    }

    /// Start the server and create a detached session sized to `size`
    pub async fn create(&self, target: Option<&str>, size: TerminalSize) -> Result<()> {
        let name = require_session_name(target)?;

        self.tmux.start_server().await?;
        self.tmux.new_session(name, size).await?;

        info!(session = name, rows = size.rows, cols = size.cols, "created session");
        Ok(())
    }
}

/// The session name as given; absent, empty and whitespace-only names are
/// usage errors
pub fn require_session_name(target: Option<&str>) -> Result<&str> {
    match target {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(Error::invalid_input("--target-session is required")),
    }
}
