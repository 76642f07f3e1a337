use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::Sessions;
use crate::error::{Error, Result};

/// Persisted mapping of session name to windows.
///
/// `save` replaces everything that was stored; callers do their own
/// read-modify-write. Nothing serializes concurrent writers, the last
/// `save` wins.
#[async_trait]
pub trait Store: Send + Sync {
    async fn load(&self) -> Result<Sessions>;
    async fn save(&self, sessions: &Sessions) -> Result<()>;
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Open the store at `path`, creating the file (and its parent
    /// directory) as an empty mapping when it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        if !path.exists() {
            debug!(path = %path.display(), "creating empty session store");
            let json = serde_json::to_string_pretty(&Sessions::new())?;
            fs::write(&path, json).await?;
        }

        Ok(Self { path })
    }

    /// Get tmux-layout base directory
    pub fn get_tmux_layout_dir() -> Result<PathBuf> {
        let home =
            dirs::home_dir().ok_or_else(|| Error::config("Cannot determine home directory"))?;
        Ok(home.join(".tmux-layout"))
    }

    /// Default location of the state file
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::get_tmux_layout_dir()?.join("sessions.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Store for Storage {
    async fn load(&self) -> Result<Sessions> {
        if !self.path.exists() {
            return Ok(Sessions::new());
        }

        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Sessions::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    async fn save(&self, sessions: &Sessions) -> Result<()> {
        let json = serde_json::to_string_pretty(sessions)?;
        replace_file(&self.path, json.as_bytes()).await?;

        debug!(path = %self.path.display(), sessions = sessions.len(), "saved session store");
        Ok(())
    }
}

/// Overwrite `path` in one step: readers see the old or the new content,
/// never a partial file.
async fn replace_file(path: &Path, contents: &[u8]) -> Result<()> {
    let staging = path.with_extension("tmp");

    let mut file = fs::File::create(&staging).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&staging, path).await?;
    Ok(())
}

/// Store kept in memory, for exercising the session manager
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: std::sync::Mutex<Sessions>,
    saves: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_sessions(sessions: Sessions) -> Self {
        Self {
            sessions: std::sync::Mutex::new(sessions),
            saves: Default::default(),
        }
    }

    pub fn snapshot(&self) -> Sessions {
        self.sessions.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl Store for MemoryStore {
    async fn load(&self) -> Result<Sessions> {
        Ok(self.snapshot())
    }

    async fn save(&self, sessions: &Sessions) -> Result<()> {
        *self.sessions.lock().unwrap() = sessions.clone();
        self.saves.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}
