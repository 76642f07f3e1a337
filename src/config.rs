use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::session::Storage;
use crate::tmux::DEFAULT_TMUX_BIN;

/// Optional `~/.tmux-layout/config.toml`
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// tmux binary to run
    pub tmux_bin: Option<String>,
    /// Server socket name, passed as `tmux -L`
    pub socket_name: Option<String>,
    /// Where sessions are stored; `~/` is expanded
    pub state_file: Option<String>,
}

impl ConfigFile {
    pub fn default_path() -> Result<PathBuf> {
        Ok(Storage::get_tmux_layout_dir()?.join("config.toml"))
    }

    /// Load the config named on the command line, or the default one.
    pub async fn load(explicit: Option<&Path>) -> Result<Option<Self>> {
        match explicit {
            Some(path) => Self::load_from(path, true).await,
            None => Self::load_from(&Self::default_path()?, false).await,
        }
    }

    /// Read the config file at `path`.
    ///
    /// A missing file is "no config" unless it was `required`. Other read
    /// errors fail a required file and are logged and skipped otherwise. A
    /// file that does not parse is always an error.
    pub async fn load_from(path: &Path, required: bool) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if required {
                    return Err(Error::config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                return Ok(None);
            }
            Err(e) => {
                if required {
                    return Err(e.into());
                }
                warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
                return Ok(None);
            }
        };
        debug!(path = %path.display(), "loaded config file");
        Ok(Some(Self::parse(&content)?))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Effective settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tmux_bin: String,
    pub socket_name: Option<String>,
    pub state_file: PathBuf,
}

impl Settings {
    /// Command line beats config file beats built-in defaults
    pub fn resolve(config: Option<ConfigFile>, state_file: Option<PathBuf>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let state_file = match (state_file, config.state_file) {
            (Some(path), _) => path,
            (None, Some(path)) => expand_home(&path)?,
            (None, None) => Storage::default_path()?,
        };

        let tmux_bin = config
            .tmux_bin
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TMUX_BIN.to_string());

        Ok(Self {
            tmux_bin,
            socket_name: config.socket_name.filter(|s| !s.trim().is_empty()),
            state_file,
        })
    }
}

fn expand_home(path: &str) -> Result<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir()
                .ok_or_else(|| Error::config("Cannot determine home directory"))?;
            Ok(home.join(rest))
        }
        None => Ok(PathBuf::from(path)),
    }
}
