use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::tmux::WindowRow;

/// Every stored session, keyed by name
pub type Sessions = BTreeMap<String, Vec<Window>>;

/// One captured tmux window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Position in capture order, starting at 0. Not tmux's window number.
    pub idx: usize,
    pub title: String,
    /// Working directory of the window's pane at capture time
    pub path: PathBuf,
    /// Foreground command, or the default shell when commands were not captured
    pub cmd: String,
}

impl Window {
    pub fn from_row(idx: usize, row: WindowRow) -> Self {
        Self {
            idx,
            title: row.title,
            path: PathBuf::from(row.path),
            cmd: row.cmd,
        }
    }
}

/// Build windows from listing rows, numbering them contiguously from 0
pub fn index_rows(rows: Vec<WindowRow>) -> Vec<Window> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| Window::from_row(idx, row))
        .collect()
}
