use crate::error::{Error, Result};

/// Column separator used in every `list-windows -F` format we request
pub const FIELD_DELIMITER: char = ';';

const COLUMNS: usize = 4;

/// Format string for `list-windows -a -F`.
///
/// The fourth column is the pane's foreground command, or the server's
/// default shell when commands are not being captured.
pub fn list_windows_format(capture_cmd: bool) -> String {
    let last = if capture_cmd {
        "#{pane_current_command}"
    } else {
        "#{default-shell}"
    };
    [
        "#{session_name}",
        "#{window_name}",
        "#{pane_current_path}",
        last,
    ]
    .join(FIELD_DELIMITER.to_string().as_str())
}

/// One parsed line of `list-windows` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRow {
    pub session: String,
    pub title: String,
    pub path: String,
    pub cmd: String,
}

impl WindowRow {
    /// Split a line into exactly four columns. A delimiter inside a title,
    /// path or command makes the line ambiguous and is rejected.
    pub fn parse(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if parts.len() != COLUMNS {
            return Err(Error::tmux(format!(
                "expected {} columns in window listing, got {}: {:?}",
                COLUMNS,
                parts.len(),
                line
            )));
        }

        Ok(Self {
            session: parts[0].to_string(),
            title: parts[1].to_string(),
            path: parts[2].to_string(),
            cmd: parts[3].to_string(),
        })
    }
}

/// Rows belonging to `session`, in listing order.
///
/// Blank lines are skipped. Lines of other sessions are not parsed.
pub fn rows_for_session(output: &str, session: &str) -> Result<Vec<WindowRow>> {
    let prefix = format!("{}{}", session, FIELD_DELIMITER);

    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| line.starts_with(&prefix))
        .map(WindowRow::parse)
        .collect()
}
