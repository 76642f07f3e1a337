#[cfg(test)]
pub(crate) mod fake;
mod listing;
mod manager;
mod runner;

pub use listing::{list_windows_format, rows_for_session, WindowRow, FIELD_DELIMITER};
pub use manager::{shell_quote, terminal_size, TerminalSize, TmuxManager};
pub use runner::{CommandRunner, TmuxRunner};

/// Binary used when neither the config file nor the CLI names one
pub const DEFAULT_TMUX_BIN: &str = "tmux";
