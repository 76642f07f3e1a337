use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tmux-layout")]
#[command(
    version,
    about = "Save and restore the window layout of tmux sessions",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Args {
    /// Session store file (default: ~/.tmux-layout/sessions.json)
    #[arg(long, global = true, env = "TMUX_LAYOUT_STATE_FILE")]
    pub state_file: Option<PathBuf>,

    /// Config file (default: ~/.tmux-layout/config.toml)
    #[arg(long, global = true, env = "TMUX_LAYOUT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List saved sessions as JSON
    Ls {
        /// Print every stored window instead of a count
        #[arg(short, long)]
        verbose: bool,
    },

    /// Save the windows of the current tmux session
    Save {
        /// Name to store the session under
        #[arg(short, long)]
        target_session: Option<String>,

        /// Record each window's running command instead of the default shell
        #[arg(short, long)]
        current_command: bool,
    },

    /// Recreate the windows of a saved session in the current tmux session
    Load {
        /// Saved session to restore
        #[arg(short, long)]
        target_session: Option<String>,

        /// Also re-run each window's recorded command
        #[arg(short, long)]
        current_command: bool,
    },

    /// Start tmux and create a detached session sized to this terminal
    New {
        /// Name of the new session
        #[arg(short, long)]
        target_session: Option<String>,
    },
}
