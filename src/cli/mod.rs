mod args;
mod commands;

pub use args::{Args, Command};
pub use commands::run_cli;
