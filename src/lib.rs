pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod tmux;

pub use error::{Error, Result};
