//! In-process stand-in for tmux used by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::runner::CommandRunner;
use crate::error::{Error, Result};

/// Records every call and answers captured queries from canned output
/// keyed by subcommand name.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Vec<String>>>,
    outputs: HashMap<String, String>,
    fail_on: Option<(String, usize)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, subcommand: &str, output: &str) -> Self {
        self.outputs
            .insert(subcommand.to_string(), output.to_string());
        self
    }

    /// Fail the `nth` (1-based) invocation of `subcommand`
    pub fn failing_on(mut self, subcommand: &str, nth: usize) -> Self {
        self.fail_on = Some((subcommand.to_string(), nth));
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn subcommands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.into_iter().next())
            .collect()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, args: &[String], capture: bool) -> Result<Option<String>> {
        let subcommand = args.first().cloned().unwrap_or_default();

        let seen = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(args.to_vec());
            calls
                .iter()
                .filter(|c| c.first() == Some(&subcommand))
                .count()
        };

        if let Some((fail_sub, nth)) = &self.fail_on {
            if *fail_sub == subcommand && *nth == seen {
                return Err(Error::command_failed(format!("tmux {}", args.join(" "))));
            }
        }

        if !capture {
            return Ok(None);
        }

        Ok(Some(
            self.outputs.get(&subcommand).cloned().unwrap_or_default(),
        ))
    }
}
