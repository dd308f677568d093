//! Command trait and keyword registry
//!
//! A command line arrives as whitespace-split tokens with the keyword at
//! position 0; handlers skip it. Handlers write their own results — success
//! blocks and anticipated error messages — to the sink and reserve
//! `CommandError` for conditions the dispatch loop reports itself.

use std::collections::HashMap;
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("No such Command: {0}")]
    NoSuchCommand(String),

    #[error("{0}")]
    Usage(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A registered command handler.
pub trait Command {
    fn execute(&self, tokens: &[String], out: &mut dyn Write) -> Result<(), CommandError>;
}

/// Maps command keywords to handlers.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Associates a keyword with a handler. A later registration for the
    /// same keyword silently replaces the earlier one.
    pub fn register(&mut self, name: &str, command: Box<dyn Command>) {
        self.commands.insert(name.to_string(), command);
    }

    /// Invokes the handler registered for `name` with the full token
    /// sequence, keyword included.
    pub fn execute(
        &self,
        name: &str,
        tokens: &[String],
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let command = self
            .commands
            .get(name)
            .ok_or_else(|| CommandError::NoSuchCommand(name.to_string()))?;
        command.execute(tokens, out)
    }
}

/// Positional token access with a usage error instead of a panic.
pub(crate) fn arg<'a>(
    tokens: &'a [String],
    index: usize,
    usage: &'static str,
) -> Result<&'a str, CommandError> {
    tokens
        .get(index)
        .map(String::as_str)
        .ok_or(CommandError::Usage(usage))
}
