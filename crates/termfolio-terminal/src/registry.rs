//! Command registry: name -> (description, handler) with prefix matching.
//!
//! The registry is filled once at startup and only read afterwards. Entries
//! keep their registration order, which is the order `prefix_match` and
//! `help` report them in.

use std::collections::HashMap;

use termfolio_types::error::{Result, TermfolioError};

use crate::commands::CommandId;

/// A single registered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    name: String,
    description: String,
    handler: CommandId,
}

impl CommandEntry {
    /// The command name (lowercase, what the user types).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description shown in suggestions and `help`.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The built-in handler this name dispatches to.
    pub fn handler(&self) -> CommandId {
        self.handler
    }
}

/// Registry of available commands.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command.
    ///
    /// Fails if `name` is already registered or is not made of lowercase
    /// ASCII letters and digits. Either failure is a programming error in the
    /// startup code, so callers propagate it and abort.
    pub fn register(&mut self, name: &str, description: &str, handler: CommandId) -> Result<()> {
        if !is_valid_name(name) {
            return Err(TermfolioError::InvalidCommandName(name.to_string()));
        }
        if self.index.contains_key(name) {
            return Err(TermfolioError::DuplicateCommand(name.to_string()));
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(CommandEntry {
            name: name.to_string(),
            description: description.to_string(),
            handler,
        });
        Ok(())
    }

    /// Look a command up by name, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<&CommandEntry> {
        let lower = name.to_lowercase();
        self.index.get(lower.as_str()).map(|&i| &self.entries[i])
    }

    /// Entries whose name starts with `partial` (case-insensitive), in
    /// registration order. An empty `partial` matches every entry.
    pub fn prefix_match(&self, partial: &str) -> Vec<&CommandEntry> {
        let lower = partial.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.name.starts_with(&lower))
            .collect()
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Return a list of (name, description) pairs in registration order.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.name(), e.description()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}
