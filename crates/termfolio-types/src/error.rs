//! Error types for termfolio.

use std::io;

/// Errors produced by the termfolio crates.
///
/// Startup errors (`Config`, `DuplicateCommand`, `InvalidCommandName`) halt
/// construction of a session. Dispatch errors (`UnknownCommand`,
/// `EmptyArgument`, `NotFound`) are rendered into the transcript by the
/// session and never reach the caller of `submit`. `UnknownKey` comes from
/// parsing a key name and is the front end's to report.
#[derive(Debug, thiserror::Error)]
pub enum TermfolioError {
    #[error("config error: {0}")]
    Config(String),

    #[error("duplicate command: {0}")]
    DuplicateCommand(String),

    #[error("invalid command name: {0:?} (expected lowercase alphanumeric)")]
    InvalidCommandName(String),

    #[error("command not found: {0}")]
    UnknownCommand(String),

    #[error("{command}: missing argument (usage: {usage})")]
    EmptyArgument {
        command: String,
        usage: String,
    },

    #[error("{command}: {target}: No such file or directory")]
    NotFound {
        command: String,
        target: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("unknown key name: {0:?}")]
    UnknownKey(String),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TermfolioError>;
