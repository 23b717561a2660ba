//! Terminal session engine.
//!
//! The terminal is a registry-based dispatch system. Built-in commands are
//! variants of `CommandId` and are registered by name at startup. A
//! `Session` interprets key events, parses submitted lines, resolves the
//! command name through the registry, and appends output to its transcript.

pub mod backdrop;
mod commands;
pub mod content;
mod history;
mod registry;
pub mod scheduler;
mod session;
mod suggest;
mod transcript;

/// Background visual effects (presentational only).
pub use backdrop::Backdrop;
/// Built-in command identifiers and their help categories.
pub use commands::{Category, CommandId};
/// Register every built-in command into a registry.
pub use commands::register_builtins;
/// Supplier of section text, plus the built-in implementation.
pub use content::{ContentProvider, PortfolioContent};
/// Submitted-line log with a browse cursor.
pub use history::{HistoryLog, Recall};
/// Registry of available commands with prefix matching.
pub use registry::{CommandEntry, CommandRegistry};
/// Virtual-clock timer queue and its handles.
pub use scheduler::{Scheduler, TimerHandle};
/// The session engine and its input mode.
pub use session::{Completion, InputMode, Session};
/// Autocomplete overlay rows.
pub use suggest::{Suggestion, SuggestionSet};
/// Output transcript types.
pub use transcript::{BlockId, OutputBlock, Style, Transcript};
