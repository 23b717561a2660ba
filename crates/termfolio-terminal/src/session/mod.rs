//! Terminal session engine.
//!
//! A [`Session`] owns everything one visitor's terminal needs: the input
//! line, its mode, command history, autocomplete suggestions, and the output
//! transcript. Front ends feed it key events and advance its virtual clock;
//! it never blocks and never reaches for global state.
//!
//! Slow commands put a loading indicator in the transcript and schedule
//! their real output on the clock. Resolutions are independent: each one
//! removes only its own indicator and appends at the transcript's end as it
//! is at that moment.

use std::collections::HashSet;
use std::time::Duration;

use termfolio_types::config::TerminalConfig;
use termfolio_types::error::{Result, TermfolioError};
use termfolio_types::input::{InputEvent, Key};

use crate::commands::{Category, CommandId, register_builtins};
use crate::content::{ContentProvider, PortfolioContent};
use crate::history::{HistoryLog, Recall};
use crate::registry::CommandRegistry;
use crate::scheduler::{Scheduler, TimerHandle};
use crate::suggest::{Suggestion, SuggestionSet};
use crate::transcript::{BlockId, Style, Transcript};


/// Input mode of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Nothing typed since the last submission.
    Idle,
    /// Input being edited, no suggestion overlay.
    Composing,
    /// Input being edited with the suggestion overlay shown.
    Suggesting,
}

/// Result of a Tab press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// No command starts with the input.
    NoMatch,
    /// Exactly one candidate; the input was replaced with it.
    Completed(String),
    /// Several candidates; they were listed in the transcript.
    Ambiguous(Vec<String>),
}

/// Work waiting on the virtual clock.
#[derive(Debug)]
enum Deferred {
    Resolve {
        indicator: BlockId,
        command: CommandId,
        args: Vec<String>,
    },
    BootAnnounce,
    BootReady,
}

const LOADING_TEXT: &str = "Loading data...";
const NO_CONTENT: &str = "(no content)";

/// One terminal session.
pub struct Session {
    config: TerminalConfig,
    registry: CommandRegistry,
    content: Box<dyn ContentProvider>,
    slow: HashSet<CommandId>,
    input: String,
    mode: InputMode,
    history: HistoryLog,
    suggestions: SuggestionSet,
    transcript: Transcript,
    scheduler: Scheduler<Deferred>,
    boot_indicator: Option<BlockId>,
    matrix: bool,
}

impl Session {
    /// Build a session over an already-filled registry.
    ///
    /// Fails if a configured slow command is not registered.
    pub fn new(
        config: TerminalConfig,
        registry: CommandRegistry,
        content: Box<dyn ContentProvider>,
    ) -> Result<Self> {
        config.validate()?;
        let slow = config
            .slow_commands
            .iter()
            .map(|name| {
                registry.lookup(name).map(|e| e.handler()).ok_or_else(|| {
                    TermfolioError::Config(format!("slow command '{name}' is not registered"))
                })
            })
            .collect::<Result<HashSet<_>>>()?;

        let mut session = Self {
            config,
            registry,
            content,
            slow,
            input: String::new(),
            mode: InputMode::Idle,
            history: HistoryLog::new(),
            suggestions: SuggestionSet::new(),
            transcript: Transcript::new(),
            scheduler: Scheduler::new(),
            boot_indicator: None,
            matrix: false,
        };
        session.schedule_boot();
        log::info!(
            "Session started with {} commands ({} slow)",
            session.registry.len(),
            session.slow.len()
        );
        Ok(session)
    }

    /// Build the stock portfolio session: built-in commands, built-in
    /// content with any overrides named by `config.content_path`.
    pub fn with_builtins(config: TerminalConfig) -> Result<Self> {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry)?;
        let content = match &config.content_path {
            Some(path) => PortfolioContent::load(path)?,
            None => PortfolioContent::new(),
        };
        Self::new(config, registry, Box::new(content))
    }

    fn schedule_boot(&mut self) {
        if !self.config.boot.enabled {
            return;
        }
        let boot = &self.config.boot;
        let (announce, ready) = (boot.announce_delay(), boot.ready_at());
        self.scheduler.schedule(announce, Deferred::BootAnnounce);
        self.scheduler.schedule(ready, Deferred::BootReady);
    }

    // -- Input --

    /// Dispatch one input event. Returns the timer of a slow command if the
    /// event submitted one.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<TimerHandle> {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::TextChanged(text) => {
                self.set_input(&text);
                None
            },
        }
    }

    /// Handle a single key press.
    pub fn handle_key(&mut self, key: Key) -> Option<TimerHandle> {
        log::debug!("key {key:?} in {:?}", self.mode);
        let suggesting = self.mode == InputMode::Suggesting;
        match key {
            Key::Char(c) => {
                self.input.push(c);
                self.on_text_changed();
            },
            Key::Backspace => {
                self.input.pop();
                self.on_text_changed();
            },
            Key::Enter => {
                self.suggestions.dismiss();
                return self.submit();
            },
            Key::ArrowUp if suggesting => self.navigate_suggestions(false),
            Key::ArrowDown if suggesting => self.navigate_suggestions(true),
            Key::ArrowUp => self.navigate_history(false),
            Key::ArrowDown => self.navigate_history(true),
            Key::Tab => {
                self.complete();
            },
            Key::Escape => {
                if suggesting {
                    self.suggestions.dismiss();
                    self.mode = InputMode::Composing;
                }
            },
        }
        None
    }

    /// Replace the whole input line (a text-change event).
    pub fn set_input(&mut self, text: &str) {
        self.input.clear();
        self.input.push_str(text);
        self.on_text_changed();
    }

    fn on_text_changed(&mut self) {
        self.suggestions.recompute(&self.registry, &self.input);
        self.mode = if self.suggestions.is_visible() {
            InputMode::Suggesting
        } else {
            InputMode::Composing
        };
    }

    fn navigate_suggestions(&mut self, forward: bool) {
        if let Some(name) = self.suggestions.step(forward) {
            self.input.clear();
            self.input.push_str(name);
        }
    }

    fn navigate_history(&mut self, forward: bool) {
        let recall = if forward {
            self.history.forward()
        } else {
            self.history.back()
        };
        match recall {
            Recall::Unchanged => {},
            Recall::Entry(line) => {
                self.input.clear();
                self.input.push_str(line);
                self.mode = InputMode::Composing;
            },
            Recall::Fresh => {
                self.input.clear();
                self.mode = InputMode::Idle;
            },
        }
    }

    /// Tab completion against the current input.
    pub fn complete(&mut self) -> Completion {
        let mut names: Vec<String> = self
            .registry
            .prefix_match(&self.input)
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        match names.len() {
            0 => Completion::NoMatch,
            1 => {
                let name = names.remove(0);
                self.set_input(&name);
                Completion::Completed(name)
            },
            _ => {
                self.transcript
                    .push(Style::Info, format!("Available commands: {}", names.join(", ")));
                self.transcript.scroll_to_end();
                Completion::Ambiguous(names)
            },
        }
    }

    /// Take the suggestion at `index` (the pointer path of the overlay).
    pub fn pick_suggestion(&mut self, index: usize) -> bool {
        let Some(name) = self.suggestions.get(index).map(|s| s.name.clone()) else {
            return false;
        };
        self.input = name;
        self.suggestions.dismiss();
        self.mode = InputMode::Composing;
        true
    }

    // -- Submission and dispatch --

    /// Submit the current input line.
    ///
    /// Blank input is a no-op. Otherwise the line is echoed, recorded in
    /// history, and dispatched; the input and suggestions are reset. Returns
    /// the timer handle when the command is slow.
    pub fn submit(&mut self) -> Option<TimerHandle> {
        let line = self.input.trim().to_string();
        if line.is_empty() {
            self.suggestions.dismiss();
            self.mode = if self.input.is_empty() {
                InputMode::Idle
            } else {
                InputMode::Composing
            };
            return None;
        }

        self.transcript
            .push(Style::UserInput, format!("{}{line}", self.config.prompt));
        self.history.push(&line);

        // Arguments are lowercased along with the name.
        let lowered = line.to_lowercase();
        let mut words = lowered.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<String> = words.map(str::to_string).collect();
        log::debug!("dispatch {name:?} args={args:?}");

        let handle = match self.registry.lookup(name).map(|e| e.handler()) {
            Some(id) if self.slow.contains(&id) => {
                let indicator = self.transcript.push(Style::Loading, LOADING_TEXT);
                let task = Deferred::Resolve {
                    indicator,
                    command: id,
                    args,
                };
                Some(self.scheduler.schedule(self.config.loading_delay(), task))
            },
            Some(id) => {
                self.run(id, &args);
                None
            },
            None => {
                self.report(TermfolioError::UnknownCommand(name.to_string()));
                None
            },
        };

        self.input.clear();
        self.suggestions.dismiss();
        self.mode = InputMode::Idle;
        self.transcript.scroll_to_end();
        handle
    }

    fn run(&mut self, id: CommandId, args: &[String]) {
        if let Err(e) = self.execute(id, args) {
            self.report(e);
        }
    }

    fn execute(&mut self, id: CommandId, args: &[String]) -> Result<()> {
        match id {
            CommandId::Help => self.show_help(),
            CommandId::Clear => {
                self.transcript.clear();
                self.transcript
                    .push(Style::Success, "Terminal cleared. Welcome back!");
            },
            CommandId::Cat => {
                let target = args.first().ok_or_else(|| TermfolioError::EmptyArgument {
                    command: "cat".to_string(),
                    usage: CommandId::Cat.usage().to_string(),
                })?;
                let entry = self
                    .registry
                    .lookup(target)
                    .ok_or_else(|| TermfolioError::NotFound {
                        command: "cat".to_string(),
                        target: target.clone(),
                    })?;
                let target_id = entry.handler();
                return self.execute(target_id, &[]);
            },
            CommandId::Sudo => {
                self.transcript.push(
                    Style::Warning,
                    "Nice try! But this is a portfolio, not a production system.",
                );
                self.transcript.push(
                    Style::Info,
                    "For real cybersecurity demonstrations, check out the projects!",
                );
            },
            CommandId::Matrix => {
                self.matrix = !self.matrix;
                if self.matrix {
                    self.transcript.push(
                        Style::Success,
                        "Matrix mode: ENABLED - Welcome to the real world",
                    );
                } else {
                    self.transcript
                        .push(Style::Warning, "Matrix mode: DISABLED - Back to reality");
                }
            },
            CommandId::About
            | CommandId::Skills
            | CommandId::Experience
            | CommandId::Projects
            | CommandId::Contact
            | CommandId::Whoami
            | CommandId::Ls
            | CommandId::Neofetch
            | CommandId::Status
            | CommandId::Portfolio
            | CommandId::Welcome => {
                let text = self
                    .content
                    .render(id)
                    .unwrap_or_else(|| NO_CONTENT.to_string());
                self.transcript.push(Style::Section, text);
            },
        }
        Ok(())
    }

    fn show_help(&mut self) {
        let mut out = String::from("COMMAND INTERFACE - Available Commands\n");
        for category in [Category::Navigation, Category::System, Category::Extras] {
            let rows: Vec<String> = self
                .registry
                .entries()
                .iter()
                .filter(|e| e.handler().category() == category)
                .map(|e| {
                    let dots = ".".repeat(12usize.saturating_sub(e.name().len()));
                    format!("    {} {dots} {}", e.handler().usage(), e.description())
                })
                .collect();
            if rows.is_empty() {
                continue;
            }
            out.push_str(&format!("\n  [{}]\n", category.title()));
            for row in rows {
                out.push_str(&row);
                out.push('\n');
            }
        }
        self.transcript.push(Style::Section, out.trim_end());
        self.transcript.push(
            Style::Success,
            "PRO TIPS:\n  * Use Up/Down arrow keys for command history\n  \
             * Press Tab for auto-completion\n  \
             * Type partial commands to see suggestions\n  \
             * All commands are case-insensitive",
        );
    }

    /// Render a recoverable dispatch error into the transcript.
    fn report(&mut self, err: TermfolioError) {
        log::debug!("recovered: {err}");
        match err {
            TermfolioError::UnknownCommand(name) => {
                self.transcript
                    .push(Style::Error, format!("Command not found: {name}"));
                self.transcript
                    .push(Style::Info, "Type help for available commands.");
            },
            TermfolioError::EmptyArgument { usage, .. } => {
                self.transcript.push(Style::Error, format!("Usage: {usage}"));
            },
            other => {
                self.transcript.push(Style::Error, other.to_string());
            },
        }
    }

    // -- Clock --

    /// Advance the virtual clock and apply every deferred effect that is due.
    pub fn advance(&mut self, elapsed: Duration) {
        for task in self.scheduler.advance(elapsed) {
            match task {
                Deferred::Resolve {
                    indicator,
                    command,
                    args,
                } => {
                    if !self.transcript.remove(indicator) {
                        log::warn!(
                            "loading indicator for '{}' was already cleared",
                            command.name()
                        );
                    }
                    self.run(command, &args);
                },
                Deferred::BootAnnounce => {
                    self.transcript
                        .push(Style::Info, "Loading portfolio modules...");
                    self.boot_indicator =
                        Some(self.transcript.push(Style::Loading, "Initializing..."));
                },
                Deferred::BootReady => {
                    if let Some(id) = self.boot_indicator.take() {
                        self.transcript.remove(id);
                    }
                    self.transcript
                        .push(Style::Success, "All systems operational!");
                    log::info!("Boot sequence complete");
                },
            }
            self.transcript.scroll_to_end();
        }
    }

    /// Cancel a pending slow command and drop its loading indicator.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.scheduler.cancel(handle) {
            Some(Deferred::Resolve { indicator, .. }) => {
                self.transcript.remove(indicator);
                true
            },
            Some(_) | None => false,
        }
    }

    /// Forget everything: history, transcript, pending work, input, effects.
    pub fn reset(&mut self) {
        self.history.clear();
        self.transcript.clear();
        self.suggestions.dismiss();
        self.scheduler.clear();
        self.input.clear();
        self.mode = InputMode::Idle;
        self.boot_indicator = None;
        self.matrix = false;
        log::info!("Session reset");
    }

    // -- Accessors --

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Rows of the suggestion overlay, empty when hidden.
    pub fn suggestions(&self) -> &[Suggestion] {
        self.suggestions.items()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.suggestions.highlighted()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn matrix_enabled(&self) -> bool {
        self.matrix
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// Current virtual time since the session started.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.scheduler.is_pending(handle)
    }

    /// Number of deferred effects still waiting (slow commands and boot).
    pub fn pending(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn next_due_in(&self) -> Option<Duration> {
        self.scheduler.next_due_in()
    }
}
