//! Termfolio command-line front end.
//!
//! Reads stdin one line at a time on a reader thread and drives a single
//! terminal session on the main thread. The session clock advances with
//! real elapsed time, so slow commands and the boot sequence resolve on
//! their own even while no input arrives. See `input.rs` for the `@key`
//! directives.
//!
//! Usage: `termfolio [--json] [--effects] [CONFIG.toml]`

mod input;
mod render;

use std::io::{self, BufRead};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use input::Action;
use render::Renderer;
use termfolio_terminal::{Backdrop, Session};
use termfolio_types::config::TerminalConfig;

/// Longest the main loop sleeps without input or due timers.
const IDLE_TICK: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut json = false;
    let mut effects = false;
    let mut config_arg = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "--effects" => effects = true,
            _ => config_arg = Some(arg),
        }
    }

    // Resolve config from CLI arg, TERMFOLIO_CONFIG env var, or defaults.
    let config = match config_arg.or_else(|| std::env::var("TERMFOLIO_CONFIG").ok()) {
        Some(path) => TerminalConfig::load(Path::new(&path))
            .with_context(|| format!("loading config {path}"))?,
        None => TerminalConfig::default(),
    };
    log::info!(
        "Starting termfolio ({} slow command(s), {}ms loading delay)",
        config.slow_commands.len(),
        config.loading_delay_ms,
    );

    let mut backdrop = Backdrop::new(config.backdrop.clone());
    let mut session = Session::with_builtins(config)?;
    log::info!("Registered {} commands", session.registry().len());

    let lines = spawn_reader();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut renderer = Renderer::new(json, effects);
    let mut last_tick = Instant::now();
    let mut stdin_open = true;
    let mut matrix = session.matrix_enabled();

    loop {
        let wait = session.next_due_in().map_or(IDLE_TICK, |d| d.min(IDLE_TICK));
        let line = if stdin_open {
            match lines.recv_timeout(wait) {
                Ok(line) => Some(line),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => {
                    log::debug!("stdin closed; draining {} timer(s)", session.pending());
                    stdin_open = false;
                    None
                },
            }
        } else {
            thread::sleep(wait);
            None
        };

        let now = Instant::now();
        let elapsed = now - last_tick;
        last_tick = now;
        session.advance(elapsed);
        backdrop.tick(elapsed);

        if let Some(line) = line {
            match input::parse_line(&line) {
                Ok(Action::Quit) => break,
                Ok(action) => apply(&mut session, action),
                Err(msg) => eprintln!("{msg}"),
            }
        }

        if session.matrix_enabled() != matrix {
            matrix = session.matrix_enabled();
            log::debug!("rain opacity now {}", Backdrop::rain_opacity(matrix));
        }
        renderer.render(&session, &mut out)?;
        renderer.render_backdrop(&backdrop, matrix, &mut out)?;

        if !stdin_open && session.pending() == 0 {
            break;
        }
    }

    log::info!("Exiting after {} command(s)", session.history().len());
    Ok(())
}

/// Forward stdin lines over a channel; the sender drops at EOF.
fn spawn_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                },
                Err(e) => {
                    log::warn!("stdin read failed: {e}");
                    break;
                },
            }
        }
    });
    rx
}

fn apply(session: &mut Session, action: Action) {
    match action {
        Action::Events(events) => {
            for event in events {
                if let Some(handle) = session.handle_event(event) {
                    log::debug!("slow command scheduled as {handle:?}");
                }
            }
        },
        Action::Pick(index) => {
            if !session.pick_suggestion(index) {
                eprintln!("no suggestion at {index}");
            }
        },
        Action::Reset => session.reset(),
        Action::Quit => {},
    }
}
