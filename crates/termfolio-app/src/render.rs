//! Writing the session to stdout.
//!
//! The transcript is append-only apart from `clear` and loading indicators,
//! so the renderer only prints blocks it has not seen yet. A new transcript
//! epoch wipes the screen.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use termfolio_terminal::{Backdrop, BlockId, OutputBlock, Session, Style};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";

fn color(style: Style) -> &'static str {
    match style {
        Style::UserInput => "\x1b[1;32m",
        Style::Plain => "",
        Style::Info => "\x1b[36m",
        Style::Success => "\x1b[32m",
        Style::Warning => "\x1b[33m",
        Style::Error => "\x1b[31m",
        Style::Section => "\x1b[1;37m",
        Style::Loading => "\x1b[2m",
    }
}

/// Suggestion overlay snapshot, as emitted in JSON mode.
#[derive(Debug, Serialize)]
struct Overlay<'a> {
    input: &'a str,
    suggestions: Vec<&'a str>,
    highlighted: Option<usize>,
}

pub struct Renderer {
    json: bool,
    effects: bool,
    last_seen: Option<BlockId>,
    epoch: u64,
    overlay: Option<(String, Vec<String>, Option<usize>)>,
    /// Id of the newest code float already announced.
    last_float: u64,
}

impl Renderer {
    pub fn new(json: bool, effects: bool) -> Self {
        Self {
            json,
            effects,
            last_seen: None,
            epoch: 0,
            overlay: None,
            last_float: 0,
        }
    }

    /// Print everything that changed since the previous call.
    pub fn render(&mut self, session: &Session, out: &mut impl Write) -> Result<()> {
        let transcript = session.transcript();
        if transcript.epoch() != self.epoch {
            self.epoch = transcript.epoch();
            if !self.json {
                write!(out, "{CLEAR_SCREEN}")?;
            }
        }

        for block in transcript.since(self.last_seen) {
            self.write_block(block, out)?;
            self.last_seen = Some(block.id);
        }

        self.render_overlay(session, out)?;
        out.flush()?;
        Ok(())
    }

    fn write_block(&self, block: &OutputBlock, out: &mut impl Write) -> Result<()> {
        if self.json {
            serde_json::to_writer(&mut *out, block)?;
            writeln!(out)?;
        } else {
            let c = color(block.style);
            if c.is_empty() {
                writeln!(out, "{}", block.text)?;
            } else {
                writeln!(out, "{c}{}{RESET}", block.text)?;
            }
        }
        Ok(())
    }

    /// Show the pending input and suggestion list when either changes.
    fn render_overlay(&mut self, session: &Session, out: &mut impl Write) -> Result<()> {
        let names: Vec<String> = session
            .suggestions()
            .iter()
            .map(|s| s.name.clone())
            .collect();
        let snapshot = (session.input().to_string(), names, session.highlighted());
        if self.overlay.as_ref() == Some(&snapshot) {
            return Ok(());
        }
        let (input, names, highlighted) = &snapshot;
        // Nothing typed and nothing offered: the prompt line is implied.
        if input.is_empty() && names.is_empty() && self.overlay.is_none() {
            self.overlay = Some(snapshot);
            return Ok(());
        }

        if self.json {
            let overlay = Overlay {
                input,
                suggestions: names.iter().map(String::as_str).collect(),
                highlighted: *highlighted,
            };
            serde_json::to_writer(&mut *out, &overlay)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}{input}", session.config().prompt)?;
            for (i, s) in session.suggestions().iter().enumerate() {
                let marker = if Some(i) == *highlighted { '>' } else { ' ' };
                writeln!(out, "  {marker} {:<12} {}", s.name, s.description)?;
            }
        }
        self.overlay = Some(snapshot);
        Ok(())
    }

    /// Announce newly spawned code floats when effects are on.
    pub fn render_backdrop(
        &mut self,
        backdrop: &Backdrop,
        matrix: bool,
        out: &mut impl Write,
    ) -> Result<()> {
        if self.effects && !self.json {
            let dim = if matrix { "\x1b[32m" } else { "\x1b[2m" };
            for float in backdrop.floats().iter().filter(|f| f.id > self.last_float) {
                writeln!(
                    out,
                    "{dim}{:>width$}{RESET}",
                    float.text,
                    width = (float.left_pct / 2.0) as usize + float.text.len()
                )?;
            }
        }
        self.last_float = backdrop.spawned();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termfolio_types::config::TerminalConfig;
    use termfolio_types::input::Key;

    fn quiet_session() -> Session {
        let mut config = TerminalConfig::default();
        config.boot.enabled = false;
        Session::with_builtins(config).unwrap()
    }

    fn run(session: &mut Session, line: &str) {
        session.set_input(line);
        session.handle_key(Key::Enter);
    }

    fn render_to_string(r: &mut Renderer, s: &Session) -> String {
        let mut buf = Vec::new();
        r.render(s, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn prints_each_block_once() {
        let mut s = quiet_session();
        let mut r = Renderer::new(false, false);
        run(&mut s, "whoami");
        let first = render_to_string(&mut r, &s);
        assert!(first.contains("whoami"));
        assert!(first.contains("visitor"));
        assert_eq!(render_to_string(&mut r, &s), "");
    }

    #[test]
    fn clear_wipes_screen() {
        let mut s = quiet_session();
        let mut r = Renderer::new(false, false);
        run(&mut s, "ls");
        render_to_string(&mut r, &s);
        run(&mut s, "clear");
        let out = render_to_string(&mut r, &s);
        assert!(out.starts_with(CLEAR_SCREEN));
        assert!(out.contains("Terminal cleared. Welcome back!"));
    }

    #[test]
    fn json_mode_emits_one_object_per_block() {
        let mut s = quiet_session();
        let mut r = Renderer::new(true, false);
        run(&mut s, "status");
        let out = render_to_string(&mut r, &s);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let echo: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(echo["style"], "user-input");
        let body: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(body["style"], "section");
    }

    #[test]
    fn overlay_lists_suggestions() {
        let mut s = quiet_session();
        let mut r = Renderer::new(false, false);
        s.set_input("s");
        s.handle_key(Key::ArrowDown);
        let out = render_to_string(&mut r, &s);
        assert!(out.contains("> skills"));
        assert!(out.contains("  sudo"));
        // Unchanged overlay is not reprinted.
        assert_eq!(render_to_string(&mut r, &s), "");
    }

    #[test]
    fn json_overlay_reports_highlight() {
        let mut s = quiet_session();
        let mut r = Renderer::new(true, false);
        s.set_input("co");
        let out = render_to_string(&mut r, &s);
        let v: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(v["input"], "co");
        assert_eq!(v["suggestions"][0], "contact");
        assert!(v["highlighted"].is_null());
    }

    #[test]
    fn backdrop_silent_without_effects() {
        let mut b = Backdrop::new(termfolio_types::config::BackdropConfig {
            seed: 5,
            ..Default::default()
        });
        b.tick(std::time::Duration::from_secs(4));
        let mut r = Renderer::new(false, false);
        let mut buf = Vec::new();
        r.render_backdrop(&b, false, &mut buf).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn backdrop_keeps_announcing_after_floats_expire() {
        let mut b = Backdrop::new(termfolio_types::config::BackdropConfig {
            seed: 9,
            ..Default::default()
        });
        let mut r = Renderer::new(false, true);
        let mut buf = Vec::new();
        for _ in 0..600 {
            b.tick(std::time::Duration::from_millis(100));
            r.render_backdrop(&b, false, &mut buf).unwrap();
        }
        let printed = String::from_utf8(buf).unwrap().lines().count();
        assert_eq!(b.spawned(), 20);
        assert_eq!(printed, 20);
    }

    #[test]
    fn backdrop_prints_new_floats_once() {
        let mut b = Backdrop::new(termfolio_types::config::BackdropConfig {
            seed: 5,
            ..Default::default()
        });
        b.tick(std::time::Duration::from_secs(3));
        let mut r = Renderer::new(false, true);
        let mut buf = Vec::new();
        r.render_backdrop(&b, true, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
        let mut again = Vec::new();
        r.render_backdrop(&b, true, &mut again).unwrap();
        assert!(again.is_empty());
    }
}
