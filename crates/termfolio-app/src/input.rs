//! Line-oriented input mapping.
//!
//! Each stdin line becomes one [`Action`]. A plain line is typed and
//! submitted. Lines starting with `@` drive individual keys so the
//! autocomplete and history behavior can be used from a pipe:
//!
//! | Line | Effect |
//! |---|---|
//! | `@type <text>` | type `<text>` without submitting |
//! | `@enter` `@up` `@down` `@tab` `@esc` `@back` | press that key |
//! | `@key <Name>` | press a key by DOM name (`ArrowUp`, `Tab`, `x`, ...) |
//! | `@pick <n>` | take suggestion `n` (0-based) |
//! | `@reset` | reset the session |
//! | `@quit` | exit |

use termfolio_types::input::{InputEvent, Key};

/// What a single input line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Events(Vec<InputEvent>),
    Pick(usize),
    Reset,
    Quit,
}

/// Map one stdin line to an action.
pub fn parse_line(line: &str) -> Result<Action, String> {
    let Some(directive) = line.strip_prefix('@') else {
        return Ok(Action::Events(vec![
            InputEvent::TextChanged(line.to_string()),
            InputEvent::Key(Key::Enter),
        ]));
    };

    let (word, rest) = directive
        .split_once(' ')
        .unwrap_or((directive, ""));
    let key = |k| Ok(Action::Events(vec![InputEvent::Key(k)]));
    match word {
        "type" => Ok(Action::Events(
            rest.chars().map(|c| InputEvent::Key(Key::Char(c))).collect(),
        )),
        "enter" => key(Key::Enter),
        "up" => key(Key::ArrowUp),
        "down" => key(Key::ArrowDown),
        "tab" => key(Key::Tab),
        "esc" => key(Key::Escape),
        "back" => key(Key::Backspace),
        "key" => rest
            .parse::<Key>()
            .map(|k| Action::Events(vec![InputEvent::Key(k)]))
            .map_err(|e| e.to_string()),
        "pick" => rest
            .trim()
            .parse()
            .map(Action::Pick)
            .map_err(|_| format!("@pick expects an index, got {rest:?}")),
        "reset" => Ok(Action::Reset),
        "quit" => Ok(Action::Quit),
        other => Err(format!("unknown directive @{other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_types_and_submits() {
        assert_eq!(
            parse_line("cat skills").unwrap(),
            Action::Events(vec![
                InputEvent::TextChanged("cat skills".to_string()),
                InputEvent::Key(Key::Enter),
            ])
        );
    }

    #[test]
    fn empty_line_still_submits() {
        let Action::Events(events) = parse_line("").unwrap() else {
            panic!("expected events");
        };
        assert_eq!(events.last(), Some(&InputEvent::Key(Key::Enter)));
    }

    #[test]
    fn type_directive_presses_each_char() {
        assert_eq!(
            parse_line("@type s k").unwrap(),
            Action::Events(vec![
                InputEvent::Key(Key::Char('s')),
                InputEvent::Key(Key::Char(' ')),
                InputEvent::Key(Key::Char('k')),
            ])
        );
    }

    #[test]
    fn key_directives() {
        let cases = [
            ("@enter", Key::Enter),
            ("@up", Key::ArrowUp),
            ("@down", Key::ArrowDown),
            ("@tab", Key::Tab),
            ("@esc", Key::Escape),
            ("@back", Key::Backspace),
        ];
        for (line, k) in cases {
            assert_eq!(
                parse_line(line).unwrap(),
                Action::Events(vec![InputEvent::Key(k)]),
                "{line}"
            );
        }
    }

    #[test]
    fn key_directive_takes_dom_names() {
        assert_eq!(
            parse_line("@key ArrowUp").unwrap(),
            Action::Events(vec![InputEvent::Key(Key::ArrowUp)])
        );
        assert_eq!(
            parse_line("@key q").unwrap(),
            Action::Events(vec![InputEvent::Key(Key::Char('q'))])
        );
        let err = parse_line("@key PageDown").unwrap_err();
        assert!(err.contains("PageDown"));
    }

    #[test]
    fn pick_parses_index() {
        assert_eq!(parse_line("@pick 2").unwrap(), Action::Pick(2));
        assert!(parse_line("@pick two").is_err());
        assert!(parse_line("@pick").is_err());
    }

    #[test]
    fn session_directives() {
        assert_eq!(parse_line("@reset").unwrap(), Action::Reset);
        assert_eq!(parse_line("@quit").unwrap(), Action::Quit);
    }

    #[test]
    fn unknown_directive_is_error() {
        let err = parse_line("@fly away").unwrap_err();
        assert!(err.contains("@fly"));
    }
}
