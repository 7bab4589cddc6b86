//! Parsing of terminal input lines.
//!
//! Plain lines replace the search text. Lines starting with `:` are
//! commands:
//!
//! - `:select N` taps card `N` (zero-based)
//! - `:keyboard show H` raises a keyboard `H` points tall
//! - `:keyboard hide` dismisses the keyboard
//! - `:quit` closes the screen

use thiserror::Error;

const COMMAND_PREFIX: char = ':';

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum InputLine {
    /// New search field text.
    Query(String),
    /// Tap on a card.
    Select(usize),
    /// Keyboard appears with the given height.
    KeyboardShow(f64),
    /// Keyboard disappears.
    KeyboardHide,
    /// Close the screen.
    Quit,
}

/// Reasons an input line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum InputError {
    /// The command name is not known.
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    /// The command is known but its arguments are not.
    #[error("usage: {usage}")]
    Usage { usage: &'static str },
}

/// Parse a single line, without its terminator.
pub(crate) fn parse_line(line: &str) -> Result<InputLine, InputError> {
    let Some(command) = line.strip_prefix(COMMAND_PREFIX) else {
        return Ok(InputLine::Query(line.to_owned()));
    };
    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();
    match (name, args.as_slice()) {
        ("select", [index]) => index
            .parse()
            .map(InputLine::Select)
            .map_err(|_| InputError::Usage {
                usage: ":select <card index>",
            }),
        ("select", _) => Err(InputError::Usage {
            usage: ":select <card index>",
        }),
        ("keyboard", ["show", height]) => height
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .map(InputLine::KeyboardShow)
            .ok_or(InputError::Usage {
                usage: ":keyboard show <height>",
            }),
        ("keyboard", ["hide"]) => Ok(InputLine::KeyboardHide),
        ("keyboard", _) => Err(InputError::Usage {
            usage: ":keyboard show <height> | :keyboard hide",
        }),
        ("quit" | "q", []) => Ok(InputLine::Quit),
        (other, _) => Err(InputError::UnknownCommand(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("tacos", InputLine::Query("tacos".into()))]
    #[case("", InputLine::Query(String::new()))]
    #[case(" main st ", InputLine::Query(" main st ".into()))]
    #[case(":select 2", InputLine::Select(2))]
    #[case(":keyboard show 291", InputLine::KeyboardShow(291.0))]
    #[case(":keyboard hide", InputLine::KeyboardHide)]
    #[case(":quit", InputLine::Quit)]
    #[case(":q", InputLine::Quit)]
    fn parses_lines(#[case] line: &str, #[case] expected: InputLine) {
        assert_eq!(parse_line(line), Ok(expected));
    }

    #[rstest]
    #[case(":select")]
    #[case(":select two")]
    #[case(":select -1")]
    #[case(":keyboard show")]
    #[case(":keyboard show -5")]
    #[case(":keyboard show NaN")]
    #[case(":keyboard")]
    fn rejects_bad_arguments(#[case] line: &str) {
        assert!(matches!(parse_line(line), Err(InputError::Usage { .. })));
    }

    #[rstest]
    #[case(":zoom 3", "zoom")]
    #[case(":", "")]
    fn rejects_unknown_commands(#[case] line: &str, #[case] name: &str) {
        assert_eq!(
            parse_line(line),
            Err(InputError::UnknownCommand(name.to_owned()))
        );
    }
}
