//! Block commands
//!
//! The phrase in front of a block's `{` selects what the block compiles to:
//!
//! | phrase              | fragment                        |
//! |---------------------|---------------------------------|
//! | `before`            | `(?<=interior)`                 |
//! | `after`             | `(?=interior)`                  |
//! | `match`             | `(?:interior)`                  |
//! | `either`            | `(?:c1\|c2\|...)`               |
//! | `capture as name`   | `(?<name>interior)`             |
//! | `let .name`         | nothing; binds the variable     |

use crate::error::{CompileError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w\s.<>]+$").unwrap());
static GROUP_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());
static VARIABLE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\.\w+$").unwrap());

/// A parsed block header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `before`
    Lookbehind,
    /// `after`
    Lookahead,
    /// `match`
    Group,
    /// `either`
    Alternation,
    /// `capture as <name>`
    Capture(String),
    /// `let .name`, holding the name with its leading `.`
    Define(String),
}

impl Command {
    /// Parse a trimmed block header.
    pub fn parse(header: &str) -> Result<Self> {
        if !HEADER.is_match(header) {
            return Err(CompileError::unparsable(
                header,
                "command phrases may only contain words, spaces, `.`, `<` and `>`",
            ));
        }

        let words: Vec<&str> = header.split_whitespace().collect();
        match words.as_slice() {
            ["before"] => Ok(Command::Lookbehind),
            ["after"] => Ok(Command::Lookahead),
            ["match"] => Ok(Command::Group),
            ["either"] => Ok(Command::Alternation),
            ["capture", "as", name] => {
                let name: &str = name;
                let name = name
                    .strip_prefix('<')
                    .and_then(|n| n.strip_suffix('>'))
                    .unwrap_or(name);
                if GROUP_NAME.is_match(name) {
                    Ok(Command::Capture(name.to_string()))
                } else {
                    Err(CompileError::unparsable(
                        header,
                        format!("`{name}` is not a valid capture group name"),
                    ))
                }
            }
            ["capture", ..] => Err(CompileError::unparsable(
                header,
                "expected `capture as <name>`",
            )),
            ["let", name] if VARIABLE_NAME.is_match(name) => Ok(Command::Define(name.to_string())),
            ["let", ..] => Err(CompileError::unparsable(header, "expected `let .name`")),
            _ => Err(CompileError::UnknownCommand {
                command: header.to_string(),
            }),
        }
    }

    /// What separates the compiled clauses of the interior.
    pub fn joiner(&self) -> &'static str {
        match self {
            Command::Alternation => "|",
            _ => "",
        }
    }

    /// Wrap a compiled interior. `let` blocks produce no text.
    pub fn wrap(&self, interior: &str) -> Option<String> {
        match self {
            Command::Lookbehind => Some(format!("(?<={interior})")),
            Command::Lookahead => Some(format!("(?={interior})")),
            Command::Group | Command::Alternation => Some(format!("(?:{interior})")),
            Command::Capture(name) => Some(format!("(?<{name}>{interior})")),
            Command::Define(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_commands() {
        assert_eq!(Command::parse("before").unwrap(), Command::Lookbehind);
        assert_eq!(Command::parse("after").unwrap(), Command::Lookahead);
        assert_eq!(Command::parse("match").unwrap(), Command::Group);
        assert_eq!(Command::parse("either").unwrap(), Command::Alternation);
    }

    #[test]
    fn test_capture_keeps_whole_name() {
        assert_eq!(
            Command::parse("capture as shiba").unwrap(),
            Command::Capture("shiba".to_string())
        );
        assert_eq!(
            Command::parse("capture   as <shiba>").unwrap(),
            Command::Capture("shiba".to_string())
        );
    }

    #[test]
    fn test_let() {
        assert_eq!(
            Command::parse("let .dog").unwrap(),
            Command::Define(".dog".to_string())
        );
        assert!(matches!(
            Command::parse("let dog"),
            Err(CompileError::UnparsableBlock { .. })
        ));
    }

    #[test]
    fn test_malformed_headers() {
        for header in ["capture shiba", "capture as 9lives", "capture as", "match (x)"] {
            assert!(
                matches!(
                    Command::parse(header),
                    Err(CompileError::UnparsableBlock { .. })
                ),
                "{header}"
            );
        }
    }

    #[test]
    fn test_unknown_command() {
        for header in ["around", "match twice", "before after"] {
            assert!(
                matches!(
                    Command::parse(header),
                    Err(CompileError::UnknownCommand { .. })
                ),
                "{header}"
            );
        }
    }

    #[test]
    fn test_wrap() {
        assert_eq!(Command::Lookbehind.wrap("a").unwrap(), "(?<=a)");
        assert_eq!(Command::Lookahead.wrap("a").unwrap(), "(?=a)");
        assert_eq!(Command::Group.wrap("a").unwrap(), "(?:a)");
        assert_eq!(Command::Alternation.wrap("a|b").unwrap(), "(?:a|b)");
        assert_eq!(
            Command::Capture("n".to_string()).wrap("a").unwrap(),
            "(?<n>a)"
        );
        assert_eq!(Command::Define(".x".to_string()).wrap("a"), None);
        assert_eq!(Command::Alternation.joiner(), "|");
        assert_eq!(Command::Group.joiner(), "");
    }
}
