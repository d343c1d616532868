//! Line model for GCode
//!
//! One `GcodeLine` per input line: the recognized command, the axis words the
//! minifier tracks, a bag of generic parameters and the trailing comment.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ParseError;
use crate::format::{format_line, Precision};
use crate::parser::lexer::{Token, TokenKind};

/// Letter class of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandLetter {
    G,
    M,
}

impl CommandLetter {
    pub fn as_char(self) -> char {
        match self {
            CommandLetter::G => 'G',
            CommandLetter::M => 'M',
        }
    }
}

/// A command like "G1" or "M83"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command {
    pub letter: CommandLetter,
    pub code: u16,
}

impl Command {
    pub const fn g(code: u16) -> Self {
        Self {
            letter: CommandLetter::G,
            code,
        }
    }

    pub const fn m(code: u16) -> Self {
        Self {
            letter: CommandLetter::M,
            code,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter.as_char(), self.code)
    }
}

/// A parsed line of GCode
///
/// Axis words are `None` when the line does not mention them. A `feedrate`
/// of `0.0` means "not specified"; zero is never a valid feed rate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GcodeLine {
    pub command: Option<Command>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub e: Option<f64>,
    pub feedrate: f64,
    pub numeric_params: BTreeMap<char, f64>,
    pub string_params: BTreeMap<char, String>,
    /// Trailing comment including its leading marker
    pub comment: Option<String>,
}

impl GcodeLine {
    /// A line with only a command, like "G28"
    pub fn with_command(command: Command) -> Self {
        Self {
            command: Some(command),
            ..Self::default()
        }
    }

    /// A comment-only line; `text` should include the comment marker
    pub fn comment_only(text: impl Into<String>) -> Self {
        Self {
            comment: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn has_feedrate(&self) -> bool {
        self.feedrate != 0.0
    }

    pub fn has_generic_params(&self) -> bool {
        !self.numeric_params.is_empty() || !self.string_params.is_empty()
    }

    fn has_comment(&self) -> bool {
        self.comment.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// True if any axis, feed rate or generic parameter is present
    pub fn has_words(&self) -> bool {
        self.x.is_some()
            || self.y.is_some()
            || self.z.is_some()
            || self.e.is_some()
            || self.has_feedrate()
            || self.has_generic_params()
    }

    /// Nothing to emit: no command, no words and no (non-empty) comment
    pub fn is_empty(&self) -> bool {
        self.command.is_none() && !self.has_words() && !self.has_comment()
    }

    /// Only a comment, nothing the machine would act on
    pub fn is_comment_only(&self) -> bool {
        self.command.is_none() && !self.has_words() && self.comment.is_some()
    }

    pub fn is(&self, command: Command) -> bool {
        self.command == Some(command)
    }

    pub fn is_g(&self, code: u16) -> bool {
        self.is(Command::g(code))
    }

    pub fn is_m(&self, code: u16) -> bool {
        self.is(Command::m(code))
    }

    /// Reset to the fully empty line
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for GcodeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_line(self, &Precision::default()))
    }
}

/// Convert tokens into a line
pub fn tokens_to_line(tokens: &[Token<'_>]) -> Result<GcodeLine, ParseError> {
    let mut line = GcodeLine::default();

    for token in tokens {
        let mut chars = token.text.chars();
        let Some(letter) = chars.next() else {
            continue;
        };
        let rest = chars.as_str();

        match token.kind {
            TokenKind::Comment => {
                line.comment = Some(token.text.to_string());
            }
            TokenKind::Command => {
                let code = rest.parse::<u16>().map_err(|_| ParseError::InvalidCommand {
                    token: token.text.to_string(),
                })?;
                let letter = if letter.eq_ignore_ascii_case(&'G') {
                    CommandLetter::G
                } else {
                    CommandLetter::M
                };
                line.command = Some(Command { letter, code });
            }
            TokenKind::Axis => {
                let value = Some(parse_number(letter, rest, token.text)?);
                match letter.to_ascii_uppercase() {
                    'X' => line.x = value,
                    'Y' => line.y = value,
                    'Z' => line.z = value,
                    _ => line.e = value,
                }
            }
            TokenKind::Feedrate => {
                line.feedrate = parse_number(letter, rest, token.text)?;
            }
            TokenKind::Parameter => match rest.parse::<f64>() {
                Ok(value) => {
                    line.numeric_params.insert(letter, value);
                }
                Err(_) => {
                    line.string_params.insert(letter, rest.to_string());
                }
            },
        }
    }

    Ok(line)
}

fn parse_number(letter: char, text: &str, token: &str) -> Result<f64, ParseError> {
    text.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        letter,
        token: token.to_string(),
    })
}
