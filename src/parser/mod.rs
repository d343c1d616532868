//! GCode Parser
//!
//! Turns one line of text into a `GcodeLine`. Only the words the minifier
//! models (commands, X/Y/Z/E, F) are typed; everything else lands in the
//! generic parameter maps.

pub mod ast;
pub mod lexer;

pub use ast::{Command, CommandLetter, GcodeLine};
pub use lexer::{tokenize_line, Token, TokenKind, COMMENT_MARKER};

use crate::error::ParseError;

/// Parse a single line of GCode into structured data
///
/// Whitespace-only and empty lines parse to the empty line. Fails when a
/// command, axis or feed rate word carries something other than a number.
pub fn parse_line(line: &str) -> Result<GcodeLine, ParseError> {
    let tokens = lexer::tokenize_line(line);
    ast::tokens_to_line(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_parse_simple_move() {
        let line = parse_line("G0 X1 Y2 Z3 E4").unwrap();

        assert_eq!(
            line,
            GcodeLine {
                command: Some(Command::g(0)),
                x: Some(1.0),
                y: Some(2.0),
                z: Some(3.0),
                e: Some(4.0),
                ..GcodeLine::default()
            }
        );
    }

    #[test]
    fn test_parse_leading_whitespace_and_short_decimals() {
        let line = parse_line(" G0 X.21 Y20 Z3").unwrap();
        assert_eq!(line.x, Some(0.21));
        assert_eq!(line.y, Some(20.0));

        let line = parse_line("\tG1 Z0.31 X1 Y2").unwrap();
        assert_eq!(line.command, Some(Command::g(1)));
        assert_eq!(line.z, Some(0.31));
    }

    #[test]
    fn test_parse_feedrate_and_comment() {
        let line = parse_line("G1 Z20 F200 ; move Z axis up").unwrap();

        assert_eq!(line.z, Some(20.0));
        assert_eq!(line.feedrate, 200.0);
        assert_eq!(line.comment.as_deref(), Some("; move Z axis up"));
    }

    #[test]
    fn test_parse_comment_only() {
        let line = parse_line("; comment text").unwrap();
        assert_eq!(line, GcodeLine::comment_only("; comment text"));
        assert!(line.is_comment_only());
    }

    #[test]
    fn test_parse_empty_line() {
        assert!(parse_line("").unwrap().is_empty());
        assert!(parse_line("   ").unwrap().is_empty());
        assert!(parse_line(" \t ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_bare_parameter() {
        let line = parse_line("T0").unwrap();

        assert_eq!(line.command, None);
        assert_eq!(line.numeric_params, BTreeMap::from([('T', 0.0)]));
    }

    #[test]
    fn test_parse_string_params() {
        let line = parse_line(r#"M587 S"Network_SSID" P"Network_Password""#).unwrap();

        assert_eq!(line.command, Some(Command::m(587)));
        assert_eq!(
            line.string_params,
            BTreeMap::from([
                ('S', r#""Network_SSID""#.to_string()),
                ('P', r#""Network_Password""#.to_string()),
            ])
        );

        let line = parse_line("M118 SHello_Duet").unwrap();
        assert_eq!(line.string_params.get(&'S').map(String::as_str), Some("Hello_Duet"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_line("G1 Xabc").is_err());
        assert!(parse_line("M-1").is_err());
        assert!(parse_line("G1 E").is_err());
    }
}
