//! GCode Lexer
//!
//! Splits one line into words and an optional trailing comment.
//! Words are classified by their leading letter only; numbers are parsed later.

/// Marker that starts a comment running to the end of the line
pub const COMMENT_MARKER: char = ';';

/// Token types in GCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Command like "G1", "M83"
    Command,
    /// Axis word: X, Y, Z or E
    Axis,
    /// Feed rate word "F..."
    Feedrate,
    /// Any other word, like "S255" or "T0"
    Parameter,
    /// Trailing comment, including its marker
    Comment,
}

/// A token borrowed from the source line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Tokenize a line of GCode into tokens
///
/// Everything from the first comment marker onwards becomes a single
/// `Comment` token. The region before it is split on whitespace; no
/// whitespace is required between the last word and the marker.
pub fn tokenize_line(line: &str) -> Vec<Token<'_>> {
    let body = line.trim_start_matches(|c: char| c.is_ascii_whitespace());
    if body.is_empty() {
        return Vec::new();
    }

    let (code, comment) = match body.find(COMMENT_MARKER) {
        Some(idx) => (&body[..idx], Some(&body[idx..])),
        None => (body, None),
    };

    let mut tokens: Vec<Token<'_>> = code
        .split(|c: char| c.is_ascii_whitespace())
        .filter(|word| !word.is_empty())
        .map(|text| Token {
            kind: classify(text),
            text,
        })
        .collect();

    if let Some(text) = comment {
        tokens.push(Token {
            kind: TokenKind::Comment,
            text,
        });
    }

    tokens
}

/// Classify a word by its leading letter (case-insensitive)
fn classify(word: &str) -> TokenKind {
    match word.chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('G' | 'M') => TokenKind::Command,
        Some('X' | 'Y' | 'Z' | 'E') => TokenKind::Axis,
        Some('F') => TokenKind::Feedrate,
        _ => TokenKind::Parameter,
    }
}
