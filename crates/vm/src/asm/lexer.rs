//! Line tokenizer.
//!
//! A line is cut at the first `;`, lowercased, and split into maximal alphanumeric runs
//! (`Word`) and single non-whitespace characters (`Punct`). Whitespace is dropped.

use std::fmt;

/// A lexical token of one source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Maximal run of ASCII letters and digits, lowercased.
    Word(String),
    /// Any other non-whitespace character.
    Punct(char),
}

impl Token {
    /// Returns the word text, or `None` for punctuation.
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(w) => Some(w),
            Self::Punct(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(w) => f.write_str(w),
            Self::Punct(c) => write!(f, "{c}"),
        }
    }
}

/// Removes a trailing `;` comment.
pub fn strip_comment(line: &str) -> &str {
    line.split_once(';').map_or(line, |(code, _)| code)
}

/// Tokenizes one source line.
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    for c in strip_comment(line).chars() {
        if c.is_ascii_alphanumeric() {
            word.push(c.to_ascii_lowercase());
            continue;
        }
        if !word.is_empty() {
            tokens.push(Token::Word(std::mem::take(&mut word)));
        }
        if !c.is_whitespace() {
            tokens.push(Token::Punct(c));
        }
    }
    if !word.is_empty() {
        tokens.push(Token::Word(word));
    }
    tokens
}
