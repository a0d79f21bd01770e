//! Assembly front end.
//!
//! 1. **Lexer:** Comment stripping and tokenization of one line.
//! 2. **Parser:** Lines to `define` declarations and executable instructions.

/// Line tokenizer.
pub mod lexer;

/// Statement and program parser.
pub mod parser;

pub use parser::{Statement, parse_line, parse_program};
