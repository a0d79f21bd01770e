//! Source parser.
//!
//! Turns assembly text into a [`Program`]. The grammar is one statement per line:
//!
//! ```text
//! define <name> db|dw [-]<literal>   ; variable declaration
//! <mnemonic> [<operand> [, <operand>]]
//! ```
//!
//! Operands are names or literals (decimal, optionally signed, or `0x` hex). Commas are
//! optional separators. Any malformed line aborts the whole load.

use std::collections::HashSet;

use crate::common::error::{Result, VmError};
use crate::common::reg::Register;
use crate::isa::{DataSize, Instruction, Opcode, Operand, Program, VariableDecl};

use super::lexer::{Token, tokenize};

/// A parsed, non-empty source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    /// `define` directive.
    Define(VariableDecl),
    /// Executable instruction.
    Instruction(Instruction),
}

/// Parses a whole source text.
///
/// # Errors
///
/// - [`VmError::Parse`] for a malformed line, an unknown mnemonic or a bad operand count.
/// - [`VmError::DuplicateVariable`] when a name is declared twice or shadows a register.
pub fn parse_program(source: &str) -> Result<Program> {
    let mut program = Program::default();
    let mut declared = HashSet::new();

    for (idx, text) in source.lines().enumerate() {
        match parse_line(idx + 1, text)? {
            None => {}
            Some(Statement::Define(decl)) => {
                if Register::from_name(&decl.name).is_some() || !declared.insert(decl.name.clone())
                {
                    return Err(VmError::DuplicateVariable(decl.name));
                }
                program.variables.push(decl);
            }
            Some(Statement::Instruction(inst)) => program.code.push(inst),
        }
    }
    Ok(program)
}

/// Parses one line; blank and comment-only lines yield `None`.
///
/// # Errors
///
/// [`VmError::Parse`] tagged with `line`.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Statement>> {
    let tokens = tokenize(text);
    let Some((head, rest)) = tokens.split_first() else {
        return Ok(None);
    };
    let mnemonic = head
        .as_word()
        .ok_or_else(|| VmError::parse(line, format!("expected a mnemonic, found `{head}`")))?;
    let opcode: Opcode = mnemonic
        .parse()
        .map_err(|e| {
            VmError::parse_caused_by(line, format!("unrecognized mnemonic `{mnemonic}`"), e)
        })?;
    let args = parse_operands(line, rest)?;

    if opcode == Opcode::Define {
        return parse_define(line, args).map(|decl| Some(Statement::Define(decl)));
    }
    Instruction::from_parts(opcode, args)
        .map(|inst| Some(Statement::Instruction(inst)))
        .map_err(|e| {
            VmError::parse_caused_by(line, format!("malformed `{opcode}` instruction"), e)
        })
}

fn parse_operands(line: usize, tokens: &[Token]) -> Result<Vec<Operand>> {
    let mut operands = Vec::new();
    let mut iter = tokens.iter();

    while let Some(tok) = iter.next() {
        match tok {
            Token::Punct(',') => {}
            Token::Punct(sign @ ('-' | '+')) => {
                let digits = iter.next().and_then(Token::as_word).ok_or_else(|| {
                    VmError::parse(line, format!("expected a number after `{sign}`"))
                })?;
                let value = parse_literal(line, digits)?;
                operands.push(Operand::Literal(if *sign == '-' { -value } else { value }));
            }
            Token::Punct(c) => return Err(VmError::parse(line, format!("unexpected `{c}`"))),
            Token::Word(w) if w.starts_with(|c: char| c.is_ascii_digit()) => {
                operands.push(Operand::Literal(parse_literal(line, w)?));
            }
            Token::Word(w) => operands.push(Operand::Name(w.clone())),
        }
    }
    Ok(operands)
}

/// Parses an unsigned decimal or `0x` hexadecimal literal of any length.
///
/// Digits are accumulated modulo 2^64. Every supported width divides 2^64, so the later
/// reduction into the destination width is exact.
fn parse_literal(line: usize, text: &str) -> Result<i128> {
    let (digits, radix) = text.strip_prefix("0x").map_or((text, 10), |hex| (hex, 16));
    let invalid = || VmError::parse(line, format!("invalid literal `{text}`"));
    if digits.is_empty() {
        return Err(invalid());
    }
    digits
        .chars()
        .try_fold(0u64, |acc, c| {
            let digit = c.to_digit(radix)?;
            Some(acc.wrapping_mul(u64::from(radix)).wrapping_add(u64::from(digit)))
        })
        .map(i128::from)
        .ok_or_else(invalid)
}

fn parse_define(line: usize, args: Vec<Operand>) -> Result<VariableDecl> {
    match args.as_slice() {
        [Operand::Name(name), Operand::Name(tag), Operand::Literal(value)] => {
            let size: DataSize = tag
                .parse()
                .map_err(|_| VmError::parse(line, format!("unknown size tag `{tag}`")))?;
            Ok(VariableDecl::new(name.clone(), size, *value))
        }
        _ => Err(VmError::parse(
            line,
            "expected `define <name> db|dw <literal>`",
        )),
    }
}
