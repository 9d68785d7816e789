//! A byte pattern language and a pluggable compiler framework.
//!
//! Patterns describe which byte values are valid at each position of a byte
//! sequence, much like a regular expression whose alphabet is the 256 byte
//! values:
//!
//! ```text
//! 4d 5a [00-7f]{2} `pe` (&80 | ~0f)* [^ 'a'-'z' digit]
//! ```
//!
//! [`parser::RegexParser`] turns text into a [`ParseTree`],
//! [`set_value::compute_set_value`] reduces set-like subtrees to a
//! [`ByteSet`], and [`compiler::ParserCompiler`] drives any
//! [`compiler::CompilerBackend`] to turn one or many expressions into a
//! compiled artifact, such as an [`automaton::Automaton`] or a literal
//! [`ByteSet`].

#![warn(clippy::pedantic, rust_2018_idioms)]
#![allow(clippy::missing_errors_doc, clippy::too_many_lines)]

pub mod ast;
pub mod automaton;
pub mod byteset;
pub mod compiler;
pub mod lexer;
pub mod literal;
pub mod mnemonic;
pub mod parser;
pub mod serializer;
pub mod set_value;

pub use self::{
    ast::{NodeValue, ParseTree, ParseTreeType},
    automaton::{Automaton, AutomatonCompiler},
    byteset::ByteSet,
    compiler::{
        BuildError, CompileError, Compiler, CompilerBackend, Direction, ParserCompiler,
        ReversibleCompiler,
    },
    lexer::{Lexer, Token},
    literal::ByteSetCompiler,
    parser::{Parser, RegexParser, parse_pattern},
    serializer::AutomataSerializer,
    set_value::compute_set_value,
};

/// The error type for text that cannot be turned into a tree, or a tree that
/// does not have the expected shape.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token of an unexpected type was encountered.
    #[error("unexpected '{found}' at {pos}")]
    UnexpectedToken { pos: usize, found: String },

    /// A byte which cannot start any token was encountered.
    #[error("unexpected '{}' at {pos}", lit.escape_ascii())]
    UnexpectedChar { pos: usize, lit: u8 },

    #[error("unexpected end of expression at {pos}")]
    UnexpectedEnd { pos: usize },

    /// A run of letters which is not a known mnemonic.
    #[error("unknown mnemonic '{word}' at {pos}")]
    UnknownWord { pos: usize, word: String },

    #[error("invalid hex byte '{text}' at {pos}")]
    InvalidHex { pos: usize, text: String },

    #[error("invalid escape sequence '\\{}' at {pos}", lit.escape_ascii())]
    InvalidEscape { pos: usize, lit: u8 },

    /// Strings are ASCII; a byte outside that range was found at `pos`.
    #[error("non-ASCII byte in string at {pos}")]
    NonAsciiString { pos: usize },

    #[error("unterminated string starting at {pos}")]
    UnterminatedString { pos: usize },

    #[error("empty string at {pos}")]
    EmptyString { pos: usize },

    #[error("invalid repeat at {pos}: minimum {min} is greater than maximum {max}")]
    InvalidRepeat { pos: usize, min: u32, max: u32 },

    #[error("invalid number '{text}' at {pos}")]
    InvalidNumber { pos: usize, text: String },

    #[error("empty expression")]
    EmptyExpression,

    #[error("expression is {len} bytes long, the limit is {max}")]
    TooLong { len: usize, max: usize },

    /// Raw node text which is neither two hex digits nor a quoted character.
    #[error("invalid byte value '{0}'")]
    InvalidByte(String),

    /// A node is missing a child or a value its kind requires.
    #[error("malformed node of type {kind}: {reason}")]
    MalformedNode {
        kind: ParseTreeType,
        reason: &'static str,
    },

    /// A node which does not denote a set of bytes was found where one was
    /// required.
    #[error("unsupported node type {0} where a byte value was expected")]
    UnsupportedNodeType(ParseTreeType),
}

pub type Result<T> = std::result::Result<T, ParseError>;
