//! A backend compiling single-byte expressions to a [`ByteSet`].

use super::{
    ParseError,
    ast::{ParseTree, ParseTreeType},
    byteset::ByteSet,
    compiler::{BuildError, CompilerBackend, ParserCompiler, join_as_alternatives},
    parser::RegexParser,
    set_value::compute_set_value,
};

/// Compiles an expression which matches exactly one byte into the set of
/// bytes it matches.
///
/// Direction makes no difference to a single byte, so reversed compilation
/// gives the same set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteSetCompiler;

impl ByteSetCompiler {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn add(set: &mut ByteSet, node: &ParseTree) -> Result<(), BuildError> {
        match node.kind() {
            ParseTreeType::Byte
            | ParseTreeType::Any
            | ParseTreeType::Set
            | ParseTreeType::InvertedSet
            | ParseTreeType::Range
            | ParseTreeType::AllBitmask
            | ParseTreeType::AnyBitmask => set.union_with(&compute_set_value(node)?),
            ParseTreeType::CaseSensitiveString | ParseTreeType::CaseInsensitiveString => {
                if node.text_value()?.len() != 1 {
                    return Err(multi_byte(node));
                }
                set.union_with(&compute_set_value(node)?);
            }
            ParseTreeType::Alternatives => {
                for child in node.children() {
                    Self::add(set, child)?;
                }
            }
            ParseTreeType::Sequence => match node.children() {
                [only] => Self::add(set, only)?,
                _ => return Err(multi_byte(node)),
            },
            ParseTreeType::ZeroToMany
            | ParseTreeType::OneToMany
            | ParseTreeType::Optional
            | ParseTreeType::Repeat
            | ParseTreeType::RepeatMinToMany => return Err(multi_byte(node)),
            ParseTreeType::Int | ParseTreeType::Custom(_) => {
                return Err(ParseError::UnsupportedNodeType(node.kind()).into());
            }
        }
        Ok(())
    }
}

fn multi_byte(node: &ParseTree) -> BuildError {
    BuildError::IllegalArgument(format!(
        "{} does not match exactly one byte",
        node.kind().description().to_ascii_lowercase()
    ))
}

impl CompilerBackend<ByteSet, ParseTree> for ByteSetCompiler {
    fn do_compile(&self, ast: &ParseTree) -> Result<ByteSet, BuildError> {
        let mut set = ByteSet::new();
        Self::add(&mut set, ast)?;
        Ok(set)
    }

    fn join_expressions(&self, trees: Vec<ParseTree>) -> Result<ParseTree, BuildError> {
        Ok(join_as_alternatives(trees))
    }
}

/// A compiler from pattern text to literal [`ByteSet`]s.
pub type ByteSetRegexCompiler = ParserCompiler<ParseTree, RegexParser, ByteSetCompiler>;

/// Creates a [`ByteSetRegexCompiler`] with the default parser settings.
#[must_use]
pub fn byte_set_compiler() -> ByteSetRegexCompiler {
    ParserCompiler::new(RegexParser::new(), ByteSetCompiler::new())
}
