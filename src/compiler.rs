//! The compilation pipeline shared by every backend.
//!
//! A [`ParserCompiler`] parses expressions with a [`Parser`], joins several
//! trees into one alternation when asked to compile a batch, optionally
//! reverses the trees, and hands the result to a [`CompilerBackend`]. Every
//! failure is returned as a [`CompileError`] naming the expression that
//! caused it.

use super::{ParseError, ast::ParseTree, parser::Parser};
use std::marker::PhantomData;
use tracing::{debug, trace};

/// The direction in which a compiled artifact matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Matches the bytes as written.
    #[default]
    Forwards,
    /// Matches the byte-reverse of what [`Direction::Forwards`] matches.
    Reversed,
}

/// Compiles an expression of type `E` into a `T`.
pub trait Compiler<T, E> {
    fn compile(&self, expression: E) -> Result<T, CompileError>;
}

/// A [`Compiler`] which can also build artifacts that match backwards.
pub trait ReversibleCompiler<T, E>: Compiler<T, E> {
    fn compile_in(&self, expression: E, direction: Direction) -> Result<T, CompileError>;
}

/// Trees which can be turned into their byte-reverse.
pub trait Reversible {
    #[must_use]
    fn reversed(&self) -> Self;
}

impl Reversible for ParseTree {
    fn reversed(&self) -> Self {
        ParseTree::reversed(self)
    }
}

/// The backend-specific half of a compiler.
pub trait CompilerBackend<T, S> {
    /// Builds the artifact for a single tree.
    fn do_compile(&self, ast: &S) -> Result<T, BuildError>;

    /// Combines trees into a single tree matching any one of them.
    fn join_expressions(&self, trees: Vec<S>) -> Result<S, BuildError>;
}

/// Joins trees as the children of one [`ParseTreeType::Alternatives`]
/// node. A single tree is returned unchanged.
///
/// [`ParseTreeType::Alternatives`]: crate::ast::ParseTreeType::Alternatives
#[must_use]
pub fn join_as_alternatives(mut trees: Vec<ParseTree>) -> ParseTree {
    if trees.len() == 1 {
        trees.remove(0)
    } else {
        ParseTree::alternatives(trees)
    }
}

/// An error raised by a [`CompilerBackend`] while building an artifact.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The tree did not have the shape the backend needs.
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{0}")]
    IllegalArgument(String),

    #[error("{0}")]
    OutOfBounds(String),
}

/// The error type of [`Compiler`]s.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// There was no tree to compile.
    #[error("no parse tree to compile")]
    NullTree,

    #[error("cannot parse expression '{expression}': {source}")]
    ParseFailure {
        expression: String,
        #[source]
        source: ParseError,
    },

    #[error("illegal argument compiling expression '{expression}': {message}")]
    IllegalArgument { expression: String, message: String },

    #[error("out of bounds compiling expression '{expression}': {message}")]
    OutOfBounds { expression: String, message: String },
}

impl CompileError {
    /// Wraps a backend error with the text of the expression being compiled.
    #[must_use]
    pub fn from_build(expression: impl Into<String>, err: BuildError) -> Self {
        let expression = expression.into();
        match err {
            BuildError::Parse(source) => CompileError::ParseFailure { expression, source },
            BuildError::IllegalArgument(message) => {
                CompileError::IllegalArgument { expression, message }
            }
            BuildError::OutOfBounds(message) => CompileError::OutOfBounds { expression, message },
        }
    }

    /// The text of the expression which failed, if any.
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        match self {
            CompileError::NullTree => None,
            CompileError::ParseFailure { expression, .. }
            | CompileError::IllegalArgument { expression, .. }
            | CompileError::OutOfBounds { expression, .. } => Some(expression),
        }
    }
}

/// Stands in for the expression text when a tree is compiled directly.
pub const TREE_EXPRESSION: &str = "<parse tree>";

/// Drives a [`CompilerBackend`] with trees produced by a [`Parser`].
pub struct ParserCompiler<S, P, B> {
    parser: P,
    backend: B,
    _tree: PhantomData<fn() -> S>,
}

impl<S, P, B> ParserCompiler<S, P, B> {
    #[must_use]
    pub fn new(parser: P, backend: B) -> Self {
        Self {
            parser,
            backend,
            _tree: PhantomData,
        }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<S, P, B> ParserCompiler<S, P, B>
where
    P: Parser<S>,
{
    fn parse(&self, expression: &str) -> Result<S, CompileError> {
        self.parser
            .parse(expression)
            .map_err(|source| CompileError::ParseFailure {
                expression: expression.to_owned(),
                source,
            })
    }

    /// Compiles a single expression.
    pub fn compile_expression<T>(&self, expression: &str) -> Result<T, CompileError>
    where
        B: CompilerBackend<T, S>,
    {
        debug!(expression, "compiling expression");
        let ast = self.parse(expression)?;
        self.compile_labelled(&ast, expression)
    }

    /// Compiles an already parsed tree.
    pub fn compile_tree<T>(&self, ast: &S) -> Result<T, CompileError>
    where
        B: CompilerBackend<T, S>,
    {
        self.compile_labelled(ast, TREE_EXPRESSION)
    }

    fn compile_labelled<T>(&self, ast: &S, expression: &str) -> Result<T, CompileError>
    where
        B: CompilerBackend<T, S>,
    {
        self.backend
            .do_compile(ast)
            .map_err(|err| CompileError::from_build(expression, err))
    }

    /// Compiles several expressions into one artifact matching any of them.
    ///
    /// Each expression is parsed on its own, so a parse failure names the
    /// exact expression which failed. An empty batch is a
    /// [`CompileError::NullTree`].
    pub fn compile_all<T, X>(&self, expressions: &[X]) -> Result<T, CompileError>
    where
        X: AsRef<str>,
        S: Clone + Reversible,
        B: CompilerBackend<T, S>,
    {
        self.compile_all_in(expressions, Direction::Forwards)
    }

    /// Like [`ParserCompiler::compile_all`], matching in `direction`.
    pub fn compile_all_in<T, X>(
        &self,
        expressions: &[X],
        direction: Direction,
    ) -> Result<T, CompileError>
    where
        X: AsRef<str>,
        S: Clone + Reversible,
        B: CompilerBackend<T, S>,
    {
        debug!(
            expressions = expressions.len(),
            ?direction,
            "compiling expressions"
        );
        if expressions.is_empty() {
            return Err(CompileError::NullTree);
        }

        let trees = expressions
            .iter()
            .map(|expression| {
                let ast = self.parse(expression.as_ref())?;
                Ok(match direction {
                    Direction::Forwards => ast,
                    Direction::Reversed => ast.reversed(),
                })
            })
            .collect::<Result<Vec<S>, CompileError>>()?;

        let label = || {
            expressions
                .iter()
                .map(|expression| -> &str { expression.as_ref() })
                .collect::<Vec<_>>()
                .join(" | ")
        };

        let joined = self
            .backend
            .join_expressions(trees.clone())
            .map_err(|err| CompileError::from_build(label(), err))?;
        trace!(trees = trees.len(), "joined expressions");

        self.backend.do_compile(&joined).map_err(|err| {
            // Name the first expression which fails on its own, falling back
            // to the whole batch.
            trees
                .iter()
                .zip(expressions)
                .find_map(|(tree, expression)| {
                    self.backend
                        .do_compile(tree)
                        .err()
                        .map(|err| CompileError::from_build(expression.as_ref(), err))
                })
                .unwrap_or_else(|| CompileError::from_build(label(), err))
        })
    }
}

impl<'e, T, S, P, B> Compiler<T, &'e str> for ParserCompiler<S, P, B>
where
    P: Parser<S>,
    B: CompilerBackend<T, S>,
{
    fn compile(&self, expression: &'e str) -> Result<T, CompileError> {
        self.compile_expression(expression)
    }
}

impl<'e, T, S, P, B> ReversibleCompiler<T, &'e str> for ParserCompiler<S, P, B>
where
    P: Parser<S>,
    S: Reversible,
    B: CompilerBackend<T, S>,
{
    fn compile_in(&self, expression: &'e str, direction: Direction) -> Result<T, CompileError> {
        match direction {
            Direction::Forwards => self.compile_expression(expression),
            Direction::Reversed => {
                debug!(expression, "compiling reversed expression");
                let ast = self.parse(expression)?.reversed();
                self.compile_labelled(&ast, expression)
            }
        }
    }
}

impl<'e, T, S, P, B, X> Compiler<T, &'e [X]> for ParserCompiler<S, P, B>
where
    X: AsRef<str>,
    P: Parser<S>,
    S: Clone + Reversible,
    B: CompilerBackend<T, S>,
{
    fn compile(&self, expressions: &'e [X]) -> Result<T, CompileError> {
        self.compile_all(expressions)
    }
}

impl<'e, T, S, P, B, X> ReversibleCompiler<T, &'e [X]> for ParserCompiler<S, P, B>
where
    X: AsRef<str>,
    P: Parser<S>,
    S: Clone + Reversible,
    B: CompilerBackend<T, S>,
{
    fn compile_in(&self, expressions: &'e [X], direction: Direction) -> Result<T, CompileError> {
        self.compile_all_in(expressions, direction)
    }
}
