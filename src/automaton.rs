//! A non-deterministic finite automaton over bytes, and the backend which
//! compiles syntax trees into one.

use super::{
    ast::ParseTree,
    byteset::ByteSet,
    compiler::{BuildError, CompilerBackend, ParserCompiler, join_as_alternatives},
    parser::RegexParser,
};
use std::ops::Range;

mod builder;


/// Index of a state within an [`Automaton`].
pub type StateId = usize;

/// The largest repeat bound the automaton backend accepts.
pub const MAX_REPEAT: u32 = 1000;

/// The most states a single automaton may have. Nested repeats multiply, so
/// this bounds the size of the automaton rather than any single bound.
pub const MAX_STATES: usize = 100_000;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct State {
    transitions: Vec<(ByteSet, StateId)>,
    epsilons: Vec<StateId>,
    is_final: bool,
}

/// A byte-matching automaton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
    states: Vec<State>,
    initial: StateId,
}

impl Automaton {
    /// The number of states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub fn initial(&self) -> StateId {
        self.initial
    }

    #[must_use]
    pub fn is_final(&self, state: StateId) -> bool {
        self.states.get(state).is_some_and(|s| s.is_final)
    }

    /// The byte transitions leaving `state`.
    #[must_use]
    pub fn transitions(&self, state: StateId) -> &[(ByteSet, StateId)] {
        self.states
            .get(state)
            .map(|s| s.transitions.as_slice())
            .unwrap_or_default()
    }

    /// The empty transitions leaving `state`.
    #[must_use]
    pub fn epsilons(&self, state: StateId) -> &[StateId] {
        self.states
            .get(state)
            .map(|s| s.epsilons.as_slice())
            .unwrap_or_default()
    }

    /// Returns `true` if the automaton accepts the whole of `input`.
    #[must_use]
    pub fn matches(&self, input: &[u8]) -> bool {
        let mut current = self.start_set();
        for &byte in input {
            current = self.step(&current, byte);
            if !current.contains(&true) {
                return false;
            }
        }
        self.any_final(&current)
    }

    /// The length of the longest prefix of `input` which the automaton
    /// accepts.
    #[must_use]
    pub fn match_len(&self, input: &[u8]) -> Option<usize> {
        let mut current = self.start_set();
        let mut longest = self.any_final(&current).then_some(0);
        for (i, &byte) in input.iter().enumerate() {
            current = self.step(&current, byte);
            if !current.contains(&true) {
                break;
            }
            if self.any_final(&current) {
                longest = Some(i + 1);
            }
        }
        longest
    }

    /// The length of the longest match starting at `pos`.
    #[must_use]
    pub fn matches_at(&self, input: &[u8], pos: usize) -> Option<usize> {
        input.get(pos..).and_then(|rest| self.match_len(rest))
    }

    /// Finds the leftmost match in `input`, preferring the longest match at
    /// that position.
    #[must_use]
    pub fn find(&self, input: &[u8]) -> Option<Range<usize>> {
        (0..=input.len()).find_map(|start| {
            self.matches_at(input, start)
                .map(|len| start..start + len)
        })
    }

    fn start_set(&self) -> Vec<bool> {
        let mut set = vec![false; self.states.len()];
        if self.initial < set.len() {
            self.close(&mut set, self.initial);
        }
        set
    }

    fn step(&self, current: &[bool], byte: u8) -> Vec<bool> {
        let mut next = vec![false; self.states.len()];
        for (state, _) in current.iter().enumerate().filter(|(_, on)| **on) {
            for (set, target) in &self.states[state].transitions {
                if set.contains(byte) {
                    self.close(&mut next, *target);
                }
            }
        }
        next
    }

    /// Adds `state` and everything reachable from it by empty transitions.
    fn close(&self, set: &mut [bool], state: StateId) {
        let mut pending = vec![state];
        while let Some(state) = pending.pop() {
            if set[state] {
                continue;
            }
            set[state] = true;
            pending.extend(self.states[state].epsilons.iter().copied());
        }
    }

    fn any_final(&self, set: &[bool]) -> bool {
        set.iter()
            .zip(&self.states)
            .any(|(on, state)| *on && state.is_final)
    }
}

/// Compiles [`ParseTree`]s into [`Automaton`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutomatonCompiler;

impl AutomatonCompiler {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CompilerBackend<Automaton, ParseTree> for AutomatonCompiler {
    fn do_compile(&self, ast: &ParseTree) -> Result<Automaton, BuildError> {
        let automaton = builder::Builder::default().build(ast)?;
        tracing::trace!(states = automaton.len(), "built automaton");
        Ok(automaton)
    }

    fn join_expressions(&self, trees: Vec<ParseTree>) -> Result<ParseTree, BuildError> {
        Ok(join_as_alternatives(trees))
    }
}

/// A compiler from pattern text to [`Automaton`]s.
pub type RegexCompiler = ParserCompiler<ParseTree, RegexParser, AutomatonCompiler>;

/// Creates a [`RegexCompiler`] with the default parser settings.
#[must_use]
pub fn regex_compiler() -> RegexCompiler {
    ParserCompiler::new(RegexParser::new(), AutomatonCompiler::new())
}
