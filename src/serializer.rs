//! Rendering compiled artifacts as text.

#[cfg(feature = "dot")]
use super::{automaton::Automaton, byteset::ByteSet};
#[cfg(feature = "dot")]
use std::fmt;

/// Renders an artifact of type `T`, given some context `S`, as text.
pub trait AutomataSerializer<T, S> {
    #[must_use]
    fn serialize(&self, artifact: &T, context: S) -> String;
}

/// Renders an [`Automaton`] as a Graphviz `digraph` named after the context.
#[cfg(feature = "dot")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DotSerializer;

#[cfg(feature = "dot")]
impl AutomataSerializer<Automaton, &str> for DotSerializer {
    fn serialize(&self, automaton: &Automaton, title: &str) -> String {
        Dot { automaton, title }.to_string()
    }
}

#[cfg(feature = "dot")]
struct Dot<'a> {
    automaton: &'a Automaton,
    title: &'a str,
}

#[cfg(feature = "dot")]
impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let automaton = self.automaton;
        writeln!(f, "digraph \"{}\" {{", self.title.escape_default())?;
        writeln!(f, "    rankdir=LR;")?;
        writeln!(f, "    start [shape=point];")?;
        writeln!(f, "    start -> {};", automaton.initial())?;

        for state in 0..automaton.len() {
            let shape = if automaton.is_final(state) {
                "doublecircle"
            } else {
                "circle"
            };
            writeln!(f, "    {state} [shape={shape}];")?;
        }

        for state in 0..automaton.len() {
            for (set, target) in automaton.transitions(state) {
                writeln!(f, "    {state} -> {target} [label=\"{}\"];", Label(set))?;
            }
            for target in automaton.epsilons(state) {
                writeln!(f, "    {state} -> {target} [style=dashed];")?;
            }
        }

        writeln!(f, "}}")
    }
}

/// An edge label: hex bytes and ranges, or `.` for every byte.
#[cfg(feature = "dot")]
struct Label<'a>(&'a ByteSet);

#[cfg(feature = "dot")]
impl fmt::Display for Label<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_full() {
            return f.write_str(".");
        }
        for (i, (lo, hi)) in self.0.ranges().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if lo == hi {
                write!(f, "{lo:02x}")?;
            } else {
                write!(f, "{lo:02x}-{hi:02x}")?;
            }
        }
        Ok(())
    }
}
