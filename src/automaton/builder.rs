use super::{Automaton, MAX_REPEAT, MAX_STATES, State, StateId};
use crate::{
    ParseError,
    ast::{ParseTree, ParseTreeType},
    byteset::ByteSet,
    compiler::BuildError,
    set_value::compute_set_value,
};

/// The entry and exit states of a partly built automaton.
#[derive(Clone, Copy)]
struct Fragment {
    start: StateId,
    end: StateId,
}

/// Builds an [`Automaton`] from a tree by Thompson construction.
#[derive(Default)]
pub(super) struct Builder {
    states: Vec<State>,
}

impl Builder {
    pub(super) fn build(mut self, tree: &ParseTree) -> Result<Automaton, BuildError> {
        let fragment = self.fragment(tree)?;
        self.states[fragment.end].is_final = true;
        Ok(Automaton {
            states: self.states,
            initial: fragment.start,
        })
    }

    fn add_state(&mut self) -> Result<StateId, BuildError> {
        if self.states.len() >= MAX_STATES {
            return Err(BuildError::IllegalArgument(format!(
                "automaton would need more than {MAX_STATES} states"
            )));
        }
        self.states.push(State::default());
        Ok(self.states.len() - 1)
    }

    fn epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from].epsilons.push(to);
    }

    /// Adds a fresh pair of states.
    fn pair(&mut self) -> Result<Fragment, BuildError> {
        let start = self.add_state()?;
        let end = self.add_state()?;
        Ok(Fragment { start, end })
    }

    fn empty(&mut self) -> Result<Fragment, BuildError> {
        let fragment = self.pair()?;
        self.epsilon(fragment.start, fragment.end);
        Ok(fragment)
    }

    fn transition(&mut self, set: ByteSet) -> Result<Fragment, BuildError> {
        let fragment = self.pair()?;
        self.states[fragment.start]
            .transitions
            .push((set, fragment.end));
        Ok(fragment)
    }

    fn chain(&mut self, fragments: Vec<Fragment>) -> Result<Fragment, BuildError> {
        let mut fragments = fragments.into_iter();
        let Some(first) = fragments.next() else {
            return self.empty();
        };
        let mut end = first.end;
        for next in fragments {
            self.epsilon(end, next.start);
            end = next.end;
        }
        Ok(Fragment {
            start: first.start,
            end,
        })
    }

    fn fragment(&mut self, node: &ParseTree) -> Result<Fragment, BuildError> {
        match node.kind() {
            ParseTreeType::Byte
            | ParseTreeType::Any
            | ParseTreeType::Set
            | ParseTreeType::InvertedSet
            | ParseTreeType::Range
            | ParseTreeType::AllBitmask
            | ParseTreeType::AnyBitmask => {
                let set = compute_set_value(node)?;
                self.transition(set)
            }
            ParseTreeType::CaseSensitiveString => {
                let text = ascii_text(node)?;
                let fragments = text
                    .bytes()
                    .map(|b| self.transition(ByteSet::single(b)))
                    .collect::<Result<Vec<_>, _>>()?;
                self.chain(fragments)
            }
            ParseTreeType::CaseInsensitiveString => {
                let text = ascii_text(node)?;
                let fragments = text
                    .bytes()
                    .map(|b| {
                        let mut set = ByteSet::single(b);
                        if b.is_ascii_alphabetic() {
                            set.add_byte(b ^ 0x20);
                        }
                        self.transition(set)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                self.chain(fragments)
            }
            ParseTreeType::Sequence => {
                let fragments = node
                    .children()
                    .iter()
                    .map(|child| self.fragment(child))
                    .collect::<Result<Vec<_>, _>>()?;
                self.chain(fragments)
            }
            ParseTreeType::Alternatives => {
                if node.children().is_empty() {
                    return Err(BuildError::IllegalArgument(
                        "alternatives must have at least one child".to_owned(),
                    ));
                }
                let outer = self.pair()?;
                for child in node.children() {
                    let branch = self.fragment(child)?;
                    self.epsilon(outer.start, branch.start);
                    self.epsilon(branch.end, outer.end);
                }
                Ok(outer)
            }
            ParseTreeType::ZeroToMany => {
                let inner = self.fragment(node.child(0)?)?;
                self.star(inner)
            }
            ParseTreeType::OneToMany => {
                let inner = self.fragment(node.child(0)?)?;
                self.plus(inner)
            }
            ParseTreeType::Optional => {
                let inner = self.fragment(node.child(0)?)?;
                self.optional(inner)
            }
            ParseTreeType::Repeat => {
                let (min, max, item) = match node.children() {
                    [count, item] => {
                        let count = repeat_bound(count)?;
                        (count, count, item)
                    }
                    [min, max, item] => (repeat_bound(min)?, repeat_bound(max)?, item),
                    _ => {
                        return Err(ParseError::MalformedNode {
                            kind: node.kind(),
                            reason: "repeat needs a count and a node",
                        }
                        .into());
                    }
                };
                if min > max {
                    return Err(BuildError::IllegalArgument(format!(
                        "repeat minimum {min} is greater than maximum {max}"
                    )));
                }
                let mut fragments = Vec::with_capacity(max);
                for _ in 0..min {
                    fragments.push(self.fragment(item)?);
                }
                for _ in min..max {
                    let inner = self.fragment(item)?;
                    fragments.push(self.optional(inner)?);
                }
                self.chain(fragments)
            }
            ParseTreeType::RepeatMinToMany => {
                let min = repeat_bound(node.child(0)?)?;
                let item = node.child(1)?;
                let mut fragments = Vec::with_capacity(min + 1);
                for _ in 0..min {
                    fragments.push(self.fragment(item)?);
                }
                let inner = self.fragment(item)?;
                fragments.push(self.star(inner)?);
                self.chain(fragments)
            }
            ParseTreeType::Int | ParseTreeType::Custom(_) => {
                Err(ParseError::UnsupportedNodeType(node.kind()).into())
            }
        }
    }

    // Each quantifier wraps `inner` in a fresh pair of states. Adding the
    // skip or loop edge to `inner` itself would let an enclosing quantifier
    // reach the loop without crossing the rest of `inner`.

    fn optional(&mut self, inner: Fragment) -> Result<Fragment, BuildError> {
        let outer = self.pair()?;
        self.epsilon(outer.start, inner.start);
        self.epsilon(outer.start, outer.end);
        self.epsilon(inner.end, outer.end);
        Ok(outer)
    }

    fn plus(&mut self, inner: Fragment) -> Result<Fragment, BuildError> {
        let outer = self.pair()?;
        self.epsilon(outer.start, inner.start);
        self.epsilon(inner.end, inner.start);
        self.epsilon(inner.end, outer.end);
        Ok(outer)
    }

    fn star(&mut self, inner: Fragment) -> Result<Fragment, BuildError> {
        let outer = self.plus(inner)?;
        self.epsilon(outer.start, outer.end);
        Ok(outer)
    }
}

/// The text of a string node. Strings must be ASCII so that reversing the
/// text reverses the bytes it matches.
fn ascii_text(node: &ParseTree) -> Result<&str, BuildError> {
    let text = node.text_value()?;
    if text.is_ascii() {
        Ok(text)
    } else {
        Err(BuildError::IllegalArgument(format!(
            "string '{}' is not ASCII",
            text.escape_default()
        )))
    }
}

fn repeat_bound(node: &ParseTree) -> Result<usize, BuildError> {
    let bound = node.int_value()?;
    if bound > MAX_REPEAT {
        return Err(BuildError::IllegalArgument(format!(
            "repeat bound {bound} exceeds the maximum of {MAX_REPEAT}"
        )));
    }
    usize::try_from(bound).map_err(|_| BuildError::OutOfBounds(format!("repeat bound {bound}")))
}
