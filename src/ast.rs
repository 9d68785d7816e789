pub mod kind;
pub mod node;

pub use self::{
    kind::{CustomKind, ParseTreeType},
    node::{NodeValue, ParseTree},
};

impl ParseTree {
    /// Returns a tree which matches the byte-reverse of what this tree
    /// matches.
    ///
    /// Sequences are reversed recursively and strings inside a sequence have
    /// their bytes reversed. Sets, ranges, bitmasks and single bytes are left
    /// as they are. Reversing twice gives back the original tree.
    #[must_use]
    pub fn reversed(&self) -> ParseTree {
        match self.kind() {
            ParseTreeType::Sequence => ParseTree::new(
                self.kind(),
                self.value().clone(),
                self.children().iter().rev().map(ParseTree::reversed).collect(),
            ),
            ParseTreeType::CaseSensitiveString | ParseTreeType::CaseInsensitiveString => {
                let value = match self.value() {
                    NodeValue::Text(text) => NodeValue::Text(text.chars().rev().collect()),
                    other => other.clone(),
                };
                ParseTree::new(self.kind(), value, self.children().to_vec())
            }
            ParseTreeType::Alternatives
            | ParseTreeType::ZeroToMany
            | ParseTreeType::OneToMany
            | ParseTreeType::Optional
            | ParseTreeType::Repeat
            | ParseTreeType::RepeatMinToMany => ParseTree::new(
                self.kind(),
                self.value().clone(),
                self.children().iter().map(ParseTree::reversed).collect(),
            ),
            ParseTreeType::Byte
            | ParseTreeType::Int
            | ParseTreeType::AllBitmask
            | ParseTreeType::AnyBitmask
            | ParseTreeType::Set
            | ParseTreeType::InvertedSet
            | ParseTreeType::Any
            | ParseTreeType::Range
            | ParseTreeType::Custom(_) => self.clone(),
        }
    }
}
