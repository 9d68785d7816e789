use super::ParseTreeType;
use crate::{ParseError, Result};

/// The value carried by a leaf node.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum NodeValue {
    #[default]
    None,
    /// A resolved byte.
    Byte(u8),
    /// A resolved integer.
    Int(u32),
    /// Raw source text: hex digits, a quoted character, or unquoted string
    /// contents.
    Text(String),
}

/// A node of a byte pattern syntax tree.
///
/// Nodes are immutable once built. Child order is significant: the first and
/// second children of a [`ParseTreeType::Range`] are its bounds, children of a
/// [`ParseTreeType::Sequence`] are matched in order and children of a
/// [`ParseTreeType::Alternatives`] are tried in order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParseTree {
    kind: ParseTreeType,
    value: NodeValue,
    children: Vec<ParseTree>,
}

impl ParseTree {
    #[must_use]
    pub fn new(kind: ParseTreeType, value: NodeValue, children: Vec<ParseTree>) -> Self {
        Self {
            kind,
            value,
            children,
        }
    }

    fn leaf(kind: ParseTreeType, value: NodeValue) -> Self {
        Self::new(kind, value, Vec::new())
    }

    fn parent(kind: ParseTreeType, children: Vec<ParseTree>) -> Self {
        Self::new(kind, NodeValue::None, children)
    }

    #[must_use]
    pub fn byte(b: u8) -> Self {
        Self::leaf(ParseTreeType::Byte, NodeValue::Byte(b))
    }

    /// A byte leaf holding unresolved source text, either two hex digits or a
    /// quoted character such as `'a'`.
    #[must_use]
    pub fn byte_text(text: impl Into<String>) -> Self {
        Self::leaf(ParseTreeType::Byte, NodeValue::Text(text.into()))
    }

    #[must_use]
    pub fn int(n: u32) -> Self {
        Self::leaf(ParseTreeType::Int, NodeValue::Int(n))
    }

    #[must_use]
    pub fn any() -> Self {
        Self::leaf(ParseTreeType::Any, NodeValue::None)
    }

    /// A case-sensitive string. `text` is the unquoted content.
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::leaf(ParseTreeType::CaseSensitiveString, NodeValue::Text(text.into()))
    }

    /// A case-insensitive string. `text` is the unquoted content.
    #[must_use]
    pub fn case_insensitive_string(text: impl Into<String>) -> Self {
        Self::leaf(
            ParseTreeType::CaseInsensitiveString,
            NodeValue::Text(text.into()),
        )
    }

    #[must_use]
    pub fn all_bitmask(mask: u8) -> Self {
        Self::parent(ParseTreeType::AllBitmask, vec![Self::byte(mask)])
    }

    #[must_use]
    pub fn any_bitmask(mask: u8) -> Self {
        Self::parent(ParseTreeType::AnyBitmask, vec![Self::byte(mask)])
    }

    /// An inclusive range between two endpoint nodes.
    #[must_use]
    pub fn range(lower: ParseTree, upper: ParseTree) -> Self {
        Self::parent(ParseTreeType::Range, vec![lower, upper])
    }

    #[must_use]
    pub fn byte_range(lower: u8, upper: u8) -> Self {
        Self::range(Self::byte(lower), Self::byte(upper))
    }

    #[must_use]
    pub fn set(children: Vec<ParseTree>) -> Self {
        Self::parent(ParseTreeType::Set, children)
    }

    #[must_use]
    pub fn inverted_set(children: Vec<ParseTree>) -> Self {
        Self::parent(ParseTreeType::InvertedSet, children)
    }

    #[must_use]
    pub fn sequence(children: Vec<ParseTree>) -> Self {
        Self::parent(ParseTreeType::Sequence, children)
    }

    #[must_use]
    pub fn alternatives(children: Vec<ParseTree>) -> Self {
        Self::parent(ParseTreeType::Alternatives, children)
    }

    #[must_use]
    pub fn zero_to_many(node: ParseTree) -> Self {
        Self::parent(ParseTreeType::ZeroToMany, vec![node])
    }

    #[must_use]
    pub fn one_to_many(node: ParseTree) -> Self {
        Self::parent(ParseTreeType::OneToMany, vec![node])
    }

    #[must_use]
    pub fn optional(node: ParseTree) -> Self {
        Self::parent(ParseTreeType::Optional, vec![node])
    }

    /// `node{count}`
    #[must_use]
    pub fn repeat(count: u32, node: ParseTree) -> Self {
        Self::parent(ParseTreeType::Repeat, vec![Self::int(count), node])
    }

    /// `node{min,max}`
    #[must_use]
    pub fn repeat_min_max(min: u32, max: u32, node: ParseTree) -> Self {
        Self::parent(
            ParseTreeType::Repeat,
            vec![Self::int(min), Self::int(max), node],
        )
    }

    /// `node{min,*}`
    #[must_use]
    pub fn repeat_min_to_many(min: u32, node: ParseTree) -> Self {
        Self::parent(ParseTreeType::RepeatMinToMany, vec![Self::int(min), node])
    }

    #[must_use]
    pub fn kind(&self) -> ParseTreeType {
        self.kind
    }

    #[must_use]
    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    #[must_use]
    pub fn children(&self) -> &[ParseTree] {
        &self.children
    }

    /// Returns the child at `index`, or a [`ParseError::MalformedNode`] if
    /// this node has too few children.
    pub fn child(&self, index: usize) -> Result<&ParseTree> {
        self.children
            .get(index)
            .ok_or(ParseError::MalformedNode {
                kind: self.kind,
                reason: "missing child node",
            })
    }

    /// Resolves the byte carried by this node.
    ///
    /// Raw text starting with a quote resolves to the code of the quoted
    /// character; any other text must be exactly two hex digits.
    pub fn byte_value(&self) -> Result<u8> {
        match &self.value {
            NodeValue::Byte(b) => Ok(*b),
            NodeValue::Text(text) => resolve_byte(text),
            NodeValue::None | NodeValue::Int(_) => Err(ParseError::MalformedNode {
                kind: self.kind,
                reason: "node has no byte value",
            }),
        }
    }

    pub fn int_value(&self) -> Result<u32> {
        match &self.value {
            NodeValue::Int(n) => Ok(*n),
            NodeValue::Byte(b) => Ok(u32::from(*b)),
            NodeValue::Text(text) => text.parse().map_err(|_| ParseError::MalformedNode {
                kind: self.kind,
                reason: "node text is not a decimal integer",
            }),
            NodeValue::None => Err(ParseError::MalformedNode {
                kind: self.kind,
                reason: "node has no integer value",
            }),
        }
    }

    pub fn text_value(&self) -> Result<&str> {
        match &self.value {
            NodeValue::Text(text) => Ok(text),
            _ => Err(ParseError::MalformedNode {
                kind: self.kind,
                reason: "node has no text value",
            }),
        }
    }
}

fn resolve_byte(text: &str) -> Result<u8> {
    let bytes = text.as_bytes();
    match bytes {
        [b'\'', c, ..] => Ok(*c),
        [hi, lo] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
            u8::from_str_radix(text, 16).map_err(|_| ParseError::InvalidByte(text.to_owned()))
        }
        _ => Err(ParseError::InvalidByte(text.to_owned())),
    }
}
