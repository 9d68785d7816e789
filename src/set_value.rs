//! Computes the concrete bytes denoted by set-like syntax tree nodes.

use crate::{
    ParseError, Result,
    ast::{ParseTree, ParseTreeType},
    byteset::ByteSet,
};

/// Computes the set of bytes a [`ParseTreeType::Set`] or
/// [`ParseTreeType::InvertedSet`] node denotes.
///
/// Any other value-producing node is accepted too and yields the bytes it
/// matches on its own, so `compute_set_value` can be used on a bare range,
/// bitmask or string.
///
/// # Errors
///
/// Returns [`ParseError::UnsupportedNodeType`] for the first child, in
/// document order, which does not denote a set of bytes. No partial set is
/// returned on failure.
pub fn compute_set_value(node: &ParseTree) -> Result<ByteSet> {
    let mut set = ByteSet::new();
    add_node_value(&mut set, node)?;
    Ok(set)
}

fn add_node_value(set: &mut ByteSet, node: &ParseTree) -> Result<()> {
    match node.kind() {
        ParseTreeType::Byte => set.add_byte(node.byte_value()?),
        ParseTreeType::Any => *set = ByteSet::full(),
        ParseTreeType::Set => {
            for child in node.children() {
                add_node_value(set, child)?;
            }
        }
        ParseTreeType::InvertedSet => {
            let mut inner = ByteSet::new();
            for child in node.children() {
                add_node_value(&mut inner, child)?;
            }
            set.union_with(&inner.inverted());
        }
        ParseTreeType::Range => {
            let lower = node.child(0)?.byte_value()?;
            let upper = node.child(1)?.byte_value()?;
            set.add_range(lower, upper);
        }
        ParseTreeType::AllBitmask => set.add_all_bitmask(node.child(0)?.byte_value()?),
        ParseTreeType::AnyBitmask => set.add_any_bitmask(node.child(0)?.byte_value()?),
        ParseTreeType::CaseSensitiveString => {
            for b in node.text_value()?.bytes() {
                set.add_byte(b);
            }
        }
        ParseTreeType::CaseInsensitiveString => {
            for b in node.text_value()?.bytes() {
                set.add_byte(b);
                if b.is_ascii_alphabetic() {
                    set.add_byte(b ^ 0x20);
                }
            }
        }
        ParseTreeType::Int
        | ParseTreeType::Sequence
        | ParseTreeType::Alternatives
        | ParseTreeType::ZeroToMany
        | ParseTreeType::OneToMany
        | ParseTreeType::Optional
        | ParseTreeType::Repeat
        | ParseTreeType::RepeatMinToMany
        | ParseTreeType::Custom(_) => {
            return Err(ParseError::UnsupportedNodeType(node.kind()));
        }
    }
    Ok(())
}
