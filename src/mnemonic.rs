//! Named byte classes and backslash shorthands.
//!
//! Both are sugar: the parser replaces them with the equivalent
//! [`ParseTreeType::Set`](crate::ast::ParseTreeType::Set) (or a single byte)
//! as soon as they are read.

use crate::ast::ParseTree;

/// Every recognised mnemonic name.
pub const MNEMONICS: [&str; 18] = [
    "ascii",
    "print",
    "graph",
    "word",
    "alphanum",
    "alpha",
    "upper",
    "lower",
    "punct",
    "hexdigit",
    "digit",
    "whitespace",
    "blank",
    "space",
    "tab",
    "newline",
    "return",
    "control",
];

/// Expands a mnemonic name to the set it stands for.
#[must_use]
pub fn expand_mnemonic(name: &str) -> Option<ParseTree> {
    let children = match name {
        "ascii" => vec![range(0x00, 0x7f)],
        "print" => vec![range(0x20, 0x7e)],
        "graph" => vec![range(0x21, 0x7e)],
        "word" => vec![
            range(b'0', b'9'),
            range(b'A', b'Z'),
            range(b'a', b'z'),
            ParseTree::byte(b'_'),
        ],
        "alphanum" => vec![range(b'0', b'9'), range(b'A', b'Z'), range(b'a', b'z')],
        "alpha" => vec![range(b'A', b'Z'), range(b'a', b'z')],
        "upper" => vec![range(b'A', b'Z')],
        "lower" => vec![range(b'a', b'z')],
        "punct" => vec![
            range(0x21, 0x2f),
            range(0x3a, 0x40),
            range(0x5b, 0x60),
            range(0x7b, 0x7e),
        ],
        "hexdigit" => vec![range(b'0', b'9'), range(b'A', b'F'), range(b'a', b'f')],
        "digit" => vec![range(b'0', b'9')],
        "whitespace" => vec![range(0x09, 0x0d), ParseTree::byte(0x20)],
        "blank" => vec![ParseTree::byte(0x09), ParseTree::byte(0x20)],
        "space" => vec![ParseTree::byte(0x20)],
        "tab" => vec![ParseTree::byte(0x09)],
        "newline" => vec![ParseTree::byte(0x0a)],
        "return" => vec![ParseTree::byte(0x0d)],
        "control" => vec![range(0x00, 0x1f), ParseTree::byte(0x7f)],
        _ => return None,
    };
    Some(ParseTree::set(children))
}

/// Expands the byte following a `\` to the node it stands for.
#[must_use]
pub fn expand_shorthand(c: u8) -> Option<ParseTree> {
    let single = match c {
        b't' => Some(0x09),
        b'n' => Some(0x0a),
        b'v' => Some(0x0b),
        b'f' => Some(0x0c),
        b'r' => Some(0x0d),
        b'e' => Some(0x1b),
        _ => None,
    };
    if let Some(b) = single {
        return Some(ParseTree::byte(b));
    }

    let name = match c.to_ascii_lowercase() {
        b'd' => "digit",
        b'w' => "word",
        b's' => "whitespace",
        b'l' => "lower",
        b'u' => "upper",
        b'i' => "ascii",
        _ => return None,
    };
    let set = expand_mnemonic(name)?;
    Some(if c.is_ascii_uppercase() {
        ParseTree::inverted_set(set.children().to_vec())
    } else {
        set
    })
}

fn range(lower: u8, upper: u8) -> ParseTree {
    ParseTree::byte_range(lower, upper)
}
