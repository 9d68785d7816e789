use std::{
    collections::HashMap,
    fmt,
    sync::{LazyLock, Mutex, PoisonError},
};

/// The kind of a [`ParseTree`](super::ParseTree) node.
///
/// The built-in kinds are a closed set. Backends which need extra node kinds
/// of their own register them once at start-up with
/// [`ParseTreeType::register`], which yields a [`ParseTreeType::Custom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseTreeType {
    /// One concrete byte.
    Byte,
    /// A decimal integer, used for repeat bounds.
    Int,
    /// Matches bytes which have all the bits of the mask set.
    AllBitmask,
    /// Matches bytes which have any of the bits of the mask set.
    AnyBitmask,
    /// The union of the values of its children.
    Set,
    /// The complement of the union of the values of its children.
    InvertedSet,
    /// Matches any byte.
    Any,
    CaseSensitiveString,
    CaseInsensitiveString,
    /// An inclusive byte range.
    Range,
    /// Children matched one after another.
    Sequence,
    /// Children tried in order; any one of them may match.
    Alternatives,
    /// `*`
    ZeroToMany,
    /// `+`
    OneToMany,
    /// `?`
    Optional,
    /// `{n}` or `{n,m}`
    Repeat,
    /// `{n,*}`
    RepeatMinToMany,
    /// A kind registered at runtime.
    Custom(CustomKind),
}

/// A node kind registered through [`ParseTreeType::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomKind {
    id: u32,
    description: &'static str,
}

impl ParseTreeType {
    /// Every built-in kind, in id order.
    pub const BUILTIN: [ParseTreeType; 17] = [
        ParseTreeType::Byte,
        ParseTreeType::Int,
        ParseTreeType::AllBitmask,
        ParseTreeType::AnyBitmask,
        ParseTreeType::Set,
        ParseTreeType::InvertedSet,
        ParseTreeType::Any,
        ParseTreeType::CaseSensitiveString,
        ParseTreeType::CaseInsensitiveString,
        ParseTreeType::Range,
        ParseTreeType::Sequence,
        ParseTreeType::Alternatives,
        ParseTreeType::ZeroToMany,
        ParseTreeType::OneToMany,
        ParseTreeType::Optional,
        ParseTreeType::Repeat,
        ParseTreeType::RepeatMinToMany,
    ];

    /// The stable, globally unique id of this kind.
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            ParseTreeType::Byte => 1,
            ParseTreeType::Int => 2,
            ParseTreeType::AllBitmask => 3,
            ParseTreeType::AnyBitmask => 4,
            ParseTreeType::Set => 5,
            ParseTreeType::InvertedSet => 6,
            ParseTreeType::Any => 7,
            ParseTreeType::CaseSensitiveString => 8,
            ParseTreeType::CaseInsensitiveString => 9,
            ParseTreeType::Range => 10,
            ParseTreeType::Sequence => 11,
            ParseTreeType::Alternatives => 12,
            ParseTreeType::ZeroToMany => 13,
            ParseTreeType::OneToMany => 14,
            ParseTreeType::Optional => 15,
            ParseTreeType::Repeat => 16,
            ParseTreeType::RepeatMinToMany => 17,
            ParseTreeType::Custom(kind) => kind.id,
        }
    }

    /// A human-readable description of this kind.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            ParseTreeType::Byte => "A single byte value",
            ParseTreeType::Int => "An integer value",
            ParseTreeType::AllBitmask => "All bits in a bitmask must match",
            ParseTreeType::AnyBitmask => "Any bits in a bitmask can match",
            ParseTreeType::Set => "A set of byte values",
            ParseTreeType::InvertedSet => "An inverted set of byte values",
            ParseTreeType::Any => "Any byte value",
            ParseTreeType::CaseSensitiveString => "A case sensitive string",
            ParseTreeType::CaseInsensitiveString => "A case insensitive string",
            ParseTreeType::Range => "An inclusive range of byte values",
            ParseTreeType::Sequence => "A sequence of nodes",
            ParseTreeType::Alternatives => "A set of alternative nodes",
            ParseTreeType::ZeroToMany => "Zero to many repeats of a node",
            ParseTreeType::OneToMany => "One to many repeats of a node",
            ParseTreeType::Optional => "An optional node",
            ParseTreeType::Repeat => "A repeated node",
            ParseTreeType::RepeatMinToMany => "A minimum number of repeats of a node",
            ParseTreeType::Custom(kind) => kind.description,
        }
    }

    /// Registers a new node kind with the given id.
    ///
    /// Registration is meant to happen once, before any compilation starts.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already taken by a built-in or previously
    /// registered kind. Duplicate ids are a programming error.
    pub fn register(id: u32, description: &'static str) -> ParseTreeType {
        let existing = {
            let mut registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
            match registry.get(&id) {
                Some(&existing) => Some(existing),
                None => {
                    registry.insert(id, description);
                    None
                }
            }
        };

        if let Some(existing) = existing {
            panic!(
                "cannot register parse tree type {id} ({description}): \
                 id {id} is already registered as '{existing}'"
            );
        }

        tracing::debug!(id, description, "registered parse tree type");
        ParseTreeType::Custom(CustomKind { id, description })
    }

    /// Looks up a registered kind by id.
    #[must_use]
    pub fn from_id(id: u32) -> Option<ParseTreeType> {
        if let Some(kind) = Self::BUILTIN.iter().find(|kind| kind.id() == id) {
            return Some(*kind);
        }
        let registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
        registry
            .get(&id)
            .map(|&description| ParseTreeType::Custom(CustomKind { id, description }))
    }
}

impl fmt::Display for ParseTreeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id(), self.description())
    }
}

static REGISTRY: LazyLock<Mutex<HashMap<u32, &'static str>>> = LazyLock::new(|| {
    Mutex::new(
        ParseTreeType::BUILTIN
            .iter()
            .map(|kind| (kind.id(), kind.description()))
            .collect(),
    )
});
