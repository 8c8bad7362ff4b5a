//! Collection shape of a field.

use std::fmt;

/// Container shape wrapping a field's leaf values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Exactly one value
    Single,
    /// Ordered list, duplicates allowed
    Sequence,
    /// Unordered, deduplicated
    Set,
}

impl CollectionKind {
    /// Returns `true` for sequence and set, which travel as JSON arrays.
    pub fn is_collection(&self) -> bool {
        !matches!(self, CollectionKind::Single)
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollectionKind::Single => "single",
            CollectionKind::Sequence => "sequence",
            CollectionKind::Set => "set",
        };
        f.write_str(name)
    }
}
