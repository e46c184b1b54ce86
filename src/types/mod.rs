//! Static inference of the data shape a template needs.
//!
//! Every tag is turned into a small [`TypeTree`] fragment ([`builder`]), the
//! fragments are folded together in document order ([`merge()`]), one
//! [`finalize()`] pass settles optional/required and sequence/plain duplicates,
//! and the result is printed as a TypeScript interface ([`printer`]).

mod builder;
mod merge;
mod printer;

use std::collections::BTreeSet;

use indexmap::IndexMap;

pub use builder::{build_chain, build_variable, infer};
pub use merge::{finalize, merge};
pub use printer::{DeclarationOptions, print};

/// What an unconstrained leaf expands to when printed.
pub const DEFAULT_TYPES: [&str; 3] = ["string", "boolean", "number"];

/// Fields in the order they were first seen.
///
/// Equality ignores that order, which is what makes [`merge()`] commutative.
pub type TypeTree = IndexMap<FieldKey, TypeNode>;

/// A field name plus the two markers a key can carry.
///
/// `?name` and `name` are distinct keys until [`finalize()`] folds them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldKey {
    pub name: String,
    /// Not guaranteed to be present.
    pub optional: bool,
    /// The value is a sequence of the node's type.
    pub array: bool,
}

impl FieldKey {
    pub fn required<T: Into<String>>(name: T) -> Self {
        Self {
            name: name.into(),
            optional: false,
            array: false,
        }
    }

    pub fn optional<T: Into<String>>(name: T) -> Self {
        Self {
            optional: true,
            ..Self::required(name)
        }
    }

    #[must_use]
    pub const fn with_array(mut self, array: bool) -> Self {
        self.array = array;
        self
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.optional {
            write!(f, "?")?;
        }
        write!(f, "{}", self.name)?;
        if self.array {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Leaf {
    /// No declared constraint: any primitive will do.
    #[default]
    Default,
    /// Never empty; an empty set collapses to [`Leaf::Default`].
    Alternatives(BTreeSet<String>),
}

impl Leaf {
    pub fn of<I, S>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = alternatives.into_iter().map(Into::into).collect();
        if set.is_empty() {
            Self::Default
        } else {
            Self::Alternatives(set)
        }
    }

    /// The leaf sections and inverted sections contribute.
    pub fn boolean() -> Self {
        Self::of(["boolean"])
    }

    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    pub fn is_boolean(&self) -> bool {
        match self {
            Self::Default => false,
            Self::Alternatives(set) => set.len() == 1 && set.contains("boolean"),
        }
    }

    /// The type names this leaf prints as.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Default => DEFAULT_TYPES.to_vec(),
            Self::Alternatives(set) => set.iter().map(String::as_str).collect(),
        }
    }
}

impl std::fmt::Display for Leaf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.names().join(" | "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Leaf(Leaf),
    Object(TypeTree),
}

impl Default for TypeNode {
    fn default() -> Self {
        Self::Leaf(Leaf::Default)
    }
}

impl TypeNode {
    /// Short form used in conflict messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Leaf(leaf) => leaf.to_string(),
            Self::Object(fields) => {
                let names: Vec<String> = fields.keys().map(ToString::to_string).collect();
                format!("{{ {} }}", names.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ntest::timeout(100)]
    fn test_field_key_display() {
        assert_eq!(FieldKey::required("name").to_string(), "name");
        assert_eq!(FieldKey::optional("tags").with_array(true).to_string(), "?tags[]");
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_leaf_of_deduplicates_and_collapses() {
        assert_eq!(Leaf::of(Vec::<String>::new()), Leaf::Default);
        assert_eq!(Leaf::of(["number", "string", "number"]).to_string(), "number | string");
        assert_eq!(Leaf::Default.to_string(), "string | boolean | number");
        assert!(Leaf::boolean().is_boolean());
        assert!(!Leaf::of(["boolean", "string"]).is_boolean());
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_tree_equality_ignores_order() {
        let mut a = TypeTree::new();
        a.insert(FieldKey::required("x"), TypeNode::default());
        a.insert(FieldKey::required("y"), TypeNode::Leaf(Leaf::boolean()));
        let mut b = TypeTree::new();
        b.insert(FieldKey::required("y"), TypeNode::Leaf(Leaf::boolean()));
        b.insert(FieldKey::required("x"), TypeNode::default());
        assert_eq!(a, b);
        assert_eq!(TypeNode::Object(a).describe(), "{ x, y }");
    }
}
