//! Document tree nodes

use indexmap::IndexMap;

use crate::datetime::Datetime;
use crate::error::{Error, ErrorKind, Result};
use crate::value::Value;

/// Role of a node in the document tree.
///
/// Branch kinds mark intermediate segments of a dotted path; leaf kinds mark
/// the terminal segment and decide what the node may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    /// Intermediate segment of a dotted key (`j` in `j.k = v`)
    KeyBranch,
    /// Terminal segment of a key-value pair; holds exactly one value
    KeyLeaf,
    /// Key-value whose value was an inline table; holds the folded sub-table
    /// in `children` and no value
    InlineTableLeaf,
    /// Intermediate segment of a table header (`a` in `[a.b]`)
    TableBranch,
    /// Terminal segment of a table header (`b` in `[a.b]`)
    TableLeaf,
    /// Terminal segment of an array-table header (`t` in `[[t]]`)
    ArrayTable,
}

impl KeyKind {
    /// Leaf kinds terminate a dotted path
    pub const fn is_leaf(self) -> bool {
        matches!(
            self,
            Self::KeyLeaf | Self::InlineTableLeaf | Self::TableLeaf | Self::ArrayTable
        )
    }
}

/// A node of the document tree.
///
/// `id` is the key segment, not the full dotted path. `children` preserves
/// insertion order. A `KeyLeaf` holds the value; an `InlineTableLeaf` holds
/// children instead; an `ArrayTable` holds its elements as a list of
/// anonymous table nodes and never populates `children` directly.
#[derive(Clone, Debug, PartialEq)]
pub struct Key {
    pub(crate) kind: KeyKind,
    pub(crate) id: String,
    pub(crate) children: IndexMap<String, Key>,
    pub(crate) value: Option<Value>,
    pub(crate) elements: Vec<Key>,
}

impl Key {
    pub fn new(kind: KeyKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            children: IndexMap::new(),
            value: None,
            elements: Vec::new(),
        }
    }

    /// The document root
    pub fn root() -> Self {
        Self::new(KeyKind::TableBranch, "root")
    }

    pub const fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Child lookup by segment; `None` is the "not found" sentinel
    pub fn get(&self, segment: &str) -> Option<&Key> {
        self.children.get(segment)
    }

    /// Child lookup that reports the miss
    pub fn require(&self, segment: &str) -> Result<&Key> {
        self.get(segment).ok_or_else(|| {
            Error::bare(ErrorKind::KeyNotFound {
                key: segment.to_string(),
            })
        })
    }

    pub fn children(&self) -> impl Iterator<Item = &Key> {
        self.children.values()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Elements of an array-table; empty for every other kind
    pub fn elements(&self) -> &[Key] {
        &self.elements
    }

    // Typed views over the attached value; `None` is the
    // "not this type" sentinel and also covers valueless nodes.

    pub fn as_integer(&self) -> Option<i64> {
        self.value.as_ref().and_then(Value::as_integer)
    }

    pub fn as_float(&self) -> Option<f64> {
        self.value.as_ref().and_then(Value::as_float)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.value.as_ref().and_then(Value::as_bool)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value.as_ref().and_then(Value::as_str)
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        self.value.as_ref().and_then(Value::as_array)
    }

    /// Any of the four datetime shapes as one view
    pub fn as_datetime(&self) -> Option<Datetime<'_>> {
        self.value.as_ref().and_then(Value::as_datetime)
    }

    /// True for any of the four datetime shapes
    pub fn is_datetime(&self) -> bool {
        self.value.as_ref().is_some_and(Value::is_datetime)
    }

    // Fallible counterparts of the typed views; a miss or a value of
    // another type is reported as a cast error instead of `None`.

    pub fn expect_integer(&self) -> Result<i64> {
        self.as_integer().ok_or_else(|| cast_error("integer"))
    }

    pub fn expect_float(&self) -> Result<f64> {
        self.as_float().ok_or_else(|| cast_error("float"))
    }

    pub fn expect_bool(&self) -> Result<bool> {
        self.as_bool().ok_or_else(|| cast_error("bool"))
    }

    pub fn expect_str(&self) -> Result<&str> {
        self.as_str().ok_or_else(|| cast_error("string"))
    }

    pub fn expect_array(&self) -> Result<&[Value]> {
        self.as_array().ok_or_else(|| cast_error("array"))
    }

    pub fn expect_datetime(&self) -> Result<Datetime<'_>> {
        self.as_datetime().ok_or_else(|| cast_error("datetime"))
    }
}

fn cast_error(expected: &'static str) -> Error {
    Error::bare(ErrorKind::Cast { expected })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert!(KeyKind::KeyLeaf.is_leaf());
        assert!(KeyKind::TableLeaf.is_leaf());
        assert!(KeyKind::ArrayTable.is_leaf());
        assert!(KeyKind::InlineTableLeaf.is_leaf());
        assert!(!KeyKind::KeyBranch.is_leaf());
        assert!(!KeyKind::TableBranch.is_leaf());
    }

    #[test]
    fn test_child_lookup() {
        let mut parent = Key::root();
        parent
            .children
            .insert("a".to_string(), Key::new(KeyKind::KeyLeaf, "a"));
        assert!(parent.get("a").is_some());
        assert!(parent.get("b").is_none());
        assert!(parent.require("a").is_ok());
        let err = parent.require("b").unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::KeyNotFound {
                key: "b".to_string()
            }
        );
    }

    #[test]
    fn test_typed_accessors_on_valueless_node() {
        let key = Key::root();
        assert_eq!(key.as_integer(), None);
        assert_eq!(key.as_str(), None);
        assert_eq!(key.as_bool(), None);
        assert_eq!(key.as_float(), None);
        assert!(key.as_array().is_none());
        assert!(!key.is_datetime());
    }

    #[test]
    fn test_typed_accessors() {
        let mut key = Key::new(KeyKind::KeyLeaf, "k");
        key.value = Some(Value::Integer(9));
        assert_eq!(key.as_integer(), Some(9));
        assert_eq!(key.as_str(), None);
        assert!(key.as_datetime().is_none());
    }

    #[test]
    fn test_expect_accessors_report_cast() {
        let mut key = Key::new(KeyKind::KeyLeaf, "k");
        key.value = Some(Value::Integer(9));
        assert_eq!(key.expect_integer().unwrap(), 9);

        let err = key.expect_str().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Cast { expected: "string" });
        let err = key.expect_datetime().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Cast { expected: "datetime" });

        // valueless nodes miss the same way
        let branch = Key::root();
        assert!(branch.expect_bool().is_err());
        assert!(branch.expect_array().is_err());
        assert!(branch.expect_float().is_err());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut parent = Key::root();
        for id in ["zebra", "alpha", "mid"] {
            parent
                .children
                .insert(id.to_string(), Key::new(KeyKind::KeyLeaf, id));
        }
        let ids: Vec<&str> = parent.children().map(Key::id).collect();
        assert_eq!(ids, vec!["zebra", "alpha", "mid"]);
    }
}
