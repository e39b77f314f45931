//! Document assembly: attach rules for the key tree
//!
//! TOML's redefinition rules live here. An attach under an existing sibling
//! is either accepted (possibly reusing or promoting the node), or rejected
//! as a duplicate key. Attaches under an array-table land in its current
//! last element; the array-table node's own child map stays empty.

use indexmap::map::Entry;

use crate::error::{Error, ErrorKind, Pos, Result};
use crate::key::{Key, KeyKind};
use crate::limits::Limits;
use crate::value::Value;

/// Redefinition compatibility of a new node against an existing sibling.
///
/// Reject cells also cover extending a header-defined table through dotted
/// keys and re-opening a table defined through dotted keys with a header.
pub(crate) const fn compatible(existing: KeyKind, current: KeyKind) -> bool {
    use KeyKind::{ArrayTable, KeyBranch, TableBranch, TableLeaf};
    matches!(
        (existing, current),
        (KeyBranch, KeyBranch | TableBranch)
            | (TableBranch, TableBranch | TableLeaf)
            | (TableLeaf, TableBranch)
            | (ArrayTable, TableBranch | ArrayTable)
    )
}

/// Attach `child` under `parent`, returning the node that now represents
/// the child's segment.
///
/// An existing compatible sibling is reused; a `TableLeaf` arriving over a
/// `TableBranch` promotes it, which can happen at most once since
/// `TableLeaf` over `TableLeaf` is a reject cell. An `ArrayTable` parent
/// delegates to its last element.
pub(crate) fn attach<'a>(
    parent: &'a mut Key,
    child: Key,
    limits: &Limits,
    pos: Pos,
) -> Result<&'a mut Key> {
    if parent.kind == KeyKind::ArrayTable {
        let last = parent.elements.last_mut().ok_or_else(|| {
            Error::with_message(ErrorKind::Unknown, pos, "array table without elements")
        })?;
        return attach(last, child, limits, pos);
    }
    if !parent.children.contains_key(&child.id) && parent.children.len() >= limits.max_subkeys {
        return Err(Error::new(
            ErrorKind::BufferOverflow {
                max: limits.max_subkeys,
            },
            pos,
        ));
    }
    match parent.children.entry(child.id.clone()) {
        Entry::Occupied(entry) => {
            let existing = entry.into_mut();
            if !compatible(existing.kind, child.kind) {
                return Err(Error::new(
                    ErrorKind::DuplicateKey { key: child.id },
                    pos,
                ));
            }
            if child.kind == KeyKind::TableLeaf && existing.kind == KeyKind::TableBranch {
                existing.kind = KeyKind::TableLeaf;
            }
            Ok(existing)
        }
        Entry::Vacant(entry) => Ok(entry.insert(child)),
    }
}

/// Start a new element of an array-table (`[[path]]` seen again or first)
pub(crate) fn push_element(table: &mut Key, limits: &Limits, pos: Pos) -> Result<()> {
    if table.elements.len() >= limits.max_array_length {
        return Err(Error::new(
            ErrorKind::BufferOverflow {
                max: limits.max_array_length,
            },
            pos,
        ));
    }
    table.elements.push(Key::new(KeyKind::TableBranch, ""));
    Ok(())
}

/// Attach a dotted path under `parent`: every segment but the last gets the
/// branch kind, the last gets the leaf kind. Returns the terminal node.
pub(crate) fn attach_path<'a>(
    parent: &'a mut Key,
    segments: &[String],
    branch: KeyKind,
    leaf: KeyKind,
    limits: &Limits,
    pos: Pos,
) -> Result<&'a mut Key> {
    let (last, branches) = segments
        .split_last()
        .ok_or_else(|| Error::with_message(ErrorKind::Unknown, pos, "empty key path"))?;
    let mut node = parent;
    for segment in branches {
        node = attach(node, Key::new(branch, segment.clone()), limits, pos)?;
    }
    attach(node, Key::new(leaf, last.clone()), limits, pos)
}

/// Install a parsed value on a freshly created leaf.
///
/// An inline table folds into the leaf: its children move over and the kind
/// becomes `InlineTableLeaf`, the only leaf kind that owns children.
pub(crate) fn install_value(leaf: &mut Key, value: Value) {
    match value {
        Value::InlineTable(table) => {
            leaf.kind = KeyKind::InlineTableLeaf;
            leaf.children = table.children;
        }
        other => leaf.value = Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> Limits {
        Limits::default()
    }

    fn pos() -> Pos {
        Pos::default()
    }

    #[test]
    fn test_compatibility_accept_cells() {
        use KeyKind::*;
        assert!(compatible(KeyBranch, KeyBranch));
        assert!(compatible(KeyBranch, TableBranch));
        assert!(compatible(TableBranch, TableBranch));
        assert!(compatible(TableBranch, TableLeaf));
        assert!(compatible(TableLeaf, TableBranch));
        assert!(compatible(ArrayTable, TableBranch));
        assert!(compatible(ArrayTable, ArrayTable));
    }

    #[test]
    fn test_compatibility_reject_cells() {
        use KeyKind::*;
        for current in [KeyBranch, KeyLeaf, TableBranch, TableLeaf, ArrayTable] {
            assert!(!compatible(KeyLeaf, current));
            assert!(!compatible(InlineTableLeaf, current));
        }
        assert!(!compatible(TableLeaf, TableLeaf));
        assert!(!compatible(TableLeaf, KeyBranch));
        assert!(!compatible(TableBranch, KeyBranch));
        assert!(!compatible(TableBranch, ArrayTable));
        assert!(!compatible(ArrayTable, TableLeaf));
        assert!(!compatible(KeyBranch, KeyLeaf));
        assert!(!compatible(KeyBranch, ArrayTable));
    }

    #[test]
    fn test_attach_fresh_child() {
        let mut root = Key::root();
        let node = attach(&mut root, Key::new(KeyKind::KeyLeaf, "a"), &limits(), pos()).unwrap();
        assert_eq!(node.id(), "a");
        assert_eq!(root.child_count(), 1);
    }

    #[test]
    fn test_attach_rejects_key_leaf_redefinition() {
        let mut root = Key::root();
        attach(&mut root, Key::new(KeyKind::KeyLeaf, "a"), &limits(), pos()).unwrap();
        let err = attach(&mut root, Key::new(KeyKind::KeyLeaf, "a"), &limits(), pos()).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::DuplicateKey {
                key: "a".to_string()
            }
        );
    }

    #[test]
    fn test_promote_happens_at_most_once() {
        let mut root = Key::root();
        // [a.b] creates a as a branch, then [a] promotes it
        attach(&mut root, Key::new(KeyKind::TableBranch, "a"), &limits(), pos()).unwrap();
        let promoted =
            attach(&mut root, Key::new(KeyKind::TableLeaf, "a"), &limits(), pos()).unwrap();
        assert_eq!(promoted.kind(), KeyKind::TableLeaf);
        // a second [a] is a redefinition
        assert!(attach(&mut root, Key::new(KeyKind::TableLeaf, "a"), &limits(), pos()).is_err());
    }

    #[test]
    fn test_array_table_delegates_to_last_element() {
        let mut root = Key::root();
        let table = attach(&mut root, Key::new(KeyKind::ArrayTable, "t"), &limits(), pos()).unwrap();
        push_element(table, &limits(), pos()).unwrap();
        attach(table, Key::new(KeyKind::KeyLeaf, "x"), &limits(), pos()).unwrap();
        push_element(table, &limits(), pos()).unwrap();
        attach(table, Key::new(KeyKind::KeyLeaf, "x"), &limits(), pos()).unwrap();

        let table = root.get("t").unwrap();
        assert_eq!(table.elements().len(), 2);
        assert_eq!(table.child_count(), 0);
        assert!(table.elements()[0].get("x").is_some());
        assert!(table.elements()[1].get("x").is_some());
    }

    #[test]
    fn test_subkey_limit() {
        let limits = Limits::new().with_max_subkeys(2);
        let mut root = Key::root();
        for id in ["a", "b"] {
            attach(&mut root, Key::new(KeyKind::KeyLeaf, id), &limits, pos()).unwrap();
        }
        let err = attach(&mut root, Key::new(KeyKind::KeyLeaf, "c"), &limits, pos()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::BufferOverflow { .. }));
    }

    #[test]
    fn test_inline_table_fold() {
        let mut scratch = Key::new(KeyKind::TableBranch, "");
        attach(&mut scratch, Key::new(KeyKind::KeyLeaf, "x"), &limits(), pos())
            .map(|leaf| leaf.value = Some(Value::Integer(1)))
            .unwrap();

        let mut leaf = Key::new(KeyKind::KeyLeaf, "point");
        install_value(&mut leaf, Value::InlineTable(Box::new(scratch)));
        assert_eq!(leaf.kind(), KeyKind::InlineTableLeaf);
        assert!(leaf.value().is_none());
        assert_eq!(leaf.get("x").and_then(Key::as_integer), Some(1));
    }
}
