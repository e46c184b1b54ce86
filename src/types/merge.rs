use super::{FieldKey, Leaf, TypeNode, TypeTree};
use crate::error::TypeConflict;

fn join_path(path: &[String]) -> String {
    path.join(".")
}

/// Folds `right` into `left`.
///
/// Commutative and associative up to field order. Keys only in one side pass
/// through untouched; keys in both are merged recursively. A conflict is raised
/// the first time two incompatible nodes meet.
pub fn merge(left: TypeTree, right: TypeTree) -> Result<TypeTree, TypeConflict> {
    merge_at(&mut Vec::new(), left, right)
}

fn merge_at(
    path: &mut Vec<String>,
    mut left: TypeTree,
    right: TypeTree,
) -> Result<TypeTree, TypeConflict> {
    for (key, node) in right {
        match left.get_mut(&key) {
            Some(existing) => {
                path.push(key.to_string());
                let merged = merge_nodes(path, std::mem::take(existing), node)?;
                *existing = merged;
                path.pop();
            }
            None => {
                left.insert(key, node);
            }
        }
    }
    Ok(left)
}

/// `path` must already name the field both nodes belong to.
fn merge_nodes(
    path: &mut Vec<String>,
    left: TypeNode,
    right: TypeNode,
) -> Result<TypeNode, TypeConflict> {
    match (left, right) {
        (TypeNode::Leaf(Leaf::Default), other) | (other, TypeNode::Leaf(Leaf::Default)) => {
            Ok(other)
        }
        (TypeNode::Leaf(Leaf::Alternatives(a)), TypeNode::Leaf(Leaf::Alternatives(b))) => {
            // The union is only accepted when it adds nothing to either side.
            if a == b {
                Ok(TypeNode::Leaf(Leaf::Alternatives(a)))
            } else {
                Err(TypeConflict::Scalar {
                    path: join_path(path),
                    left: Leaf::Alternatives(a).to_string(),
                    right: Leaf::Alternatives(b).to_string(),
                })
            }
        }
        (TypeNode::Object(a), TypeNode::Object(b)) => Ok(TypeNode::Object(merge_at(path, a, b)?)),
        (left @ TypeNode::Object(_), right @ TypeNode::Leaf(_))
        | (left @ TypeNode::Leaf(_), right @ TypeNode::Object(_)) => Err(TypeConflict::Shape {
            path: join_path(path),
            left: left.describe(),
            right: right.describe(),
        }),
    }
}

/// Settles keys that share a name, level by level.
///
/// `?name` next to `name` is folded into `name`: a required use anywhere wins.
/// `name[]` next to a plain `name` keeps the sequence. A truthiness use (a
/// `boolean` or unconstrained leaf) adds nothing, an object use becomes the
/// element type, and a concrete scalar use is a conflict.
pub fn finalize(tree: TypeTree) -> Result<TypeTree, TypeConflict> {
    finalize_at(&mut Vec::new(), tree)
}

fn finalize_at(path: &mut Vec<String>, tree: TypeTree) -> Result<TypeTree, TypeConflict> {
    let mut fields: Vec<(FieldKey, TypeNode)> = Vec::with_capacity(tree.len());
    for (key, node) in tree {
        match fields.iter_mut().find(|(k, _)| k.name == key.name) {
            Some(slot) => {
                path.push(key.name.clone());
                let (prev_key, prev_node) = std::mem::take(slot);
                *slot = combine(path, (prev_key, prev_node), (key, node))?;
                path.pop();
            }
            None => fields.push((key, node)),
        }
    }

    // Merging above can pair up nested keys, so descend only once a level is settled.
    let mut settled = TypeTree::with_capacity(fields.len());
    for (key, node) in fields {
        let node = match node {
            TypeNode::Object(inner) => {
                path.push(key.name.clone());
                let inner = finalize_at(path, inner)?;
                path.pop();
                TypeNode::Object(inner)
            }
            leaf @ TypeNode::Leaf(_) => leaf,
        };
        settled.insert(key, node);
    }
    Ok(settled)
}

fn combine(
    path: &mut Vec<String>,
    left: (FieldKey, TypeNode),
    right: (FieldKey, TypeNode),
) -> Result<(FieldKey, TypeNode), TypeConflict> {
    let optional = left.0.optional && right.0.optional;

    if left.0.array == right.0.array {
        let node = merge_nodes(path, left.1, right.1)?;
        return Ok((
            FieldKey {
                optional,
                ..left.0
            },
            node,
        ));
    }

    let (sequence, plain) = if left.0.array {
        (left, right)
    } else {
        (right, left)
    };
    let key = FieldKey {
        optional,
        ..sequence.0
    };
    match plain.1 {
        TypeNode::Leaf(leaf) if leaf.is_default() || leaf.is_boolean() => Ok((key, sequence.1)),
        // Fields read through the name describe the elements.
        TypeNode::Object(fields) => {
            let node = merge_nodes(path, sequence.1, TypeNode::Object(fields))?;
            Ok((key, node))
        }
        other => Err(TypeConflict::Shape {
            path: join_path(path),
            left: format!("({})[]", sequence.1.describe()),
            right: other.describe(),
        }),
    }
}
