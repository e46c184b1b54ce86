use super::{FieldKey, Leaf, TypeNode, TypeTree, finalize, merge};
use crate::{
    ast::{AstNode, Path, Scope, VarType},
    error::TypeConflict,
};

/// Segments such as `0` or `12` address sequence elements, not fields.
fn looks_like_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Wraps `node` in one single-field object per segment of `segments`.
///
/// Only the innermost key carries the `optional` and `array` markers.
pub fn build_chain(
    segments: &[&str],
    optional: bool,
    array: bool,
    node: TypeNode,
) -> Result<TypeTree, TypeConflict> {
    if let Some(segment) = segments.iter().find(|s| looks_like_index(s)) {
        return Err(TypeConflict::NonKey {
            path: segments.join("."),
            segment: (*segment).to_string(),
        });
    }

    let Some((last, parents)) = segments.split_last() else {
        return Ok(TypeTree::new());
    };

    let mut tree = TypeTree::new();
    let innermost = FieldKey {
        name: (*last).to_string(),
        optional,
        array,
    };
    tree.insert(innermost, node);

    for parent in parents.iter().rev() {
        let mut outer = TypeTree::new();
        outer.insert(FieldKey::required(*parent), TypeNode::Object(tree));
        tree = outer;
    }
    Ok(tree)
}

/// The fragment a single variable tag contributes, relative to its own scope.
pub fn build_variable(
    name: &Path<'_>,
    var_type: Option<&VarType<'_>>,
) -> Result<TypeTree, TypeConflict> {
    let (leaf, optional) = match var_type {
        Some(ty) => (Leaf::of(ty.alternatives.iter().copied()), ty.optional),
        None => (Leaf::Default, false),
    };
    build_chain(name.segments(), optional, false, TypeNode::Leaf(leaf))
}

/// What a run of sibling nodes requires, split by where its paths start.
#[derive(Debug, Default)]
struct Requirements {
    /// Relative to the innermost enclosing section, or the root at top level.
    local: TypeTree,
    /// Relative to the root, from `@` variables at any depth.
    global: TypeTree,
    /// A `{{.}}` appeared directly in this run.
    implicit: bool,
}

impl Requirements {
    fn add_local(&mut self, fragment: TypeTree) -> Result<(), TypeConflict> {
        self.local = merge(std::mem::take(&mut self.local), fragment)?;
        Ok(())
    }

    fn add_global(&mut self, fragment: TypeTree) -> Result<(), TypeConflict> {
        self.global = merge(std::mem::take(&mut self.global), fragment)?;
        Ok(())
    }
}

fn collect(nodes: &[AstNode<'_>]) -> Result<Requirements, TypeConflict> {
    let mut requirements = Requirements::default();
    for node in nodes {
        match node {
            AstNode::Text { .. } | AstNode::Comment { .. } | AstNode::Partial { .. } => {}
            AstNode::ImplicitVariable { .. } => requirements.implicit = true,
            AstNode::Variable {
                name,
                triple: _,
                var_type,
                scope,
            } => {
                let fragment = build_variable(name, var_type.as_ref())?;
                log::trace!("variable {} ({:?}) -> {:?}", name, scope, fragment);
                match scope {
                    Scope::Local => requirements.add_local(fragment)?,
                    Scope::Global => requirements.add_global(fragment)?,
                }
            }
            AstNode::Section {
                name,
                content,
                var_type,
            } => {
                let inner = collect(content)?;
                requirements.add_global(inner.global)?;

                // `{{.}}` makes the section a sequence; any fields read
                // alongside it describe the elements.
                let (node, array) = match (inner.implicit, inner.local.is_empty()) {
                    (false, true) => (TypeNode::Leaf(Leaf::boolean()), false),
                    (false, false) => (TypeNode::Object(inner.local), false),
                    (true, true) => (TypeNode::Leaf(Leaf::Default), true),
                    (true, false) => (TypeNode::Object(inner.local), true),
                };
                // The subtree is complete here, so marking the key optional
                // can't leak into the nested fields.
                let optional = var_type.is_some_and(|ty| ty.optional);
                let fragment = build_chain(name.segments(), optional, array, node)?;
                log::trace!("section {} -> {:?}", name, fragment);
                requirements.add_local(fragment)?;
            }
            AstNode::InvertedSection { name, content: _ } => {
                let fragment =
                    build_chain(name.segments(), false, false, TypeNode::Leaf(Leaf::boolean()))?;
                requirements.add_local(fragment)?;
            }
        }
    }
    Ok(requirements)
}

/// Infers the finalized data shape `nodes` require, without rendering anything.
pub fn infer(nodes: &[AstNode<'_>]) -> Result<TypeTree, TypeConflict> {
    let requirements = collect(nodes)?;
    let tree = merge(requirements.local, requirements.global)?;
    let tree = finalize(tree).inspect_err(|conflict| log::debug!("{}", conflict))?;
    Ok(tree)
}
