//! Model builder, inheritance-expansion pass.
//!
//! For every type record, pulls in non-overridden members from every
//! ancestor reachable via `extends` and `implements`, transitively, and
//! merges them into the record's member maps.
//!
//! # Algorithm
//!
//! Depth-first over the ancestor graph, per traversal root:
//!
//! - Direct `extends` ancestors are visited before direct `implements`
//!   ancestors; within the whole traversal the first occurrence of a member
//!   name wins, so nearer ancestors shadow farther ones and `extends`
//!   shadows `implements` at equal depth.
//! - An ancestor name absent from the model is an external type and is
//!   skipped silently.
//! - A *seen* set deduplicates diamond revisits (the same ancestor reachable
//!   via two paths yields its members once).
//! - An *on-path* set detects cycles: a back-edge to a type on the current
//!   traversal path is a fatal [`ExpandError::CyclicInheritance`], never
//!   unbounded recursion.
//!
//! Methods and properties expand with one difference: `private` properties
//! never propagate. Constants are not expanded at all.
//!
//! All inherited sets are computed against the pristine model before any
//! record is mutated, then merged in one sweep; the pass is therefore
//! independent of iteration order and idempotent (running it again changes
//! nothing — every inheritable name is already present).

use std::collections::HashSet;

use indexmap::IndexMap;
use thiserror::Error;

use crate::model::{MethodRecord, Model, PropertyRecord, TypeRecord, Visibility};

// ============================================================================
// Error Types
// ============================================================================

/// Errors detected during inheritance expansion.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// The `extends`/`implements` graph contains a cycle.
    #[error("cyclic inheritance detected at '{type_name}'")]
    CyclicInheritance { type_name: String },
}

// ============================================================================
// Entry Point
// ============================================================================

/// Expand every record in the model in place.
///
/// On error the model is left untouched: inherited sets for all types are
/// collected before the first merge.
pub fn expand_model(model: &mut Model) -> Result<(), ExpandError> {
    let names = model.names();

    let mut pending = Vec::with_capacity(names.len());
    for name in &names {
        let methods = collect_inherited(model, name, methods_of, |_| true)?;
        let properties = collect_inherited(model, name, properties_of, |property| {
            property.visibility != Visibility::Private
        })?;
        pending.push((name, methods, properties));
    }

    for (name, methods, properties) in pending {
        if let Some(record) = model.get_mut(name) {
            for (member_name, member) in methods {
                record.methods.entry(member_name).or_insert(member);
            }
            for (member_name, member) in properties {
                record.properties.entry(member_name).or_insert(member);
            }
        }
    }

    Ok(())
}

// ============================================================================
// Ancestor Traversal
// ============================================================================

fn methods_of(record: &TypeRecord) -> &IndexMap<String, MethodRecord> {
    &record.methods
}

fn properties_of(record: &TypeRecord) -> &IndexMap<String, PropertyRecord> {
    &record.properties
}

/// Collect the members `root` inherits for one member category.
///
/// `member_map` projects the category's map out of a record; `keep` is the
/// category's visibility filter. The result contains only names not already
/// declared on `root`, in discovery order.
fn collect_inherited<T, F>(
    model: &Model,
    root: &str,
    member_map: fn(&TypeRecord) -> &IndexMap<String, T>,
    keep: F,
) -> Result<IndexMap<String, T>, ExpandError>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    let Some(record) = model.get(root) else {
        return Ok(IndexMap::new());
    };

    let mut inherited = IndexMap::new();
    let mut on_path = vec![root.to_string()];
    let mut seen = HashSet::new();
    visit_ancestors(
        model,
        record,
        member_map(record),
        member_map,
        &keep,
        &mut inherited,
        &mut on_path,
        &mut seen,
    )?;
    Ok(inherited)
}

#[allow(clippy::too_many_arguments)]
fn visit_ancestors<T, F>(
    model: &Model,
    record: &TypeRecord,
    own: &IndexMap<String, T>,
    member_map: fn(&TypeRecord) -> &IndexMap<String, T>,
    keep: &F,
    inherited: &mut IndexMap<String, T>,
    on_path: &mut Vec<String>,
    seen: &mut HashSet<String>,
) -> Result<(), ExpandError>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    for ancestor_name in record.extends.iter().chain(record.implements.iter()) {
        if on_path.iter().any(|name| name == ancestor_name) {
            return Err(ExpandError::CyclicInheritance {
                type_name: ancestor_name.clone(),
            });
        }
        // Diamond: the same ancestor reachable via a second path has already
        // yielded everything it can.
        if !seen.insert(ancestor_name.clone()) {
            continue;
        }
        // External/unknown ancestor: nothing to inherit.
        let Some(ancestor) = model.get(ancestor_name) else {
            continue;
        };

        for (member_name, member) in member_map(ancestor) {
            if own.contains_key(member_name)
                || inherited.contains_key(member_name)
                || !keep(member)
            {
                continue;
            }
            inherited.insert(member_name.clone(), member.clone());
        }

        on_path.push(ancestor_name.clone());
        visit_ancestors(
            model, ancestor, own, member_map, keep, inherited, on_path, seen,
        )?;
        on_path.pop();
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
