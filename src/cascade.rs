//! Cascade engine
//!
//! Pure functions from (tree, map, toggle) to the next map. Nothing here
//! performs I/O or mutates its input.

use tracing::{debug, error};

use crate::error::Result;
use crate::grant::{Field, Grant};
use crate::map::PermissionMap;
use crate::tree::{Module, ModuleTree};

/// Resolve the toggle target, logging unknown ids as defects
fn target(tree: &ModuleTree, module_id: &str) -> Result<&'static Module> {
    tree.require(module_id).inspect_err(|e| error!(%e, "toggle on unknown module"))
}

/// Apply one checkbox toggle to a module and its whole subtree.
///
/// Every module in the subtree receives the same single-module cascade rule
/// (see [`Grant::toggled`]). Download toggles skip modules that don't
/// support Download, the origin included.
pub fn apply_toggle(
    tree: &ModuleTree,
    map: &PermissionMap,
    module_id: &str,
    field: Field,
    value: bool,
) -> Result<PermissionMap> {
    let module = target(tree, module_id)?;
    let mut next = map.clone();
    let mut touched = 0usize;
    for m in tree.subtree(module) {
        if field == Field::Download && !m.supports_download {
            continue;
        }
        let g = next.entry(m.id);
        *g = g.toggled(field, value);
        touched += 1;
    }
    debug!(module = module_id, %field, value, touched, "applied toggle");
    Ok(next)
}

/// Apply the row "Full" checkbox to a module and its subtree.
///
/// Checking grants every chain field plus Download where supported;
/// unchecking clears all five.
pub fn apply_full(
    tree: &ModuleTree,
    map: &PermissionMap,
    module_id: &str,
    value: bool,
) -> Result<PermissionMap> {
    let module = target(tree, module_id)?;
    let mut next = map.clone();
    for m in tree.subtree(module) {
        let g = if value { Grant::full(m.supports_download) } else { Grant::EMPTY };
        next.set(m.id, g);
    }
    debug!(module = module_id, value, "applied full toggle");
    Ok(next)
}

/// Whether a module's row reads as fully granted
pub fn is_full(tree: &ModuleTree, map: &PermissionMap, module_id: &str) -> Result<bool> {
    let m = tree.require(module_id)?;
    Ok(map.get(m.id).is_full(m.supports_download))
}

/// Replace the whole map: every module fully granted, or every module
/// cleared.
///
/// The result only holds ids of the tree. Callers that keep entries for
/// unknown modules (see `normalize_permissions`) must merge them back, as
/// `GroupEditor::set_all_full` does.
pub fn select_all_full(tree: &ModuleTree, value: bool) -> PermissionMap {
    tree.flatten()
        .into_iter()
        .map(|m| {
            let g = if value { Grant::full(m.supports_download) } else { Grant::EMPTY };
            (m.id, g)
        })
        .collect()
}

/// True iff every module holds the full chain, plus Download where the
/// module supports it. An empty tree has nothing to check and reads false.
pub fn is_all_full_checked(tree: &ModuleTree, map: &PermissionMap) -> bool {
    !tree.is_empty()
        && tree
            .flatten()
            .into_iter()
            .all(|m| map.get(m.id).is_full(m.supports_download))
}
