//! Row visibility: a module shows only while every ancestor has View

use crate::map::PermissionMap;
use crate::tree::{Module, ModuleTree};

/// Whether a module's row is rendered.
///
/// Roots are always visible. Any other module needs View on every ancestor,
/// not just its parent. Unknown ids are never visible. Hidden modules keep
/// their grants in the map.
pub fn is_visible(tree: &ModuleTree, map: &PermissionMap, module_id: &str) -> bool {
    if !tree.contains(module_id) {
        return false;
    }
    let mut cur = tree.parent_id(module_id);
    while let Some(p) = cur {
        if !map.get(p).view() {
            return false;
        }
        cur = tree.parent_id(p);
    }
    true
}

/// Visible modules in pre-order; a hidden module prunes its whole subtree
pub fn visible_modules(tree: &ModuleTree, map: &PermissionMap) -> Vec<&'static Module> {
    fn walk(nodes: &'static [Module], map: &PermissionMap, out: &mut Vec<&'static Module>) {
        for m in nodes {
            out.push(m);
            if map.get(m.id).view() {
                walk(m.children, map, out);
            }
        }
    }
    let mut r = Vec::new();
    walk(tree.roots(), map, &mut r);
    r
}
