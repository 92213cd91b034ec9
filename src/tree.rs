//! Static module hierarchy
//!
//! Modules are declared as nested `const` data and never change at runtime.
//! `ModuleTree` wraps a root slice with a parent index so upward walks
//! don't have to search the whole tree.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

use crate::error::{PermatrixError, Result};

/// A node of the module tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: &'static str,
    pub label: &'static str,
    /// Download is only meaningful on modules that set this
    pub supports_download: bool,
    pub children: &'static [Module],
}

impl Module {
    pub const fn new(
        id: &'static str,
        label: &'static str,
        supports_download: bool,
        children: &'static [Module],
    ) -> Self {
        Module { id, label, supports_download, children }
    }

    #[inline]
    pub const fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A module hierarchy with a parent index
#[derive(Debug, Clone)]
pub struct ModuleTree {
    roots: &'static [Module],
    parents: HashMap<&'static str, Option<&'static str>>,
    len: usize,
}

impl ModuleTree {
    /// Build a tree, rejecting duplicate ids
    pub fn new(roots: &'static [Module]) -> Result<Self> {
        let mut parents = HashMap::new();
        let mut len = 0;
        let mut stack: Vec<(&'static Module, Option<&'static str>)> =
            roots.iter().rev().map(|m| (m, None)).collect();
        while let Some((m, parent)) = stack.pop() {
            if parents.insert(m.id, parent).is_some() {
                return Err(PermatrixError::DuplicateModule(m.id.to_string()));
            }
            len += 1;
            stack.extend(m.children.iter().rev().map(|c| (c, Some(m.id))));
        }
        Ok(ModuleTree { roots, parents, len })
    }

    /// The HR system's built-in module tree
    pub fn hr() -> &'static ModuleTree {
        static TREE: OnceLock<ModuleTree> = OnceLock::new();
        TREE.get_or_init(|| match ModuleTree::new(HR_MODULES) {
            Ok(t) => t,
            Err(e) => unreachable!("built-in module tree is invalid: {e}"),
        })
    }

    #[inline]
    pub fn roots(&self) -> &'static [Module] {
        self.roots
    }

    /// Number of modules in the tree
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.parents.contains_key(id)
    }

    /// Depth-first search for a module by id
    pub fn find_module(&self, id: &str) -> Option<&'static Module> {
        fn dfs(nodes: &'static [Module], id: &str) -> Option<&'static Module> {
            for m in nodes {
                if m.id == id {
                    return Some(m);
                }
                if let Some(found) = dfs(m.children, id) {
                    return Some(found);
                }
            }
            None
        }
        if !self.contains(id) {
            return None;
        }
        dfs(self.roots, id)
    }

    /// Like `find_module`, but an unknown id is an error
    pub fn require(&self, id: &str) -> Result<&'static Module> {
        self.find_module(id)
            .ok_or_else(|| PermatrixError::ModuleNotFound(id.to_string()))
    }

    /// Parent id of a module; `None` for roots and unknown ids
    pub fn parent_id(&self, id: &str) -> Option<&'static str> {
        self.parents.get(id).copied().flatten()
    }

    /// Ancestor ids from the immediate parent up to the root
    pub fn ancestors(&self, id: &str) -> Vec<&'static str> {
        let mut r = Vec::new();
        let mut cur = self.parent_id(id);
        while let Some(p) = cur {
            r.push(p);
            cur = self.parent_id(p);
        }
        r
    }

    /// Number of ancestors (roots are at depth 0)
    pub fn depth(&self, id: &str) -> usize {
        self.ancestors(id).len()
    }

    /// Every id below `module`, in pre-order. The module itself is excluded.
    pub fn all_descendant_ids(&self, module: &Module) -> Vec<&'static str> {
        let mut r = Vec::new();
        collect_ids(module.children, &mut r);
        r
    }

    /// Pre-order traversal of the whole tree
    pub fn flatten(&self) -> Vec<&'static Module> {
        let mut r = Vec::with_capacity(self.len);
        collect(self.roots, &mut r);
        r
    }

    /// Pre-order traversal of `module` and its subtree
    pub fn subtree(&self, module: &'static Module) -> Vec<&'static Module> {
        let mut r = vec![module];
        collect(module.children, &mut r);
        r
    }

    /// True if the module or any descendant supports Download
    pub fn supports_download_transitively(&self, module: &Module) -> bool {
        module.supports_download
            || module
                .children
                .iter()
                .any(|c| self.supports_download_transitively(c))
    }
}

fn collect(nodes: &'static [Module], out: &mut Vec<&'static Module>) {
    for m in nodes {
        out.push(m);
        collect(m.children, out);
    }
}

fn collect_ids(nodes: &'static [Module], out: &mut Vec<&'static str>) {
    for m in nodes {
        out.push(m.id);
        collect_ids(m.children, out);
    }
}

// ============================================================================
// Built-in HR module tree
// ============================================================================

pub static HR_MODULES: &[Module] = &[
    Module::new("dashboard", "Dashboard", false, &[
        Module::new("approvals", "Approvals", false, &[
            Module::new("loanApprovals", "Loans", false, &[]),
            Module::new("rewardApprovals", "Rewards", false, &[]),
            Module::new("fineApprovals", "Fines", false, &[]),
            Module::new("profileActivation", "Profile Activation", false, &[]),
            Module::new("notices", "Notices", false, &[]),
        ]),
    ]),
    Module::new("employees", "Employees", true, &[
        Module::new("employeeProfiles", "Profiles", true, &[]),
        Module::new("employeeDocuments", "Documents", true, &[]),
        Module::new("employeeLoans", "Loans", false, &[]),
        Module::new("employeeRewards", "Rewards", false, &[]),
        Module::new("employeeFines", "Fines", false, &[]),
    ]),
    Module::new("companies", "Companies", true, &[
        Module::new("companyProfiles", "Profiles", false, &[]),
        Module::new("companyDocuments", "Documents", true, &[]),
    ]),
    Module::new("documentExpiry", "Document Expiry", true, &[
        Module::new("employeeExpiry", "Employee Documents", true, &[]),
        Module::new("companyExpiry", "Company Documents", true, &[]),
    ]),
    Module::new("settings", "Settings", false, &[
        Module::new("users", "Users", false, &[]),
        Module::new("groups", "Groups", false, &[]),
    ]),
];
