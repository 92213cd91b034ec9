//! Render model for the permission matrix table

use serde::Serialize;

use crate::grant::Grant;
use crate::map::PermissionMap;
use crate::tree::ModuleTree;
use crate::visibility::visible_modules;

/// State of a row's Download checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadCell {
    /// The module has no download support; the cell never reacts
    Inert,
    /// Supported, but View is off
    Disabled,
    Enabled,
}

/// One rendered row of the matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRow {
    pub id: &'static str,
    pub label: &'static str,
    pub depth: usize,
    pub grant: Grant,
    pub full: bool,
    pub has_children: bool,
    pub download: DownloadCell,
    /// The module or something below it supports Download
    pub subtree_download: bool,
}

/// Rows for every visible module, in pre-order
pub fn rows(tree: &ModuleTree, map: &PermissionMap) -> Vec<MatrixRow> {
    visible_modules(tree, map)
        .into_iter()
        .map(|m| {
            let grant = map.get(m.id);
            let download = match (m.supports_download, grant.view()) {
                (false, _) => DownloadCell::Inert,
                (true, false) => DownloadCell::Disabled,
                (true, true) => DownloadCell::Enabled,
            };
            MatrixRow {
                id: m.id,
                label: m.label,
                depth: tree.depth(m.id),
                grant,
                full: grant.is_full(m.supports_download),
                has_children: !m.is_leaf(),
                download,
                subtree_download: tree.supports_download_transitively(m),
            }
        })
        .collect()
}
