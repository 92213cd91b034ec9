//! Permatrix - Permission matrix engine for HR group editing
//!
//! A fixed module tree, a per-group map of five grants per module
//! (View, Create, Edit, Delete, Download), and the rules that keep the two
//! consistent while an administrator ticks checkboxes:
//!
//! - checking a field checks every lower field of the chain, unchecking one
//!   clears every higher field, and a toggle reaches the whole subtree
//! - a row is shown only while every ancestor has View
//! - stored maps in older shapes are normalized on load
//!
//! ```
//! use permatrix::{apply_toggle, is_visible, Field, ModuleTree, PermissionMap};
//!
//! let tree = ModuleTree::hr();
//! let map = apply_toggle(tree, &PermissionMap::new(), "employees", Field::Edit, true).unwrap();
//! assert!(map.get("employeeDocuments").create());
//! assert!(is_visible(tree, &map, "employeeDocuments"));
//! ```

pub mod api;
pub mod cascade;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod grant;
pub mod group;
pub mod legacy;
pub mod map;
pub mod matrix;
#[cfg(feature = "server")]
pub mod server;
pub mod tree;
pub mod visibility;

// Re-exports
pub use api::GroupApi;
#[cfg(feature = "client")]
pub use api::HttpGroupApi;
pub use cascade::{apply_full, apply_toggle, is_all_full_checked, is_full, select_all_full};
pub use config::ClientConfig;
pub use constants::*;
pub use editor::GroupEditor;
pub use error::{PermatrixError, Result};
pub use grant::{Field, Grant};
pub use group::{authorize_edit, Actor, Group, GroupPayload, GroupSummary, GroupUpdate};
pub use legacy::normalize_permissions;
pub use map::PermissionMap;
pub use matrix::{rows, DownloadCell, MatrixRow};
pub use tree::{Module, ModuleTree, HR_MODULES};
pub use visibility::{is_visible, visible_modules};
