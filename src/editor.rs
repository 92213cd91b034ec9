//! Group edit session
//!
//! Owns one group's permission map between a load and a save. Toggles run
//! synchronously through the cascade engine; only load and save touch the
//! backend, one request each, with no retry.

use tracing::{info, warn};

use crate::api::GroupApi;
use crate::cascade;
use crate::error::{PermatrixError, Result};
use crate::grant::Field;
use crate::group::{authorize_edit, Actor, Group, GroupUpdate};
use crate::map::PermissionMap;
use crate::matrix::{self, MatrixRow};
use crate::tree::ModuleTree;
use crate::visibility;

pub struct GroupEditor<'t, A: GroupApi> {
    api: A,
    tree: &'t ModuleTree,
    group: Group,
    /// Last loaded or saved state, for dirty tracking
    saved: Group,
}

impl<'t, A: GroupApi> GroupEditor<'t, A> {
    /// Fetch the group and normalize its stored permissions
    pub async fn load(api: A, tree: &'t ModuleTree, group_id: &str) -> Result<Self> {
        let load_err = |e: PermatrixError| PermatrixError::Load {
            group_id: group_id.to_string(),
            source: Box::new(e),
        };
        let payload = api.fetch_group(group_id).await.map_err(load_err)?;
        let group = payload.into_group(tree, group_id).map_err(load_err)?;
        info!(group = %group.id, modules = group.permissions.len(), "loaded group");
        Ok(GroupEditor { api, tree, saved: group.clone(), group })
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn permissions(&self) -> &PermissionMap {
        &self.group.permissions
    }

    pub fn tree(&self) -> &ModuleTree {
        self.tree
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Unsaved changes since the last load or successful save
    pub fn is_dirty(&self) -> bool {
        self.group != self.saved
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.group.name = name.into();
    }

    pub fn toggle(&mut self, module_id: &str, field: Field, value: bool) -> Result<()> {
        self.group.permissions =
            cascade::apply_toggle(self.tree, &self.group.permissions, module_id, field, value)?;
        Ok(())
    }

    pub fn toggle_full(&mut self, module_id: &str, value: bool) -> Result<()> {
        self.group.permissions =
            cascade::apply_full(self.tree, &self.group.permissions, module_id, value)?;
        Ok(())
    }

    /// The header "select all" checkbox. Entries for ids the tree doesn't
    /// know are carried over untouched so the next save keeps them.
    pub fn set_all_full(&mut self, value: bool) {
        let mut next = cascade::select_all_full(self.tree, value);
        for (id, grant) in self.group.permissions.iter() {
            if !self.tree.contains(id) {
                next.set(id, grant);
            }
        }
        self.group.permissions = next;
    }

    pub fn is_all_full_checked(&self) -> bool {
        cascade::is_all_full_checked(self.tree, &self.group.permissions)
    }

    pub fn is_visible(&self, module_id: &str) -> bool {
        visibility::is_visible(self.tree, &self.group.permissions, module_id)
    }

    pub fn rows(&self) -> Vec<MatrixRow> {
        matrix::rows(self.tree, &self.group.permissions)
    }

    /// Send the whole map to the backend.
    ///
    /// System groups are refused locally for non-admins before anything is
    /// sent. On failure the in-memory map is left as it was so the user can
    /// retry.
    pub async fn save(&mut self, actor: &Actor) -> Result<&Group> {
        authorize_edit(&self.group, actor).inspect_err(|e| warn!(%e, "save refused"))?;

        let update = GroupUpdate { name: &self.group.name, permissions: &self.group.permissions };
        let result = match self.api.update_group(&self.group.id, &update).await {
            Ok(payload) => payload.into_group(self.tree, &self.group.id),
            Err(e) => Err(e),
        };
        match result {
            Ok(updated) => {
                info!(group = %updated.id, actor = %actor.id, "saved group");
                self.saved = updated.clone();
                self.group = updated;
                Ok(&self.group)
            }
            Err(e) => {
                warn!(group = %self.group.id, %e, "save failed, edits kept");
                Err(PermatrixError::Save {
                    group_id: self.group.id.clone(),
                    source: Box::new(e),
                })
            }
        }
    }
}
