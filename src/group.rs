//! Groups, their wire payloads and the edit authorization check

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PermatrixError, Result};
use crate::legacy::normalize_permissions;
use crate::map::PermissionMap;
use crate::tree::ModuleTree;

/// A user group with its normalized permissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    /// Edit-locked for everyone but administrators
    pub is_system_group: bool,
    pub permissions: PermissionMap,
}

/// Entry of the group list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_system_group: bool,
}

/// The user performing an edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl Actor {
    pub fn new(id: impl Into<String>, is_admin: bool) -> Self {
        Actor { id: id.into(), is_admin }
    }
}

/// Client-side check run before a save is sent. The backend re-validates.
pub fn authorize_edit(group: &Group, actor: &Actor) -> Result<()> {
    if group.is_system_group && !actor.is_admin {
        return Err(PermatrixError::AccessDenied(format!(
            "{} cannot edit system group {}",
            actor.id, group.name
        )));
    }
    Ok(())
}

/// Group as stored by the backend, permissions still in their stored shape
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPayload {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub is_system_group: bool,
    #[serde(default)]
    pub permissions: Value,
}

impl GroupPayload {
    /// Normalize into a `Group`. `fallback_id` is used when the payload
    /// doesn't echo its id.
    pub fn into_group(self, tree: &ModuleTree, fallback_id: &str) -> Result<Group> {
        let permissions = normalize_permissions(tree, &self.permissions)?;
        Ok(Group {
            id: self.id.unwrap_or_else(|| fallback_id.to_string()),
            name: self.name,
            is_system_group: self.is_system_group,
            permissions,
        })
    }
}

/// `GET`/`PATCH` response body: `{ "group": {...} }` or the bare group
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GroupResponse {
    Wrapped { group: GroupPayload },
    Bare(GroupPayload),
}

impl GroupResponse {
    pub fn into_payload(self) -> GroupPayload {
        match self {
            GroupResponse::Wrapped { group } | GroupResponse::Bare(group) => group,
        }
    }
}

/// List response body: `{ "groups": [...] }` or a bare array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GroupListResponse {
    Wrapped { groups: Vec<GroupSummary> },
    Bare(Vec<GroupSummary>),
}

impl GroupListResponse {
    pub fn into_groups(self) -> Vec<GroupSummary> {
        match self {
            GroupListResponse::Wrapped { groups } | GroupListResponse::Bare(groups) => groups,
        }
    }
}

/// `PATCH` body. The whole map is always sent.
#[derive(Debug, Clone, Serialize)]
pub struct GroupUpdate<'a> {
    pub name: &'a str,
    pub permissions: &'a PermissionMap,
}
