//! Module id → grant mapping for one group

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::grant::{Field, Grant};

/// Permissions of one group. Ids absent from the map read as empty grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMap(BTreeMap<String, Grant>);

impl PermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant for `id`, empty if absent
    #[inline]
    pub fn get(&self, id: &str) -> Grant {
        self.0.get(id).copied().unwrap_or_default()
    }

    #[inline]
    pub fn has(&self, id: &str, field: Field) -> bool {
        self.get(id).get(field)
    }

    /// Store a grant. Empty grants are kept so a saved map lists every
    /// module the user touched.
    pub fn set(&mut self, id: impl Into<String>, grant: Grant) {
        self.0.insert(id.into(), grant);
    }

    /// Mutable access, inserting an empty grant first if absent
    pub fn entry(&mut self, id: &str) -> &mut Grant {
        self.0.entry(id.to_string()).or_default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Grant)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Grant)> for PermissionMap {
    fn from_iter<I: IntoIterator<Item = (String, Grant)>>(iter: I) -> Self {
        PermissionMap(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, Grant)> for PermissionMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, Grant)>>(iter: I) -> Self {
        PermissionMap(iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}
