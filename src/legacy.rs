//! Normalization of stored permission maps
//!
//! Groups saved by older clients carry different per-module shapes:
//! - current: `{isView, isCreate, isEdit, isDelete, isDownload}`
//! - legacy:  `{full, view, create, edit, delete}` (optionally `download`)
//! - flag:    `{isActive}` or a bare boolean, meaning View only
//!
//! Keys from different shapes may be mixed within one entry; any truthy key
//! grants its field.

use serde_json::{Map, Value};
use tracing::warn;

use crate::constants::VIEW;
use crate::error::{PermatrixError, Result};
use crate::grant::{Field, Grant};
use crate::map::PermissionMap;
use crate::tree::ModuleTree;

/// Decode a stored permissions value into a consistent `PermissionMap`.
///
/// The result is closed under the chain and carries Download only on
/// modules that support it. Ids unknown to the tree are kept as decoded.
pub fn normalize_permissions(tree: &ModuleTree, value: &Value) -> Result<PermissionMap> {
    let entries = match value {
        Value::Null => return Ok(PermissionMap::new()),
        Value::Object(o) => o,
        other => {
            return Err(PermatrixError::Decode(format!(
                "expected an object of module permissions, got {}",
                kind(other)
            )))
        }
    };

    let mut map = PermissionMap::new();
    for (id, raw) in entries {
        let module = tree.find_module(id);
        if module.is_none() {
            warn!(module = %id, "stored permission for unknown module kept as is");
        }
        let supports_download = module.map(|m| m.supports_download).unwrap_or(true);
        let mut grant = match raw {
            Value::Object(o) => decode_entry(o, supports_download),
            Value::Bool(true) => Grant::from_bits(VIEW),
            Value::Bool(false) | Value::Null => Grant::EMPTY,
            other => {
                warn!(module = %id, kind = kind(other), "unreadable permission entry");
                Grant::EMPTY
            }
        }
        .closed();
        if grant.download() && !supports_download {
            grant = grant.toggled(Field::Download, false);
        }
        map.set(id.clone(), grant);
    }
    Ok(map)
}

fn decode_entry(o: &Map<String, Value>, supports_download: bool) -> Grant {
    let mut mask = 0u8;
    for (key, v) in o.iter().filter(|(_, v)| truthy(v)) {
        match key.as_str() {
            "full" => mask |= Grant::full(supports_download).bits(),
            "isActive" => mask |= VIEW,
            // `isView` and `view` both name the View field
            _ => {
                if let Ok(field) = key.strip_prefix("is").unwrap_or(key).parse::<Field>() {
                    mask |= field.bit();
                }
            }
        }
    }
    Grant::from_bits(mask)
}

/// Older records store flags as 0/1 or "true"/"false" as well as booleans
fn truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => s.eq_ignore_ascii_case("true") || s == "1",
        _ => false,
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
