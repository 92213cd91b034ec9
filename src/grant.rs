//! Per-module grants and the single-module cascade rule
//!
//! A grant is a bitmask over five fields. View, Create, Edit and Delete form
//! a chain where each field implies the ones below it; Download sits beside
//! the chain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ALL, CHAIN, CREATE, DELETE, DOWNLOAD, EDIT, VIEW};
use crate::error::PermatrixError;

/// One column of the permission matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    View,
    Create,
    Edit,
    Delete,
    Download,
}

impl Field {
    /// All fields, chain first
    pub const ALL: [Field; 5] = [
        Field::View,
        Field::Create,
        Field::Edit,
        Field::Delete,
        Field::Download,
    ];

    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Field::View => VIEW,
            Field::Create => CREATE,
            Field::Edit => EDIT,
            Field::Delete => DELETE,
            Field::Download => DOWNLOAD,
        }
    }

    /// True for the fields of the view < create < edit < delete chain
    #[inline]
    pub const fn in_chain(self) -> bool {
        !matches!(self, Field::Download)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Field::View => "view",
            Field::Create => "create",
            Field::Edit => "edit",
            Field::Delete => "delete",
            Field::Download => "download",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = PermatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PermatrixError::Decode(format!("unknown permission field: {s}")))
    }
}

/// The five grants of one module, packed into a bitmask.
///
/// Serialized in the backend's shape:
/// `{"isView":_, "isCreate":_, "isEdit":_, "isDelete":_, "isDownload":_}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "GrantRepr", into = "GrantRepr")]
pub struct Grant(u8);

impl Grant {
    pub const EMPTY: Grant = Grant(0);

    /// Build from a raw mask; bits outside the five fields are dropped
    #[inline]
    pub const fn from_bits(mask: u8) -> Self {
        Grant(mask & ALL)
    }

    /// Every chain field, plus Download when the module supports it
    #[inline]
    pub const fn full(supports_download: bool) -> Self {
        if supports_download {
            Grant(ALL)
        } else {
            Grant(CHAIN)
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn get(self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    #[inline]
    pub const fn view(self) -> bool {
        self.get(Field::View)
    }

    #[inline]
    pub const fn create(self) -> bool {
        self.get(Field::Create)
    }

    #[inline]
    pub const fn edit(self) -> bool {
        self.get(Field::Edit)
    }

    #[inline]
    pub const fn delete(self) -> bool {
        self.get(Field::Delete)
    }

    #[inline]
    pub const fn download(self) -> bool {
        self.get(Field::Download)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether the row's "Full" checkbox reads as checked
    #[inline]
    pub const fn is_full(self, supports_download: bool) -> bool {
        let want = Grant::full(supports_download).0;
        self.0 & want == want
    }

    /// Apply the single-module cascade rule.
    ///
    /// Checking a chain field also checks every field below it; unchecking
    /// one also clears every field above it. Download only ever touches
    /// itself, in both directions.
    #[must_use]
    pub const fn toggled(self, field: Field, value: bool) -> Self {
        let bit = field.bit();
        let mask = match (field.in_chain(), value) {
            // bit - 1 is exactly the chain fields below `field`
            (true, true) => self.0 | bit | (bit - 1),
            (true, false) => self.0 & ((bit - 1) | DOWNLOAD),
            (false, true) => self.0 | DOWNLOAD,
            (false, false) => self.0 & !DOWNLOAD,
        };
        Grant(mask)
    }

    /// Close the grant under the chain: a stored higher field implies the
    /// lower ones.
    #[must_use]
    pub const fn closed(self) -> Self {
        let mut mask = self.0;
        if mask & DELETE != 0 {
            mask |= EDIT;
        }
        if mask & EDIT != 0 {
            mask |= CREATE;
        }
        if mask & CREATE != 0 {
            mask |= VIEW;
        }
        Grant(mask)
    }

    /// True when the chain invariants `create => view`, `edit => create`
    /// and `delete => edit` hold
    pub const fn is_consistent(self) -> bool {
        self.closed().0 == self.0
    }
}

/// Wire shape of a grant
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GrantRepr {
    is_view: bool,
    is_create: bool,
    is_edit: bool,
    is_delete: bool,
    is_download: bool,
}

impl From<GrantRepr> for Grant {
    fn from(r: GrantRepr) -> Self {
        let mut mask = 0;
        if r.is_view {
            mask |= VIEW;
        }
        if r.is_create {
            mask |= CREATE;
        }
        if r.is_edit {
            mask |= EDIT;
        }
        if r.is_delete {
            mask |= DELETE;
        }
        if r.is_download {
            mask |= DOWNLOAD;
        }
        Grant(mask)
    }
}

impl From<Grant> for GrantRepr {
    fn from(g: Grant) -> Self {
        GrantRepr {
            is_view: g.view(),
            is_create: g.create(),
            is_edit: g.edit(),
            is_delete: g.delete(),
            is_download: g.download(),
        }
    }
}
