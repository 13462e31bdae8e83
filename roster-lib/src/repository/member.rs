use derive_more::{Deref, Display, From};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    sanitize::escape_html,
    validation::{ValidFields, is_valid_day, is_valid_month},
};

/// Opaque identifier of a [`Member`]. Assigned at creation, never changed and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Deref, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A registered member and their birthday.
///
/// This is also the persisted shape: an array of these objects is stored as JSON under a
/// single storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, CopyGetters)]
pub struct Member {
    #[getset(get = "pub")]
    pub(crate) id: MemberId,
    /// Trimmed and HTML-escaped
    #[getset(get = "pub")]
    pub(crate) name: String,
    #[getset(get_copy = "pub")]
    pub(crate) day: u8,
    #[getset(get_copy = "pub")]
    pub(crate) month: u8,
    /// Any other persisted fields. Kept as-is across updates.
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

impl Member {
    pub(crate) fn new(id: MemberId, fields: &ValidFields) -> Self {
        Self {
            id,
            name: escape_html(fields.name),
            day: fields.day,
            month: fields.month,
            extra: Map::new(),
        }
    }

    /// Replace the mutable fields, leaving `id` and any extra fields alone.
    pub(crate) fn apply(&mut self, fields: &ValidFields) {
        self.name = escape_html(fields.name);
        self.day = fields.day;
        self.month = fields.month;
    }

    /// Whether this record collides with the given (already escaped) name and birthday.
    /// Names compare case-insensitively.
    pub(crate) fn collides_with(&self, escaped_name: &str, day: u8, month: u8) -> bool {
        self.day == day
            && self.month == month
            && self.name.to_lowercase() == escaped_name.to_lowercase()
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        is_valid_day(self.day) && is_valid_month(self.month)
    }

    #[cfg(test)]
    pub(crate) fn mock(id: &str, name: &str, day: u8, month: u8) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            day,
            month,
            extra: Map::new(),
        }
    }
}
