use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform-assigned identifier of one input field in a form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// What the platform detected a field to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Username,
    Email,
    Password,
    Totp,
    Other,
}

impl FieldType {
    /// Position of the first field of this type, if any.
    pub(crate) fn first_in(self, types: &[FieldType]) -> Option<usize> {
        types.iter().position(|t| *t == self)
    }
}
