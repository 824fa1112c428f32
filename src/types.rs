//! Core identifier types.
//!
//! Form instances are identified locally with UUID v7 ids; persisted
//! experiences carry whatever id the server assigned.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Form instance identifier (UUID v7 for time-ordering).
///
/// Generated by the collection when a form is added. UUID v7 combines a
/// millisecond timestamp with random bits, so two forms added in the same
/// millisecond still get distinct ids.
///
/// # Example
/// ```
/// use expforms::FormInstanceId;
///
/// let a = FormInstanceId::new();
/// let b = FormInstanceId::new();
/// assert_ne!(a, b);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FormInstanceId(pub Uuid);

impl FormInstanceId {
    /// Creates a new FormInstanceId with a UUID v7 (time-ordered).
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a nil (all zeros) FormInstanceId.
    /// Useful for testing or sentinel values.
    #[inline]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns the raw UUID bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for FormInstanceId {
    /// Returns a nil (all zeros) FormInstanceId.
    ///
    /// For a new unique ID, use [`FormInstanceId::new()`].
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Display for FormInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-assigned identifier of a persisted experience.
///
/// Opaque to this crate: it is only echoed back to the API on update.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Creates a new RecordId.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
