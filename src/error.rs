//! Error types for experience forms.
//!
//! The crate uses a hierarchical error system:
//! - `FormsError` is the top-level error returned by all public APIs
//! - Specific error types (`ValidationError`, `ApiError`, `NotFoundError`) provide detail
//!
//! Field-level problems found while a user fills a form are *not* errors in
//! this sense: they live in [`FieldErrors`](crate::FieldErrors) on the owning
//! form instance and never cross its boundary.
//!
//! # Error Handling Pattern
//! ```rust,ignore
//! use expforms::{FormCollection, ExperienceCategory, Result};
//!
//! async fn example(api: &dyn ExperienceApi, notifier: &dyn Notifier) -> Result<()> {
//!     let forms = FormCollection::new();
//!     forms.add(ExperienceCategory::Project).await?;
//!     forms.submit_all(api, notifier).await?;
//!     Ok(())
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::experience::{ExperienceCategory, Field, FieldErrors};
use crate::types::FormInstanceId;

/// Result type alias for experience form operations.
pub type Result<T> = std::result::Result<T, FormsError>;

/// Top-level error enum for all experience form operations.
///
/// This is the only error type returned by public APIs.
/// Use pattern matching to handle specific error cases.
#[derive(Debug, Error)]
pub enum FormsError {
    /// Input validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error (unknown category tag, invalid [`Config`](crate::Config)).
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of what's wrong with the configuration.
        reason: String,
    },

    /// A wire record could not be mapped into form data.
    #[error("Transform error: {0}")]
    Transform(String),

    /// The network collaborator rejected a request.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// One or more forms in a batch failed validation.
    ///
    /// No network call was made; the listed forms carry their field errors.
    #[error("Batch validation failed for {} form(s)", failures.len())]
    BatchValidation {
        /// Every failing form, in insertion order.
        failures: Vec<FormFailure>,
    },

    /// A batch submission is already running for this collection.
    #[error("A submission is already in flight")]
    SubmitInFlight,

    /// The form is in disabled (read-only) mode.
    #[error("Form is disabled")]
    FormDisabled,

    /// A field change targeted a field the form's category does not have.
    #[error("Field '{field}' does not apply to {category} experiences")]
    FieldNotApplicable {
        /// The rejected field.
        field: Field,
        /// Category of the form that rejected it.
        category: ExperienceCategory,
    },

    /// Requested entity not found.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),
}

impl FormsError {
    /// Creates a configuration error with the given reason.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Creates a transform error with the given message.
    pub fn transform(msg: impl Into<String>) -> Self {
        Self::Transform(msg.into())
    }

    /// Returns true if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if this is a validation error (single record or batch).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::BatchValidation { .. })
    }

    /// Returns true if this is an API error.
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    /// Returns true if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Returns the failing forms of a batch validation error.
    pub fn batch_failures(&self) -> Option<&[FormFailure]> {
        match self {
            Self::BatchValidation { failures } => Some(failures),
            _ => None,
        }
    }
}

/// One form that failed validation during a batch submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormFailure {
    /// Id of the failing form.
    pub id: FormInstanceId,
    /// Category of the failing form.
    pub category: ExperienceCategory,
}

impl fmt::Display for FormFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Form {} ({}) validation failed", self.id, self.category)
    }
}

/// Validation errors for input data.
///
/// These errors indicate problems with data provided by the caller.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A field has an invalid value.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// Name of the invalid field.
        field: String,
        /// Why the value is invalid.
        reason: String,
    },

    /// Too many items in a collection field.
    #[error("Too many items in '{field}': {count} (max: {max})")]
    TooManyItems {
        /// Name of the field.
        field: String,
        /// Actual count.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// A whole record failed its category schema.
    #[error("{} field(s) failed validation", .0.len())]
    Fields(FieldErrors),
}

impl ValidationError {
    /// Creates an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a too many items error.
    pub fn too_many_items(field: impl Into<String>, count: usize, max: usize) -> Self {
        Self::TooManyItems {
            field: field.into(),
            count,
            max,
        }
    }
}

/// Structured error reported by the network collaborator.
///
/// Mirrors the JSON error body `{ "message": ..., "statusCode": ... }`.
/// A `status_code` of `0` means the request never reached the server.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message} (status {status_code})")]
pub struct ApiError {
    /// Human-readable message from the server or transport.
    pub message: String,
    /// HTTP status code, `0` for transport failures.
    pub status_code: u16,
}

impl ApiError {
    /// Fallback message when the server sends none.
    pub const DEFAULT_MESSAGE: &'static str = "An error occurred";

    /// Message used for requests that never got a response.
    pub const NETWORK_MESSAGE: &'static str = "Network error - please check your connection";

    /// Creates an API error.
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
        }
    }

    /// Builds an error from a response status and optional server message.
    ///
    /// An empty or missing message falls back to [`Self::DEFAULT_MESSAGE`].
    pub fn from_status(status_code: u16, message: Option<&str>) -> Self {
        let message = match message {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => Self::DEFAULT_MESSAGE.to_string(),
        };
        Self {
            message,
            status_code,
        }
    }

    /// Creates the error for a request that received no response.
    pub fn network() -> Self {
        Self::new(Self::NETWORK_MESSAGE, 0)
    }

    /// Returns true if the credentials were rejected (401).
    pub fn is_unauthorized(&self) -> bool {
        self.status_code == 401
    }

    /// Returns true if the request never reached the server.
    pub fn is_network(&self) -> bool {
        self.status_code == 0
    }
}

/// Not found errors for specific entity types.
#[derive(Debug, Error)]
pub enum NotFoundError {
    /// Form instance with given ID is not in the collection.
    #[error("Form not found: {0}")]
    Form(String),

    /// Persisted experience with given ID not found.
    #[error("Experience not found: {0}")]
    Experience(String),
}

impl NotFoundError {
    /// Creates a form not found error.
    pub fn form(id: impl ToString) -> Self {
        Self::Form(id.to_string())
    }

    /// Creates an experience not found error.
    pub fn experience(id: impl ToString) -> Self {
        Self::Experience(id.to_string())
    }
}
