//! # expforms
//!
//! Headless core of an experience-profile editor: dynamic, heterogeneous
//! experience forms with per-category validation and all-or-nothing batch
//! submission.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use expforms::prelude::*;
//!
//! // Pending forms for the "new experiences" page
//! let forms = FormCollection::new();
//!
//! // Add a project form and fill it in
//! let id = forms.add(ExperienceCategory::Project).await?;
//! forms.apply(id, FieldChange::Title("Portfolio Site".into())).await?;
//! forms.apply(id, FieldChange::Description(
//!     "Built a personal portfolio using modern tooling.".into(),
//! )).await?;
//! forms.apply(id, FieldChange::Skills(vec!["react".into()])).await?;
//!
//! // Validate everything and create it in one request
//! forms.submit_all(&api, &TracingNotifier).await?;
//!
//! // Show what is stored, grouped by category
//! let board = ExperienceBoard::load(&api, &Config::default()).await?;
//! ```
//!
//! ## Key Concepts
//!
//! ### Experience
//!
//! An **experience** is one entry of a profile. It belongs to exactly one
//! [`ExperienceCategory`]: professional (title, company, location, dates),
//! academic (title, institution, dates) or project (title only). Every
//! category has a description and 1–20 skills with optional per-skill text.
//!
//! ### Form instance
//!
//! A [`FormInstance`] holds the raw field state of one experience. Widgets
//! push [`FieldChange`] events into it; validation turns the state into a
//! typed [`ExperienceFormData`] or records per-field errors.
//!
//! ### Collection
//!
//! A [`FormCollection`] owns any number of pending forms and submits them
//! together: if one form is invalid, nothing is sent.
//!
//! ### Wire format
//!
//! The [`transform`] module maps form payloads to outbound [`Experience`]
//! records and listed [`ExperienceResponse`] records back to form payloads.
//! Network transport is supplied by the application through [`ExperienceApi`].
//!
//! ## Thread Safety
//!
//! `FormCollection` is `Send + Sync` and can be shared across tasks using
//! `Arc`. Only one batch submit runs at a time per collection.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// Module declarations
// ============================================================================

mod config;
mod error;
mod types;

pub mod api;
pub mod schema;
pub mod skills;
pub mod transform;

// Domain modules
mod board;
mod collection;
mod editable;
mod experience;
mod form;
mod notify;

// ============================================================================
// Public API re-exports
// ============================================================================

// Configuration
pub use config::{Config, MAX_LIST_RETRIES};

// Error handling
pub use error::{ApiError, FormFailure, FormsError, NotFoundError, Result, ValidationError};

// Core types
pub use types::{FormInstanceId, RecordId};

// Domain types
pub use experience::{
    validate_experience, AcademicFormData, Experience, ExperienceCategory, ExperienceFormData,
    ExperienceResponse, Field, FieldErrors, FormValues, ProfessionalFormData, ProjectFormData,
    Topic,
};

// Forms
pub use form::{ExperienceForm, FieldChange, FormInstance, FormStatus, SkillDetail};

// Controllers
pub use board::ExperienceBoard;
pub use collection::{
    FormCollection, FormEntry, SubmitOutcome, SUBMIT_ERROR_TITLE, SUBMIT_SUCCESS_TITLE,
};
pub use editable::{
    EditableExperience, SaveOutcome, SAVE_ERROR_TITLE, SAVE_INVALID_TITLE, SAVE_SUCCESS_TITLE,
};

// Collaborators
pub use api::{ApiResponse, BatchRequest, ExperienceApi};
pub use notify::{Notifier, TracingNotifier};

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Convenient imports for common usage.
///
/// ```rust
/// use expforms::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::ExperienceApi;
    pub use crate::board::ExperienceBoard;
    pub use crate::collection::{FormCollection, SubmitOutcome};
    pub use crate::config::Config;
    pub use crate::editable::{EditableExperience, SaveOutcome};
    pub use crate::error::{FormsError, Result};
    pub use crate::experience::{ExperienceCategory, ExperienceFormData, Field, FormValues};
    pub use crate::form::{ExperienceForm, FieldChange, FormInstance};
    pub use crate::notify::{Notifier, TracingNotifier};
    pub use crate::types::{FormInstanceId, RecordId};
}
