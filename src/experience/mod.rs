//! Experience data model and validation.
//!
//! An **experience** is one entry of a user's profile: a professional role,
//! an academic program, or a project. This module holds the category enum,
//! the typed form payloads, the raw form state, the wire records, and the
//! schema validation that turns raw state into typed payloads.
//!
//! # Constraints
//!
//! - `isCurrent` and `endDate` are mutually exclusive
//! - dates may not lie after the validation day
//! - 1–20 unique skills; unknown skill ids are allowed
//! - descriptions are 10–500 characters
//!
//! Bounds and messages live in [`crate::schema`].

pub mod types;
pub mod validation;

pub use types::{
    AcademicFormData, Experience, ExperienceCategory, ExperienceFormData, ExperienceResponse,
    Field, FormValues, ProfessionalFormData, ProjectFormData, Topic,
};
pub use validation::{validate_experience, FieldErrors};

pub(crate) use validation::validate_form_values;
