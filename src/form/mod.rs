//! Experience form instances.
//!
//! A form instance binds one category's schema to mutable field state. UI
//! widgets read [`FormValues`] and [`FieldErrors`] from it and push
//! [`FieldChange`] events into it; controllers only ever talk to it through
//! the [`ExperienceForm`] capability trait.
//!
//! # State machine
//!
//! ```text
//!             apply                validate (fail)
//! Pristine ─────────▶ Editing ─────────────────────▶ ValidationFailed
//!                       ▲  │                              │
//!                       │  │ validate (ok)          apply │
//!                 apply │  ▼                              │
//!                  ValidatedReady ◀───────────────────────┘ (via Editing)
//!
//! set_disabled(true) from any state ──▶ Disabled
//! ```

mod instance;

pub use instance::{FormInstance, SkillDetail};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::experience::{ExperienceCategory, ExperienceFormData, Field, FieldErrors, FormValues};

/// One user edit, as emitted by a widget.
///
/// `Company` and `Institution` both write the organization field; which one
/// a form accepts depends on its category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldChange {
    /// New title text.
    Title(String),
    /// New company text (professional).
    Company(String),
    /// New institution text (academic).
    Institution(String),
    /// New location text (professional).
    Location(String),
    /// Start date picked or cleared.
    StartDate(Option<NaiveDate>),
    /// End date picked or cleared. Picking one clears the current flag.
    EndDate(Option<NaiveDate>),
    /// Current flag toggled. Setting it clears the end date.
    IsCurrent(bool),
    /// New description text.
    Description(String),
    /// New skill selection, in selection order.
    Skills(Vec<String>),
    /// Text typed into one skill's sub-form.
    SkillDescription {
        /// Skill id the text belongs to.
        skill: String,
        /// The text.
        text: String,
    },
}

impl FieldChange {
    /// Returns the field this change writes.
    pub fn field(&self) -> Field {
        match self {
            Self::Title(_) => Field::Title,
            Self::Company(_) => Field::Company,
            Self::Institution(_) => Field::Institution,
            Self::Location(_) => Field::Location,
            Self::StartDate(_) => Field::StartDate,
            Self::EndDate(_) => Field::EndDate,
            Self::IsCurrent(_) => Field::IsCurrent,
            Self::Description(_) => Field::Description,
            Self::Skills(_) => Field::Skills,
            Self::SkillDescription { .. } => Field::SkillsDescription,
        }
    }
}

/// Lifecycle state of a form instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormStatus {
    /// No change since creation or the last reset.
    Pristine,
    /// Changed since the last validation.
    Editing,
    /// The last validation failed; field errors are set.
    ValidationFailed,
    /// The last validation passed and nothing changed since.
    ValidatedReady,
    /// Read-only: changes are rejected.
    Disabled,
}

/// Capability every experience form exposes to its controllers.
///
/// The collection and the editable wrapper hold forms as
/// `Box<dyn ExperienceForm>` and never look at the concrete type.
#[async_trait]
pub trait ExperienceForm: Send + Sync {
    /// Category of the form.
    fn category(&self) -> ExperienceCategory;

    /// Current raw field state.
    fn values(&self) -> &FormValues;

    /// Errors recorded by the last validation, minus fields edited since.
    fn errors(&self) -> &FieldErrors;

    /// Current lifecycle state.
    fn status(&self) -> FormStatus;

    /// Returns true if the form rejects changes.
    fn is_disabled(&self) -> bool {
        self.status() == FormStatus::Disabled
    }

    /// Applies one field change.
    ///
    /// # Errors
    ///
    /// - [`FormsError::FormDisabled`](crate::FormsError::FormDisabled) while disabled
    /// - [`FormsError::FieldNotApplicable`](crate::FormsError::FieldNotApplicable)
    ///   if the category has no such field
    fn apply(&mut self, change: FieldChange) -> Result<()>;

    /// Validates the current state against today's date.
    ///
    /// Returns the coerced payload, or `None` after recording field errors.
    async fn validate_and_get_values(&mut self) -> Option<ExperienceFormData>;

    /// Restores the initial values and clears errors.
    fn reset(&mut self);

    /// Enters or leaves read-only mode. Values are kept either way.
    fn set_disabled(&mut self, disabled: bool);
}
