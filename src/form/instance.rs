//! The schema-driven form instance.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use tracing::debug;

use super::{ExperienceForm, FieldChange, FormStatus};
use crate::error::{FormsError, Result};
use crate::experience::{
    validate_form_values, ExperienceCategory, ExperienceFormData, Field, FieldErrors, FormValues,
};
use crate::schema::{resolve, CategorySchema};
use crate::skills::skill_label;

/// One row of the expanded skill-details panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillDetail {
    /// Selected skill id.
    pub id: String,
    /// Catalog label, or the id when the skill is not in the catalog.
    pub label: String,
    /// Text entered so far (empty if none).
    pub text: String,
}

/// A single experience form bound to its category schema.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use expforms::{ExperienceCategory, ExperienceForm, FieldChange, FormInstance};
///
/// let mut form = FormInstance::new(ExperienceCategory::Project);
/// form.apply(FieldChange::Title("Portfolio Site".into())).unwrap();
/// form.apply(FieldChange::Description(
///     "Built a personal portfolio using modern tooling.".into(),
/// )).unwrap();
/// form.apply(FieldChange::Skills(vec!["react".into()])).unwrap();
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let data = form.validate_at(today).unwrap();
/// assert_eq!(data.title(), "Portfolio Site");
/// ```
#[derive(Clone, Debug)]
pub struct FormInstance {
    schema: &'static CategorySchema,
    initial: FormValues,
    values: FormValues,
    errors: FieldErrors,
    status: FormStatus,
    disabled: bool,
    skills_expanded: bool,
}

impl FormInstance {
    /// Creates an empty form for `category`, using the registry defaults.
    pub fn new(category: ExperienceCategory) -> Self {
        let entry = resolve(category);
        Self::build(entry.schema, entry.defaults)
    }

    /// Creates a form prefilled from a validated payload.
    ///
    /// The payload becomes the form's initial state, so `reset` returns to it.
    pub fn from_data(data: &ExperienceFormData) -> Self {
        Self::with_values(FormValues::from(data))
    }

    /// Creates a form with arbitrary initial values.
    pub fn with_values(values: FormValues) -> Self {
        let entry = resolve(values.category);
        Self::build(entry.schema, values)
    }

    fn build(schema: &'static CategorySchema, initial: FormValues) -> Self {
        Self {
            schema,
            values: initial.clone(),
            initial,
            errors: FieldErrors::new(),
            status: FormStatus::Pristine,
            disabled: false,
            skills_expanded: false,
        }
    }

    /// Returns the schema this form validates against.
    pub fn schema(&self) -> &'static CategorySchema {
        self.schema
    }

    /// Returns the values `reset` restores.
    pub fn initial_values(&self) -> &FormValues {
        &self.initial
    }

    /// Validates the current state, judging dates relative to `today`.
    ///
    /// On success the field errors are cleared and the coerced payload is
    /// returned. On failure every failing field is recorded and `None` is
    /// returned. The values themselves are never modified.
    pub fn validate_at(&mut self, today: NaiveDate) -> Option<ExperienceFormData> {
        match validate_form_values(self.schema, &self.values, today) {
            Ok(data) => {
                self.errors.clear();
                self.status = FormStatus::ValidatedReady;
                debug!(category = %self.schema.category, "form validated");
                Some(data)
            }
            Err(errors) => {
                debug!(
                    category = %self.schema.category,
                    failed_fields = errors.len(),
                    "form validation failed"
                );
                self.errors = errors;
                self.status = FormStatus::ValidationFailed;
                None
            }
        }
    }

    /// Makes `values` the new initial state and resets to it.
    ///
    /// Used after a successful save so that cancel returns to what the
    /// server holds.
    pub fn reset_to(&mut self, values: FormValues) {
        self.schema = resolve(values.category).schema;
        self.initial = values;
        self.reset();
    }

    /// Shows or hides the per-skill sub-forms.
    ///
    /// Hiding them keeps whatever text was entered.
    pub fn set_skills_expanded(&mut self, expanded: bool) {
        self.skills_expanded = expanded;
    }

    /// Returns true if the per-skill sub-forms are shown.
    pub fn skills_expanded(&self) -> bool {
        self.skills_expanded
    }

    /// Lists one entry per selected skill while the sub-forms are shown.
    ///
    /// Returns an empty list while collapsed.
    pub fn skill_details(&self) -> Vec<SkillDetail> {
        if !self.skills_expanded {
            return Vec::new();
        }
        self.values
            .skills
            .iter()
            .map(|id| SkillDetail {
                id: id.clone(),
                label: skill_label(id).to_string(),
                text: self
                    .values
                    .skills_description
                    .get(id)
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect()
    }

    fn write(&mut self, change: FieldChange) {
        let values = &mut self.values;
        match change {
            FieldChange::Title(text) => values.title = text,
            FieldChange::Company(text) | FieldChange::Institution(text) => {
                values.organization = text
            }
            FieldChange::Location(text) => values.location = text,
            FieldChange::StartDate(date) => values.start_date = date,
            FieldChange::EndDate(date) => {
                if date.is_some() {
                    values.is_current = false;
                }
                values.end_date = date;
            }
            FieldChange::IsCurrent(current) => {
                if current {
                    values.end_date = None;
                    self.errors.remove(Field::EndDate);
                }
                values.is_current = current;
            }
            FieldChange::Description(text) => values.description = text,
            FieldChange::Skills(skills) => values.skills = skills,
            FieldChange::SkillDescription { skill, text } => {
                values.skills_description.insert(skill, text);
            }
        }
    }
}

#[async_trait]
impl ExperienceForm for FormInstance {
    fn category(&self) -> ExperienceCategory {
        self.schema.category
    }

    fn values(&self) -> &FormValues {
        &self.values
    }

    fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn status(&self) -> FormStatus {
        if self.disabled {
            FormStatus::Disabled
        } else {
            self.status
        }
    }

    fn apply(&mut self, change: FieldChange) -> Result<()> {
        if self.disabled {
            return Err(FormsError::FormDisabled);
        }
        let field = change.field();
        if !self.schema.accepts(field) {
            return Err(FormsError::FieldNotApplicable {
                field,
                category: self.schema.category,
            });
        }

        self.errors.remove(field);
        self.write(change);
        self.status = FormStatus::Editing;
        Ok(())
    }

    async fn validate_and_get_values(&mut self) -> Option<ExperienceFormData> {
        self.validate_at(Local::now().date_naive())
    }

    fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.status = FormStatus::Pristine;
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}
