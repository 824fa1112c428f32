//! Schema validation for experience forms.
//!
//! Checks [`FormValues`] against a [`CategorySchema`] and, on success, coerces
//! them into a typed [`ExperienceFormData`]. Unlike a fail-fast check, every
//! field is examined so a form can show all of its errors at once.
//!
//! # Validation Layers
//!
//! ```text
//! FormInstance::validate_at(today)
//!     └── validate_form_values(schema, values, today)
//!             ├── check_text()    ← title, organization, location, description
//!             ├── check_dates()   ← required start, no future dates, current vs end
//!             ├── check_skills()  ← count bounds, unique non-empty ids
//!             └── build_form_data()  ← only reached if no field failed
//!
//! validate_experience(data, today)
//!     ├── validate_form_values(...)
//!     └── check_descriptions()  ← typed data must already be pruned
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{FormsError, ValidationError};
use crate::experience::types::{
    AcademicFormData, ExperienceCategory, ExperienceFormData, Field, FormValues,
    ProfessionalFormData, ProjectFormData,
};
use crate::schema::{schema_for, CategorySchema, SkillsRule, TextRule};

/// Per-field error messages of one form.
///
/// Keeps the first message recorded for each field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` unless the field already has one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Returns the message for `field`.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Returns true if `field` has an error.
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Removes the error of `field`.
    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    /// Removes all errors.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns true if no field has an error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with an error.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(field, message)` in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Validates raw form values against `schema`, judging dates relative to
/// `today`.
///
/// # Errors
///
/// Returns every failing field. The values are never modified.
pub(crate) fn validate_form_values(
    schema: &CategorySchema,
    values: &FormValues,
    today: NaiveDate,
) -> Result<ExperienceFormData, FieldErrors> {
    let mut errors = FieldErrors::new();

    check_text(&schema.title, &values.title, &mut errors);
    if let Some(rule) = &schema.organization {
        check_text(rule, &values.organization, &mut errors);
    }
    if let Some(rule) = &schema.location {
        check_text(rule, &values.location, &mut errors);
    }
    check_dates(schema, values, today, &mut errors);
    check_text(&schema.description, &values.description, &mut errors);
    check_skills(&schema.skills, &values.skills, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    build_form_data(schema, values)
}

/// Validates an already-typed payload against its category schema.
///
/// Use this for data that did not come through a form instance (e.g. built
/// by hand or decoded from JSON). On top of the schema rules, typed data must
/// be in the shape extraction produces: `skills_description` may only hold
/// non-blank text for selected skills.
///
/// # Errors
///
/// Returns `ValidationError::Fields` with every failing field.
pub fn validate_experience(data: &ExperienceFormData, today: NaiveDate) -> Result<(), FormsError> {
    let values = FormValues::from(data);
    let mut errors = validate_form_values(schema_for(data.category()), &values, today)
        .err()
        .unwrap_or_default();
    check_descriptions(&values, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Fields(errors).into())
    }
}

fn check_text(rule: &TextRule, value: &str, errors: &mut FieldErrors) {
    if let Some(message) = rule.check(value) {
        errors.insert(rule.field, message);
    }
}

fn check_dates(
    schema: &CategorySchema,
    values: &FormValues,
    today: NaiveDate,
    errors: &mut FieldErrors,
) {
    let Some(rules) = &schema.dates else {
        return;
    };

    match values.start_date {
        None => errors.insert(Field::StartDate, rules.start_required),
        Some(start) if start > today => errors.insert(Field::StartDate, rules.start_in_future),
        Some(_) => {}
    }

    if let Some(end) = values.end_date {
        if end > today {
            errors.insert(Field::EndDate, rules.end_in_future);
        }
        // Unreachable through FormInstance::apply, but typed data can carry both
        if values.is_current {
            errors.insert(Field::EndDate, rules.end_while_current);
        }
    }
}

fn check_skills(rule: &SkillsRule, skills: &[String], errors: &mut FieldErrors) {
    if skills.len() < rule.min {
        errors.insert(Field::Skills, rule.too_few_message);
        return;
    }
    if skills.len() > rule.max {
        errors.insert(Field::Skills, rule.too_many_message);
        return;
    }

    for (i, skill) in skills.iter().enumerate() {
        if skill.trim().is_empty() {
            errors.insert(
                Field::Skills,
                format!("Skill at index {} cannot be empty", i),
            );
            return;
        }
        if skills[..i].contains(skill) {
            errors.insert(Field::Skills, format!("Skill '{}' is selected more than once", skill));
            return;
        }
    }
}

fn check_descriptions(values: &FormValues, errors: &mut FieldErrors) {
    for (skill, text) in &values.skills_description {
        if !values.skills.contains(skill) {
            errors.insert(
                Field::SkillsDescription,
                format!("Skill '{}' has a description but is not selected", skill),
            );
            return;
        }
        if text.trim().is_empty() {
            errors.insert(
                Field::SkillsDescription,
                format!("Description for skill '{}' cannot be blank", skill),
            );
            return;
        }
    }
}

/// Keeps the descriptions of selected skills that have non-blank text.
fn selected_descriptions(values: &FormValues) -> BTreeMap<String, String> {
    values
        .skills_description
        .iter()
        .filter(|(skill, text)| values.skills.contains(*skill) && !text.trim().is_empty())
        .map(|(skill, text)| (skill.clone(), text.clone()))
        .collect()
}

fn start_date(schema: &CategorySchema, values: &FormValues) -> Result<NaiveDate, FieldErrors> {
    values.start_date.ok_or_else(|| {
        let mut errors = FieldErrors::new();
        if let Some(rules) = &schema.dates {
            errors.insert(Field::StartDate, rules.start_required);
        }
        errors
    })
}

fn build_form_data(
    schema: &CategorySchema,
    values: &FormValues,
) -> Result<ExperienceFormData, FieldErrors> {
    let skills_description = selected_descriptions(values);
    let end_date = if values.is_current {
        None
    } else {
        values.end_date
    };

    let data = match schema.category {
        ExperienceCategory::Professional => {
            ExperienceFormData::Professional(ProfessionalFormData {
                title: values.title.clone(),
                company: values.organization.clone(),
                location: (!values.location.is_empty()).then(|| values.location.clone()),
                start_date: start_date(schema, values)?,
                end_date,
                is_current: values.is_current,
                description: values.description.clone(),
                skills: values.skills.clone(),
                skills_description,
            })
        }
        ExperienceCategory::Academic => ExperienceFormData::Academic(AcademicFormData {
            title: values.title.clone(),
            institution: values.organization.clone(),
            start_date: start_date(schema, values)?,
            end_date,
            is_current: values.is_current,
            description: values.description.clone(),
            skills: values.skills.clone(),
            skills_description,
        }),
        ExperienceCategory::Project => ExperienceFormData::Project(ProjectFormData {
            title: values.title.clone(),
            description: values.description.clone(),
            skills: values.skills.clone(),
            skills_description,
        }),
    };

    Ok(data)
}
