//! Schema registry: validation rules and default values per category.
//!
//! Every bound a form is checked against lives here, not in the form or the
//! collection. The three schemas are compile-time statics; lookups over the
//! closed [`ExperienceCategory`] enum cannot fail. Only resolving a raw tag
//! string can, and that is a configuration error.
//!
//! # Rules
//!
//! | Field | Professional | Academic | Project |
//! |-------|--------------|----------|---------|
//! | `title` | 1–100 chars | 1–150 chars | 1–100 chars |
//! | `company` / `institution` | 1–100 chars | 1–100 chars | n/a |
//! | `location` | ≤ 100 chars, optional | n/a | n/a |
//! | `startDate` | required, not in the future | same | n/a |
//! | `endDate` | optional, not in the future | same | n/a |
//! | `description` | 10–500 chars | 10–500 chars | 10–500 chars |
//! | `skills` | 1–20 unique ids | same | same |

use crate::error::Result;
use crate::experience::{ExperienceCategory, Field, FormValues};

/// Minimum number of skills per experience.
pub const MIN_SKILLS: usize = 1;

/// Maximum number of skills per experience.
pub const MAX_SKILLS: usize = 20;

/// Minimum description length in characters.
pub const MIN_DESCRIPTION_LENGTH: usize = 10;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Maximum title length for professional and project experiences.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum title length for academic experiences.
pub const MAX_ACADEMIC_TITLE_LENGTH: usize = 150;

/// Maximum company / institution length.
pub const MAX_ORGANIZATION_LENGTH: usize = 100;

/// Maximum location length.
pub const MAX_LOCATION_LENGTH: usize = 100;

// ============================================================================
// Rule types
// ============================================================================

/// Length bounds and messages for a text field.
///
/// Lengths are counted in characters. A `min` of 0 makes the field optional.
#[derive(Clone, Copy, Debug)]
pub struct TextRule {
    /// Field the rule applies to.
    pub field: Field,
    /// Minimum length.
    pub min: usize,
    /// Maximum length.
    pub max: usize,
    /// Shown when the field is empty but required.
    pub empty_message: &'static str,
    /// Shown when the field is non-empty but shorter than `min`.
    pub too_short_message: &'static str,
    /// Shown when the field exceeds `max`.
    pub too_long_message: &'static str,
}

impl TextRule {
    /// Returns the error message for `value`, or `None` if it passes.
    pub fn check(&self, value: &str) -> Option<&'static str> {
        let len = value.chars().count();
        if len == 0 && self.min > 0 {
            Some(self.empty_message)
        } else if len < self.min {
            Some(self.too_short_message)
        } else if len > self.max {
            Some(self.too_long_message)
        } else {
            None
        }
    }
}

/// Messages for the date fields of dated categories.
#[derive(Clone, Copy, Debug)]
pub struct DateRules {
    /// Shown when no start date is selected.
    pub start_required: &'static str,
    /// Shown when the start date is after today.
    pub start_in_future: &'static str,
    /// Shown when the end date is after today.
    pub end_in_future: &'static str,
    /// Shown when an end date is set on a current experience.
    pub end_while_current: &'static str,
}

/// Count bounds and messages for the skills list.
#[derive(Clone, Copy, Debug)]
pub struct SkillsRule {
    /// Minimum number of skills.
    pub min: usize,
    /// Maximum number of skills.
    pub max: usize,
    /// Shown below `min`.
    pub too_few_message: &'static str,
    /// Shown above `max`.
    pub too_many_message: &'static str,
}

/// The validation schema of one category.
#[derive(Clone, Copy, Debug)]
pub struct CategorySchema {
    /// Category this schema validates.
    pub category: ExperienceCategory,
    /// Title rule.
    pub title: TextRule,
    /// Company or institution rule, if the category has one.
    pub organization: Option<TextRule>,
    /// Location rule, if the category has one.
    pub location: Option<TextRule>,
    /// Date messages, if the category is dated.
    pub dates: Option<DateRules>,
    /// Description rule.
    pub description: TextRule,
    /// Skills rule.
    pub skills: SkillsRule,
}

impl CategorySchema {
    /// Returns true if forms of this category have `field`.
    pub fn accepts(&self, field: Field) -> bool {
        match field {
            Field::Title | Field::Description | Field::Skills | Field::SkillsDescription => true,
            Field::Company | Field::Institution => {
                self.organization.is_some_and(|rule| rule.field == field)
            }
            Field::Location => self.location.is_some(),
            Field::StartDate | Field::EndDate | Field::IsCurrent => self.dates.is_some(),
        }
    }

    /// Returns the fields of this category in display order.
    pub fn fields(&self) -> Vec<Field> {
        [
            Field::Title,
            Field::Company,
            Field::Institution,
            Field::Location,
            Field::StartDate,
            Field::EndDate,
            Field::IsCurrent,
            Field::Description,
            Field::Skills,
            Field::SkillsDescription,
        ]
        .into_iter()
        .filter(|f| self.accepts(*f))
        .collect()
    }
}

const DESCRIPTION_TOO_SHORT: &str = "Description must be at least 10 characters long";
const DESCRIPTION_TOO_LONG: &str = "Description must be less than 500 characters";

const SKILLS: SkillsRule = SkillsRule {
    min: MIN_SKILLS,
    max: MAX_SKILLS,
    too_few_message: "Please select at least one skill",
    too_many_message: "Maximum 20 skills allowed",
};

/// Schema for professional roles.
pub static PROFESSIONAL_SCHEMA: CategorySchema = CategorySchema {
    category: ExperienceCategory::Professional,
    title: TextRule {
        field: Field::Title,
        min: 1,
        max: MAX_TITLE_LENGTH,
        empty_message: "Job title cannot be empty",
        too_short_message: "Job title cannot be empty",
        too_long_message: "Job title must be less than 100 characters",
    },
    organization: Some(TextRule {
        field: Field::Company,
        min: 1,
        max: MAX_ORGANIZATION_LENGTH,
        empty_message: "Company name cannot be empty",
        too_short_message: "Company name cannot be empty",
        too_long_message: "Company name must be less than 100 characters",
    }),
    location: Some(TextRule {
        field: Field::Location,
        min: 0,
        max: MAX_LOCATION_LENGTH,
        empty_message: "",
        too_short_message: "",
        too_long_message: "Location must be less than 100 characters",
    }),
    dates: Some(DateRules {
        start_required: "Start date is required",
        start_in_future: "Start date cannot be in the future",
        end_in_future: "End date cannot be in the future",
        end_while_current: "End date must be empty for a current position",
    }),
    description: TextRule {
        field: Field::Description,
        min: MIN_DESCRIPTION_LENGTH,
        max: MAX_DESCRIPTION_LENGTH,
        empty_message: "Job description is required",
        too_short_message: DESCRIPTION_TOO_SHORT,
        too_long_message: DESCRIPTION_TOO_LONG,
    },
    skills: SKILLS,
};

/// Schema for academic programs.
pub static ACADEMIC_SCHEMA: CategorySchema = CategorySchema {
    category: ExperienceCategory::Academic,
    title: TextRule {
        field: Field::Title,
        min: 1,
        max: MAX_ACADEMIC_TITLE_LENGTH,
        empty_message: "Degree/program title cannot be empty",
        too_short_message: "Degree/program title cannot be empty",
        too_long_message: "Title must be less than 150 characters",
    },
    organization: Some(TextRule {
        field: Field::Institution,
        min: 1,
        max: MAX_ORGANIZATION_LENGTH,
        empty_message: "Institution name cannot be empty",
        too_short_message: "Institution name cannot be empty",
        too_long_message: "Institution name must be less than 100 characters",
    }),
    location: None,
    dates: Some(DateRules {
        start_required: "Start date is required",
        start_in_future: "Start date cannot be in the future",
        end_in_future: "End date cannot be in the future",
        end_while_current: "End date must be empty while currently enrolled",
    }),
    description: TextRule {
        field: Field::Description,
        min: MIN_DESCRIPTION_LENGTH,
        max: MAX_DESCRIPTION_LENGTH,
        empty_message: "Academic experience description is required",
        too_short_message: DESCRIPTION_TOO_SHORT,
        too_long_message: DESCRIPTION_TOO_LONG,
    },
    skills: SKILLS,
};

/// Schema for projects.
pub static PROJECT_SCHEMA: CategorySchema = CategorySchema {
    category: ExperienceCategory::Project,
    title: TextRule {
        field: Field::Title,
        min: 1,
        max: MAX_TITLE_LENGTH,
        empty_message: "Project title cannot be empty",
        too_short_message: "Project title cannot be empty",
        too_long_message: "Project title must be less than 100 characters",
    },
    organization: None,
    location: None,
    dates: None,
    description: TextRule {
        field: Field::Description,
        min: MIN_DESCRIPTION_LENGTH,
        max: MAX_DESCRIPTION_LENGTH,
        empty_message: "Project description is required",
        too_short_message: DESCRIPTION_TOO_SHORT,
        too_long_message: DESCRIPTION_TOO_LONG,
    },
    skills: SKILLS,
};

// ============================================================================
// Registry
// ============================================================================

/// A resolved registry entry: the schema plus fresh default values.
#[derive(Clone, Debug)]
pub struct SchemaEntry {
    /// Validation rules.
    pub schema: &'static CategorySchema,
    /// Initial field state for a new form.
    pub defaults: FormValues,
}

/// Returns the schema for a category.
pub fn schema_for(category: ExperienceCategory) -> &'static CategorySchema {
    match category {
        ExperienceCategory::Professional => &PROFESSIONAL_SCHEMA,
        ExperienceCategory::Academic => &ACADEMIC_SCHEMA,
        ExperienceCategory::Project => &PROJECT_SCHEMA,
    }
}

/// Returns the default field values for a new form of a category.
///
/// Every text field starts empty, no dates are selected, `isCurrent` is
/// false and no skills are selected.
pub fn defaults_for(category: ExperienceCategory) -> FormValues {
    FormValues::empty(category)
}

/// Resolves a category to its schema and defaults.
pub fn resolve(category: ExperienceCategory) -> SchemaEntry {
    SchemaEntry {
        schema: schema_for(category),
        defaults: defaults_for(category),
    }
}

/// Resolves a raw category tag.
///
/// # Errors
///
/// Returns [`FormsError::Config`](crate::FormsError::Config) for any tag
/// outside the closed category set.
pub fn resolve_tag(tag: &str) -> Result<SchemaEntry> {
    let category: ExperienceCategory = tag.parse()?;
    Ok(resolve(category))
}
