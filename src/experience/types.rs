//! Type definitions for experiences.
//!
//! An **experience** is one entry of a user's professional profile: a job,
//! an academic program, or a project. The same data exists in three shapes:
//!
//! ```text
//! FormValues            raw, unvalidated widget state (one per form instance)
//!     ↓ validate
//! ExperienceFormData    validated, category-tagged form payload
//!     ↓ transform::form_to_experience
//! Experience            outbound wire record (POST / PATCH body)
//!
//! ExperienceResponse    inbound wire record (GET), topics instead of skills
//!     ↓ transform::response_to_form
//! ExperienceFormData
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FormsError;
use crate::types::RecordId;

// ============================================================================
// ExperienceCategory
// ============================================================================

/// The closed set of experience categories.
///
/// Adding a category means adding a schema, defaults, a form-data variant and
/// transform arms; every `match` over this enum is exhaustive so the compiler
/// points at each of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceCategory {
    /// A professional role at a company.
    Professional,
    /// A degree or program at an institution.
    Academic,
    /// A standalone project.
    Project,
}

impl ExperienceCategory {
    /// All categories, in menu order.
    pub const ALL: [ExperienceCategory; 3] = [Self::Professional, Self::Academic, Self::Project];

    /// Returns the wire tag (`"professional"`, `"academic"`, `"project"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Academic => "academic",
            Self::Project => "project",
        }
    }

    /// Returns the label shown in the "add experience" menu.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Academic => "Academic",
            Self::Project => "Project",
        }
    }

    /// Returns true if this category carries start/end dates and a
    /// current flag.
    #[must_use]
    pub const fn has_dates(self) -> bool {
        matches!(self, Self::Professional | Self::Academic)
    }
}

impl fmt::Display for ExperienceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceCategory {
    type Err = FormsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professional" => Ok(Self::Professional),
            "academic" => Ok(Self::Academic),
            "project" => Ok(Self::Project),
            other => Err(FormsError::config(format!(
                "Unknown experience type: {other}"
            ))),
        }
    }
}

// ============================================================================
// Field
// ============================================================================

/// A named form field. Used as the key of per-field errors.
///
/// `Display` yields the wire/form field name (`"startDate"`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Job, program or project title.
    Title,
    /// Employer (professional only).
    Company,
    /// School or university (academic only).
    Institution,
    /// Work location (professional only, optional).
    Location,
    /// First day of the experience.
    StartDate,
    /// Last day of the experience.
    EndDate,
    /// Whether the experience is ongoing.
    IsCurrent,
    /// Free-text description.
    Description,
    /// Selected skill ids.
    Skills,
    /// Per-skill free text.
    SkillsDescription,
}

impl Field {
    /// Returns the form field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Company => "company",
            Self::Institution => "institution",
            Self::Location => "location",
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
            Self::IsCurrent => "isCurrent",
            Self::Description => "description",
            Self::Skills => "skills",
            Self::SkillsDescription => "skillsDescription",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Validated form payloads
// ============================================================================

/// Validated professional experience.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalFormData {
    /// Role title (e.g., "Senior Software Engineer").
    pub title: String,
    /// Employer name.
    pub company: String,
    /// Optional work location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// First day in the role.
    pub start_date: NaiveDate,
    /// Last day in the role; absent while `is_current`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Whether this is the current position.
    #[serde(default)]
    pub is_current: bool,
    /// What the role involved.
    pub description: String,
    /// Ordered, unique skill ids.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Optional text per skill id.
    #[serde(default)]
    pub skills_description: BTreeMap<String, String>,
}

/// Validated academic experience.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicFormData {
    /// Degree or program title.
    pub title: String,
    /// School or university.
    pub institution: String,
    /// First day of the program.
    pub start_date: NaiveDate,
    /// Last day of the program; absent while `is_current`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Whether the user is still enrolled.
    #[serde(default)]
    pub is_current: bool,
    /// What the program covered.
    pub description: String,
    /// Ordered, unique skill ids.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Optional text per skill id.
    #[serde(default)]
    pub skills_description: BTreeMap<String, String>,
}

/// Validated project experience. Projects have no dates or organization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFormData {
    /// Project name.
    pub title: String,
    /// What was built.
    pub description: String,
    /// Ordered, unique skill ids.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Optional text per skill id.
    #[serde(default)]
    pub skills_description: BTreeMap<String, String>,
}

/// Validated form payload, tagged by category.
///
/// Serializes with a `"category"` discriminant, matching the shape the
/// forms produce: `{"category": "project", "title": ..., ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum ExperienceFormData {
    /// Professional role.
    Professional(ProfessionalFormData),
    /// Academic program.
    Academic(AcademicFormData),
    /// Project.
    Project(ProjectFormData),
}

impl ExperienceFormData {
    /// Returns the category of this payload.
    pub fn category(&self) -> ExperienceCategory {
        match self {
            Self::Professional(_) => ExperienceCategory::Professional,
            Self::Academic(_) => ExperienceCategory::Academic,
            Self::Project(_) => ExperienceCategory::Project,
        }
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        match self {
            Self::Professional(d) => &d.title,
            Self::Academic(d) => &d.title,
            Self::Project(d) => &d.title,
        }
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        match self {
            Self::Professional(d) => &d.description,
            Self::Academic(d) => &d.description,
            Self::Project(d) => &d.description,
        }
    }

    /// Returns the selected skill ids.
    pub fn skills(&self) -> &[String] {
        match self {
            Self::Professional(d) => &d.skills,
            Self::Academic(d) => &d.skills,
            Self::Project(d) => &d.skills,
        }
    }

    /// Returns the per-skill descriptions.
    pub fn skills_description(&self) -> &BTreeMap<String, String> {
        match self {
            Self::Professional(d) => &d.skills_description,
            Self::Academic(d) => &d.skills_description,
            Self::Project(d) => &d.skills_description,
        }
    }

    /// Returns the current flag; always false for projects.
    pub fn is_current(&self) -> bool {
        match self {
            Self::Professional(d) => d.is_current,
            Self::Academic(d) => d.is_current,
            Self::Project(_) => false,
        }
    }

    /// Returns the end date, if any.
    pub fn end_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Professional(d) => d.end_date,
            Self::Academic(d) => d.end_date,
            Self::Project(_) => None,
        }
    }
}

// ============================================================================
// FormValues: raw widget state
// ============================================================================

/// Raw, unvalidated field state of one form instance.
///
/// Holds every field any category uses; fields the category does not have
/// stay at their defaults and are ignored by validation. `organization` is
/// the company for professional forms and the institution for academic ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormValues {
    /// Category the values belong to.
    pub category: ExperienceCategory,
    /// Title text.
    pub title: String,
    /// Company or institution text.
    pub organization: String,
    /// Location text (empty means none).
    pub location: String,
    /// Selected start date.
    pub start_date: Option<NaiveDate>,
    /// Selected end date.
    pub end_date: Option<NaiveDate>,
    /// Current position / still enrolled.
    pub is_current: bool,
    /// Description text.
    pub description: String,
    /// Selected skill ids, in selection order.
    pub skills: Vec<String>,
    /// Text entered per skill; may hold entries for skills no longer selected.
    pub skills_description: BTreeMap<String, String>,
}

impl FormValues {
    /// Creates empty values for a category.
    pub fn empty(category: ExperienceCategory) -> Self {
        Self {
            category,
            title: String::new(),
            organization: String::new(),
            location: String::new(),
            start_date: None,
            end_date: None,
            is_current: false,
            description: String::new(),
            skills: Vec::new(),
            skills_description: BTreeMap::new(),
        }
    }
}

impl From<&ExperienceFormData> for FormValues {
    fn from(data: &ExperienceFormData) -> Self {
        let mut values = Self::empty(data.category());
        match data {
            ExperienceFormData::Professional(d) => {
                values.title = d.title.clone();
                values.organization = d.company.clone();
                values.location = d.location.clone().unwrap_or_default();
                values.start_date = Some(d.start_date);
                values.end_date = d.end_date;
                values.is_current = d.is_current;
            }
            ExperienceFormData::Academic(d) => {
                values.title = d.title.clone();
                values.organization = d.institution.clone();
                values.start_date = Some(d.start_date);
                values.end_date = d.end_date;
                values.is_current = d.is_current;
            }
            ExperienceFormData::Project(d) => {
                values.title = d.title.clone();
            }
        }
        values.description = data.description().to_string();
        values.skills = data.skills().to_vec();
        values.skills_description = data.skills_description().clone();
        values
    }
}

// ============================================================================
// Wire records
// ============================================================================

/// Wire entry pairing a skill id with optional free text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Skill id (named `category` on the wire).
    pub category: String,
    /// What the skill was used for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Outbound wire record, sent on create and update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    /// Category tag.
    pub category: ExperienceCategory,
    /// Title (form `title`).
    pub name: String,
    /// Company or institution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_name: Option<String>,
    /// First day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Ongoing flag; absent for projects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_current: Option<bool>,
    /// Work location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Description.
    pub description: String,
    /// Skill ids in selection order.
    pub skills: Vec<String>,
    /// Per-skill text.
    #[serde(default)]
    pub skills_description: BTreeMap<String, String>,
}

impl Experience {
    /// Returns the skills as a topic list: one entry per skill, carrying its
    /// description or an empty string.
    pub fn topics(&self) -> Vec<Topic> {
        self.skills
            .iter()
            .map(|skill| Topic {
                category: skill.clone(),
                description: Some(
                    self.skills_description
                        .get(skill)
                        .cloned()
                        .unwrap_or_default(),
                ),
            })
            .collect()
    }
}

/// Inbound wire record, as listed by the API.
///
/// Dates arrive as strings (`YYYY-MM-DD` or RFC 3339) and are parsed by
/// [`response_to_form`](crate::transform::response_to_form).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceResponse {
    /// Server-assigned id.
    pub id: RecordId,
    /// Category tag.
    pub category: ExperienceCategory,
    /// Title.
    pub name: String,
    /// Company or institution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_name: Option<String>,
    /// First day, as sent by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Last day, as sent by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Ongoing flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_current: Option<bool>,
    /// Work location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Description.
    pub description: String,
    /// Skills with their descriptions.
    #[serde(default)]
    pub topics: Vec<Topic>,
}
