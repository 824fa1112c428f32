//! Conversions between form payloads and wire records.
//!
//! All functions are pure. The outbound direction is total; the inbound
//! direction rejects records it cannot represent faithfully.
//!
//! ```text
//! ExperienceFormData ──form_to_experience──▶ Experience
//!        ▲                                      │
//!        └──response_to_form── ExperienceResponse ◀─experience_to_response─┘
//! ```
//!
//! Renames: `title ↔ name`, `company | institution ↔ subName`,
//! `skills + skillsDescription ↔ topics`.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};

use crate::error::{FormsError, Result};
use crate::experience::{
    AcademicFormData, Experience, ExperienceCategory, ExperienceFormData, ExperienceResponse,
    ProfessionalFormData, ProjectFormData, Topic,
};
use crate::types::RecordId;

/// Maps a validated form payload to the outbound wire record.
///
/// A current experience never carries an end date on the wire.
pub fn form_to_experience(data: &ExperienceFormData) -> Experience {
    match data {
        ExperienceFormData::Professional(d) => Experience {
            category: ExperienceCategory::Professional,
            name: d.title.clone(),
            sub_name: Some(d.company.clone()),
            start_date: Some(d.start_date),
            end_date: if d.is_current { None } else { d.end_date },
            is_current: Some(d.is_current),
            location: d.location.clone(),
            description: d.description.clone(),
            skills: d.skills.clone(),
            skills_description: d.skills_description.clone(),
        },
        ExperienceFormData::Academic(d) => Experience {
            category: ExperienceCategory::Academic,
            name: d.title.clone(),
            sub_name: Some(d.institution.clone()),
            start_date: Some(d.start_date),
            end_date: if d.is_current { None } else { d.end_date },
            is_current: Some(d.is_current),
            location: None,
            description: d.description.clone(),
            skills: d.skills.clone(),
            skills_description: d.skills_description.clone(),
        },
        ExperienceFormData::Project(d) => Experience {
            category: ExperienceCategory::Project,
            name: d.title.clone(),
            sub_name: None,
            start_date: None,
            end_date: None,
            is_current: None,
            location: None,
            description: d.description.clone(),
            skills: d.skills.clone(),
            skills_description: d.skills_description.clone(),
        },
    }
}

/// Maps a batch of payloads, preserving order.
pub fn forms_to_experiences(forms: &[ExperienceFormData]) -> Vec<Experience> {
    forms.iter().map(form_to_experience).collect()
}

/// Maps a listed wire record back into a form payload.
///
/// - topics become `skills` (in topic order) and `skillsDescription`
///   (only topics with non-empty text)
/// - absent `isCurrent` is false; a current record drops its end date
/// - absent `location` and `subName` become empty strings
///
/// # Errors
///
/// Returns [`FormsError::Transform`] if two topics share a skill id, if a
/// dated category has no start date, or if a date string is not
/// `YYYY-MM-DD` / RFC 3339.
pub fn response_to_form(resp: &ExperienceResponse) -> Result<ExperienceFormData> {
    let (skills, skills_description) = split_topics(&resp.id, &resp.topics)?;
    let is_current = resp.is_current.unwrap_or(false);
    let sub_name = resp.sub_name.clone().unwrap_or_default();

    let data = match resp.category {
        ExperienceCategory::Professional => {
            let (start_date, end_date) = wire_dates(resp, is_current)?;
            ExperienceFormData::Professional(ProfessionalFormData {
                title: resp.name.clone(),
                company: sub_name,
                location: Some(resp.location.clone().unwrap_or_default()),
                start_date,
                end_date,
                is_current,
                description: resp.description.clone(),
                skills,
                skills_description,
            })
        }
        ExperienceCategory::Academic => {
            let (start_date, end_date) = wire_dates(resp, is_current)?;
            ExperienceFormData::Academic(AcademicFormData {
                title: resp.name.clone(),
                institution: sub_name,
                start_date,
                end_date,
                is_current,
                description: resp.description.clone(),
                skills,
                skills_description,
            })
        }
        ExperienceCategory::Project => ExperienceFormData::Project(ProjectFormData {
            title: resp.name.clone(),
            description: resp.description.clone(),
            skills,
            skills_description,
        }),
    };

    Ok(data)
}

/// Builds the listed shape of an outbound record, as a server would echo it.
///
/// Every skill becomes a topic; skills without text get no description.
pub fn experience_to_response(id: RecordId, exp: &Experience) -> ExperienceResponse {
    let topics = exp
        .skills
        .iter()
        .map(|skill| Topic {
            category: skill.clone(),
            description: exp.skills_description.get(skill).cloned(),
        })
        .collect();

    ExperienceResponse {
        id,
        category: exp.category,
        name: exp.name.clone(),
        sub_name: exp.sub_name.clone(),
        start_date: exp.start_date.map(|d| d.to_string()),
        end_date: exp.end_date.map(|d| d.to_string()),
        is_current: exp.is_current,
        location: exp.location.clone(),
        description: exp.description.clone(),
        topics,
    }
}

/// Parses a wire date: a plain `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps keep the calendar date as written, without converting zones.
pub fn parse_wire_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

fn split_topics(
    id: &RecordId,
    topics: &[Topic],
) -> Result<(Vec<String>, BTreeMap<String, String>)> {
    let mut skills: Vec<String> = Vec::with_capacity(topics.len());
    let mut descriptions = BTreeMap::new();

    for topic in topics {
        if skills.contains(&topic.category) {
            return Err(FormsError::transform(format!(
                "experience {} lists topic '{}' more than once",
                id, topic.category
            )));
        }
        skills.push(topic.category.clone());
        if let Some(text) = topic.description.as_deref().filter(|t| !t.is_empty()) {
            descriptions.insert(topic.category.clone(), text.to_string());
        }
    }

    Ok((skills, descriptions))
}

fn wire_dates(resp: &ExperienceResponse, is_current: bool) -> Result<(NaiveDate, Option<NaiveDate>)> {
    let start = resp.start_date.as_deref().ok_or_else(|| {
        FormsError::transform(format!("experience {} has no startDate", resp.id))
    })?;
    let start = parse_date_field(&resp.id, "startDate", start)?;

    let end = match resp.end_date.as_deref() {
        Some(raw) if !is_current => Some(parse_date_field(&resp.id, "endDate", raw)?),
        _ => None,
    };

    Ok((start, end))
}

fn parse_date_field(id: &RecordId, field: &str, raw: &str) -> Result<NaiveDate> {
    parse_wire_date(raw).ok_or_else(|| {
        FormsError::transform(format!(
            "experience {} has an unreadable {}: '{}'",
            id, field, raw
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn professional(is_current: bool) -> ExperienceFormData {
        ExperienceFormData::Professional(ProfessionalFormData {
            title: "Backend Engineer".into(),
            company: "Acme Corp".into(),
            location: Some("Remote".into()),
            start_date: date(2020, 2, 1),
            end_date: Some(date(2022, 8, 31)),
            is_current,
            description: "Owned the billing service end to end.".into(),
            skills: vec!["go".into(), "postgresql".into()],
            skills_description: BTreeMap::from([("go".to_string(), "services".to_string())]),
        })
    }

    fn response(category: ExperienceCategory) -> ExperienceResponse {
        ExperienceResponse {
            id: RecordId::new("exp_1"),
            category,
            name: "Title".into(),
            sub_name: None,
            start_date: Some("2019-09-01".into()),
            end_date: None,
            is_current: None,
            location: None,
            description: "A description long enough.".into(),
            topics: vec![],
        }
    }

    // ====================================================================
    // Outbound
    // ====================================================================

    #[test]
    fn test_professional_renames() {
        let exp = form_to_experience(&professional(false));
        assert_eq!(exp.category, ExperienceCategory::Professional);
        assert_eq!(exp.name, "Backend Engineer");
        assert_eq!(exp.sub_name.as_deref(), Some("Acme Corp"));
        assert_eq!(exp.location.as_deref(), Some("Remote"));
        assert_eq!(exp.end_date, Some(date(2022, 8, 31)));
        assert_eq!(exp.is_current, Some(false));
    }

    #[test]
    fn test_current_position_drops_end_date() {
        let exp = form_to_experience(&professional(true));
        assert_eq!(exp.end_date, None);
        assert_eq!(exp.is_current, Some(true));
    }

    #[test]
    fn test_project_has_no_dates_or_sub_name() {
        let data = ExperienceFormData::Project(ProjectFormData {
            title: "Portfolio Site".into(),
            description: "Built a personal portfolio using modern tooling.".into(),
            skills: vec!["react".into()],
            skills_description: BTreeMap::new(),
        });
        let exp = form_to_experience(&data);
        assert_eq!(exp.category, ExperienceCategory::Project);
        assert!(exp.sub_name.is_none());
        assert!(exp.start_date.is_none());
        assert!(exp.is_current.is_none());
        assert_eq!(exp.skills, vec!["react"]);
        assert!(exp.skills_description.is_empty());
    }

    // ====================================================================
    // Inbound
    // ====================================================================

    #[test]
    fn test_response_defaults() {
        let data = response_to_form(&response(ExperienceCategory::Professional)).unwrap();
        match data {
            ExperienceFormData::Professional(d) => {
                assert!(!d.is_current);
                assert_eq!(d.location.as_deref(), Some(""));
                assert_eq!(d.company, "");
                assert_eq!(d.start_date, date(2019, 9, 1));
            }
            other => panic!("expected professional, got {:?}", other),
        }
    }

    #[test]
    fn test_response_topics_split() {
        let mut resp = response(ExperienceCategory::Project);
        resp.topics = vec![
            Topic {
                category: "react".into(),
                description: Some("Component library".into()),
            },
            Topic {
                category: "css".into(),
                description: Some(String::new()),
            },
            Topic {
                category: "vite".into(),
                description: None,
            },
        ];
        let data = response_to_form(&resp).unwrap();
        assert_eq!(data.skills(), ["react", "css", "vite"].map(String::from));
        assert_eq!(data.skills_description().len(), 1);
        assert_eq!(data.skills_description()["react"], "Component library");
    }

    #[test]
    fn test_response_duplicate_topics_rejected() {
        let mut resp = response(ExperienceCategory::Project);
        resp.topics = vec![
            Topic {
                category: "react".into(),
                description: Some("first".into()),
            },
            Topic {
                category: "react".into(),
                description: Some("second".into()),
            },
        ];
        let err = response_to_form(&resp).unwrap_err();
        assert!(matches!(err, FormsError::Transform(ref m) if m.contains("react")));
    }

    #[test]
    fn test_response_rfc3339_dates() {
        let mut resp = response(ExperienceCategory::Academic);
        resp.start_date = Some("2016-09-01T00:00:00.000Z".into());
        resp.end_date = Some("2020-06-30T00:00:00+00:00".into());
        let data = response_to_form(&resp).unwrap();
        assert_eq!(data.end_date(), Some(date(2020, 6, 30)));
    }

    #[test]
    fn test_response_current_drops_end_date() {
        let mut resp = response(ExperienceCategory::Academic);
        resp.is_current = Some(true);
        resp.end_date = Some("2020-06-30".into());
        let data = response_to_form(&resp).unwrap();
        assert!(data.is_current());
        assert_eq!(data.end_date(), None);
    }

    #[test]
    fn test_response_missing_start_date_rejected() {
        let mut resp = response(ExperienceCategory::Professional);
        resp.start_date = None;
        assert!(response_to_form(&resp).is_err());
    }

    #[test]
    fn test_response_bad_date_rejected() {
        let mut resp = response(ExperienceCategory::Professional);
        resp.start_date = Some("last spring".into());
        let err = response_to_form(&resp).unwrap_err();
        assert!(err.to_string().contains("startDate"));
    }

    #[test]
    fn test_project_ignores_dates() {
        let mut resp = response(ExperienceCategory::Project);
        resp.start_date = Some("garbage".into());
        assert!(response_to_form(&resp).is_ok());
    }

    // ====================================================================
    // Round trip
    // ====================================================================

    #[test]
    fn test_round_trip_professional() {
        let original = professional(false);
        let exp = form_to_experience(&original);
        let resp = experience_to_response(RecordId::new("exp_9"), &exp);
        let back = response_to_form(&resp).unwrap();
        assert_eq!(back, original);
    }
}
