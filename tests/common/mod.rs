//! Shared test collaborators: an in-memory API and a recording notifier.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Notify;

use expforms::transform::experience_to_response;
use expforms::{
    ApiError, Experience, ExperienceApi, ExperienceCategory, ExperienceResponse, FieldChange,
    Notifier, RecordId, Topic,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// In-memory stand-in for the experience API.
#[derive(Default)]
pub struct MockApi {
    records: Mutex<Vec<ExperienceResponse>>,
    batches: Mutex<Vec<Vec<Experience>>>,
    updates: Mutex<Vec<(RecordId, Experience)>>,
    create_error: Mutex<Option<ApiError>>,
    update_error: Mutex<Option<ApiError>>,
    list_errors: Mutex<VecDeque<ApiError>>,
    list_calls: AtomicUsize,
    create_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ExperienceResponse>) -> Self {
        let api = Self::new();
        *api.records.lock().unwrap() = records;
        api
    }

    /// Makes every batch create fail with `err`.
    pub fn fail_create(&self, err: ApiError) {
        *self.create_error.lock().unwrap() = Some(err);
    }

    /// Makes every update fail with `err`.
    pub fn fail_update(&self, err: ApiError) {
        *self.update_error.lock().unwrap() = Some(err);
    }

    /// Queues errors returned by the next listings, one per call.
    pub fn fail_list(&self, errors: impl IntoIterator<Item = ApiError>) {
        self.list_errors.lock().unwrap().extend(errors);
    }

    /// Makes batch creates wait until the returned handle is notified.
    pub fn gate_create(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.create_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn batches(&self) -> Vec<Vec<Experience>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(RecordId, Experience)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExperienceApi for MockApi {
    async fn list_experiences(&self) -> Result<Vec<ExperienceResponse>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.list_errors.lock().unwrap().pop_front() {
            return Err(err);
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create_experiences_batch(&self, experiences: &[Experience]) -> Result<(), ApiError> {
        let gate = self.create_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(err) = self.create_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.batches.lock().unwrap().push(experiences.to_vec());
        Ok(())
    }

    async fn update_experience(
        &self,
        id: &RecordId,
        experience: &Experience,
    ) -> Result<ExperienceResponse, ApiError> {
        if let Some(err) = self.update_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.updates
            .lock()
            .unwrap()
            .push((id.clone(), experience.clone()));
        Ok(experience_to_response(id.clone(), experience))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Toast {
    Success(String),
    Error(String, Option<String>),
}

/// Notifier that remembers every toast.
#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, title: &str, _description: Option<&str>) {
        self.toasts
            .lock()
            .unwrap()
            .push(Toast::Success(title.to_string()));
    }

    fn error(&self, title: &str, description: Option<&str>) {
        self.toasts.lock().unwrap().push(Toast::Error(
            title.to_string(),
            description.map(str::to_string),
        ));
    }
}

// ============================================================================
// Field change scripts
// ============================================================================

pub fn valid_project_changes(title: &str) -> Vec<FieldChange> {
    vec![
        FieldChange::Title(title.to_string()),
        FieldChange::Description("Built a personal portfolio using modern tooling.".into()),
        FieldChange::Skills(vec!["react".into()]),
    ]
}

pub fn valid_professional_changes(title: &str) -> Vec<FieldChange> {
    vec![
        FieldChange::Title(title.to_string()),
        FieldChange::Company("Acme Corp".into()),
        FieldChange::Location("Remote".into()),
        FieldChange::StartDate(Some(date(2020, 2, 1))),
        FieldChange::IsCurrent(true),
        FieldChange::Description("Owned the billing service end to end.".into()),
        FieldChange::Skills(vec!["go".into(), "postgresql".into()]),
    ]
}

pub fn valid_academic_changes(title: &str) -> Vec<FieldChange> {
    vec![
        FieldChange::Title(title.to_string()),
        FieldChange::Institution("State University".into()),
        FieldChange::StartDate(Some(date(2016, 9, 1))),
        FieldChange::EndDate(Some(date(2020, 6, 30))),
        FieldChange::Description("Algorithms, systems, and compilers coursework.".into()),
        FieldChange::Skills(vec!["c".into(), "python".into()]),
    ]
}

pub fn valid_changes(category: ExperienceCategory, title: &str) -> Vec<FieldChange> {
    match category {
        ExperienceCategory::Professional => valid_professional_changes(title),
        ExperienceCategory::Academic => valid_academic_changes(title),
        ExperienceCategory::Project => valid_project_changes(title),
    }
}

// ============================================================================
// Wire records
// ============================================================================

pub fn project_record(id: &str, name: &str) -> ExperienceResponse {
    ExperienceResponse {
        id: RecordId::new(id),
        category: ExperienceCategory::Project,
        name: name.to_string(),
        sub_name: None,
        start_date: None,
        end_date: None,
        is_current: None,
        location: None,
        description: "A small tool that grew into a product.".into(),
        topics: vec![Topic {
            category: "rust".into(),
            description: Some("core engine".into()),
        }],
    }
}

pub fn professional_record(id: &str, name: &str) -> ExperienceResponse {
    ExperienceResponse {
        id: RecordId::new(id),
        category: ExperienceCategory::Professional,
        name: name.to_string(),
        sub_name: Some("Acme Corp".into()),
        start_date: Some("2019-03-01T00:00:00.000Z".into()),
        end_date: Some("2022-01-31".into()),
        is_current: Some(false),
        location: Some("Berlin".into()),
        description: "Built and ran the payments platform.".into(),
        topics: vec![
            Topic {
                category: "go".into(),
                description: Some("services".into()),
            },
            Topic {
                category: "kafka".into(),
                description: None,
            },
        ],
    }
}

pub fn academic_record(id: &str, name: &str) -> ExperienceResponse {
    ExperienceResponse {
        id: RecordId::new(id),
        category: ExperienceCategory::Academic,
        name: name.to_string(),
        sub_name: Some("State University".into()),
        start_date: Some("2014-09-01".into()),
        end_date: None,
        is_current: Some(true),
        location: None,
        description: "Part-time master's program in data science.".into(),
        topics: vec![Topic {
            category: "python".into(),
            description: Some(String::new()),
        }],
    }
}
