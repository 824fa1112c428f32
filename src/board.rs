//! The experiences page: every persisted record, grouped by category.

use tracing::{info, instrument, warn};

use crate::api::ExperienceApi;
use crate::config::Config;
use crate::editable::EditableExperience;
use crate::error::{NotFoundError, Result};
use crate::experience::{ExperienceCategory, ExperienceResponse};
use crate::types::RecordId;

/// Persisted experiences, split into one editable section per category.
///
/// Within a section records keep the order the server listed them in.
#[derive(Clone, Debug, Default)]
pub struct ExperienceBoard {
    professional: Vec<EditableExperience>,
    academic: Vec<EditableExperience>,
    project: Vec<EditableExperience>,
    skipped: usize,
}

impl ExperienceBoard {
    /// Lists the user's experiences and builds the board.
    ///
    /// A failed listing is retried up to `config.list_retries` times with
    /// doubling backoff. A rejected credential (401) is never retried.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid `config`, or the last
    /// [`ApiError`](crate::ApiError) once retries are exhausted.
    #[instrument(skip_all)]
    pub async fn load(api: &dyn ExperienceApi, config: &Config) -> Result<Self> {
        config.validate()?;

        let mut attempt = 0;
        let records = loop {
            match api.list_experiences().await {
                Ok(records) => break records,
                Err(err) if err.is_unauthorized() || attempt >= config.list_retries => {
                    warn!(error = %err, attempt, "listing experiences failed");
                    return Err(err.into());
                }
                Err(err) => {
                    let delay = config.backoff_for(attempt);
                    warn!(error = %err, attempt, ?delay, "listing experiences failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        };

        let board = Self::from_records(records);
        info!(
            professional = board.professional.len(),
            academic = board.academic.len(),
            project = board.project.len(),
            skipped = board.skipped,
            "experiences loaded"
        );
        Ok(board)
    }

    /// Builds the board from already-fetched records.
    ///
    /// Records that cannot be mapped into form data are skipped and counted.
    pub fn from_records(records: impl IntoIterator<Item = ExperienceResponse>) -> Self {
        let mut board = Self::default();
        for record in records {
            let id = record.id.clone();
            match EditableExperience::new(record) {
                Ok(editable) => board.section_vec(editable.category()).push(editable),
                Err(err) => {
                    warn!(%id, error = %err, "skipping unreadable experience");
                    board.skipped += 1;
                }
            }
        }
        board
    }

    /// Records of one category, in server order.
    pub fn section(&self, category: ExperienceCategory) -> &[EditableExperience] {
        match category {
            ExperienceCategory::Professional => &self.professional,
            ExperienceCategory::Academic => &self.academic,
            ExperienceCategory::Project => &self.project,
        }
    }

    fn section_vec(&mut self, category: ExperienceCategory) -> &mut Vec<EditableExperience> {
        match category {
            ExperienceCategory::Professional => &mut self.professional,
            ExperienceCategory::Academic => &mut self.academic,
            ExperienceCategory::Project => &mut self.project,
        }
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &RecordId) -> Option<&EditableExperience> {
        self.iter().find(|e| e.id() == id)
    }

    /// Looks up a record by id for editing.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::Experience` if no listed record has `id`.
    pub fn get_mut(&mut self, id: &RecordId) -> Result<&mut EditableExperience> {
        self.professional
            .iter_mut()
            .chain(self.academic.iter_mut())
            .chain(self.project.iter_mut())
            .find(|e| e.id() == id)
            .ok_or_else(|| NotFoundError::experience(id).into())
    }

    /// Iterates over every record, section by section.
    pub fn iter(&self) -> impl Iterator<Item = &EditableExperience> {
        ExperienceCategory::ALL
            .into_iter()
            .flat_map(move |category| self.section(category).iter())
    }

    /// Number of records shown.
    pub fn len(&self) -> usize {
        self.professional.len() + self.academic.len() + self.project.len()
    }

    /// Returns true if no record is shown.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of listed records that could not be shown.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
