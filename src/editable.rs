//! Edit-in-place wrapper around a persisted experience.
//!
//! An [`EditableExperience`] shows a stored record read-only until the user
//! starts editing. Saving validates, sends the update, and makes the server's
//! answer the new baseline; cancelling throws the edits away.

use chrono::{Local, NaiveDate};
use tracing::{info, instrument, warn};

use crate::api::ExperienceApi;
use crate::error::{FormsError, Result};
use crate::experience::{ExperienceCategory, ExperienceResponse, FormValues};
use crate::form::{ExperienceForm, FieldChange, FormInstance};
use crate::notify::Notifier;
use crate::transform::{form_to_experience, response_to_form};
use crate::types::RecordId;

/// Toast shown when the edited values do not validate.
pub const SAVE_INVALID_TITLE: &str = "Please fix the form errors.";

/// Toast shown after a successful update.
pub const SAVE_SUCCESS_TITLE: &str = "Experience updated";

/// Toast shown when the update request fails.
pub const SAVE_ERROR_TITLE: &str = "Failed to update experience";

/// Result of a save that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The update was stored; the wrapper is read-only again.
    Saved,
    /// The form has field errors; nothing was sent and editing continues.
    Invalid,
}

/// A persisted experience with edit/save/cancel controls.
#[derive(Clone, Debug)]
pub struct EditableExperience {
    record: ExperienceResponse,
    form: FormInstance,
}

impl EditableExperience {
    /// Wraps a listed record. The form starts disabled with the record's values.
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::Transform`] if the record cannot be mapped into
    /// form data.
    pub fn new(record: ExperienceResponse) -> Result<Self> {
        let data = response_to_form(&record)?;
        let mut form = FormInstance::from_data(&data);
        form.set_disabled(true);
        Ok(Self { record, form })
    }

    /// Server id of the record.
    pub fn id(&self) -> &RecordId {
        &self.record.id
    }

    /// Category of the record.
    pub fn category(&self) -> ExperienceCategory {
        self.record.category
    }

    /// The record as last received from the server.
    pub fn record(&self) -> &ExperienceResponse {
        &self.record
    }

    /// The underlying form.
    pub fn form(&self) -> &FormInstance {
        &self.form
    }

    /// Mutable access to the underlying form (e.g. to expand skill details).
    pub fn form_mut(&mut self) -> &mut FormInstance {
        &mut self.form
    }

    /// Returns true while in edit mode.
    pub fn is_editing(&self) -> bool {
        !self.form.is_disabled()
    }

    /// Enters edit mode.
    pub fn begin_edit(&mut self) {
        self.form.set_disabled(false);
    }

    /// Applies one change to the form.
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::FormDisabled`] outside edit mode.
    pub fn apply(&mut self, change: FieldChange) -> Result<()> {
        self.form.apply(change)
    }

    /// Validates against today's date and saves. See [`save_at`](Self::save_at).
    pub async fn save(
        &mut self,
        api: &dyn ExperienceApi,
        notifier: &dyn Notifier,
    ) -> Result<SaveOutcome> {
        self.save_at(Local::now().date_naive(), api, notifier).await
    }

    /// Validates against `today` and, if valid, sends the update.
    ///
    /// # Errors
    ///
    /// - [`FormsError::FormDisabled`] outside edit mode
    /// - [`FormsError::Api`] if the request failed; edit mode is kept
    #[instrument(skip(self, api, notifier), fields(id = %self.record.id))]
    pub async fn save_at(
        &mut self,
        today: NaiveDate,
        api: &dyn ExperienceApi,
        notifier: &dyn Notifier,
    ) -> Result<SaveOutcome> {
        if !self.is_editing() {
            return Err(FormsError::FormDisabled);
        }

        let Some(data) = self.form.validate_at(today) else {
            notifier.error(SAVE_INVALID_TITLE, None);
            return Ok(SaveOutcome::Invalid);
        };

        let experience = form_to_experience(&data);
        let updated = match api.update_experience(&self.record.id, &experience).await {
            Ok(updated) => updated,
            Err(err) => {
                warn!(error = %err, "update failed");
                notifier.error(SAVE_ERROR_TITLE, Some(&err.message));
                return Err(err.into());
            }
        };

        let baseline = match response_to_form(&updated) {
            Ok(stored) => FormValues::from(&stored),
            Err(err) => {
                warn!(error = %err, "stored record unreadable, keeping submitted values");
                FormValues::from(&data)
            }
        };
        self.record = updated;
        self.form.reset_to(baseline);
        self.form.set_disabled(true);

        info!("experience updated");
        notifier.success(SAVE_SUCCESS_TITLE, None);
        Ok(SaveOutcome::Saved)
    }

    /// Drops unsaved edits and leaves edit mode.
    pub fn cancel(&mut self) {
        self.form.reset();
        self.form.set_disabled(true);
    }
}
