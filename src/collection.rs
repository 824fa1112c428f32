//! The form collection controller.
//!
//! Owns an ordered list of heterogeneous form instances and submits them as
//! one all-or-nothing batch.
//!
//! # Submit flow
//!
//! ```text
//! submit_all()
//!   ├── empty?                      → Ok(Empty), no request
//!   ├── validate each, in order     (awaited one by one)
//!   ├── any failed?                 → Err(BatchValidation), no request
//!   ├── transform payloads          → Vec<Experience>
//!   ├── mark submitted forms        (edits to them rejected until done)
//!   ├── create_experiences_batch()
//!   │     ├── Ok  → drop submitted forms, success toast, Ok(Submitted)
//!   │     └── Err → error toast, forms kept, Err(Api)
//!   └── in-flight flag cleared on every path
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::api::ExperienceApi;
use crate::config::Config;
use crate::error::{FormFailure, FormsError, NotFoundError, Result, ValidationError};
use crate::experience::{ExperienceCategory, ExperienceFormData};
use crate::form::{ExperienceForm, FieldChange, FormInstance};
use crate::notify::Notifier;
use crate::transform::forms_to_experiences;
use crate::types::FormInstanceId;

/// Toast shown after a successful batch.
pub const SUBMIT_SUCCESS_TITLE: &str = "Experiences created successfully";

/// Toast shown when the batch request fails.
pub const SUBMIT_ERROR_TITLE: &str = "An error occurred while creating experiences";

/// Public view of one pending form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FormEntry {
    /// Instance id.
    pub id: FormInstanceId,
    /// Category of the instance.
    pub category: ExperienceCategory,
}

impl FormEntry {
    /// Returns the display key, `<category>-<id>`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FormEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category, self.id)
    }
}

/// Result of a batch submit that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The collection was empty; nothing was sent.
    Empty,
    /// Every submitted form was created and removed from the collection.
    Submitted {
        /// Number of records created.
        count: usize,
    },
}

struct Slot {
    id: FormInstanceId,
    category: ExperienceCategory,
    form: Box<dyn ExperienceForm>,
    /// Part of the batch currently awaiting the API.
    sent: bool,
}

/// Clears the in-flight flag when dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| FormsError::SubmitInFlight)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Ordered collection of pending experience forms.
///
/// `FormCollection` is `Send + Sync`; share it behind an `Arc` between the
/// widgets that edit forms and the button that submits them.
///
/// # Example
/// ```rust,ignore
/// let forms = FormCollection::new();
/// let id = forms.add(ExperienceCategory::Project).await?;
/// forms.apply(id, FieldChange::Title("Portfolio Site".into())).await?;
/// // ...
/// match forms.submit_all(&api, &TracingNotifier).await? {
///     SubmitOutcome::Submitted { count } => println!("created {count}"),
///     SubmitOutcome::Empty => {}
/// }
/// ```
pub struct FormCollection {
    config: Config,
    slots: Mutex<Vec<Slot>>,
    in_flight: AtomicBool,
}

impl Default for FormCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FormCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormCollection")
            .field("config", &self.config)
            .field("in_flight", &self.is_submitting())
            .finish_non_exhaustive()
    }
}

impl FormCollection {
    /// Creates an empty collection with default settings.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            slots: Mutex::new(Vec::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Creates an empty collection with custom settings.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `config` is invalid.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Appends an empty form of `category` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::TooManyItems` once `max_forms` is reached.
    pub async fn add(&self, category: ExperienceCategory) -> Result<FormInstanceId> {
        self.attach(Box::new(FormInstance::new(category))).await
    }

    /// Appends a caller-built form and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::TooManyItems` once `max_forms` is reached.
    pub async fn attach(&self, form: Box<dyn ExperienceForm>) -> Result<FormInstanceId> {
        let mut slots = self.slots.lock().await;
        if slots.len() >= self.config.max_forms {
            return Err(ValidationError::too_many_items(
                "forms",
                slots.len() + 1,
                self.config.max_forms,
            )
            .into());
        }

        let id = FormInstanceId::new();
        let category = form.category();
        slots.push(Slot {
            id,
            category,
            form,
            sent: false,
        });
        info!(%id, %category, total = slots.len(), "form added");
        Ok(id)
    }

    /// Removes the form `id`. Returns false if it was not present.
    pub async fn remove(&self, id: FormInstanceId) -> bool {
        let mut slots = self.slots.lock().await;
        let before = slots.len();
        slots.retain(|slot| slot.id != id);
        before != slots.len()
    }

    /// Removes every form.
    pub async fn clear(&self) {
        self.slots.lock().await.clear();
    }

    /// Number of pending forms.
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    /// Returns true if no form is pending.
    pub async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }

    /// Lists the pending forms in insertion order.
    pub async fn entries(&self) -> Vec<FormEntry> {
        self.slots
            .lock()
            .await
            .iter()
            .map(|slot| FormEntry {
                id: slot.id,
                category: slot.category,
            })
            .collect()
    }

    /// Runs `f` against the form `id`.
    ///
    /// # Errors
    ///
    /// - `NotFoundError::Form` if no such form is pending
    /// - [`FormsError::SubmitInFlight`] if the form is part of a batch that
    ///   is waiting for the API
    pub async fn with_form<R>(
        &self,
        id: FormInstanceId,
        f: impl FnOnce(&mut dyn ExperienceForm) -> R,
    ) -> Result<R> {
        let mut slots = self.slots.lock().await;
        let slot = self.editable_slot(&mut slots, id)?;
        Ok(f(slot.form.as_mut()))
    }

    /// Validates the form `id` on its own, showing its field errors.
    ///
    /// Returns the typed payload, or `None` if the form has errors.
    ///
    /// # Errors
    ///
    /// Same as [`with_form`](Self::with_form).
    pub async fn validate(&self, id: FormInstanceId) -> Result<Option<ExperienceFormData>> {
        let mut slots = self.slots.lock().await;
        let slot = self.editable_slot(&mut slots, id)?;
        Ok(slot.form.validate_and_get_values().await)
    }

    fn editable_slot<'s>(&self, slots: &'s mut [Slot], id: FormInstanceId) -> Result<&'s mut Slot> {
        let in_flight = self.is_submitting();
        let slot = slots
            .iter_mut()
            .find(|slot| slot.id == id)
            .ok_or_else(|| NotFoundError::form(id))?;
        // `sent` can be stale after a cancelled submit; it only counts in flight
        if slot.sent && in_flight {
            return Err(FormsError::SubmitInFlight);
        }
        Ok(slot)
    }

    /// Routes one widget change to the form `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::Form` for an unknown id,
    /// [`FormsError::SubmitInFlight`] for a form awaiting the API, or whatever
    /// the form itself rejects the change with.
    pub async fn apply(&self, id: FormInstanceId, change: FieldChange) -> Result<()> {
        self.with_form(id, |form| form.apply(change)).await?
    }

    /// Returns true while a batch submit is running.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validates every form and, if all pass, creates them in one request.
    ///
    /// Forms are validated in insertion order, one at a time. If any fails,
    /// nothing is sent and the error lists every failing form; the forms keep
    /// their values and now carry their field errors.
    ///
    /// While the request is pending the submitted forms reject edits and
    /// single-form validation with [`FormsError::SubmitInFlight`]. Forms
    /// added meanwhile are not part of the batch. On success only the submitted forms are removed;
    /// the late additions stay. On an API error every form is kept and
    /// editable again.
    ///
    /// # Errors
    ///
    /// - [`FormsError::SubmitInFlight`] if another submit is running
    /// - [`FormsError::BatchValidation`] if any form is invalid
    /// - [`FormsError::Api`] if the request failed
    #[instrument(skip_all)]
    pub async fn submit_all(
        &self,
        api: &dyn ExperienceApi,
        notifier: &dyn Notifier,
    ) -> Result<SubmitOutcome> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let mut submitted = Vec::new();
        let mut payloads = Vec::new();
        let mut failures = Vec::new();
        {
            let mut slots = self.slots.lock().await;
            if slots.is_empty() {
                return Ok(SubmitOutcome::Empty);
            }

            for slot in slots.iter_mut() {
                slot.sent = false;
                match slot.form.validate_and_get_values().await {
                    Some(data) => {
                        submitted.push(slot.id);
                        payloads.push(data);
                    }
                    None => failures.push(FormFailure {
                        id: slot.id,
                        category: slot.category,
                    }),
                }
            }

            if failures.is_empty() {
                for slot in slots.iter_mut() {
                    slot.sent = true;
                }
            }
        }

        if !failures.is_empty() {
            for failure in &failures {
                warn!("{}", failure);
            }
            return Err(FormsError::BatchValidation { failures });
        }

        let experiences = forms_to_experiences(&payloads);
        match api.create_experiences_batch(&experiences).await {
            Ok(()) => {
                self.slots
                    .lock()
                    .await
                    .retain(|slot| !submitted.contains(&slot.id));
                info!(count = experiences.len(), "experiences created");
                notifier.success(SUBMIT_SUCCESS_TITLE, None);
                Ok(SubmitOutcome::Submitted {
                    count: experiences.len(),
                })
            }
            Err(err) => {
                for slot in self.slots.lock().await.iter_mut() {
                    slot.sent = false;
                }
                warn!(error = %err, "batch create failed");
                notifier.error(SUBMIT_ERROR_TITLE, Some(&err.message));
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_entry_key() {
        let entry = FormEntry {
            id: FormInstanceId::nil(),
            category: ExperienceCategory::Academic,
        };
        assert_eq!(entry.key(), "academic-00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_in_flight_guard_is_exclusive() {
        let flag = AtomicBool::new(false);
        let guard = InFlightGuard::acquire(&flag).unwrap();
        assert!(matches!(
            InFlightGuard::acquire(&flag),
            Err(FormsError::SubmitInFlight)
        ));
        drop(guard);
        assert!(!flag.load(Ordering::Acquire));
        assert!(InFlightGuard::acquire(&flag).is_ok());
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let err = FormCollection::with_config(Config {
            max_forms: 0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_max_forms_enforced() {
        let forms = FormCollection::with_config(Config {
            max_forms: 2,
            ..Default::default()
        })
        .unwrap();
        forms.add(ExperienceCategory::Project).await.unwrap();
        forms.add(ExperienceCategory::Academic).await.unwrap();
        let err = forms.add(ExperienceCategory::Project).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(forms.len().await, 2);
    }

    #[tokio::test]
    async fn test_unknown_form_is_not_found() {
        let forms = FormCollection::new();
        let err = forms
            .apply(FormInstanceId::new(), FieldChange::Title("x".into()))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
