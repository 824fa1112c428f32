//! The network collaborator.
//!
//! The crate never talks HTTP itself. Applications implement
//! [`ExperienceApi`] on top of their client of choice; the wire shapes it
//! exchanges are defined here so every implementation agrees on them.
//!
//! | Operation | Method | Path | Body |
//! |-----------|--------|------|------|
//! | list | `GET` | `/experiences` | n/a |
//! | batch create | `POST` | `/experiences/batch` | [`BatchRequest`] |
//! | update | `PATCH` | `/experiences/{id}` | [`Experience`] |
//!
//! Every response is wrapped in an [`ApiResponse`] envelope.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::experience::{Experience, ExperienceResponse};
use crate::types::RecordId;

/// Remote store of persisted experiences.
///
/// Implementations must be cheap to share; controllers take `&dyn
/// ExperienceApi`.
#[async_trait]
pub trait ExperienceApi: Send + Sync {
    /// Lists every experience of the signed-in user.
    async fn list_experiences(&self) -> Result<Vec<ExperienceResponse>, ApiError>;

    /// Creates all `experiences` in one request.
    ///
    /// The server either stores all of them or none.
    async fn create_experiences_batch(&self, experiences: &[Experience]) -> Result<(), ApiError>;

    /// Replaces the experience `id` and returns the stored record.
    async fn update_experience(
        &self,
        id: &RecordId,
        experience: &Experience,
    ) -> Result<ExperienceResponse, ApiError>;
}

/// Response envelope used by every endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Payload.
    pub data: T,
    /// Optional server message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// HTTP status echoed by the server.
    pub status_code: u16,
}

impl<T> ApiResponse<T> {
    /// Unwraps the payload, turning non-2xx statuses into an [`ApiError`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::from_status`] with the envelope's message when the
    /// status is outside `200..300`.
    pub fn into_result(self) -> Result<T, ApiError> {
        if (200..300).contains(&self.status_code) {
            Ok(self.data)
        } else {
            Err(ApiError::from_status(
                self.status_code,
                self.message.as_deref(),
            ))
        }
    }
}

/// Body of the batch-create request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Records to create, in submission order.
    pub experiences: Vec<Experience>,
}

impl BatchRequest {
    /// Wraps the records.
    pub fn new(experiences: Vec<Experience>) -> Self {
        Self { experiences }
    }
}
