//! The remote accessor seam.
//!
//! Form logic talks to a [`DoctorsRepository`] so it can run against the real
//! HTTP API or the in-memory backend without knowing which.

use async_trait::async_trait;
use thiserror::Error;

use crate::{DoctorId, DoctorPayload, DoctorRecord};

#[derive(Error, Debug)]
pub enum DoctorsApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("No API token available")]
    MissingToken,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, DoctorsApiError>;

/// Reads return `Ok(None)` when the server answers with `status: false`.
/// Writes succeed on any 2xx reply.
#[async_trait]
pub trait DoctorsRepository: Send + Sync {
    /// `GET /doctors`
    async fn list(&self) -> Result<Option<Vec<DoctorRecord>>>;

    /// `GET /doctors/{id}`
    async fn fetch_by_id(&self, id: DoctorId) -> Result<Option<DoctorRecord>>;

    /// `GET /doctors/byName?name=...`, exact match.
    async fn find_by_name(&self, name: &str) -> Result<Option<Vec<DoctorRecord>>>;

    /// `POST /doctors`
    async fn create_record(&self, payload: &DoctorPayload) -> Result<()>;

    /// `PUT /doctors/{id}`
    async fn update_record(&self, id: DoctorId, payload: &DoctorPayload) -> Result<()>;
}
