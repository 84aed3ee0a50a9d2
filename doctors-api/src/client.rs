use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::repository::{DoctorsApiError, DoctorsRepository, Result};
use crate::{
    ApiEnvelope, CredentialSource, DoctorId, DoctorPayload, DoctorRecord, SaveDoctorRequest,
};

/// Header the API reads the token from.
const TOKEN_HEADER: &str = "token";

/// HTTP implementation of [`DoctorsRepository`].
#[derive(Clone)]
pub struct DoctorsClient {
    client: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialSource>,
}

impl DoctorsClient {
    pub fn new(base_url: &str, credentials: Arc<dyn CredentialSource>) -> Result<Self> {
        // A trailing slash keeps any path prefix when joining endpoints.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| DoctorsApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder()
            .build()
            .map_err(|e| DoctorsApiError::ResponseError(format!("Failed to build client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| DoctorsApiError::InvalidUrl(format!("{}: {}", path, e)))
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self
            .credentials
            .token()
            .ok_or(DoctorsApiError::MissingToken)?;
        Ok(request.header(TOKEN_HEADER, token))
    }

    #[tracing::instrument(name = "doctors_api", skip(self, request))]
    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response> {
        let response = self
            .authorize(request)?
            .send()
            .await
            .map_err(|e| DoctorsApiError::ResponseError(format!("Failed to call {call_name}: {e}")))?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            tracing::warn!(status = %response.status(), "request rejected by API");
            return Err(DoctorsApiError::Unauthorized);
        }

        if let Err(e) = response.error_for_status_ref() {
            return Err(DoctorsApiError::ResponseError(format!(
                "{call_name} returned error: {e}"
            )));
        }

        Ok(response)
    }

    async fn get_envelope<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<Option<T>> {
        let response = self.send(request, call_name).await?;
        let envelope = response
            .json::<ApiEnvelope<serde_json::Value>>()
            .await
            .map_err(|e| {
                DoctorsApiError::ParsingError(format!("Failed to parse {call_name} response: {e}"))
            })?;

        if !envelope.status {
            tracing::debug!(call_name, "API answered with status false");
        }

        envelope
            .into_result()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| {
                DoctorsApiError::ParsingError(format!("Unexpected {call_name} payload: {e}"))
            })
    }

    /// Writes only care about the status, but the body must still arrive
    /// in full.
    async fn send_without_body(&self, request: RequestBuilder, call_name: &str) -> Result<()> {
        self.send(request, call_name)
            .await?
            .bytes()
            .await
            .map_err(|e| {
                DoctorsApiError::ResponseError(format!("Failed to read {call_name} response: {e}"))
            })?;
        Ok(())
    }
}

#[async_trait]
impl DoctorsRepository for DoctorsClient {
    async fn list(&self) -> Result<Option<Vec<DoctorRecord>>> {
        self.get_envelope(self.client.get(self.endpoint("doctors")?), "GET /doctors")
            .await
    }

    async fn fetch_by_id(&self, id: DoctorId) -> Result<Option<DoctorRecord>> {
        self.get_envelope(
            self.client.get(self.endpoint(&format!("doctors/{}", id))?),
            "GET /doctors/{id}",
        )
        .await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Vec<DoctorRecord>>> {
        self.get_envelope(
            self.client
                .get(self.endpoint("doctors/byName")?)
                .query(&[("name", name)]),
            "GET /doctors/byName",
        )
        .await
    }

    async fn create_record(&self, payload: &DoctorPayload) -> Result<()> {
        self.send_without_body(
            self.client
                .post(self.endpoint("doctors")?)
                .json(&SaveDoctorRequest { data: payload }),
            "POST /doctors",
        )
        .await
    }

    async fn update_record(&self, id: DoctorId, payload: &DoctorPayload) -> Result<()> {
        self.send_without_body(
            self.client
                .put(self.endpoint(&format!("doctors/{}", id))?)
                .json(&SaveDoctorRequest { data: payload }),
            "PUT /doctors/{id}",
        )
        .await
    }
}
