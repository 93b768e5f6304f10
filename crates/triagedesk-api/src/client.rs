//! HTTP client for the backend REST contract.

use reqwest::multipart::{Form, Part};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::types::{
    ActionResponse, ConfigRecord, ConfigUpdate, EmailDetail, EmailId, EmailPage, GenerateRequest,
    HealthResponse, KnowledgeDoc, SaveDraftRequest, StatusSnapshot, UploadResponse,
};

/// Client for the email-triage backend.
///
/// One instance is shared by all controllers; every method maps to exactly
/// one endpoint of the contract. Methods never retry on their own.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid absolute URL that can
    /// carry path segments.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base,
            http: reqwest::Client::new(),
        })
    }

    /// Builds an endpoint URL from path segments.
    ///
    /// Segments are appended one at a time so item identifiers containing
    /// `/` end up percent-encoded inside a single segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Maps a non-2xx HTTP status to an error.
    fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Error::UnexpectedStatus(response.status()))
        }
    }

    /// Probes `GET /api/health`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self.http.get(self.endpoint(&["api", "health"])).send().await?;
        Ok(Self::check(response)?.json().await?)
    }

    /// Fetches the connector/process status snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn status(&self) -> Result<StatusSnapshot> {
        let response = self.http.get(self.endpoint(&["api", "status"])).send().await?;
        Ok(Self::check(response)?.json().await?)
    }

    /// Fetches one page window of the email list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn list_emails(&self, offset: u64, limit: u64) -> Result<EmailPage> {
        debug!(offset, limit, "fetching email page");
        let response = self
            .http
            .get(self.endpoint(&["api", "emails"]))
            .query(&[("offset", offset), ("limit", limit)])
            .send()
            .await?;
        Ok(Self::check(response)?.json().await?)
    }

    /// Fetches the full record of a single email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn email(&self, id: &EmailId) -> Result<EmailDetail> {
        debug!(id = %id, "fetching email detail");
        let response = self
            .http
            .get(self.endpoint(&["api", "emails", id.as_str()]))
            .send()
            .await?;
        Ok(Self::check(response)?.json().await?)
    }

    /// Requests an AI-generated reply and returns the draft text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Application`] when the backend reports a
    /// non-success status or an empty answer, and a transport error when
    /// the request itself fails.
    pub async fn generate_answer(&self, request: &GenerateRequest) -> Result<String> {
        debug!(id = %request.item_id, language = %request.language, "generating answer");
        let response = self
            .http
            .post(self.endpoint(&["api", "emails", "generate-answer"]))
            .json(request)
            .send()
            .await?;

        let body: crate::types::GenerateResponse = Self::check(response)?.json().await?;
        if body.status != "success" {
            let message = body.message.unwrap_or_else(|| "generation failed".to_string());
            return Err(Error::application(body.status, message));
        }
        body.ai_response
            .filter(|text| !text.is_empty())
            .ok_or_else(|| Error::application("error", "generation returned no response"))
    }

    /// Persists a reviewed draft to the mail server.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Application`] on a non-success status and a
    /// transport error when the request itself fails.
    pub async fn save_draft(&self, request: &SaveDraftRequest) -> Result<ActionResponse> {
        debug!(id = %request.item_id, "saving draft");
        let response = self
            .http
            .post(self.endpoint(&["api", "emails", "save-draft"]))
            .json(request)
            .send()
            .await?;

        let body: ActionResponse = Self::check(response)?.json().await?;
        if body.status == "success" {
            Ok(body)
        } else {
            let message = body.message.unwrap_or_default();
            Err(Error::application(body.status, message))
        }
    }

    /// Marks an email as read. Only the HTTP status code is meaningful.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is non-2xx.
    pub async fn mark_read(&self, id: &EmailId) -> Result<()> {
        debug!(id = %id, "marking email read");
        let response = self
            .http
            .patch(self.endpoint(&["api", "emails", id.as_str(), "read"]))
            .query(&[("read", true)])
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }

    /// Deletes an email. Only the HTTP status code is meaningful.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is non-2xx.
    pub async fn delete_email(&self, id: &EmailId) -> Result<()> {
        debug!(id = %id, "deleting email");
        let response = self
            .http
            .delete(self.endpoint(&["api", "emails", id.as_str()]))
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }

    /// Lists indexed knowledge-base documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn knowledge(&self) -> Result<Vec<KnowledgeDoc>> {
        let response = self.http.get(self.endpoint(&["api", "knowledge"])).send().await?;
        Ok(Self::check(response)?.json().await?)
    }

    /// Uploads a knowledge-base document as multipart field `file`.
    ///
    /// The response is returned whether the backend reports success or
    /// failure; the caller surfaces the message either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn upload_knowledge(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadResponse> {
        debug!(filename, size = bytes.len(), "uploading knowledge document");
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);
        let response = self
            .http
            .post(self.endpoint(&["api", "knowledge", "upload"]))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(response)?.json().await?)
    }

    /// Fetches the connector/AI configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn get_config(&self) -> Result<ConfigRecord> {
        let response = self.http.get(self.endpoint(&["api", "config"])).send().await?;
        Ok(Self::check(response)?.json().await?)
    }

    /// Persists the connector/AI configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Application`] on a non-success status and a
    /// transport error when the request itself fails.
    pub async fn set_config(&self, update: &ConfigUpdate) -> Result<ActionResponse> {
        debug!(user = %update.exchange_user, "saving configuration");
        let response = self
            .http
            .post(self.endpoint(&["api", "config"]))
            .json(update)
            .send()
            .await?;

        let body: ActionResponse = Self::check(response)?.json().await?;
        if body.status == "success" {
            Ok(body)
        } else {
            let message = body.message.unwrap_or_default();
            Err(Error::application(body.status, message))
        }
    }
}
