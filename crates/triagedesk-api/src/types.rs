//! Wire types for the backend REST contract.
//!
//! Request and response shapes are a fixed contract; fields the dashboard
//! does not consume are simply not modelled.

use serde::{Deserialize, Serialize};

/// Identifier of an email item on the mail server.
///
/// Exchange item identifiers are opaque strings and may contain `/`, so
/// they must be placed into URL paths as a single encoded segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailId(pub String);

impl EmailId {
    /// Creates a new email identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the paginated email listing.
///
/// Only these fields are guaranteed by the listing; bodies and AI fields
/// require a single-item fetch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmailSummary {
    /// Item identifier.
    pub id: EmailId,
    /// Sender address or display name.
    pub sender: String,
    /// Subject line.
    pub subject: String,
    /// Date as a preformatted string.
    pub date: String,
    /// Server-owned read flag.
    pub is_read: bool,
}

/// Full email record from the single-item fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailDetail {
    /// Item identifier.
    pub id: EmailId,
    /// Sender address or display name.
    pub sender: String,
    /// Subject line.
    pub subject: String,
    /// Date as a preformatted string.
    pub date: String,
    /// Message body.
    #[serde(default)]
    pub body: String,
    /// Server-owned read flag.
    pub is_read: bool,
    /// Previously stored AI answer, if the backend has one.
    #[serde(default)]
    pub ai_response: Option<String>,
}

/// A page window of the email list.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailPage {
    /// Rows in this window.
    pub emails: Vec<EmailSummary>,
    /// Authoritative total count for page-count computation.
    pub total: u64,
    /// Window offset.
    #[serde(default)]
    pub offset: u64,
    /// Window size.
    #[serde(default)]
    pub limit: u64,
}

/// The email the backend reports as currently being processed.
#[derive(Debug, Clone, Deserialize)]
pub struct FocusedEmail {
    /// Subject line.
    pub subject: String,
    /// Sender address or display name.
    pub sender: String,
    /// Date as a preformatted string.
    pub date: String,
}

/// Connector/process status snapshot, replaced wholesale every poll.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusSnapshot {
    /// Number of emails processed so far.
    #[serde(default)]
    pub emails_processed: u64,
    /// Textual process status.
    #[serde(default)]
    pub status: String,
    /// Whether the Exchange connector is up.
    #[serde(default)]
    pub exchange_connected: bool,
    /// Connector account, when connected.
    #[serde(default)]
    pub exchange_user: Option<String>,
    /// Email currently being processed, if any.
    #[serde(default)]
    pub current_email: Option<FocusedEmail>,
    /// Most recent backend error, if any.
    #[serde(default)]
    pub last_error: Option<String>,
}

/// Request body for AI draft generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Target email identifier.
    pub item_id: EmailId,
    /// Free-text instruction for the model.
    pub custom_prompt: String,
    /// Target language selector (`es`, `en` or `both`).
    pub language: String,
}

/// Response to an AI draft generation request.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Application status (`success` or an error code).
    pub status: String,
    /// Generated reply text, present on success.
    #[serde(default)]
    pub ai_response: Option<String>,
    /// Error detail, present on failure.
    #[serde(default)]
    pub message: Option<String>,
}

/// Request body for persisting a reviewed draft.
#[derive(Debug, Clone, Serialize)]
pub struct SaveDraftRequest {
    /// Target email identifier.
    pub item_id: EmailId,
    /// Draft text to store on the mail server.
    pub body: String,
}

/// Generic `{status, message}` response for mutating actions.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionResponse {
    /// Application status (`success` or an error code).
    pub status: String,
    /// Human-readable message from the backend.
    #[serde(default)]
    pub message: Option<String>,
}

/// An indexed knowledge-base document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KnowledgeDoc {
    /// Original file name.
    pub filename: String,
    /// Index timestamp as a preformatted string.
    #[serde(default)]
    pub created_at: String,
}

/// Result of a knowledge-base upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    /// Application status (`success` or an error code).
    #[serde(default = "default_status")]
    pub status: String,
    /// Indexing outcome message to surface to the user.
    #[serde(default)]
    pub message: String,
}

fn default_status() -> String {
    "success".to_string()
}

/// Connector/AI configuration as read from the backend.
///
/// `exchange_pass` arrives sentinel-masked and is never usable as a
/// credential on the client side.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigRecord {
    /// Exchange account.
    #[serde(default)]
    pub exchange_user: String,
    /// Exchange server host.
    #[serde(default)]
    pub exchange_server: String,
    /// Exchange user principal name.
    #[serde(default)]
    pub exchange_upn: String,
    /// Masked password placeholder, or empty when unset.
    #[serde(default)]
    pub exchange_pass: String,
    /// Inference thread count.
    #[serde(default = "default_threads")]
    pub ai_threads: u32,
    /// Sampling temperature.
    #[serde(default = "default_temp")]
    pub ai_temp: f32,
}

const fn default_threads() -> u32 {
    4
}

const fn default_temp() -> f32 {
    0.1
}

impl Default for ConfigRecord {
    fn default() -> Self {
        Self {
            exchange_user: String::new(),
            exchange_server: String::new(),
            exchange_upn: String::new(),
            exchange_pass: String::new(),
            ai_threads: default_threads(),
            ai_temp: default_temp(),
        }
    }
}

/// Configuration update submitted to the backend.
///
/// `exchange_pass: None` signals "do not change the stored password".
#[derive(Debug, Clone, Serialize)]
pub struct ConfigUpdate {
    /// Exchange account.
    pub exchange_user: String,
    /// Exchange server host.
    pub exchange_server: String,
    /// Exchange user principal name.
    pub exchange_upn: String,
    /// New password, or `None` to keep the stored one.
    pub exchange_pass: Option<String>,
    /// Inference thread count.
    pub ai_threads: u32,
    /// Sampling temperature.
    pub ai_temp: f32,
}

/// Health probe response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    /// Should be `ok`.
    pub status: String,
    /// Reporting service name.
    #[serde(default)]
    pub service: String,
}
