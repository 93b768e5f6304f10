//! Knowledge-base document list and upload state.

use tracing::warn;
use triagedesk_api::{Error as ApiError, KnowledgeDoc, UploadResponse};

use crate::feed::Severity;
use crate::sequence::{Sequence, Ticket};

/// Parameters of an issued upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Sequence ticket for this upload.
    pub ticket: Ticket,
    /// File name sent as the multipart field.
    pub filename: String,
}

/// Outcome of a finished upload, surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Server-supplied (or transport) message.
    pub message: String,
    /// Severity for the activity feed.
    pub severity: Severity,
}

/// Owner of the indexed-document list and the single upload slot.
#[derive(Debug, Default)]
pub struct KnowledgeController {
    docs: Vec<KnowledgeDoc>,
    error: Option<String>,
    is_loading: bool,
    loaded_once: bool,
    upload_busy: bool,
    list_seq: Sequence,
    upload_seq: Sequence,
}

impl KnowledgeController {
    /// Creates an empty controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for a document-list fetch.
    pub const fn begin_list(&mut self) -> Ticket {
        self.is_loading = true;
        self.list_seq.issue()
    }

    /// Applies a list-fetch completion.
    pub fn apply_list(&mut self, ticket: Ticket, result: Result<Vec<KnowledgeDoc>, ApiError>) {
        if !self.list_seq.is_current(ticket) {
            return;
        }
        self.is_loading = false;
        self.loaded_once = true;

        match result {
            Ok(docs) => {
                self.docs = docs;
                self.error = None;
            }
            Err(e) => {
                warn!("knowledge list fetch failed: {e}");
                self.error = Some(e.user_message());
            }
        }
    }

    /// Starts an upload.
    ///
    /// Guards against a missing file (`None` for an empty name) and
    /// rejects a second upload while one is in flight.
    pub fn begin_upload(&mut self, filename: &str) -> Option<UploadRequest> {
        if filename.is_empty() {
            warn!("upload rejected: no file selected");
            return None;
        }
        if self.upload_busy {
            warn!("upload rejected: another upload is in flight");
            return None;
        }

        self.upload_busy = true;
        Some(UploadRequest {
            ticket: self.upload_seq.issue(),
            filename: filename.to_string(),
        })
    }

    /// Applies an upload completion.
    ///
    /// The drop surface is restored either way, and the caller must reload
    /// the list unconditionally and surface the returned message.
    pub fn apply_upload(
        &mut self,
        ticket: Ticket,
        result: Result<UploadResponse, ApiError>,
    ) -> Option<UploadOutcome> {
        if !self.upload_seq.is_current(ticket) {
            return None;
        }
        self.upload_busy = false;

        Some(match result {
            Ok(response) => UploadOutcome {
                severity: if response.status == "success" {
                    Severity::Success
                } else {
                    Severity::Danger
                },
                message: response.message,
            },
            Err(e) => {
                warn!("knowledge upload failed: {e}");
                UploadOutcome {
                    message: e.user_message(),
                    severity: Severity::Danger,
                }
            }
        })
    }

    /// Whether an upload is in flight (busy indicator replaces the drop
    /// surface while `true`).
    #[must_use]
    pub const fn upload_busy(&self) -> bool {
        self.upload_busy
    }

    /// Projects the document list.
    #[must_use]
    pub fn view(&self) -> KnowledgeView<'_> {
        if let Some(error) = &self.error {
            return KnowledgeView::Failed(error);
        }
        if self.is_loading && !self.loaded_once {
            return KnowledgeView::Loading;
        }
        if self.docs.is_empty() {
            return KnowledgeView::Empty;
        }
        KnowledgeView::Docs(&self.docs)
    }
}

/// Projection of the knowledge table.
#[derive(Debug, PartialEq)]
pub enum KnowledgeView<'a> {
    /// Initial fetch still in flight.
    Loading,
    /// Explicit empty-state row.
    Empty,
    /// Explicit error row.
    Failed(&'a str),
    /// Indexed documents.
    Docs(&'a [KnowledgeDoc]),
}
