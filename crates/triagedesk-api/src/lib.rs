//! # triagedesk-api
//!
//! Typed client for the email-triage backend REST contract.
//!
//! This crate provides:
//! - Wire types for every endpoint the dashboard consumes
//! - [`ApiClient`], a thin `reqwest` wrapper, one method per endpoint
//! - An error taxonomy separating transport failures from well-formed
//!   responses that signal application failure
//!
//! The contract is fixed: `/api/status`, `/api/emails`, `/api/emails/{id}`,
//! `/api/emails/generate-answer`, `/api/emails/save-draft`,
//! `/api/emails/{id}/read`, `/api/knowledge`, `/api/knowledge/upload`,
//! `/api/config` and `/api/health`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::{Error, Result};
pub use types::{
    ActionResponse, ConfigRecord, ConfigUpdate, EmailDetail, EmailId, EmailPage, EmailSummary,
    FocusedEmail, GenerateRequest, GenerateResponse, HealthResponse, KnowledgeDoc,
    SaveDraftRequest, StatusSnapshot, UploadResponse,
};
