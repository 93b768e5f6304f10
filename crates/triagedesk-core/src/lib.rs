//! # triagedesk-core
//!
//! Client-side view-state machine for the `TriageDesk` email-triage
//! dashboard.
//!
//! This crate provides:
//! - Per-section controllers owning explicit state (no free-standing
//!   globals): status poller, email list, email detail modal,
//!   knowledge base, settings form
//! - Monotonic request sequencing so stale completions never overwrite
//!   newer state
//! - A bounded activity feed
//! - The [`Dashboard`] driver that wires controllers to the REST client
//!   and a render projection gated on the active tab
//!
//! Controllers never perform I/O themselves: each operation is a
//! `begin_*` call that validates and issues a ticket, followed by an
//! `apply_*` call with the completion. That keeps every state transition
//! synchronously testable.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod app;
pub mod email_detail;
pub mod email_list;
pub mod feed;
pub mod knowledge;
mod sequence;
pub mod settings;
pub mod status;
pub mod tabs;

pub use app::{Dashboard, DashboardView, EmailsSection, KnowledgeSection, STATUS_POLL_SECS};
pub use email_detail::{DetailEffect, DetailView, EmailDetailController, Language, Phase};
pub use email_list::{EmailListController, ListView, PAGE_LIMIT, PageRequest};
pub use feed::{EventFeed, FeedEntry, Severity};
pub use knowledge::{KnowledgeController, KnowledgeView, UploadOutcome};
pub use sequence::{Sequence, Ticket};
pub use settings::{PASSWORD_MASK, SettingsController, SettingsView};
pub use status::{StatusPoller, StatusView};
pub use tabs::{Tab, TabRouter};
