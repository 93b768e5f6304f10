//! Selected-email modal state machine.
//!
//! Owns the single selected email and its transient AI draft, and drives
//! the generate → review → save/discard sequence:
//!
//! ```text
//! Closed → Loading → Viewing → Generating → Reviewing
//!                        └──────────┬──────────┘
//!                  Saving | MarkingRead | Deleting → Closed
//! ```
//!
//! Every completion handler checks its sequence ticket, so a response for
//! a selection that has since moved on is discarded instead of mutating
//! the wrong state.

use tracing::{debug, warn};
use triagedesk_api::{
    ActionResponse, EmailDetail, EmailId, Error as ApiError, GenerateRequest, SaveDraftRequest,
};

use crate::sequence::{Sequence, Ticket};

/// Phase of the modal state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No email selected, modal hidden.
    #[default]
    Closed,
    /// Detail fetch in flight.
    Loading,
    /// Email shown, no draft yet.
    Viewing,
    /// AI generation in flight.
    Generating,
    /// Draft available for review.
    Reviewing,
    /// Save-draft request in flight.
    Saving,
    /// Mark-read request in flight.
    MarkingRead,
    /// Delete request in flight.
    Deleting,
}

impl Phase {
    /// Phases from which a user action may start a new request.
    const fn is_interactive(self) -> bool {
        matches!(self, Self::Viewing | Self::Reviewing)
    }
}

/// Target language for draft generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Spanish (backend default).
    #[default]
    Es,
    /// English.
    En,
    /// Both languages in one reply.
    Both,
}

impl Language {
    /// Wire value for the generation endpoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
            Self::Both => "both",
        }
    }
}

/// Follow-up work a completion requires from the surrounding driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEffect {
    /// Re-fetch the current list page so rows reflect server state.
    RefreshList,
    /// Surface a user-facing alert.
    Alert(String),
}

/// Parameters of an issued single-email request.
#[derive(Debug, Clone)]
pub struct DetailRequest {
    /// Sequence ticket for this request.
    pub ticket: Ticket,
    /// Target email identifier.
    pub id: EmailId,
}

/// State machine for the selected email and its AI draft.
#[derive(Debug, Default)]
pub struct EmailDetailController {
    phase: Phase,
    selected: Option<EmailDetail>,
    draft: Option<String>,
    inline_error: Option<String>,
    seq: Sequence,
}

impl EmailDetailController {
    /// Creates a closed controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Currently selected email, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&EmailDetail> {
        self.selected.as_ref()
    }

    /// Latest AI draft, unset until a generation completes.
    #[must_use]
    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    /// Starts opening an email, replacing any previous selection.
    ///
    /// Valid from `Closed`, `Viewing` and `Reviewing`; returns `None`
    /// while a request is in flight.
    pub fn open(&mut self, id: EmailId) -> Option<DetailRequest> {
        if !matches!(self.phase, Phase::Closed) && !self.phase.is_interactive() {
            debug!(phase = ?self.phase, "ignoring open while busy");
            return None;
        }

        self.selected = None;
        self.draft = None;
        self.inline_error = None;
        self.phase = Phase::Loading;
        Some(DetailRequest {
            ticket: self.seq.issue(),
            id,
        })
    }

    /// Applies the detail-fetch completion.
    ///
    /// On failure the modal closes again; there is no recovery UI beyond
    /// the log entry.
    pub fn apply_opened(&mut self, ticket: Ticket, result: Result<EmailDetail, ApiError>) {
        if !self.seq.is_current(ticket) {
            return;
        }

        match result {
            Ok(email) => {
                self.selected = Some(email);
                self.draft = None;
                self.inline_error = None;
                self.phase = Phase::Viewing;
            }
            Err(e) => {
                warn!("email detail fetch failed: {e}");
                self.reset();
            }
        }
    }

    /// Starts AI generation with a free-text instruction.
    ///
    /// Rejected while any request is in flight; re-entrant triggers get
    /// `None` instead of relying on a disabled control.
    pub fn begin_generate(
        &mut self,
        custom_prompt: &str,
        language: Language,
    ) -> Option<(Ticket, GenerateRequest)> {
        if !self.phase.is_interactive() {
            return None;
        }
        let email = self.selected.as_ref()?;

        self.phase = Phase::Generating;
        self.inline_error = None;
        Some((
            self.seq.issue(),
            GenerateRequest {
                item_id: email.id.clone(),
                custom_prompt: custom_prompt.to_string(),
                language: language.as_str().to_string(),
            },
        ))
    }

    /// Applies a generation completion.
    ///
    /// Success stores the text as the active draft and enters `Reviewing`;
    /// regeneration replaces the prior draft. Failure shows inline error
    /// text; a prior draft, when present, is preserved.
    pub fn apply_generated(&mut self, ticket: Ticket, result: Result<String, ApiError>) {
        if !self.seq.is_current(ticket) {
            debug!("discarding stale generation result");
            return;
        }
        if self.phase != Phase::Generating {
            return;
        }

        match result {
            Ok(text) => {
                self.draft = Some(text);
                self.inline_error = None;
                self.phase = Phase::Reviewing;
            }
            Err(e) => {
                warn!("draft generation failed: {e}");
                self.inline_error = Some(e.user_message());
                self.phase = if self.draft.is_some() {
                    Phase::Reviewing
                } else {
                    Phase::Viewing
                };
            }
        }
    }

    /// Starts persisting the reviewed draft.
    pub fn begin_save(&mut self) -> Option<(Ticket, SaveDraftRequest)> {
        if self.phase != Phase::Reviewing {
            return None;
        }
        let email = self.selected.as_ref()?;
        let body = self.draft.clone()?;

        self.phase = Phase::Saving;
        Some((
            self.seq.issue(),
            SaveDraftRequest {
                item_id: email.id.clone(),
                body,
            },
        ))
    }

    /// Applies a save-draft completion.
    ///
    /// Success closes the modal and asks for a list refresh; failure
    /// alerts and returns to `Reviewing` with the draft preserved.
    pub fn apply_saved(
        &mut self,
        ticket: Ticket,
        result: Result<ActionResponse, ApiError>,
    ) -> Vec<DetailEffect> {
        if !self.seq.is_current(ticket) {
            return Vec::new();
        }

        match result {
            Ok(_) => {
                self.reset();
                vec![DetailEffect::RefreshList]
            }
            Err(e) => {
                warn!("save draft failed: {e}");
                self.phase = Phase::Reviewing;
                vec![DetailEffect::Alert(format!(
                    "No se pudo guardar el borrador: {}",
                    e.user_message()
                ))]
            }
        }
    }

    /// Starts marking the selected email as read.
    pub fn begin_mark_read(&mut self) -> Option<DetailRequest> {
        if !self.phase.is_interactive() {
            return None;
        }
        let email = self.selected.as_ref()?;

        self.phase = Phase::MarkingRead;
        Some(DetailRequest {
            ticket: self.seq.issue(),
            id: email.id.clone(),
        })
    }

    /// Applies a mark-read completion.
    ///
    /// Always closes and refreshes, regardless of outcome; failure is
    /// logged only.
    pub fn apply_marked_read(
        &mut self,
        ticket: Ticket,
        result: Result<(), ApiError>,
    ) -> Vec<DetailEffect> {
        if !self.seq.is_current(ticket) {
            return Vec::new();
        }

        if let Err(e) = result {
            warn!("mark read failed: {e}");
        }
        self.reset();
        vec![DetailEffect::RefreshList]
    }

    /// Starts deleting the selected email.
    ///
    /// The destructive request is issued only with `confirmed == true`;
    /// declining leaves the state machine unchanged and sends nothing.
    pub fn begin_delete(&mut self, confirmed: bool) -> Option<DetailRequest> {
        if !confirmed || !self.phase.is_interactive() {
            return None;
        }
        let email = self.selected.as_ref()?;

        self.phase = Phase::Deleting;
        Some(DetailRequest {
            ticket: self.seq.issue(),
            id: email.id.clone(),
        })
    }

    /// Applies a delete completion: closes and refreshes either way,
    /// alerting on failure.
    pub fn apply_deleted(
        &mut self,
        ticket: Ticket,
        result: Result<(), ApiError>,
    ) -> Vec<DetailEffect> {
        if !self.seq.is_current(ticket) {
            return Vec::new();
        }

        let mut effects = Vec::new();
        if let Err(e) = result {
            warn!("delete failed: {e}");
            effects.push(DetailEffect::Alert(format!(
                "No se pudo eliminar el correo: {}",
                e.user_message()
            )));
        }
        self.reset();
        effects.push(DetailEffect::RefreshList);
        effects
    }

    /// Closes the modal without any network call.
    ///
    /// Valid (and idempotent) from `Viewing`, `Reviewing` and `Closed`;
    /// ignored while a request is in flight.
    pub fn close(&mut self) {
        match self.phase {
            Phase::Closed | Phase::Viewing | Phase::Reviewing => self.reset(),
            _ => debug!(phase = ?self.phase, "ignoring close while busy"),
        }
    }

    fn reset(&mut self) {
        self.phase = Phase::Closed;
        self.selected = None;
        self.draft = None;
        self.inline_error = None;
        // Supersede any in-flight completion for the old selection.
        self.seq.issue();
    }

    /// Projects the modal surface; `None` while closed or still loading.
    #[must_use]
    pub fn view(&self) -> Option<DetailView<'_>> {
        let email = self.selected.as_ref()?;
        let generate_label = match self.phase {
            Phase::Generating => "Generando...",
            _ if self.draft.is_some() => "Regenerar",
            _ => "Generar respuesta",
        };
        Some(DetailView {
            email,
            draft: self.draft.as_deref(),
            inline_error: self.inline_error.as_deref(),
            generate_label,
            generate_enabled: self.phase.is_interactive(),
            save_visible: self.draft.is_some() && self.phase != Phase::Generating,
            busy: !self.phase.is_interactive(),
        })
    }
}

/// Projection of the email modal.
#[derive(Debug)]
pub struct DetailView<'a> {
    /// Selected email record.
    pub email: &'a EmailDetail,
    /// Active draft text, if a generation has completed.
    pub draft: Option<&'a str>,
    /// Inline error shown in place of the draft panel.
    pub inline_error: Option<&'a str>,
    /// Label of the generate control.
    pub generate_label: &'static str,
    /// Whether the generate control accepts a click.
    pub generate_enabled: bool,
    /// Whether the save-draft affordance is visible.
    pub save_visible: bool,
    /// Whether any request is in flight for this modal.
    pub busy: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn detail(id: &str) -> EmailDetail {
        EmailDetail {
            id: EmailId::new(id),
            sender: "a@b.com".to_string(),
            subject: "Consulta".to_string(),
            date: "2026-08-27 09:15".to_string(),
            body: "Hola, tengo una duda.".to_string(),
            is_read: false,
            ai_response: None,
        }
    }

    fn opened(id: &str) -> EmailDetailController {
        let mut ctl = EmailDetailController::new();
        let request = ctl.open(EmailId::new(id)).unwrap();
        ctl.apply_opened(request.ticket, Ok(detail(id)));
        ctl
    }

    #[test]
    fn open_success_enters_viewing() {
        let ctl = opened("42");
        assert_eq!(ctl.phase(), Phase::Viewing);
        assert!(ctl.draft().is_none());
        let view = ctl.view().unwrap();
        assert!(!view.save_visible);
        assert_eq!(view.generate_label, "Generar respuesta");
    }

    #[test]
    fn open_failure_closes_modal() {
        let mut ctl = EmailDetailController::new();
        let request = ctl.open(EmailId::new("42")).unwrap();
        ctl.apply_opened(request.ticket, Err(ApiError::application("error", "not found")));

        assert_eq!(ctl.phase(), Phase::Closed);
        assert!(ctl.view().is_none());
    }

    #[test]
    fn generate_success_enters_reviewing() {
        let mut ctl = opened("42");
        let (ticket, request) = ctl.begin_generate("be concise", Language::En).unwrap();
        assert_eq!(request.custom_prompt, "be concise");
        assert_eq!(request.language, "en");
        assert_eq!(ctl.phase(), Phase::Generating);

        ctl.apply_generated(ticket, Ok("Thanks, ...".to_string()));
        assert_eq!(ctl.phase(), Phase::Reviewing);
        assert_eq!(ctl.draft(), Some("Thanks, ..."));
        let view = ctl.view().unwrap();
        assert!(view.save_visible);
        assert_eq!(view.generate_label, "Regenerar");
    }

    #[test]
    fn generate_failure_returns_to_viewing_without_draft() {
        let mut ctl = opened("42");
        let (ticket, _) = ctl.begin_generate("", Language::Es).unwrap();
        ctl.apply_generated(ticket, Err(ApiError::application("error", "model busy")));

        assert_eq!(ctl.phase(), Phase::Viewing);
        assert!(ctl.draft().is_none());
        let view = ctl.view().unwrap();
        assert!(!view.save_visible);
        assert_eq!(view.inline_error, Some("model busy"));
    }

    #[test]
    fn failed_regeneration_preserves_draft() {
        let mut ctl = opened("42");
        let (ticket, _) = ctl.begin_generate("", Language::Es).unwrap();
        ctl.apply_generated(ticket, Ok("first draft".to_string()));

        let (ticket, _) = ctl.begin_generate("shorter", Language::Es).unwrap();
        ctl.apply_generated(ticket, Err(ApiError::application("error", "model busy")));

        assert_eq!(ctl.phase(), Phase::Reviewing);
        assert_eq!(ctl.draft(), Some("first draft"));
    }

    #[test]
    fn reentrant_generate_is_rejected() {
        let mut ctl = opened("42");
        let first = ctl.begin_generate("", Language::Es);
        assert!(first.is_some());
        assert!(ctl.begin_generate("", Language::Es).is_none());
        assert_eq!(ctl.phase(), Phase::Generating);
    }

    #[test]
    fn save_success_closes_and_requests_refresh() {
        let mut ctl = opened("42");
        let (ticket, _) = ctl.begin_generate("", Language::Es).unwrap();
        ctl.apply_generated(ticket, Ok("draft".to_string()));

        let (ticket, request) = ctl.begin_save().unwrap();
        assert_eq!(request.body, "draft");

        let effects = ctl.apply_saved(
            ticket,
            Ok(ActionResponse {
                status: "success".to_string(),
                message: None,
            }),
        );
        assert_eq!(effects, vec![DetailEffect::RefreshList]);
        assert_eq!(ctl.phase(), Phase::Closed);
    }

    #[test]
    fn save_failure_alerts_and_preserves_draft() {
        let mut ctl = opened("42");
        let (ticket, _) = ctl.begin_generate("", Language::Es).unwrap();
        ctl.apply_generated(ticket, Ok("draft".to_string()));

        let (ticket, _) = ctl.begin_save().unwrap();
        let effects = ctl.apply_saved(ticket, Err(ApiError::application("error", "EWS down")));

        assert_eq!(ctl.phase(), Phase::Reviewing);
        assert_eq!(ctl.draft(), Some("draft"));
        assert!(matches!(effects.as_slice(), [DetailEffect::Alert(_)]));
    }

    #[test]
    fn save_without_draft_is_rejected() {
        let mut ctl = opened("42");
        assert!(ctl.begin_save().is_none());
        assert_eq!(ctl.phase(), Phase::Viewing);
    }

    #[test]
    fn mark_read_always_closes_and_refreshes() {
        let mut ctl = opened("42");
        let request = ctl.begin_mark_read().unwrap();
        let effects =
            ctl.apply_marked_read(request.ticket, Err(ApiError::application("error", "nope")));

        assert_eq!(effects, vec![DetailEffect::RefreshList]);
        assert_eq!(ctl.phase(), Phase::Closed);
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let mut ctl = opened("42");
        assert!(ctl.begin_delete(false).is_none());
        assert_eq!(ctl.phase(), Phase::Viewing);
        assert!(ctl.selected().is_some());
    }

    #[test]
    fn confirmed_delete_closes_and_refreshes() {
        let mut ctl = opened("42");
        let request = ctl.begin_delete(true).unwrap();
        assert_eq!(request.id.as_str(), "42");

        let effects = ctl.apply_deleted(request.ticket, Ok(()));
        assert_eq!(effects, vec![DetailEffect::RefreshList]);
        assert_eq!(ctl.phase(), Phase::Closed);
    }

    #[test]
    fn close_is_idempotent() {
        let mut ctl = opened("42");
        ctl.close();
        ctl.close();
        assert_eq!(ctl.phase(), Phase::Closed);
        assert!(ctl.selected().is_none());
    }

    #[test]
    fn completion_after_close_is_discarded() {
        let mut ctl = opened("42");
        let (ticket, _) = ctl.begin_generate("", Language::Es).unwrap();

        // Modal cannot close mid-generation, but a replacement open
        // supersedes the ticket the same way.
        assert!(!ctl.phase().is_interactive());
        ctl.apply_generated(ticket, Ok("late".to_string()));
        assert_eq!(ctl.draft(), Some("late"));

        // Now open another email; the old save ticket must be dead.
        let request = ctl.open(EmailId::new("43")).unwrap();
        ctl.apply_opened(request.ticket, Ok(detail("43")));
        ctl.apply_generated(ticket, Ok("stale".to_string()));
        assert!(ctl.draft().is_none());
    }

    #[test]
    fn opening_replaces_previous_selection() {
        let mut ctl = opened("42");
        let request = ctl.open(EmailId::new("43")).unwrap();
        assert_eq!(ctl.phase(), Phase::Loading);
        assert!(ctl.selected().is_none());

        ctl.apply_opened(request.ticket, Ok(detail("43")));
        assert_eq!(ctl.selected().map(|e| e.id.as_str()), Some("43"));
    }

    #[test]
    fn language_wire_values() {
        assert_eq!(Language::Es.as_str(), "es");
        assert_eq!(Language::En.as_str(), "en");
        assert_eq!(Language::Both.as_str(), "both");
    }
}
