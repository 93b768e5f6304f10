//! End-to-end controller scenarios for the reply workflow.
//!
//! These tests drive the state machines exactly as the dashboard driver
//! does (begin, complete, apply) but feed completions by hand instead of
//! going through HTTP.

use triagedesk_api::{
    ActionResponse, EmailDetail, EmailId, EmailPage, EmailSummary, Error as ApiError,
};
use triagedesk_core::{
    DetailEffect, EmailDetailController, EmailListController, Language, ListView, PAGE_LIMIT,
    Phase,
};

fn summary(id: &str, is_read: bool) -> EmailSummary {
    EmailSummary {
        id: EmailId::new(id),
        sender: "cliente@example.com".to_string(),
        subject: "Consulta de factura".to_string(),
        date: "2026-08-27 09:15".to_string(),
        is_read,
    }
}

fn detail(id: &str) -> EmailDetail {
    EmailDetail {
        id: EmailId::new(id),
        sender: "cliente@example.com".to_string(),
        subject: "Consulta de factura".to_string(),
        date: "2026-08-27 09:15".to_string(),
        body: "Buenos días, ¿me pueden reenviar la factura de julio?".to_string(),
        is_read: false,
        ai_response: None,
    }
}

fn loaded_list(rows: Vec<EmailSummary>, total: u64) -> EmailListController {
    let mut list = EmailListController::new();
    let request = list.begin_load(0).unwrap();
    let offset = request.offset;
    list.apply_loaded(
        &request,
        Ok(EmailPage {
            emails: rows,
            total,
            offset,
            limit: PAGE_LIMIT,
        }),
    );
    list
}

#[test]
fn generate_review_save_closes_and_refreshes() {
    let mut list = loaded_list(vec![summary("42", false)], 1);
    let mut modal = EmailDetailController::new();

    // Row click: single-item fetch, independent of the page cache.
    let open = modal.open(EmailId::new("42")).unwrap();
    modal.apply_opened(open.ticket, Ok(detail("42")));
    assert_eq!(modal.phase(), Phase::Viewing);

    // Generate with a custom instruction and target language.
    let (ticket, request) = modal.begin_generate("be concise", Language::En).unwrap();
    assert_eq!(request.item_id.as_str(), "42");
    assert_eq!(request.custom_prompt, "be concise");
    assert_eq!(request.language, "en");

    modal.apply_generated(ticket, Ok("Thanks, please find attached...".to_string()));
    assert_eq!(modal.phase(), Phase::Reviewing);
    assert_eq!(modal.draft(), Some("Thanks, please find attached..."));

    // Save: success closes the modal and asks for a list re-fetch.
    let (ticket, save) = modal.begin_save().unwrap();
    assert_eq!(save.body, "Thanks, please find attached...");
    let effects = modal.apply_saved(
        ticket,
        Ok(ActionResponse {
            status: "success".to_string(),
            message: None,
        }),
    );
    assert_eq!(effects, vec![DetailEffect::RefreshList]);
    assert_eq!(modal.phase(), Phase::Closed);

    // The refresh is a re-fetch of the current page, not a local patch.
    let refresh = list.begin_load(0).unwrap();
    list.apply_loaded(
        &refresh,
        Ok(EmailPage {
            emails: vec![summary("42", true)],
            total: 1,
            offset: 0,
            limit: PAGE_LIMIT,
        }),
    );
    assert!(list.emails()[0].is_read);
}

#[test]
fn open_and_close_leaves_list_cache_untouched() {
    let list = loaded_list(vec![summary("42", false), summary("43", true)], 2);
    let mut modal = EmailDetailController::new();

    let open = modal.open(EmailId::new("42")).unwrap();
    modal.apply_opened(open.ticket, Ok(detail("42")));
    modal.close();

    // No optimistic mutation: cached rows and read flags are unchanged.
    assert_eq!(list.emails().len(), 2);
    assert!(!list.emails()[0].is_read);
    assert!(list.emails()[1].is_read);
    assert_eq!(modal.phase(), Phase::Closed);
}

#[test]
fn failed_generation_keeps_save_hidden() {
    let mut modal = EmailDetailController::new();
    let open = modal.open(EmailId::new("42")).unwrap();
    modal.apply_opened(open.ticket, Ok(detail("42")));

    let (ticket, _) = modal.begin_generate("", Language::Es).unwrap();
    modal.apply_generated(ticket, Err(ApiError::application("error", "model offline")));

    assert_eq!(modal.phase(), Phase::Viewing);
    assert!(modal.draft().is_none());
    let view = modal.view().unwrap();
    assert!(!view.save_visible);
    assert_eq!(view.inline_error, Some("model offline"));
}

#[test]
fn empty_page_shows_empty_state_and_page_info() {
    let list = loaded_list(Vec::new(), 0);
    assert_eq!(list.view(), ListView::Empty);
    assert_eq!(list.page_info(), "Página 1 de 1 (Total: 0)");
}

#[test]
fn declined_confirmation_issues_no_delete() {
    let mut modal = EmailDetailController::new();
    let open = modal.open(EmailId::new("42")).unwrap();
    modal.apply_opened(open.ticket, Ok(detail("42")));

    assert!(modal.begin_delete(false).is_none());
    assert_eq!(modal.phase(), Phase::Viewing);
    assert!(modal.selected().is_some());
}

#[test]
fn marking_read_twice_is_safe() {
    let mut modal = EmailDetailController::new();
    let open = modal.open(EmailId::new("42")).unwrap();
    modal.apply_opened(open.ticket, Ok(detail("42")));

    let request = modal.begin_mark_read().unwrap();
    let effects = modal.apply_marked_read(request.ticket, Ok(()));
    assert_eq!(effects, vec![DetailEffect::RefreshList]);
    assert_eq!(modal.phase(), Phase::Closed);

    // Second attempt from Closed: no request, state stays Closed.
    assert!(modal.begin_mark_read().is_none());
    assert_eq!(modal.phase(), Phase::Closed);
}

#[test]
fn switching_selection_mid_generation_discards_late_draft() {
    let mut modal = EmailDetailController::new();
    let open = modal.open(EmailId::new("42")).unwrap();
    modal.apply_opened(open.ticket, Ok(detail("42")));

    let (stale_ticket, _) = modal.begin_generate("", Language::Es).unwrap();

    // The fetch for a replacement selection supersedes the generation.
    let reopen = modal.open(EmailId::new("43"));
    assert!(reopen.is_none(), "open is rejected while generating");

    // Generation completes; then the user moves on to another email.
    modal.apply_generated(stale_ticket, Ok("draft for 42".to_string()));
    let reopen = modal.open(EmailId::new("43")).unwrap();
    modal.apply_opened(reopen.ticket, Ok(detail("43")));

    // A duplicate completion for the old selection must be discarded.
    modal.apply_generated(stale_ticket, Ok("stale draft".to_string()));
    assert!(modal.draft().is_none());
    assert_eq!(modal.selected().map(|e| e.id.as_str()), Some("43"));
}
