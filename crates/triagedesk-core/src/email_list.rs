//! Paginated email list state.

use tracing::warn;
use triagedesk_api::{EmailPage, EmailSummary, Error as ApiError};

use crate::sequence::{Sequence, Ticket};

/// Rows requested per page window.
pub const PAGE_LIMIT: u64 = 10;

/// Parameters of an issued page fetch.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    /// Sequence ticket for this fetch.
    pub ticket: Ticket,
    /// Zero-based page the fetch targets.
    pub page: u64,
    /// Window offset, `page * limit`.
    pub offset: u64,
    /// Window size.
    pub limit: u64,
}

/// Owner of the pagination cursor and the current page's row cache.
///
/// The cache is only ever replaced by a page fetch; mutating actions done
/// through the detail controller invalidate it by triggering a re-fetch,
/// never by local patching.
#[derive(Debug)]
pub struct EmailListController {
    current_page: u64,
    emails: Vec<EmailSummary>,
    total: u64,
    limit: u64,
    is_loading: bool,
    error: Option<String>,
    loaded_once: bool,
    seq: Sequence,
}

impl Default for EmailListController {
    fn default() -> Self {
        Self {
            current_page: 0,
            emails: Vec::new(),
            total: 0,
            limit: PAGE_LIMIT,
            is_loading: false,
            error: None,
            loaded_once: false,
            seq: Sequence::new(),
        }
    }
}

impl EmailListController {
    /// Creates a controller with the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a page fetch for `page`.
    ///
    /// Requests with `page < 0` are rejected without a network call and
    /// return `None`. The cursor moves only when the fetch succeeds.
    pub fn begin_load(&mut self, page: i64) -> Option<PageRequest> {
        if page < 0 {
            warn!(page, "rejecting negative page request");
            return None;
        }

        #[allow(clippy::cast_sign_loss)] // checked non-negative above
        let page = page as u64;
        self.is_loading = true;
        Some(PageRequest {
            ticket: self.seq.issue(),
            page,
            offset: page * self.limit,
            limit: self.limit,
        })
    }

    /// Issues a fetch for the page `delta` away from the current one.
    ///
    /// No-op returning `None` when the target page would be negative.
    pub fn change_page(&mut self, delta: i64) -> Option<PageRequest> {
        #[allow(clippy::cast_possible_wrap)]
        let target = self.current_page as i64 + delta;
        if target < 0 {
            return None;
        }
        self.begin_load(target)
    }

    /// Applies a page-fetch completion.
    ///
    /// Stale completions are discarded. On failure the cursor and cached
    /// rows stay unchanged and the error row is shown; there is no
    /// automatic retry.
    pub fn apply_loaded(&mut self, request: &PageRequest, result: Result<EmailPage, ApiError>) {
        if !self.seq.is_current(request.ticket) {
            return;
        }
        self.is_loading = false;
        self.loaded_once = true;

        match result {
            Ok(page) => {
                self.current_page = request.page;
                self.emails = page.emails;
                self.total = page.total;
                self.error = None;
            }
            Err(e) => {
                warn!("email page fetch failed: {e}");
                self.error = Some(e.user_message());
            }
        }
    }

    /// Current zero-based page.
    #[must_use]
    pub const fn current_page(&self) -> u64 {
        self.current_page
    }

    /// Authoritative total row count from the last successful fetch.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Cached rows of the current page.
    #[must_use]
    pub fn emails(&self) -> &[EmailSummary] {
        &self.emails
    }

    /// Number of pages, at least 1.
    #[must_use]
    pub const fn page_count(&self) -> u64 {
        let pages = self.total.div_ceil(self.limit);
        if pages == 0 { 1 } else { pages }
    }

    /// One-based page indicator, e.g. `Página 1 de 1 (Total: 0)`.
    #[must_use]
    pub fn page_info(&self) -> String {
        format!(
            "Página {} de {} (Total: {})",
            self.current_page + 1,
            self.page_count(),
            self.total
        )
    }

    /// Projects the list surface.
    #[must_use]
    pub fn view(&self) -> ListView<'_> {
        if let Some(error) = &self.error {
            return ListView::Failed(error);
        }
        if self.is_loading && !self.loaded_once {
            return ListView::Loading;
        }
        if self.emails.is_empty() {
            return ListView::Empty;
        }
        ListView::Rows(&self.emails)
    }
}

/// Projection of the email table.
#[derive(Debug, PartialEq)]
pub enum ListView<'a> {
    /// Initial fetch still in flight.
    Loading,
    /// Explicit empty-state row.
    Empty,
    /// Explicit error row.
    Failed(&'a str),
    /// Rows of the current page window.
    Rows(&'a [EmailSummary]),
}
