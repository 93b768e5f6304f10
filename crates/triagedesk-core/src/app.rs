//! Dashboard driver: wires the controllers to the API client.
//!
//! Controllers stay free of I/O; every operation here is the same shape:
//! begin on the controller (which validates and issues a ticket), perform
//! the HTTP call, apply the completion, dispatch any effects. The render
//! projection at the bottom is the only place state meets display, and it
//! projects a section only while its tab is active.

use tracing::info;
use triagedesk_api::{ApiClient, EmailId};

use crate::email_detail::{DetailEffect, DetailView, EmailDetailController, Language};
use crate::email_list::{EmailListController, ListView};
use crate::feed::{EventFeed, FeedEntry, Severity};
use crate::knowledge::{KnowledgeController, KnowledgeView};
use crate::settings::{SettingsController, SettingsView};
use crate::status::{StatusEvent, StatusPoller, StatusView};
use crate::tabs::{Tab, TabRouter};

/// Seconds between status polls.
pub const STATUS_POLL_SECS: u64 = 5;

/// The whole client-side view state and its driver.
#[derive(Debug)]
pub struct Dashboard {
    api: ApiClient,
    status: StatusPoller,
    emails: EmailListController,
    detail: EmailDetailController,
    knowledge: KnowledgeController,
    settings: SettingsController,
    tabs: TabRouter,
    feed: EventFeed,
}

impl Dashboard {
    /// Creates a dashboard talking to `api`, with the email tab active.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let mut feed = EventFeed::new();
        feed.push("Sistema", "Dashboard iniciado correctamente", Severity::Info);
        feed.push("Conector", "Buscando servidor Exchange...", Severity::Info);

        Self {
            api,
            status: StatusPoller::new(),
            emails: EmailListController::new(),
            detail: EmailDetailController::new(),
            knowledge: KnowledgeController::new(),
            settings: SettingsController::new(),
            tabs: TabRouter::new(),
            feed,
        }
    }

    /// Runs one status poll tick.
    pub async fn poll_status(&mut self) {
        let ticket = self.status.begin_poll();
        let result = self.api.status().await;
        if let Some(StatusEvent::BackendError(detail)) = self.status.apply(ticket, result) {
            self.feed.push("Error", detail, Severity::Danger);
        }
    }

    /// Activates a tab and triggers its initial load.
    pub async fn activate_tab(&mut self, tab: Tab) {
        match self.tabs.activate(tab) {
            Tab::Emails => self.load_page(0).await,
            Tab::Knowledge => self.reload_knowledge().await,
            Tab::Settings => self.load_settings().await,
        }
    }

    /// Loads one page window of the email list.
    pub async fn load_page(&mut self, page: i64) {
        if let Some(request) = self.emails.begin_load(page) {
            let result = self.api.list_emails(request.offset, request.limit).await;
            self.emails.apply_loaded(&request, result);
        }
    }

    /// Moves the pagination cursor by `delta` pages.
    pub async fn change_page(&mut self, delta: i64) {
        if let Some(request) = self.emails.change_page(delta) {
            let result = self.api.list_emails(request.offset, request.limit).await;
            self.emails.apply_loaded(&request, result);
        }
    }

    /// Opens an email row in the modal via a single-item fetch.
    pub async fn open_email(&mut self, id: EmailId) {
        if let Some(request) = self.detail.open(id) {
            let result = self.api.email(&request.id).await;
            self.detail.apply_opened(request.ticket, result);
        }
    }

    /// Generates (or regenerates) an AI draft for the selected email.
    pub async fn generate(&mut self, custom_prompt: &str, language: Language) {
        if let Some((ticket, request)) = self.detail.begin_generate(custom_prompt, language) {
            let result = self.api.generate_answer(&request).await;
            self.detail.apply_generated(ticket, result);
        }
    }

    /// Persists the reviewed draft to the mail server.
    pub async fn save_draft(&mut self) {
        if let Some((ticket, request)) = self.detail.begin_save() {
            let result = self.api.save_draft(&request).await;
            let effects = self.detail.apply_saved(ticket, result);
            self.dispatch(effects).await;
        }
    }

    /// Marks the selected email as read, then closes and refreshes.
    pub async fn mark_read(&mut self) {
        if let Some(request) = self.detail.begin_mark_read() {
            let result = self.api.mark_read(&request.id).await;
            let effects = self.detail.apply_marked_read(request.ticket, result);
            self.dispatch(effects).await;
        }
    }

    /// Deletes the selected email after explicit confirmation.
    pub async fn delete_selected(&mut self, confirmed: bool) {
        if let Some(request) = self.detail.begin_delete(confirmed) {
            let result = self.api.delete_email(&request.id).await;
            let effects = self.detail.apply_deleted(request.ticket, result);
            self.dispatch(effects).await;
        }
    }

    /// Closes the modal without any network call.
    pub fn close_modal(&mut self) {
        self.detail.close();
    }

    /// Reloads the knowledge-base document list.
    pub async fn reload_knowledge(&mut self) {
        let ticket = self.knowledge.begin_list();
        let result = self.api.knowledge().await;
        self.knowledge.apply_list(ticket, result);
    }

    /// Uploads a knowledge document, then reloads the list and surfaces
    /// the server's message whatever the outcome.
    pub async fn upload_knowledge(&mut self, filename: &str, bytes: Vec<u8>) {
        if let Some(request) = self.knowledge.begin_upload(filename) {
            let result = self.api.upload_knowledge(&request.filename, bytes).await;
            if let Some(outcome) = self.knowledge.apply_upload(request.ticket, result) {
                info!(filename, "upload finished: {}", outcome.message);
                self.feed
                    .push("Conocimiento", outcome.message, outcome.severity);
                self.reload_knowledge().await;
            }
        }
    }

    /// Loads the settings form from the backend.
    pub async fn load_settings(&mut self) {
        let ticket = self.settings.begin_load();
        let result = self.api.get_config().await;
        self.settings.apply_load(ticket, result);
    }

    /// Saves the settings form and surfaces the server's message.
    pub async fn save_settings(&mut self) {
        if let Some((ticket, update)) = self.settings.begin_save() {
            let result = self.api.set_config(&update).await;
            if let Some(outcome) = self.settings.apply_saved(ticket, result) {
                self.feed
                    .push("Configuración", outcome.message, outcome.severity);
            }
        }
    }

    async fn dispatch(&mut self, effects: Vec<DetailEffect>) {
        for effect in effects {
            match effect {
                DetailEffect::RefreshList => {
                    #[allow(clippy::cast_possible_wrap)]
                    let page = self.emails.current_page() as i64;
                    self.load_page(page).await;
                }
                DetailEffect::Alert(message) => {
                    self.feed.push("Aviso", message, Severity::Warning);
                }
            }
        }
    }

    /// Status poller state.
    #[must_use]
    pub const fn status(&self) -> &StatusPoller {
        &self.status
    }

    /// Email list state.
    #[must_use]
    pub const fn emails(&self) -> &EmailListController {
        &self.emails
    }

    /// Modal state machine.
    #[must_use]
    pub const fn detail(&self) -> &EmailDetailController {
        &self.detail
    }

    /// Knowledge-base state.
    #[must_use]
    pub const fn knowledge(&self) -> &KnowledgeController {
        &self.knowledge
    }

    /// Settings form state.
    #[must_use]
    pub const fn settings(&self) -> &SettingsController {
        &self.settings
    }

    /// Tab router.
    #[must_use]
    pub const fn tabs(&self) -> &TabRouter {
        &self.tabs
    }

    /// Activity feed.
    #[must_use]
    pub const fn feed(&self) -> &EventFeed {
        &self.feed
    }

    /// Projects the full display state.
    ///
    /// Sections are projected only while their tab is active; the status
    /// strip and activity feed are always visible.
    #[must_use]
    pub fn render(&self) -> DashboardView<'_> {
        DashboardView {
            status: self.status.view(),
            active_tab: self.tabs.active(),
            emails: self.tabs.is_active(Tab::Emails).then(|| EmailsSection {
                list: self.emails.view(),
                page_info: self.emails.page_info(),
                modal: self.detail.view(),
            }),
            knowledge: self.tabs.is_active(Tab::Knowledge).then(|| {
                KnowledgeSection {
                    list: self.knowledge.view(),
                    upload_busy: self.knowledge.upload_busy(),
                }
            }),
            settings: self
                .tabs
                .is_active(Tab::Settings)
                .then(|| self.settings.view()),
            feed: self.feed.entries().collect(),
        }
    }
}

/// Projection of the whole dashboard.
#[derive(Debug)]
pub struct DashboardView<'a> {
    /// Always-visible status strip.
    pub status: StatusView<'a>,
    /// Currently active tab.
    pub active_tab: Tab,
    /// Email section, present only while its tab is active.
    pub emails: Option<EmailsSection<'a>>,
    /// Knowledge section, present only while its tab is active.
    pub knowledge: Option<KnowledgeSection<'a>>,
    /// Settings section, present only while its tab is active.
    pub settings: Option<SettingsView<'a>>,
    /// Activity feed, newest first.
    pub feed: Vec<&'a FeedEntry>,
}

/// Projection of the email tab.
#[derive(Debug)]
pub struct EmailsSection<'a> {
    /// Email table state.
    pub list: ListView<'a>,
    /// One-based page indicator.
    pub page_info: String,
    /// Open modal, if any.
    pub modal: Option<DetailView<'a>>,
}

/// Projection of the knowledge tab.
#[derive(Debug)]
pub struct KnowledgeSection<'a> {
    /// Document table state.
    pub list: KnowledgeView<'a>,
    /// Whether the drop surface shows the busy indicator.
    pub upload_busy: bool,
}
