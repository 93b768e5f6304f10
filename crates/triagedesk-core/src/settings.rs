//! Connector/AI configuration form state.

use tracing::warn;
use triagedesk_api::{ActionResponse, ConfigRecord, ConfigUpdate, Error as ApiError};

use crate::feed::Severity;
use crate::sequence::{Sequence, Ticket};

/// Placeholder shown for a stored password; never a real credential.
pub const PASSWORD_MASK: &str = "••••••••";

/// Outcome of a finished settings save, reported verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Server-supplied (or transport) message.
    pub message: String,
    /// Severity for the activity feed.
    pub severity: Severity,
}

/// Owner of the settings form fields.
///
/// The password entry is write-only: it starts blank, is never populated
/// from the server, and is submitted only when the user typed something
/// other than the mask.
#[derive(Debug)]
pub struct SettingsController {
    exchange_user: String,
    exchange_server: String,
    exchange_upn: String,
    password_entry: String,
    ai_threads: u32,
    ai_temp: f32,
    is_saving: bool,
    load_error: Option<String>,
    load_seq: Sequence,
    save_seq: Sequence,
}

impl Default for SettingsController {
    fn default() -> Self {
        Self {
            exchange_user: String::new(),
            exchange_server: String::new(),
            exchange_upn: String::new(),
            password_entry: String::new(),
            ai_threads: 4,
            ai_temp: 0.1,
            is_saving: false,
            load_error: None,
            load_seq: Sequence::new(),
            save_seq: Sequence::new(),
        }
    }
}

impl SettingsController {
    /// Creates a controller with documented defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for a configuration fetch.
    pub const fn begin_load(&mut self) -> Ticket {
        self.load_seq.issue()
    }

    /// Applies a configuration-fetch completion.
    ///
    /// Absent fields fall back to their defaults via the wire type; the
    /// password entry is always cleared, never populated from the server.
    pub fn apply_load(&mut self, ticket: Ticket, result: Result<ConfigRecord, ApiError>) {
        if !self.load_seq.is_current(ticket) {
            return;
        }

        match result {
            Ok(record) => {
                self.exchange_user = record.exchange_user;
                self.exchange_server = record.exchange_server;
                self.exchange_upn = record.exchange_upn;
                self.password_entry.clear();
                self.ai_threads = record.ai_threads;
                self.ai_temp = record.ai_temp;
                self.load_error = None;
            }
            Err(e) => {
                warn!("config fetch failed: {e}");
                self.load_error = Some(e.user_message());
            }
        }
    }

    /// Sets the Exchange account field.
    pub fn set_exchange_user(&mut self, value: impl Into<String>) {
        self.exchange_user = value.into();
    }

    /// Sets the Exchange server field.
    pub fn set_exchange_server(&mut self, value: impl Into<String>) {
        self.exchange_server = value.into();
    }

    /// Sets the Exchange UPN field.
    pub fn set_exchange_upn(&mut self, value: impl Into<String>) {
        self.exchange_upn = value.into();
    }

    /// Sets the password entry.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password_entry = value.into();
    }

    /// Sets the inference thread count.
    pub const fn set_ai_threads(&mut self, value: u32) {
        self.ai_threads = value;
    }

    /// Sets the sampling temperature.
    pub const fn set_ai_temp(&mut self, value: f32) {
        self.ai_temp = value;
    }

    /// Starts a configuration save; rejected while one is in flight.
    ///
    /// The password is included only when the user changed it away from
    /// blank or the masked placeholder; `None` means "do not change".
    pub fn begin_save(&mut self) -> Option<(Ticket, ConfigUpdate)> {
        if self.is_saving {
            return None;
        }

        let password = match self.password_entry.trim() {
            "" | PASSWORD_MASK => None,
            entered => Some(entered.to_string()),
        };

        self.is_saving = true;
        Some((
            self.save_seq.issue(),
            ConfigUpdate {
                exchange_user: self.exchange_user.clone(),
                exchange_server: self.exchange_server.clone(),
                exchange_upn: self.exchange_upn.clone(),
                exchange_pass: password,
                ai_threads: self.ai_threads,
                ai_temp: self.ai_temp,
            },
        ))
    }

    /// Applies a save completion; reports the server's message verbatim
    /// and does not re-load the form.
    pub fn apply_saved(
        &mut self,
        ticket: Ticket,
        result: Result<ActionResponse, ApiError>,
    ) -> Option<SaveOutcome> {
        if !self.save_seq.is_current(ticket) {
            return None;
        }
        self.is_saving = false;

        Some(match result {
            Ok(response) => SaveOutcome {
                message: response.message.unwrap_or_default(),
                severity: Severity::Success,
            },
            Err(e) => {
                warn!("config save failed: {e}");
                SaveOutcome {
                    message: e.user_message(),
                    severity: Severity::Danger,
                }
            }
        })
    }

    /// Projects the settings form.
    #[must_use]
    pub fn view(&self) -> SettingsView<'_> {
        SettingsView {
            exchange_user: &self.exchange_user,
            exchange_server: &self.exchange_server,
            exchange_upn: &self.exchange_upn,
            password_entry: &self.password_entry,
            password_placeholder: PASSWORD_MASK,
            ai_threads: self.ai_threads,
            ai_temp: self.ai_temp,
            is_saving: self.is_saving,
            load_error: self.load_error.as_deref(),
        }
    }
}

/// Projection of the settings form.
#[derive(Debug)]
pub struct SettingsView<'a> {
    /// Exchange account field.
    pub exchange_user: &'a str,
    /// Exchange server field.
    pub exchange_server: &'a str,
    /// Exchange UPN field.
    pub exchange_upn: &'a str,
    /// Current password entry (blank unless the user typed).
    pub password_entry: &'a str,
    /// Mask shown as the password placeholder.
    pub password_placeholder: &'static str,
    /// Inference thread count field.
    pub ai_threads: u32,
    /// Sampling temperature field.
    pub ai_temp: f32,
    /// Whether a save is in flight.
    pub is_saving: bool,
    /// Error from the last failed load, if any.
    pub load_error: Option<&'a str>,
}
