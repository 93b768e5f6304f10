//! Background connector-status polling state.

use rand::Rng;
use tracing::{debug, warn};
use triagedesk_api::{Error as ApiError, StatusSnapshot};

use crate::sequence::{Sequence, Ticket};

/// Event produced when a status completion needs wider handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// The backend reported an error in its snapshot.
    BackendError(String),
}

/// Read-only display state fed by the periodic status poll.
///
/// The poll is never deduplicated or cancelled; overlapping completions are
/// ordered by sequence ticket and stale ones discarded, so a slow response
/// can never revert the counters a newer one already wrote.
#[derive(Debug, Default)]
pub struct StatusPoller {
    snapshot: Option<StatusSnapshot>,
    latency_ms: u32,
    seq: Sequence,
}

impl StatusPoller {
    /// Creates an empty poller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for the next status fetch.
    pub const fn begin_poll(&mut self) -> Ticket {
        self.seq.issue()
    }

    /// Applies a poll completion.
    ///
    /// On success the snapshot is replaced wholesale and the synthetic
    /// latency value regenerated. On failure the previous display values
    /// are kept untouched; the next tick is the retry.
    pub fn apply(
        &mut self,
        ticket: Ticket,
        result: Result<StatusSnapshot, ApiError>,
    ) -> Option<StatusEvent> {
        if !self.seq.is_current(ticket) {
            debug!("discarding stale status completion");
            return None;
        }

        match result {
            Ok(snapshot) => {
                // Display-only jitter in [80, 120) ms, regenerated per tick.
                self.latency_ms = rand::thread_rng().gen_range(80..120);
                let event = snapshot
                    .last_error
                    .clone()
                    .map(StatusEvent::BackendError);
                self.snapshot = Some(snapshot);
                event
            }
            Err(e) => {
                warn!("status poll failed: {e}");
                None
            }
        }
    }

    /// Latest snapshot, if any poll has succeeded.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&StatusSnapshot> {
        self.snapshot.as_ref()
    }

    /// Projects the status surface.
    #[must_use]
    pub fn view(&self) -> StatusView<'_> {
        let snapshot = self.snapshot.as_ref();
        let connected = snapshot.is_some_and(|s| s.exchange_connected);
        StatusView {
            processed: snapshot.map_or(0, |s| s.emails_processed),
            status_text: snapshot
                .map(|s| s.status.as_str())
                .filter(|text| !text.is_empty())
                .unwrap_or("Activo"),
            connected,
            connector_label: if connected { "Conectado" } else { "Desconectado" },
            latency_label: format!("{} ms", self.latency_ms),
            exchange_user: snapshot.and_then(|s| s.exchange_user.as_deref()),
            focused: snapshot.and_then(|s| s.current_email.as_ref()).map(|e| {
                FocusedEmailView {
                    subject: &e.subject,
                    sender: &e.sender,
                    date: &e.date,
                }
            }),
        }
    }
}

/// Projection of the status counters.
#[derive(Debug)]
pub struct StatusView<'a> {
    /// Processed-email counter.
    pub processed: u64,
    /// Textual process status.
    pub status_text: &'a str,
    /// Whether the connector is up.
    pub connected: bool,
    /// Connector label, `Conectado` or `Desconectado`.
    pub connector_label: &'static str,
    /// Synthetic latency, e.g. `103 ms`. Display only.
    pub latency_label: String,
    /// Connector account, when reported.
    pub exchange_user: Option<&'a str>,
    /// The email currently being processed, surfaced only when present.
    pub focused: Option<FocusedEmailView<'a>>,
}

/// Projection of the focused email.
#[derive(Debug)]
pub struct FocusedEmailView<'a> {
    /// Subject line.
    pub subject: &'a str,
    /// Sender address or display name.
    pub sender: &'a str,
    /// Date string.
    pub date: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use triagedesk_api::FocusedEmail;

    fn snapshot(processed: u64, status: &str) -> StatusSnapshot {
        StatusSnapshot {
            emails_processed: processed,
            status: status.to_string(),
            exchange_connected: true,
            exchange_user: Some("soporte@example.com".to_string()),
            current_email: None,
            last_error: None,
        }
    }

    #[test]
    fn successful_poll_replaces_snapshot() {
        let mut poller = StatusPoller::new();
        let ticket = poller.begin_poll();
        poller.apply(ticket, Ok(snapshot(7, "En espera (Dashboard)")));

        let view = poller.view();
        assert_eq!(view.processed, 7);
        assert_eq!(view.status_text, "En espera (Dashboard)");
        assert_eq!(view.connector_label, "Conectado");
    }

    #[test]
    fn latency_stays_in_display_range() {
        let mut poller = StatusPoller::new();
        for _ in 0..50 {
            let ticket = poller.begin_poll();
            poller.apply(ticket, Ok(snapshot(1, "Activo")));
            assert!(poller.latency_ms >= 80 && poller.latency_ms < 120);
        }
    }

    #[test]
    fn failure_keeps_previous_values() {
        let mut poller = StatusPoller::new();
        let ticket = poller.begin_poll();
        poller.apply(ticket, Ok(snapshot(3, "Activo")));

        let ticket = poller.begin_poll();
        poller.apply(
            ticket,
            Err(ApiError::application("error", "backend down")),
        );

        assert_eq!(poller.view().processed, 3);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut poller = StatusPoller::new();
        let old = poller.begin_poll();
        let new = poller.begin_poll();

        poller.apply(new, Ok(snapshot(10, "nuevo")));
        poller.apply(old, Ok(snapshot(2, "viejo")));

        assert_eq!(poller.view().processed, 10);
        assert_eq!(poller.view().status_text, "nuevo");
    }

    #[test]
    fn focused_email_is_surfaced_and_hidden() {
        let mut poller = StatusPoller::new();
        let mut snap = snapshot(1, "Generando respuesta con RAG...");
        snap.current_email = Some(FocusedEmail {
            subject: "Factura".to_string(),
            sender: "c@d.com".to_string(),
            date: "2026-08-27 10:00".to_string(),
        });
        let ticket = poller.begin_poll();
        poller.apply(ticket, Ok(snap));
        assert!(poller.view().focused.is_some());

        let ticket = poller.begin_poll();
        poller.apply(ticket, Ok(snapshot(2, "En espera (Dashboard)")));
        assert!(poller.view().focused.is_none());
    }

    #[test]
    fn backend_error_raises_event() {
        let mut poller = StatusPoller::new();
        let mut snap = snapshot(1, "Activo");
        snap.last_error = Some("IMAP timeout".to_string());

        let ticket = poller.begin_poll();
        let event = poller.apply(ticket, Ok(snap));
        assert_eq!(
            event,
            Some(StatusEvent::BackendError("IMAP timeout".to_string()))
        );
    }

    #[test]
    fn empty_status_defaults_to_activo() {
        let poller = StatusPoller::new();
        assert_eq!(poller.view().status_text, "Activo");
        assert_eq!(poller.view().connector_label, "Desconectado");
    }
}
