//! `TriageDesk` headless console monitor for the email-triage dashboard.
//!
//! Connects to the backend, activates the email tab, and keeps the status
//! poll running on a fixed cadence, logging the projected view state.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod settings;

use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use settings::ClientSettings;
use triagedesk_api::ApiClient;
use triagedesk_core::{Dashboard, ListView, Tab};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "triagedesk=info,triagedesk_core=info,triagedesk_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = ClientSettings::load().await;
    info!("Starting TriageDesk against {}", settings.base_url);

    let api = ApiClient::new(&settings.base_url)?;
    match api.health().await {
        Ok(health) => info!("Backend {} reports {}", health.service, health.status),
        Err(e) => warn!("Backend health probe failed: {e}"),
    }

    let mut dashboard = Dashboard::new(api);
    dashboard.poll_status().await;
    dashboard.activate_tab(Tab::Emails).await;
    log_list(&dashboard);

    let mut ticker = tokio::time::interval(Duration::from_secs(settings.poll_secs.max(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    ticker.tick().await; // first tick completes immediately

    loop {
        ticker.tick().await;
        dashboard.poll_status().await;
        log_status(&dashboard);
    }
}

fn log_status(dashboard: &Dashboard) {
    let view = dashboard.render();
    info!(
        processed = view.status.processed,
        connector = view.status.connector_label,
        latency = %view.status.latency_label,
        "{}",
        view.status.status_text
    );
    if let Some(focused) = &view.status.focused {
        info!("Procesando: {} | {}", focused.sender, focused.subject);
    }
}

fn log_list(dashboard: &Dashboard) {
    let Some(section) = dashboard.render().emails else {
        return;
    };
    match section.list {
        ListView::Rows(rows) => {
            info!("{}", section.page_info);
            for row in rows {
                let marker = if row.is_read { " " } else { "*" };
                info!("{marker} {} | {} | {}", row.date, row.sender, row.subject);
            }
        }
        ListView::Empty => info!("Sin correos. {}", section.page_info),
        ListView::Failed(error) => warn!("No se pudo cargar la bandeja: {error}"),
        ListView::Loading => {}
    }
}
