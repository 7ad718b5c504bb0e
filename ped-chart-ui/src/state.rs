//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//!
//! The whole pipeline state lives in one `Session` signal. Components derive
//! narrower values from it with `use_memo`, so an effect keyed on the record
//! fetch key only re-runs when that key actually changes.

use crate::browser::BrowserBackend;
use dioxus::prelude::*;
use ped_core::chart::ChartVariant;
use ped_core::endpoint::{ApiConfig, DEFAULT_API_BASE};
use ped_core::orchestrator::{load_locations, load_records};
use ped_core::selection::FilterSelection;
use ped_core::session::Session;

/// Backend base URL, fixed at build time via `PED_API_BASE`.
pub fn api_config() -> ApiConfig {
    ApiConfig::new(option_env!("PED_API_BASE").unwrap_or(DEFAULT_API_BASE))
}

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Selection, fetched data and fetch bookkeeping
    pub session: Signal<Session>,
    /// Which chart to draw
    pub variant: Signal<ChartVariant>,
    /// Where the backend lives
    pub api: Signal<ApiConfig>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            session: Signal::new(Session::new(FilterSelection::default())),
            variant: Signal::new(ChartVariant::default()),
            api: Signal::new(api_config()),
        }
    }

    /// Issue a location fetch for the current date.
    ///
    /// The ticket is taken synchronously; the response is merged by the
    /// session, which discards it if a newer fetch has been issued meanwhile.
    pub fn refresh_locations(mut self) {
        let ticket = self.session.write().begin_location_fetch();
        let backend = BrowserBackend::new(self.api.read().clone());
        spawn(async move {
            let result = load_locations(&backend, ticket.key).await;
            self.session.write().apply_locations(&ticket, result);
        });
    }

    /// Issue a record fetch for the current key, if a location is selected.
    pub fn refresh_records(mut self) {
        let Some(ticket) = self.session.write().begin_record_fetch() else {
            log::debug!("No location selected, skipping record fetch");
            return;
        };
        let backend = BrowserBackend::new(self.api.read().clone());
        spawn(async move {
            let result = load_records(&backend, &ticket.key).await;
            self.session.write().apply_records(&ticket, result);
        });
    }

    /// Log a diagnostics snapshot of the session.
    pub fn log_diagnostics(&self) {
        let diagnostics = self.session.read().inspect();
        match serde_json::to_string_pretty(&diagnostics) {
            Ok(json) => log::info!("Session diagnostics:\n{}", json),
            Err(e) => log::warn!("Failed to serialize diagnostics: {}", e),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
