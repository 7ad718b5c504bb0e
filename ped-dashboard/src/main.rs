//! Pedestrian-count dashboard.
//!
//! Data flow:
//! 1. On mount and on every date change: fetch the location set for the date
//!    and repair the selected location against it.
//! 2. On every change of (location, date, zone): fetch the hourly records.
//! 3. Group, weather and chart variant are applied locally; the Vega-Lite
//!    spec is rebuilt from the fetched records and handed to vega-embed.
//!
//! Each fetch effect is keyed on a memo of its fetch key, so unrelated
//! selection changes never trigger a refetch.

use dioxus::prelude::*;
use ped_chart_ui::components::{
    ChartContainer, ChartHeader, DatePicker, ErrorDisplay, GroupSelector, LoadingSpinner,
    LocationSelector, NoDataNotice, VariantSelector, WeatherSelector, ZoneSelector,
};
use ped_chart_ui::js_bridge;
use ped_chart_ui::state::AppState;

/// DOM id for the vega-embed container div.
const CHART_CONTAINER_ID: &str = "pedestrian-chart";

const FOCUS_QUESTION: &str = "Fokusfrage: Wie beeinflussen unterschiedliche Wetterbedingungen \
    die stündliche Passantenfrequenz an ausgewählten Standorten?";

const USAGE_HINT: &str = "Über die Einstellungen auf der linken Seite kann nach Datum, \
    Location, Personengruppe, Zone und Wetter gefiltert werden.";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("pedestrian-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let state = use_context_provider(AppState::new);

    let location_key = use_memo(move || state.session.read().location_key());
    let record_key = use_memo(move || state.session.read().record_key());
    let status = use_memo(move || {
        let variant = (state.variant)();
        state.session.read().status(variant)
    });
    let spec_json = use_memo(move || {
        let variant = (state.variant)();
        match state.session.read().chart_spec(variant).to_json() {
            Ok(json) => Some(json),
            Err(e) => {
                log::error!("Failed to serialize chart spec: {}", e);
                None
            }
        }
    });

    // ─── Effect 1: load the charting scripts once ───
    use_effect(|| js_bridge::init_charts());

    // ─── Effect 2: location set for the selected date ───
    use_effect(move || {
        let date = location_key();
        log::info!("Fetching locations for {}", date);
        state.refresh_locations();
    });

    // ─── Effect 3: records for (location, date, zone) ───
    // Also runs when the location is cleared, which cancels any outstanding
    // record fetch and empties the record set.
    use_effect(move || {
        match record_key() {
            Some(key) => log::info!(
                "Fetching records for {} on {} (zone {})",
                key.location,
                key.date,
                key.zone
            ),
            None => log::debug!("No location selected"),
        }
        state.refresh_records();
    });

    // ─── Effect 4: draw or clear the chart ───
    use_effect(move || {
        let row_count = status.read().row_count;
        let spec = spec_json();
        match spec {
            Some(json) if row_count > 0 => js_bridge::render_vega_chart(CHART_CONTAINER_ID, &json),
            _ => js_bridge::destroy_chart(CHART_CONTAINER_ID),
        }
    });

    let current = status.read().clone();
    let locations_loading = state.session.read().locations_loading();

    rsx! {
        div {
            style: "display: flex; gap: 24px; max-width: 1200px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            // Settings sidebar
            div {
                style: "flex: 0 0 240px;",
                h2 { style: "margin-top: 0;", "Einstellungen" }
                DatePicker {}
                LocationSelector {}
                GroupSelector {}
                ZoneSelector {}
                WeatherSelector {}
                VariantSelector {}
                button {
                    class: "button buttonHover",
                    onclick: move |_| state.log_diagnostics(),
                    "Diagnose"
                }
            }

            // Chart area
            div {
                style: "flex: 1 1 auto; min-width: 0;",

                if let Some(err) = current.error.as_ref() {
                    ErrorDisplay { message: err.clone() }
                }

                if current.loading || locations_loading {
                    LoadingSpinner {}
                }

                if current.row_count == 0 && !current.loading && !locations_loading {
                    NoDataNotice {}
                }

                ChartContainer {
                    id: CHART_CONTAINER_ID.to_string(),
                    loading: current.loading,
                    min_height: 400,
                }

                ChartHeader {
                    title: FOCUS_QUESTION.to_string(),
                    description: USAGE_HINT.to_string(),
                }
            }
        }
    }
}
