//! Date input bound to the session's selected date.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn DatePicker() -> Element {
    let mut state = use_context::<AppState>();
    let datum = state.session.read().selection().datum();

    let on_change = move |evt: Event<FormData>| {
        match ped_utils::dates::parse_date(&evt.value()) {
            Ok(date) => state.session.write().set_date(date),
            // Cleared or half-typed input: keep the previous date.
            Err(e) => log::debug!("Ignoring date input '{}': {}", evt.value(), e),
        }
    };

    rsx! {
        div {
            style: "margin-bottom: 16px;",
            label {
                r#for: "date-input",
                style: "display: block; font-weight: bold; margin-bottom: 4px;",
                "Datum"
            }
            input {
                id: "date-input",
                r#type: "date",
                value: "{datum}",
                onchange: on_change,
            }
        }
    }
}
