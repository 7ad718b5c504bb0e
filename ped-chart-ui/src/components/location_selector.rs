//! Dropdown selector for choosing a location.

use crate::state::AppState;
use dioxus::prelude::*;

/// Location dropdown selector.
/// Offers the current location set and updates the selection on change.
#[component]
pub fn LocationSelector() -> Element {
    let mut state = use_context::<AppState>();
    let locations = state.session.read().locations().to_vec();
    let selected = state.session.read().selection().location.clone();

    let on_change = move |evt: Event<FormData>| {
        state.session.write().select_location(&evt.value());
    };

    rsx! {
        div {
            style: "margin-bottom: 16px;",
            label {
                r#for: "location-select",
                style: "display: block; font-weight: bold; margin-bottom: 4px;",
                "Location"
            }
            select {
                id: "location-select",
                style: "width: 100%;",
                disabled: locations.is_empty(),
                onchange: on_change,
                for location in locations.iter() {
                    option {
                        key: "{location}",
                        value: "{location}",
                        selected: *location == selected,
                        "{location}"
                    }
                }
            }
        }
    }
}
