//! Zone selector.
//!
//! Zones only split the total count, so the control is disabled unless the
//! group is "all". The selected zone is still sent with every record fetch.

use crate::state::AppState;
use dioxus::prelude::*;
use ped_core::selection::Zone;

#[component]
pub fn ZoneSelector() -> Element {
    let mut state = use_context::<AppState>();
    let current = state.session.read().selection().zone;
    let disabled = !state.session.read().selection().zone_applicable();

    let on_change = move |evt: Event<FormData>| {
        if let Ok(zone) = evt.value().parse::<Zone>() {
            state.session.write().set_zone(zone);
        }
    };

    rsx! {
        div {
            style: "margin-bottom: 16px;",
            label {
                r#for: "zone-select",
                style: "display: block; font-weight: bold; margin-bottom: 4px;",
                "Zone"
            }
            select {
                id: "zone-select",
                style: "width: 100%;",
                disabled: disabled,
                onchange: on_change,
                for zone in Zone::ALL {
                    option {
                        value: "{zone.as_str()}",
                        selected: zone == current,
                        "{zone.label()}"
                    }
                }
            }
            p {
                style: "font-size: 12px; margin: 4px 0 0 0; color: #666;",
                "Zone nur bei Alle."
            }
        }
    }
}
