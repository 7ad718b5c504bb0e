//! Age group selector.

use crate::state::AppState;
use dioxus::prelude::*;
use ped_core::selection::Group;

#[component]
pub fn GroupSelector() -> Element {
    let mut state = use_context::<AppState>();
    let current = state.session.read().selection().group;

    let on_change = move |evt: Event<FormData>| {
        if let Ok(group) = evt.value().parse::<Group>() {
            state.session.write().set_group(group);
        }
    };

    rsx! {
        div {
            style: "margin-bottom: 16px;",
            label {
                r#for: "group-select",
                style: "display: block; font-weight: bold; margin-bottom: 4px;",
                "Personengruppe"
            }
            select {
                id: "group-select",
                style: "width: 100%;",
                onchange: on_change,
                for group in Group::ALL {
                    option {
                        value: "{group.as_str()}",
                        selected: group == current,
                        "{group.label()}"
                    }
                }
            }
        }
    }
}
