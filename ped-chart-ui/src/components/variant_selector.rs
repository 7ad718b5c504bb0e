//! Chart variant selector.

use crate::state::AppState;
use dioxus::prelude::*;
use ped_core::chart::ChartVariant;

#[component]
pub fn VariantSelector() -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.variant)();

    let on_change = move |evt: Event<FormData>| {
        if let Ok(variant) = evt.value().parse::<ChartVariant>() {
            state.variant.set(variant);
        }
    };

    rsx! {
        div {
            style: "margin-bottom: 16px;",
            label {
                r#for: "variant-select",
                style: "display: block; font-weight: bold; margin-bottom: 4px;",
                "Diagramm"
            }
            select {
                id: "variant-select",
                style: "width: 100%;",
                onchange: on_change,
                for variant in ChartVariant::ALL {
                    option {
                        value: "{variant}",
                        selected: variant == current,
                        "{variant.label()}"
                    }
                }
            }
        }
    }
}
