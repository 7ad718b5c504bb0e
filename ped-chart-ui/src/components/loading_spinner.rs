use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        p {
            class: "text",
            style: "color: #666; margin: 8px 0;",
            "Lädt…"
        }
    }
}
