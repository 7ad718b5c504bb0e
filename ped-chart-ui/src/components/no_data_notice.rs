//! Shown instead of the chart when no row survives filtering.

use dioxus::prelude::*;

#[component]
pub fn NoDataNotice() -> Element {
    rsx! {
        div {
            style: "padding: 20px;",
            div {
                role: "status",
                style: "padding: 12px 16px; background: #E3F2FD; color: #0D47A1; border-radius: 4px;",
                "Keine gültigen Temperatur/Personen-Daten gefunden."
            }
        }
    }
}
