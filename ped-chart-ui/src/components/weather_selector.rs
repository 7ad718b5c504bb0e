//! Weather filter selector.

use crate::state::AppState;
use dioxus::prelude::*;
use ped_core::selection::Weather;

#[component]
pub fn WeatherSelector() -> Element {
    let mut state = use_context::<AppState>();
    let current = state.session.read().selection().weather;

    let on_change = move |evt: Event<FormData>| {
        if let Ok(weather) = evt.value().parse::<Weather>() {
            state.session.write().set_weather(weather);
        }
    };

    rsx! {
        div {
            style: "margin-bottom: 8px;",
            label {
                r#for: "weather-select",
                style: "display: block; font-weight: bold; margin-bottom: 4px;",
                "Wetter"
            }
            select {
                id: "weather-select",
                style: "width: 100%;",
                onchange: on_change,
                for weather in Weather::ALL {
                    option {
                        value: "{weather}",
                        selected: weather == current,
                        "{weather}"
                    }
                }
            }
        }
    }
}
