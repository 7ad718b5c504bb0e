//! Chart container component.

use dioxus::prelude::*;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id vega-embed renders into
    pub id: String,
    /// Dim the previous chart while a new record fetch is outstanding
    #[props(default = false)]
    pub loading: bool,
    #[props(default = 360)]
    pub min_height: u32,
}

/// A container div for the Vega-Lite chart.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let opacity = if props.loading { "0.4" } else { "1" };
    let style = format!(
        "min-height: {}px; width: 100%; padding: 20px 20px 0 20px; opacity: {}; transition: opacity 0.2s;",
        props.min_height, opacity
    );

    rsx! {
        div {
            id: "{props.id}",
            style: "{style}",
        }
    }
}
