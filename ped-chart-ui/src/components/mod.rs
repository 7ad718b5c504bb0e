//! Reusable Dioxus RSX components for the pedestrian dashboard.

mod chart_container;
mod chart_header;
mod date_picker;
mod error_display;
mod group_selector;
mod loading_spinner;
mod location_selector;
mod no_data_notice;
mod variant_selector;
mod weather_selector;
mod zone_selector;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use date_picker::DatePicker;
pub use error_display::ErrorDisplay;
pub use group_selector::GroupSelector;
pub use loading_spinner::LoadingSpinner;
pub use location_selector::LocationSelector;
pub use no_data_notice::NoDataNotice;
pub use variant_selector::VariantSelector;
pub use weather_selector::WeatherSelector;
pub use zone_selector::ZoneSelector;
