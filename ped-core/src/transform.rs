//! Weather filtering and group aggregation over a record sequence.
//!
//! All functions here are pure: same inputs, same output, input order kept.

use crate::chart::ChartVariant;
use crate::normalize::{normalize, DerivedRow};
use crate::record::RawRecord;
use crate::selection::{FilterSelection, Group, Weather};

/// Exact, case-sensitive match of the trimmed condition against `weather`.
pub fn matches_weather(record: &RawRecord, weather: Weather) -> bool {
    weather.is_all() || record.weather_trimmed() == weather.as_str()
}

/// Filter `records` by `weather` and normalize each survivor for `group`.
///
/// Produces exactly one row per kept record, in input order.
pub fn transform(records: &[RawRecord], weather: Weather, group: Group) -> Vec<DerivedRow> {
    records
        .iter()
        .filter(|r| matches_weather(r, weather))
        .map(|r| normalize(r, group))
        .collect()
}

/// Like [`transform`], but applies the variant's row policy.
///
/// Stacked bars split every record into one row per age group when the
/// selection covers everybody, so adults and children stack within an hour.
pub fn transform_for(
    variant: ChartVariant,
    records: &[RawRecord],
    weather: Weather,
    group: Group,
) -> Vec<DerivedRow> {
    if !(variant.splits_groups() && group == Group::All) {
        return transform(records, weather, group);
    }
    records
        .iter()
        .filter(|r| matches_weather(r, weather))
        .flat_map(|r| [normalize(r, Group::Adults), normalize(r, Group::Children)])
        .collect()
}

/// Whether `row` can be drawn by `variant`.
pub fn is_usable(variant: ChartVariant, row: &DerivedRow) -> bool {
    row.people.is_finite()
        && row.people >= 0.0
        && (!variant.requires_temperature() || row.temperature.is_some())
}

/// Drop the rows `variant` cannot draw.
pub fn usable_rows(variant: ChartVariant, rows: Vec<DerivedRow>) -> Vec<DerivedRow> {
    rows.into_iter().filter(|row| is_usable(variant, row)).collect()
}

/// The full row pipeline for one chart: filter, normalize, split, drop.
pub fn derive_rows(
    variant: ChartVariant,
    records: &[RawRecord],
    selection: &FilterSelection,
) -> Vec<DerivedRow> {
    usable_rows(
        variant,
        transform_for(variant, records, selection.weather, selection.group),
    )
}
