//! Conversion of one raw record into the uniform shape the charts consume.

use crate::record::RawRecord;
use crate::selection::Group;
use serde::Serialize;

/// A normalized chart row.
///
/// `age_group` names the group whose counts were summed into `people`; it is
/// the series key for stacked charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedRow {
    pub hour: Option<u8>,
    pub people: f64,
    pub weather_condition: Option<String>,
    pub temperature: Option<f64>,
    pub age_group: Group,
}

/// First finite value of `temperature`, `temp`, `air_temperature`.
pub fn resolve_temperature(record: &RawRecord) -> Option<f64> {
    [record.temperature, record.temp, record.air_temperature]
        .into_iter()
        .flatten()
        .find(|t| t.is_finite())
}

fn count(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(0.0)
}

/// People count for `group`; missing fields count as zero.
///
/// Always finite and non-negative: a sum that overflows saturates.
pub fn people_for_group(record: &RawRecord, group: Group) -> f64 {
    let people = match group {
        Group::All => count(record.pedestrians_count),
        Group::Children => {
            count(record.child_ltr_pedestrians_count) + count(record.child_rtl_pedestrians_count)
        }
        Group::Adults => {
            count(record.adult_ltr_pedestrians_count) + count(record.adult_rtl_pedestrians_count)
        }
    };
    people.min(f64::MAX)
}

/// Normalize `record` for `group`. Never fails.
pub fn normalize(record: &RawRecord, group: Group) -> DerivedRow {
    DerivedRow {
        hour: record.hour,
        people: people_for_group(record, group),
        weather_condition: record.weather_condition.clone(),
        temperature: resolve_temperature(record),
        age_group: group,
    }
}
