//! Vega-Lite chart specifications built from derived rows.
//!
//! A [`ChartSpec`] is a plain serializable value. It is rebuilt whenever rows
//! or selection change and is handed as JSON to vega-embed in the browser or
//! written to disk by the CLI.

use crate::normalize::DerivedRow;
use crate::selection::{FilterSelection, Group, ParseSelectionError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";
const CHART_WIDTH: u32 = 750;
const CHART_HEIGHT: u32 = 300;
const HOURS_PER_DAY: u8 = 24;

/// Which chart the dashboard draws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartVariant {
    /// People against temperature, one point per row.
    ScatterByTemperature,
    /// People per hour, stacked by age group, with every hour present.
    BarByHourStacked,
    /// People per hour, colored by weather condition.
    #[default]
    BarByHourColoredByWeather,
}

impl ChartVariant {
    pub const ALL: [ChartVariant; 3] = [
        ChartVariant::BarByHourColoredByWeather,
        ChartVariant::BarByHourStacked,
        ChartVariant::ScatterByTemperature,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartVariant::ScatterByTemperature => "scatter-by-temperature",
            ChartVariant::BarByHourStacked => "bar-by-hour-stacked",
            ChartVariant::BarByHourColoredByWeather => "bar-by-hour-colored-by-weather",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartVariant::ScatterByTemperature => "Personen nach Temperatur",
            ChartVariant::BarByHourStacked => "Personen pro Stunde nach Gruppe",
            ChartVariant::BarByHourColoredByWeather => "Personen pro Stunde nach Wetter",
        }
    }

    /// Rows without a temperature cannot be drawn.
    pub fn requires_temperature(&self) -> bool {
        matches!(
            self,
            ChartVariant::ScatterByTemperature | ChartVariant::BarByHourColoredByWeather
        )
    }

    /// One row per age group instead of one row per record when group is `all`.
    pub fn splits_groups(&self) -> bool {
        matches!(self, ChartVariant::BarByHourStacked)
    }
}

impl fmt::Display for ChartVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartVariant {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartVariant::ALL
            .into_iter()
            .find(|v| v.as_str() == s.trim())
            .ok_or_else(|| {
                ParseSelectionError::new("chart variant", s, &ChartVariant::ALL.map(|v| v.as_str()))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Bar,
    Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Ordinal,
    Quantitative,
    Nominal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkType,
    pub tooltip: bool,
    pub filled: bool,
    pub opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub label_angle: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero: Option<bool>,
}

/// One encoding channel bound to a data field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    pub field: &'static str,
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
}

impl FieldDef {
    fn new(field: &'static str, kind: FieldType, title: &'static str) -> Self {
        Self {
            field,
            kind,
            title,
            axis: None,
            scale: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Encoding {
    pub x: FieldDef,
    pub y: FieldDef,
    pub color: FieldDef,
    pub tooltip: Vec<FieldDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineData {
    pub values: Vec<DerivedRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewStyle {
    pub fill: &'static str,
    pub stroke: Option<&'static str>,
}

/// A complete Vega-Lite document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background: &'static str,
    pub view: ViewStyle,
    pub data: InlineData,
    pub mark: Mark,
    pub encoding: Encoding,
}

impl ChartSpec {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Deterministic chart title for `selection`.
pub fn chart_title(selection: &FilterSelection) -> String {
    format!(
        "{} · {} · Gruppe: {} · Wetter: {}",
        selection.datum(),
        selection.location,
        selection.group.label(),
        selection.weather
    )
}

fn hour_axis() -> FieldDef {
    FieldDef {
        axis: Some(Axis { label_angle: 0 }),
        scale: Some(Scale {
            domain: Some((0..HOURS_PER_DAY).collect()),
            zero: None,
        }),
        ..FieldDef::new("hour", FieldType::Ordinal, "Stunde")
    }
}

fn people_axis() -> FieldDef {
    FieldDef::new("people", FieldType::Quantitative, "Personen")
}

fn series_groups(group: Group) -> Vec<Group> {
    match group {
        Group::All => vec![Group::Adults, Group::Children],
        other => vec![other],
    }
}

/// Zero rows for every (hour, series) the data does not cover.
fn placeholder_rows(rows: &[DerivedRow], group: Group) -> Vec<DerivedRow> {
    let mut placeholders = Vec::new();
    for series in series_groups(group) {
        for hour in 0..HOURS_PER_DAY {
            let covered = rows
                .iter()
                .any(|r| r.hour == Some(hour) && r.age_group == series);
            if !covered {
                placeholders.push(DerivedRow {
                    hour: Some(hour),
                    people: 0.0,
                    weather_condition: None,
                    temperature: None,
                    age_group: series,
                });
            }
        }
    }
    placeholders
}

/// Build the chart for `rows` under `selection`.
///
/// `rows` is not modified. An empty slice still yields a valid spec whose
/// data is empty (or, for stacked bars, all placeholders).
pub fn build_spec(
    variant: ChartVariant,
    rows: &[DerivedRow],
    selection: &FilterSelection,
) -> ChartSpec {
    let mut values = rows.to_vec();

    let (mark, encoding) = match variant {
        ChartVariant::BarByHourColoredByWeather => (
            Mark {
                kind: MarkType::Bar,
                tooltip: true,
                filled: true,
                opacity: 0.7,
                width: Some(26.0),
                size: None,
            },
            Encoding {
                x: hour_axis(),
                y: people_axis(),
                color: FieldDef::new("weather_condition", FieldType::Nominal, "Wetter"),
                tooltip: vec![
                    FieldDef::new("temperature", FieldType::Quantitative, "°C"),
                    people_axis(),
                    FieldDef::new("weather_condition", FieldType::Nominal, "Wetter"),
                ],
            },
        ),
        ChartVariant::BarByHourStacked => {
            values.extend(placeholder_rows(rows, selection.group));
            (
                Mark {
                    kind: MarkType::Bar,
                    tooltip: true,
                    filled: true,
                    opacity: 0.85,
                    width: Some(26.0),
                    size: None,
                },
                Encoding {
                    x: hour_axis(),
                    y: people_axis(),
                    color: FieldDef::new("age_group", FieldType::Nominal, "Personengruppe"),
                    tooltip: vec![
                        FieldDef::new("hour", FieldType::Ordinal, "Stunde"),
                        people_axis(),
                        FieldDef::new("age_group", FieldType::Nominal, "Personengruppe"),
                    ],
                },
            )
        }
        ChartVariant::ScatterByTemperature => (
            Mark {
                kind: MarkType::Point,
                tooltip: true,
                filled: true,
                opacity: 0.7,
                width: None,
                size: Some(80.0),
            },
            Encoding {
                x: FieldDef {
                    scale: Some(Scale {
                        domain: None,
                        zero: Some(false),
                    }),
                    ..FieldDef::new("temperature", FieldType::Quantitative, "Temperatur (°C)")
                },
                y: people_axis(),
                color: FieldDef::new("weather_condition", FieldType::Nominal, "Wetter"),
                tooltip: vec![
                    FieldDef::new("hour", FieldType::Ordinal, "Stunde"),
                    FieldDef::new("temperature", FieldType::Quantitative, "°C"),
                    people_axis(),
                    FieldDef::new("weather_condition", FieldType::Nominal, "Wetter"),
                ],
            },
        ),
    };

    ChartSpec {
        schema: VEGA_LITE_SCHEMA,
        title: chart_title(selection),
        width: CHART_WIDTH,
        height: CHART_HEIGHT,
        background: "transparent",
        view: ViewStyle {
            fill: "#ffffff",
            stroke: None,
        },
        data: InlineData { values },
        mark,
        encoding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Weather, Zone};

    fn selection() -> FilterSelection {
        FilterSelection {
            location: "Mitte".to_string(),
            zone: Zone::All,
            group: Group::Children,
            weather: Weather::Rain,
            ..FilterSelection::default()
        }
    }

    fn row(hour: u8, people: f64, group: Group) -> DerivedRow {
        DerivedRow {
            hour: Some(hour),
            people,
            weather_condition: Some("rain".to_string()),
            temperature: Some(12.0),
            age_group: group,
        }
    }

    #[test]
    fn title_interpolates_selection() {
        assert_eq!(
            chart_title(&selection()),
            "2021-09-29 · Mitte · Gruppe: Kinder · Wetter: rain"
        );
        let mut all = selection();
        all.group = Group::All;
        all.weather = Weather::All;
        assert_eq!(chart_title(&all), "2021-09-29 · Mitte · Gruppe: Alle · Wetter: all");
    }

    #[test]
    fn empty_rows_yield_valid_spec() {
        for variant in [ChartVariant::BarByHourColoredByWeather, ChartVariant::ScatterByTemperature] {
            let spec = build_spec(variant, &[], &selection());
            assert!(spec.data.values.is_empty());
            let json: serde_json::Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();
            assert_eq!(json["data"]["values"], serde_json::json!([]));
            assert_eq!(json["$schema"], VEGA_LITE_SCHEMA);
        }
    }

    #[test]
    fn weather_bars_match_dashboard_encoding() {
        let rows = vec![row(8, 4.0, Group::Children)];
        let spec = build_spec(ChartVariant::BarByHourColoredByWeather, &rows, &selection());
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["mark"]["type"], "bar");
        assert_eq!(json["mark"]["width"], 26.0);
        assert_eq!(json["encoding"]["x"]["field"], "hour");
        assert_eq!(json["encoding"]["x"]["type"], "ordinal");
        assert_eq!(json["encoding"]["x"]["axis"]["labelAngle"], 0);
        assert_eq!(json["encoding"]["x"]["scale"]["domain"].as_array().unwrap().len(), 24);
        assert_eq!(json["encoding"]["y"]["field"], "people");
        assert_eq!(json["encoding"]["color"]["field"], "weather_condition");
        assert_eq!(json["encoding"]["tooltip"][0]["title"], "°C");
        assert_eq!(json["view"]["stroke"], serde_json::Value::Null);
        assert_eq!(json["data"]["values"][0]["people"], 4.0);
        assert_eq!(json["data"]["values"][0]["age_group"], "children");
    }

    #[test]
    fn stacked_bars_fill_missing_hours() {
        let mut sel = selection();
        sel.group = Group::All;
        let rows = vec![row(8, 4.0, Group::Adults), row(8, 1.0, Group::Children)];
        let spec = build_spec(ChartVariant::BarByHourStacked, &rows, &sel);

        assert_eq!(spec.data.values.len(), 48);
        assert_eq!(&spec.data.values[..2], &rows[..]);
        for series in [Group::Adults, Group::Children] {
            for hour in 0..24 {
                let count = spec
                    .data
                    .values
                    .iter()
                    .filter(|r| r.hour == Some(hour) && r.age_group == series)
                    .count();
                assert_eq!(count, 1, "hour {hour} {series}");
            }
        }
        assert_eq!(spec.encoding.color.field, "age_group");
        // Input rows are left as they were.
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn stacked_bars_for_single_group_have_one_series() {
        let spec = build_spec(ChartVariant::BarByHourStacked, &[], &selection());
        assert_eq!(spec.data.values.len(), 24);
        assert!(spec.data.values.iter().all(|r| r.age_group == Group::Children && r.people == 0.0));
    }

    #[test]
    fn scatter_plots_temperature() {
        let spec = build_spec(
            ChartVariant::ScatterByTemperature,
            &[row(10, 3.0, Group::Children)],
            &selection(),
        );
        assert_eq!(spec.mark.kind, MarkType::Point);
        assert_eq!(spec.encoding.x.field, "temperature");
        assert_eq!(spec.encoding.x.kind, FieldType::Quantitative);
    }

    #[test]
    fn build_is_pure() {
        let rows = vec![row(8, 4.0, Group::Children), row(9, 2.0, Group::Children)];
        let a = build_spec(ChartVariant::BarByHourStacked, &rows, &selection());
        let b = build_spec(ChartVariant::BarByHourStacked, &rows, &selection());
        assert_eq!(a, b);
    }

    #[test]
    fn variant_parses_from_kebab_case() {
        for variant in ChartVariant::ALL {
            assert_eq!(variant.as_str().parse::<ChartVariant>().unwrap(), variant);
        }
        assert!("pie".parse::<ChartVariant>().is_err());
        assert_eq!(ChartVariant::default(), ChartVariant::BarByHourColoredByWeather);
    }
}
