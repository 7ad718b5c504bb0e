//! User-selected filter values.
//!
//! `FilterSelection` is only ever mutated by user input; the session reducers
//! are the single exception, repairing `location` against a fresh location set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An option string that is not part of the fixed vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseSelectionError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

impl ParseSelectionError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

/// Age-based partition of pedestrian counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    #[default]
    All,
    Children,
    Adults,
}

impl Group {
    pub const ALL: [Group; 3] = [Group::All, Group::Children, Group::Adults];

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::All => "all",
            Group::Children => "children",
            Group::Adults => "adults",
        }
    }

    /// German display label used in chart titles and legends.
    pub fn label(&self) -> &'static str {
        match self {
            Group::Children => "Kinder",
            Group::Adults => "Erwachsene",
            Group::All => "Alle",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Group {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Group::ALL
            .into_iter()
            .find(|g| g.as_str() == s.trim())
            .ok_or_else(|| {
                ParseSelectionError::new("group", s, &Group::ALL.map(|g| g.as_str()))
            })
    }
}

/// Sub-area qualifier for a location's measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::All, Zone::One, Zone::Two, Zone::Three];

    /// Value of the `zone` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::All => "all",
            Zone::One => "1",
            Zone::Two => "2",
            Zone::Three => "3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Zone::All => "Alle",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::ALL
            .into_iter()
            .find(|z| z.as_str() == s.trim())
            .ok_or_else(|| ParseSelectionError::new("zone", s, &Zone::ALL.map(|z| z.as_str())))
    }
}

/// Weather filter vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Weather {
    #[default]
    All,
    ClearDay,
    PartlyCloudyDay,
    Cloudy,
    Rain,
    Snow,
    Fog,
    Wind,
}

impl Weather {
    pub const ALL: [Weather; 8] = [
        Weather::All,
        Weather::ClearDay,
        Weather::PartlyCloudyDay,
        Weather::Cloudy,
        Weather::Rain,
        Weather::Snow,
        Weather::Fog,
        Weather::Wind,
    ];

    /// The exact `weather_condition` string this option matches.
    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::All => "all",
            Weather::ClearDay => "clear-day",
            Weather::PartlyCloudyDay => "partly-cloudy-day",
            Weather::Cloudy => "cloudy",
            Weather::Rain => "rain",
            Weather::Snow => "snow",
            Weather::Fog => "fog",
            Weather::Wind => "wind",
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Weather::All)
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weather {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weather::ALL
            .into_iter()
            .find(|w| w.as_str() == s.trim())
            .ok_or_else(|| {
                ParseSelectionError::new("weather", s, &Weather::ALL.map(|w| w.as_str()))
            })
    }
}

/// Date shown when the dashboard first opens.
pub fn default_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 9, 29).unwrap_or_default()
}

/// The complete set of user filter values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Empty until a location set has been fetched.
    pub location: String,
    pub zone: Zone,
    pub group: Group,
    pub weather: Weather,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            date: default_date(),
            location: String::new(),
            zone: Zone::All,
            group: Group::All,
            weather: Weather::All,
        }
    }
}

impl FilterSelection {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }

    /// `date` in the backend's `datum` format.
    pub fn datum(&self) -> String {
        ped_utils::dates::format_date(&self.date)
    }

    /// Zone filtering is only meaningful for the total count.
    ///
    /// Presentation code uses this to disable the zone control; the core
    /// still passes any zone through to the record fetch.
    pub fn zone_applicable(&self) -> bool {
        self.group == Group::All
    }
}
