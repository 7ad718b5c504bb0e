//! Backend endpoint descriptions and tolerant response decoding.

use crate::error::{FetchError, FetchResult};
use crate::record::RawRecord;
use crate::session::RecordKey;
use chrono::NaiveDate;
use log::{debug, warn};
use serde_json::Value;

/// Backend the dashboard talks to when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

pub const LOCATIONS_PATH: &str = "/api/v1/Locations";
pub const RECORDS_PATH: &str = "/api/v1/pedData";

/// Where the pedestrian backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn locations_endpoint(&self, date: NaiveDate) -> Endpoint {
        Endpoint {
            url: format!("{}{}", self.base_url, LOCATIONS_PATH),
            query: vec![("datum", ped_utils::dates::format_date(&date))],
        }
    }

    pub fn records_endpoint(&self, key: &RecordKey) -> Endpoint {
        Endpoint {
            url: format!("{}{}", self.base_url, RECORDS_PATH),
            query: vec![
                ("ort", key.location.clone()),
                ("datum", ped_utils::dates::format_date(&key.date)),
                ("zone", key.zone.as_str().to_string()),
            ],
        }
    }
}

/// A GET request: absolute URL without query plus unencoded query pairs.
///
/// Encoding is left to the transport (`reqwest` or `URLSearchParams`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub query: Vec<(&'static str, String)>,
}

/// Parse a response body regardless of its HTTP status.
///
/// Error statuses with a JSON body (e.g. `{"detail": "Not Found"}`) still
/// decode; the payload decoders then turn unexpected shapes into empty data.
/// A body that is not JSON is a `Status` error for non-success responses and
/// a `Parse` error otherwise.
pub fn decode_body(status: u16, body: &str) -> FetchResult<Value> {
    let success = (200..300).contains(&status);
    if !success {
        warn!("Backend answered HTTP {}", status);
    }
    match serde_json::from_str(body) {
        Ok(payload) => Ok(payload),
        Err(_) if !success => Err(FetchError::Status(status)),
        Err(e) => Err(e.into()),
    }
}

/// Location names from a `/Locations` payload.
///
/// Only `[{"locations": [..]}, ..]` is understood; any other shape means no
/// locations. Non-string entries are skipped and duplicates dropped, keeping
/// the first occurrence.
pub fn decode_locations(payload: &Value) -> Vec<String> {
    let Some(list) = payload
        .as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get("locations"))
        .and_then(Value::as_array)
    else {
        debug!("Locations payload has unexpected shape, treating as empty");
        return Vec::new();
    };

    let mut locations: Vec<String> = Vec::with_capacity(list.len());
    for name in list.iter().filter_map(Value::as_str) {
        if !locations.iter().any(|l| l == name) {
            locations.push(name.to_string());
        }
    }
    locations
}

/// Records from a `/pedData` payload. Non-arrays mean no records.
pub fn decode_records(payload: &Value) -> Vec<RawRecord> {
    let Some(items) = payload.as_array() else {
        debug!("pedData payload is not an array, treating as empty");
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| match serde_json::from_value::<RawRecord>(item.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping undecodable record: {}", e);
                None
            }
        })
        .collect()
}
