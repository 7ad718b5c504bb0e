use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One hourly pedestrian-count observation as served by `/api/v1/pedData`.
///
/// Every field is optional. Numeric fields accept JSON numbers, numeric
/// strings and booleans; anything else (including `null`, `NaN` strings or
/// negative counts) deserializes to `None` so a malformed field never rejects
/// the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient_hour")]
    pub hour: Option<u8>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub pedestrians_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub adult_ltr_pedestrians_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub adult_rtl_pedestrians_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub child_ltr_pedestrians_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub child_rtl_pedestrians_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub weather_condition: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub air_temperature: Option<f64>,

    // Passed through by the backend; only used for diagnostics.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub collection_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub ltr_pedestrians_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub rtl_pedestrians_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub ltr_rtl_diff: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub ltr_label: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub rtl_label: Option<String>,
}

impl RawRecord {
    /// Weather condition with surrounding whitespace removed, `""` if absent.
    pub fn weather_trimmed(&self) -> &str {
        self.weather_condition.as_deref().map(str::trim).unwrap_or("")
    }
}

/// Coerce a JSON value to a finite number.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                // An empty string is not a zero reading.
                None
            } else {
                s.parse::<f64>().ok()
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    n.filter(|v| v.is_finite())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value).filter(|v| *v >= 0.0))
}

fn lenient_hour<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value)
        .filter(|h| h.fract() == 0.0 && (0.0..24.0).contains(h))
        .map(|h| h as u8))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_backend_record() {
        let record: RawRecord = serde_json::from_value(json!({
            "timestamp": "2021-09-29T08:00:00+00:00",
            "date": "2021-09-29",
            "hour": 8,
            "location_name": "Mitte",
            "weather_condition": "rain",
            "temperature": 12.5,
            "collection_type": "measured",
            "pedestrians_count": 120,
            "adult_ltr_pedestrians_count": 50,
            "adult_rtl_pedestrians_count": 40,
            "child_ltr_pedestrians_count": 10,
            "child_rtl_pedestrians_count": 5
        }))
        .unwrap();
        assert_eq!(record.hour, Some(8));
        assert_eq!(record.pedestrians_count, Some(120.0));
        assert_eq!(record.child_rtl_pedestrians_count, Some(5.0));
        assert_eq!(record.temperature, Some(12.5));
        assert_eq!(record.location_name.as_deref(), Some("Mitte"));
    }

    #[test]
    fn malformed_fields_are_absent() {
        let record: RawRecord = serde_json::from_value(json!({
            "hour": "25",
            "pedestrians_count": null,
            "adult_ltr_pedestrians_count": "7",
            "adult_rtl_pedestrians_count": -3,
            "child_ltr_pedestrians_count": "NaN",
            "child_rtl_pedestrians_count": { "nested": true },
            "weather_condition": null,
            "temperature": "",
            "temp": "9.5"
        }))
        .unwrap();
        assert_eq!(record.hour, None);
        assert_eq!(record.pedestrians_count, None);
        assert_eq!(record.adult_ltr_pedestrians_count, Some(7.0));
        assert_eq!(record.adult_rtl_pedestrians_count, None);
        assert_eq!(record.child_ltr_pedestrians_count, None);
        assert_eq!(record.child_rtl_pedestrians_count, None);
        assert_eq!(record.weather_condition, None);
        assert_eq!(record.temperature, None);
        assert_eq!(record.temp, Some(9.5));
    }

    #[test]
    fn empty_object_is_default() {
        let record: RawRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record, RawRecord::default());
        assert_eq!(record.weather_trimmed(), "");
    }

    #[test]
    fn weather_is_trimmed() {
        let record = RawRecord {
            weather_condition: Some(" rain ".to_string()),
            ..RawRecord::default()
        };
        assert_eq!(record.weather_trimmed(), "rain");
    }
}
