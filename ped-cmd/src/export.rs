//! CSV export of derived chart rows.

use ped_core::normalize::DerivedRow;
use serde::Serialize;
use std::io::Write;

/// One CSV line; empty cells stand for missing values.
#[derive(Serialize)]
struct CsvRow<'a> {
    hour: Option<u8>,
    people: f64,
    weather_condition: Option<&'a str>,
    temperature: Option<f64>,
    age_group: &'static str,
}

impl<'a> From<&'a DerivedRow> for CsvRow<'a> {
    fn from(row: &'a DerivedRow) -> Self {
        Self {
            hour: row.hour,
            people: row.people,
            weather_condition: row.weather_condition.as_deref(),
            temperature: row.temperature,
            age_group: row.age_group.as_str(),
        }
    }
}

/// Write `rows` with a header line.
pub fn write_rows<W: Write>(writer: &mut csv::Writer<W>, rows: &[DerivedRow]) -> anyhow::Result<()> {
    if rows.is_empty() {
        writer.write_record(["hour", "people", "weather_condition", "temperature", "age_group"])?;
    }
    for row in rows {
        writer.serialize(CsvRow::from(row))?;
    }
    Ok(())
}
