//! Direct backend queries.

use anyhow::Context;
use chrono::NaiveDate;
use log::info;
use ped_core::api::HttpBackend;
use ped_core::endpoint::ApiConfig;
use ped_core::orchestrator::{load_locations, load_records};
use ped_core::selection::Zone;
use ped_core::session::RecordKey;
use std::time::Duration;

/// Print the location set for `date`, one name per line.
pub async fn run_locations(config: ApiConfig, timeout: Duration, date: NaiveDate) -> anyhow::Result<()> {
    let backend = HttpBackend::new(config, timeout)?;
    let locations = load_locations(&backend, date)
        .await
        .with_context(|| format!("Failed to fetch locations for {}", date))?;

    info!("{} locations on {}", locations.len(), date);
    for location in &locations {
        println!("{}", location);
    }
    Ok(())
}

/// Print the raw records for one location as pretty JSON.
pub async fn run_records(
    config: ApiConfig,
    timeout: Duration,
    date: NaiveDate,
    location: String,
    zone: Zone,
) -> anyhow::Result<()> {
    let backend = HttpBackend::new(config, timeout)?;
    let key = RecordKey {
        location,
        date,
        zone,
    };
    let records = load_records(&backend, &key)
        .await
        .with_context(|| format!("Failed to fetch records for {} on {}", key.location, date))?;

    info!(
        "{} records for {} on {} (zone {})",
        records.len(),
        key.location,
        date,
        zone
    );
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
