//! Full selection pipeline: locations, repair, records, rows, spec.

use crate::export::write_rows;
use crate::SelectionArgs;
use anyhow::{anyhow, bail};
use log::{info, warn};
use ped_core::api::HttpBackend;
use ped_core::endpoint::ApiConfig;
use ped_core::orchestrator::Orchestrator;
use ped_core::session::{ApplyOutcome, Session};
use std::cell::RefCell;
use std::time::Duration;

/// Run the orchestrated fetches for `args` and return the settled session.
async fn settle(config: ApiConfig, timeout: Duration, args: &SelectionArgs) -> anyhow::Result<Session> {
    let backend = HttpBackend::new(config, timeout)?;
    let session = RefCell::new(Session::new(args.selection()));
    let orchestrator = Orchestrator::new(backend, &session);

    if orchestrator.refresh_locations().await == ApplyOutcome::Failed {
        let message = session.borrow().error().unwrap_or("unknown error").to_string();
        bail!("Failed to fetch locations for {}: {}", args.date, message);
    }

    {
        let session = session.borrow();
        let chosen = &session.selection().location;
        if chosen.is_empty() {
            bail!("No locations have data on {}", args.date);
        }
        if let Some(requested) = args.location.as_deref() {
            if requested != chosen {
                warn!("Unknown location '{}' on {}, using '{}'", requested, args.date, chosen);
            }
        }
    }

    let outcome = orchestrator.refresh_records().await;
    drop(orchestrator);
    match outcome {
        Some(ApplyOutcome::Failed) => {
            let message = session.borrow().error().unwrap_or("unknown error").to_string();
            Err(anyhow!("Failed to fetch records: {}", message))
        }
        _ => Ok(session.into_inner()),
    }
}

/// Write the Vega-Lite spec for the selection to `output` or stdout.
pub async fn run_chart(
    config: ApiConfig,
    timeout: Duration,
    args: &SelectionArgs,
    output: Option<&str>,
    inspect: bool,
) -> anyhow::Result<()> {
    let session = settle(config, timeout, args).await?;

    if inspect {
        eprintln!("{}", serde_json::to_string_pretty(&session.inspect())?);
    }

    let status = session.status(args.variant);
    if status.row_count == 0 {
        warn!("Keine gültigen Temperatur/Personen-Daten gefunden.");
    }

    let json = session.chart_spec(args.variant).to_json_pretty()?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!("Wrote {} rows of {} to {}", status.row_count, args.variant, path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Export the derived rows for the selection as CSV.
pub async fn run_rows(
    config: ApiConfig,
    timeout: Duration,
    args: &SelectionArgs,
    csv_path: &str,
) -> anyhow::Result<()> {
    let session = settle(config, timeout, args).await?;
    let rows = session.rows(args.variant);

    let mut writer = csv::Writer::from_path(csv_path)?;
    write_rows(&mut writer, &rows)?;
    writer.flush()?;

    info!("Wrote {} rows to {}", rows.len(), csv_path);
    Ok(())
}
