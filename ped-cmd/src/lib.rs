//! Command implementations for the pedestrian CLI.
//!
//! `locations` and `records` hit the backend directly; `chart` and `rows`
//! run the whole selection pipeline through a [`Session`] so that location
//! repair and filtering behave exactly as in the dashboard.
//!
//! [`Session`]: ped_core::session::Session

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use ped_core::chart::ChartVariant;
use ped_core::endpoint::ApiConfig;
use ped_core::selection::{FilterSelection, Group, Weather, Zone};
use ped_utils::dates::parse_date_any;
use std::time::Duration;

pub mod export;
pub mod fetch;
pub mod pipeline;

/// Selection flags shared by `chart` and `rows`.
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Day to show (YYYY-MM-DD or YYYYMMDD)
    #[arg(short, long, default_value = "2021-09-29", value_parser = parse_date_any)]
    pub date: NaiveDate,

    /// Location name; falls back to the first location of the day if unknown
    #[arg(short, long)]
    pub location: Option<String>,

    /// Zone: all, 1, 2 or 3
    #[arg(short, long, default_value = "all")]
    pub zone: Zone,

    /// Age group: all, children or adults
    #[arg(short, long, default_value = "all")]
    pub group: Group,

    /// Weather condition, e.g. rain or clear-day
    #[arg(short, long, default_value = "all")]
    pub weather: Weather,

    /// Chart variant
    #[arg(long, default_value = "bar-by-hour-colored-by-weather")]
    pub variant: ChartVariant,
}

impl SelectionArgs {
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            date: self.date,
            location: self.location.clone().unwrap_or_default(),
            zone: self.zone,
            group: self.group,
            weather: self.weather,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List the locations that have data on a date
    Locations {
        /// Day to query (YYYY-MM-DD or YYYYMMDD)
        #[arg(short, long, default_value = "2021-09-29", value_parser = parse_date_any)]
        date: NaiveDate,
    },

    /// Fetch the raw hourly records for one location
    Records {
        /// Day to query (YYYY-MM-DD or YYYYMMDD)
        #[arg(short, long, default_value = "2021-09-29", value_parser = parse_date_any)]
        date: NaiveDate,

        /// Location name
        #[arg(short, long)]
        location: String,

        /// Zone: all, 1, 2 or 3
        #[arg(short, long, default_value = "all")]
        zone: Zone,
    },

    /// Build the Vega-Lite chart spec for a selection
    Chart {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Write the spec here instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Print session diagnostics to stderr
        #[arg(long)]
        inspect: bool,
    },

    /// Export the derived chart rows as CSV
    Rows {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output CSV path
        #[arg(long)]
        csv: String,
    },
}

pub async fn run(config: ApiConfig, timeout: Duration, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Locations { date } => fetch::run_locations(config, timeout, date).await,
        Command::Records {
            date,
            location,
            zone,
        } => fetch::run_records(config, timeout, date, location, zone).await,
        Command::Chart {
            selection,
            output,
            inspect,
        } => pipeline::run_chart(config, timeout, &selection, output.as_deref(), inspect).await,
        Command::Rows { selection, csv } => {
            pipeline::run_rows(config, timeout, &selection, &csv).await
        }
    }
}
