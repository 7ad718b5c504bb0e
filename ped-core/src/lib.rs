//! Core of the pedestrian-count dashboard.
//!
//! Raw backend records flow through [`normalize`] and [`transform`] into
//! [`chart::build_spec`]; [`session::Session`] holds the user selection and the
//! fetched data, and [`orchestrator`] drives the two backend fetches against it.

pub mod chart;
pub mod endpoint;
pub mod error;
pub mod normalize;
pub mod orchestrator;
pub mod record;
pub mod selection;
pub mod session;
pub mod transform;

#[cfg(feature = "api")]
pub mod api;
