//! Asynchronous drivers for the two session fetches.
//!
//! [`Backend`] is the transport seam: the CLI plugs in a `reqwest` client and
//! the web app plugs in the browser `fetch` API. Both deliver raw JSON; the
//! decoding into locations and records is shared here.

use crate::endpoint::{decode_locations, decode_records};
use crate::error::FetchResult;
use crate::record::RawRecord;
use crate::session::{ApplyOutcome, RecordKey, Session};
use chrono::NaiveDate;
use serde_json::Value;
use std::cell::RefCell;

/// Read-only access to the pedestrian backend.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Raw payload of `GET /api/v1/Locations?datum=..`.
    async fn fetch_locations(&self, date: NaiveDate) -> FetchResult<Value>;

    /// Raw payload of `GET /api/v1/pedData?ort=..&datum=..&zone=..`.
    async fn fetch_records(&self, key: &RecordKey) -> FetchResult<Value>;
}

/// Fetch and decode the location set for `date`.
pub async fn load_locations<B: Backend>(backend: &B, date: NaiveDate) -> FetchResult<Vec<String>> {
    let payload = backend.fetch_locations(date).await?;
    Ok(decode_locations(&payload))
}

/// Fetch and decode the raw records for `key`.
pub async fn load_records<B: Backend>(backend: &B, key: &RecordKey) -> FetchResult<Vec<RawRecord>> {
    let payload = backend.fetch_records(key).await?;
    Ok(decode_records(&payload))
}

/// Drives a [`Session`] shared behind a `RefCell` on a single-threaded executor.
///
/// No borrow of the session is held across an `.await`, so several refreshes
/// may be in flight at once; the session's tickets sort out which one wins.
pub struct Orchestrator<'s, B> {
    backend: B,
    session: &'s RefCell<Session>,
}

impl<'s, B: Backend> Orchestrator<'s, B> {
    pub fn new(backend: B, session: &'s RefCell<Session>) -> Self {
        Self { backend, session }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetch locations for the current date and repair the selection.
    pub async fn refresh_locations(&self) -> ApplyOutcome {
        let ticket = self.session.borrow_mut().begin_location_fetch();
        let result = load_locations(&self.backend, ticket.key).await;
        self.session.borrow_mut().apply_locations(&ticket, result)
    }

    /// Fetch records for the current key; `None` when no location is selected.
    pub async fn refresh_records(&self) -> Option<ApplyOutcome> {
        let ticket = self.session.borrow_mut().begin_record_fetch()?;
        let result = load_records(&self.backend, &ticket.key).await;
        Some(self.session.borrow_mut().apply_records(&ticket, result))
    }

    /// Locations first, then records for whatever location survived repair.
    pub async fn refresh_all(&self) -> Option<ApplyOutcome> {
        self.refresh_locations().await;
        self.refresh_records().await
    }

    /// Change the date and refetch everything keyed by it.
    pub async fn change_date(&self, date: NaiveDate) -> Option<ApplyOutcome> {
        self.session.borrow_mut().set_date(date);
        self.refresh_all().await
    }
}
