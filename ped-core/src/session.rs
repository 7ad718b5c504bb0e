//! The shared session state bundle and its reducers.
//!
//! `Session` owns the filter selection, the location set, the raw record
//! sequence and the per-fetch bookkeeping. Fetches are driven elsewhere (see
//! [`crate::orchestrator`] and the web app); they start with `begin_*`, which
//! hands out a ticket, and finish with `apply_*`, which merges the outcome only
//! if the ticket is still the latest one issued *and* its key still matches the
//! current selection. Anything else is a stale response and is dropped.

use crate::chart::{build_spec, ChartSpec, ChartVariant};
use crate::error::FetchResult;
use crate::normalize::DerivedRow;
use crate::record::RawRecord;
use crate::selection::{FilterSelection, Group, Weather, Zone};
use crate::transform::derive_rows;
use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::Serialize;

/// Key of the record fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RecordKey {
    pub location: String,
    pub date: NaiveDate,
    pub zone: Zone,
}

/// Proof that a fetch was issued for `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<K> {
    pub id: u64,
    pub key: K,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// What an `apply_*` call did with a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Data replaced.
    Applied,
    /// Collection cleared and the error recorded.
    Failed,
    /// Superseded or no longer matching the selection; nothing changed.
    Discarded,
}

/// Latest-issued bookkeeping for one fetch kind.
#[derive(Debug, Clone)]
struct FetchTracker<K> {
    next_id: u64,
    in_flight: Option<FetchTicket<K>>,
    phase: FetchPhase,
    error: Option<String>,
}

impl<K> Default for FetchTracker<K> {
    fn default() -> Self {
        Self {
            next_id: 0,
            in_flight: None,
            phase: FetchPhase::Idle,
            error: None,
        }
    }
}

impl<K: Clone + PartialEq> FetchTracker<K> {
    fn issue(&mut self, key: K) -> FetchTicket<K> {
        self.next_id += 1;
        let ticket = FetchTicket {
            id: self.next_id,
            key,
        };
        self.in_flight = Some(ticket.clone());
        self.phase = FetchPhase::Loading;
        self.error = None;
        ticket
    }

    fn is_latest(&self, ticket: &FetchTicket<K>) -> bool {
        self.in_flight.as_ref().map(|t| t.id) == Some(ticket.id)
    }

    fn pending_key(&self) -> Option<&K> {
        self.in_flight.as_ref().map(|t| &t.key)
    }

    /// Forget whatever is in flight; its completion will be discarded.
    fn cancel(&mut self) {
        self.in_flight = None;
        if self.phase == FetchPhase::Loading {
            self.phase = FetchPhase::Idle;
        }
    }

    fn succeed(&mut self) {
        self.in_flight = None;
        self.phase = FetchPhase::Succeeded;
        self.error = None;
    }

    fn fail(&mut self, message: String) {
        self.in_flight = None;
        self.phase = FetchPhase::Failed;
        self.error = Some(message);
    }
}

/// Status flags for the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub loading: bool,
    pub error: Option<String>,
    pub row_count: usize,
}

/// On-demand snapshot of the session for debugging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub selection: FilterSelection,
    pub locations: Vec<String>,
    pub record_count: usize,
    /// Distinct raw `weather_condition` values, in first-seen order.
    pub weather_conditions: Vec<String>,
    pub location_phase: FetchPhase,
    pub record_phase: FetchPhase,
    pub pending_location_date: Option<NaiveDate>,
    pub pending_record_key: Option<RecordKey>,
}

/// Repair `current` against a freshly fetched location set.
///
/// Keeps `current` when the set contains it, falls back to the first entry
/// otherwise, and yields an empty selection for an empty set.
pub fn reconcile_location(current: &str, locations: &[String]) -> String {
    match locations.first() {
        None => String::new(),
        Some(first) => {
            if !current.is_empty() && locations.iter().any(|l| l == current) {
                current.to_string()
            } else {
                first.clone()
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    selection: FilterSelection,
    locations: Vec<String>,
    records: Vec<RawRecord>,
    location_fetch: FetchTracker<NaiveDate>,
    record_fetch: FetchTracker<RecordKey>,
}

impl Session {
    pub fn new(selection: FilterSelection) -> Self {
        Self {
            selection,
            ..Self::default()
        }
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    // ─── User input ───

    pub fn set_date(&mut self, date: NaiveDate) {
        self.selection.date = date;
    }

    /// Select a location from the current set, or clear it with `""`.
    ///
    /// Returns `false` and leaves the selection alone for unknown names.
    pub fn select_location(&mut self, location: &str) -> bool {
        if location.is_empty() || self.locations.iter().any(|l| l == location) {
            self.selection.location = location.to_string();
            true
        } else {
            warn!("Ignoring unknown location '{}'", location);
            false
        }
    }

    /// Any zone is accepted, including with `group != all`.
    pub fn set_zone(&mut self, zone: Zone) {
        self.selection.zone = zone;
    }

    pub fn set_group(&mut self, group: Group) {
        self.selection.group = group;
    }

    pub fn set_weather(&mut self, weather: Weather) {
        self.selection.weather = weather;
    }

    // ─── Location fetch ───

    /// Key of the location fetch: the selected date.
    pub fn location_key(&self) -> NaiveDate {
        self.selection.date
    }

    pub fn begin_location_fetch(&mut self) -> FetchTicket<NaiveDate> {
        let ticket = self.location_fetch.issue(self.location_key());
        debug!("Location fetch #{} for {}", ticket.id, ticket.key);
        ticket
    }

    pub fn apply_locations(
        &mut self,
        ticket: &FetchTicket<NaiveDate>,
        result: FetchResult<Vec<String>>,
    ) -> ApplyOutcome {
        if !self.location_fetch.is_latest(ticket) {
            debug!("Discarding superseded location fetch #{} for {}", ticket.id, ticket.key);
            return ApplyOutcome::Discarded;
        }
        if ticket.key != self.location_key() {
            debug!(
                "Discarding location fetch #{}: date moved from {} to {}",
                ticket.id,
                ticket.key,
                self.location_key()
            );
            self.location_fetch.cancel();
            return ApplyOutcome::Discarded;
        }

        let outcome = match result {
            Ok(locations) => {
                info!("{} locations for {}", locations.len(), ticket.key);
                self.locations = locations;
                self.location_fetch.succeed();
                ApplyOutcome::Applied
            }
            Err(e) => {
                warn!("Location fetch for {} failed: {}", ticket.key, e);
                self.locations.clear();
                self.location_fetch.fail(e.to_string());
                ApplyOutcome::Failed
            }
        };

        let repaired = reconcile_location(&self.selection.location, &self.locations);
        if repaired != self.selection.location {
            info!(
                "Location selection repaired: '{}' -> '{}'",
                self.selection.location, repaired
            );
            self.selection.location = repaired;
        }
        outcome
    }

    // ─── Record fetch ───

    /// Key of the record fetch; `None` while no location is selected.
    pub fn record_key(&self) -> Option<RecordKey> {
        if self.selection.location.is_empty() {
            return None;
        }
        Some(RecordKey {
            location: self.selection.location.clone(),
            date: self.selection.date,
            zone: self.selection.zone,
        })
    }

    /// Start a record fetch for the current key.
    ///
    /// Without a location nothing is fetched: any in-flight fetch is
    /// abandoned, the records are cleared and `loading` drops to false.
    pub fn begin_record_fetch(&mut self) -> Option<FetchTicket<RecordKey>> {
        match self.record_key() {
            Some(key) => {
                let ticket = self.record_fetch.issue(key);
                debug!(
                    "Record fetch #{} for {} / {} / zone {}",
                    ticket.id, ticket.key.location, ticket.key.date, ticket.key.zone
                );
                Some(ticket)
            }
            None => {
                self.record_fetch.cancel();
                self.records.clear();
                None
            }
        }
    }

    pub fn apply_records(
        &mut self,
        ticket: &FetchTicket<RecordKey>,
        result: FetchResult<Vec<RawRecord>>,
    ) -> ApplyOutcome {
        if !self.record_fetch.is_latest(ticket) {
            debug!(
                "Discarding superseded record fetch #{} for {}",
                ticket.id, ticket.key.location
            );
            return ApplyOutcome::Discarded;
        }
        if self.record_key().as_ref() != Some(&ticket.key) {
            debug!(
                "Discarding record fetch #{}: selection no longer matches",
                ticket.id
            );
            self.record_fetch.cancel();
            return ApplyOutcome::Discarded;
        }

        match result {
            Ok(records) => {
                info!(
                    "{} records for {} / {} / zone {}",
                    records.len(),
                    ticket.key.location,
                    ticket.key.date,
                    ticket.key.zone
                );
                self.records = records;
                self.record_fetch.succeed();
                ApplyOutcome::Applied
            }
            Err(e) => {
                warn!("Record fetch for {} failed: {}", ticket.key.location, e);
                self.records.clear();
                self.record_fetch.fail(e.to_string());
                ApplyOutcome::Failed
            }
        }
    }

    // ─── Status and derived values ───

    /// True while the latest record fetch is outstanding.
    pub fn loading(&self) -> bool {
        self.record_fetch.phase == FetchPhase::Loading
    }

    pub fn locations_loading(&self) -> bool {
        self.location_fetch.phase == FetchPhase::Loading
    }

    /// Location error first, then record error.
    pub fn error(&self) -> Option<&str> {
        self.location_fetch
            .error
            .as_deref()
            .or(self.record_fetch.error.as_deref())
    }

    pub fn rows(&self, variant: ChartVariant) -> Vec<DerivedRow> {
        derive_rows(variant, &self.records, &self.selection)
    }

    pub fn chart_spec(&self, variant: ChartVariant) -> ChartSpec {
        build_spec(variant, &self.rows(variant), &self.selection)
    }

    pub fn status(&self, variant: ChartVariant) -> Status {
        Status {
            loading: self.loading(),
            error: self.error().map(str::to_string),
            row_count: self.rows(variant).len(),
        }
    }

    pub fn inspect(&self) -> Diagnostics {
        let mut weather_conditions: Vec<String> = Vec::new();
        for condition in self.records.iter().filter_map(|r| r.weather_condition.as_ref()) {
            if !weather_conditions.contains(condition) {
                weather_conditions.push(condition.clone());
            }
        }
        Diagnostics {
            selection: self.selection.clone(),
            locations: self.locations.clone(),
            record_count: self.records.len(),
            weather_conditions,
            location_phase: self.location_fetch.phase,
            record_phase: self.record_fetch.phase,
            pending_location_date: self.location_fetch.pending_key().copied(),
            pending_record_key: self.record_fetch.pending_key().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 9, day).unwrap()
    }

    fn session_at(location_list: &[&str], selected: &str) -> Session {
        let mut session = Session::new(FilterSelection::new(date(29)));
        let ticket = session.begin_location_fetch();
        session.apply_locations(&ticket, Ok(names(location_list)));
        if !selected.is_empty() {
            assert!(session.select_location(selected));
        }
        session
    }

    #[test]
    fn reconcile_rules() {
        let set = names(&["A", "B"]);
        assert_eq!(reconcile_location("", &set), "A");
        assert_eq!(reconcile_location("C", &set), "A");
        assert_eq!(reconcile_location("B", &set), "B");
        assert_eq!(reconcile_location("B", &[]), "");
        assert_eq!(reconcile_location("", &[]), "");
    }

    #[test]
    fn location_fetch_seeds_and_repairs_selection() {
        let mut session = Session::default();
        let ticket = session.begin_location_fetch();
        assert_eq!(
            session.apply_locations(&ticket, Ok(names(&["A", "B"]))),
            ApplyOutcome::Applied
        );
        assert_eq!(session.selection().location, "A");

        assert!(session.select_location("B"));
        let ticket = session.begin_location_fetch();
        session.apply_locations(&ticket, Ok(names(&["A", "B"])));
        assert_eq!(session.selection().location, "B");

        let ticket = session.begin_location_fetch();
        session.apply_locations(&ticket, Ok(names(&["C", "D"])));
        assert_eq!(session.selection().location, "C");
    }

    #[test]
    fn stale_date_response_never_overwrites_locations() {
        let mut session = Session::new(FilterSelection::new(date(28)));
        let first = session.begin_location_fetch();
        session.set_date(date(29));
        let second = session.begin_location_fetch();

        // D2 answers first, then the slow D1 response arrives.
        assert_eq!(
            session.apply_locations(&second, Ok(names(&["Nord"]))),
            ApplyOutcome::Applied
        );
        assert_eq!(
            session.apply_locations(&first, Ok(names(&["Alt"]))),
            ApplyOutcome::Discarded
        );
        assert_eq!(session.locations(), &names(&["Nord"])[..]);
        assert_eq!(session.selection().location, "Nord");
    }

    #[test]
    fn response_for_changed_date_is_discarded() {
        let mut session = Session::new(FilterSelection::new(date(28)));
        let ticket = session.begin_location_fetch();
        session.set_date(date(29));
        assert_eq!(
            session.apply_locations(&ticket, Ok(names(&["Alt"]))),
            ApplyOutcome::Discarded
        );
        assert!(session.locations().is_empty());
        assert!(!session.locations_loading());
    }

    #[test]
    fn location_failure_clears_set_and_selection() {
        let mut session = session_at(&["A", "B"], "B");
        let ticket = session.begin_location_fetch();
        let outcome = session.apply_locations(
            &ticket,
            Err(FetchError::Transport("connection refused".to_string())),
        );
        assert_eq!(outcome, ApplyOutcome::Failed);
        assert!(session.locations().is_empty());
        assert_eq!(session.selection().location, "");
        assert_eq!(session.error(), Some("Request failed: connection refused"));

        // A later success clears the error again.
        let ticket = session.begin_location_fetch();
        session.apply_locations(&ticket, Ok(names(&["A"])));
        assert_eq!(session.error(), None);
    }

    #[test]
    fn unknown_location_is_rejected() {
        let mut session = session_at(&["A", "B"], "");
        assert!(!session.select_location("Z"));
        assert_eq!(session.selection().location, "A");
        assert!(session.select_location(""));
        assert_eq!(session.record_key(), None);
    }

    #[test]
    fn record_fetch_waits_for_location() {
        let mut session = Session::default();
        assert!(session.begin_record_fetch().is_none());
        assert!(!session.loading());
    }

    #[test]
    fn record_fetch_toggles_loading_once() {
        let mut session = session_at(&["A"], "");
        let ticket = session.begin_record_fetch().unwrap();
        assert!(session.loading());
        assert_eq!(ticket.key.location, "A");

        let record = RawRecord {
            hour: Some(4),
            ..RawRecord::default()
        };
        assert_eq!(
            session.apply_records(&ticket, Ok(vec![record])),
            ApplyOutcome::Applied
        );
        assert!(!session.loading());
        assert_eq!(session.records().len(), 1);

        // A duplicate delivery of the same ticket is stale.
        assert_eq!(
            session.apply_records(&ticket, Ok(Vec::new())),
            ApplyOutcome::Discarded
        );
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn superseded_record_fetch_is_discarded() {
        let mut session = session_at(&["A", "B"], "A");
        let slow = session.begin_record_fetch().unwrap();
        assert!(session.select_location("B"));
        let fast = session.begin_record_fetch().unwrap();

        let fast_record = RawRecord {
            location_name: Some("B".to_string()),
            ..RawRecord::default()
        };
        session.apply_records(&fast, Ok(vec![fast_record]));
        assert!(!session.loading());

        let outcome = session.apply_records(&slow, Ok(vec![RawRecord::default(); 5]));
        assert_eq!(outcome, ApplyOutcome::Discarded);
        assert_eq!(session.records().len(), 1);
        assert_eq!(session.records()[0].location_name.as_deref(), Some("B"));
        assert!(!session.loading());
    }

    #[test]
    fn zone_change_supersedes_record_fetch() {
        let mut session = session_at(&["A"], "");
        let ticket = session.begin_record_fetch().unwrap();
        session.set_zone(Zone::Two);
        // Completion for the old zone arrives before the new fetch starts.
        assert_eq!(
            session.apply_records(&ticket, Ok(vec![RawRecord::default()])),
            ApplyOutcome::Discarded
        );
        assert!(!session.loading());
        assert!(session.records().is_empty());
    }

    #[test]
    fn record_failure_clears_records() {
        let mut session = session_at(&["A"], "");
        let ticket = session.begin_record_fetch().unwrap();
        session.apply_records(&ticket, Ok(vec![RawRecord::default(); 3]));

        let ticket = session.begin_record_fetch().unwrap();
        let outcome = session.apply_records(&ticket, Err(FetchError::Status(500)));
        assert_eq!(outcome, ApplyOutcome::Failed);
        assert!(session.records().is_empty());
        assert!(!session.loading());
        assert_eq!(session.error(), Some("Backend returned HTTP 500"));
    }

    #[test]
    fn clearing_location_abandons_record_fetch() {
        let mut session = session_at(&["A"], "");
        let first = session.begin_record_fetch().unwrap();
        session.apply_records(&first, Ok(vec![RawRecord::default()]));
        let pending = session.begin_record_fetch().unwrap();

        let ticket = session.begin_location_fetch();
        session.apply_locations(&ticket, Ok(Vec::new()));
        assert!(session.begin_record_fetch().is_none());
        assert!(session.records().is_empty());
        assert!(!session.loading());
        assert_eq!(
            session.apply_records(&pending, Ok(vec![RawRecord::default()])),
            ApplyOutcome::Discarded
        );
    }

    #[test]
    fn zone_with_group_is_passed_through() {
        let mut session = session_at(&["A"], "");
        session.set_group(Group::Children);
        session.set_zone(Zone::Three);
        let key = session.record_key().unwrap();
        assert_eq!(key.zone, Zone::Three);
        assert_eq!(session.selection().group, Group::Children);
    }

    #[test]
    fn status_and_inspect() {
        let mut session = session_at(&["A"], "");
        let ticket = session.begin_record_fetch().unwrap();
        let records = vec![
            RawRecord {
                hour: Some(1),
                weather_condition: Some("rain".to_string()),
                temperature: Some(10.0),
                pedestrians_count: Some(4.0),
                ..RawRecord::default()
            },
            RawRecord {
                hour: Some(2),
                weather_condition: Some("fog".to_string()),
                pedestrians_count: Some(2.0),
                ..RawRecord::default()
            },
            RawRecord {
                hour: Some(3),
                weather_condition: Some("rain".to_string()),
                temperature: Some(11.0),
                ..RawRecord::default()
            },
        ];
        session.apply_records(&ticket, Ok(records));

        let status = session.status(ChartVariant::BarByHourColoredByWeather);
        assert_eq!(
            status,
            Status {
                loading: false,
                error: None,
                row_count: 2,
            }
        );
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["rowCount"], 2);

        let diagnostics = session.inspect();
        assert_eq!(diagnostics.record_count, 3);
        assert_eq!(diagnostics.weather_conditions, names(&["rain", "fog"]));
        assert_eq!(diagnostics.record_phase, FetchPhase::Succeeded);
        assert_eq!(diagnostics.pending_record_key, None);
    }

    #[test]
    fn derived_values_are_recomputed_not_cached() {
        let mut session = session_at(&["A"], "");
        let ticket = session.begin_record_fetch().unwrap();
        session.apply_records(
            &ticket,
            Ok(vec![RawRecord {
                hour: Some(8),
                weather_condition: Some("rain".to_string()),
                temperature: Some(9.0),
                pedestrians_count: Some(7.0),
                ..RawRecord::default()
            }]),
        );
        let variant = ChartVariant::BarByHourColoredByWeather;
        assert_eq!(session.chart_spec(variant), session.chart_spec(variant));
        assert_eq!(session.chart_spec(variant).data.values.len(), 1);

        session.set_weather(Weather::Snow);
        assert!(session.chart_spec(variant).data.values.is_empty());
    }
}
