//! The event log: accumulation, ordering, counting, and JSON trace output.
//!
//! [`EventLog`] is a plain in-memory accumulator with exactly one owner.
//! It never blocks and never validates the identifiers it is handed — the
//! instrumentation source is trusted. Sorting by timestamp is explicit and
//! never happens on append.

use crate::events::{Event, EventKind};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════
//  Error type
// ═══════════════════════════════════════════════════════════════════════

/// Errors from loading or saving a trace file.
///
/// Recording and in-memory serialization have no error outcome; only the
/// file-backed helpers are fallible.
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("failed to read or write trace file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed trace file: {0}")]
    Parse(#[from] serde_json::Error),
}

// ═══════════════════════════════════════════════════════════════════════
//  Event log
// ═══════════════════════════════════════════════════════════════════════

/// An ordered, growable sequence of lifecycle events.
///
/// Grows only by append, in insertion order; [`sort_by_time`](Self::sort_by_time)
/// is the only reordering operation. Serializes transparently as one JSON
/// array of event objects.
///
/// The log defines no synchronization discipline: exactly one owner mutates
/// it. Clone it to hand out a snapshot for concurrent inspection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the creation of goroutine `gid` by goroutine `pid`.
    ///
    /// `pid == 0` denotes "no parent" (the program entry goroutine) and
    /// leaves the parent field unset. No validation that `gid` is unused or
    /// that `pid` refers to a live goroutine; always succeeds.
    pub fn record_create(&mut self, time: i64, gid: u64, pid: u64) {
        self.events.push(Event::create(time, gid, pid));
    }

    /// Record the termination of goroutine `gid`. Always succeeds.
    pub fn record_stop(&mut self, time: i64, gid: u64) {
        self.events.push(Event::stop(time, gid));
    }

    /// Record a send of `value` over channel `cid` from goroutine
    /// `from_gid` to goroutine `to_gid`. The payload is captured as its
    /// decimal text. Always succeeds.
    pub fn record_send(&mut self, time: i64, cid: u64, from_gid: u64, to_gid: u64, value: u64) {
        self.events.push(Event::send(time, cid, from_gid, to_gid, value));
    }

    /// Reorder the sequence in place into non-decreasing timestamp order.
    ///
    /// The sort is stable: events with equal timestamps keep their insertion
    /// order. Comparison is on the timestamp only. Idempotent.
    pub fn sort_by_time(&mut self) {
        self.events.sort_by_key(|event| event.time);
    }

    /// Total number of recorded events.
    pub fn count(&self) -> usize {
        self.events.len()
    }

    /// Alias for [`count`](Self::count), matching collection conventions.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of recorded events of the given kind.
    pub fn count_by_kind(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|event| event.kind == kind).count()
    }

    /// Per-kind breakdown over all three kinds, zeros included.
    pub fn summary(&self) -> [(EventKind, usize); 3] {
        EventKind::ALL.map(|kind| (kind, self.count_by_kind(kind)))
    }

    /// Timestamps of the first and last event in current sequence order,
    /// or `None` for an empty log.
    pub fn time_span(&self) -> Option<(i64, i64)> {
        Some((self.events.first()?.time, self.events.last()?.time))
    }

    /// The recorded events, in current sequence order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Render the full sequence as a pretty-printed JSON array with
    /// two-space indentation.
    ///
    /// # Panics
    ///
    /// Panics if the events cannot be represented as JSON. The event model
    /// is closed and self-consistent, so this indicates unrepairable
    /// internal state, not a recoverable condition.
    pub fn to_json(&self) -> String {
        match serde_json::to_string_pretty(&self.events) {
            Ok(json) => json,
            Err(err) => panic!("event log cannot be serialized: {err}"),
        }
    }

    /// Save the log to a JSON trace file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TraceError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json())?;
        debug!("saved {} events to {}", self.len(), path.display());
        Ok(())
    }

    /// Load a log from a JSON trace file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let log: EventLog = serde_json::from_str(&json)?;
        debug!("loaded {} events from {}", log.len(), path.display());
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> EventLog {
        let mut log = EventLog::new();
        log.record_create(0, 1, 0);
        log.record_create(1, 2, 1);
        log.record_send(2, 1, 1, 2, 7);
        log.record_stop(3, 2);
        log
    }

    #[test]
    fn count_tracks_appends() {
        let mut log = EventLog::new();
        assert_eq!(log.count(), 0);
        assert!(log.is_empty());

        for i in 0..10 {
            log.record_stop(i, i as u64);
            assert_eq!(log.count(), (i + 1) as usize);
        }
    }

    #[test]
    fn count_by_kind_partitions_count() {
        let log = sample_log();
        assert_eq!(log.count_by_kind(EventKind::Create), 2);
        assert_eq!(log.count_by_kind(EventKind::Stop), 1);
        assert_eq!(log.count_by_kind(EventKind::Send), 1);

        let total: usize = EventKind::ALL
            .iter()
            .map(|&kind| log.count_by_kind(kind))
            .sum();
        assert_eq!(total, log.count());
    }

    #[test]
    fn summary_includes_zero_kinds() {
        let mut log = EventLog::new();
        log.record_create(0, 1, 0);
        assert_eq!(
            log.summary(),
            [
                (EventKind::Create, 1),
                (EventKind::Stop, 0),
                (EventKind::Send, 0),
            ]
        );
    }

    #[test]
    fn sort_orders_by_time() {
        let mut log = EventLog::new();
        log.record_stop(5, 1);
        log.record_stop(1, 2);
        log.record_stop(3, 3);

        log.sort_by_time();

        let times: Vec<i64> = log.events().iter().map(|e| e.time).collect();
        assert_eq!(times, vec![1, 3, 5]);
        for pair in log.events().windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
    }

    #[test]
    fn sort_is_stable_and_idempotent() {
        let mut log = EventLog::new();
        log.record_stop(2, 10);
        log.record_stop(2, 20);
        log.record_stop(1, 30);

        log.sort_by_time();
        let once = log.clone();
        log.sort_by_time();

        // Equal timestamps keep insertion order.
        assert_eq!(log.events()[1].name.as_deref(), Some("#10"));
        assert_eq!(log.events()[2].name.as_deref(), Some("#20"));
        assert_eq!(log.events(), once.events());
    }

    #[test]
    fn append_never_reorders() {
        let mut log = EventLog::new();
        log.record_stop(9, 1);
        log.record_stop(1, 2);
        let times: Vec<i64> = log.events().iter().map(|e| e.time).collect();
        assert_eq!(times, vec![9, 1]);
    }

    #[test]
    fn to_json_is_pretty_printed_array() {
        let log = sample_log();
        let json = log.to_json();
        assert!(json.starts_with("[\n"));
        assert!(json.contains("  {\n"));
        assert!(json.contains("    \"t\": 0"));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 4);
    }

    #[test]
    fn json_roundtrip_preserves_events() {
        let log = sample_log();
        let back: EventLog = serde_json::from_str(&log.to_json()).unwrap();
        assert_eq!(back.events(), log.events());
    }

    #[test]
    fn empty_log_serializes_as_empty_array() {
        let log = EventLog::new();
        assert_eq!(log.to_json(), "[]");
        assert!(log.time_span().is_none());
    }

    #[test]
    fn scenario_four_events() {
        let log = sample_log();

        assert_eq!(log.count(), 4);
        assert_eq!(log.count_by_kind(EventKind::Create), 2);
        assert_eq!(log.count_by_kind(EventKind::Stop), 1);
        assert_eq!(log.count_by_kind(EventKind::Send), 1);

        let parsed: serde_json::Value = serde_json::from_str(&log.to_json()).unwrap();
        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), 4);

        // Insertion order survives serialization (already time-sorted here).
        assert_eq!(array[0]["command"], "create goroutine");
        assert!(array[0].get("parent").is_none());
        assert_eq!(array[1]["parent"], "#1");
        assert_eq!(array[2]["command"], "send to channel");
        assert_eq!(array[2]["from"], "#1");
        assert_eq!(array[2]["to"], "#2");
        assert_eq!(array[2]["ch"], "#1");
        assert_eq!(array[2]["value"], "7");
        assert_eq!(array[3]["command"], "stop goroutine");
        assert_eq!(array[3]["name"], "#2");
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");

        let log = sample_log();
        log.save(&path).unwrap();

        let loaded = EventLog::load(&path).unwrap();
        assert_eq!(loaded.count(), log.count());
        assert_eq!(loaded.events(), log.events());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = EventLog::load("/nonexistent/trace.json").unwrap_err();
        assert!(matches!(err, TraceError::Io(_)));
    }

    #[test]
    fn load_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not a trace").unwrap();

        let err = EventLog::load(&path).unwrap_err();
        assert!(matches!(err, TraceError::Parse(_)));
    }
}
