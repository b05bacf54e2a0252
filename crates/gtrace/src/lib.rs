//! Goroutine lifecycle event log for trace visualization tooling.
//!
//! This crate records discrete lifecycle events for concurrently scheduled
//! execution units — goroutine creation, termination, and channel sends —
//! and renders them as a pretty-printed JSON array consumed by downstream
//! visualization tools. It is an observability layer, not a runtime: the
//! instrumentation source hands it timestamps and identifiers, and it turns
//! them into an ordered, serializable event trail.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  Instrumented runtime               │
//! │  (produces timestamps, gids, cids)  │
//! └──────────────┬──────────────────────┘
//!                │ record_create / record_stop / record_send
//! ┌──────────────▼──────────────────────┐
//! │  gtrace EventLog                    │
//! │    → append-only event sequence     │
//! │    → sort_by_time / counts          │
//! │    → JSON trace (save/load)         │
//! └──────────────┬──────────────────────┘
//!                │ trace.json
//! ┌──────────────▼──────────────────────┐
//! │  gtrace CLI / visualization tools   │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use gtrace::log::EventLog;
//!
//! let mut log = EventLog::new();
//! log.record_create(0, 1, 0); // root goroutine, no parent
//! log.record_create(1, 2, 1);
//! log.record_send(2, 1, 1, 2, 42);
//! log.record_stop(3, 2);
//!
//! assert_eq!(log.count(), 4);
//! let json = log.to_json();
//! assert!(json.contains("\"send to channel\""));
//! ```
//!
//! The log is exclusively owned: one producer context appends to it. If
//! several concurrent units must feed a single log, hand events to one
//! consolidating owner (e.g. over a channel) rather than sharing the log.

pub mod events;
pub mod log;
