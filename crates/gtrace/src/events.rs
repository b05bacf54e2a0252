//! Event types for the goroutine trace log.
//!
//! [`Event`] mirrors the wire shape consumed by downstream visualization
//! tooling: short JSON field names (`t`, `command`, `ch`, ...), with every
//! optional field omitted entirely when unset rather than emitted as an
//! empty or zero value.

use serde::{Deserialize, Serialize};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
//  Event kind
// ═══════════════════════════════════════════════════════════════════════

/// The closed set of recognized event kinds.
///
/// The serialized literals are part of the wire contract with downstream
/// consumers and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A goroutine was created.
    #[serde(rename = "create goroutine")]
    Create,
    /// A goroutine terminated.
    #[serde(rename = "stop goroutine")]
    Stop,
    /// A value was sent over a channel.
    #[serde(rename = "send to channel")]
    Send,
}

impl EventKind {
    /// All recognized kinds, in stable order.
    pub const ALL: [EventKind; 3] = [EventKind::Create, EventKind::Stop, EventKind::Send];

    /// The stable wire literal for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Create => "create goroutine",
            EventKind::Stop => "stop goroutine",
            EventKind::Send => "send to channel",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render an identifier in the `#<id>` form used throughout the wire format.
pub(crate) fn format_id(id: u64) -> String {
    format!("#{id}")
}

// ═══════════════════════════════════════════════════════════════════════
//  Event
// ═══════════════════════════════════════════════════════════════════════

/// A single recorded occurrence.
///
/// Struct declaration order fixes the JSON field order. Which fields are
/// populated depends on [`kind`](Self::kind):
///
/// | kind   | populated fields                  |
/// |--------|-----------------------------------|
/// | Create | time, name, parent (optional)     |
/// | Stop   | time, name                        |
/// | Send   | time, from, to, channel, value    |
///
/// `channels`, `event_id` and `duration` are reserved for downstream
/// consumers; no producer sets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Caller-supplied timestamp. Unit and clock are the caller's concern.
    #[serde(rename = "t")]
    pub time: i64,
    /// Event kind.
    #[serde(rename = "command")]
    pub kind: EventKind,
    /// `#<gid>` of the goroutine created or stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `#<pid>` of the creating goroutine. Absent for the root goroutine
    /// (pid 0 is reserved to mean "no parent").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Reserved.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<String>,
    /// `#<gid>` of the sending goroutine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// `#<gid>` of the receiving goroutine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// `#<cid>` of the channel the send went over.
    #[serde(rename = "ch", default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Send payload, rendered to text at record time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Reserved.
    #[serde(rename = "eid", default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Reserved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

impl Event {
    fn base(time: i64, kind: EventKind) -> Self {
        Event {
            time,
            kind,
            name: None,
            parent: None,
            channels: Vec::new(),
            from: None,
            to: None,
            channel: None,
            value: None,
            event_id: None,
            duration: None,
        }
    }

    /// A goroutine-creation event. `pid == 0` means "no parent" and leaves
    /// the parent field unset.
    pub fn create(time: i64, gid: u64, pid: u64) -> Self {
        Event {
            name: Some(format_id(gid)),
            parent: (pid != 0).then(|| format_id(pid)),
            ..Event::base(time, EventKind::Create)
        }
    }

    /// A goroutine-termination event.
    pub fn stop(time: i64, gid: u64) -> Self {
        Event {
            name: Some(format_id(gid)),
            ..Event::base(time, EventKind::Stop)
        }
    }

    /// A channel-send event. The payload is captured as its decimal text.
    pub fn send(time: i64, cid: u64, from_gid: u64, to_gid: u64, value: u64) -> Self {
        Event {
            from: Some(format_id(from_gid)),
            to: Some(format_id(to_gid)),
            channel: Some(format_id(cid)),
            value: Some(value.to_string()),
            ..Event::base(time, EventKind::Send)
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>8}] ", self.time)?;
        match self.kind {
            EventKind::Create => {
                write!(f, "CREATE {}", self.name.as_deref().unwrap_or("?"))?;
                if let Some(ref parent) = self.parent {
                    write!(f, " (parent {parent})")?;
                }
                Ok(())
            }
            EventKind::Stop => write!(f, "STOP   {}", self.name.as_deref().unwrap_or("?")),
            EventKind::Send => write!(
                f,
                "SEND   {} -> {} via {} value={}",
                self.from.as_deref().unwrap_or("?"),
                self.to.as_deref().unwrap_or("?"),
                self.channel.as_deref().unwrap_or("?"),
                self.value.as_deref().unwrap_or("?"),
            ),
        }
    }
}
