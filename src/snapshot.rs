//! Snapshot types for serializing counter state.
//!
//! This module provides serializable snapshot types that capture the
//! contents of a [`KeyedCounter`] at a point in time, for export through any
//! serde-compatible format.
//!
//! # Feature Flag
//!
//! This module requires the `serde` feature:
//!
//! ```toml
//! [dependencies]
//! contachiavi = { version = "0.1", features = ["serde"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use contachiavi::counters::KeyedCounter;
//! use contachiavi::snapshot::CounterSnapshot;
//!
//! let mut counter: KeyedCounter<&str> = KeyedCounter::new().with_name("words");
//! counter.add_by("the", 12)?;
//!
//! let snapshot = CounterSnapshot::from_counter(&counter);
//! let json = serde_json::to_string(&snapshot)?;
//! // {"name":"words","entries":[{"key":"the","count":12}]}
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::counters::{Count, KeyedCounter};

/// A single `(key, count)` pair captured from a counter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntrySnapshot<K, C> {
    /// The key.
    pub key: K,
    /// The count held by the key.
    pub count: C,
}

/// A point-in-time capture of all the live counters of a [`KeyedCounter`].
///
/// Entries are ordered by descending count.
///
/// # Examples
///
/// ```rust,ignore
/// use contachiavi::snapshot::{CounterSnapshot, EntrySnapshot};
///
/// let snapshot = CounterSnapshot::new(
///     "words",
///     vec![EntrySnapshot { key: "the", count: 12 }],
/// );
///
/// let json = serde_json::to_string(&snapshot).unwrap();
/// assert_eq!(json, r#"{"name":"words","entries":[{"key":"the","count":12}]}"#);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CounterSnapshot<K, C> {
    /// The name of the counter.
    pub name: String,
    /// Optional timestamp in milliseconds since Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,
    /// The captured entries.
    pub entries: Vec<EntrySnapshot<K, C>>,
}

impl<K, C> CounterSnapshot<K, C> {
    /// Creates a new snapshot from already captured entries.
    pub fn new(name: impl Into<String>, entries: Vec<EntrySnapshot<K, C>>) -> Self {
        Self {
            name: name.into(),
            timestamp_ms: None,
            entries,
        }
    }

    /// Sets the timestamp of this snapshot.
    pub fn with_timestamp(self, timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms: Some(timestamp_ms),
            ..self
        }
    }

    /// Returns the number of captured entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the snapshot holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Clone, C: Count> CounterSnapshot<K, C> {
    /// Captures the live counters of `counter`, highest counts first.
    pub fn from_counter<E, S>(counter: &KeyedCounter<K, C, E, S>) -> Self {
        let mut entries: Vec<_> = counter
            .iter()
            .map(|(key, count)| EntrySnapshot {
                key: key.clone(),
                count,
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        Self::new(display_name(counter.name()), entries)
    }

    /// Captures the live counters of `counter` along with the current time.
    pub fn from_counter_with_timestamp<E, S>(counter: &KeyedCounter<K, C, E, S>) -> Self {
        Self::from_counter(counter).with_timestamp(current_timestamp_ms())
    }
}

impl<K: PartialEq, C: Count> CounterSnapshot<K, C> {
    /// Returns the captured count of `key`, or 0 if it was not captured.
    pub fn get(&self, key: &K) -> C {
        self.entries
            .iter()
            .find(|entry| entry.key == *key)
            .map_or_else(C::zero, |entry| entry.count)
    }
}

/// Name used in exports for counters created without [`KeyedCounter::with_name`].
pub(crate) fn display_name(name: &str) -> String {
    if name.is_empty() {
        "(unnamed)".to_string()
    } else {
        name.to_string()
    }
}

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
pub(crate) fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KeyedCounter<&'static str> {
        let mut counter = KeyedCounter::new().with_name("words");
        counter.set("the", 12).unwrap();
        counter.set("cat", 3).unwrap();
        counter.set("sat", 7).unwrap();
        counter
    }

    #[test]
    fn test_snapshot_new() {
        let snapshot = CounterSnapshot::new("test", vec![EntrySnapshot { key: "a", count: 1 }]);
        assert_eq!(snapshot.name, "test");
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.timestamp_ms.is_none());
    }

    #[test]
    fn test_snapshot_from_counter_sorted() {
        let snapshot = CounterSnapshot::from_counter(&sample());
        assert_eq!(snapshot.name, "words");
        let counts: Vec<_> = snapshot.entries.iter().map(|e| e.count).collect();
        assert_eq!(counts, vec![12, 7, 3]);
        assert_eq!(snapshot.get(&"sat"), 7);
        assert_eq!(snapshot.get(&"dog"), 0);
    }

    #[test]
    fn test_snapshot_unnamed() {
        let counter: KeyedCounter<&str> = KeyedCounter::new();
        let snapshot = CounterSnapshot::from_counter(&counter);
        assert_eq!(snapshot.name, "(unnamed)");
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut counter = sample();
        let snapshot = CounterSnapshot::from_counter(&counter);
        counter.clear();
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_snapshot_with_timestamp() {
        let snapshot = CounterSnapshot::from_counter(&sample()).with_timestamp(1234567890);
        assert_eq!(snapshot.timestamp_ms, Some(1234567890));

        let snapshot = CounterSnapshot::from_counter_with_timestamp(&sample());
        assert!(snapshot.timestamp_ms.unwrap() > 0);
    }

    #[test]
    fn test_serialize_snapshot() {
        let snapshot = CounterSnapshot::new("words", vec![EntrySnapshot { key: "the", count: 12 }]);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"name":"words","entries":[{"key":"the","count":12}]}"#);
    }

    #[test]
    fn test_deserialize_snapshot() {
        let json = r#"{"name":"w","timestamp_ms":42,"entries":[{"key":"a","count":2},{"key":"b","count":1}]}"#;
        let snapshot: CounterSnapshot<String, i32> = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.timestamp_ms, Some(42));
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(&"a".to_string()), 2);
    }
}
