//! JSON observer for serializing counters.
//!
//! This module provides [`JsonObserver`], which serializes the entries of a
//! [`KeyedCounter`] to JSON through [`CounterSnapshot`].
//!
//! # Feature Flag
//!
//! This module requires the `json` feature:
//!
//! ```toml
//! [dependencies]
//! contachiavi = { version = "0.1", features = ["json"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use contachiavi::counters::KeyedCounter;
//! use contachiavi::observers::json::JsonObserver;
//!
//! let mut words: KeyedCounter<&str> = KeyedCounter::new().with_name("words");
//! words.add_by("the", 1000)?;
//! words.add_by("cat", 5)?;
//!
//! let json = JsonObserver::new().to_json(&words)?;
//! // {"name":"words","entries":[{"key":"the","count":1000},{"key":"cat","count":5}]}
//! ```

use serde::Serialize;

use crate::counters::{Count, KeyedCounter};
use crate::observers::Result;
use crate::snapshot::CounterSnapshot;

/// Configuration for the JSON observer.
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Whether to pretty-print the JSON output.
    pub pretty: bool,
    /// Whether to include a timestamp in the output.
    pub include_timestamp: bool,
}

/// An observer that serializes counters to JSON format.
///
/// # Examples
///
/// ```rust,ignore
/// use contachiavi::observers::json::JsonObserver;
///
/// let observer = JsonObserver::new()
///     .pretty(true)
///     .include_timestamp(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonObserver {
    config: JsonConfig,
}

impl JsonObserver {
    /// Creates a new JSON observer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new JSON observer with the specified configuration.
    pub fn with_config(config: JsonConfig) -> Self {
        Self { config }
    }

    /// Enables or disables pretty-printing.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.config.pretty = enabled;
        self
    }

    /// Enables or disables timestamp inclusion.
    pub fn include_timestamp(mut self, enabled: bool) -> Self {
        self.config.include_timestamp = enabled;
        self
    }

    /// Captures `counter` into a [`CounterSnapshot`] according to the configuration.
    pub fn collect<K: Clone, C: Count, E, S>(
        &self,
        counter: &KeyedCounter<K, C, E, S>,
    ) -> CounterSnapshot<K, C> {
        if self.config.include_timestamp {
            CounterSnapshot::from_counter_with_timestamp(counter)
        } else {
            CounterSnapshot::from_counter(counter)
        }
    }

    /// Serializes the entries of `counter` to a JSON string.
    pub fn to_json<K, C, E, S>(&self, counter: &KeyedCounter<K, C, E, S>) -> Result<String>
    where
        K: Clone + Serialize,
        C: Count + Serialize,
    {
        let snapshot = self.collect(counter);
        let json = if self.config.pretty {
            serde_json::to_string_pretty(&snapshot)?
        } else {
            serde_json::to_string(&snapshot)?
        };
        Ok(json)
    }

    /// Serializes the entries of `counter` to a JSON byte vector.
    pub fn to_json_bytes<K, C, E, S>(&self, counter: &KeyedCounter<K, C, E, S>) -> Result<Vec<u8>>
    where
        K: Clone + Serialize,
        C: Count + Serialize,
    {
        Ok(serde_json::to_vec(&self.collect(counter))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_empty() {
        let counter: KeyedCounter<&str> = KeyedCounter::new();
        let json = JsonObserver::new().to_json(&counter).unwrap();
        assert_eq!(json, r#"{"name":"(unnamed)","entries":[]}"#);
    }

    #[test]
    fn test_to_json_entries() {
        let mut counter: KeyedCounter<&str> = KeyedCounter::new().with_name("words");
        counter.set("the", 1000).unwrap();
        counter.set("cat", 5).unwrap();

        let json = JsonObserver::new().to_json(&counter).unwrap();
        assert_eq!(
            json,
            r#"{"name":"words","entries":[{"key":"the","count":1000},{"key":"cat","count":5}]}"#
        );
    }

    #[test]
    fn test_to_json_pretty() {
        let mut counter: KeyedCounter<&str> = KeyedCounter::new();
        counter.add("abc").unwrap();
        let json = JsonObserver::new().pretty(true).to_json(&counter).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"abc\""));
    }

    #[test]
    fn test_to_json_with_timestamp() {
        let counter: KeyedCounter<&str> = KeyedCounter::new();
        let json = JsonObserver::new()
            .include_timestamp(true)
            .to_json(&counter)
            .unwrap();
        assert!(json.contains("timestamp_ms"));
    }

    #[test]
    fn test_to_json_bytes() {
        let mut counter: KeyedCounter<u32> = KeyedCounter::new();
        counter.set(7, 3).unwrap();
        let bytes = JsonObserver::new().to_json_bytes(&counter).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains(r#"{"key":7,"count":3}"#));
    }

    #[test]
    fn test_to_json_case_insensitive_counter() {
        use crate::equivalence::AsciiCaseInsensitive;

        let mut counter: KeyedCounter<&str, i32, AsciiCaseInsensitive> =
            KeyedCounter::with_equivalence(None).with_name("words");
        counter.add("The").unwrap();
        counter.add("THE").unwrap();

        let json = JsonObserver::new().to_json(&counter).unwrap();
        assert_eq!(
            json,
            r#"{"name":"words","entries":[{"key":"The","count":2}]}"#
        );
    }
}
