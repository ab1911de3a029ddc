//! # Contachiavi - Keyed Non-Negative Counters
//!
//! A Rust library providing a map from arbitrary keys to non-negative integer
//! counts. Counters can be incremented, decremented and assigned directly,
//! and a counter that reaches zero disappears from the map instead of being
//! kept as an explicit zero entry.
//!
//! ## The Problem
//!
//! Counting occurrences with a plain `HashMap<K, i32>` looks trivial, but the
//! details leak everywhere:
//!
//! - decrementing needs care to avoid negative counts,
//! - entries that drop to zero linger and inflate `len()`,
//! - `+=` on a count near the type's maximum silently wraps in release builds.
//!
//! ## The Solution
//!
//! [`KeyedCounter`](counters::KeyedCounter) owns the map and enforces three
//! invariants on every operation:
//!
//! 1. **Zero-Elision**: every stored count is at least 1. Subtracting past
//!    zero, assigning zero or removing a key all drop the entry, so `len()`,
//!    `contains()`, `keys()` and iteration only ever see live counters.
//!
//! 2. **Checked Addition**: an addition that would exceed the maximum of the
//!    count type fails with [`CounterError::Overflow`](error::CounterError::Overflow)
//!    and leaves the stored count untouched.
//!
//! 3. **Saturating Subtraction**: subtraction never fails on arithmetic; it
//!    stops at zero and removes the key.
//!
//! Every argument check happens before any mutation, so a failed call
//! never leaves the counter partially updated.
//!
//! ## Quick Start
//!
//! ```rust
//! use contachiavi::counters::KeyedCounter;
//!
//! let mut counter: KeyedCounter<&str> = KeyedCounter::new();
//!
//! counter.add("apple").unwrap();
//! counter.add_by("apple", 2).unwrap();
//! counter.add("pear").unwrap();
//!
//! assert_eq!(counter.get(&"apple"), 3);
//! assert_eq!(counter.subtract(&"pear"), Ok(0));
//! assert_eq!(counter.len(), 1);
//! ```
//!
//! ## Key Equality
//!
//! The notion of "same key" is pluggable through the
//! [`KeyEquivalence`](equivalence::KeyEquivalence) strategy chosen at
//! construction:
//!
//! | Strategy | Description |
//! |----------|-------------|
//! | [`Canonical`](equivalence::Canonical) | The key type's own `Eq + Hash` (default) |
//! | [`Nullable`](equivalence::Nullable) | `Option<T>` keys, rejecting `None` |
//! | [`AsciiCaseInsensitive`](equivalence::AsciiCaseInsensitive) | Case-folded string keys |
//!
//! ## Thread Safety
//!
//! The counter performs no internal locking. All mutations take `&mut self`;
//! share it across threads behind a `Mutex` if needed.
//!
//! ## Logging
//!
//! Operations emit [`tracing`] events: `TRACE` when entries are created or
//! removed, `DEBUG` when a call is rejected. The library never installs a
//! subscriber.
//!
//! ## Observers
//!
//! Optional modules export the contents of a counter, each gated behind a
//! feature flag:
//!
//! | Feature | Module | Description |
//! |---------|--------|-------------|
//! | `serde` | [`snapshot`] | Serializable point-in-time snapshots |
//! | `table` | [`observers::table`] | Pretty-print counters as ASCII tables |
//! | `json` | [`observers::json`] | Serialize counters to JSON |
//! | `full` | All observers | Enables all observer modules |
//!
//! ### Example: Table Output
//!
//! ```toml
//! [dependencies]
//! contachiavi = { version = "0.1", features = ["table"] }
//! ```
//!
//! ```rust,ignore
//! use contachiavi::counters::KeyedCounter;
//! use contachiavi::observers::table::TableObserver;
//!
//! let mut words: KeyedCounter<&str> = KeyedCounter::new().with_name("words");
//! words.add_by("the", 12)?;
//! words.add_by("cat", 3)?;
//!
//! println!("{}", TableObserver::new().limit(10).render(&words));
//! ```

pub mod counters;
pub mod equivalence;
pub mod error;
pub mod observers;

#[cfg(feature = "serde")]
pub mod snapshot;
