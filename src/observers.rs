//! Observer implementations for exporting counter contents.
//!
//! This module provides ways to render or serialize a
//! [`KeyedCounter`](crate::counters::KeyedCounter):
//!
//! - [`table`] - Pretty-print counters as tables using the `tabled` crate
//! - [`json`] - Serialize counters to JSON format
//!
//! # Unified Error Handling
//!
//! Fallible observers share a unified `ObserverError` type (available with
//! the `json` feature); the table observer renders infallibly.
//!
//! # Feature Flags
//!
//! Each observer is gated behind a feature flag to minimize dependencies:
//!
//! - `table` - Enables the [`table`] module
//! - `json` - Enables the [`json`] module
//! - `full` - Enables all observer modules
//!
//! # Example
//!
//! ```rust,ignore
//! use contachiavi::counters::KeyedCounter;
//! use contachiavi::observers::Result;
//!
//! fn export(words: &KeyedCounter<String>) -> Result<()> {
//!     #[cfg(feature = "table")]
//!     {
//!         use contachiavi::observers::table::TableObserver;
//!         println!("{}", TableObserver::new().limit(20).render(words));
//!     }
//!
//!     #[cfg(feature = "json")]
//!     {
//!         use contachiavi::observers::json::JsonObserver;
//!         println!("{}", JsonObserver::new().pretty(true).to_json(words)?);
//!     }
//!
//!     Ok(())
//! }
//! ```

#[cfg(feature = "json")]
mod error;

#[cfg(feature = "json")]
pub use error::{ObserverError, Result};

#[cfg(feature = "table")]
pub mod table;

#[cfg(feature = "json")]
pub mod json;
