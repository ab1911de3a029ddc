//! Unified error type for all observers.
//!
//! This module provides a unified [`ObserverError`] type that wraps the
//! encoding failures an export can hit, so client code can switch between
//! output formats without changing its error handling.
//!
//! # Example
//!
//! ```rust,ignore
//! use contachiavi::observers::{Result, ObserverError};
//!
//! fn export_words() -> Result<String> {
//!     // Works with any observer - same error type!
//!     Ok(String::new())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all observer operations.
#[derive(Debug, Error)]
pub enum ObserverError {
    /// Error from the JSON observer.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for observer operations.
pub type Result<T> = std::result::Result<T, ObserverError>;
