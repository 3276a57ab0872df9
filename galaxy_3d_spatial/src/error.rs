//! Error types for the Galaxy3D spatial crate
//!
//! Spatial operations themselves never fail: stale handles are no-ops and
//! degenerate rebuilds fall back silently. Errors only come from
//! configuration and state checks on the public API.

use std::fmt;

/// Result type for Galaxy3D spatial operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D spatial errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A configuration value is out of range
    InvalidConfig(String),

    /// The operation is not allowed in the current state of the structure
    InvalidState(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error at the call site, then evaluate to it (internal use)
///
/// # Example
///
/// ```ignore
/// return Err(spatial_err!(SOURCE, Error::InvalidState("tree is not empty".to_string())));
/// ```
#[macro_export]
macro_rules! spatial_err {
    ($source:expr, $error:expr) => {{
        let error: $crate::galaxy3d::Error = $error;
        $crate::spatial_error!($source, "{}", error);
        error
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
