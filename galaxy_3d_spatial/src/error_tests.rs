//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_config_display() {
    let err = Error::InvalidConfig("update_tolerance must be finite".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid configuration"));
    assert!(display.contains("update_tolerance must be finite"));
}

#[test]
fn test_invalid_state_display() {
    let err = Error::InvalidState("tree is not empty".to_string());
    let display = format!("{}", err);
    assert_eq!(display, "Invalid state: tree is not empty");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidState("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let debug1 = format!("{:?}", Error::InvalidConfig("a".to_string()));
    assert!(debug1.contains("InvalidConfig"));

    let debug2 = format!("{:?}", Error::InvalidState("b".to_string()));
    assert!(debug2.contains("InvalidState"));
}

#[test]
fn test_error_clone_and_eq() {
    let err1 = Error::InvalidConfig("threshold".to_string());
    let err2 = err1.clone();
    assert_eq!(err1, err2);
    assert_ne!(err1, Error::InvalidState("threshold".to_string()));
}

// ============================================================================
// RESULT TYPE TESTS
// ============================================================================

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::InvalidState("inner".to_string()))
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert_eq!(outer(), Err(Error::InvalidState("inner".to_string())));
}

#[test]
fn test_spatial_err_passes_error_through() {
    let err = crate::spatial_err!(
        "galaxy3d::test",
        Error::InvalidConfig("passthrough".to_string())
    );
    assert_eq!(err, Error::InvalidConfig("passthrough".to_string()));
}
