//! Error types for the Pay Period Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving pay periods or
//! aggregating punches.

use thiserror::Error;

/// The main error type for the Pay Period Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use pay_period_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The record store returned a non-success response.
    ///
    /// Store failures are always fatal to the enclosing operation and are
    /// never retried by the engine. The failing table and a description of
    /// the filter are carried for diagnosis.
    #[error("Record store request failed for table '{table}': {detail}")]
    StoreRequest {
        /// The table the failing request was addressed to.
        table: String,
        /// What failed, including the filter that was applied.
        detail: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No pay period record exists with the requested id.
    #[error("Pay period not found: {id}")]
    PayPeriodNotFound {
        /// The record id that was requested.
        id: String,
    },

    /// A record was missing a field the operation cannot proceed without.
    #[error("Record '{record_id}' in table '{table}' is missing field '{field}'")]
    MissingField {
        /// The table the record came from.
        table: String,
        /// The id of the offending record.
        record_id: String,
        /// The field that was absent or empty.
        field: String,
    },

    /// A date field could not be interpreted as a calendar date.
    #[error("Invalid date in field '{field}': '{value}'")]
    InvalidDate {
        /// The field holding the bad value.
        field: String,
        /// The raw value that failed to parse.
        value: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_request_displays_table_and_detail() {
        let error = EngineError::StoreRequest {
            table: "punches".to_string(),
            detail: "punch_in_time in [2025-11-11, 2025-11-25]: HTTP 503".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Record store request failed for table 'punches': \
             punch_in_time in [2025-11-11, 2025-11-25]: HTTP 503"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_pay_period_not_found_displays_id() {
        let error = EngineError::PayPeriodNotFound {
            id: "pp_001".to_string(),
        };
        assert_eq!(error.to_string(), "Pay period not found: pp_001");
    }

    #[test]
    fn test_missing_field_displays_location() {
        let error = EngineError::MissingField {
            table: "pay_periods".to_string(),
            record_id: "pp_001".to_string(),
            field: "start_date".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Record 'pp_001' in table 'pay_periods' is missing field 'start_date'"
        );
    }

    #[test]
    fn test_invalid_date_displays_field_and_value() {
        let error = EngineError::InvalidDate {
            field: "start_date".to_string(),
            value: "not-a-date".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date in field 'start_date': 'not-a-date'"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_store_error() -> EngineResult<()> {
            Err(EngineError::StoreRequest {
                table: "departments".to_string(),
                detail: "connection refused".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_store_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
