//! Result type alias for vitalstream
//!
//! Provides a convenient Result type alias that uses [`VitalstreamError`]
//! as the error type.

use super::errors::VitalstreamError;

/// Result type alias for vitalstream operations
///
/// Use this throughout the codebase for fallible operations.
pub type Result<T> = std::result::Result<T, VitalstreamError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::VitalstreamError;

    #[test]
    fn test_result_ok() {
        let result: Result<i32> = Ok(42);
        assert!(result.is_ok());
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(VitalstreamError::Ingest("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
