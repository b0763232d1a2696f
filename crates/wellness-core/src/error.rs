use thiserror::Error;

/// Top-level error type for the wellness assistant.
///
/// Each variant wraps a subsystem-specific failure. The dialog engine crate
/// defines its own error type and implements `From<WellnessError>` so the
/// `?` operator works across the crate boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WellnessError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("AI service error: {0}")]
    Ai(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for WellnessError {
    fn from(err: toml::de::Error) -> Self {
        WellnessError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for WellnessError {
    fn from(err: toml::ser::Error) -> Self {
        WellnessError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for WellnessError {
    fn from(err: serde_json::Error) -> Self {
        WellnessError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for wellness assistant operations.
pub type Result<T> = std::result::Result<T, WellnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WellnessError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = WellnessError::Store("unreachable".to_string());
        assert_eq!(err.to_string(), "Store error: unreachable");

        let err = WellnessError::Ai("timed out".to_string());
        assert_eq!(err.to_string(), "AI service error: timed out");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WellnessError = io_err.into();
        assert!(matches!(err, WellnessError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let bad_toml = "invalid = [[[";
        let parsed: std::result::Result<toml::Value, _> = toml::from_str(bad_toml);
        let err: WellnessError = parsed.unwrap_err().into();
        assert!(matches!(err, WellnessError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let bad_json = "{ invalid json }";
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str(bad_json);
        let err: WellnessError = parsed.unwrap_err().into();
        assert!(matches!(err, WellnessError::Serialization(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let _value = io_result?;
            Ok("success".to_string())
        }

        assert_eq!(inner().unwrap(), "success");
    }
}
