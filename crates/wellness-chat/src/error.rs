//! Error types for the dialog engine.

use wellness_core::WellnessError;

/// Errors from the dialog engine.
///
/// Every variant is absorbed by the controller into a user-facing message;
/// none escapes a conversation session.
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("no authenticated user")]
    NotAuthenticated,
    #[error("slot store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("AI service unavailable: {0}")]
    AiUnavailable(String),
}

impl From<WellnessError> for DialogError {
    fn from(err: WellnessError) -> Self {
        match err {
            WellnessError::Ai(msg) => DialogError::AiUnavailable(msg),
            other => DialogError::StoreUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_error_display() {
        assert_eq!(
            DialogError::NotAuthenticated.to_string(),
            "no authenticated user"
        );
        assert_eq!(
            DialogError::StoreUnavailable("timeout".to_string()).to_string(),
            "slot store unavailable: timeout"
        );
        assert_eq!(
            DialogError::AiUnavailable("502".to_string()).to_string(),
            "AI service unavailable: 502"
        );
    }

    #[test]
    fn test_from_wellness_store_error() {
        let err: DialogError = WellnessError::Store("connection lost".to_string()).into();
        assert!(matches!(err, DialogError::StoreUnavailable(_)));
        assert!(err.to_string().contains("connection lost"));
    }

    #[test]
    fn test_from_wellness_ai_error() {
        let err: DialogError = WellnessError::Ai("model overloaded".to_string()).into();
        assert!(matches!(err, DialogError::AiUnavailable(_)));
    }
}
