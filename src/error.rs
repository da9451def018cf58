use thiserror::Error;

/// Main error type for the screening service
#[derive(Error, Debug)]
pub enum VitalisError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Registry errors
    #[error("Unknown disease: {0}")]
    UnknownDisease(String),

    #[error("Model load failed for {disease} ({path}): {reason}")]
    ModelLoad {
        disease: String,
        path: String,
        reason: String,
    },

    // Submission errors
    #[error("Please complete all fields. Missing: {}", .missing.join(", "))]
    IncompleteSubmission { missing: Vec<String> },

    #[error("Field {field} is not numeric: {value}")]
    Coercion { field: String, value: String },

    // Prediction errors
    #[error("Predictor output {raw} is outside the expected 0/1 label domain")]
    PredictionOutOfDomain { raw: f64 },

    #[error("Prediction failed: {0}")]
    Prediction(String),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for VitalisError
pub type Result<T> = std::result::Result<T, VitalisError>;

impl VitalisError {
    /// Whether the error is a user-correctable submission problem rather
    /// than a server-side failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            VitalisError::IncompleteSubmission { .. }
                | VitalisError::Coercion { .. }
                | VitalisError::UnknownDisease(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_submission_lists_missing_fields() {
        let err = VitalisError::IncompleteSubmission {
            missing: vec!["TSH".to_string(), "T3".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Please complete all fields"));
        assert!(msg.contains("TSH, T3"));
        assert!(err.is_user_error());
    }

    #[test]
    fn out_of_domain_is_not_a_user_error() {
        let err = VitalisError::PredictionOutOfDomain { raw: 3.0 };
        assert!(!err.is_user_error());
    }
}
