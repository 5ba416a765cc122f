use serde::Serialize;

/// Errors surfaced by the desk commands. The synthesizer itself is total.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ── Signals ──
    #[error("Signal not found: {0}")]
    SignalNotFound(String),

    // ── Configuration ──
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read configuration: {0}")]
    ConfigRead(String),

    // ── Serialization / Export ──
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Failed to write file: {0}")]
    FileWrite(String),

    // ── General ──
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Serializable error body returned to callers of the desk commands.
#[derive(Debug, Serialize, Clone)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::SignalNotFound(_) => "SIGNAL_NOT_FOUND",
            AppError::InvalidConfig(_) => "INVALID_CONFIG",
            AppError::ConfigRead(_) => "CONFIG_READ",
            AppError::Serialization(_) => "SERIALIZATION",
            AppError::FileWrite(_) => "FILE_WRITE",
            AppError::Internal(_) => "INTERNAL",
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        ErrorResponse {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ErrorResponse::from(self).serialize(serializer)
    }
}

// ── Conversions from external errors ──

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::FileWrite(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileWrite(err.to_string())
    }
}
