//! Centralized Error Handling Module
//!
//! Setiap kegagalan harus memiliki kode error yang unik untuk memudahkan
//! debugging dan monitoring di production.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - INPUT_xxx: signal-file / request plumbing errors
//! - CFG_xxx: configuration errors
//!
//! The scoring core itself never errors on absent optional signals; those
//! default to neutral values. This type only covers the plumbing around it.

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Signal file could not be read
    InputFileUnreadable,
    /// Signal file is not valid JSON / does not match the input contract
    InputInvalidJson,
    /// Contract address is malformed
    InputInvalidAddress,
    /// Invalid configuration value
    ConfigInvalidValue,
    /// Chain name not recognized
    ConfigUnsupportedChain,
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InputFileUnreadable => "INPUT_FILE_UNREADABLE",
            Self::InputInvalidJson => "INPUT_INVALID_JSON",
            Self::InputInvalidAddress => "INPUT_INVALID_ADDRESS",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
            Self::ConfigUnsupportedChain => "CFG_UNSUPPORTED_CHAIN",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InputInvalidAddress, msg)
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }

    pub fn unsupported_chain(name: &str) -> Self {
        Self::new(
            ErrorCode::ConfigUnsupportedChain,
            format!("Unsupported chain: {}", name),
        )
    }
}

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::InputFileUnreadable, "IO error", err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::InputInvalidJson, "JSON parse error", err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}
