//! Error types.
//!
//! - `GenerateError` is the library-level error returned by the calendar,
//!   generator and enrichment code.
//! - `AppError` is what the binary reports: a message plus a process exit code.

use thiserror::Error;

/// Failure modes of the generation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The requested year range is empty or outside the supported calendar.
    #[error("invalid year range {start}..={end}: {reason}")]
    InvalidRange { start: i32, end: i32, reason: String },

    /// A row handed to enrichment has no usable timestamp (or contradicts it).
    ///
    /// `row` is 1-based, counted over data rows.
    #[error("malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    /// The caller raised the cancel flag; nothing was produced.
    #[error("generation cancelled")]
    Cancelled,

    /// A preset carries constants a noise distribution rejects.
    #[error("invalid model parameters: {0}")]
    InvalidParams(String),
}

impl GenerateError {
    pub fn invalid_range(start: i32, end: i32, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            start,
            end,
            reason: reason.into(),
        }
    }

    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            row,
            reason: reason.into(),
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<GenerateError> for AppError {
    fn from(err: GenerateError) -> Self {
        let exit_code = match err {
            GenerateError::InvalidRange { .. } | GenerateError::MalformedRecord { .. } => 2,
            GenerateError::Cancelled | GenerateError::InvalidParams(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_errors_map_to_exit_codes() {
        let range: AppError = GenerateError::invalid_range(2025, 2024, "start after end").into();
        assert_eq!(range.exit_code(), 2);
        assert!(range.message().contains("2025..=2024"));

        let malformed: AppError = GenerateError::malformed(7, "missing timestamp").into();
        assert_eq!(malformed.exit_code(), 2);
        assert!(malformed.message().contains("row 7"));

        let cancelled: AppError = GenerateError::Cancelled.into();
        assert_eq!(cancelled.exit_code(), 4);
    }
}
