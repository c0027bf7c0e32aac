//! Error types for moneyhack

use thiserror::Error;

use crate::types::RawAmount;

/// Core errors that can occur in moneyhack
#[derive(Debug, Error)]
pub enum Error {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Position error: {0}")]
    Position(#[from] PositionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Backend connection and request errors
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend unreachable at {url}")]
    Unreachable { url: String },

    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Authentication rejected")]
    Unauthorized,

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Position and preview errors
#[derive(Debug, Error)]
pub enum PositionError {
    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("Insufficient balance: need {required}, have {available}")]
    InsufficientBalance {
        required: RawAmount,
        available: RawAmount,
    },

    #[error("No active position for {address}")]
    NoPosition { address: String },

    #[error("Withdrawal blocked: {reason}")]
    WithdrawBlocked { reason: String },
}

/// Result type alias for moneyhack operations
pub type Result<T> = std::result::Result<T, Error>;

impl PositionError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::NoPosition { .. } => "no_position",
            Self::WithdrawBlocked { .. } => "withdraw_blocked",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount { .. } => 400,
            Self::InsufficientBalance { .. } | Self::WithdrawBlocked { .. } => 422,
            Self::NoPosition { .. } => 404,
        }
    }
}

impl BackendError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => "backend_unreachable",
            Self::Api { .. } => "backend_error",
            Self::Unauthorized => "unauthorized",
            Self::Parse(_) => "backend_parse_error",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unreachable { .. } => 503,
            Self::Api { status, .. } => *status,
            Self::Unauthorized => 401,
            Self::Parse(_) => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_error_codes() {
        let err = PositionError::InvalidAmount {
            message: "test".into(),
        };
        assert_eq!(err.error_code(), "invalid_amount");
        assert_eq!(err.status_code(), 400);

        let err = PositionError::InsufficientBalance {
            required: 10_000_000,
            available: 5_000_000,
        };
        assert_eq!(err.error_code(), "insufficient_balance");
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_backend_error_codes() {
        let err = BackendError::Api {
            status: 409,
            message: "position already exists".into(),
        };
        assert_eq!(err.error_code(), "backend_error");
        assert_eq!(err.status_code(), 409);

        assert_eq!(BackendError::Unauthorized.status_code(), 401);
    }

    #[test]
    fn test_error_wrapping() {
        let err: Error = PositionError::NoPosition {
            address: "0xabc".into(),
        }
        .into();
        assert!(matches!(err, Error::Position(_)));
    }
}
