//! Error types for completion operations.
//!
//! The main error type is [`LlmError`], which covers every failure mode this
//! crate can surface:
//! - Output-format resolution failures (unrecognized format hints)
//! - Malformed or incomplete completion responses
//! - Failures raised by caller-supplied converters
//! - Connection configuration problems
//! - Request-level failures (network, authentication, rate limiting)
//!
//! Errors are distinguishable by kind so a caller can decide whether to retry
//! (service-level issues) or reformulate its request (format and schema
//! mismatches). Use [`LlmError::is_retryable`] and [`LlmError::category`] for
//! that routing; no error is retried inside this crate.

use crate::logging::{log_error, log_warn};
use thiserror::Error;

/// High-level categorization of errors for routing and handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// External service failures (the completion API, network issues).
    External,

    /// Client errors (invalid format hint, bad configuration, credentials).
    ///
    /// The caller made a mistake that they can fix before the next call.
    Client,

    /// Temporary failures that a caller may retry with backoff.
    Transient,
}

/// Severity level for logging and alerting decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Action failed but the system is stable.
    Error,

    /// Unexpected but recoverable situation.
    Warning,

    /// Expected failure (e.g. validation error).
    Info,
}

/// Convenient result type for completion operations.
pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// Errors that can occur while resolving formats, executing a completion
/// request, or converting its response.
///
/// # Error Categories
///
/// | Variant | Category | Retryable |
/// |---------|----------|-----------|
/// | `UnsupportedFormatKind` | Client | No |
/// | `MalformedResponse` | External | No |
/// | `ConversionFailure` | Client | No |
/// | `ConfigurationError` | Client | No |
/// | `RequestFailed` | External | Yes |
/// | `AuthenticationFailed` | Client | No |
/// | `RateLimitExceeded` | Transient | Yes |
#[derive(Error, Debug)]
pub enum LlmError {
    /// The output-format hint matches none of the recognized shapes.
    ///
    /// Surfaced at resolution time, before any network call is made.
    #[error("Unsupported output format kind: {kind}")]
    UnsupportedFormatKind {
        /// The hint token or description that failed to resolve.
        kind: String,
    },

    /// The completion response lacks the content the requested shape requires.
    ///
    /// Missing text, or a structured payload that is absent or fails schema
    /// validation.
    #[error("Malformed completion response: {message}")]
    MalformedResponse {
        /// Details about the missing or invalid content.
        message: String,
    },

    /// A caller-supplied converter's own conversion operation failed.
    ///
    /// The underlying cause is preserved as the error source; this crate
    /// wraps but never suppresses it.
    #[error("Custom conversion failed: {message}")]
    ConversionFailure {
        /// Description of the converter failure.
        message: String,
        /// The converter's original error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Connection configuration is invalid or incomplete.
    ///
    /// Common causes:
    /// - The connection file does not exist or holds invalid JSON
    /// - Empty model, base URL, or API key fields
    #[error("Connection configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The HTTP request to the completion service failed.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Authentication with the completion service failed.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Details about the authentication failure.
        message: String,
    },

    /// The completion service is throttling requests.
    #[error("Rate limit exceeded, retry after {retry_after_seconds}s")]
    RateLimitExceeded {
        /// Recommended wait time before the caller retries.
        retry_after_seconds: u64,
    },
}

impl LlmError {
    /// Get the error category for routing and handling decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedFormatKind { .. } => ErrorCategory::Client,
            Self::MalformedResponse { .. } => ErrorCategory::External,
            Self::ConversionFailure { .. } => ErrorCategory::Client,
            Self::ConfigurationError { .. } => ErrorCategory::Client,
            Self::RequestFailed { .. } => ErrorCategory::External,
            Self::AuthenticationFailed { .. } => ErrorCategory::Client,
            Self::RateLimitExceeded { .. } => ErrorCategory::Transient,
        }
    }

    /// Get the error severity for logging and alerting.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnsupportedFormatKind { .. } => ErrorSeverity::Info,
            Self::MalformedResponse { .. } => ErrorSeverity::Warning,
            Self::ConversionFailure { .. } => ErrorSeverity::Error,
            Self::ConfigurationError { .. } => ErrorSeverity::Error,
            Self::RequestFailed { .. } => ErrorSeverity::Error,
            Self::AuthenticationFailed { .. } => ErrorSeverity::Error,
            Self::RateLimitExceeded { .. } => ErrorSeverity::Warning,
        }
    }

    /// Whether this error is transient and a caller may retry it.
    ///
    /// This crate itself performs exactly one attempt per call; retry policy
    /// belongs to the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed { .. } | Self::RateLimitExceeded { .. }
        )
    }

    /// Convert to a user-friendly message suitable for display.
    ///
    /// Technical details and credentials are stripped or generalized.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedFormatKind { .. } => {
                "The requested output format is not supported".to_string()
            }
            Self::MalformedResponse { .. } => {
                "Received an invalid response from the AI service".to_string()
            }
            Self::ConversionFailure { .. } => {
                "Unable to convert the AI response into the requested shape".to_string()
            }
            Self::ConfigurationError { .. } => {
                "Connection configuration issue. Please check your settings".to_string()
            }
            Self::RequestFailed { .. } => {
                "Unable to communicate with the AI service. Please try again".to_string()
            }
            Self::AuthenticationFailed { .. } => {
                "Authentication failed. Please check your credentials".to_string()
            }
            Self::RateLimitExceeded {
                retry_after_seconds,
            } => {
                format!("Service is busy. Please wait {retry_after_seconds} seconds and try again")
            }
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================
    //
    // These methods log the error at the appropriate level on creation.
    // Use them instead of constructing variants directly.

    pub fn unsupported_format_kind(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        log_warn!(
            error_type = "unsupported_format_kind",
            kind = %kind,
            "Output format hint did not resolve"
        );
        Self::UnsupportedFormatKind { kind }
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "malformed_response",
            message = %message,
            "Completion response missing required content"
        );
        Self::MalformedResponse { message }
    }

    pub fn conversion_failure(source: anyhow::Error) -> Self {
        let message = source.to_string();
        log_error!(
            error_type = "conversion_failure",
            message = %message,
            "Custom converter raised during conversion"
        );
        Self::ConversionFailure {
            message,
            source: Some(source.into()),
        }
    }

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Connection configuration validation failed"
        );
        Self::ConfigurationError { message }
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "request_failed",
            message = %message,
            has_source = source.is_some(),
            "Completion request execution failed"
        );
        Self::RequestFailed { message, source }
    }

    pub fn authentication_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "authentication_failed",
            message = %message,
            "Completion service authentication failed"
        );
        Self::AuthenticationFailed { message }
    }

    pub fn rate_limit_exceeded(retry_after_seconds: u64) -> Self {
        log_warn!(
            error_type = "rate_limit_exceeded",
            retry_after_seconds = retry_after_seconds,
            "Completion service rate limit exceeded"
        );
        Self::RateLimitExceeded {
            retry_after_seconds,
        }
    }
}
