//! Image provider errors and retry classification.

/// Failure conditions when talking to the image-generation provider or the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Remote call returned a non-success HTTP status
    #[display("HTTP {} error: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Error message from the response body, if any
        message: String,
    },
    /// Request could not be sent or the response could not be read
    #[display("Transport error: {}", _0)]
    Transport(String),
    /// Task reached a failed terminal state
    #[display("Image generation failed: {}", _0)]
    GenerationFailed(String),
    /// Task succeeded without any output URL
    #[display("No output image generated")]
    EmptyOutput,
    /// Task did not reach a terminal state before the deadline
    #[display("Image generation timed out after {} seconds", _0)]
    Timeout(u64),
    /// Response body did not match the expected shape
    #[display("Invalid provider response: {}", _0)]
    InvalidResponse(String),
    /// Provider credential is not configured
    #[display("{} environment variable not set", _0)]
    MissingCredential(String),
}

impl ProviderErrorKind {
    /// Check if this error should be retried.
    ///
    /// Only rate limiting (429) and server-side (5xx) statuses are transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderErrorKind::HttpStatus { status_code, .. } => {
                *status_code == 429 || (500..=599).contains(status_code)
            }
            _ => false,
        }
    }
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{ProviderError, ProviderErrorKind, RetryableError};
///
/// let err = ProviderError::new(ProviderErrorKind::HttpStatus {
///     status_code: 429,
///     message: "Too many requests".to_string(),
/// });
/// assert!(err.is_retryable());
///
/// let err = ProviderError::new(ProviderErrorKind::EmptyOutput);
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match &self.kind {
            ProviderErrorKind::HttpStatus { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Trait for errors that support retry logic.
///
/// Transient errors like 503 (service unavailable) or 429 (rate limit) return
/// true. Permanent errors like 401 (unauthorized) or a failed task return false.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for ProviderError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
