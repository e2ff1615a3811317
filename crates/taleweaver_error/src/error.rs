//! Top-level error wrapper types.

use crate::{ConfigError, ExportError, ProviderError, RunError, ServerError, ValidationError};

/// Every failure a Taleweaver operation can surface.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{TaleweaverError, ConfigError};
///
/// let err: TaleweaverError = ConfigError::new("missing base_url").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TaleweaverErrorKind {
    /// Caller input rejected
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Image provider or proxy failure
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Generation run aborted
    #[from(RunError)]
    Run(RunError),
    /// Document export failure
    #[from(ExportError)]
    Export(ExportError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Proxy server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Taleweaver error with kind discrimination.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{TaleweaverErrorKind, TaleweaverResult, RunError, RunErrorKind};
///
/// fn might_fail() -> TaleweaverResult<()> {
///     Err(RunError::new(RunErrorKind::EmptyStory))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), TaleweaverErrorKind::Run(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Taleweaver Error: {}", _0)]
pub struct TaleweaverError(Box<TaleweaverErrorKind>);

impl TaleweaverError {
    /// Create a new error from a kind.
    pub fn new(kind: TaleweaverErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TaleweaverErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to TaleweaverErrorKind
impl<T> From<T> for TaleweaverError
where
    T: Into<TaleweaverErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Taleweaver operations.
pub type TaleweaverResult<T> = std::result::Result<T, TaleweaverError>;
