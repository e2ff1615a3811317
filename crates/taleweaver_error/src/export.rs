//! Document export error types.

/// Kinds of export errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ExportErrorKind {
    /// Page illustration could not be downloaded
    #[display("Failed to fetch image: {}", _0)]
    ImageFetch(String),
    /// Page illustration could not be decoded
    #[display("Failed to decode image: {}", _0)]
    ImageDecode(String),
    /// PDF could not be assembled
    #[display("Failed to render document: {}", _0)]
    Render(String),
    /// Document could not be written to disk
    #[display("Failed to write document: {}", _0)]
    Io(String),
}

impl ExportErrorKind {
    /// Whether the exporter recovers from this error with a per-page placeholder.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExportErrorKind::ImageFetch(_) | ExportErrorKind::ImageDecode(_)
        )
    }
}

/// Export error with location tracking.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{ExportError, ExportErrorKind};
///
/// let err = ExportError::new(ExportErrorKind::ImageFetch("connection refused".to_string()));
/// assert!(err.kind.is_recoverable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Export Error: {} at line {} in {}", kind, line, file)]
pub struct ExportError {
    /// The kind of error that occurred
    pub kind: ExportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExportError {
    /// Create a new export error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
