//! Input validation errors.

/// Reasons caller input is rejected before any generation starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Child name is empty or whitespace
    #[display("Child's name is required")]
    EmptyName,
    /// Age outside the supported range
    #[display("Please enter a valid age between 1-12 (got {})", _0)]
    AgeOutOfRange(u8),
    /// Reference photo has no bytes
    #[display("Please upload a photo of your child")]
    EmptyImage,
    /// Reference photo is not JPEG, PNG or WebP
    #[display("Unsupported image type: {}", _0)]
    UnsupportedMediaType(String),
    /// A required request field is absent
    #[display("Missing required field: {}", _0)]
    MissingField(String),
    /// Request body has the wrong content type
    #[display("Content-Type must be multipart/form-data")]
    InvalidContentType,
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::AgeOutOfRange(15));
/// assert!(format!("{}", err).contains("1-12"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
