//! Errors that abort a whole generation run.

/// Conditions that stop a run before or while pages are generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RunErrorKind {
    /// Story has no pages to illustrate
    #[display("Story has no pages")]
    EmptyStory,
    /// Reference photo has no bytes
    #[display("Reference image is empty")]
    EmptyReferenceImage,
    /// Theme templates could not be loaded or are malformed
    #[display("Template error: {}", _0)]
    Template(String),
    /// Page index outside the story
    #[display("Story has no page at index {}", _0)]
    PageOutOfRange(usize),
    /// A page image was written twice
    #[display("Image for page {} was already set", _0)]
    ImageAlreadySet(usize),
}

/// Run abort error with location tracking.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{RunError, RunErrorKind};
///
/// let err = RunError::new(RunErrorKind::EmptyStory);
/// assert!(format!("{}", err).contains("no pages"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Run Error: {} at line {} in {}", kind, line, file)]
pub struct RunError {
    /// The specific error condition
    pub kind: RunErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl RunError {
    /// Create a new RunError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RunErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
