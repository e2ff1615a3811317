//! Exported document and per-page render report.

use std::path::{Path, PathBuf};
use taleweaver_error::{ExportError, ExportErrorKind};
use tracing::{info, instrument};

/// Why a page shows a placeholder instead of its illustration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PlaceholderReason {
    /// The page has no image, or generation left the placeholder sentinel
    #[display("Image not available")]
    NotAvailable,
    /// The image URL could not be fetched or decoded
    #[display("Image loading failed")]
    LoadFailed(String),
}

/// What was drawn in a page's illustration slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Illustration {
    /// The fetched image was embedded
    Embedded {
        /// Source URL
        url: String,
    },
    /// A themed placeholder box was drawn
    Placeholder(PlaceholderReason),
}

impl Illustration {
    /// Whether the page carries a real image.
    pub fn is_embedded(&self) -> bool {
        matches!(self, Illustration::Embedded { .. })
    }
}

/// Render outcome for one story page.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct PageReport {
    /// 1-based story page number
    number: usize,
    /// What filled the illustration slot
    illustration: Illustration,
}

impl PageReport {
    /// Create a report entry.
    pub fn new(number: usize, illustration: Illustration) -> Self {
        Self {
            number,
            illustration,
        }
    }
}

/// A rendered storybook.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ExportedDocument {
    /// Suggested file name, `<childName>_Storybook.pdf`
    filename: String,
    /// PDF bytes
    bytes: Vec<u8>,
    /// One entry per story page, in order
    pages: Vec<PageReport>,
}

impl ExportedDocument {
    /// Create a document.
    pub fn new(filename: String, bytes: Vec<u8>, pages: Vec<PageReport>) -> Self {
        Self {
            filename,
            bytes,
            pages,
        }
    }

    /// Number of pages that show a real image.
    pub fn embedded_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|page| page.illustration.is_embedded())
            .count()
    }

    /// Write the document into `dir` under its file name.
    ///
    /// # Errors
    ///
    /// Returns [`ExportErrorKind::Io`] if the file cannot be written.
    #[instrument(skip(self, dir), fields(filename = %self.filename, dir = %dir.as_ref().display()))]
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, &self.bytes).map_err(|e| {
            ExportError::new(ExportErrorKind::Io(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        info!(path = %path.display(), bytes = self.bytes.len(), "Storybook written");
        Ok(path)
    }
}

/// File name for a child's storybook.
///
/// # Examples
///
/// ```
/// use taleweaver_export::storybook_filename;
///
/// assert_eq!(storybook_filename("Mia"), "Mia_Storybook.pdf");
/// assert_eq!(storybook_filename("../etc/Mia"), ".._etc_Mia_Storybook.pdf");
/// ```
pub fn storybook_filename(child_name: &str) -> String {
    let safe: String = child_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{safe}_Storybook.pdf")
}
