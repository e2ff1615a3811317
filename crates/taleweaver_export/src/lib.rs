//! PDF storybook export for Taleweaver.
//!
//! [`StoryExporter`] renders a completed [`Story`](taleweaver_core::Story) as
//! an A4 PDF: a cover filled with the theme's primary colour, then one page
//! per story page with its heading, illustration (or a themed placeholder)
//! and body text.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod document;
mod exporter;
mod layout;
mod palette;

pub use document::{ExportedDocument, Illustration, PageReport, PlaceholderReason, storybook_filename};
pub use exporter::StoryExporter;
pub use layout::{fit_within, wrap_text, Weight};
pub use palette::{RgbColor, ThemePalette};
