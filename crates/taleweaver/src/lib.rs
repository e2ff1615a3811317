//! Taleweaver - personalised illustrated storybooks
//!
//! Taleweaver turns a child's name, age, photo and a theme into a twenty-page
//! storybook. Page text comes from theme templates, each page is illustrated
//! by an external image-generation provider using the photo as a reference,
//! and the finished story is rendered as a PDF.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taleweaver::{
//!     ChildProfile, ImageMediaType, ReferenceImage, StoryExporter, StoryGenerator, StoryTheme,
//!     TaleweaverConfig, TaskImageGenerator,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TaleweaverConfig::load()?;
//!     let photo = ReferenceImage::new(std::fs::read("mia.jpg")?, ImageMediaType::Jpeg);
//!     let child = ChildProfile::new("Mia", 6, photo)?;
//!
//!     let generator = StoryGenerator::new(Arc::new(TaskImageGenerator::from_config(&config)?));
//!     let story = generator.run(&child, StoryTheme::Space).await?;
//!
//!     let document = StoryExporter::from_config(&config.export).export(&story, &child).await?;
//!     document.write_to(".")?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `taleweaver_error` - Error types
//! - `taleweaver_core` - Child profile, story and provider task types
//! - `taleweaver_interface` - `ImageGenerator` trait and progress snapshots
//! - `taleweaver_models` - Provider and proxy clients, retry, configuration
//! - `taleweaver_narrative` - Theme templates, story engine, generation run
//! - `taleweaver_export` - PDF rendering
//! - `taleweaver_server` - Multipart proxy endpoint
//!
//! This crate (`taleweaver`) re-exports everything for convenience.

pub use taleweaver_core::*;
pub use taleweaver_error::*;
pub use taleweaver_export::*;
pub use taleweaver_interface::*;
pub use taleweaver_models::*;
pub use taleweaver_narrative::{
    NAME_PLACEHOLDER, StoryEngine, StoryGenerator, ThemeCatalog, ThemeTemplate, build_story,
    build_story_from_input, image_prompt, page_content,
};
pub use taleweaver_server::{AppError, AppState, GENERATE_IMAGE_PATH, create_router};

pub mod logging;
