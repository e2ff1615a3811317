//! Story templating and generation orchestration for Taleweaver.
//!
//! This crate provides:
//! - [`ThemeCatalog`]: title patterns and per-page scenarios, built in or
//!   loaded from TOML
//! - [`StoryEngine`]: turns a child's name, age and theme into a story skeleton
//! - [`StoryGenerator`]: illustrates a story page by page and publishes
//!   progress snapshots

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod orchestrator;
mod themes;

pub use engine::{StoryEngine, build_story, build_story_from_input, image_prompt, page_content};
pub use orchestrator::StoryGenerator;
pub use themes::{NAME_PLACEHOLDER, ThemeCatalog, ThemeTemplate};
