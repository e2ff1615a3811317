//! Core data types for Taleweaver.
//!
//! This crate provides the story data model shared by the template engine,
//! the generation orchestrator, the image clients and the document exporter.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod child;
mod media;
mod story;
mod task;
mod theme;

pub use child::{ChildProfile, MAX_CHILD_AGE, MIN_CHILD_AGE};
pub use media::{ImageMediaType, ReferenceImage};
pub use story::{PageImage, Story, StoryPage};
pub use task::{GenerationTask, TaskStatus};
pub use theme::StoryTheme;

/// Number of pages in every generated story.
pub const PAGES_PER_STORY: usize = 20;
