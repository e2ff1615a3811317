//! Progress types published during generation.

use std::sync::Arc;
use taleweaver_core::Story;

/// Immutable view of a run, published after every state change.
///
/// Readers hold an `Arc` to the story as it was at publication time, so a
/// snapshot never changes underneath them. `version` increases by one with
/// every publication.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct GenerationSnapshot {
    /// Percentage complete, 0–100
    progress: u8,
    /// Story with the images attached so far
    story: Arc<Story>,
    /// Publication counter
    version: u64,
    /// Set once on the final publication of a run
    finished: bool,
}

impl GenerationSnapshot {
    /// Create a snapshot.
    pub fn new(progress: u8, story: Arc<Story>, version: u64, finished: bool) -> Self {
        Self {
            progress: progress.min(100),
            story,
            version,
            finished,
        }
    }

    /// Snapshot published before a run starts.
    pub fn initial(story: Arc<Story>) -> Self {
        Self::new(0, story, 0, false)
    }

    /// Progress percentage for page `index` of `total`: `floor(index * 100 / total)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_interface::GenerationSnapshot;
    ///
    /// assert_eq!(GenerationSnapshot::percent(0, 20), 0);
    /// assert_eq!(GenerationSnapshot::percent(7, 20), 35);
    /// assert_eq!(GenerationSnapshot::percent(1, 3), 33);
    /// assert_eq!(GenerationSnapshot::percent(3, 3), 100);
    /// ```
    pub fn percent(index: usize, total: usize) -> u8 {
        if total == 0 {
            return 100;
        }
        let value = index.min(total) * 100 / total;
        u8::try_from(value).unwrap_or(100)
    }
}
