//! Story and page types.

use crate::StoryTheme;
use serde::{Deserialize, Serialize};
use taleweaver_error::{RunError, RunErrorKind};

/// Illustration attached to a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum PageImage {
    /// URL of an image produced by the provider
    Generated(String),
    /// Sentinel written when generation for the page failed
    Placeholder,
}

impl PageImage {
    /// URL of a generated image, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            PageImage::Generated(url) => Some(url),
            PageImage::Placeholder => None,
        }
    }
}

/// One page of a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StoryPage {
    /// 1-based page number
    number: usize,
    /// Page heading
    title: String,
    /// Body text
    content: String,
    /// Scenario the page illustrates
    scenario: String,
    /// Prompt sent to the image provider
    image_prompt: String,
    /// Illustration, absent until the orchestrator reaches this page
    image: Option<PageImage>,
}

impl StoryPage {
    /// Create a page without an illustration.
    pub fn new(
        number: usize,
        title: impl Into<String>,
        content: impl Into<String>,
        scenario: impl Into<String>,
        image_prompt: impl Into<String>,
    ) -> Self {
        Self {
            number,
            title: title.into(),
            content: content.into(),
            scenario: scenario.into(),
            image_prompt: image_prompt.into(),
            image: None,
        }
    }

    /// Whether an illustration (or placeholder) has been written.
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// A complete story: title, theme and a fixed sequence of pages.
///
/// Pages are numbered contiguously from 1 and the page list never changes
/// length. Each page's image can be written once.
///
/// # Examples
///
/// ```
/// use taleweaver_core::{PageImage, Story, StoryPage, StoryTheme};
///
/// let mut story = Story::new(
///     "Mia in the Enchanted Forest",
///     StoryTheme::Forest,
///     vec!["a glowing butterfly".to_string()],
///     |number, scenario| StoryPage::new(number, format!("Chapter {number}"), "…", scenario, "prompt"),
/// );
/// story.attach_image(0, PageImage::Placeholder).unwrap();
/// assert!(story.attach_image(0, PageImage::Placeholder).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Story {
    /// Story title with the child's name substituted
    title: String,
    /// Theme the story was built from
    theme: StoryTheme,
    /// Ordered pages
    pages: Vec<StoryPage>,
}

impl Story {
    /// Build a story by numbering each scenario from 1 and handing it to `make_page`.
    ///
    /// The page number passed to `make_page` is authoritative: a page whose
    /// `number` differs is renumbered.
    pub fn new<I, F>(title: impl Into<String>, theme: StoryTheme, scenarios: I, mut make_page: F) -> Self
    where
        I: IntoIterator<Item = String>,
        F: FnMut(usize, String) -> StoryPage,
    {
        let pages = scenarios
            .into_iter()
            .enumerate()
            .map(|(index, scenario)| {
                let mut page = make_page(index + 1, scenario);
                page.number = index + 1;
                page
            })
            .collect();

        Self {
            title: title.into(),
            theme,
            pages,
        }
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the story has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Number of pages that already carry an image or placeholder.
    pub fn illustrated_count(&self) -> usize {
        self.pages.iter().filter(|page| page.has_image()).count()
    }

    /// Write the image for the page at `index` (0-based).
    ///
    /// # Errors
    ///
    /// Returns [`RunErrorKind::ImageAlreadySet`] if the page already has an
    /// image, and [`RunErrorKind::PageOutOfRange`] if `index` is out of range.
    pub fn attach_image(&mut self, index: usize, image: PageImage) -> Result<(), RunError> {
        let page = self
            .pages
            .get_mut(index)
            .ok_or_else(|| RunError::new(RunErrorKind::PageOutOfRange(index)))?;

        if page.image.is_some() {
            return Err(RunError::new(RunErrorKind::ImageAlreadySet(page.number)));
        }

        page.image = Some(image);
        Ok(())
    }
}
