//! Story template engine.

use crate::{ThemeCatalog, ThemeTemplate};
use regex::Regex;
use std::sync::LazyLock;
use taleweaver_core::{Story, StoryPage, StoryTheme};
use tracing::{debug, instrument};

/// Number of sentence templates pages rotate through.
const TEMPLATE_COUNT: usize = 5;

static BIG_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(big|large)\b").expect("Valid size-word regex"));

/// Reading level derived from the child's age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadingLevel {
    /// 4 and under: emphatic, exclamatory text
    Toddler,
    /// 5 to 7: text as written
    Early,
    /// 8 and over: closing sentence about independence
    Independent,
}

impl ReadingLevel {
    fn for_age(age: u8) -> Self {
        match age {
            0..=4 => ReadingLevel::Toddler,
            5..=7 => ReadingLevel::Early,
            _ => ReadingLevel::Independent,
        }
    }

    fn adjust(self, content: String) -> String {
        match self {
            ReadingLevel::Toddler => {
                BIG_WORDS.replace_all(&content, "very big").replace('.', "!")
            }
            ReadingLevel::Early => content,
            ReadingLevel::Independent => {
                format!("{content} They felt proud of their growing independence and wisdom.")
            }
        }
    }
}

fn sentence(template: usize, name: &str, scenario: &str) -> String {
    match template % TEMPLATE_COUNT {
        0 => format!(
            "One magical day, {name} found themselves {scenario}. With excitement sparkling in their eyes, they took their first brave step into this new adventure."
        ),
        1 => format!(
            "As {name} continued their journey, they discovered that {scenario} was just the beginning of something truly extraordinary. Their heart filled with wonder at all the amazing things around them."
        ),
        2 => format!(
            "{name} learned something special while {scenario}. They realized that being brave doesn't mean not being scared - it means doing what's right even when you feel nervous."
        ),
        3 => format!(
            "The adventure led {name} to understand that {scenario} taught them about the importance of kindness and helping others whenever possible."
        ),
        _ => format!(
            "While {scenario}, {name} made new friends who showed them that differences make the world more beautiful and interesting."
        ),
    }
}

/// Body text for one page.
///
/// The sentence template is `(page_index + theme ordinal) % 5`, so the same
/// input always produces the same story.
pub fn page_content(name: &str, age: u8, theme: StoryTheme, page_index: usize, scenario: &str) -> String {
    let template = (page_index + theme.ordinal()) % TEMPLATE_COUNT;
    ReadingLevel::for_age(age).adjust(sentence(template, name, scenario))
}

/// Prompt sent to the image provider for one page.
///
/// # Examples
///
/// ```
/// use taleweaver_core::StoryTheme;
/// use taleweaver_narrative::image_prompt;
///
/// let prompt = image_prompt("Mia", 6, StoryTheme::Space, "visiting the rings of Saturn");
/// assert!(prompt.contains("6-year-old child named Mia visiting the rings of Saturn"));
/// assert!(prompt.contains("space"));
/// assert!(prompt.contains("reference photo"));
/// ```
pub fn image_prompt(name: &str, age: u8, theme: StoryTheme, scenario: &str) -> String {
    format!(
        "Create a beautiful, child-friendly animated illustration for a {theme} story showing a {age}-year-old child named {name} {scenario}. \
         The child must look like the child in the reference photo. \
         The scene should be colorful, magical, and appropriate for children's storybooks. \
         Style: whimsical cartoon illustration with bright colors and gentle animations."
    )
}

/// Builds story skeletons from a [`ThemeCatalog`].
///
/// # Examples
///
/// ```
/// use taleweaver_core::{PAGES_PER_STORY, StoryTheme};
/// use taleweaver_narrative::StoryEngine;
///
/// let story = StoryEngine::default().build_story("Mia", 6, StoryTheme::Forest);
/// assert_eq!(story.title(), "Mia in the Enchanted Forest");
/// assert_eq!(story.len(), PAGES_PER_STORY);
/// assert_eq!(story.pages()[0].title(), "Chapter 1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryEngine {
    catalog: ThemeCatalog,
}

impl StoryEngine {
    /// Engine drawing from `catalog`.
    pub fn new(catalog: ThemeCatalog) -> Self {
        Self { catalog }
    }

    /// Catalog in use.
    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    /// Build a story for a child. Images are left unset.
    #[instrument(skip(self))]
    pub fn build_story(&self, child_name: &str, child_age: u8, theme: StoryTheme) -> Story {
        let template: &ThemeTemplate = self.catalog.get(theme);
        let story = Story::new(
            template.title_for(child_name),
            theme,
            template.scenarios().iter().cloned(),
            |number, scenario| {
                StoryPage::new(
                    number,
                    format!("Chapter {number}"),
                    page_content(child_name, child_age, theme, number - 1, &scenario),
                    scenario.clone(),
                    image_prompt(child_name, child_age, theme, &scenario),
                )
            },
        );
        debug!(title = %story.title(), pages = story.len(), "Story built");
        story
    }

    /// Build a story from raw input, falling back to the default theme for
    /// an unrecognised theme name.
    pub fn build_story_from_input(&self, child_name: &str, child_age: u8, theme: &str) -> Story {
        self.build_story(child_name, child_age, StoryTheme::parse_or_default(theme))
    }
}

/// Build a story from the built-in themes.
pub fn build_story(child_name: &str, child_age: u8, theme: StoryTheme) -> Story {
    StoryEngine::default().build_story(child_name, child_age, theme)
}

/// Build a story from the built-in themes, parsing `theme` with fallback to
/// the default theme.
pub fn build_story_from_input(child_name: &str, child_age: u8, theme: &str) -> Story {
    StoryEngine::default().build_story_from_input(child_name, child_age, theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toddlers_get_emphatic_text() {
        let text = ReadingLevel::for_age(3).adjust("A big dog. A large cat. A bigger box.".to_string());
        assert_eq!(text, "A very big dog! A very big cat! A bigger box!");
    }

    #[test]
    fn early_readers_get_text_unchanged() {
        let text = "A big dog.".to_string();
        assert_eq!(ReadingLevel::for_age(5).adjust(text.clone()), text);
        assert_eq!(ReadingLevel::for_age(7).adjust(text.clone()), text);
    }

    #[test]
    fn older_children_get_closing_sentence() {
        let text = ReadingLevel::for_age(8).adjust("They won.".to_string());
        assert_eq!(
            text,
            "They won. They felt proud of their growing independence and wisdom."
        );
    }

    #[test]
    fn templates_rotate_with_theme_offset() {
        let adventure = page_content("Ada", 6, StoryTheme::Adventure, 0, "x");
        let space = page_content("Ada", 6, StoryTheme::Space, 0, "x");
        assert!(adventure.starts_with("One magical day, Ada found themselves x."));
        assert!(space.starts_with("As Ada continued their journey"));
        assert_eq!(
            page_content("Ada", 6, StoryTheme::Adventure, 5, "x"),
            adventure
        );
    }
}
