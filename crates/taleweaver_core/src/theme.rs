//! Story themes.

use serde::{Deserialize, Serialize};

/// Theme selecting the story template.
///
/// # Examples
///
/// ```
/// use taleweaver_core::StoryTheme;
///
/// assert_eq!(StoryTheme::parse_or_default("SPACE"), StoryTheme::Space);
/// assert_eq!(StoryTheme::parse_or_default("dinosaurs"), StoryTheme::Adventure);
/// assert_eq!(format!("{}", StoryTheme::Superhero), "superhero");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoryTheme {
    /// Magical quest (the fallback theme)
    #[default]
    Adventure,
    /// Rockets and friendly aliens
    Space,
    /// Underwater kingdom
    Ocean,
    /// Enchanted forest
    Forest,
    /// Everyday hero
    Superhero,
    /// Royal adventure
    Princess,
}

impl StoryTheme {
    /// Parse a theme name, falling back to [`StoryTheme::default`] for unknown input.
    pub fn parse_or_default(value: &str) -> Self {
        value.trim().parse().unwrap_or_default()
    }

    /// Stable position of the theme in declaration order.
    pub fn ordinal(&self) -> usize {
        *self as usize
    }
}
