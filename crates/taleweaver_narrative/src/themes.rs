//! Theme templates: a title pattern and one scenario per page.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use taleweaver_core::{PAGES_PER_STORY, StoryTheme};
use taleweaver_error::{RunError, RunErrorKind};
use tracing::{debug, instrument};

/// Placeholder substituted with the child's name in titles.
pub const NAME_PLACEHOLDER: &str = "{name}";

type BuiltinTheme = (StoryTheme, &'static str, [&'static str; PAGES_PER_STORY]);

const BUILTIN: [BuiltinTheme; 6] = [
    (
        StoryTheme::Adventure,
        "The Great Adventure of {name}",
        [
            "discovering a magical map in the attic",
            "meeting a friendly dragon in an enchanted cave",
            "crossing a rainbow bridge to a mystical land",
            "finding a treasure chest filled with golden coins",
            "riding on the back of a majestic unicorn",
            "exploring an ancient castle with secret passages",
            "befriending woodland creatures in an enchanted forest",
            "solving riddles posed by a wise old owl",
            "sailing across a sparkling magical lake",
            "climbing a beanstalk to reach the clouds",
            "discovering a hidden village of friendly elves",
            "using a magic wand to help others",
            "flying on a magic carpet through the sky",
            "finding a door that leads to different worlds",
            "meeting a genie who grants three wishes",
            "helping a lost fairy find her way home",
            "discovering they have the power to talk to animals",
            "finding a magic paintbrush that brings drawings to life",
            "celebrating with all their new magical friends",
            "returning home with wonderful memories and new powers",
        ],
    ),
    (
        StoryTheme::Space,
        "{name}'s Cosmic Journey",
        [
            "building a rocket ship in the backyard",
            "blasting off into the starry night sky",
            "landing on a colorful alien planet",
            "meeting friendly aliens who love to dance",
            "exploring craters on the moon",
            "discovering a space station floating among the stars",
            "riding on a comet through the galaxy",
            "visiting a planet made entirely of candy",
            "helping aliens repair their broken spaceship",
            "learning to float in zero gravity",
            "discovering a planet where everything is backwards",
            "meeting a robot who becomes their best friend",
            "finding a wormhole that leads to another galaxy",
            "visiting the rings of Saturn",
            "discovering a planet where music creates colors",
            "helping space creatures solve a mystery",
            "learning that kindness is universal",
            "saying goodbye to alien friends",
            "flying back to Earth with amazing stories",
            "looking up at the stars and remembering the adventure",
        ],
    ),
    (
        StoryTheme::Ocean,
        "{name} and the Underwater Kingdom",
        [
            "putting on a magical diving suit",
            "diving deep into the crystal blue ocean",
            "meeting a wise old sea turtle",
            "discovering a beautiful coral reef city",
            "befriending a family of colorful fish",
            "riding on the back of a gentle whale",
            "finding a treasure map in an old shipwreck",
            "meeting a mermaid who needs help",
            "exploring underwater caves filled with pearls",
            "dancing with dolphins in the ocean currents",
            "discovering a seahorse racing competition",
            "helping clean up the ocean with sea friends",
            "finding a magical conch shell",
            "meeting the wise octopus king",
            "discovering an underwater rainbow",
            "learning the songs of the whales",
            "helping baby sea turtles reach the ocean",
            "finding a way to breathe underwater forever",
            "saying farewell to ocean friends",
            "returning to shore with treasured memories",
        ],
    ),
    (
        StoryTheme::Forest,
        "{name} in the Enchanted Forest",
        [
            "following a glowing butterfly into the woods",
            "discovering a tree house built by forest sprites",
            "meeting a family of talking rabbits",
            "finding a clearing where flowers sing",
            "befriending a wise old bear",
            "discovering a stream that grants wishes",
            "meeting a fox who knows all the forest secrets",
            "finding mushrooms that glow in the dark",
            "helping a lost baby deer find its family",
            "discovering a tree that grows different fruits on each branch",
            "meeting the forest queen who rules with kindness",
            "learning the language of the trees",
            "discovering a hidden village of woodland creatures",
            "finding a magic acorn that grows into anything",
            "helping animals prepare for winter",
            "discovering they can understand all forest languages",
            "meeting a dragon who protects the forest",
            "learning that the forest has been waiting for them",
            "receiving a special gift from the forest",
            "promising to protect nature and returning home",
        ],
    ),
    (
        StoryTheme::Superhero,
        "{name}: The Little Hero",
        [
            "discovering they have special powers",
            "creating their very own superhero costume",
            "learning to fly above the neighborhood",
            "helping a cat stuck in a tree",
            "stopping a runaway shopping cart",
            "helping an elderly person cross the street",
            "finding a lost child in the park",
            "cleaning up litter with super speed",
            "helping vegetables grow in a community garden",
            "stopping bullies with the power of kindness",
            "helping firefighters save the day",
            "using super hearing to help find lost pets",
            "organizing a neighborhood clean-up day",
            "teaching other kids how to be everyday heroes",
            "helping at the local animal shelter",
            "using super strength to help move heavy things",
            "creating a team of young heroes",
            "learning that real heroes help others",
            "receiving thanks from everyone they helped",
            "realizing that everyone can be a hero",
        ],
    ),
    (
        StoryTheme::Princess,
        "Princess {name}'s Royal Adventure",
        [
            "discovering they are royalty of a magical kingdom",
            "putting on a beautiful, sparkly crown",
            "meeting their royal pet unicorn",
            "exploring the magnificent castle",
            "learning royal etiquette from a friendly butler",
            "hosting a tea party for stuffed animal friends",
            "dancing at a grand royal ball",
            "helping villagers solve their problems",
            "discovering a secret garden behind the castle",
            "meeting a dragon who just wants to be friends",
            "organizing a festival for the kingdom",
            "learning that being royal means helping others",
            "solving a mystery in the castle library",
            "helping other kingdoms make peace",
            "discovering they have the power to make plants grow",
            "meeting other royal children from distant lands",
            "learning that true beauty comes from kindness",
            "helping their kingdom in a time of need",
            "deciding to use their royal power for good",
            "realizing that being royal is about serving others",
        ],
    ),
];

/// Title pattern and scenarios for one theme.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ThemeTemplate {
    /// Theme this template belongs to
    theme: StoryTheme,
    /// Title pattern containing `{name}`
    title: String,
    /// One scenario per page, in page order
    scenarios: Vec<String>,
}

impl ThemeTemplate {
    /// Validate and build a template.
    ///
    /// # Errors
    ///
    /// Returns [`RunErrorKind::Template`] if the title lacks `{name}` or the
    /// scenario count is not [`PAGES_PER_STORY`].
    pub fn new(theme: StoryTheme, title: impl Into<String>, scenarios: Vec<String>) -> Result<Self, RunError> {
        let title = title.into();
        if !title.contains(NAME_PLACEHOLDER) {
            return Err(RunError::new(RunErrorKind::Template(format!(
                "Title for theme '{}' must contain {}",
                theme, NAME_PLACEHOLDER
            ))));
        }
        if scenarios.len() != PAGES_PER_STORY {
            return Err(RunError::new(RunErrorKind::Template(format!(
                "Theme '{}' has {} scenarios, expected {}",
                theme,
                scenarios.len(),
                PAGES_PER_STORY
            ))));
        }
        if let Some(position) = scenarios.iter().position(|s| s.trim().is_empty()) {
            return Err(RunError::new(RunErrorKind::Template(format!(
                "Theme '{}' scenario {} is empty",
                theme,
                position + 1
            ))));
        }

        Ok(Self {
            theme,
            title,
            scenarios,
        })
    }

    /// Title with the child's name substituted.
    pub fn title_for(&self, child_name: &str) -> String {
        self.title.replace(NAME_PLACEHOLDER, child_name)
    }
}

/// TOML shape of a theme catalog file.
///
/// ```toml
/// [[themes]]
/// key = "space"
/// title = "{name} Among the Stars"
/// scenarios = ["...", "..."]
/// ```
#[derive(Debug, Clone, Deserialize)]
struct TomlThemeFile {
    #[serde(default)]
    themes: Vec<TomlTheme>,
}

#[derive(Debug, Clone, Deserialize)]
struct TomlTheme {
    key: String,
    title: String,
    scenarios: Vec<String>,
}

/// The set of templates the engine draws from, one per [`StoryTheme`].
///
/// # Examples
///
/// ```
/// use taleweaver_core::StoryTheme;
/// use taleweaver_narrative::ThemeCatalog;
///
/// let catalog = ThemeCatalog::builtin();
/// assert_eq!(catalog.get(StoryTheme::Ocean).title_for("Mia"), "Mia and the Underwater Kingdom");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeCatalog {
    templates: BTreeMap<StoryTheme, ThemeTemplate>,
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThemeCatalog {
    /// The six built-in themes.
    pub fn builtin() -> Self {
        let templates = BUILTIN
            .iter()
            .map(|(theme, title, scenarios)| {
                let template = ThemeTemplate {
                    theme: *theme,
                    title: (*title).to_string(),
                    scenarios: scenarios.iter().map(|s| (*s).to_string()).collect(),
                };
                (*theme, template)
            })
            .collect();
        Self { templates }
    }

    /// Built-in themes overridden by the entries of a TOML catalog.
    ///
    /// Themes absent from the file keep their built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`RunErrorKind::Template`] if the TOML is malformed, names an
    /// unknown theme, or any entry fails [`ThemeTemplate::new`] validation.
    #[instrument(skip(s), fields(len = s.len()))]
    pub fn from_toml_str(s: &str) -> Result<Self, RunError> {
        let file: TomlThemeFile = toml::from_str(s)
            .map_err(|e| RunError::new(RunErrorKind::Template(format!("Invalid theme catalog: {}", e))))?;

        let mut catalog = Self::builtin();
        for entry in file.themes {
            let theme = StoryTheme::from_str(entry.key.trim()).map_err(|_| {
                RunError::new(RunErrorKind::Template(format!("Unknown theme '{}'", entry.key)))
            })?;
            debug!(theme = %theme, "Overriding built-in theme");
            catalog
                .templates
                .insert(theme, ThemeTemplate::new(theme, entry.title, entry.scenarios)?);
        }
        Ok(catalog)
    }

    /// Load a TOML catalog from disk.
    ///
    /// # Errors
    ///
    /// Returns [`RunErrorKind::Template`] if the file cannot be read or is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RunError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RunError::new(RunErrorKind::Template(format!(
                "Failed to read theme catalog {}: {}",
                path.as_ref().display(),
                e
            )))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Template for a theme.
    pub fn get(&self, theme: StoryTheme) -> &ThemeTemplate {
        // Every constructor populates all themes.
        &self.templates[&theme]
    }

    /// All templates in theme order.
    pub fn iter(&self) -> impl Iterator<Item = &ThemeTemplate> {
        self.templates.values()
    }
}
