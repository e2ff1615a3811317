use std::io::Write;
use taleweaver_core::{PAGES_PER_STORY, StoryTheme};
use taleweaver_error::RunErrorKind;
use taleweaver_narrative::{StoryEngine, ThemeCatalog};

fn catalog_toml(key: &str, title: &str, scenarios: usize) -> String {
    let scenarios: Vec<String> = (1..=scenarios).map(|n| format!("\"exploring room {n}\"")).collect();
    format!(
        "[[themes]]\nkey = \"{key}\"\ntitle = \"{title}\"\nscenarios = [{}]\n",
        scenarios.join(", ")
    )
}

#[test]
fn custom_theme_overrides_builtin() {
    let catalog =
        ThemeCatalog::from_toml_str(&catalog_toml("space", "{name} and the Moon Base", PAGES_PER_STORY)).unwrap();

    let space = catalog.get(StoryTheme::Space);
    assert_eq!(space.title_for("Ana"), "Ana and the Moon Base");
    assert_eq!(space.scenarios()[19], "exploring room 20");

    // Untouched themes keep their built-in templates.
    assert_eq!(
        catalog.get(StoryTheme::Ocean),
        ThemeCatalog::builtin().get(StoryTheme::Ocean)
    );

    let story = StoryEngine::new(catalog).build_story("Ana", 6, StoryTheme::Space);
    assert_eq!(story.title(), "Ana and the Moon Base");
    assert_eq!(story.pages()[2].scenario(), "exploring room 3");
}

#[test]
fn wrong_scenario_count_is_rejected() {
    let err = ThemeCatalog::from_toml_str(&catalog_toml("forest", "{name}'s Walk", 19)).unwrap_err();
    assert!(matches!(err.kind, RunErrorKind::Template(ref m) if m.contains("19 scenarios")));
}

#[test]
fn title_without_placeholder_is_rejected() {
    let err = ThemeCatalog::from_toml_str(&catalog_toml("forest", "A Walk", PAGES_PER_STORY)).unwrap_err();
    assert!(matches!(err.kind, RunErrorKind::Template(_)));
}

#[test]
fn unknown_theme_key_is_rejected() {
    let err =
        ThemeCatalog::from_toml_str(&catalog_toml("pirates", "{name} Ahoy", PAGES_PER_STORY)).unwrap_err();
    assert!(matches!(err.kind, RunErrorKind::Template(ref m) if m.contains("pirates")));
}

#[test]
fn malformed_toml_is_rejected() {
    let err = ThemeCatalog::from_toml_str("[[themes]\nkey=").unwrap_err();
    assert!(matches!(err.kind, RunErrorKind::Template(_)));
}

#[test]
fn catalog_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(catalog_toml("Princess", "Queen {name}", PAGES_PER_STORY).as_bytes())
        .unwrap();

    let catalog = ThemeCatalog::from_file(file.path()).unwrap();
    assert_eq!(catalog.get(StoryTheme::Princess).title_for("Zoe"), "Queen Zoe");
    assert_eq!(catalog.iter().count(), 6);

    let err = ThemeCatalog::from_file("/nonexistent/themes.toml").unwrap_err();
    assert!(matches!(err.kind, RunErrorKind::Template(_)));
}
