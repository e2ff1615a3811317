use strum::IntoEnumIterator;
use taleweaver_core::{PAGES_PER_STORY, StoryTheme};
use taleweaver_narrative::{StoryEngine, build_story, build_story_from_input};

#[test]
fn every_theme_builds_a_full_story() {
    for theme in StoryTheme::iter() {
        let story = build_story("Noor", 6, theme);

        assert_eq!(*story.theme(), theme);
        assert_eq!(story.len(), PAGES_PER_STORY);
        assert!(story.title().contains("Noor"));
        assert!(!story.title().contains("{name}"));

        for (index, page) in story.pages().iter().enumerate() {
            assert_eq!(*page.number(), index + 1);
            assert_eq!(page.title(), &format!("Chapter {}", index + 1));
            assert!(page.content().contains("Noor"));
            assert!(page.content().contains(page.scenario().as_str()));
            assert!(page.image_prompt().contains("6-year-old child named Noor"));
            assert!(page.image_prompt().contains(page.scenario().as_str()));
            assert!(page.image().is_none());
        }
    }
}

#[test]
fn image_prompts_name_the_child_at_every_age() {
    let names = ["Noor", "Mary-Jane", "O'Brien", "José", "Zoë Ann", "李明"];
    for theme in StoryTheme::iter() {
        for name in names {
            for age in 1..=12u8 {
                let story = build_story(name, age, theme);
                let age_phrase = format!("{age}-year-old");

                for page in story.pages() {
                    assert!(page.image_prompt().contains(name), "{theme} page {} at age {age}", page.number());
                    assert!(page.image_prompt().contains(&age_phrase), "{theme} page {} for {name}", page.number());
                    assert!(page.content().contains(name));
                }
            }
        }
    }
}

#[test]
fn titles_follow_theme_patterns() {
    let cases = [
        (StoryTheme::Adventure, "The Great Adventure of Sam"),
        (StoryTheme::Space, "Sam's Cosmic Journey"),
        (StoryTheme::Ocean, "Sam and the Underwater Kingdom"),
        (StoryTheme::Forest, "Sam in the Enchanted Forest"),
        (StoryTheme::Superhero, "Sam: The Little Hero"),
        (StoryTheme::Princess, "Princess Sam's Royal Adventure"),
    ];
    for (theme, title) in cases {
        assert_eq!(build_story("Sam", 5, theme).title(), title);
    }
}

#[test]
fn first_space_page() {
    let story = build_story("Mia", 6, StoryTheme::Space);
    let page = &story.pages()[0];
    assert_eq!(page.scenario(), "building a rocket ship in the backyard");
    assert!(
        page.content()
            .starts_with("As Mia continued their journey, they discovered that building a rocket ship in the backyard")
    );
}

#[test]
fn unknown_theme_falls_back_to_adventure() {
    let story = build_story_from_input("Leo", 7, "dinosaurs");
    assert_eq!(*story.theme(), StoryTheme::Adventure);
    assert_eq!(story.title(), "The Great Adventure of Leo");

    let story = StoryEngine::default().build_story_from_input("Leo", 7, "OCEAN");
    assert_eq!(*story.theme(), StoryTheme::Ocean);
}

#[test]
fn young_children_get_no_periods() {
    let story = build_story("Bo", 3, StoryTheme::Forest);
    for page in story.pages() {
        assert!(!page.content().contains('.'), "{}", page.content());
        assert!(page.content().ends_with('!'));
    }
}

#[test]
fn older_children_get_closing_sentence() {
    let story = build_story("Ivy", 10, StoryTheme::Superhero);
    for page in story.pages() {
        assert!(
            page.content()
                .ends_with("They felt proud of their growing independence and wisdom.")
        );
    }
}

#[test]
fn stories_are_deterministic() {
    assert_eq!(
        build_story("Kai", 9, StoryTheme::Princess),
        build_story("Kai", 9, StoryTheme::Princess)
    );
}
