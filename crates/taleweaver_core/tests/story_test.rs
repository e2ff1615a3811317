use strum::IntoEnumIterator;
use taleweaver_core::{
    GenerationTask, PageImage, Story, StoryPage, StoryTheme, TaskStatus,
};
use taleweaver_error::RunErrorKind;

fn three_page_story() -> Story {
    let scenarios = ["finding a map", "crossing a river", "reaching the castle"]
        .into_iter()
        .map(String::from);
    Story::new("The Great Adventure of Ada", StoryTheme::Adventure, scenarios, |n, s| {
        // Deliberately wrong number; the story renumbers.
        StoryPage::new(n + 10, format!("Chapter {n}"), "body", s, "prompt")
    })
}

#[test]
fn pages_are_numbered_from_one() {
    let story = three_page_story();
    let numbers: Vec<usize> = story.pages().iter().map(|p| *p.number()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(story.pages()[1].title(), "Chapter 2");
    assert_eq!(story.pages()[1].scenario(), "crossing a river");
    assert_eq!(story.illustrated_count(), 0);
}

#[test]
fn image_is_written_once() {
    let mut story = three_page_story();
    story
        .attach_image(1, PageImage::Generated("https://img/2.png".into()))
        .unwrap();
    assert_eq!(
        story.pages()[1].image().as_ref().and_then(PageImage::url),
        Some("https://img/2.png")
    );

    let err = story.attach_image(1, PageImage::Placeholder).unwrap_err();
    assert_eq!(err.kind, RunErrorKind::ImageAlreadySet(2));
    assert_eq!(story.illustrated_count(), 1);
}

#[test]
fn attach_out_of_range_is_rejected() {
    let mut story = three_page_story();
    let err = story.attach_image(3, PageImage::Placeholder).unwrap_err();
    assert_eq!(err.kind, RunErrorKind::PageOutOfRange(3));
}

#[test]
fn theme_parsing_falls_back_to_adventure() {
    assert_eq!(StoryTheme::parse_or_default("Ocean"), StoryTheme::Ocean);
    assert_eq!(StoryTheme::parse_or_default(" princess "), StoryTheme::Princess);
    assert_eq!(StoryTheme::parse_or_default(""), StoryTheme::Adventure);
    assert_eq!(StoryTheme::parse_or_default("pirates"), StoryTheme::Adventure);
}

#[test]
fn theme_ordinals_follow_declaration_order() {
    let ordinals: Vec<usize> = StoryTheme::iter().map(|t| t.ordinal()).collect();
    assert_eq!(ordinals, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(StoryTheme::Forest.as_ref(), "forest");
}

#[test]
fn task_decodes_provider_payloads() {
    let task: GenerationTask =
        serde_json::from_str(r#"{"id":"abc","status":"FAILED","failure":"nsfw"}"#).unwrap();
    assert_eq!(*task.status(), TaskStatus::Failed);
    assert!(task.status().is_terminal());
    assert_eq!(task.failure().as_deref(), Some("nsfw"));
    assert!(task.output().is_empty());

    let task: GenerationTask =
        serde_json::from_str(r#"{"id":"abc","status":"WARMING_UP"}"#).unwrap();
    assert_eq!(*task.status(), TaskStatus::Unknown);
    assert!(!task.status().is_terminal());

    let task: GenerationTask =
        serde_json::from_str(r#"{"id":"abc","status":"THROTTLED"}"#).unwrap();
    assert!(!task.status().is_terminal());
}

#[test]
fn first_output_skips_empty_url() {
    let task = GenerationTask::new("t", TaskStatus::Succeeded).with_output(vec![String::new()]);
    assert_eq!(task.first_output(), None);
}
