//! Generation orchestrator: fills a story with illustrations page by page.

use crate::StoryEngine;
use std::sync::Arc;
use taleweaver_core::{ChildProfile, PageImage, ReferenceImage, Story, StoryTheme};
use taleweaver_error::{RunError, RunErrorKind};
use taleweaver_interface::{GenerationSnapshot, ImageGenerator};
use tokio::sync::{Mutex, watch};
use tracing::{info, instrument, warn};

/// Drives one story at a time through an [`ImageGenerator`].
///
/// Pages are illustrated strictly in order with one request outstanding. A
/// page whose generation fails gets [`PageImage::Placeholder`] and the run
/// continues. Every state change is published as a [`GenerationSnapshot`]
/// to all [`subscribe`](Self::subscribe)rs.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use taleweaver_core::{ChildProfile, ImageMediaType, ReferenceImage, StoryTheme};
/// use taleweaver_models::{TaleweaverConfig, TaskImageGenerator};
/// use taleweaver_narrative::StoryGenerator;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = TaleweaverConfig::load()?;
/// let generator = StoryGenerator::new(Arc::new(TaskImageGenerator::from_config(&config)?));
///
/// let mut progress = generator.subscribe();
/// tokio::spawn(async move {
///     while progress.changed().await.is_ok() {
///         println!("{}%", progress.borrow().progress());
///     }
/// });
///
/// let photo = ReferenceImage::new(std::fs::read("mia.jpg")?, ImageMediaType::Jpeg);
/// let child = ChildProfile::new("Mia", 6, photo)?;
/// let story = generator.run(&child, StoryTheme::Space).await?;
/// println!("{} illustrated pages", story.illustrated_count());
/// # Ok(())
/// # }
/// ```
pub struct StoryGenerator {
    generator: Arc<dyn ImageGenerator>,
    engine: StoryEngine,
    sender: watch::Sender<GenerationSnapshot>,
    run_lock: Mutex<()>,
}

impl std::fmt::Debug for StoryGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryGenerator")
            .field("provider", &self.generator.provider_name())
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl StoryGenerator {
    /// Orchestrator using the built-in themes.
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self::with_engine(generator, StoryEngine::default())
    }

    /// Orchestrator using a custom engine.
    pub fn with_engine(generator: Arc<dyn ImageGenerator>, engine: StoryEngine) -> Self {
        let (sender, _) = watch::channel(GenerationSnapshot::initial(Arc::new(Story::default())));
        Self {
            generator,
            engine,
            sender,
            run_lock: Mutex::new(()),
        }
    }

    /// Receive every snapshot published from now on.
    pub fn subscribe(&self) -> watch::Receiver<GenerationSnapshot> {
        self.sender.subscribe()
    }

    /// Most recently published snapshot.
    pub fn snapshot(&self) -> GenerationSnapshot {
        self.sender.borrow().clone()
    }

    /// Build the story for `profile` and illustrate it.
    ///
    /// # Errors
    ///
    /// Returns a [`RunError`] if the run is aborted; per-page failures are
    /// recorded as placeholders instead.
    #[instrument(skip(self, profile), fields(child = %profile.name(), age = profile.age()))]
    pub async fn run(&self, profile: &ChildProfile, theme: StoryTheme) -> Result<Story, RunError> {
        let story = self.engine.build_story(profile.name(), *profile.age(), theme);
        self.generate(story, profile.reference_image()).await
    }

    /// Illustrate every page of `story` in order.
    ///
    /// Progress `floor(i * 100 / N)` is published before page `i` is
    /// requested, the story is republished after its image is attached, and
    /// a final snapshot with progress 100 and `finished` set closes the run.
    ///
    /// # Errors
    ///
    /// Returns [`RunErrorKind::EmptyStory`],
    /// [`RunErrorKind::EmptyReferenceImage`] or
    /// [`RunErrorKind::ImageAlreadySet`] (when `story` arrives with an image
    /// already attached) before any request is made.
    #[instrument(skip(self, story, reference), fields(title = %story.title(), pages = story.len()))]
    pub async fn generate(&self, story: Story, reference: &ReferenceImage) -> Result<Story, RunError> {
        if story.is_empty() {
            return Err(RunError::new(RunErrorKind::EmptyStory));
        }
        if reference.is_empty() {
            return Err(RunError::new(RunErrorKind::EmptyReferenceImage));
        }
        if let Some(page) = story.pages().iter().find(|page| page.has_image()) {
            return Err(RunError::new(RunErrorKind::ImageAlreadySet(*page.number())));
        }

        let _guard = self.run_lock.lock().await;
        let mut story = story;
        let total = story.len();
        info!(provider = self.generator.provider_name(), "Starting image generation");

        let mut failures = 0usize;
        for index in 0..total {
            let progress = GenerationSnapshot::percent(index, total);
            self.publish(progress, &story, false);

            let prompt = story.pages()[index].image_prompt().clone();
            let image = match self.generator.generate_image(&prompt, reference).await {
                Ok(url) => {
                    info!(page = index + 1, total, "Page illustrated");
                    PageImage::Generated(url)
                }
                Err(e) => {
                    failures += 1;
                    warn!(page = index + 1, total, error = %e, "Page illustration failed, using placeholder");
                    PageImage::Placeholder
                }
            };
            story.attach_image(index, image)?;
            self.publish(progress, &story, false);
        }

        self.publish(100, &story, true);
        info!(pages = total, failures, "Image generation finished");
        Ok(story)
    }

    fn publish(&self, progress: u8, story: &Story, finished: bool) {
        let version = self.sender.borrow().version() + 1;
        self.sender.send_replace(GenerationSnapshot::new(
            progress,
            Arc::new(story.clone()),
            version,
            finished,
        ));
    }
}
