//! Storybook generation command handler.

use super::GenerateArgs;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taleweaver::{
    ChildProfile, GenerationSnapshot, ImageGenerator, ImageMediaType, ProxyImageGenerator,
    ReferenceImage, StoryEngine, StoryExporter, StoryGenerator, StoryTheme, TaleweaverConfig,
    TaskImageGenerator, ThemeCatalog, ValidationError, ValidationErrorKind,
};
use tokio::sync::watch;
use tracing::{info, warn};

/// Handle the `generate` command.
///
/// Returns the path of the written PDF.
pub async fn handle_generate(args: GenerateArgs, config: &TaleweaverConfig) -> anyhow::Result<PathBuf> {
    let photo = read_photo(&args.photo).await?;
    let profile = ChildProfile::new(&args.name, args.age, photo)?;
    let theme = resolve_theme(&args.theme);
    let catalog = load_catalog(args.themes.as_deref())?;

    let generator = build_generator(args.proxy.as_deref(), config)?;
    let orchestrator = StoryGenerator::with_engine(generator, StoryEngine::new(catalog));

    info!(child = %profile.name(), age = profile.age(), theme = %theme, "Generating storybook");
    let progress = tokio::spawn(print_progress(orchestrator.subscribe()));
    let story = match orchestrator.run(&profile, theme).await {
        Ok(story) => {
            progress.await.ok();
            story
        }
        Err(e) => {
            progress.abort();
            return Err(e.into());
        }
    };

    let document = StoryExporter::from_config(&config.export)
        .export(&story, &profile)
        .await?;
    let path = document.write_to(&args.out)?;

    let placeholders = document.pages().len() - document.embedded_count();
    println!("Saved \"{}\" to {}", story.title(), path.display());
    if placeholders > 0 {
        println!("{} of {} pages use a placeholder illustration", placeholders, document.pages().len());
    }
    Ok(path)
}

/// Media type implied by a photo's file extension.
pub(crate) fn media_type_for(path: &Path) -> Result<ImageMediaType, ValidationError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    ImageMediaType::from_extension(extension).ok_or_else(|| {
        ValidationError::new(ValidationErrorKind::UnsupportedMediaType(format!(
            "{} (expected .jpg, .png or .webp)",
            path.display()
        )))
    })
}

/// Parse a theme name, warning when falling back to the default.
pub(crate) fn resolve_theme(name: &str) -> StoryTheme {
    let theme = StoryTheme::parse_or_default(name);
    if name.trim().parse::<StoryTheme>().is_err() {
        warn!(requested = name, fallback = %theme, "Unknown theme, using default");
    }
    theme
}

async fn read_photo(path: &Path) -> anyhow::Result<ReferenceImage> {
    let media_type = media_type_for(path)?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read photo {}", path.display()))?;
    Ok(ReferenceImage::new(bytes, media_type))
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<ThemeCatalog> {
    match path {
        Some(path) => Ok(ThemeCatalog::from_file(path)?),
        None => Ok(ThemeCatalog::builtin()),
    }
}

/// The proxy named on the command line, else the configured proxy, else
/// the provider itself.
fn build_generator(proxy: Option<&str>, config: &TaleweaverConfig) -> anyhow::Result<Arc<dyn ImageGenerator>> {
    if let Some(url) = proxy {
        info!(url, "Using image proxy");
        return Ok(Arc::new(ProxyImageGenerator::new(
            url,
            config.proxy.style.clone(),
            config.retry.policy(),
        )));
    }
    if let Some(generator) = ProxyImageGenerator::from_config(config) {
        info!(url = generator.url(), "Using configured image proxy");
        return Ok(Arc::new(generator));
    }
    info!(base_url = %config.provider.base_url, "Calling image provider directly");
    Ok(Arc::new(TaskImageGenerator::from_config(config)?))
}

async fn print_progress(mut receiver: watch::Receiver<GenerationSnapshot>) {
    while receiver.changed().await.is_ok() {
        let snapshot = receiver.borrow_and_update().clone();
        println!(
            "Illustrating: {:>3}% ({}/{} pages)",
            snapshot.progress(),
            snapshot.story().illustrated_count(),
            snapshot.story().len()
        );
        if *snapshot.finished() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_for_known_extensions() {
        assert_eq!(media_type_for(Path::new("mia.JPG")).unwrap(), ImageMediaType::Jpeg);
        assert_eq!(media_type_for(Path::new("a/b/mia.jpeg")).unwrap(), ImageMediaType::Jpeg);
        assert_eq!(media_type_for(Path::new("mia.png")).unwrap(), ImageMediaType::Png);
        assert_eq!(media_type_for(Path::new("mia.webp")).unwrap(), ImageMediaType::Webp);
    }

    #[test]
    fn test_media_type_for_rejects_other_files() {
        let err = media_type_for(Path::new("mia.gif")).unwrap_err();
        assert!(matches!(err.kind, ValidationErrorKind::UnsupportedMediaType(_)));
        assert!(media_type_for(Path::new("mia")).is_err());
    }

    #[test]
    fn test_resolve_theme_falls_back() {
        assert_eq!(resolve_theme("Ocean"), StoryTheme::Ocean);
        assert_eq!(resolve_theme("dinosaurs"), StoryTheme::Adventure);
    }
}
