//! PDF rendering of a completed story.

use crate::layout::{
    CONTENT_WIDTH_MM, MARGIN_MM, MAX_IMAGE_HEIGHT_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, Weight,
    fit_within, from_top, line_height_mm, text_width_mm, wrap_text,
};
use crate::{
    ExportedDocument, Illustration, PageReport, PlaceholderReason, RgbColor, ThemePalette,
    storybook_filename,
};
use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect,
};
use std::time::Duration;
use taleweaver_core::{ChildProfile, PageImage, Story, StoryPage};
use taleweaver_error::{ExportError, ExportErrorKind};
use taleweaver_models::ExportConfig;
use tracing::{debug, info, instrument, warn};

const IMAGE_DPI: f32 = 300.0;
const COVER_TITLE_PT: f32 = 24.0;
const COVER_SUBTITLE_PT: f32 = 16.0;
const PAGE_TITLE_PT: f32 = 18.0;
const BODY_PT: f32 = 14.0;
const PLACEHOLDER_PT: f32 = 10.0;

/// Renders stories as A4 PDF storybooks.
///
/// Illustrations are downloaded over HTTP. A page whose image cannot be
/// fetched or decoded gets a themed placeholder; only a failure to assemble
/// the PDF itself aborts the export.
#[derive(Debug, Clone)]
pub struct StoryExporter {
    client: reqwest::Client,
}

impl Default for StoryExporter {
    fn default() -> Self {
        Self::new(ExportConfig::default().fetch_timeout())
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Illustration slot content, resolved before rendering.
enum Slot {
    Image { url: String, image: DynamicImage },
    Placeholder(PlaceholderReason),
}

impl StoryExporter {
    /// Exporter whose image downloads time out after `fetch_timeout`.
    pub fn new(fetch_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build HTTP client with timeout, using defaults");
                reqwest::Client::new()
            });
        Self { client }
    }

    /// Exporter configured from the `[export]` section.
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.fetch_timeout())
    }

    /// Render `story` for `profile`.
    ///
    /// All illustrations are downloaded first, then the PDF is assembled.
    ///
    /// # Errors
    ///
    /// Returns [`ExportErrorKind::Render`] if the PDF cannot be assembled.
    #[instrument(skip(self, story, profile), fields(title = %story.title(), pages = story.len()))]
    pub async fn export(&self, story: &Story, profile: &ChildProfile) -> Result<ExportedDocument, ExportError> {
        let mut slots = Vec::with_capacity(story.len());
        for page in story.pages() {
            slots.push(self.load_slot(page).await);
        }

        let (bytes, reports) = render(story, profile.name(), slots)?;
        let document = ExportedDocument::new(storybook_filename(profile.name()), bytes, reports);
        info!(
            filename = %document.filename(),
            bytes = document.bytes().len(),
            embedded = document.embedded_count(),
            "Storybook rendered"
        );
        Ok(document)
    }

    async fn load_slot(&self, page: &StoryPage) -> Slot {
        let Some(url) = page.image().as_ref().and_then(PageImage::url) else {
            return Slot::Placeholder(PlaceholderReason::NotAvailable);
        };
        match self.fetch_image(url).await {
            Ok(image) => Slot::Image {
                url: url.to_string(),
                image,
            },
            Err(e) => {
                warn!(page = page.number(), url, error = %e, "Illustration unavailable, drawing placeholder");
                Slot::Placeholder(PlaceholderReason::LoadFailed(e.kind.to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    async fn fetch_image(&self, url: &str) -> Result<DynamicImage, ExportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| ExportError::new(ExportErrorKind::ImageFetch(e.to_string())))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExportError::new(ExportErrorKind::ImageFetch(e.to_string())))?;
        debug!(bytes = bytes.len(), "Illustration downloaded");

        let image = image_crate::load_from_memory(&bytes)
            .map_err(|e| ExportError::new(ExportErrorKind::ImageDecode(e.to_string())))?;
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ExportError::new(ExportErrorKind::ImageDecode(
                "Image has no pixels".to_string(),
            )));
        }
        Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
    }
}

fn render(story: &Story, child_name: &str, slots: Vec<Slot>) -> Result<(Vec<u8>, Vec<PageReport>), ExportError> {
    let palette = ThemePalette::for_theme(*story.theme());
    let (doc, cover_page, cover_layer) = PdfDocument::new(
        story.title().as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Cover",
    );
    let fonts = Fonts {
        regular: builtin_font(&doc, BuiltinFont::Helvetica)?,
        bold: builtin_font(&doc, BuiltinFont::HelveticaBold)?,
    };

    let cover = doc.get_page(cover_page).get_layer(cover_layer);
    draw_cover(&cover, &fonts, &palette, story.title(), child_name);

    let mut reports = Vec::with_capacity(story.len());
    for (page, slot) in story.pages().iter().zip(slots) {
        let (page_index, layer_index) =
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), format!("Page {}", page.number()));
        let layer = doc.get_page(page_index).get_layer(layer_index);

        let illustration = draw_story_page(&layer, &fonts, &palette, page, slot);
        reports.push(PageReport::new(*page.number(), illustration));
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| ExportError::new(ExportErrorKind::Render(format!("{e:?}"))))?;
    debug!(bytes = bytes.len(), "PDF assembled");
    Ok((bytes, reports))
}

fn draw_story_page(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    palette: &ThemePalette,
    page: &StoryPage,
    slot: Slot,
) -> Illustration {
    fill_rect(layer, palette.background, 0.0, 0.0, PAGE_WIDTH_MM, PAGE_HEIGHT_MM);

    layer.set_fill_color(palette.primary.to_pdf());
    let mut baseline = MARGIN_MM + 15.0;
    for line in wrap_text(page.title(), CONTENT_WIDTH_MM, PAGE_TITLE_PT, Weight::Bold) {
        layer.use_text(line, PAGE_TITLE_PT, Mm(MARGIN_MM), Mm(from_top(baseline)), &fonts.bold);
        baseline += line_height_mm(PAGE_TITLE_PT);
    }

    let illustration = match slot {
        Slot::Image { url, image } => {
            draw_image(layer, &image);
            Illustration::Embedded { url }
        }
        Slot::Placeholder(reason) => {
            draw_placeholder(layer, fonts, palette, &reason);
            Illustration::Placeholder(reason)
        }
    };

    layer.set_fill_color(RgbColor::BLACK.to_pdf());
    let mut baseline = MARGIN_MM + 180.0;
    for line in wrap_text(page.content(), CONTENT_WIDTH_MM, BODY_PT, Weight::Regular) {
        layer.use_text(line, BODY_PT, Mm(MARGIN_MM), Mm(from_top(baseline)), &fonts.regular);
        baseline += line_height_mm(BODY_PT);
    }

    illustration
}

fn builtin_font(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef, ExportError> {
    doc.add_builtin_font(font)
        .map_err(|e| ExportError::new(ExportErrorKind::Render(format!("{e:?}"))))
}

/// Fill a rectangle given by its top-left corner in top-down millimetres.
fn fill_rect(layer: &PdfLayerReference, color: RgbColor, left: f32, top: f32, width: f32, height: f32) {
    layer.set_fill_color(color.to_pdf());
    layer.add_rect(
        Rect::new(
            Mm(left),
            Mm(from_top(top + height)),
            Mm(left + width),
            Mm(from_top(top)),
        )
    );
}

fn centered_text(layer: &PdfLayerReference, text: &str, size: f32, weight: Weight, top: f32, font: &IndirectFontRef) {
    let width = text_width_mm(text, size, weight);
    let left = ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM);
    layer.use_text(text, size, Mm(left), Mm(from_top(top)), font);
}

fn draw_cover(layer: &PdfLayerReference, fonts: &Fonts, palette: &ThemePalette, title: &str, child_name: &str) {
    fill_rect(layer, palette.primary, 0.0, 0.0, PAGE_WIDTH_MM, PAGE_HEIGHT_MM);
    layer.set_fill_color(RgbColor::WHITE.to_pdf());

    let lines = wrap_text(title, CONTENT_WIDTH_MM, COVER_TITLE_PT, Weight::Bold);
    let line_height = line_height_mm(COVER_TITLE_PT);
    let mut baseline = (PAGE_HEIGHT_MM - lines.len() as f32 * line_height) / 2.0;
    for line in &lines {
        centered_text(layer, line, COVER_TITLE_PT, Weight::Bold, baseline, &fonts.bold);
        baseline += line_height;
    }

    centered_text(
        layer,
        &format!("A Magical Story for {child_name}"),
        COVER_SUBTITLE_PT,
        Weight::Regular,
        PAGE_HEIGHT_MM - 40.0,
        &fonts.regular,
    );
}

fn draw_placeholder(layer: &PdfLayerReference, fonts: &Fonts, palette: &ThemePalette, reason: &PlaceholderReason) {
    let (top, height) = (MARGIN_MM + 40.0, 80.0);
    fill_rect(layer, palette.secondary, MARGIN_MM, top, CONTENT_WIDTH_MM, height);
    fill_rect(
        layer,
        palette.background,
        MARGIN_MM + 1.0,
        top + 1.0,
        CONTENT_WIDTH_MM - 2.0,
        height - 2.0,
    );
    layer.set_fill_color(palette.primary.to_pdf());
    centered_text(
        layer,
        &reason.to_string(),
        PLACEHOLDER_PT,
        Weight::Regular,
        MARGIN_MM + 80.0,
        &fonts.regular,
    );
}

fn draw_image(layer: &PdfLayerReference, image: &DynamicImage) {
    let (width_px, height_px) = image.dimensions();
    let Some((width, height)) = fit_within(width_px, height_px, CONTENT_WIDTH_MM, MAX_IMAGE_HEIGHT_MM) else {
        return;
    };

    // Natural size at IMAGE_DPI, scaled to the fitted box.
    let natural_width = width_px as f32 / IMAGE_DPI * 25.4;
    let natural_height = height_px as f32 / IMAGE_DPI * 25.4;
    let left = MARGIN_MM + (CONTENT_WIDTH_MM - width) / 2.0;
    let top = MARGIN_MM + 25.0;

    Image::from_dynamic_image(image).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(left)),
            translate_y: Some(Mm(from_top(top + height))),
            scale_x: Some(width / natural_width),
            scale_y: Some(height / natural_height),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );
}
