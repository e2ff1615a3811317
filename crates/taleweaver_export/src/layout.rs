//! Page geometry and text measurement.

/// A4 page width in millimetres.
pub const PAGE_WIDTH_MM: f32 = 210.0;
/// A4 page height in millimetres.
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Outer margin in millimetres.
pub const MARGIN_MM: f32 = 20.0;
/// Usable width between the margins.
pub const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
/// Tallest an illustration may be drawn.
pub const MAX_IMAGE_HEIGHT_MM: f32 = 140.0;

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Average Helvetica glyph width as a fraction of the font size.
const REGULAR_GLYPH_EM: f32 = 0.5;
const BOLD_GLYPH_EM: f32 = 0.55;

/// Font weight used for measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    /// Helvetica
    Regular,
    /// Helvetica-Bold
    Bold,
}

/// Approximate rendered width of `text` in millimetres.
pub fn text_width_mm(text: &str, font_size_pt: f32, weight: Weight) -> f32 {
    let em = match weight {
        Weight::Regular => REGULAR_GLYPH_EM,
        Weight::Bold => BOLD_GLYPH_EM,
    };
    text.chars().count() as f32 * font_size_pt * em * MM_PER_PT
}

/// Baseline-to-baseline distance for a font size.
pub fn line_height_mm(font_size_pt: f32) -> f32 {
    font_size_pt * 1.2 * MM_PER_PT
}

/// Greedy word wrap to `max_width_mm`.
///
/// A single word wider than the line is kept on its own line.
pub fn wrap_text(text: &str, max_width_mm: f32, font_size_pt: f32, weight: Weight) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if current.is_empty() || text_width_mm(&candidate, font_size_pt, weight) <= max_width_mm {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Scale a `width` x `height` image to fit within the box, preserving aspect ratio.
///
/// Returns the drawn size in millimetres, or `None` for a degenerate image.
pub fn fit_within(width: u32, height: u32, max_width_mm: f32, max_height_mm: f32) -> Option<(f32, f32)> {
    if width == 0 || height == 0 {
        return None;
    }
    let (w, h) = (width as f32, height as f32);
    let scale = (max_width_mm / w).min(max_height_mm / h);
    Some((w * scale, h * scale))
}

/// Convert a distance from the top edge to PDF's bottom-up coordinate.
pub fn from_top(top_mm: f32) -> f32 {
    PAGE_HEIGHT_MM - top_mm
}
