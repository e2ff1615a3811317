//! Themed colour palettes.

use printpdf::{Color, Rgb};
use taleweaver_core::StoryTheme;

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    /// White.
    pub const WHITE: RgbColor = RgbColor(255, 255, 255);
    /// Black.
    pub const BLACK: RgbColor = RgbColor(0, 0, 0);

    /// PDF fill/stroke colour.
    pub fn to_pdf(self) -> Color {
        Color::Rgb(Rgb::new(
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
            None,
        ))
    }
}

/// Colours used to render one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThemePalette {
    /// Cover fill and heading colour
    pub primary: RgbColor,
    /// Placeholder outline colour
    pub secondary: RgbColor,
    /// Story page tint
    pub background: RgbColor,
}

const SUPERHERO: ThemePalette = ThemePalette {
    primary: RgbColor(255, 69, 0),
    secondary: RgbColor(0, 112, 192),
    background: RgbColor(255, 248, 240),
};

impl ThemePalette {
    /// Palette for a theme.
    pub fn for_theme(theme: StoryTheme) -> Self {
        match theme {
            StoryTheme::Superhero => SUPERHERO,
            StoryTheme::Princess => ThemePalette {
                primary: RgbColor(255, 105, 180),
                secondary: RgbColor(147, 112, 219),
                background: RgbColor(255, 240, 245),
            },
            StoryTheme::Space => ThemePalette {
                primary: RgbColor(25, 25, 112),
                secondary: RgbColor(72, 61, 139),
                background: RgbColor(240, 248, 255),
            },
            StoryTheme::Adventure => ThemePalette {
                primary: RgbColor(184, 134, 11),
                secondary: RgbColor(139, 69, 19),
                background: RgbColor(255, 250, 235),
            },
            StoryTheme::Ocean => ThemePalette {
                primary: RgbColor(0, 105, 148),
                secondary: RgbColor(32, 178, 170),
                background: RgbColor(235, 248, 255),
            },
            StoryTheme::Forest => ThemePalette {
                primary: RgbColor(34, 139, 34),
                secondary: RgbColor(107, 142, 35),
                background: RgbColor(240, 255, 240),
            },
        }
    }
}
