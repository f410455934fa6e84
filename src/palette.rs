//! Static lookup tables: colors, categories and difficulty badges.

use egui::Color32;

use crate::acquisition::Difficulty;

pub const COLOR_PALETTE: [Color32; 20] = [
    Color32::from_rgb(0xFF, 0x6B, 0x9D),
    Color32::from_rgb(0x4E, 0xCD, 0xC4),
    Color32::from_rgb(0xFF, 0xE6, 0x6D),
    Color32::from_rgb(0x95, 0xE1, 0xD3),
    Color32::from_rgb(0xF3, 0x81, 0x81),
    Color32::from_rgb(0xA8, 0xE6, 0xCF),
    Color32::from_rgb(0xDC, 0xED, 0xC8),
    Color32::from_rgb(0xFF, 0xD3, 0xB6),
    Color32::from_rgb(0xFF, 0xAA, 0xA5),
    Color32::from_rgb(0xFF, 0x8B, 0x94),
    Color32::from_rgb(0x4C, 0xAF, 0x50),
    Color32::from_rgb(0x8B, 0xC3, 0x4A),
    Color32::from_rgb(0xCD, 0xDC, 0x39),
    Color32::from_rgb(0xFF, 0xEB, 0x3B),
    Color32::from_rgb(0xFF, 0x98, 0x00),
    Color32::from_rgb(0x9C, 0x27, 0xB0),
    Color32::from_rgb(0x67, 0x3A, 0xB7),
    Color32::from_rgb(0x3F, 0x51, 0xB5),
    Color32::from_rgb(0x21, 0x96, 0xF3),
    Color32::from_rgb(0x00, 0xBC, 0xD4),
];

/// Suggested palettes per category
pub const CATEGORY_PALETTES: &[(&str, [Color32; 5])] = &[
    (
        "animals",
        [
            Color32::from_rgb(0xFF, 0x6B, 0x9D),
            Color32::from_rgb(0x4E, 0xCD, 0xC4),
            Color32::from_rgb(0xFF, 0xE6, 0x6D),
            Color32::from_rgb(0x95, 0xE1, 0xD3),
            Color32::from_rgb(0xF3, 0x81, 0x81),
        ],
    ),
    (
        "fantasy",
        [
            Color32::from_rgb(0xA8, 0xE6, 0xCF),
            Color32::from_rgb(0xDC, 0xED, 0xC8),
            Color32::from_rgb(0xFF, 0xD3, 0xB6),
            Color32::from_rgb(0xFF, 0xAA, 0xA5),
            Color32::from_rgb(0xFF, 0x8B, 0x94),
        ],
    ),
    (
        "nature",
        [
            Color32::from_rgb(0x4C, 0xAF, 0x50),
            Color32::from_rgb(0x8B, 0xC3, 0x4A),
            Color32::from_rgb(0xCD, 0xDC, 0x39),
            Color32::from_rgb(0xFF, 0xEB, 0x3B),
            Color32::from_rgb(0xFF, 0x98, 0x00),
        ],
    ),
];

pub const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("animals", "🐾"),
    ("fantasy", "🐉"),
    ("nature", "🌸"),
    ("vehicles", "🚗"),
    ("food", "🍕"),
];

pub const DEFAULT_CATEGORY_ICON: &str = "🎨";

pub fn category_palette(category: &str) -> &'static [Color32; 5] {
    CATEGORY_PALETTES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, colors)| colors)
        .unwrap_or(&CATEGORY_PALETTES[0].1)
}

pub fn category_icon(category: &str) -> &'static str {
    CATEGORY_ICONS
        .iter()
        .find(|(name, _)| *name == category)
        .map_or(DEFAULT_CATEGORY_ICON, |(_, icon)| *icon)
}

pub fn difficulty_color(difficulty: Difficulty) -> Color32 {
    match difficulty {
        Difficulty::Easy => Color32::from_rgb(0x4C, 0xAF, 0x50),
        Difficulty::Medium => Color32::from_rgb(0xFF, 0x98, 0x00),
        Difficulty::Hard => Color32::from_rgb(0xF4, 0x43, 0x36),
    }
}
