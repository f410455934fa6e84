use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::palette;
use crate::tools::ToolKind;

/// Looked up in the working directory at startup
pub const CONFIG_FILE: &str = "coloring_book.json";

pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 50;

/// A4 in PDF points
pub const A4_PAGE: PageSize = PageSize {
    width: 595.28,
    height: 841.89,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// Session-wide settings. Missing fields fall back to their defaults when
/// deserializing, so partial JSON files are fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background_color: Color32,
    pub default_brush_size: u32,
    pub default_color: Color32,
    /// Maximum per-channel difference still treated as the same region by fill
    pub fill_tolerance: u8,
    pub max_upload_bytes: usize,
    pub page_size: PageSize,
    /// Where downloads are written. `None` means the working directory.
    pub downloads_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600,
            canvas_height: 600,
            background_color: Color32::WHITE,
            default_brush_size: 10,
            default_color: palette::COLOR_PALETTE[0],
            fill_tolerance: 32,
            max_upload_bytes: 10 * 1024 * 1024,
            page_size: A4_PAGE,
            downloads_dir: None,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a JSON config file. A missing or malformed file yields the
    /// defaults so the app always starts.
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Self::default();
            }
            Err(err) => {
                log::warn!("⚠️ Could not read config {}: {err}", path.display());
                return Self::default();
            }
        };

        match Self::from_json_str(&json) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("⚠️ Ignoring malformed config {}: {err}", path.display());
                Self::default()
            }
        }
    }
}

pub fn clamp_brush_size(size: u32) -> u32 {
    size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
}

/// Tool choices persisted between app runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub tool: ToolKind,
    pub color: Color32,
    pub brush_size: u32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        let config = SessionConfig::default();
        Self {
            tool: ToolKind::Brush,
            color: config.default_color,
            brush_size: config.default_brush_size,
        }
    }
}
