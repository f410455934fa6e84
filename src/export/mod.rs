mod clipboard;
pub mod pdf;

pub use clipboard::{ClipboardSink, SystemClipboard};

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::config::PageSize;
use crate::error::ExportError;
use crate::surface::SurfaceSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// PNG download
    Image,
    /// Single page PDF download
    Document,
    /// Raw RGBA for the clipboard
    Clipboard,
}

impl ExportKind {
    pub fn extension(self) -> Option<&'static str> {
        match self {
            ExportKind::Image => Some("png"),
            ExportKind::Document => Some("pdf"),
            ExportKind::Clipboard => None,
        }
    }
}

/// A transient snapshot of the surface in an encoded form. Never stored by
/// the session; handed to the user as a download or clipboard payload.
#[derive(Clone)]
pub struct ExportArtifact {
    pub kind: ExportKind,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ExportArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportArtifact")
            .field("kind", &self.kind)
            .field("file_name", &self.file_name)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl ExportArtifact {
    /// Write the artifact into `dir` under its file name
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, dir: &std::path::Path) -> Result<std::path::PathBuf, ExportError> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        log::info!("💾 Saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Everything an export needs, detached from the session so it can run
/// off the UI loop.
pub struct ExportJob {
    kind: ExportKind,
    title: String,
    page_size: PageSize,
    snapshot: SurfaceSnapshot,
}

impl ExportJob {
    pub fn new(kind: ExportKind, title: &str, page_size: PageSize, snapshot: SurfaceSnapshot) -> Self {
        Self {
            kind,
            title: title.to_owned(),
            page_size,
            snapshot,
        }
    }

    pub fn run(self) -> Result<ExportArtifact, ExportError> {
        let raster = self.snapshot.to_rgba_image();
        let (width, height) = raster.dimensions();
        let bytes = match self.kind {
            ExportKind::Image => encode_png(&raster)?,
            ExportKind::Document => pdf::compose_document(&raster, self.page_size.width)?,
            ExportKind::Clipboard => raster.into_raw(),
        };

        Ok(ExportArtifact {
            kind: self.kind,
            file_name: file_name(&self.title, self.kind),
            width,
            height,
            bytes,
        })
    }
}

pub fn encode_png(raster: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    raster.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// `coloring-<title>.<ext>`, with the title reduced to file-name-safe
/// characters
pub fn file_name(title: &str, kind: ExportKind) -> String {
    let mut slug: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if slug.is_empty() {
        slug = "artwork".to_owned();
    }
    match kind.extension() {
        Some(ext) => format!("coloring-{slug}.{ext}"),
        None => format!("coloring-{slug}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("Happy Cat", ExportKind::Image), "coloring-Happy-Cat.png");
        assert_eq!(file_name("  ", ExportKind::Document), "coloring-artwork.pdf");
        assert_eq!(file_name("a/b", ExportKind::Clipboard), "coloring-a-b");
    }

    #[test]
    fn test_save_to() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = ExportArtifact {
            kind: ExportKind::Image,
            file_name: "coloring-test.png".to_owned(),
            width: 1,
            height: 1,
            bytes: encode_png(&RgbaImage::new(1, 1)).unwrap(),
        };
        let path = artifact.save_to(dir.path()).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), artifact.bytes);
    }
}
