use image::RgbaImage;
use uuid::Uuid;

use crate::acquisition::ColoringImage;
use crate::error::ExportError;
use crate::export::{self, ExportArtifact, ExportKind};

pub type ArtworkId = Uuid;

/// A finished artwork, kept as it was exported
#[derive(Debug, Clone)]
pub struct GalleryItem {
    pub id: ArtworkId,
    pub title: String,
    pub artwork: ExportArtifact,
    /// What was colored. `None` for placeholder pictures.
    pub image: Option<ColoringImage>,
    pub likes: u32,
}

impl GalleryItem {
    /// Documents are already paginated and cannot go back to the clipboard
    pub fn can_copy(&self) -> bool {
        self.artwork.kind != ExportKind::Document
    }

    /// The artwork as a file. Clipboard copies are saved as PNG.
    pub fn download(&self) -> Result<ExportArtifact, ExportError> {
        match self.artwork.kind {
            ExportKind::Image | ExportKind::Document => Ok(self.artwork.clone()),
            ExportKind::Clipboard => {
                let raster = self.raster()?;
                Ok(ExportArtifact {
                    kind: ExportKind::Image,
                    file_name: export::file_name(&self.title, ExportKind::Image),
                    width: raster.width(),
                    height: raster.height(),
                    bytes: export::encode_png(&raster)?,
                })
            }
        }
    }

    /// Raw RGBA ready for the clipboard, or `None` for documents
    pub fn clipboard_payload(&self) -> Result<Option<ExportArtifact>, ExportError> {
        match self.artwork.kind {
            ExportKind::Document => Ok(None),
            ExportKind::Clipboard => Ok(Some(self.artwork.clone())),
            ExportKind::Image => {
                let raster = self.raster()?;
                Ok(Some(ExportArtifact {
                    kind: ExportKind::Clipboard,
                    file_name: export::file_name(&self.title, ExportKind::Clipboard),
                    width: raster.width(),
                    height: raster.height(),
                    bytes: raster.into_raw(),
                }))
            }
        }
    }

    fn raster(&self) -> Result<RgbaImage, ExportError> {
        let ExportArtifact {
            kind,
            width,
            height,
            bytes,
            ..
        } = &self.artwork;
        match kind {
            ExportKind::Image => Ok(image::load_from_memory(bytes)?.to_rgba8()),
            _ => RgbaImage::from_raw(*width, *height, bytes.clone()).ok_or(
                ExportError::Malformed {
                    width: *width,
                    height: *height,
                },
            ),
        }
    }
}

/// Artworks finished during this run, oldest first. Nothing is persisted.
#[derive(Debug, Default)]
pub struct Gallery {
    items: Vec<GalleryItem>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, artwork: ExportArtifact, image: Option<ColoringImage>) -> ArtworkId {
        let id = Uuid::new_v4();
        let title = image
            .as_ref()
            .map_or("My artwork", |image| image.title.as_str())
            .to_owned();
        log::info!("🖼️ Added {title} to the gallery");
        self.items.push(GalleryItem {
            id,
            title,
            artwork,
            image,
            likes: 0,
        });
        id
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn get(&self, id: ArtworkId) -> Option<&GalleryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns the new like count
    pub fn like(&mut self, id: ArtworkId) -> Option<u32> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.likes += 1;
        Some(item.likes)
    }

    pub fn remove(&mut self, id: ArtworkId) -> Option<GalleryItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
