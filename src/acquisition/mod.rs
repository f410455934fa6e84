//! Resolving what to color: catalog lookups, processed uploads and the
//! generation stub.

pub mod catalog;
pub mod generator;
pub mod outline;
pub mod upload;

use std::io::Cursor;

use futures::FutureExt;
use futures::future::BoxFuture;
use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::{AcquisitionError, LoadFailure};
pub use upload::UploadStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Metadata of something that can be colored. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColoringImage {
    pub id: String,
    pub title: String,
    pub description: String,
    pub outline_image_url: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub is_ai: bool,
}

#[derive(Debug, Clone)]
pub enum ImageRequest {
    Catalog {
        id: String,
    },
    Upload {
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
    Generate {
        prompt: String,
        category: String,
    },
}

/// Supplies coloring targets and their outline bitmaps. Both steps may take
/// a while, so callers keep a loading state visible until they settle.
pub trait ImageSource: Send + Sync {
    fn resolve(&self, request: ImageRequest) -> BoxFuture<'static, Result<ColoringImage, AcquisitionError>>;

    /// Fetch the encoded outline bytes behind `ColoringImage::outline_image_url`
    fn fetch_outline(&self, url: &str) -> BoxFuture<'static, Result<Vec<u8>, LoadFailure>>;
}

/// Resolve a request, then fetch its outline. A failed fetch is handed back
/// alongside the image so the session can fall back to a placeholder.
pub async fn acquire(
    source: &dyn ImageSource,
    request: ImageRequest,
) -> Result<(ColoringImage, Result<Vec<u8>, LoadFailure>), AcquisitionError> {
    let image = source.resolve(request).await?;
    let outline = source.fetch_outline(&image.outline_image_url).await;
    Ok((image, outline))
}

/// The default [`ImageSource`], backed by the static catalog, the in-memory
/// upload store and the generation stub.
#[derive(Clone)]
pub struct ImageResolver {
    uploads: UploadStore,
    canvas_width: u32,
    canvas_height: u32,
    max_upload_bytes: usize,
}

impl ImageResolver {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            uploads: UploadStore::new(),
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }
}

impl ImageSource for ImageResolver {
    fn resolve(&self, request: ImageRequest) -> BoxFuture<'static, Result<ColoringImage, AcquisitionError>> {
        let uploads = self.uploads.clone();
        let limit = self.max_upload_bytes;

        async move {
            match request {
                ImageRequest::Catalog { id } => {
                    catalog::lookup(&id).ok_or(AcquisitionError::NotFound(id))
                }
                ImageRequest::Upload {
                    file_name,
                    mime,
                    bytes,
                } => {
                    upload::validate_upload(&mime, bytes.len(), limit)?;
                    log::info!("📤 Processing upload {} ({} bytes)", file_name, bytes.len());
                    let outline = upload::extract_outline(&bytes)?;
                    let url = uploads.insert(&outline)?;
                    let title = file_name
                        .rsplit_once('.')
                        .map_or(file_name.as_str(), |(stem, _)| stem)
                        .to_owned();
                    Ok(ColoringImage {
                        id: url.trim_start_matches(upload::UPLOAD_SCHEME).to_owned(),
                        title,
                        description: "Your own drawing, ready to color!".to_owned(),
                        outline_image_url: url,
                        category: "uploads".to_owned(),
                        difficulty: Difficulty::Medium,
                        tags: vec!["upload".to_owned()],
                        is_ai: false,
                    })
                }
                ImageRequest::Generate { prompt, category } => {
                    Ok(generator::generate(&prompt, &category))
                }
            }
        }
        .boxed()
    }

    fn fetch_outline(&self, url: &str) -> BoxFuture<'static, Result<Vec<u8>, LoadFailure>> {
        let url = url.to_owned();
        let uploads = self.uploads.clone();
        let (width, height) = (self.canvas_width, self.canvas_height);

        async move {
            if let Some(name) = url.strip_prefix(outline::BUILTIN_SCHEME) {
                let img = outline::render_builtin(name, width, height)
                    .ok_or_else(|| LoadFailure::NotFound(url.clone()))?;
                let mut png = Vec::new();
                img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
                Ok(png)
            } else if url.starts_with(upload::UPLOAD_SCHEME) {
                uploads.get(&url).ok_or(LoadFailure::NotFound(url))
            } else {
                read_local(&url)
            }
        }
        .boxed()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_local(path: &str) -> Result<Vec<u8>, LoadFailure> {
    let path = path.strip_prefix("file://").unwrap_or(path);
    match std::fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(LoadFailure::NotFound(path.to_owned()))
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(target_arch = "wasm32")]
fn read_local(path: &str) -> Result<Vec<u8>, LoadFailure> {
    Err(LoadFailure::Unsupported(path.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn resolver() -> ImageResolver {
        ImageResolver::new(&SessionConfig::default())
    }

    #[test]
    fn test_catalog_request() {
        let (image, outline) = block_on(acquire(
            &resolver(),
            ImageRequest::Catalog { id: "1".to_owned() },
        ))
        .unwrap();
        assert_eq!(image.category, "animals");
        let bytes = outline.unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 600);
    }

    #[test]
    fn test_unknown_catalog_id() {
        let result = block_on(resolver().resolve(ImageRequest::Catalog {
            id: "nope".to_owned(),
        }));
        assert!(matches!(result, Err(AcquisitionError::NotFound(id)) if id == "nope"));
    }

    #[test]
    fn test_missing_local_file_is_load_failure() {
        let result = block_on(resolver().fetch_outline("/definitely/not/here.png"));
        assert!(matches!(result, Err(LoadFailure::NotFound(_))));
    }
}
