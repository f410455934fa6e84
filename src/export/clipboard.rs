use crate::error::ClipboardError;

/// Destination for raw RGBA clipboard payloads
pub trait ClipboardSink {
    fn set_image(&mut self, width: usize, height: usize, rgba: &[u8]) -> Result<(), ClipboardError>;
}

/// The operating system clipboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

#[cfg(not(target_arch = "wasm32"))]
impl ClipboardSink for SystemClipboard {
    fn set_image(&mut self, width: usize, height: usize, rgba: &[u8]) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new().map_err(map_arboard_error)?;
        clipboard
            .set_image(arboard::ImageData {
                width,
                height,
                bytes: std::borrow::Cow::Borrowed(rgba),
            })
            .map_err(map_arboard_error)
    }
}

#[cfg(target_arch = "wasm32")]
impl ClipboardSink for SystemClipboard {
    fn set_image(&mut self, _width: usize, _height: usize, _rgba: &[u8]) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_arboard_error(err: arboard::Error) -> ClipboardError {
    match err {
        arboard::Error::ClipboardNotSupported => ClipboardError::Unavailable,
        // Another program holds the clipboard; retrying later may work
        arboard::Error::ClipboardOccupied => ClipboardError::Backend(err.to_string()),
        other => ClipboardError::Backend(other.to_string()),
    }
}
