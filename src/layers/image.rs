use serde::{Serialize, Serializer};
use std::sync::Arc;

/// Raw image payload for a georeferenced overlay.
///
/// The bytes are never decoded here; the format is sniffed from the magic
/// bytes so the engine knows what it is being handed. Unknown payloads are
/// kept as-is with no format.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayImage {
    bytes: Arc<[u8]>,
    format: Option<image::ImageFormat>,
}

impl OverlayImage {
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        let format = image::guess_format(&bytes).ok();
        if format.is_none() {
            log::debug!("overlay image of {} bytes has no recognizable format", bytes.len());
        }
        Self { bytes, format }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn format(&self) -> Option<image::ImageFormat> {
        self.format
    }

    /// MIME type of the sniffed format, if any
    pub fn mime_type(&self) -> Option<&'static str> {
        self.format.map(|format| format.to_mime_type())
    }
}

// Summaries only; the payload itself never goes into layer snapshots.
impl Serialize for OverlayImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_json::json!({
            "mime_type": self.mime_type(),
            "byte_len": self.len(),
        })
        .serialize(serializer)
    }
}
