//! Request-side types for a thumbnail comparison.

use crate::error::AnalysisError;
use base64::Engine;

/// Base64-encoded image ready to inline into an analysis payload.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes, without any data-URL prefix
    pub data: String,
    /// MIME type (e.g., "image/png", "image/jpeg")
    pub media_type: String,
}

impl ImageInput {
    /// Create an `ImageInput` from raw bytes and format string.
    ///
    /// The format is the image format identifier (e.g., "png", "jpeg", "webp").
    pub fn from_bytes(bytes: &[u8], format: &str) -> Self {
        let media_type = match format {
            "png" => "image/png",
            "jpeg" | "jpg" => "image/jpeg",
            "webp" => "image/webp",
            "gif" => "image/gif",
            other => {
                tracing::warn!("Unknown image format '{other}', defaulting to image/png");
                "image/png"
            }
        };

        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        }
    }

    /// Create an `ImageInput` from a `data:<mime>;base64,<payload>` URL,
    /// stripping the prefix. A bare base64 string is accepted as PNG.
    pub fn from_data_url(url: &str) -> Self {
        match url.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest.split_once(',').unwrap_or(("", rest));
                let media_type = header
                    .split(';')
                    .next()
                    .filter(|m| !m.is_empty())
                    .unwrap_or("image/png");
                Self {
                    data: payload.to_string(),
                    media_type: media_type.to_string(),
                }
            }
            None => Self {
                data: url.to_string(),
                media_type: "image/png".to_string(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One comparison request: two candidate thumbnails with their titles.
///
/// Constructed fresh per invocation and discarded when the call resolves;
/// nothing is persisted or shared between calls.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image_a: ImageInput,
    pub image_b: ImageInput,
    pub title_a: String,
    pub title_b: String,
}

impl AnalysisRequest {
    /// Reject an incomplete request before any network round-trip.
    ///
    /// The caller is responsible for collecting all four fields, but the
    /// core checks them anyway and names the first empty one.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.image_a.is_empty() {
            return Err(AnalysisError::IncompleteInput { field: "image_a" });
        }
        if self.image_b.is_empty() {
            return Err(AnalysisError::IncompleteInput { field: "image_b" });
        }
        if self.title_a.trim().is_empty() {
            return Err(AnalysisError::IncompleteInput { field: "title_a" });
        }
        if self.title_b.trim().is_empty() {
            return Err(AnalysisError::IncompleteInput { field: "title_b" });
        }
        Ok(())
    }
}
