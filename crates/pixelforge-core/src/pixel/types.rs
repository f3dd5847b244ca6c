//! Transformation request and result types
//!
//! Images cross the library boundary as data URIs
//! (`data:<mime>;base64,<payload>`), never as files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profiles::{PixelArtStyle, PixelBitDepth};

/// One user-initiated transformation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationRequest {
    /// Source image as a data URI
    pub source_image: String,
    /// Simulated bit depth
    #[serde(default)]
    pub depth: PixelBitDepth,
    /// Rendering style
    #[serde(default)]
    pub style: PixelArtStyle,
}

impl TransformationRequest {
    /// Create a request with the default style and depth
    pub fn new(source_image: impl Into<String>) -> Self {
        Self {
            source_image: source_image.into(),
            depth: PixelBitDepth::default(),
            style: PixelArtStyle::default(),
        }
    }

    /// Set the bit depth
    pub fn with_depth(mut self, depth: PixelBitDepth) -> Self {
        self.depth = depth;
        self
    }

    /// Set the style
    pub fn with_style(mut self, style: PixelArtStyle) -> Self {
        self.style = style;
        self
    }
}

/// Successful transformation output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationResult {
    /// Generated image as a data URI
    pub image_url: String,
    /// Depth the image was generated with
    pub depth: PixelBitDepth,
    /// Style the image was generated with
    pub style: PixelArtStyle,
    /// When the service returned the image
    pub created_at: DateTime<Utc>,
}

impl TransformationResult {
    /// Mime type declared by the result's data URI
    pub fn mime_type(&self) -> Option<&str> {
        split_data_uri(&self.image_url).map(|(mime, _)| mime)
    }

    /// Base64 payload of the result's data URI
    pub fn payload(&self) -> Option<&str> {
        split_data_uri(&self.image_url).map(|(_, payload)| payload)
    }
}

/// Remove a leading `data:image/<subtype>;base64,` header
///
/// Input without such a header is returned unchanged.
pub fn strip_data_uri_prefix(source: &str) -> &str {
    let Some(rest) = source.strip_prefix("data:image/") else {
        return source;
    };
    let Some((subtype, payload)) = rest.split_once(";base64,") else {
        return source;
    };

    let valid_subtype = !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if valid_subtype { payload } else { source }
}

/// Build a data URI from a mime type and base64 payload
pub fn to_data_uri(mime_type: &str, payload: &str) -> String {
    format!("data:{};base64,{}", mime_type, payload)
}

/// Split a base64 data URI into (mime type, payload)
pub fn split_data_uri(uri: &str) -> Option<(&str, &str)> {
    let rest = uri.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    if mime.is_empty() {
        return None;
    }
    Some((mime, payload))
}
