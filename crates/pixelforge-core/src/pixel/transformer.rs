//! Pixel-art transformation client
//!
//! Packages a source image and the composed prompt into one multimodal
//! request, performs a single backend call and pulls the first inline image
//! out of the response.

use chrono::Utc;
use tracing::{debug, error, info};

use crate::error::GenerationFailure;

use super::client::{GeminiClient, GenerationBackend};
use super::content::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig, Part,
};
use super::profiles::{PixelArtStyle, PixelBitDepth};
use super::prompt::compose_prompt;
use super::types::{TransformationRequest, TransformationResult, strip_data_uri_prefix, to_data_uri};

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Mime type declared for every outgoing source image, whatever its real format
pub const OUTGOING_MIME_TYPE: &str = "image/jpeg";

/// Aspect ratio requested for every generated image
pub const OUTPUT_ASPECT_RATIO: &str = "1:1";

/// Transformation client over a generation backend
#[derive(Debug, Clone)]
pub struct TransformationClient<B> {
    backend: B,
    model: String,
}

impl<B: GenerationBackend> TransformationClient<B> {
    /// Create a client using the default model
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Model identifier sent with each request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Build the outgoing request for a transformation
    pub fn build_request(&self, request: &TransformationRequest) -> GenerateContentRequest {
        let payload = strip_data_uri_prefix(&request.source_image);
        let prompt = compose_prompt(request.style, request.depth);

        GenerateContentRequest {
            model: self.model.clone(),
            contents: vec![Content::user(vec![
                Part::inline(OUTGOING_MIME_TYPE, payload),
                Part::text(prompt),
            ])],
            generation_config: Some(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: Some(OUTPUT_ASPECT_RATIO.to_string()),
                }),
            }),
        }
    }

    /// Run one transformation attempt
    ///
    /// Exactly one backend call is made. Every failure is logged before it is
    /// returned; no partial image is ever returned as a success.
    pub async fn transform(
        &self,
        request: &TransformationRequest,
    ) -> Result<TransformationResult, GenerationFailure> {
        info!(
            style = %request.style,
            depth = %request.depth,
            model = %self.model,
            "Transforming image to pixel art"
        );

        let outgoing = self.build_request(request);

        let response = match self.backend.generate_content(&outgoing).await {
            Ok(response) => response,
            Err(e) => {
                let failure = GenerationFailure::from(e.clone());
                error!(error = %failure, status = ?e.status, "Pixel art generation failed");
                return Err(failure);
            }
        };

        let Some(image_url) = extract_image(&response) else {
            let failure = GenerationFailure::NoImage;
            error!(
                parts = response.first_candidate_parts().len(),
                error = %failure,
                "Response contained no inline image"
            );
            return Err(failure);
        };

        info!(style = %request.style, depth = %request.depth, "Pixel art generated");

        Ok(TransformationResult {
            image_url,
            depth: request.depth,
            style: request.style,
            created_at: Utc::now(),
        })
    }
}

/// First inline image of the first candidate, as a data URI
///
/// Parts are scanned in order and the scan stops at the first part carrying
/// inline data with both a mime type and a payload. Text parts, empty inline
/// parts and any later images are ignored.
pub fn extract_image(response: &GenerateContentResponse) -> Option<String> {
    for (index, part) in response.first_candidate_parts().iter().enumerate() {
        match &part.inline_data {
            Some(inline) if inline.is_usable() => {
                debug!(index, mime_type = %inline.mime_type, "Found inline image part");
                return Some(to_data_uri(&inline.mime_type, &inline.data));
            }
            Some(_) => debug!(index, "Skipping empty inline data part"),
            None => {}
        }
    }
    None
}

/// Transform a data-URI image with a credential supplied at call time
///
/// This is the whole contract a UI layer needs: image in, image out, or a
/// failure carrying a message to show the user.
pub async fn transform_to_pixel_art(
    api_key: &str,
    source_image: &str,
    depth: PixelBitDepth,
    style: PixelArtStyle,
) -> Result<TransformationResult, GenerationFailure> {
    let backend = GeminiClient::new(api_key).map_err(|e| {
        let failure = GenerationFailure::Transport(e.to_string());
        error!(error = %failure, "Could not create Gemini client");
        failure
    })?;

    let request = TransformationRequest::new(source_image)
        .with_depth(depth)
        .with_style(style);

    TransformationClient::new(backend).transform(&request).await
}
