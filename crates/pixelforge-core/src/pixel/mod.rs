//! Pixel-art transformation for PixelForge
//!
//! Turns a photo into AI-generated pixel art using Gemini image models.
//!
//! - Prompt composition from a style and a simulated bit depth
//! - One multimodal `generateContent` request per transformation
//! - First-match extraction of the returned inline image

mod client;
mod content;
mod profiles;
mod prompt;
mod transformer;
mod types;

pub use client::{GEMINI_BASE_URL, GeminiClient, GeminiClientBuilder, GenerationBackend};
pub use content::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ImageConfig, InlineData, Part,
};
pub use profiles::{PixelArtStyle, PixelBitDepth};
pub use prompt::compose_prompt;
pub use transformer::{
    DEFAULT_MODEL, OUTGOING_MIME_TYPE, OUTPUT_ASPECT_RATIO, TransformationClient, extract_image,
    transform_to_pixel_art,
};
pub use types::{
    TransformationRequest, TransformationResult, split_data_uri, strip_data_uri_prefix,
    to_data_uri,
};
