//! Pixel-art commands
//!
//! CLI command implementations: read an image file into a data URI, run one
//! transformation and write the returned image back to disk.

use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::pixel::{
    GeminiClient, PixelArtStyle, PixelBitDepth, TransformationClient, TransformationRequest,
    TransformationResult, compose_prompt, split_data_uri, to_data_uri,
};

/// Read an image file and encode it as a data URI
///
/// The mime type is detected from the file contents, not its extension.
pub fn load_source_image(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::ImageReadError(format!("{}: {}", path.display(), e)))?;

    let format = image::guess_format(&bytes).map_err(|_| {
        Error::UnsupportedImage(format!("{} is not a recognized image", path.display()))
    })?;

    Ok(to_data_uri(format.to_mime_type(), &BASE64.encode(&bytes)))
}

/// Decode a result's data URI and write the image bytes to `path`
pub fn save_result(result: &TransformationResult, path: &Path) -> Result<()> {
    let (_, payload) = split_data_uri(&result.image_url)
        .ok_or_else(|| Error::ImageSaveError("result is not a base64 data URI".to_string()))?;

    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| Error::ImageSaveError(format!("Invalid base64: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::ImageSaveError(format!("Failed to create directory: {}", e)))?;
    }

    std::fs::write(path, bytes)
        .map_err(|e| Error::ImageSaveError(format!("{}: {}", path.display(), e)))
}

/// Default output path: `<stem>_<depth>_pixel.<ext>` next to the input
pub fn default_output_path(input: &Path, depth: PixelBitDepth, mime_type: Option<&str>) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let ext = mime_type
        .and_then(image::ImageFormat::from_mime_type)
        .and_then(|f| f.extensions_str().first().copied())
        .unwrap_or("png");

    input.with_file_name(format!("{}_{}_pixel.{}", stem, depth, ext))
}

/// Transform an image file into pixel art
pub async fn transform(
    input: PathBuf,
    output: Option<PathBuf>,
    style: Option<PixelArtStyle>,
    depth: Option<PixelBitDepth>,
    config: &Config,
) -> Result<PathBuf> {
    let api_key = config
        .generation
        .resolved_api_key()
        .map_err(|e| Error::ConfigError(e.to_string()))?
        .ok_or(Error::ApiKeyMissing)?;

    // Validate input exists
    if !input.exists() {
        return Err(Error::ImageReadError(format!(
            "Input file not found: {}",
            input.display()
        )));
    }

    let style = style.unwrap_or(config.defaults.style);
    let depth = depth.unwrap_or(config.defaults.depth);

    let source_image = load_source_image(&input)?;
    let request = TransformationRequest::new(source_image)
        .with_style(style)
        .with_depth(depth);

    let backend = GeminiClient::builder()
        .api_key(api_key)
        .base_url(&config.generation.base_url)
        .build()?;
    let client = TransformationClient::new(backend).with_model(&config.generation.model);

    let result = client.transform(&request).await?;

    let output_path =
        output.unwrap_or_else(|| default_output_path(&input, depth, result.mime_type()));
    save_result(&result, &output_path)?;

    info!(
        input = %input.display(),
        output = %output_path.display(),
        style = %style,
        depth = %depth,
        "Saved pixel art"
    );

    Ok(output_path)
}

/// Render the prompt that would be sent for a style and depth
pub fn prompt(style: PixelArtStyle, depth: PixelBitDepth) -> String {
    compose_prompt(style, depth)
}
