//! PixelForge Core Library
//!
//! This crate provides the core functionality for PixelForge, including:
//! - Prompt composition from a style and a simulated bit depth
//! - Pixel-art transformation through the Gemini API
//! - Configuration with file persistence
//! - Commands used by the CLI (load an image, transform, save the result)

pub mod commands;
pub mod config;
pub mod error;
pub mod pixel;

pub use error::{Error, GenerationFailure, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, GenerationFailure, Result};
    pub use crate::pixel::{
        PixelArtStyle, PixelBitDepth, TransformationClient, TransformationRequest,
        TransformationResult, compose_prompt, transform_to_pixel_art,
    };
}
