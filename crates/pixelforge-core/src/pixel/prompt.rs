//! Prompt composition
//!
//! Renders the full instruction text sent alongside the source image. The
//! composition order is fixed; only the style and depth blocks vary.

use super::profiles::{PixelArtStyle, PixelBitDepth};

const PREAMBLE: &str = "ACT AS A PROFESSIONAL PIXEL ARTIST.\n\nTASK: Transform the input image into PIXEL ART.";

const TECHNICAL_SPEC_LABEL: &str = "TECHNICAL SPECS AND BIT-DEPTH:";

const CORE_RULES: &str = "CORE RULES:
1. THE PIXEL GRID MUST BE PERFECTLY SHARP. NO BLUR OR ANTI-ALIASING.
2. NO SEMI-TRANSPARENCY.
3. NO SOFT GRADIENTS. Use dithered blocks or solid areas.
4. MUST look like hand-placed pixels, not a simple mosaic filter.";

const CLOSING: &str = "Respond with the image data only.";

/// Compose the instruction text for a (style, depth) pair
///
/// Pure and deterministic: the same pair always yields the same string.
pub fn compose_prompt(style: PixelArtStyle, depth: PixelBitDepth) -> String {
    let technical_spec = format!("{} {}", TECHNICAL_SPEC_LABEL, depth.technical_spec());

    [
        PREAMBLE,
        style.instruction(),
        technical_spec.as_str(),
        CORE_RULES,
        CLOSING,
    ]
    .join("\n\n")
}
