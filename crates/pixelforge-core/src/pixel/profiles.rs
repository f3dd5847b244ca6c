//! Style and bit-depth profiles
//!
//! Both axes are closed sets. Each variant is bound to exactly one block of
//! instruction text, kept in a single lookup per enum.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Simulated bit depth of the generated pixel art
///
/// This is a stylistic proxy, not a literal color depth: it controls how
/// coarse the pixel grid is and how large a palette the prompt allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PixelBitDepth {
    /// Chunkiest grid, tiny palette
    #[serde(rename = "8-bit")]
    Bit8,
    /// Classic 16-bit console look
    #[default]
    #[serde(rename = "16-bit")]
    Bit16,
    /// Arcade-era detail
    #[serde(rename = "32-bit")]
    Bit32,
    /// Modern high-detail pixel art
    #[serde(rename = "64-bit")]
    Bit64,
}

impl PixelBitDepth {
    /// Every depth, coarsest first
    pub const ALL: [PixelBitDepth; 4] = [Self::Bit8, Self::Bit16, Self::Bit32, Self::Bit64];

    /// Canonical name (`8-bit`, `16-bit`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bit8 => "8-bit",
            Self::Bit16 => "16-bit",
            Self::Bit32 => "32-bit",
            Self::Bit64 => "64-bit",
        }
    }

    /// Technical-specification block for this depth
    pub fn technical_spec(&self) -> &'static str {
        match self {
            Self::Bit8 => {
                "ULTRA-LOW RESOLUTION. Massive chunky pixels. 8-color palette limit. Very blocky edges."
            }
            Self::Bit16 => {
                "CLASSIC RETRO RESOLUTION. Clearly visible 1px-scale pixels. 16-32 color palette. Sharp aliased lines."
            }
            Self::Bit32 => {
                "ADVANCED ARCADE RESOLUTION. Detailed but strictly pixelated. 64 color palette. Vibrant with clean shading."
            }
            Self::Bit64 => {
                "MODERN HD PIXEL ART. High detail while maintaining a visible pixel grid. Rich color depth but strictly aliased."
            }
        }
    }

    /// Parse from string (e.g., "8-bit", "16bit", "32", "tier-4")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "8-bit" | "8bit" | "8" | "tier-1" | "tier1" => Some(Self::Bit8),
            "16-bit" | "16bit" | "16" | "tier-2" | "tier2" => Some(Self::Bit16),
            "32-bit" | "32bit" | "32" | "tier-3" | "tier3" => Some(Self::Bit32),
            "64-bit" | "64bit" | "64" | "tier-4" | "tier4" => Some(Self::Bit64),
            _ => None,
        }
    }
}

impl std::fmt::Display for PixelBitDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PixelBitDepth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            Error::InvalidInput(format!(
                "Invalid depth '{}'. Use: 8-bit, 16-bit, 32-bit, or 64-bit",
                s
            ))
        })
    }
}

/// Rendering aesthetic of the generated character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PixelArtStyle {
    /// Super-deformed JRPG anime sprite
    #[default]
    Chibi,
    /// Faithful RPG character on a white background
    Neutral,
}

impl PixelArtStyle {
    /// Every style
    pub const ALL: [PixelArtStyle; 2] = [Self::Chibi, Self::Neutral];

    /// Canonical name (`chibi`, `neutral`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chibi => "chibi",
            Self::Neutral => "neutral",
        }
    }

    /// Style-specific instruction block
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Chibi => concat!(
                "STYLE: JRPG Chibi Anime Sprite.\n",
                "INSTRUCTION: Transform the subject into a stylized anime character with large ",
                "expressive eyes and simplified proportions (Super Deformed/Chibi).\n",
                "Use clean dark outlines and flat cell-shading. ",
                "Refer to the aesthetic of classic 2D JRPGs.",
            ),
            Self::Neutral => concat!(
                "INSTRUCTION: Create a pixel art RPG-style character based on the person in the ",
                "attached picture.\n",
                "Reconfigure the same outfits and poses as the person in the picture.\n",
                "Render the character with neat contours, soft pastel tones, and retro 8-bit ",
                "aesthetics.\n",
                "Keep the background white to maintain a clear sense of isolation.",
            ),
        }
    }

    /// Parse from string (e.g., "chibi", "anime", "neutral", "rpg")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "chibi" | "anime" | "stylized" | "stylized-character" => Some(Self::Chibi),
            "neutral" | "rpg" | "neutral-character" => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for PixelArtStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PixelArtStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            Error::InvalidInput(format!("Invalid style '{}'. Use: chibi or neutral", s))
        })
    }
}
