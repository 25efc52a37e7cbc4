//! Colorization palettes
//!
//! A palette decides which colors the colorizer hands out. It is either a fixed
//! list drawn from at random, or a procedural HSL range. Palettes load from TOML
//! so a user can swap the color scheme without touching code.

use std::ops::RangeInclusive;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing palettes
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Failed to read palette file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse palette TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Palette scheme needs at least one color")]
    NoColors,
    #[error("Invalid {name} range {start}..={end} (percentages, start <= end <= 100)")]
    InvalidRange { name: &'static str, start: u8, end: u8 },
}

/// How colors are produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorScheme {
    /// Uniform draw from a fixed list
    Palette(Vec<String>),
    /// Random hue with saturation and lightness percentages from the ranges
    Hsl {
        saturation: RangeInclusive<u8>,
        lightness: RangeInclusive<u8>,
    },
}

impl ColorScheme {
    /// Saturation 70-100 %, lightness 45-55 %
    pub fn vivid_hsl() -> Self {
        ColorScheme::Hsl {
            saturation: 70..=100,
            lightness: 45..=55,
        }
    }
}

/// A named color scheme with an optional fixed seed
#[derive(Debug, Clone)]
pub struct Palette {
    /// Optional name for the palette
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    pub scheme: ColorScheme,
    /// Seed for reproducible colors; entropy is used when absent
    pub seed: Option<u64>,
}

/// TOML structure for deserializing palettes
#[derive(Deserialize)]
struct TomlPalette {
    metadata: Option<TomlMetadata>,
    colorize: TomlColorize,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct TomlColorize {
    #[serde(default)]
    scheme: SchemeKind,
    #[serde(default)]
    colors: Vec<String>,
    saturation: Option<[u8; 2]>,
    lightness: Option<[u8; 2]>,
    seed: Option<u64>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "lowercase")]
enum SchemeKind {
    #[default]
    Palette,
    Hsl,
}

/// Default palette - 500/600/700/400 shades of ten hue families
const DEFAULT_PALETTE: &str = r##"
[metadata]
name = "default"
description = "Red, yellow, green, blue, purple, pink, gray, orange, teal and indigo shades"

[colorize]
scheme = "palette"
colors = [
    # Red
    "#F05252", "#DC2626", "#B91C1C", "#EF4444",
    # Yellow
    "#FACA15", "#EAB308", "#CA8A04", "#FCD34D",
    # Green
    "#22A06B", "#059669", "#047857", "#34D399",
    # Blue
    "#1C64F2", "#2563EB", "#1D4ED8", "#60A5FA",
    # Purple
    "#7C3AED", "#6D28D9", "#5B21B6", "#A78BFA",
    # Pink
    "#EC4899", "#DB2777", "#BE185D", "#F472B6",
    # Gray
    "#6B7280", "#4B5563", "#374151", "#9CA3AF",
    # Orange
    "#F97316", "#EA580C", "#C2410C", "#FB923C",
    # Teal
    "#14B8A6", "#0D9488", "#0F766E", "#2DD4BF",
    # Indigo
    "#8B5CF6", "#7C3AED", "#6D28D9", "#A78BFA",
]
"##;

impl Palette {
    /// Load palette from TOML file
    pub fn from_file(path: &Path) -> Result<Self, PaletteError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load palette from TOML string
    pub fn from_str(content: &str) -> Result<Self, PaletteError> {
        let parsed: TomlPalette = toml::from_str(content)?;
        let colorize = parsed.colorize;

        let scheme = match colorize.scheme {
            SchemeKind::Palette => {
                if colorize.colors.is_empty() {
                    return Err(PaletteError::NoColors);
                }
                ColorScheme::Palette(colorize.colors)
            }
            SchemeKind::Hsl => ColorScheme::Hsl {
                saturation: percent_range("saturation", colorize.saturation, 70..=100)?,
                lightness: percent_range("lightness", colorize.lightness, 45..=55)?,
            },
        };

        Ok(Palette {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            scheme,
            seed: colorize.seed,
        })
    }

    /// Procedural palette with the vivid HSL ranges
    pub fn hsl() -> Self {
        Palette {
            name: Some("hsl".to_string()),
            description: None,
            scheme: ColorScheme::vivid_hsl(),
            seed: None,
        }
    }

    /// Override the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start generating colors
    pub fn generator(&self) -> ColorGenerator {
        ColorGenerator::new(self.scheme.clone(), self.seed)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}

fn percent_range(
    name: &'static str,
    bounds: Option<[u8; 2]>,
    default: RangeInclusive<u8>,
) -> Result<RangeInclusive<u8>, PaletteError> {
    let Some([start, end]) = bounds else {
        return Ok(default);
    };
    if start > end || end > 100 {
        return Err(PaletteError::InvalidRange { name, start, end });
    }
    Ok(start..=end)
}

/// Fallback when a scheme was built by hand without colors
const FALLBACK_COLOR: &str = "#6B7280";

/// Source of fresh colors for the colorizer
#[derive(Debug, Clone)]
pub struct ColorGenerator {
    scheme: ColorScheme,
    rng: StdRng,
}

impl ColorGenerator {
    pub fn new(scheme: ColorScheme, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { scheme, rng }
    }

    /// Produce the next color as a CSS color string
    pub fn next_color(&mut self) -> String {
        match &self.scheme {
            ColorScheme::Palette(colors) => colors
                .choose(&mut self.rng)
                .cloned()
                .unwrap_or_else(|| FALLBACK_COLOR.to_string()),
            ColorScheme::Hsl {
                saturation,
                lightness,
            } => {
                let hue = self.rng.gen_range(0..360u16);
                let s = pick(&mut self.rng, saturation);
                let l = pick(&mut self.rng, lightness);
                format!("hsl({}, {}%, {}%)", hue, s, l)
            }
        }
    }
}

fn pick(rng: &mut StdRng, range: &RangeInclusive<u8>) -> u8 {
    if range.start() > range.end() {
        *range.start()
    } else {
        rng.gen_range(range.clone())
    }
}

impl Default for ColorGenerator {
    fn default() -> Self {
        Palette::default().generator()
    }
}
