// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Color registry.
//!
//! Resolves the configured list of named colors into a validated palette, falling back to the
//! built-in defaults when configuration is missing or unusable, and derives the border tone
//! drawn around each highlight.

use serde_json::Value;

use crate::config::ConfigError;
use crate::model::{ColorDefinition, HexColor};

/// `(name, description, value, border)` for the built-in palette.
const DEFAULT_COLORS: [(&str, &str, &str, &str); 10] = [
    ("Yellow", "General notes", "#FFEB3B66", "#FBC02D"),
    ("Green", "Reviewed / approved", "#4CAF5066", "#388E3C"),
    ("Blue", "Needs explanation", "#2196F366", "#1976D2"),
    ("Pink", "Revisit later", "#E91E6366", "#C2185B"),
    ("Orange", "Performance concern", "#FF980066", "#F57C00"),
    ("Purple", "Refactor candidate", "#9C27B066", "#7B1FA2"),
    ("Red", "Bug or risk", "#F4433666", "#D32F2F"),
    ("Cyan", "External dependency", "#00BCD466", "#0097A7"),
    ("Teal", "Test coverage", "#00968866", "#00796B"),
    ("Gray", "Dead code", "#9E9E9E66", "#616161"),
];

pub fn default_palette() -> Vec<ColorDefinition> {
    DEFAULT_COLORS
        .iter()
        .map(|(name, description, value, _)| {
            ColorDefinition::new(
                *name,
                *description,
                HexColor::new(value).expect("built-in palette colors are valid"),
            )
        })
        .collect()
}

/// The resolved palette plus any warning the caller should surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteResolution {
    pub colors: Vec<ColorDefinition>,
    pub warning: Option<ConfigError>,
}

impl PaletteResolution {
    pub fn used_defaults(&self) -> bool {
        matches!(
            self.warning,
            Some(ConfigError::EmptyPalette) | Some(ConfigError::NoValidColors { .. })
        )
    }
}

/// Filters the configured color list down to well-formed entries.
///
/// An entry is kept iff it has a string `name` and a string `value` that is a valid hex color.
/// `description` is optional. When nothing usable remains the built-in palette is returned.
pub fn resolve_palette(configured: Option<&Value>) -> PaletteResolution {
    let entries = match configured {
        Some(Value::Array(entries)) if !entries.is_empty() => entries,
        _ => {
            return PaletteResolution {
                colors: default_palette(),
                warning: Some(ConfigError::EmptyPalette),
            };
        }
    };

    let colors: Vec<ColorDefinition> = entries.iter().filter_map(color_from_entry).collect();
    let skipped = entries.len() - colors.len();

    if colors.is_empty() {
        return PaletteResolution {
            colors: default_palette(),
            warning: Some(ConfigError::NoValidColors { rejected: skipped }),
        };
    }

    let warning = (skipped > 0).then_some(ConfigError::InvalidColorEntries { skipped });
    PaletteResolution { colors, warning }
}

fn color_from_entry(entry: &Value) -> Option<ColorDefinition> {
    let name = entry.get("name")?.as_str()?;
    let value = entry.get("value")?.as_str()?;
    let value = HexColor::new(value).ok()?;
    let description = entry
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default();
    Some(ColorDefinition::new(name, description, value))
}

/// Name and description of the first palette entry with exactly this color value.
pub fn lookup_metadata<'a>(
    color_value: &str,
    palette: &'a [ColorDefinition],
) -> Option<(&'a str, &'a str)> {
    palette
        .iter()
        .find(|definition| definition.value().as_str() == color_value)
        .map(|definition| (definition.name(), definition.description()))
}

/// Darker tone of the color's base RGB, used for the highlight border.
///
/// Only the built-in hues have a tone; any other color is its own border.
// TODO: derive a tone for custom colors by scaling the RGB channels instead of passing them through.
pub fn border_tone(color: &HexColor) -> HexColor {
    let base = color.base_rgb();
    DEFAULT_COLORS
        .iter()
        .find(|(_, _, value, _)| value[..7].eq_ignore_ascii_case(base))
        .and_then(|(_, _, _, border)| HexColor::new(border).ok())
        .unwrap_or_else(|| color.clone())
}
