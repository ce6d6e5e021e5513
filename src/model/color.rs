// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use smol_str::SmolStr;

/// A `#RRGGBB` or `#RRGGBBAA` color value.
///
/// The literal string is the identity: `#ffeb3b66` and `#FFEB3B66` are different colors as far
/// as bucketing and persistence are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexColor(SmolStr);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color value {value:?} (expected #RRGGBB or #RRGGBBAA)")]
pub struct HexColorError {
    pub value: String,
}

fn hex_color_regex() -> &'static Regex {
    static HEX_COLOR: OnceLock<Regex> = OnceLock::new();
    HEX_COLOR.get_or_init(|| {
        Regex::new(r"^#(?:[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$").expect("hex color regex is valid")
    })
}

pub fn is_hex_color(value: &str) -> bool {
    hex_color_regex().is_match(value)
}

impl HexColor {
    pub fn new(value: impl AsRef<str>) -> Result<Self, HexColorError> {
        let value = value.as_ref();
        if !is_hex_color(value) {
            return Err(HexColorError {
                value: value.to_owned(),
            });
        }
        Ok(Self(SmolStr::new(value)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `#RRGGBB` part, without any alpha channel.
    pub fn base_rgb(&self) -> &str {
        &self.0[..7]
    }

    pub fn has_alpha(&self) -> bool {
        self.0.len() == 9
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for HexColor {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for HexColor {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A named palette entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorDefinition {
    name: String,
    description: String,
    value: HexColor,
}

impl ColorDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, value: HexColor) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self) -> &HexColor {
        &self.value
    }
}
