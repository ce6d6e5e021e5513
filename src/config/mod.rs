// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only configuration consumed by the highlight engine.
//!
//! The engine never writes configuration. A missing config file means defaults; a malformed
//! one means defaults plus a [`ConfigError`] warning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::model::{ColorDefinition, HexColor};
use crate::store::WORKSPACE_DIRNAME;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_SETTLE_DELAY_MS: u64 = 100;

/// Non-fatal configuration problems. Every variant is recovered from by using defaults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("no custom colors configured, using the default palette")]
    EmptyPalette,
    #[error("none of the {rejected} configured colors is valid, using the default palette")]
    NoValidColors { rejected: usize },
    #[error("skipped {skipped} configured colors with a missing name or invalid value")]
    InvalidColorEntries { skipped: usize },
    #[error("default color {value:?} is not a valid hex color, using {fallback}")]
    InvalidDefaultColor { value: String, fallback: HexColor },
    #[error("cannot read config file {path:?}: {message}")]
    Read { path: PathBuf, message: String },
    #[error("cannot parse config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HighlightConfig {
    /// Raw color list; validated by [`crate::palette::resolve_palette`].
    pub colors: Option<Value>,
    /// Whether highlight names and descriptions are written to the persisted file.
    pub persist_metadata: bool,
    /// Whether the host should offer a visibility toggle. The engine itself ignores it.
    pub show_toggle: bool,
    pub default_color: String,
    pub settle_delay_ms: u64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            colors: None,
            persist_metadata: true,
            show_toggle: true,
            default_color: "#FFEB3B66".to_owned(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl HighlightConfig {
    pub fn default_path(workspace_root: &Path) -> PathBuf {
        workspace_root.join(WORKSPACE_DIRNAME).join(CONFIG_FILENAME)
    }

    /// Reads the config file strictly. A missing file is reported as `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    message: source.to_string(),
                })
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                message: source.to_string(),
            })
    }

    /// Reads the config file, degrading to defaults on any problem.
    pub fn load_or_default(path: &Path) -> (Self, Option<ConfigError>) {
        match Self::load(path) {
            Ok(Some(config)) => (config, None),
            Ok(None) => (Self::default(), None),
            Err(err) => {
                tracing::warn!(error = %err, "using default highlight configuration");
                (Self::default(), Some(err))
            }
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// The configured default color, or the first palette color when it does not validate.
    pub fn resolve_default_color(
        &self,
        palette: &[ColorDefinition],
    ) -> (HexColor, Option<ConfigError>) {
        if let Ok(color) = HexColor::new(&self.default_color) {
            return (color, None);
        }

        let fallback = palette
            .first()
            .map(|definition| definition.value().clone())
            .unwrap_or_else(|| HexColor::new("#FFEB3B66").expect("hard-coded color is valid"));
        let warning = ConfigError::InvalidDefaultColor {
            value: self.default_color.clone(),
            fallback: fallback.clone(),
        };
        (fallback, Some(warning))
    }
}
