// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::range::TextRange;

/// Label used when a persisted highlight carries no name.
pub const DEFAULT_HIGHLIGHT_NAME: &str = "Highlight";

/// One colored annotation over a coordinate range.
///
/// The color is not stored here; it is the key of the bucket owning the highlight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    range: TextRange,
    name: String,
    description: String,
}

impl Highlight {
    pub fn new(range: TextRange, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            range,
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
