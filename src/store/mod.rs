// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for highlights on disk.
//!
//! One pretty-printed JSON file per workspace (`.rangemark/highlights.json`) holds every
//! highlight of every document, keyed by workspace-relative path and color value.

pub mod codec;
pub mod highlights_file;

pub use codec::{decode_highlights, encode_highlights, HighlightJson, HighlightsJson};
pub use highlights_file::{HighlightsFile, StoreError, WriteDurability, WORKSPACE_DIRNAME};
