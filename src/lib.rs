// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rangemark: persistent colored highlights over text ranges.
//!
//! The crate holds the highlight index, its JSON file under `<workspace>/.rangemark/`, and the
//! session logic that keeps an editor's decorations in step with both. Editors plug in through
//! [`render::EditorHost`].

pub mod config;
pub mod index;
pub mod model;
pub mod palette;
pub mod render;
pub mod session;
pub mod store;

pub use config::{ConfigError, HighlightConfig};
pub use index::{AddHighlightError, HighlightStore};
pub use render::{EditorHost, HeadlessHost, Notice};
pub use session::{HighlightSession, Visibility};
pub use store::{HighlightsFile, StoreError, WriteDurability};
