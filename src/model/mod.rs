// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core value types.
//!
//! Documents are identified by absolute paths; highlights are plain coordinate ranges tagged
//! with a color value and optional metadata.

pub mod color;
pub mod document;
pub mod highlight;
pub mod range;

pub use color::{is_hex_color, ColorDefinition, HexColor, HexColorError};
pub use document::{DocumentId, DocumentIdError};
pub use highlight::{Highlight, DEFAULT_HIGHLIGHT_NAME};
pub use range::{Position, RangeError, TextRange};
