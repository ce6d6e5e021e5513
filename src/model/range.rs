// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::{max, min};
use std::fmt;

/// A zero-based line/character coordinate inside a document.
///
/// Ordering is document order: by line, then by character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    line: u32,
    character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn character(&self) -> u32 {
        self.character
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// A plain coordinate range. Highlights are never anchored to content, so a range keeps its
/// coordinates no matter what happens to the text around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextRange {
    start: Position,
    end: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("range start {start} is after range end {end}")]
    Inverted { start: Position, end: Position },
}

impl TextRange {
    pub fn new(start: Position, end: Position) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Convenience constructor from a `(startLine, startCharacter, endLine, endCharacter)`
    /// quadruple, the shape used by the persisted file.
    pub fn from_coords(
        start_line: u32,
        start_character: u32,
        end_line: u32,
        end_character: u32,
    ) -> Result<Self, RangeError> {
        Self::new(
            Position::new(start_line, start_character),
            Position::new(end_line, end_character),
        )
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True iff the two ranges share a non-empty stretch of text. Ranges that only touch at
    /// an endpoint do not intersect.
    pub fn intersects(&self, other: &TextRange) -> bool {
        max(self.start, other.start) < min(self.end, other.end)
    }

    pub fn contains(&self, other: &TextRange) -> bool {
        self.start <= other.start && self.end >= other.end
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
