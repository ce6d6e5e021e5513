// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{EditorHost, Notice, StyleHandle, StyleSpec};
use crate::model::{DocumentId, TextRange};

/// Host without a screen: decorations only show up in the debug log, notices in the warn/error
/// log. Used by the command line shell.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    next_handle: u64,
    live_styles: usize,
    errors: usize,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_styles(&self) -> usize {
        self.live_styles
    }

    /// Number of [`Notice::Error`] notices received so far.
    pub fn error_count(&self) -> usize {
        self.errors
    }
}

impl EditorHost for HeadlessHost {
    fn create_style(&mut self, spec: &StyleSpec) -> StyleHandle {
        self.next_handle += 1;
        self.live_styles += 1;
        tracing::debug!(
            handle = self.next_handle,
            background = %spec.background,
            border = %spec.border,
            "headless style created"
        );
        StyleHandle(self.next_handle)
    }

    fn dispose_style(&mut self, handle: StyleHandle) {
        self.live_styles = self.live_styles.saturating_sub(1);
        tracing::debug!(handle = handle.0, "headless style disposed");
    }

    fn set_ranges(&mut self, document: &DocumentId, handle: StyleHandle, ranges: &[TextRange]) {
        tracing::debug!(
            document = %document,
            handle = handle.0,
            ranges = ranges.len(),
            "headless ranges set"
        );
    }

    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::Warning(message) => tracing::warn!("{message}"),
            Notice::Error(message) => {
                self.errors += 1;
                tracing::error!("{message}");
            }
        }
    }
}
