// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Presentation of highlights through a host editor.
//!
//! The host owns the actual decoration objects; this module only decides which style exists for
//! which color and which ranges each style shows in a document. Rendering is always "clear
//! everything for the document, then draw the current buckets", so what is visible can never
//! drift from the index.

use std::collections::BTreeMap;

use crate::index::DocumentIndex;
use crate::model::{DocumentId, HexColor, TextRange};
use crate::palette::border_tone;

mod headless;
#[cfg(test)]
pub(crate) mod test_utils;

pub use headless::HeadlessHost;

/// Opaque handle for a style created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleHandle(pub u64);

/// How a decoration behaves when text is typed at its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeBehavior {
    /// Typing at either edge does not grow the decoration.
    #[default]
    ClosedClosed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpec {
    pub background: HexColor,
    pub border: HexColor,
    pub border_width_px: u8,
    pub border_radius_px: u8,
    pub range_behavior: RangeBehavior,
}

impl StyleSpec {
    pub fn for_color(color: &HexColor) -> Self {
        Self {
            background: color.clone(),
            border: border_tone(color),
            border_width_px: 1,
            border_radius_px: 3,
            range_behavior: RangeBehavior::ClosedClosed,
        }
    }
}

/// Messages the engine wants the user to see. None of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Error(String),
}

/// The editor side of the engine.
pub trait EditorHost {
    fn create_style(&mut self, spec: &StyleSpec) -> StyleHandle;

    fn dispose_style(&mut self, handle: StyleHandle);

    /// Replaces the ranges shown with `handle` in `document`. An empty slice clears them.
    fn set_ranges(&mut self, document: &DocumentId, handle: StyleHandle, ranges: &[TextRange]);

    fn notify(&mut self, notice: Notice) {
        let _ = notice;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleToken {
    handle: StyleHandle,
    spec: StyleSpec,
}

impl StyleToken {
    pub fn handle(&self) -> StyleHandle {
        self.handle
    }

    pub fn spec(&self) -> &StyleSpec {
        &self.spec
    }
}

/// Per-color style cache plus the redraw policy.
///
/// Tokens are created on first use and live until [`DecorationAdapter::dispose_all`].
#[derive(Debug, Default)]
pub struct DecorationAdapter {
    tokens: BTreeMap<HexColor, StyleToken>,
}

impl DecorationAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style_for<H: EditorHost + ?Sized>(
        &mut self,
        color: &HexColor,
        host: &mut H,
    ) -> StyleHandle {
        if let Some(token) = self.tokens.get(color) {
            return token.handle;
        }

        let spec = StyleSpec::for_color(color);
        let handle = host.create_style(&spec);
        tracing::debug!(color = %color, handle = handle.0, "created highlight style");
        self.tokens
            .insert(color.clone(), StyleToken { handle, spec });
        handle
    }

    pub fn token(&self, color: &HexColor) -> Option<&StyleToken> {
        self.tokens.get(color)
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Clears every cached style's ranges in `document`.
    pub fn hide<H: EditorHost + ?Sized>(&self, document: &DocumentId, host: &mut H) {
        for token in self.tokens.values() {
            host.set_ranges(document, token.handle, &[]);
        }
    }

    pub fn hide_all<'a, H, I>(&self, documents: I, host: &mut H)
    where
        H: EditorHost + ?Sized,
        I: IntoIterator<Item = &'a DocumentId>,
    {
        for document in documents {
            self.hide(document, host);
        }
    }

    /// Clears `document`, then, when `visible`, draws each bucket of `index` with its color's
    /// style.
    pub fn render<H: EditorHost + ?Sized>(
        &mut self,
        document: &DocumentId,
        index: Option<&DocumentIndex>,
        visible: bool,
        host: &mut H,
    ) {
        self.hide(document, host);
        if !visible {
            return;
        }

        let Some(index) = index else {
            return;
        };

        for (color, bucket) in index.buckets() {
            if bucket.is_empty() {
                continue;
            }
            let handle = self.style_for(color, host);
            let ranges: Vec<TextRange> = bucket.iter().map(|highlight| highlight.range()).collect();
            host.set_ranges(document, handle, &ranges);
        }
    }

    pub fn dispose_all<H: EditorHost + ?Sized>(&mut self, host: &mut H) {
        let tokens = std::mem::take(&mut self.tokens);
        for (color, token) in tokens {
            tracing::debug!(color = %color, handle = token.handle.0, "disposing highlight style");
            host.dispose_style(token.handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_utils::RecordingHost;
    use super::{DecorationAdapter, RangeBehavior};
    use crate::index::HighlightStore;
    use crate::model::{DocumentId, HexColor, TextRange};

    const YELLOW: &str = "#FFEB3B66";
    const BLUE: &str = "#2196F366";

    fn range(sl: u32, sc: u32, el: u32, ec: u32) -> TextRange {
        TextRange::from_coords(sl, sc, el, ec).unwrap()
    }

    fn doc(name: &str) -> DocumentId {
        DocumentId::new(std::env::temp_dir().join(name)).unwrap()
    }

    #[test]
    fn style_for_caches_per_color() {
        let mut host = RecordingHost::default();
        let mut adapter = DecorationAdapter::new();
        let yellow = HexColor::new(YELLOW).unwrap();

        let first = adapter.style_for(&yellow, &mut host);
        let second = adapter.style_for(&yellow, &mut host);
        assert_eq!(first, second);
        assert_eq!(host.created_count(), 1);

        let token = adapter.token(&yellow).unwrap();
        assert_eq!(token.spec().background, yellow);
        assert_eq!(token.spec().border.as_str(), "#FBC02D");
        assert_eq!(token.spec().range_behavior, RangeBehavior::ClosedClosed);
    }

    #[test]
    fn render_draws_exactly_the_buckets() {
        let mut host = RecordingHost::default();
        let mut adapter = DecorationAdapter::new();
        let mut store = HighlightStore::new();
        let a = doc("a.rs");
        store.add(&a, range(0, 0, 0, 4), YELLOW, "Yellow", "").unwrap();
        store.add(&a, range(3, 0, 4, 0), YELLOW, "Yellow", "").unwrap();
        store.add(&a, range(1, 0, 1, 2), BLUE, "Blue", "").unwrap();

        adapter.render(&a, store.document(&a), true, &mut host);

        let visible = host.visible_ranges(&a);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[YELLOW], vec![range(0, 0, 0, 4), range(3, 0, 4, 0)]);
        assert_eq!(visible[BLUE], vec![range(1, 0, 1, 2)]);
    }

    #[test]
    fn render_clears_stale_ranges_before_redrawing() {
        let mut host = RecordingHost::default();
        let mut adapter = DecorationAdapter::new();
        let mut store = HighlightStore::new();
        let a = doc("a.rs");
        store.add(&a, range(0, 0, 0, 4), YELLOW, "Yellow", "").unwrap();
        store.add(&a, range(1, 0, 1, 2), BLUE, "Blue", "").unwrap();
        adapter.render(&a, store.document(&a), true, &mut host);

        store.remove_matching(&a, &range(1, 0, 1, 1));
        adapter.render(&a, store.document(&a), true, &mut host);

        let visible = host.visible_ranges(&a);
        assert_eq!(visible.len(), 1);
        assert!(visible.contains_key(YELLOW));
        assert_eq!(host.created_count(), 2);
    }

    #[test]
    fn invisible_render_only_clears_that_document() {
        let mut host = RecordingHost::default();
        let mut adapter = DecorationAdapter::new();
        let mut store = HighlightStore::new();
        let a = doc("a.rs");
        let b = doc("b.rs");
        store.add(&a, range(0, 0, 0, 4), YELLOW, "Yellow", "").unwrap();
        store.add(&b, range(0, 0, 0, 4), YELLOW, "Yellow", "").unwrap();
        adapter.render(&a, store.document(&a), true, &mut host);
        adapter.render(&b, store.document(&b), true, &mut host);

        adapter.render(&a, store.document(&a), false, &mut host);

        assert!(host.visible_ranges(&a).is_empty());
        assert_eq!(host.visible_ranges(&b).len(), 1);

        adapter.hide_all([&a, &b], &mut host);
        assert_eq!(host.total_visible(), 0);
        assert_eq!(adapter.token_count(), 1);
    }

    #[test]
    fn dispose_all_releases_every_token() {
        let mut host = RecordingHost::default();
        let mut adapter = DecorationAdapter::new();
        adapter.style_for(&HexColor::new(YELLOW).unwrap(), &mut host);
        adapter.style_for(&HexColor::new(BLUE).unwrap(), &mut host);

        adapter.dispose_all(&mut host);

        assert_eq!(adapter.token_count(), 0);
        assert_eq!(host.disposed_count(), 2);
        assert_eq!(host.live_style_count(), 0);
    }
}
