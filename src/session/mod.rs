// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Session controller.
//!
//! A [`HighlightSession`] is the engine instance for one workspace root. It owns the index, the
//! highlights file, the style cache and the host, and sequences them for every command and
//! document lifecycle event. All calls are expected from a single task; every mutation is
//! followed by a full save in the same call.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::config::{ConfigError, HighlightConfig};
use crate::index::{AddHighlightError, DocumentIndex, HighlightStore};
use crate::model::{ColorDefinition, DocumentId, HexColor, Highlight, TextRange};
use crate::palette::{lookup_metadata, resolve_palette};
use crate::render::{DecorationAdapter, EditorHost, Notice};
use crate::store::{HighlightsFile, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Enabled,
    Disabled,
}

impl Visibility {
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

pub struct HighlightSession<H: EditorHost> {
    file: HighlightsFile,
    config: HighlightConfig,
    palette: Vec<ColorDefinition>,
    default_color: HexColor,
    store: HighlightStore,
    // Indexes of closed documents. They are still saved, and move back into `store` when the
    // document reopens or is mutated.
    parked: BTreeMap<DocumentId, DocumentIndex>,
    adapter: DecorationAdapter,
    host: H,
    visibility: Visibility,
    open_documents: BTreeSet<DocumentId>,
    focused: Option<DocumentId>,
}

impl<H: EditorHost> HighlightSession<H> {
    /// Builds a session with an empty index. Use [`Self::open`] to start from disk.
    pub fn new(file: HighlightsFile, config: HighlightConfig, mut host: H) -> Self {
        let resolution = resolve_palette(config.colors.as_ref());
        if let Some(warning) = resolution.warning {
            report_config_warning(&mut host, config.colors.is_some(), warning);
        }

        let (default_color, warning) = config.resolve_default_color(&resolution.colors);
        if let Some(warning) = warning {
            report_config_warning(&mut host, true, warning);
        }

        Self {
            file,
            config,
            palette: resolution.colors,
            default_color,
            store: HighlightStore::new(),
            parked: BTreeMap::new(),
            adapter: DecorationAdapter::new(),
            host,
            visibility: Visibility::Enabled,
            open_documents: BTreeSet::new(),
            focused: None,
        }
    }

    /// Starts a session for `workspace_root` and loads the highlights file.
    ///
    /// Fails only when `workspace_root` is not absolute; a missing or unreadable file is
    /// reported to the host instead.
    pub async fn open(
        workspace_root: impl AsRef<Path>,
        config: HighlightConfig,
        host: H,
    ) -> Result<Self, StoreError> {
        let file = HighlightsFile::new(workspace_root)?;
        let mut session = Self::new(file, config, host);
        session.reload_from_disk().await;
        Ok(session)
    }

    /// Ends the session, releasing every style the host created for it.
    pub fn close(mut self) {
        self.adapter.dispose_all(&mut self.host);
        tracing::debug!(root = %self.file.root().display(), "highlight session closed");
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    pub fn palette(&self) -> &[ColorDefinition] {
        &self.palette
    }

    pub fn default_color(&self) -> &HexColor {
        &self.default_color
    }

    pub fn file(&self) -> &HighlightsFile {
        &self.file
    }

    pub fn store(&self) -> &HighlightStore {
        &self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn current_visibility(&self) -> bool {
        self.visibility.is_enabled()
    }

    pub fn is_open(&self, document: &DocumentId) -> bool {
        self.open_documents.contains(document)
    }

    pub fn focused(&self) -> Option<&DocumentId> {
        self.focused.as_ref()
    }

    /// The index of `document`, whether it is open or parked.
    pub fn document(&self, document: &DocumentId) -> Option<&DocumentIndex> {
        self.store
            .document(document)
            .or_else(|| self.parked.get(document))
    }

    /// Every document with highlights, open or parked, in path order.
    pub fn documents(&self) -> Vec<(&DocumentId, &DocumentIndex)> {
        let mut documents: Vec<_> = self.store.documents().chain(self.parked.iter()).collect();
        documents.sort_by(|(a, _), (b, _)| a.cmp(b));
        documents
    }

    pub fn add_highlight(
        &mut self,
        document: &DocumentId,
        range: TextRange,
        color_value: &str,
        color_name: &str,
        color_description: &str,
    ) -> Result<(), AddHighlightError> {
        self.unpark(document);
        self.store
            .add(document, range, color_value, color_name, color_description)?;
        tracing::debug!(document = %document, range = %range, color = color_value, "highlight added");

        self.redraw(document);
        self.persist();
        Ok(())
    }

    /// Adds a highlight named after the palette entry for `color_value`, or after the value
    /// itself when the palette has no such color.
    pub fn add_highlight_in_color(
        &mut self,
        document: &DocumentId,
        range: TextRange,
        color_value: &str,
    ) -> Result<(), AddHighlightError> {
        let (name, description) = lookup_metadata(color_value, &self.palette)
            .map(|(name, description)| (name.to_owned(), description.to_owned()))
            .unwrap_or_else(|| (color_value.to_owned(), String::new()));
        self.add_highlight(document, range, color_value, &name, &description)
    }

    pub fn add_default_highlight(
        &mut self,
        document: &DocumentId,
        range: TextRange,
    ) -> Result<(), AddHighlightError> {
        let color = self.default_color.clone();
        self.add_highlight_in_color(document, range, color.as_str())
    }

    /// Whether a highlight overlaps `range`. An empty range (a bare cursor) counts when a
    /// highlight contains it, matching what [`Self::remove_near`] would remove.
    pub fn has_highlight_near(&self, document: &DocumentId, range: &TextRange) -> bool {
        self.document(document)
            .is_some_and(|index| index.is_near(range))
    }

    /// Highlights a [`Self::remove_near`] call with the same range would remove.
    pub fn highlights_near(
        &self,
        document: &DocumentId,
        range: &TextRange,
    ) -> Vec<(&HexColor, &Highlight)> {
        self.document(document)
            .map(|index| index.matching(range))
            .unwrap_or_default()
    }

    /// Removes every highlight equal to or containing `range`. Saves only when something was
    /// removed.
    pub fn remove_near(&mut self, document: &DocumentId, range: &TextRange) -> usize {
        self.unpark(document);
        let removed = self.store.remove_matching(document, range);
        if removed > 0 {
            tracing::debug!(document = %document, range = %range, removed, "highlights removed");
            self.redraw(document);
            self.persist();
        }
        removed
    }

    pub fn clear_document(&mut self, document: &DocumentId) {
        let had_live = self.store.clear_document(document);
        let had_parked = self.parked.remove(document).is_some();
        if self.is_open(document) {
            self.adapter.hide(document, &mut self.host);
        }
        if had_live || had_parked {
            self.persist();
        }
    }

    /// Hides everything, empties the index and deletes the highlights file.
    pub fn clear_workspace(&mut self) -> Result<(), StoreError> {
        self.adapter.hide_all(&self.open_documents, &mut self.host);
        self.store.clear_all();
        self.parked.clear();

        let removed = self.file.delete()?;
        tracing::info!(path = %self.file.path().display(), removed, "workspace highlights cleared");
        Ok(())
    }

    pub async fn set_visibility(&mut self, enabled: bool) {
        match (self.visibility, enabled) {
            (Visibility::Enabled, false) => {
                self.visibility = Visibility::Disabled;
                self.adapter.hide_all(&self.open_documents, &mut self.host);
            }
            (Visibility::Disabled, true) => {
                self.visibility = Visibility::Enabled;
                // The file may have been edited by hand while highlights were hidden.
                self.reload_from_disk().await;
            }
            _ => {}
        }
    }

    /// Flips visibility and returns the new state.
    pub async fn toggle_visibility(&mut self) -> bool {
        let enabled = !self.current_visibility();
        self.set_visibility(enabled).await;
        enabled
    }

    /// Writes the full index (open and parked documents) to disk.
    pub fn save(&self) -> Result<(), StoreError> {
        let documents = self.store.documents().chain(self.parked.iter());
        self.file.save(documents, self.config.persist_metadata)
    }

    /// Replaces the in-memory index with the file contents and redraws open documents.
    ///
    /// A missing file means no highlights; an unreadable one is reported to the host and also
    /// treated as empty.
    pub async fn reload_from_disk(&mut self) {
        let (snapshot, err) = self.file.load_or_empty_async().await;
        if let Some(err) = err {
            self.host
                .notify(Notice::Error(format!("cannot read highlights: {err}")));
        }

        self.store.rebuild_from(snapshot);
        self.parked.clear();
        tracing::debug!(highlights = self.store.highlight_count(), "highlights reloaded");
        self.render_open_documents();
    }

    /// Waits for the host to settle, then draws the document's highlights.
    pub async fn on_document_opened(&mut self, document: DocumentId) {
        self.open_documents.insert(document.clone());
        self.unpark(&document);

        tokio::time::sleep(self.config.settle_delay()).await;

        if self.visibility.is_enabled() && self.is_open(&document) {
            self.render(&document);
        }
    }

    /// Highlights keep their coordinates across edits; the edit only triggers a redraw and a
    /// save. An edited document is open even if its open event was never seen.
    pub fn on_document_edited<C: ?Sized>(&mut self, document: &DocumentId, _change: &C) {
        self.open_documents.insert(document.clone());
        self.unpark(document);
        if !self.visibility.is_enabled() {
            return;
        }
        self.render(document);
        self.persist();
    }

    pub fn on_document_closed(&mut self, document: &DocumentId) {
        self.open_documents.remove(document);
        if self.focused.as_ref() == Some(document) {
            self.focused = None;
        }
        if let Some(index) = self.store.take_document(document) {
            self.parked.insert(document.clone(), index);
        }
    }

    pub fn on_focus_changed(&mut self, document: &DocumentId) {
        self.focused = Some(document.clone());
        self.open_documents.insert(document.clone());
        self.unpark(document);
        if self.visibility.is_enabled() {
            self.render(document);
        }
    }

    fn unpark(&mut self, document: &DocumentId) {
        if let Some(index) = self.parked.remove(document) {
            self.store.insert_document(document.clone(), index);
        }
    }

    fn render(&mut self, document: &DocumentId) {
        self.adapter.render(
            document,
            self.store.document(document),
            self.visibility.is_enabled(),
            &mut self.host,
        );
    }

    fn redraw(&mut self, document: &DocumentId) {
        if self.is_open(document) {
            self.render(document);
        }
    }

    fn render_open_documents(&mut self) {
        let visible = self.visibility.is_enabled();
        for document in &self.open_documents {
            self.adapter.render(
                document,
                self.store.document(document),
                visible,
                &mut self.host,
            );
        }
    }

    fn persist(&mut self) {
        if let Err(err) = self.save() {
            tracing::warn!(error = %err, "cannot save highlights, keeping them in memory");
            self.host
                .notify(Notice::Error(format!("cannot save highlights: {err}")));
        }
    }
}

impl<H: EditorHost> Drop for HighlightSession<H> {
    fn drop(&mut self) {
        self.adapter.dispose_all(&mut self.host);
    }
}

fn report_config_warning<H: EditorHost>(host: &mut H, user_configured: bool, warning: ConfigError) {
    if !user_configured {
        tracing::debug!(%warning, "using built-in palette");
        return;
    }
    tracing::warn!(%warning, "highlight configuration");
    host.notify(Notice::Warning(warning.to_string()));
}
