// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory highlight index.
//!
//! Highlights are grouped per document and, inside a document, per color value ("buckets").
//! Buckets keep insertion order so iteration and serialization are deterministic.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::model::{DocumentId, HexColor, HexColorError, Highlight, TextRange};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddHighlightError {
    #[error(transparent)]
    InvalidColor(#[from] HexColorError),
    #[error("cannot highlight an empty range at {0}")]
    EmptyRange(TextRange),
}

/// Color-value buckets of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentIndex {
    buckets: BTreeMap<HexColor, Vec<Highlight>>,
}

impl DocumentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buckets(&self) -> &BTreeMap<HexColor, Vec<Highlight>> {
        &self.buckets
    }

    pub fn bucket(&self, color: &str) -> Option<&[Highlight]> {
        self.buckets.get(color).map(Vec::as_slice)
    }

    pub fn push(&mut self, color: HexColor, highlight: Highlight) {
        self.buckets.entry(color).or_default().push(highlight);
    }

    /// Number of highlights across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HexColor, &Highlight)> {
        self.buckets
            .iter()
            .flat_map(|(color, bucket)| bucket.iter().map(move |highlight| (color, highlight)))
    }

    pub fn intersects(&self, range: &TextRange) -> bool {
        self.iter()
            .any(|(_, highlight)| highlight.range().intersects(range))
    }

    /// Like [`Self::intersects`], but an empty `range` is a point test: it is near any highlight
    /// containing it, boundaries included.
    pub fn is_near(&self, range: &TextRange) -> bool {
        if !range.is_empty() {
            return self.intersects(range);
        }
        self.iter()
            .any(|(_, highlight)| highlight.range().contains(range))
    }

    /// Highlights that a proximity removal of `range` would take.
    pub fn matching(&self, range: &TextRange) -> Vec<(&HexColor, &Highlight)> {
        self.iter()
            .filter(|(_, highlight)| matches_for_removal(highlight, range))
            .collect()
    }

    fn remove_matching(&mut self, range: &TextRange) -> usize {
        let mut removed = 0;
        for bucket in self.buckets.values_mut() {
            let before = bucket.len();
            bucket.retain(|highlight| !matches_for_removal(highlight, range));
            removed += before - bucket.len();
        }
        removed
    }

    /// Drops buckets that no longer hold any highlight.
    pub fn prune_empty(&mut self) {
        self.buckets.retain(|_, bucket| !bucket.is_empty());
    }
}

fn matches_for_removal(highlight: &Highlight, range: &TextRange) -> bool {
    let candidate = highlight.range();
    candidate == *range || candidate.contains(range)
}

/// A full set of document indexes, as decoded from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSnapshot {
    documents: BTreeMap<DocumentId, DocumentIndex>,
}

impl HighlightSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &BTreeMap<DocumentId, DocumentIndex> {
        &self.documents
    }

    pub fn document(&self, document: &DocumentId) -> Option<&DocumentIndex> {
        self.documents.get(document)
    }

    pub fn insert_document(&mut self, document: DocumentId, index: DocumentIndex) {
        self.documents.insert(document, index);
    }

    pub fn is_empty(&self) -> bool {
        self.documents.values().all(DocumentIndex::is_empty)
    }

    /// Same snapshot without empty buckets or empty documents.
    pub fn pruned(mut self) -> Self {
        for index in self.documents.values_mut() {
            index.prune_empty();
        }
        self.documents.retain(|_, index| !index.buckets.is_empty());
        self
    }
}

impl FromIterator<(DocumentId, DocumentIndex)> for HighlightSnapshot {
    fn from_iter<I: IntoIterator<Item = (DocumentId, DocumentIndex)>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

/// The process-side index of every highlight known to a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightStore {
    documents: BTreeMap<DocumentId, DocumentIndex>,
}

impl HighlightStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a highlight. Overlapping and duplicate highlights are allowed.
    pub fn add(
        &mut self,
        document: &DocumentId,
        range: TextRange,
        color_value: &str,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), AddHighlightError> {
        let color = HexColor::new(color_value)?;
        if range.is_empty() {
            return Err(AddHighlightError::EmptyRange(range));
        }

        self.documents
            .entry(document.clone())
            .or_default()
            .push(color, Highlight::new(range, name, description));
        Ok(())
    }

    pub fn highlights_intersecting(&self, document: &DocumentId, range: &TextRange) -> bool {
        self.documents
            .get(document)
            .is_some_and(|index| index.intersects(range))
    }

    /// Highlights that [`Self::remove_matching`] would remove for `range`.
    pub fn highlights_at(
        &self,
        document: &DocumentId,
        range: &TextRange,
    ) -> Vec<(&HexColor, &Highlight)> {
        self.documents
            .get(document)
            .map(|index| index.matching(range))
            .unwrap_or_default()
    }

    /// Removes every highlight whose range equals or contains `range`, in every bucket.
    ///
    /// Emptied buckets stay in place as empty sequences.
    pub fn remove_matching(&mut self, document: &DocumentId, range: &TextRange) -> usize {
        self.documents
            .get_mut(document)
            .map_or(0, |index| index.remove_matching(range))
    }

    pub fn clear_document(&mut self, document: &DocumentId) -> bool {
        self.documents.remove(document).is_some()
    }

    pub fn clear_all(&mut self) {
        self.documents.clear();
    }

    /// Replaces everything with `snapshot`. Nothing from the previous content survives.
    pub fn rebuild_from(&mut self, snapshot: HighlightSnapshot) {
        self.documents = snapshot.documents;
    }

    pub fn document(&self, document: &DocumentId) -> Option<&DocumentIndex> {
        self.documents.get(document)
    }

    pub fn documents(&self) -> btree_map::Iter<'_, DocumentId, DocumentIndex> {
        self.documents.iter()
    }

    pub fn take_document(&mut self, document: &DocumentId) -> Option<DocumentIndex> {
        self.documents.remove(document)
    }

    pub fn insert_document(&mut self, document: DocumentId, index: DocumentIndex) {
        self.documents.insert(document, index);
    }

    pub fn highlight_count(&self) -> usize {
        self.documents.values().map(DocumentIndex::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.values().all(DocumentIndex::is_empty)
    }

    pub fn snapshot(&self) -> HighlightSnapshot {
        HighlightSnapshot {
            documents: self.documents.clone(),
        }
    }
}

#[cfg(test)]
mod tests;
