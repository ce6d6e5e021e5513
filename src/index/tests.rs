// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{AddHighlightError, HighlightStore};
use crate::model::{DocumentId, TextRange};

const YELLOW: &str = "#FFEB3B66";
const GREEN: &str = "#4CAF5066";

fn range(sl: u32, sc: u32, el: u32, ec: u32) -> TextRange {
    TextRange::from_coords(sl, sc, el, ec).expect("valid range")
}

fn doc(name: &str) -> DocumentId {
    let root = std::env::temp_dir().join("rangemark-index");
    DocumentId::new(root.join(name)).expect("absolute path")
}

#[fixture]
fn store() -> HighlightStore {
    let mut store = HighlightStore::new();
    store
        .add(&doc("a.rs"), range(2, 0, 5, 10), YELLOW, "Yellow", "notes")
        .unwrap();
    store
}

#[rstest]
fn add_creates_document_and_bucket_lazily(store: HighlightStore) {
    let index = store.document(&doc("a.rs")).expect("document index");
    let bucket = index.bucket(YELLOW).expect("bucket");
    assert_eq!(bucket.len(), 1);
    assert_eq!(bucket[0].range(), range(2, 0, 5, 10));
    assert_eq!(bucket[0].name(), "Yellow");
    assert_eq!(bucket[0].description(), "notes");
    assert!(store.document(&doc("b.rs")).is_none());
}

#[rstest]
fn add_rejects_invalid_color_without_mutation(mut store: HighlightStore) {
    let before = store.clone();
    let err = store
        .add(&doc("b.rs"), range(0, 0, 0, 3), "not-a-color", "x", "")
        .unwrap_err();
    assert!(matches!(err, AddHighlightError::InvalidColor(_)));
    assert_eq!(store, before);
}

#[rstest]
fn add_rejects_empty_range_without_mutation(mut store: HighlightStore) {
    let before = store.clone();
    let err = store
        .add(&doc("a.rs"), range(1, 4, 1, 4), GREEN, "Green", "")
        .unwrap_err();
    assert_eq!(err, AddHighlightError::EmptyRange(range(1, 4, 1, 4)));
    assert_eq!(store, before);
}

#[rstest]
fn duplicate_adds_coexist_and_are_removed_together(mut store: HighlightStore) {
    store
        .add(&doc("a.rs"), range(2, 0, 5, 10), YELLOW, "Yellow", "notes")
        .unwrap();
    assert_eq!(store.document(&doc("a.rs")).unwrap().bucket(YELLOW).unwrap().len(), 2);

    let removed = store.remove_matching(&doc("a.rs"), &range(3, 0, 3, 5));
    assert_eq!(removed, 2);
    assert_eq!(store.highlight_count(), 0);
}

#[rstest]
fn proximity_removal_takes_containing_highlights_only(mut store: HighlightStore) {
    assert_eq!(store.remove_matching(&doc("a.rs"), &range(6, 0, 6, 1)), 0);
    assert_eq!(store.highlight_count(), 1);

    assert_eq!(store.remove_matching(&doc("a.rs"), &range(3, 0, 3, 5)), 1);
    assert_eq!(store.highlight_count(), 0);
}

#[rstest]
fn partially_overlapping_selection_does_not_remove(mut store: HighlightStore) {
    let selection = range(4, 0, 7, 0);
    assert!(store.highlights_intersecting(&doc("a.rs"), &selection));
    assert_eq!(store.remove_matching(&doc("a.rs"), &selection), 0);
}

#[rstest]
fn removal_spans_all_color_buckets(mut store: HighlightStore) {
    store
        .add(&doc("a.rs"), range(1, 0, 9, 0), GREEN, "Green", "")
        .unwrap();
    store
        .add(&doc("a.rs"), range(3, 0, 3, 2), GREEN, "Green", "")
        .unwrap();

    let removed = store.remove_matching(&doc("a.rs"), &range(3, 0, 3, 5));
    assert_eq!(removed, 2);

    let index = store.document(&doc("a.rs")).unwrap();
    assert_eq!(index.bucket(YELLOW), Some(&[][..]));
    let green = index.bucket(GREEN).unwrap();
    assert_eq!(green.len(), 1);
    assert_eq!(green[0].range(), range(3, 0, 3, 2));
}

#[rstest]
fn highlights_at_lists_what_removal_would_take(mut store: HighlightStore) {
    store
        .add(&doc("a.rs"), range(0, 0, 0, 4), GREEN, "Green", "")
        .unwrap();

    let hits = store.highlights_at(&doc("a.rs"), &range(3, 0, 3, 5));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0.as_str(), YELLOW);
    assert!(store.highlights_at(&doc("missing.rs"), &range(3, 0, 3, 5)).is_empty());
}

#[rstest]
fn intersection_is_scoped_to_the_document(store: HighlightStore) {
    assert!(store.highlights_intersecting(&doc("a.rs"), &range(5, 0, 5, 1)));
    assert!(!store.highlights_intersecting(&doc("b.rs"), &range(5, 0, 5, 1)));
    assert!(!store.highlights_intersecting(&doc("a.rs"), &range(5, 10, 5, 12)));
}

#[rstest]
#[case::inside(range(3, 4, 3, 4), true)]
#[case::at_start(range(2, 0, 2, 0), true)]
#[case::at_end(range(5, 10, 5, 10), true)]
#[case::past_end(range(5, 11, 5, 11), false)]
#[case::overlapping(range(5, 0, 6, 0), true)]
#[case::touching(range(5, 10, 6, 0), false)]
fn cursor_counts_as_near_when_contained(
    store: HighlightStore,
    #[case] cursor: TextRange,
    #[case] near: bool,
) {
    let index = store.document(&doc("a.rs")).unwrap();
    assert_eq!(index.is_near(&cursor), near);
    if cursor.is_empty() {
        assert!(!index.intersects(&cursor));
        assert_eq!(index.matching(&cursor).is_empty(), !near);
    }
}

#[rstest]
fn clear_document_and_clear_all(mut store: HighlightStore) {
    store
        .add(&doc("b.rs"), range(0, 0, 0, 1), GREEN, "Green", "")
        .unwrap();

    assert!(store.clear_document(&doc("a.rs")));
    assert!(!store.clear_document(&doc("a.rs")));
    assert_eq!(store.highlight_count(), 1);

    store.clear_all();
    assert!(store.is_empty());
    assert_eq!(store.documents().count(), 0);
}

#[rstest]
fn rebuild_replaces_instead_of_merging(mut store: HighlightStore) {
    let mut other = HighlightStore::new();
    other
        .add(&doc("b.rs"), range(0, 0, 0, 1), GREEN, "Green", "")
        .unwrap();

    store.rebuild_from(other.snapshot());
    assert!(store.document(&doc("a.rs")).is_none());
    assert_eq!(store, other);
}

#[rstest]
fn pruned_snapshot_drops_empty_buckets_and_documents(mut store: HighlightStore) {
    store
        .add(&doc("b.rs"), range(0, 0, 0, 1), GREEN, "Green", "")
        .unwrap();
    store.remove_matching(&doc("a.rs"), &range(2, 0, 5, 10));

    let pruned = store.snapshot().pruned();
    assert!(pruned.document(&doc("a.rs")).is_none());
    assert_eq!(pruned.documents().len(), 1);
}
