// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{EditorHost, Notice, StyleHandle, StyleSpec};
use crate::model::{DocumentId, TextRange};

#[derive(Debug, Default)]
struct Recording {
    next_handle: u64,
    live: BTreeMap<StyleHandle, StyleSpec>,
    created: usize,
    disposed: usize,
    ranges: BTreeMap<(DocumentId, StyleHandle), Vec<TextRange>>,
    notices: Vec<Notice>,
}

/// An [`EditorHost`] that remembers what it was asked to show.
///
/// Clones share state, so a test can keep a handle after moving the host into a session.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingHost {
    state: Rc<RefCell<Recording>>,
}

impl RecordingHost {
    pub(crate) fn created_count(&self) -> usize {
        self.state.borrow().created
    }

    pub(crate) fn disposed_count(&self) -> usize {
        self.state.borrow().disposed
    }

    pub(crate) fn live_style_count(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub(crate) fn notices(&self) -> Vec<Notice> {
        self.state.borrow().notices.clone()
    }

    /// Currently shown ranges in `document`, keyed by the style's background color.
    pub(crate) fn visible_ranges(&self, document: &DocumentId) -> BTreeMap<String, Vec<TextRange>> {
        let state = self.state.borrow();
        state
            .ranges
            .iter()
            .filter(|((doc, _), ranges)| doc == document && !ranges.is_empty())
            .filter_map(|((_, handle), ranges)| {
                let spec = state.live.get(handle)?;
                Some((spec.background.to_string(), ranges.clone()))
            })
            .collect()
    }

    pub(crate) fn total_visible(&self) -> usize {
        self.state.borrow().ranges.values().map(Vec::len).sum()
    }
}

impl EditorHost for RecordingHost {
    fn create_style(&mut self, spec: &StyleSpec) -> StyleHandle {
        let mut state = self.state.borrow_mut();
        state.next_handle += 1;
        let handle = StyleHandle(state.next_handle);
        state.live.insert(handle, spec.clone());
        state.created += 1;
        handle
    }

    fn dispose_style(&mut self, handle: StyleHandle) {
        let mut state = self.state.borrow_mut();
        if state.live.remove(&handle).is_some() {
            state.disposed += 1;
        }
        state.ranges.retain(|(_, h), _| *h != handle);
    }

    fn set_ranges(&mut self, document: &DocumentId, handle: StyleHandle, ranges: &[TextRange]) {
        let mut state = self.state.borrow_mut();
        let key = (document.clone(), handle);
        if ranges.is_empty() {
            state.ranges.remove(&key);
        } else {
            state.ranges.insert(key, ranges.to_vec());
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.state.borrow_mut().notices.push(notice);
    }
}
