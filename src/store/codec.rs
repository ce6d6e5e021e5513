// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mapping between the in-memory index and the persisted JSON document.
//!
//! Paths are workspace relative with `/` separators on disk and absolute [`DocumentId`]s in
//! memory; the conversion only happens here. Empty buckets never cross the disk boundary in
//! either direction.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::index::{DocumentIndex, HighlightSnapshot};
use crate::model::{DocumentId, HexColor, Highlight, TextRange, DEFAULT_HIGHLIGHT_NAME};

/// Top-level shape of the persisted file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightsJson {
    #[serde(default)]
    pub files: BTreeMap<String, BTreeMap<String, Vec<HighlightJson>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightJson {
    pub start_line: u32,
    pub start_character: u32,
    pub end_line: u32,
    pub end_character: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl HighlightJson {
    fn from_highlight(highlight: &Highlight, include_metadata: bool) -> Self {
        let range = highlight.range();
        let (name, description) = if include_metadata {
            (
                Some(highlight.name().to_owned()),
                Some(highlight.description())
                    .filter(|description| !description.is_empty())
                    .map(ToOwned::to_owned),
            )
        } else {
            (None, None)
        };

        Self {
            start_line: range.start().line(),
            start_character: range.start().character(),
            end_line: range.end().line(),
            end_character: range.end().character(),
            name,
            description,
        }
    }
}

/// Serializes every non-empty document index under its workspace-relative path.
///
/// Documents outside `workspace_root` cannot be represented and are skipped with a warning.
pub fn encode_highlights<'a>(
    documents: impl IntoIterator<Item = (&'a DocumentId, &'a DocumentIndex)>,
    workspace_root: &Path,
    include_metadata: bool,
) -> HighlightsJson {
    encode_reporting_skips(documents, workspace_root, include_metadata).0
}

/// Like [`encode_highlights`], also returning the error of the first skipped document.
pub(crate) fn encode_reporting_skips<'a>(
    documents: impl IntoIterator<Item = (&'a DocumentId, &'a DocumentIndex)>,
    workspace_root: &Path,
    include_metadata: bool,
) -> (HighlightsJson, Option<StoreError>) {
    let mut files = BTreeMap::new();
    let mut first_skip = None;

    for (document, index) in documents {
        let buckets: BTreeMap<String, Vec<HighlightJson>> = index
            .buckets()
            .iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(color, bucket)| {
                let highlights = bucket
                    .iter()
                    .map(|highlight| HighlightJson::from_highlight(highlight, include_metadata))
                    .collect();
                (color.to_string(), highlights)
            })
            .collect();

        if buckets.is_empty() {
            continue;
        }

        match relative_key(workspace_root, document.as_path()) {
            Ok(key) => {
                files.insert(key, buckets);
            }
            Err(err) => {
                tracing::warn!(document = %document, error = %err, "skipping highlights outside workspace");
                first_skip.get_or_insert(err);
            }
        }
    }

    (HighlightsJson { files }, first_skip)
}

/// Rebuilds a snapshot from the persisted shape.
///
/// Bad entries (unsafe paths, invalid color keys, inverted ranges) are skipped with a warning so
/// one corrupt record cannot hide the rest of the file.
pub fn decode_highlights(json: HighlightsJson, workspace_root: &Path) -> HighlightSnapshot {
    let mut snapshot = HighlightSnapshot::new();

    for (key, buckets) in json.files {
        let document = match document_for_key(workspace_root, &key) {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(path = %key, error = %err, "skipping persisted document");
                continue;
            }
        };

        let mut index = DocumentIndex::new();
        for (color_key, entries) in buckets {
            let color = match HexColor::new(&color_key) {
                Ok(color) => color,
                Err(err) => {
                    tracing::warn!(path = %key, error = %err, "skipping persisted color bucket");
                    continue;
                }
            };

            for entry in entries {
                let range = match TextRange::from_coords(
                    entry.start_line,
                    entry.start_character,
                    entry.end_line,
                    entry.end_character,
                ) {
                    Ok(range) => range,
                    Err(err) => {
                        tracing::warn!(path = %key, color = %color, error = %err, "skipping persisted highlight");
                        continue;
                    }
                };
                let name = entry
                    .name
                    .unwrap_or_else(|| DEFAULT_HIGHLIGHT_NAME.to_owned());
                let description = entry.description.unwrap_or_default();
                index.push(color.clone(), Highlight::new(range, name, description));
            }
        }

        if !index.is_empty() {
            snapshot.insert_document(document, index);
        }
    }

    snapshot.pruned()
}

/// `<root>/src/a.rs` → `"src/a.rs"`.
pub fn relative_key(workspace_root: &Path, path: &Path) -> Result<String, StoreError> {
    let relative = path
        .strip_prefix(workspace_root)
        .map_err(|_| StoreError::PathOutsideWorkspace {
            workspace_root: workspace_root.to_path_buf(),
            path: path.to_path_buf(),
        })?;
    validate_relative_path("files", relative)?;

    let segments: Vec<_> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    Ok(segments.join("/"))
}

/// `"src/a.rs"` → `<root>/src/a.rs`.
pub fn document_for_key(workspace_root: &Path, key: &str) -> Result<DocumentId, StoreError> {
    let relative: PathBuf = key.split('/').filter(|segment| !segment.is_empty()).collect();
    if key.starts_with('/') {
        return Err(StoreError::InvalidRelativePath {
            field: "files",
            value: PathBuf::from(key),
        });
    }
    validate_relative_path("files", &relative)?;

    DocumentId::new(workspace_root.join(relative)).map_err(|_| StoreError::InvalidRelativePath {
        field: "files",
        value: PathBuf::from(key),
    })
}

fn validate_relative_path(field: &'static str, path: &Path) -> Result<(), StoreError> {
    if path.as_os_str().is_empty() || path.is_absolute() {
        return Err(StoreError::InvalidRelativePath {
            field,
            value: path.to_path_buf(),
        });
    }

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::ParentDir => {
                return Err(StoreError::InvalidRelativePath {
                    field,
                    value: path.to_path_buf(),
                });
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    Ok(())
}
