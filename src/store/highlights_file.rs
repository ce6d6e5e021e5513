// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::codec::{decode_highlights, encode_reporting_skips, HighlightsJson};
use crate::index::{DocumentIndex, HighlightSnapshot, HighlightStore};
use crate::model::DocumentId;

/// Directory under the workspace root holding rangemark's files.
pub const WORKSPACE_DIRNAME: &str = ".rangemark";
const HIGHLIGHTS_FILENAME: &str = "highlights.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid relative path for {field}: {value:?}")]
    InvalidRelativePath { field: &'static str, value: PathBuf },
    #[error("path is outside workspace: workspace_root={workspace_root:?} path={path:?}")]
    PathOutsideWorkspace {
        workspace_root: PathBuf,
        path: PathBuf,
    },
    #[error("refusing to write through symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },
    #[error("workspace root must be an absolute path: {path:?}")]
    WorkspaceRootNotAbsolute { path: PathBuf },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

/// The single highlights file of one workspace.
///
/// Every save rewrites the whole file; there is no append or diff mode.
#[derive(Debug, Clone)]
pub struct HighlightsFile {
    root: PathBuf,
    durability: WriteDurability,
}

impl HighlightsFile {
    /// The highlights file of the workspace at `root`.
    ///
    /// `root` is normalized the same way document paths are, so `.` and `..` segments cannot make
    /// documents look like they live outside it. Relative roots are rejected.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref();
        let root = DocumentId::new(root)
            .map_err(|_| StoreError::WorkspaceRootNotAbsolute {
                path: root.to_path_buf(),
            })?
            .into_path_buf();
        Ok(Self {
            root,
            durability: WriteDurability::default(),
        })
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIRNAME).join(HIGHLIGHTS_FILENAME)
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    pub fn load(&self) -> Result<HighlightSnapshot, StoreError> {
        let path = self.path();
        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        self.decode(&path, &raw)
    }

    pub async fn load_async(&self) -> Result<HighlightSnapshot, StoreError> {
        let path = self.path();
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        self.decode(&path, &raw)
    }

    /// Loads the file, treating a missing file as empty and any other failure as empty plus a
    /// returned error for the caller to report.
    pub fn load_or_empty(&self) -> (HighlightSnapshot, Option<StoreError>) {
        recover_load(self.load())
    }

    pub async fn load_or_empty_async(&self) -> (HighlightSnapshot, Option<StoreError>) {
        recover_load(self.load_async().await)
    }

    fn decode(&self, path: &Path, raw: &str) -> Result<HighlightSnapshot, StoreError> {
        let json: HighlightsJson =
            serde_json::from_str(raw).map_err(|source| StoreError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(decode_highlights(json, self.root()))
    }

    /// Rewrites the file with `documents`.
    ///
    /// Documents outside the workspace are skipped. When that leaves nothing to write although
    /// there were highlights, the file is left as it is and the first skip error is returned.
    pub fn save<'a>(
        &self,
        documents: impl IntoIterator<Item = (&'a DocumentId, &'a DocumentIndex)>,
        include_metadata: bool,
    ) -> Result<(), StoreError> {
        let path = self.path();
        let (json, skipped) = encode_reporting_skips(documents, self.root(), include_metadata);
        if let Some(err) = skipped {
            if json.files.is_empty() {
                return Err(err);
            }
        }
        let raw = serde_json::to_string_pretty(&json).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;

        replace_highlights_file(
            &self.root.join(WORKSPACE_DIRNAME),
            format!("{raw}\n").as_bytes(),
            self.durability,
        )?;

        tracing::debug!(path = %path.display(), documents = json.files.len(), "saved highlights");
        Ok(())
    }

    pub fn save_store(
        &self,
        store: &HighlightStore,
        include_metadata: bool,
    ) -> Result<(), StoreError> {
        self.save(store.documents(), include_metadata)
    }

    /// Removes the file. Returns whether there was a file to remove.
    pub fn delete(&self) -> Result<bool, StoreError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

fn recover_load(
    result: Result<HighlightSnapshot, StoreError>,
) -> (HighlightSnapshot, Option<StoreError>) {
    match result {
        Ok(snapshot) => (snapshot, None),
        Err(err) if err.is_not_found() => {
            tracing::debug!("no highlights file yet, starting empty");
            (HighlightSnapshot::new(), None)
        }
        Err(err) => {
            tracing::warn!(error = %err, "cannot load highlights, starting empty");
            (HighlightSnapshot::new(), Some(err))
        }
    }
}

include!("highlights_file/helpers.rs");
