// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Canonical identity of a document: an absolute, lexically normalized path.
///
/// Normalization is purely lexical (`.` segments dropped, `..` pops the previous segment) so a
/// document can be identified before it exists on disk. Symlinks are not resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId {
    path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentIdError {
    #[error("document path must be absolute: {0:?}")]
    NotAbsolute(PathBuf),
}

impl DocumentId {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DocumentIdError> {
        let path = path.as_ref();
        if !path.is_absolute() {
            return Err(DocumentIdError::NotAbsolute(path.to_path_buf()));
        }
        Ok(Self {
            path: normalize_lexically(path),
        })
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl AsRef<Path> for DocumentId {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl TryFrom<PathBuf> for DocumentId {
    type Error = DocumentIdError;

    fn try_from(value: PathBuf) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root is a no-op, matching how the OS resolves `/..`.
                out.pop();
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{DocumentId, DocumentIdError};

    #[test]
    fn rejects_relative_paths() {
        let err = DocumentId::new("src/a.rs").unwrap_err();
        assert_eq!(err, DocumentIdError::NotAbsolute(PathBuf::from("src/a.rs")));
    }

    #[cfg(unix)]
    #[test]
    fn normalizes_dot_segments() {
        let id = DocumentId::new("/work/./src/../src/a.rs").unwrap();
        assert_eq!(id.as_path(), PathBuf::from("/work/src/a.rs"));
        assert_eq!(id, DocumentId::new("/work/src/a.rs").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn parent_of_root_stays_at_root() {
        let id = DocumentId::new("/../a.rs").unwrap();
        assert_eq!(id.as_path(), PathBuf::from("/a.rs"));
    }
}
