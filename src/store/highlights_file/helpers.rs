// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rangemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rangemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Makes sure `<root>/.rangemark` is a real directory, creating it (and the root) when missing.
fn ensure_highlights_dir(dir: &Path) -> Result<(), StoreError> {
    match fs::symlink_metadata(dir) {
        Ok(md) if md.file_type().is_symlink() => Err(StoreError::SymlinkRefused {
            path: dir.to_path_buf(),
        }),
        Ok(md) if md.is_dir() => Ok(()),
        Ok(_) => Err(io_error(
            dir,
            io::Error::new(io::ErrorKind::AlreadyExists, "expected directory"),
        )),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|source| io_error(dir, source))
        }
        Err(source) => Err(io_error(dir, source)),
    }
}

fn refuse_symlinked_target(path: &Path) -> Result<(), StoreError> {
    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => Err(StoreError::SymlinkRefused {
            path: path.to_path_buf(),
        }),
        Ok(_) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(io_error(path, source)),
    }
}

fn write_temp(
    tmp_path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let _ = fs::remove_file(tmp_path);
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(tmp_path)
        .map_err(|source| io_error(tmp_path, source))?;
    file.write_all(contents)
        .map_err(|source| io_error(tmp_path, source))?;
    if durability == WriteDurability::Durable {
        file.sync_all()
            .map_err(|source| io_error(tmp_path, source))?;
    }
    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<(), StoreError> {
    fs::File::open(dir)
        .and_then(|handle| handle.sync_all())
        .map_err(|source| io_error(dir, source))
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<(), StoreError> {
    Ok(())
}

/// Replaces the highlights file in `dir` with `contents`: temp file in the same directory, then
/// rename. Readers see either the old or the new file, never a partial one.
fn replace_highlights_file(
    dir: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    ensure_highlights_dir(dir)?;
    let path = dir.join(HIGHLIGHTS_FILENAME);
    refuse_symlinked_target(&path)?;

    let tmp_path = dir.join(format!(".{HIGHLIGHTS_FILENAME}.{}.tmp", std::process::id()));
    let written = write_temp(&tmp_path, contents, durability)
        .and_then(|()| fs::rename(&tmp_path, &path).map_err(|source| io_error(&path, source)));
    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written?;

    if durability == WriteDurability::Durable {
        sync_dir(dir)?;
    }
    Ok(())
}
