use std::fs;
use std::io;
use std::path::Path;

use tempfile::Builder;
use zip::ZipArchive;

use crate::error::PrepError;

pub fn extract_zip(zip_path: &Path, target_dir: &Path) -> Result<usize, PrepError> {
    let file = fs::File::open(zip_path)
        .map_err(|err| PrepError::Filesystem(format!("open zip {}: {err}", zip_path.display())))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|err| PrepError::Archive(format!("{}: {err}", zip_path.display())))?;

    let mut written = 0usize;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|err| PrepError::Archive(err.to_string()))?;
        let entry_path = match entry.enclosed_name() {
            Some(path) => target_dir.join(path),
            None => {
                return Err(PrepError::Archive(format!(
                    "zip entry path traversal detected: {}",
                    entry.name()
                )));
            }
        };

        if entry.is_dir() {
            fs::create_dir_all(&entry_path)
                .map_err(|err| PrepError::Filesystem(err.to_string()))?;
            continue;
        }

        if let Some(parent) = entry_path.parent() {
            fs::create_dir_all(parent).map_err(|err| PrepError::Filesystem(err.to_string()))?;
        }
        let mut outfile =
            fs::File::create(&entry_path).map_err(|err| PrepError::Filesystem(err.to_string()))?;
        // A truncated member surfaces here as a read error from the decompressor.
        io::copy(&mut entry, &mut outfile)
            .map_err(|err| PrepError::Archive(format!("{}: {err}", entry_path.display())))?;
        written += 1;
    }
    Ok(written)
}

/// Extracts into a scratch directory next to `target_dir` and renames it into place once
/// every entry is written. An existing `target_dir` is replaced.
pub fn extract_zip_atomic(zip_path: &Path, target_dir: &Path) -> Result<usize, PrepError> {
    let parent = target_dir
        .parent()
        .ok_or_else(|| PrepError::Filesystem("invalid unpack directory".to_string()))?;
    fs::create_dir_all(parent).map_err(|err| PrepError::Filesystem(err.to_string()))?;
    let temp_dir = Builder::new()
        .prefix(".unpack")
        .tempdir_in(parent)
        .map_err(|err| PrepError::Filesystem(err.to_string()))?;
    let extract_dir = temp_dir.path().join("extract");
    fs::create_dir_all(&extract_dir).map_err(|err| PrepError::Filesystem(err.to_string()))?;

    let written = extract_zip(zip_path, &extract_dir)?;
    atomic_rename_dir(&extract_dir, target_dir)
        .map_err(|err| PrepError::Filesystem(format!("rename {}: {err}", target_dir.display())))?;
    Ok(written)
}

pub fn atomic_rename_dir(from: &Path, to: &Path) -> io::Result<()> {
    if to.exists() {
        fs::remove_dir_all(to)?;
    }
    fs::rename(from, to)
}

/// Moves a file, replacing whatever sits at `to`.
pub fn move_file(from: &Path, to: &Path) -> Result<(), PrepError> {
    if to.exists() {
        fs::remove_file(to).map_err(|err| PrepError::Filesystem(err.to_string()))?;
    }
    fs::rename(from, to).map_err(|err| {
        PrepError::Filesystem(format!(
            "move {} -> {}: {err}",
            from.display(),
            to.display()
        ))
    })
}
