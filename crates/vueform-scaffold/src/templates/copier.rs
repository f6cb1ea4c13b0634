//! Copying a template variant over a generated project
//!
//! Copy-over semantics: parent directories are created as needed and
//! name-colliding files are overwritten, so template files always win.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use include_dir::{Dir, DirEntry};
use walkdir::WalkDir;

/// Write an embedded directory tree under `target`. `prefix` is the embedded
/// path of the variant directory itself and is stripped from every entry.
pub fn copy_embedded(dir: &Dir<'_>, prefix: &str, target: &Path) -> Result<usize> {
    let mut written = 0;
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(subdir) => {
                written += copy_embedded(subdir, prefix, target)?;
            }
            DirEntry::File(file) => {
                let relative = file.path().strip_prefix(prefix).unwrap_or(file.path());
                let destination = target.join(relative);
                if let Some(parent) = destination.parent() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create directory {}", parent.display())
                    })?;
                }
                fs::write(&destination, file.contents())
                    .with_context(|| format!("failed to write {}", destination.display()))?;
                written += 1;
            }
        }
    }
    Ok(written)
}

/// Copy a local template directory under `target`.
pub fn copy_local(source: &Path, target: &Path) -> Result<usize> {
    let mut written = 0;
    for entry in WalkDir::new(source) {
        let entry = entry.with_context(|| format!("failed to walk {}", source.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("failed to relativize {}", entry.path().display()))?;
        let destination = target.join(relative);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::copy(entry.path(), &destination)
            .with_context(|| format!("failed to copy {}", entry.path().display()))?;
        written += 1;
    }
    Ok(written)
}
