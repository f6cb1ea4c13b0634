//! The template catalog, keyed by variant
//!
//! The catalog is closed: every answer set that survives sealing maps to
//! exactly one directory here. A miss means the catalog and the resolution
//! logic disagree, which is a defect, not a user error.

use std::path::{Path, PathBuf};

use anyhow::Result;
use include_dir::{include_dir, Dir};

use crate::error::SetupError;
use crate::resolve::VariantKey;
use crate::templates::copier;

static CATALOG_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Where variant templates come from: the embedded catalog, or a local
/// directory during template development.
pub enum TemplateCatalog {
    Embedded,
    Local(PathBuf),
}

impl TemplateCatalog {
    pub fn embedded() -> Self {
        Self::Embedded
    }

    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }

    /// Whether a template directory exists for the variant.
    pub fn contains(&self, variant: &VariantKey) -> bool {
        let relative = variant.catalog_path();
        match self {
            Self::Embedded => CATALOG_DIR.get_dir(&relative).is_some(),
            Self::Local(root) => root.join(&relative).is_dir(),
        }
    }

    /// Copy the variant's full contents over `target`, overwriting
    /// name-colliding files. Returns the number of files written.
    pub fn apply(&self, variant: &VariantKey, target: &Path) -> Result<usize> {
        let relative = variant.catalog_path();
        match self {
            Self::Embedded => {
                let dir = CATALOG_DIR.get_dir(&relative).ok_or(SetupError::TemplateMissing {
                    path: relative.clone(),
                })?;
                copier::copy_embedded(dir, &relative, target)
            }
            Self::Local(root) => {
                let source = root.join(&relative);
                if !source.is_dir() {
                    return Err(SetupError::TemplateMissing { path: relative }.into());
                }
                copier::copy_local(&source, target)
            }
        }
    }
}
