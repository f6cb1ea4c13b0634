//! Small in-place edits applied to generated files after the template copy

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::error::SetupError;

/// Placeholder token the builder templates carry where the account credential
/// belongs.
pub const PUBLIC_KEY_PLACEHOLDER: &str = "YOUR_PUBLIC_KEY";

/// Set `compilerOptions.jsx` in the generated tsconfig so Vue components
/// type-check inside Astro. The scaffold step just created this file, so a
/// missing or unparsable tsconfig is fatal.
pub fn extend_tsconfig(project_root: &Path) -> Result<()> {
    let path = project_root.join("tsconfig.json");
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut config: Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let Some(root) = config.as_object_mut() else {
        bail!("{} is not a JSON object", path.display());
    };
    let options = root
        .entry("compilerOptions")
        .or_insert_with(|| Value::Object(Default::default()));
    let Some(options) = options.as_object_mut() else {
        bail!("compilerOptions in {} is not a JSON object", path.display());
    };
    options.insert("jsx".to_string(), Value::String("preserve".to_string()));

    let mut rendered = serde_json::to_string_pretty(&config)?;
    rendered.push('\n');
    fs::write(&path, rendered).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Replace every occurrence of the placeholder with the user's public key in
/// whichever vueform config file the template created. Exactly one of the two
/// filenames exists after a copy; if both somehow do, the `.js` one wins.
pub fn inject_public_key(project_root: &Path, public_key: &str) -> Result<()> {
    let js = project_root.join("vueform.config.js");
    let ts = project_root.join("vueform.config.ts");
    let path = if js.is_file() {
        js
    } else if ts.is_file() {
        ts
    } else {
        return Err(SetupError::ConfigNotFound {
            dir: project_root.to_path_buf(),
        }
        .into());
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let replaced = content.replace(PUBLIC_KEY_PLACEHOLDER, public_key);
    if replaced != content {
        fs::write(&path, replaced)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}
