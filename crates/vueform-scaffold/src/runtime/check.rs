//! Node.js and npm preflight
//!
//! The scaffold commands and every install step assume a working Node
//! toolchain, so the versions are checked before the interview starts and
//! failure here is fatal.

use std::process::Command;

use semver::Version;

use crate::error::SetupError;

pub const MIN_NODE_VERSION: &str = "18.0.0";
pub const MIN_NPM_VERSION: &str = "7.0.0";

/// Probe result for one runtime.
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: String,
}

fn probe(binary: &str) -> Option<String> {
    let output = Command::new(binary).arg("--version").output().ok()?;
    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        None
    }
}

/// Parse a reported version, tolerating a leading `v`.
fn parse_version(tool: &'static str, raw: &str) -> Result<Version, SetupError> {
    let trimmed = raw.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).map_err(|_| SetupError::VersionParse {
        tool,
        raw: raw.to_string(),
    })
}

fn ensure_minimum(tool: &'static str, raw: &str, minimum: &str) -> Result<(), SetupError> {
    let found = parse_version(tool, raw)?;
    let required = parse_version(tool, minimum)?;
    if found < required {
        return Err(SetupError::OutdatedRuntime {
            tool,
            minimum: minimum.to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}

/// Check Node.js and npm against the minimum supported versions.
pub fn preflight() -> Result<Vec<RuntimeInfo>, SetupError> {
    let node = probe("node").ok_or(SetupError::RuntimeMissing { tool: "Node.js" })?;
    ensure_minimum("Node.js", &node, MIN_NODE_VERSION)?;

    let npm = probe("npm").ok_or(SetupError::RuntimeMissing { tool: "npm" })?;
    ensure_minimum("npm", &npm, MIN_NPM_VERSION)?;

    Ok(vec![
        RuntimeInfo {
            name: "Node.js",
            version: node,
        },
        RuntimeInfo {
            name: "npm",
            version: npm,
        },
    ])
}
