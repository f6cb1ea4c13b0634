//! Locating the PHP dependency manager for Laravel scaffolds

use std::path::Path;
use std::process::Command;

use crate::error::SetupError;
use crate::resolve::CommandLine;

/// Well-known install locations across OS families, checked in order before
/// falling back to PATH.
const WELL_KNOWN_PATHS: &[&str] = &[
    "/usr/local/bin/composer",
    "/usr/local/bin/composer.phar",
    "/usr/bin/composer",
    "/usr/bin/composer.phar",
    "C:\\ProgramData\\ComposerSetup\\bin\\composer",
    "C:\\ProgramData\\ComposerSetup\\bin\\composer.phar",
    "C:\\Program Files\\Composer\\composer.phar",
    "C:\\Program Files\\Composer\\composer",
];

/// How to invoke composer. A bare `.phar` is not executable by itself, so it
/// gets the interpreter in front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerInvocation {
    program: String,
    prefix_args: Vec<String>,
}

impl ComposerInvocation {
    pub fn from_path(path: &Path) -> Self {
        let location = path.to_string_lossy().into_owned();
        if location.ends_with(".phar") {
            Self {
                program: "php".to_string(),
                prefix_args: vec![location],
            }
        } else {
            Self {
                program: location,
                prefix_args: Vec::new(),
            }
        }
    }

    /// Build a composer command with `args` appended after any interpreter
    /// prefix.
    pub fn command<I, S>(&self, args: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all = self.prefix_args.clone();
        all.extend(args.into_iter().map(Into::into));
        CommandLine {
            program: self.program.clone(),
            args: all,
        }
    }
}

/// Search the well-known install paths, then PATH as a last resort. The PATH
/// candidate is only accepted if `composer --version` actually runs.
pub fn locate() -> Result<ComposerInvocation, SetupError> {
    for candidate in WELL_KNOWN_PATHS {
        let path = Path::new(candidate);
        if path.exists() {
            return Ok(ComposerInvocation::from_path(path));
        }
    }

    if let Ok(path) = which::which("composer") {
        let runs = Command::new(&path)
            .arg("--version")
            .output()
            .is_ok_and(|output| output.status.success());
        if runs {
            return Ok(ComposerInvocation::from_path(&path));
        }
    }

    Err(SetupError::ComposerNotFound)
}
