//! Failure taxonomy for a setup run
//!
//! Interactive validation failures never surface here (the prompt re-asks);
//! everything in this enum terminates the run with a printed cause.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    /// User-initiated abort at any prompt. Printed, never treated as a crash.
    #[error("Operation cancelled")]
    Cancelled,

    /// A supplied answer or flag combination cannot produce a valid project.
    #[error("{0}")]
    InvalidAnswers(String),

    /// The subprocess could not be started at all.
    #[error("failed to start `{command}`: {source}")]
    CommandLaunch {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The subprocess ran and reported failure; its exit code is the only
    /// signal available since children inherit the terminal.
    #[error("`{command}` exited with code {code}")]
    CommandFailed { command: String, code: i32 },

    /// A reachable variant has no catalog entry. Not user-recoverable.
    #[error("no template exists for '{path}' - this is a catalog mismatch, please report it")]
    TemplateMissing { path: String },

    #[error(
        "Composer not found. Please ensure Composer is installed and added to your PATH.\n\
         Visit https://getcomposer.org/download/ for installation instructions."
    )]
    ComposerNotFound,

    /// Neither vueform.config.js nor vueform.config.ts exists after the
    /// template copy.
    #[error("no vueform.config.js or vueform.config.ts found in {}", .dir.display())]
    ConfigNotFound { dir: PathBuf },

    #[error("{tool} is required but was not found. Please install it and try again.")]
    RuntimeMissing { tool: &'static str },

    #[error(
        "Minimum {tool} version required is {minimum}. \
         Your current version is {found}. Please upgrade {tool}."
    )]
    OutdatedRuntime {
        tool: &'static str,
        minimum: String,
        found: String,
    },

    #[error("could not parse the reported {tool} version '{raw}'")]
    VersionParse { tool: &'static str, raw: String },
}
