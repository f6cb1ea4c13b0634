//! Vueform Scaffold - Core library for the create-vueform CLI
//!
//! Assembles a Vueform starter project: interviews the user (or takes CLI
//! overrides), seals the answers into an immutable answer set, resolves them
//! to a template variant and command plan, delegates base scaffolding to the
//! chosen framework's own tool, installs the Vueform packages, overlays the
//! matching template files, and patches the generated configuration.
//!
//! # Architecture
//!
//! Data flows strictly one direction:
//!
//! - **Collection** (`answers`, `tui`) gathers choices; no side effects.
//! - **Resolution** (`resolve`, `frameworks`) is pure: answers in, scaffold
//!   command, variant key, and feature gates out.
//! - **Assembly** (`install`, `templates`, `patch`) runs the ordered external
//!   pipeline, threaded with an explicit project root.
//!
//! # Feature Flags
//!
//! - `tui` (default): enables the cliclack-based interview module

pub mod answers;
pub mod error;
pub mod frameworks;
pub mod install;
pub mod patch;
pub mod resolve;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use answers::{AnswerSet, Framework, PackageManager, Theme};
pub use error::SetupError;
pub use resolve::{CommandLine, FeatureSet, Resolution, VariantKey};
pub use templates::TemplateCatalog;

#[cfg(feature = "tui")]
pub use tui::{run, CreateArgs};
