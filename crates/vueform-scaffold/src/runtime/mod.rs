//! Runtime preflight and external tool discovery
//!
//! This module provides:
//! - Node.js/npm minimum-version checks run before the interview
//! - Composer discovery for Laravel scaffolds

pub mod check;
pub mod composer;

pub use check::{preflight, RuntimeInfo};
pub use composer::ComposerInvocation;
