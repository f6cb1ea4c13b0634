//! The static template catalog and its copier
//!
//! This module provides:
//! - The closed catalog of variant directories, embedded at compile time
//! - A local-directory source for template development
//! - Copy-over semantics where template files always win

pub mod catalog;
pub mod copier;

pub use catalog::TemplateCatalog;
