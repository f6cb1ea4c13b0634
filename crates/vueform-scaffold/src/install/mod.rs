//! The ordered assembly pipeline
//!
//! [`build_plan`] turns a resolution into the fixed, ordered list of
//! externally observable steps; [`execute`] runs them. Splitting the two
//! keeps the ordering and gating testable without touching a filesystem or
//! spawning anything.
//!
//! Dependency installs precede the template copy because copied files assume
//! installed packages are resolvable; the copy precedes the public-key patch
//! because the patch edits a file the copy just created.

pub mod runner;

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::answers::AnswerSet;
use crate::frameworks;
use crate::patch;
use crate::resolve::{self, CommandLine, Resolution, VariantKey};
use crate::templates::TemplateCatalog;

/// One externally observable step, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Run the framework's scaffold command (in the parent directory).
    Scaffold(CommandLine),
    /// Zero-argument full dependency install.
    InstallBase(CommandLine),
    /// Tailwind toolchain installs; spawned together, all awaited.
    InstallTailwind(Vec<CommandLine>),
    InstallBootstrap(CommandLine),
    /// Vue integration for Astro.
    InstallAstroVue(CommandLine),
    ExtendTsConfig,
    /// Vue build plugin for Laravel.
    InstallVuePlugin(CommandLine),
    /// The Vueform package set itself.
    InstallVueform(CommandLine),
    /// Overlay the variant's template files; template files win.
    CopyTemplate(VariantKey),
    InjectPublicKey,
}

/// Build the ordered step list for a run. Steps whose feature gate is off are
/// omitted entirely.
pub fn build_plan(answers: &AnswerSet, resolution: &Resolution) -> Vec<Step> {
    let pm = answers.package_manager;
    let features = resolution.features;

    let mut plan = vec![
        Step::Scaffold(resolution.scaffold.clone()),
        Step::InstallBase(resolve::install_all(pm)),
    ];

    if features.tailwind {
        let commands = frameworks::spec(answers.framework)
            .tailwind
            .iter()
            .map(|set| resolve::install_packages(pm, set.packages, set.dev))
            .collect();
        plan.push(Step::InstallTailwind(commands));
    }

    if features.bootstrap {
        plan.push(Step::InstallBootstrap(resolve::install_packages(
            pm,
            &["bootstrap"],
            false,
        )));
    }

    if features.astro {
        plan.push(Step::InstallAstroVue(resolve::install_packages(
            pm,
            &["vue", "@astrojs/vue"],
            false,
        )));
        plan.push(Step::ExtendTsConfig);
    }

    if features.laravel {
        plan.push(Step::InstallVuePlugin(resolve::install_packages(
            pm,
            &["@vitejs/plugin-vue"],
            false,
        )));
    }

    plan.push(Step::InstallVueform(resolve::install_packages(
        pm,
        resolve::vueform_packages(answers.framework, answers.builder),
        false,
    )));

    plan.push(Step::CopyTemplate(resolution.variant));

    if answers.builder {
        plan.push(Step::InjectPublicKey);
    }

    plan
}

/// Execute the plan. The project root is threaded explicitly and passed to
/// every command; the process working directory is never changed.
pub async fn execute(
    plan: &[Step],
    answers: &AnswerSet,
    catalog: &TemplateCatalog,
    parent_dir: &Path,
    project_root: &Path,
) -> Result<()> {
    for step in plan {
        match step {
            Step::Scaffold(command) => {
                status(&format!(
                    "\nCreating project '{}' using {}...",
                    answers.project_name,
                    frameworks::spec(answers.framework).title
                ));
                runner::run(command, parent_dir).await?;
            }
            Step::InstallBase(command) => {
                status("\nInstalling dependencies...");
                runner::run(command, project_root).await?;
            }
            Step::InstallTailwind(commands) => {
                status("\nInstalling Tailwind...");
                runner::run_concurrently(commands, project_root).await?;
            }
            Step::InstallBootstrap(command) => {
                status("\nInstalling Bootstrap...");
                runner::run(command, project_root).await?;
            }
            Step::InstallAstroVue(command) => {
                status("\nInstalling Vue...");
                runner::run(command, project_root).await?;
            }
            Step::ExtendTsConfig => {
                patch::extend_tsconfig(project_root)?;
            }
            Step::InstallVuePlugin(command) => {
                status("\nInstalling Vue...");
                runner::run(command, project_root).await?;
            }
            Step::InstallVueform(command) => {
                status(if answers.builder {
                    "\nInstalling Vueform Builder..."
                } else {
                    "\nInstalling Vueform..."
                });
                runner::run(command, project_root).await?;
            }
            Step::CopyTemplate(variant) => {
                let written = catalog.apply(variant, project_root)?;
                status(&format!("\nAdded {written} Vueform starter files"));
            }
            Step::InjectPublicKey => {
                if let Some(key) = answers.public_key.as_deref() {
                    patch::inject_public_key(project_root, key)?;
                }
            }
        }
    }

    Ok(())
}

fn status(message: &str) {
    println!("{}", message.cyan());
}
