//! Per-framework descriptor records
//!
//! Everything framework-specific the assembler needs lives in one record per
//! framework, so supporting a new framework means adding one record here plus
//! its template catalog entries.

use crate::answers::{AnswerSet, Framework, PackageManager};
use crate::error::SetupError;
use crate::resolve::{self, CommandLine};
use crate::runtime::composer::ComposerInvocation;

/// A set of packages installed in one package-manager invocation.
#[derive(Debug, Clone, Copy)]
pub struct PackageSet {
    pub packages: &'static [&'static str],
    pub dev: bool,
}

/// Static description of a framework's scaffolding behavior.
pub struct FrameworkSpec {
    pub title: &'static str,
    /// Tailwind toolchain installs. Independent of each other; the sequencer
    /// spawns them together and awaits all of them.
    pub tailwind: &'static [PackageSet],
}

static VITE: FrameworkSpec = FrameworkSpec {
    title: "Vite",
    tailwind: &[PackageSet {
        packages: &["tailwindcss@3", "postcss", "autoprefixer"],
        dev: true,
    }],
};

static NUXT: FrameworkSpec = FrameworkSpec {
    title: "Nuxt",
    tailwind: &[PackageSet {
        packages: &["@nuxtjs/tailwindcss@6"],
        dev: true,
    }],
};

static ASTRO: FrameworkSpec = FrameworkSpec {
    title: "Astro",
    tailwind: &[PackageSet {
        packages: &["@astrojs/tailwind", "tailwindcss"],
        dev: false,
    }],
};

static LARAVEL: FrameworkSpec = FrameworkSpec {
    title: "Laravel",
    tailwind: &[PackageSet {
        packages: &["tailwindcss@3", "postcss", "autoprefixer"],
        dev: true,
    }],
};

pub fn spec(framework: Framework) -> &'static FrameworkSpec {
    match framework {
        Framework::Vite => &VITE,
        Framework::Nuxt => &NUXT,
        Framework::Astro => &ASTRO,
        Framework::Laravel => &LARAVEL,
    }
}

/// Build the external scaffold command for the chosen framework and package
/// manager. `composer` must be present for Laravel.
pub fn scaffold_command(
    answers: &AnswerSet,
    composer: Option<&ComposerInvocation>,
) -> Result<CommandLine, SetupError> {
    let name = answers.project_name.as_str();
    let pm = answers.package_manager;

    let command = match answers.framework {
        Framework::Vite => {
            let template = if answers.typescript { "vue-ts" } else { "vue" };
            match pm {
                PackageManager::Npm => CommandLine::new(
                    "npm",
                    ["create", "vite@latest", name, "--", "--template", template],
                ),
                PackageManager::Yarn => {
                    CommandLine::new("yarn", ["create", "vite", name, "--template", template])
                }
                PackageManager::Pnpm => {
                    CommandLine::new("pnpm", ["create", "vite", name, "--template", template])
                }
                PackageManager::Bun => {
                    CommandLine::new("bun", ["create", "vite", name, "--template", template])
                }
            }
        }
        Framework::Nuxt => {
            let pm_arg = format!("--packageManager={}", pm.bin());
            match pm {
                PackageManager::Npm | PackageManager::Yarn => {
                    CommandLine::new("npx", ["nuxi@latest", "init", name, pm_arg.as_str()])
                }
                PackageManager::Pnpm => {
                    CommandLine::new("pnpm", ["dlx", "nuxi@latest", "init", name, pm_arg.as_str()])
                }
                PackageManager::Bun => {
                    CommandLine::new("bunx", ["nuxi@latest", "init", name, pm_arg.as_str()])
                }
            }
        }
        Framework::Astro => match pm {
            PackageManager::Npm => CommandLine::new(
                "npm",
                ["create", "astro@latest", name, "--", "--install=yes"],
            ),
            PackageManager::Yarn => {
                CommandLine::new("yarn", ["create", "astro", name, "--install=yes"])
            }
            PackageManager::Pnpm => {
                CommandLine::new("pnpm", ["create", "astro", name, "--install=yes"])
            }
            PackageManager::Bun => {
                CommandLine::new("bun", ["create", "astro", name, "--install=yes"])
            }
        },
        Framework::Laravel => {
            let composer = composer.ok_or(SetupError::ComposerNotFound)?;
            composer.command(["create-project", "laravel/laravel", name])
        }
    };

    Ok(command)
}

/// Commands that launch the finished project, in order. Laravel builds assets
/// and serves through artisan; everything else has a dev server script.
pub fn start_commands(answers: &AnswerSet) -> Vec<CommandLine> {
    if answers.framework == Framework::Laravel {
        vec![
            resolve::run_script(answers.package_manager, "build"),
            CommandLine::new("php", ["artisan", "serve"]),
        ]
    } else {
        vec![resolve::run_script(answers.package_manager, "dev")]
    }
}
