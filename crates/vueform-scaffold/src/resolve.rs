//! Pure resolution from a sealed answer set to commands, template variant,
//! and feature gates
//!
//! Nothing here performs I/O; composer discovery happens before [`resolve`]
//! is called and its result is passed in.

use std::fmt;

use crate::answers::{AnswerSet, Framework, PackageManager, Theme};
use crate::error::SetupError;
use crate::frameworks;
use crate::runtime::composer::ComposerInvocation;

/// A subprocess invocation, kept as a program plus argument list from the
/// start. Nothing is ever joined into a single string and re-split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Booleans derived from the answer set that gate pipeline steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSet {
    pub tailwind: bool,
    pub bootstrap: bool,
    pub astro: bool,
    pub laravel: bool,
}

impl FeatureSet {
    pub fn from_answers(answers: &AnswerSet) -> Self {
        Self {
            tailwind: matches!(answers.theme, Theme::Tailwind | Theme::TailwindMaterial)
                || answers.builder,
            bootstrap: answers.theme == Theme::Bootstrap,
            astro: answers.framework == Framework::Astro,
            laravel: answers.framework == Framework::Laravel,
        }
    }
}

/// The 4-tuple selecting exactly one template catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantKey {
    pub builder: bool,
    pub framework: Framework,
    pub theme: Theme,
    pub typescript: bool,
}

impl VariantKey {
    pub fn from_answers(answers: &AnswerSet) -> Self {
        Self {
            builder: answers.builder,
            framework: answers.framework,
            theme: answers.theme,
            typescript: answers.typescript,
        }
    }

    /// Relative path of this variant inside the template catalog.
    pub fn catalog_path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            if self.builder { "builder" } else { "vueform" },
            self.framework.key(),
            self.theme.key(),
            if self.typescript { "ts" } else { "js" },
        )
    }
}

/// Zero-argument full install; every manager uses its plain `install` verb.
pub fn install_all(package_manager: PackageManager) -> CommandLine {
    CommandLine::new(package_manager.bin(), ["install"])
}

/// Install named packages; yarn and pnpm switch to their `add` verb, npm and
/// bun keep `install`.
pub fn install_packages(
    package_manager: PackageManager,
    packages: &[&str],
    dev: bool,
) -> CommandLine {
    let verb = match package_manager {
        PackageManager::Yarn | PackageManager::Pnpm => "add",
        PackageManager::Npm | PackageManager::Bun => "install",
    };
    let mut args = vec![verb.to_string()];
    if dev {
        args.push("-D".to_string());
    }
    args.extend(packages.iter().map(|package| package.to_string()));
    CommandLine {
        program: package_manager.bin().to_string(),
        args,
    }
}

/// Run a package.json script.
pub fn run_script(package_manager: PackageManager, script: &str) -> CommandLine {
    CommandLine::new(package_manager.bin(), ["run", script])
}

/// Package set for the Vueform install step. Nuxt replaces the separate
/// packages with a combined meta-package.
pub fn vueform_packages(framework: Framework, builder: bool) -> &'static [&'static str] {
    match (builder, framework) {
        (true, Framework::Nuxt) => &["@vueform/builder-nuxt"],
        (true, _) => &["@vueform/vueform", "@vueform/builder"],
        (false, Framework::Nuxt) => &["@vueform/nuxt"],
        (false, _) => &["@vueform/vueform"],
    }
}

/// Everything derived from a sealed answer set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub scaffold: CommandLine,
    pub variant: VariantKey,
    pub features: FeatureSet,
}

/// Map the answer set to the scaffold command, template variant, and feature
/// gates.
pub fn resolve(
    answers: &AnswerSet,
    composer: Option<&ComposerInvocation>,
) -> Result<Resolution, SetupError> {
    Ok(Resolution {
        scaffold: frameworks::scaffold_command(answers, composer)?,
        variant: VariantKey::from_answers(answers),
        features: FeatureSet::from_answers(answers),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_answers() -> AnswerSet {
        AnswerSet {
            project_name: "demo".to_string(),
            framework: Framework::Vite,
            builder: false,
            public_key: None,
            theme: Theme::Bootstrap,
            typescript: true,
            package_manager: PackageManager::Npm,
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let answers = demo_answers();
        let first = resolve(&answers, None).unwrap();
        let second = resolve(&answers, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn install_all_always_uses_install_verb() {
        for pm in PackageManager::ALL {
            let command = install_all(pm);
            assert_eq!(command.program, pm.bin());
            assert_eq!(command.args, ["install"]);
        }
    }

    #[test]
    fn named_packages_use_manager_specific_verb() {
        let npm = install_packages(PackageManager::Npm, &["bootstrap"], false);
        assert_eq!(npm.args, ["install", "bootstrap"]);

        let bun = install_packages(PackageManager::Bun, &["bootstrap"], false);
        assert_eq!(bun.args, ["install", "bootstrap"]);

        let yarn = install_packages(PackageManager::Yarn, &["bootstrap"], false);
        assert_eq!(yarn.args, ["add", "bootstrap"]);

        let pnpm = install_packages(PackageManager::Pnpm, &["bootstrap"], false);
        assert_eq!(pnpm.args, ["add", "bootstrap"]);
    }

    #[test]
    fn dev_installs_carry_the_dev_flag() {
        let command = install_packages(
            PackageManager::Pnpm,
            &["tailwindcss@3", "postcss", "autoprefixer"],
            true,
        );
        assert_eq!(
            command.args,
            ["add", "-D", "tailwindcss@3", "postcss", "autoprefixer"]
        );
    }

    #[test]
    fn nuxt_uses_meta_packages() {
        assert_eq!(
            vueform_packages(Framework::Nuxt, true),
            ["@vueform/builder-nuxt"]
        );
        assert_eq!(vueform_packages(Framework::Nuxt, false), ["@vueform/nuxt"]);
        assert_eq!(
            vueform_packages(Framework::Vite, true),
            ["@vueform/vueform", "@vueform/builder"]
        );
        assert_eq!(
            vueform_packages(Framework::Laravel, false),
            ["@vueform/vueform"]
        );
    }

    #[test]
    fn feature_set_derivation() {
        let mut answers = demo_answers();
        let features = FeatureSet::from_answers(&answers);
        assert!(features.bootstrap);
        assert!(!features.tailwind);
        assert!(!features.astro);
        assert!(!features.laravel);

        answers.theme = Theme::TailwindMaterial;
        assert!(FeatureSet::from_answers(&answers).tailwind);

        answers.theme = Theme::Vueform;
        answers.builder = true;
        assert!(FeatureSet::from_answers(&answers).tailwind);
    }

    #[test]
    fn variant_key_paths() {
        let answers = demo_answers();
        let key = VariantKey::from_answers(&answers);
        assert_eq!(key.catalog_path(), "vueform/vite/bootstrap/ts");

        let builder_key = VariantKey {
            builder: true,
            framework: Framework::Laravel,
            theme: Theme::Tailwind,
            typescript: false,
        };
        assert_eq!(builder_key.catalog_path(), "builder/laravel/tailwind/js");
    }

    #[test]
    fn laravel_resolution_requires_composer() {
        let mut answers = demo_answers();
        answers.framework = Framework::Laravel;
        answers.typescript = false;
        assert!(resolve(&answers, None).is_err());
    }

    #[test]
    fn command_line_display_joins_arguments() {
        let command = CommandLine::new("npm", ["install", "bootstrap"]);
        assert_eq!(command.to_string(), "npm install bootstrap");
    }
}
