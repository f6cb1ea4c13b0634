//! The answer set: every choice a run is assembled from
//!
//! Answers are collected by the interview (or taken from CLI overrides),
//! then sealed into an immutable, internally consistent [`AnswerSet`].
//! The forcing rules live in [`seal`] so they apply no matter how an answer
//! arrived.

use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;

use crate::error::SetupError;

/// Frameworks a base project can be scaffolded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Framework {
    Vite,
    Nuxt,
    Astro,
    Laravel,
}

impl Framework {
    pub const ALL: [Framework; 4] = [
        Framework::Vite,
        Framework::Nuxt,
        Framework::Astro,
        Framework::Laravel,
    ];

    /// Catalog key segment.
    pub fn key(&self) -> &'static str {
        match self {
            Framework::Vite => "vite",
            Framework::Nuxt => "nuxt",
            Framework::Astro => "astro",
            Framework::Laravel => "laravel",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Framework::Vite => "Vite",
            Framework::Nuxt => "Nuxt",
            Framework::Astro => "Astro",
            Framework::Laravel => "Laravel",
        }
    }

    /// Some frameworks do not leave the language open: Nuxt scaffolds are
    /// always TypeScript, Laravel ones never are.
    pub fn forced_typescript(&self) -> Option<bool> {
        match self {
            Framework::Nuxt => Some(true),
            Framework::Laravel => Some(false),
            Framework::Vite | Framework::Astro => None,
        }
    }
}

/// Form themes a template variant can be styled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Theme {
    Vueform,
    Tailwind,
    Bootstrap,
    Material,
    TailwindMaterial,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Vueform,
        Theme::Tailwind,
        Theme::Bootstrap,
        Theme::Material,
        Theme::TailwindMaterial,
    ];

    /// Catalog key segment.
    pub fn key(&self) -> &'static str {
        match self {
            Theme::Vueform => "vueform",
            Theme::Tailwind => "tailwind",
            Theme::Bootstrap => "bootstrap",
            Theme::Material => "material",
            Theme::TailwindMaterial => "tailwind-material",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Theme::Vueform => "Vueform",
            Theme::Tailwind => "Tailwind",
            Theme::Bootstrap => "Bootstrap",
            Theme::Material => "Material",
            Theme::TailwindMaterial => "Tailwind Material",
        }
    }
}

/// Package managers the generated project can be driven with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Npm,
        PackageManager::Yarn,
        PackageManager::Pnpm,
        PackageManager::Bun,
    ];

    pub fn bin(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Parse the standard package-manager user agent, e.g.
    /// `pnpm/9.1.0 npm/? node/v20.11.0 linux x64`.
    pub fn from_user_agent(user_agent: &str) -> Option<Self> {
        let name = user_agent.split(' ').next()?.split('/').next()?;
        match name {
            "npm" => Some(PackageManager::Npm),
            "yarn" => Some(PackageManager::Yarn),
            "pnpm" => Some(PackageManager::Pnpm),
            "bun" => Some(PackageManager::Bun),
            _ => None,
        }
    }

    /// The manager that invoked us, falling back to npm.
    pub fn default_from_env() -> Self {
        std::env::var("npm_config_user_agent")
            .ok()
            .and_then(|ua| Self::from_user_agent(&ua))
            .unwrap_or(PackageManager::Npm)
    }
}

static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").unwrap());

static PUBLIC_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{4}(?:-[a-zA-Z0-9]{4}){4}$").unwrap());

pub fn validate_project_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Please provide a project name".to_string());
    }
    if !PROJECT_NAME.is_match(name) {
        return Err(
            "Invalid project name. Use only alphanumeric, underscore, and hyphen characters \
             and do not start with a hyphen or underscore."
                .to_string(),
        );
    }
    Ok(())
}

pub fn validate_public_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err(
            "Please provide your Public Key. If you don't have one go to \
             https://app.vueform.com and generate one for FREE."
                .to_string(),
        );
    }
    if !PUBLIC_KEY.is_match(key) {
        return Err(
            "Invalid Public Key. Please go to https://app.vueform.com and generate one for FREE."
                .to_string(),
        );
    }
    Ok(())
}

/// The immutable record of choices once collection completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    pub project_name: String,
    pub framework: Framework,
    pub builder: bool,
    pub public_key: Option<String>,
    pub theme: Theme,
    pub typescript: bool,
    pub package_manager: PackageManager,
}

/// Seal raw answers into a consistent [`AnswerSet`].
///
/// The forcing rules apply here regardless of how an answer arrived (prompt
/// or flag): builder mode pins the Tailwind theme and excludes Astro, Nuxt is
/// always TypeScript, Laravel never is, and the public key exists exactly
/// when the builder does.
pub fn seal(
    project_name: String,
    framework: Framework,
    builder: bool,
    public_key: Option<String>,
    theme: Option<Theme>,
    typescript: Option<bool>,
    package_manager: PackageManager,
) -> Result<AnswerSet, SetupError> {
    validate_project_name(&project_name).map_err(SetupError::InvalidAnswers)?;

    if builder && framework == Framework::Astro {
        return Err(SetupError::InvalidAnswers(
            "The visual builder is not available for Astro projects.".to_string(),
        ));
    }

    let theme = if builder {
        Theme::Tailwind
    } else {
        theme.ok_or_else(|| SetupError::InvalidAnswers("No theme selected.".to_string()))?
    };

    let typescript = framework.forced_typescript().or(typescript).unwrap_or(true);

    let public_key = if builder {
        let key = public_key.ok_or_else(|| {
            SetupError::InvalidAnswers(
                "A Public Key is required to install the builder.".to_string(),
            )
        })?;
        validate_public_key(&key).map_err(SetupError::InvalidAnswers)?;
        Some(key)
    } else {
        None
    };

    Ok(AnswerSet {
        project_name,
        framework,
        builder,
        public_key,
        theme,
        typescript,
        package_manager,
    })
}

/// Reject override combinations that contradict the forcing rules before any
/// prompting starts. Flag-supplied answers get no re-prompt, so a
/// contradiction here must abort with a descriptive message instead.
pub fn check_overrides(
    project_name: Option<&str>,
    framework: Option<Framework>,
    builder: bool,
    theme: Option<Theme>,
    typescript: Option<bool>,
) -> Result<(), SetupError> {
    if let Some(name) = project_name {
        validate_project_name(name).map_err(SetupError::InvalidAnswers)?;
    }

    if builder {
        if framework == Some(Framework::Astro) {
            return Err(SetupError::InvalidAnswers(
                "The visual builder is not available for Astro projects.".to_string(),
            ));
        }
        if let Some(theme) = theme {
            if theme != Theme::Tailwind {
                return Err(SetupError::InvalidAnswers(format!(
                    "The visual builder requires the Tailwind theme, but '{}' was requested.",
                    theme.key()
                )));
            }
        }
    }

    match (framework, typescript) {
        (Some(Framework::Laravel), Some(true)) => Err(SetupError::InvalidAnswers(
            "Laravel projects are scaffolded without TypeScript.".to_string(),
        )),
        (Some(Framework::Nuxt), Some(false)) => Err(SetupError::InvalidAnswers(
            "Nuxt projects always use TypeScript.".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_project_names() {
        assert!(validate_project_name("vueform-project").is_ok());
        assert!(validate_project_name("demo1").is_ok());
        assert!(validate_project_name("My_App-2").is_ok());
    }

    #[test]
    fn rejects_hyphen_leading_project_name() {
        let message = validate_project_name("-bad").unwrap_err();
        assert!(message.contains("Invalid project name"));
    }

    #[test]
    fn rejects_empty_and_spaced_project_names() {
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name("my app").is_err());
        assert!(validate_project_name("_private").is_err());
    }

    #[test]
    fn validates_public_key_shape() {
        assert!(validate_public_key("ABCD-1234-EFGH-5678-IJKL").is_ok());
        assert!(validate_public_key("abcd-1234-efgh-5678-ijkl").is_ok());
        assert!(validate_public_key("ABCD-1234-EFGH-5678").is_err());
        assert!(validate_public_key("ABCD-1234-EFGH-5678-IJ!L").is_err());
        assert!(validate_public_key("").is_err());
    }

    #[test]
    fn parses_package_manager_user_agent() {
        assert_eq!(
            PackageManager::from_user_agent("pnpm/9.1.0 npm/? node/v20.11.0 linux x64"),
            Some(PackageManager::Pnpm)
        );
        assert_eq!(
            PackageManager::from_user_agent("yarn/1.22.22 npm/? node/v18.19.0 darwin arm64"),
            Some(PackageManager::Yarn)
        );
        assert_eq!(PackageManager::from_user_agent("webpack/5"), None);
        assert_eq!(PackageManager::from_user_agent(""), None);
    }

    #[test]
    fn builder_forces_tailwind_theme() {
        for theme in [None, Some(Theme::Bootstrap), Some(Theme::Material)] {
            let answers = seal(
                "demo".to_string(),
                Framework::Vite,
                true,
                Some("ABCD-1234-EFGH-5678-IJKL".to_string()),
                theme,
                Some(false),
                PackageManager::Npm,
            )
            .unwrap();
            assert_eq!(answers.theme, Theme::Tailwind);
        }
    }

    #[test]
    fn builder_rejects_astro() {
        let result = seal(
            "demo".to_string(),
            Framework::Astro,
            true,
            Some("ABCD-1234-EFGH-5678-IJKL".to_string()),
            None,
            None,
            PackageManager::Npm,
        );
        assert!(result.is_err());
    }

    #[test]
    fn laravel_is_never_typescript() {
        let answers = seal(
            "demo".to_string(),
            Framework::Laravel,
            false,
            None,
            Some(Theme::Vueform),
            Some(true),
            PackageManager::Npm,
        )
        .unwrap();
        assert!(!answers.typescript);
    }

    #[test]
    fn nuxt_is_always_typescript() {
        let answers = seal(
            "demo".to_string(),
            Framework::Nuxt,
            false,
            None,
            Some(Theme::Vueform),
            Some(false),
            PackageManager::Npm,
        )
        .unwrap();
        assert!(answers.typescript);
    }

    #[test]
    fn public_key_exists_iff_builder() {
        let plain = seal(
            "demo".to_string(),
            Framework::Vite,
            false,
            Some("ABCD-1234-EFGH-5678-IJKL".to_string()),
            Some(Theme::Vueform),
            Some(true),
            PackageManager::Npm,
        )
        .unwrap();
        assert_eq!(plain.public_key, None);

        let missing = seal(
            "demo".to_string(),
            Framework::Vite,
            true,
            None,
            None,
            Some(true),
            PackageManager::Npm,
        );
        assert!(missing.is_err());
    }

    #[test]
    fn override_gate_catches_contradictions() {
        assert!(check_overrides(
            None,
            Some(Framework::Laravel),
            false,
            None,
            Some(true)
        )
        .is_err());
        assert!(check_overrides(None, Some(Framework::Nuxt), false, None, Some(false)).is_err());
        assert!(check_overrides(None, Some(Framework::Astro), true, None, None).is_err());
        assert!(check_overrides(None, None, true, Some(Theme::Bootstrap), None).is_err());
        assert!(check_overrides(Some("-bad"), None, false, None, None).is_err());
    }

    #[test]
    fn override_gate_accepts_consistent_combinations() {
        assert!(check_overrides(
            Some("demo"),
            Some(Framework::Laravel),
            false,
            Some(Theme::Material),
            Some(false)
        )
        .is_ok());
        assert!(check_overrides(None, Some(Framework::Vite), true, Some(Theme::Tailwind), None).is_ok());
        assert!(check_overrides(None, None, false, None, None).is_ok());
    }
}
