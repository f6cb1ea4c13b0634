//! The create flow: gate, preflight, interview, resolution, assembly
//!
//! Questions live in a declarative table of (name, visibility predicate,
//! prompt); a generic runner walks the table. Visibility predicates are pure
//! functions over the answers so far plus CLI overrides, so the question
//! graph is testable without executing any prompt. Side effects only start
//! once the interview is complete and sealed.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::answers::{self, AnswerSet, Framework, PackageManager, Theme};
use crate::error::SetupError;
use crate::frameworks;
use crate::install::{self, runner};
use crate::resolve;
use crate::runtime::{check, composer};
use crate::templates::TemplateCatalog;

/// Suggested project name in the name prompt.
const DEFAULT_PROJECT_NAME: &str = "vueform-project";

/// CLI overrides for the create flow. Any populated field suppresses its
/// question (the public key only pre-fills; its prompt still validates).
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    pub project_name: Option<String>,
    pub builder: bool,
    pub public_key: Option<String>,
    pub framework: Option<Framework>,
    pub theme: Option<Theme>,
    pub typescript: Option<bool>,
    pub package_manager: Option<PackageManager>,
    pub force: bool,
    pub start: bool,
    pub template_dir: Option<PathBuf>,
}

/// Run the full create flow.
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("create-vueform")?;

    // Contradictory flags never reach the interactive phase.
    answers::check_overrides(
        args.project_name.as_deref(),
        args.framework,
        args.builder,
        args.theme,
        args.typescript,
    )?;

    preflight()?;

    let answers = interview(&args)?;

    let parent_dir = std::env::current_dir().context("failed to read the working directory")?;
    let project_root = parent_dir.join(&answers.project_name);
    if project_root.exists() {
        if args.force {
            std::fs::remove_dir_all(&project_root)
                .with_context(|| format!("failed to remove {}", project_root.display()))?;
        } else {
            return Err(SetupError::InvalidAnswers(format!(
                "The directory '{}' already exists.",
                answers.project_name
            ))
            .into());
        }
    }

    // Needed for the scaffold command itself, so resolved before the resolver
    // runs; reused later by the Vue plugin install step.
    let composer = if answers.framework == Framework::Laravel {
        Some(composer::locate()?)
    } else {
        None
    };

    let resolution = resolve::resolve(&answers, composer.as_ref())?;

    let catalog = match &args.template_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local templates from {}", path.display()))?;
            TemplateCatalog::local(path.clone())
        }
        None => TemplateCatalog::embedded(),
    };
    if !catalog.contains(&resolution.variant) {
        return Err(SetupError::TemplateMissing {
            path: resolution.variant.catalog_path(),
        }
        .into());
    }

    let plan = install::build_plan(&answers, &resolution);
    install::execute(&plan, &answers, &catalog, &parent_dir, &project_root).await?;

    print_next_steps(&answers)?;

    if args.start {
        for command in frameworks::start_commands(&answers) {
            runner::run(&command, &project_root).await?;
        }
    }

    Ok(())
}

fn preflight() -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");
    match check::preflight() {
        Ok(runtimes) => {
            let summary: Vec<String> = runtimes
                .iter()
                .map(|runtime| format!("{} {}", runtime.name, runtime.version))
                .collect();
            spinner.stop(format!("Detected runtimes: {}", summary.join(", ")));
            Ok(())
        }
        Err(err) => {
            spinner.stop("Runtime check failed");
            Err(err.into())
        }
    }
}

/// Mutable interview state: the overrides plus every answer given so far.
struct Interview<'a> {
    args: &'a CreateArgs,
    project_name: Option<String>,
    builder: Option<bool>,
    public_key: Option<String>,
    framework: Option<Framework>,
    typescript: Option<bool>,
    theme: Option<Theme>,
    package_manager: Option<PackageManager>,
}

impl<'a> Interview<'a> {
    fn new(args: &'a CreateArgs) -> Self {
        Self {
            args,
            project_name: None,
            builder: None,
            public_key: None,
            framework: None,
            typescript: None,
            theme: None,
            package_manager: None,
        }
    }

    fn builder_mode(&self) -> bool {
        self.args.builder || self.builder == Some(true)
    }

    fn chosen_framework(&self) -> Option<Framework> {
        self.framework.or(self.args.framework)
    }
}

/// One interview question: a stable name, a visibility predicate over the
/// state so far, and the prompt itself.
struct QuestionSpec {
    name: &'static str,
    visible: fn(&Interview<'_>) -> bool,
    ask: fn(&mut Interview<'_>) -> Result<()>,
}

const QUESTIONS: &[QuestionSpec] = &[
    QuestionSpec {
        name: "project-name",
        visible: |iv: &Interview<'_>| iv.args.project_name.is_none(),
        ask: ask_project_name,
    },
    QuestionSpec {
        name: "libraries",
        visible: |iv: &Interview<'_>| !iv.args.builder,
        ask: ask_libraries,
    },
    QuestionSpec {
        name: "public-key",
        visible: |iv: &Interview<'_>| iv.builder_mode(),
        ask: ask_public_key,
    },
    QuestionSpec {
        name: "framework",
        visible: |iv: &Interview<'_>| iv.args.framework.is_none(),
        ask: ask_framework,
    },
    QuestionSpec {
        name: "typescript",
        visible: |iv: &Interview<'_>| {
            iv.args.typescript.is_none()
                && matches!(
                    iv.chosen_framework(),
                    Some(Framework::Vite | Framework::Astro)
                )
        },
        ask: ask_typescript,
    },
    QuestionSpec {
        name: "theme",
        visible: |iv: &Interview<'_>| iv.args.theme.is_none() && !iv.builder_mode(),
        ask: ask_theme,
    },
    QuestionSpec {
        name: "package-manager",
        visible: |iv: &Interview<'_>| iv.args.package_manager.is_none(),
        ask: ask_package_manager,
    },
];

fn interview(args: &CreateArgs) -> Result<AnswerSet> {
    let mut interview = Interview::new(args);
    for question in QUESTIONS {
        if (question.visible)(&interview) {
            (question.ask)(&mut interview)?;
        }
    }
    Ok(finish(interview)?)
}

/// Seal the interview into an answer set, pulling suppressed answers from the
/// overrides.
fn finish(interview: Interview<'_>) -> Result<AnswerSet, SetupError> {
    let args = interview.args;
    let project_name = interview
        .project_name
        .clone()
        .or_else(|| args.project_name.clone())
        .ok_or_else(|| SetupError::InvalidAnswers("No project name given.".to_string()))?;
    let framework = interview
        .chosen_framework()
        .ok_or_else(|| SetupError::InvalidAnswers("No framework selected.".to_string()))?;
    let builder = interview.builder_mode();
    let public_key = interview
        .public_key
        .clone()
        .or_else(|| args.public_key.clone());
    let theme = interview.theme.or(args.theme);
    let typescript = interview.typescript.or(args.typescript);
    let package_manager = interview
        .package_manager
        .or(args.package_manager)
        .unwrap_or_else(PackageManager::default_from_env);

    answers::seal(
        project_name,
        framework,
        builder,
        public_key,
        theme,
        typescript,
        package_manager,
    )
}

/// Esc/Ctrl-C inside a prompt arrives as an interrupted read; everything else
/// is a real terminal error.
fn prompt_error(err: io::Error) -> anyhow::Error {
    if err.kind() == io::ErrorKind::Interrupted {
        SetupError::Cancelled.into()
    } else {
        err.into()
    }
}

fn ask_project_name(interview: &mut Interview<'_>) -> Result<()> {
    let force = interview.args.force;
    let name: String = cliclack::input("Choose a project name:")
        .default_input(DEFAULT_PROJECT_NAME)
        .validate(move |input: &String| {
            answers::validate_project_name(input)?;
            if !force && Path::new(input).is_dir() {
                return Err(format!("The directory '{input}' already exists."));
            }
            Ok(())
        })
        .interact()
        .map_err(prompt_error)?;
    interview.project_name = Some(name);
    Ok(())
}

fn ask_libraries(interview: &mut Interview<'_>) -> Result<()> {
    let builder: bool = cliclack::select("Which libraries do you want to install?")
        .item(false, "Vueform", "")
        .item(true, "Vueform + Builder", "")
        .interact()
        .map_err(prompt_error)?;
    interview.builder = Some(builder);
    Ok(())
}

fn ask_public_key(interview: &mut Interview<'_>) -> Result<()> {
    let mut input = cliclack::input("Your Public Key:")
        .placeholder("obtain a FREE one at https://app.vueform.com")
        .validate(|key: &String| answers::validate_public_key(key));
    if let Some(initial) = &interview.args.public_key {
        input = input.default_input(initial);
    }
    let key: String = input.interact().map_err(prompt_error)?;
    interview.public_key = Some(key);
    Ok(())
}

fn ask_framework(interview: &mut Interview<'_>) -> Result<()> {
    let mut select = cliclack::select("Choose a framework:");
    for framework in Framework::ALL {
        // no builder template exists for Astro
        if interview.builder_mode() && framework == Framework::Astro {
            continue;
        }
        select = select.item(framework, framework.title(), "");
    }
    let framework: Framework = select.interact().map_err(prompt_error)?;
    interview.framework = Some(framework);
    Ok(())
}

fn ask_typescript(interview: &mut Interview<'_>) -> Result<()> {
    let typescript = cliclack::confirm("Do you plan to use TypeScript?")
        .initial_value(true)
        .interact()
        .map_err(prompt_error)?;
    interview.typescript = Some(typescript);
    Ok(())
}

fn ask_theme(interview: &mut Interview<'_>) -> Result<()> {
    let mut select = cliclack::select("Select a theme for your project:");
    for theme in Theme::ALL {
        select = select.item(theme, theme.title(), "");
    }
    let theme: Theme = select.interact().map_err(prompt_error)?;
    interview.theme = Some(theme);
    Ok(())
}

fn ask_package_manager(interview: &mut Interview<'_>) -> Result<()> {
    let detected = PackageManager::default_from_env();
    let mut select =
        cliclack::select("Which package manager do you want to use?").initial_value(detected);
    for manager in PackageManager::ALL {
        let hint = if manager == detected { "detected" } else { "" };
        select = select.item(manager, manager.bin(), hint);
    }
    let manager: PackageManager = select.interact().map_err(prompt_error)?;
    interview.package_manager = Some(manager);
    Ok(())
}

fn print_next_steps(answers: &AnswerSet) -> Result<()> {
    let manager = answers.package_manager.bin();
    let mut steps = vec![format!("cd {}", answers.project_name)];
    if answers.framework == Framework::Laravel {
        steps.push(format!("{manager} run build"));
        steps.push("php artisan serve".to_string());
    } else {
        steps.push(format!("{manager} run dev"));
    }

    println!();
    println!("  Next steps");
    println!();
    for (index, step) in steps.iter().enumerate() {
        println!("  {}.  {}", index + 1, step);
    }

    cliclack::outro("Installation finished")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(name: &str) -> &'static QuestionSpec {
        QUESTIONS
            .iter()
            .find(|question| question.name == name)
            .unwrap()
    }

    #[test]
    fn builder_flag_suppresses_libraries_and_theme() {
        let args = CreateArgs {
            builder: true,
            ..Default::default()
        };
        let interview = Interview::new(&args);
        assert!(!(question("libraries").visible)(&interview));
        assert!((question("public-key").visible)(&interview));
        assert!(!(question("theme").visible)(&interview));
    }

    #[test]
    fn typescript_is_only_asked_for_vite_and_astro() {
        for (framework, expected) in [
            (Framework::Vite, true),
            (Framework::Astro, true),
            (Framework::Nuxt, false),
            (Framework::Laravel, false),
        ] {
            let args = CreateArgs {
                framework: Some(framework),
                ..Default::default()
            };
            let interview = Interview::new(&args);
            assert_eq!(
                (question("typescript").visible)(&interview),
                expected,
                "framework {framework:?}"
            );
        }
    }

    #[test]
    fn typescript_flag_suppresses_the_toggle() {
        let args = CreateArgs {
            framework: Some(Framework::Vite),
            typescript: Some(true),
            ..Default::default()
        };
        let interview = Interview::new(&args);
        assert!(!(question("typescript").visible)(&interview));
    }

    #[test]
    fn flags_suppress_their_questions() {
        let args = CreateArgs {
            project_name: Some("demo".to_string()),
            framework: Some(Framework::Vite),
            package_manager: Some(PackageManager::Pnpm),
            theme: Some(Theme::Material),
            ..Default::default()
        };
        let interview = Interview::new(&args);
        assert!(!(question("project-name").visible)(&interview));
        assert!(!(question("framework").visible)(&interview));
        assert!(!(question("package-manager").visible)(&interview));
        assert!(!(question("theme").visible)(&interview));
    }

    #[test]
    fn interactive_builder_choice_reveals_the_key_prompt() {
        let args = CreateArgs::default();
        let mut interview = Interview::new(&args);
        assert!(!(question("public-key").visible)(&interview));
        interview.builder = Some(true);
        assert!((question("public-key").visible)(&interview));
        assert!(!(question("theme").visible)(&interview));
    }

    #[test]
    fn finish_pulls_suppressed_answers_from_overrides() {
        let args = CreateArgs {
            project_name: Some("demo".to_string()),
            framework: Some(Framework::Laravel),
            theme: Some(Theme::Material),
            package_manager: Some(PackageManager::Yarn),
            ..Default::default()
        };
        let interview = Interview::new(&args);
        let answers = finish(interview).unwrap();
        assert_eq!(answers.project_name, "demo");
        assert_eq!(answers.framework, Framework::Laravel);
        assert_eq!(answers.theme, Theme::Material);
        assert!(!answers.typescript);
        assert_eq!(answers.package_manager, PackageManager::Yarn);
    }

    #[test]
    fn finish_discards_a_key_without_builder_mode() {
        let args = CreateArgs {
            project_name: Some("demo".to_string()),
            framework: Some(Framework::Vite),
            theme: Some(Theme::Vueform),
            public_key: Some("ABCD-1234-EFGH-5678-IJKL".to_string()),
            typescript: Some(true),
            package_manager: Some(PackageManager::Npm),
            ..Default::default()
        };
        let answers = finish(Interview::new(&args)).unwrap();
        assert!(!answers.builder);
        assert_eq!(answers.public_key, None);
    }
}
