//! create-vueform - Scaffold a Vueform project with an optional visual builder

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use vueform_scaffold::tui::CreateArgs;
use vueform_scaffold::{Framework, PackageManager, SetupError, Theme};

#[derive(Parser, Debug)]
#[command(name = "create-vueform")]
#[command(about = "Scaffold a Vueform project with an optional visual builder")]
#[command(version)]
pub struct Args {
    /// Project name (also the directory to create)
    pub project_name: Option<String>,

    /// Install Vueform together with the visual builder
    #[arg(short, long)]
    pub builder: bool,

    /// Public Key for the builder (get a free one at https://app.vueform.com)
    #[arg(short = 'k', long = "public-key")]
    pub public_key: Option<String>,

    /// Framework to scaffold with
    #[arg(short = 'F', long, value_enum)]
    pub framework: Option<Framework>,

    /// Theme for the generated forms
    #[arg(short, long, value_enum)]
    pub theme: Option<Theme>,

    /// Package manager to use (defaults to the one that invoked us)
    #[arg(short, long = "package-manager", value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Use TypeScript (ignored where the framework fixes the language)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub typescript: Option<bool>,

    /// Delete an existing directory with the same name first
    #[arg(short, long)]
    pub force: bool,

    /// Start the dev server once setup finishes
    #[arg(short, long)]
    pub start: bool,

    /// Local directory to use for templates instead of the embedded catalog (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            project_name: args.project_name,
            builder: args.builder,
            public_key: args.public_key,
            framework: args.framework,
            theme: args.theme,
            typescript: args.typescript,
            package_manager: args.package_manager,
            force: args.force,
            start: args.start,
            template_dir: args.template_dir,
        }
    }
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Ctrl+C outside a prompt: restore the cursor and leave quietly.
    // Cancellation is not a crash, so the shell sees success.
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        println!();
        println!("{}", format!("✖ {}", SetupError::Cancelled).red());
        std::process::exit(0);
    })
    .ok();

    let args = Args::parse();
    let result = vueform_scaffold::tui::run(args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(err) = result {
        let cancelled = err
            .downcast_ref::<SetupError>()
            .is_some_and(|setup| matches!(setup, SetupError::Cancelled));
        if cancelled {
            println!("{}", format!("✖ {err}").red());
        } else {
            eprintln!("{} {err:#}", "✖".red());
            std::process::exit(1);
        }
    }
}
