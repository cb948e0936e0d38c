//! Charm-style CLI prompts using cliclack

use crate::config::detect;
use crate::config::{CollectorState, ConfigurationKey, PartialKey, Prompter, Settings};
use crate::project::{self, InstallPlan};
use crate::runtime::{check_package_manager, install_command, InstallOutcome, STDOUT_TAIL_LINES};
use crate::templates::{is_identifier, MaterializeReport};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Prompter backed by cliclack's inline prompts
#[derive(Debug, Default)]
pub struct ClackPrompter;

impl Prompter for ClackPrompter {
    fn select<T: Copy + Eq>(&mut self, prompt: &str, options: &[(T, &'static str)]) -> Result<T> {
        let mut select = cliclack::select(prompt);
        for (value, label) in options {
            select = select.item(*value, *label, "");
        }
        Ok(select.interact()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Ok(cliclack::confirm(prompt).initial_value(default).interact()?)
    }

    fn input(&mut self, prompt: &str, default: &str) -> Result<String> {
        let mut input = cliclack::input(prompt).required(false);
        if !default.is_empty() {
            input = input.placeholder(default);
        }
        let answer: String = input.interact()?;
        Ok(answer)
    }

    fn reject(&mut self, message: &str) -> Result<()> {
        cliclack::log::warning(message)?;
        Ok(())
    }
}

/// Arguments for scaffolding a new project
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Axes chosen on the command line
    pub preset: PartialKey,

    /// Project directory (created if missing)
    pub directory: PathBuf,

    /// Use default package.json values
    pub yes: bool,

    pub skip_install: bool,
}

/// Arguments for adding a module to an existing project
#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    pub preset: PartialKey,
    pub name: String,
    pub directory: PathBuf,
    pub force: bool,
    pub yes: bool,
}

/// Scaffold a new project with interactive prompts
pub async fn run_init(args: InitArgs, settings: &Settings) -> Result<()> {
    cliclack::intro("node-initdb")?;

    let root = absolute(&args.directory);
    confirm_directory(&root, args.yes)?;

    let dir_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let collected = CollectorState::for_project(args.preset, &dir_name, args.yes)
        .run(&mut ClackPrompter)?;
    let metadata = collected
        .metadata
        .context("package.json values were not collected")?;
    let key = collected.key;
    cliclack::log::success(format!("Configuration: {}", key))?;

    let spinner = cliclack::spinner();
    spinner.start("Creating project...");
    let report = match project::scaffold_project(&root, &key, &metadata).await {
        Ok(report) => report,
        Err(e) => {
            spinner.stop("Failed to create project");
            return Err(e.into());
        }
    };
    spinner.stop(format!(
        "Created {} files in {}",
        report.materialized.files().len(),
        root.display()
    ));
    log_changes(&report.materialized)?;

    if args.skip_install || settings.skip_install {
        cliclack::log::info("Skipping dependency installation")?;
    } else {
        install_dependencies(&root, &report.install, settings).await?;
    }

    print_next_steps(&root, &key)?;

    Ok(())
}

/// Add a model, controller and route to the project in `args.directory`
pub async fn run_add(args: AddArgs) -> Result<()> {
    cliclack::intro("node-add")?;

    let root = absolute(&args.directory);

    if !is_identifier(&args.name) {
        cliclack::log::warning(format!(
            "'{}' is not a valid JavaScript identifier; the generated code may not parse",
            args.name
        ))?;
        if !args.yes && !ClackPrompter.confirm("Continue anyway?", false)? {
            anyhow::bail!("Cancelled.");
        }
    }
    if !detect::is_node_project(&root) {
        cliclack::log::warning(format!("No package.json found in {}", root.display()))?;
    }

    let preset = args.preset.or(detect::detect(&root));
    let key = crate::config::resolve_key(preset, &mut ClackPrompter)?;
    cliclack::log::info(format!("Configuration: {}", key))?;

    let report = project::add_module(&root, &key, &args.name, args.force)
        .await
        .with_context(|| format!("Failed to add module '{}' (use --force to overwrite)", args.name))?;
    log_changes(&report)?;

    cliclack::outro(format!(
        "Module '{}' is served at /api/{}",
        args.name, args.name
    ))?;

    Ok(())
}

fn absolute(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(dir)
    }
}

fn confirm_directory(path: &Path, yes: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    if path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!(
                    "Directory has {} existing items; generated files will overwrite them",
                    count
                ))?;

                let confirm = if yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(())
}

fn log_changes(report: &MaterializeReport) -> Result<()> {
    for change in &report.changes {
        cliclack::log::step(change.to_string())?;
    }
    Ok(())
}

async fn install_dependencies(root: &Path, plan: &InstallPlan, settings: &Settings) -> Result<()> {
    if plan.is_empty() {
        return Ok(());
    }

    match check_package_manager(plan.package_manager) {
        Ok(found) => {
            let versions: Vec<String> = found
                .iter()
                .map(|r| format!("{} ({})", r.name, r.version.as_deref().unwrap_or("unknown")))
                .collect();
            cliclack::log::info(format!("Detected: {}", versions.join(", ")))?;
        }
        Err(e) => {
            cliclack::log::warning(format!("{}\nSkipping dependency installation", e))?;
            return Ok(());
        }
    }

    println!();
    for (packages, dev) in plan.batches() {
        println!(
            "{} {}",
            "Running:".dimmed(),
            install_command(plan.package_manager, packages, dev).yellow()
        );
    }
    println!();

    let spinner = cliclack::spinner();
    spinner.start("Installing dependencies...");
    let outcomes = match plan.run(root, settings.install_timeout).await {
        Ok(outcomes) => outcomes,
        Err(e) => {
            spinner.stop("Dependency installation failed");
            cliclack::log::error(format!("{:#}", e))?;
            return Ok(());
        }
    };

    match outcomes.last() {
        None | Some(InstallOutcome::Succeeded { .. }) => spinner.stop("Dependencies installed"),
        Some(InstallOutcome::Failed { .. }) => spinner.stop("Dependency installation failed"),
        Some(InstallOutcome::TimedOut { .. }) => spinner.stop("Dependency installation stopped"),
    }

    for outcome in &outcomes {
        match outcome {
            InstallOutcome::Succeeded { .. } => {
                if let Some(output) = outcome.stdout_tail(STDOUT_TAIL_LINES) {
                    cliclack::log::info(output)?;
                }
            }
            InstallOutcome::Failed { stderr, .. } => {
                cliclack::log::error(format!("{}\n{}", outcome, stderr))?;
            }
            InstallOutcome::TimedOut { .. } => {
                cliclack::log::warning(format!(
                    "{}. Run the commands above manually in {}",
                    outcome,
                    root.display()
                ))?;
            }
        }
    }

    Ok(())
}

fn print_next_steps(root: &Path, key: &ConfigurationKey) -> Result<()> {
    let mut steps = Vec::new();
    if std::env::current_dir().ok().as_deref() != Some(root) {
        steps.push(format!("cd {}", root.display()));
    }
    steps.push("Fill in the values in .env".to_string());
    steps.push(format!("{} run dev", key.package_manager.binary()));

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
