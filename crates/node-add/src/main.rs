//! node-add - Add a resource module to a node-initdb project

use anyhow::Result;
use clap::Parser;
use initdb_core::config::{normalize_args, AxisFlags};
use initdb_core::tui::AddArgs;
use initdb_core::ScaffoldError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "node-add")]
#[command(about = "Add a model, controller and route to a project created by node-initdb")]
#[command(version)]
pub struct Args {
    /// Resource name, e.g. `user` for Models/user.Model.js
    pub module_name: Option<String>,

    #[command(flatten)]
    pub axes: AxisFlags,

    /// Add the module even when its name is not a valid JavaScript identifier
    #[arg(short, long)]
    pub yes: bool,

    /// Project directory
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Overwrite existing module files
    #[arg(long)]
    pub force: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse_from(normalize_args(std::env::args_os()));

    let name = match args.module_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(ScaffoldError::MissingModuleName.into()),
    };
    let preset = args.axes.resolve()?;

    let add_args = AddArgs {
        preset,
        name,
        directory: args.directory,
        force: args.force,
        yes: args.yes,
    };
    let result = initdb_core::run_add(add_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
