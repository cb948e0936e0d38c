//! node-initdb - Scaffold a Node.js API project

use anyhow::Result;
use clap::Parser;
use initdb_core::config::{normalize_args, AxisFlags, Settings};
use initdb_core::tui::InitArgs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "node-initdb")]
#[command(about = "Scaffold a Node.js API project (Express, Fastify or Elysia on MongoDB or SQL)")]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub axes: AxisFlags,

    /// Use default package.json values
    #[arg(short, long)]
    pub yes: bool,

    /// Project directory
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Write the project without installing dependencies
    #[arg(long = "skip-install")]
    pub skip_install: bool,
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

    // Conflicting flags fail here, before any prompt or filesystem write
    let preset = args.axes.resolve()?;

    let init_args = InitArgs {
        preset,
        directory: args.directory,
        yes: args.yes,
        skip_install: args.skip_install,
    };
    let result = initdb_core::run_init(init_args, &Settings::from_env()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
