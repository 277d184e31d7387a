//! ccdb CLI
//!
//! Configures a CMake project from its presets and records the resulting
//! build directory in `.clangd` so the language server finds
//! `compile_commands.json`.

mod cli;
mod commands;
mod error;
mod interactive;
mod session;
mod settings;

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use commands::ConfigureOptions;
use error::Result;
use session::ConfigureSession;
use settings::SettingsResolver;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Verbose mode enabled");
        }
    }

    let resolver = settings_resolver(cli.config_dir);

    match cli.command {
        Some(cmd) => execute_command(cmd, &resolver),
        None => {
            println!(
                "{} Configure CMake and point clangd at the compilation database",
                "ccdb".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "ccdb --help".cyan());
            Ok(())
        }
    }
}

fn settings_resolver(config_dir: Option<PathBuf>) -> SettingsResolver {
    match config_dir {
        Some(dir) => SettingsResolver::with_global_config_dir(dir),
        None => SettingsResolver::new(),
    }
}

fn execute_command(cmd: Commands, resolver: &SettingsResolver) -> Result<()> {
    match cmd {
        Commands::Configure {
            preset,
            no_preset,
            source_dir,
            build_dir,
            interactive,
            dry_run,
            extra_flags,
        } => {
            let options = ConfigureOptions {
                preset,
                no_preset,
                source_dir,
                build_dir,
                interactive,
                dry_run,
                extra_flags,
            };
            cmd_configure(&options, resolver)
        }
        Commands::Show { json } => cmd_show(json, resolver),
        Commands::Presets { json } => cmd_presets(json, resolver),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "ccdb", &mut io::stdout());
            Ok(())
        }
    }
}

fn cmd_configure(options: &ConfigureOptions, resolver: &SettingsResolver) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let mut session = ConfigureSession::new();
    let report = commands::run_configure(&cwd, resolver, &mut session, options)?;
    tracing::debug!(
        binary_dir = %report.resolved.binary_dir,
        clangd = %report.clangd_path,
        action = ?report.action,
        "Configure finished"
    );
    Ok(())
}

fn cmd_show(json: bool, resolver: &SettingsResolver) -> Result<()> {
    let cwd = std::env::current_dir()?;
    commands::run_show(&cwd, resolver, json)
}

fn cmd_presets(json: bool, resolver: &SettingsResolver) -> Result<()> {
    let cwd = std::env::current_dir()?;
    commands::run_presets(&cwd, resolver, json)
}
