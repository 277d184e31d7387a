//! The configure command: resolve, run the build tool, update .clangd

use std::path::{Path, PathBuf};
use std::process::Command;

use ccdb_content::{ClangdFile, PatchAction};
use ccdb_fs::NormalizedPath;
use ccdb_presets::{PresetResolver, PresetSelection, PresetSet, ResolvedConfiguration};
use colored::Colorize;

use crate::commands::open_project;
use crate::error::{CliError, Result};
use crate::interactive;
use crate::session::ConfigureSession;
use crate::settings::SettingsResolver;

/// Options for one configure run, as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigureOptions {
    pub preset: Option<String>,
    pub no_preset: bool,
    pub source_dir: Option<PathBuf>,
    pub build_dir: Option<String>,
    pub interactive: bool,
    pub dry_run: bool,
    pub extra_flags: Vec<String>,
}

/// What a configure run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureReport {
    pub resolved: ResolvedConfiguration,
    pub clangd_path: NormalizedPath,
    /// `None` on a dry run.
    pub action: Option<PatchAction>,
}

/// Configure the project containing `cwd`.
///
/// The session's remembered extra flags are used when none are given, and
/// are updated once the build tool succeeds.
pub fn run_configure(
    cwd: &Path,
    resolver: &SettingsResolver,
    session: &mut ConfigureSession,
    options: &ConfigureOptions,
) -> Result<ConfigureReport> {
    let project = open_project(cwd, resolver, options.source_dir.as_deref())?;
    let settings = &project.settings;
    let presets = PresetSet::load_project(&project.root)?;

    let selection = choose_preset(&presets, options)?;
    let extra_flags = choose_extra_flags(session, &settings.extra_flags, options)?;

    let default_binary_dir = match &options.build_dir {
        Some(dir) if Path::new(dir).is_absolute() => NormalizedPath::new(dir).as_dir_string(),
        Some(dir) => project.root.join(dir).as_dir_string(),
        None => settings.default_binary_dir(&project.root),
    };

    let resolved = PresetResolver::new(&presets).resolve(
        &selection,
        project.root.as_str(),
        &default_binary_dir,
        &extra_flags,
    )?;

    let args = resolved.command_args();
    println!(
        "{} {}",
        "Configuring:".bold(),
        format_command(&settings.cmake_program, &args).cyan()
    );

    let clangd_dir = ccdb_fs::locate_optional(&settings.clangd_file, project.root.to_native())?
        .unwrap_or_else(|| project.root.clone());
    let clangd = ClangdFile::new(clangd_dir.join(&settings.clangd_file));

    if options.dry_run {
        println!(
            "{} set CompilationDatabase in {} to {}",
            "Would".yellow(),
            clangd.path(),
            resolved.binary_dir
        );
        return Ok(ConfigureReport {
            resolved,
            clangd_path: clangd.path().clone(),
            action: None,
        });
    }

    run_build_tool(&settings.cmake_program, &args)?;
    session.remember(&resolved.extra_flags);

    let patched = clangd.set_compilation_database(&resolved.binary_dir)?;
    let verb = match patched.action {
        PatchAction::Unchanged => "Unchanged",
        PatchAction::Created => "Created",
        _ => "Updated",
    };
    println!(
        "{} {} {} {}",
        verb.green().bold(),
        clangd.path(),
        "->".dimmed(),
        resolved.binary_dir
    );

    Ok(ConfigureReport {
        resolved,
        clangd_path: clangd.path().clone(),
        action: Some(patched.action),
    })
}

fn choose_preset(presets: &PresetSet, options: &ConfigureOptions) -> Result<PresetSelection> {
    if let Some(name) = &options.preset {
        return Ok(PresetSelection::Named(name.clone()));
    }
    if options.no_preset || presets.visible().next().is_none() {
        return Ok(PresetSelection::NoPreset);
    }
    if options.interactive {
        return interactive::select_preset(presets);
    }
    Ok(PresetSelection::NoPreset)
}

fn choose_extra_flags(
    session: &ConfigureSession,
    configured: &[String],
    options: &ConfigureOptions,
) -> Result<Vec<String>> {
    if !options.extra_flags.is_empty() {
        return Ok(options.extra_flags.clone());
    }
    let default = session.last_extra_flags().unwrap_or(configured);
    if options.interactive {
        return interactive::prompt_extra_flags(default);
    }
    Ok(default.to_vec())
}

fn run_build_tool(program: &str, args: &[String]) -> Result<()> {
    tracing::debug!(program, ?args, "Running build tool");
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| CliError::user(format!("Failed to run {}: {}", program, e)))?;

    if !status.success() {
        return Err(CliError::CommandFailed {
            program: program.to_string(),
            status: status
                .code()
                .map_or_else(|| "a signal".to_string(), |code| format!("status {}", code)),
        });
    }
    Ok(())
}

/// Render a command line for display, quoting arguments with spaces.
fn format_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(|part| {
            if part.contains(char::is_whitespace) {
                format!("\"{}\"", part)
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
