//! The show command: read the stored compilation database directory

use std::path::Path;

use ccdb_content::ClangdFile;
use ccdb_fs::NormalizedPath;
use colored::Colorize;
use serde::Serialize;

use crate::commands::open_project;
use crate::error::Result;
use crate::settings::SettingsResolver;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowReport {
    pub path: NormalizedPath,
    pub compilation_database: String,
}

/// Read `CompileFlags.CompilationDatabase` from the nearest `.clangd`.
///
/// Project settings apply when `cwd` is inside a project; otherwise only
/// the global layer is used.
pub fn show_database(cwd: &Path, resolver: &SettingsResolver) -> Result<ShowReport> {
    let settings = match open_project(cwd, resolver, None) {
        Ok(project) => project.settings,
        Err(crate::error::CliError::Fs(e)) if e.is_marker_not_found() => resolver.resolve(None)?,
        Err(e) => return Err(e),
    };

    let dir = ccdb_fs::locate(&settings.clangd_file, cwd)?;
    let clangd = ClangdFile::new(dir.join(&settings.clangd_file));
    let compilation_database = clangd.compilation_database()?;

    Ok(ShowReport {
        path: clangd.path().clone(),
        compilation_database,
    })
}

pub fn run_show(cwd: &Path, resolver: &SettingsResolver, json: bool) -> Result<()> {
    let report = show_database(cwd, resolver)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
        return Ok(());
    }

    println!("{} {}", "File:".bold(), report.path);
    println!("{} {}", "CompilationDatabase:".bold(), report.compilation_database.green());
    Ok(())
}
