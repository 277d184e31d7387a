//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// ccdb - Configure a CMake build tree and point clangd at its compilation database
#[derive(Parser, Debug)]
#[command(name = "ccdb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the global config.toml
    #[arg(long, global = true, env = "CCDB_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Configure the project and record the compilation database location
    ///
    /// Resolves the binary directory from the chosen preset, runs the build
    /// tool with compile-command export enabled, then writes the directory
    /// into the nearest .clangd.
    ///
    /// Examples:
    ///   ccdb configure --preset dev
    ///   ccdb configure --no-preset --build-dir out
    ///   ccdb configure -p dev -- -GNinja -DFOO=ON
    ///   ccdb configure --interactive
    Configure {
        /// Preset to configure with
        #[arg(short, long, conflicts_with = "no_preset")]
        preset: Option<String>,

        /// Configure without a preset, using the default build directory
        #[arg(long)]
        no_preset: bool,

        /// Project root (default: nearest directory with the project marker)
        #[arg(short = 'S', long)]
        source_dir: Option<PathBuf>,

        /// Build directory used when no preset provides one
        #[arg(short = 'B', long)]
        build_dir: Option<String>,

        /// Prompt for the preset and extra flags
        #[arg(short, long)]
        interactive: bool,

        /// Print the command and the .clangd change without applying them
        #[arg(long)]
        dry_run: bool,

        /// Extra flags passed to the build tool
        #[arg(last = true)]
        extra_flags: Vec<String>,
    },

    /// Show the compilation database location stored in .clangd
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List selectable presets and the binary directory each resolves to
    Presets {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        shell: Shell,
    },
}
