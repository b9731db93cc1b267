use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "showroom")]
#[command(about = "Catalog menu and configurator tooling for dealership sites")]
#[command(version)]
pub struct Cli {
    /// Verbose output (debug logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.showroom)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the catalog grouped into menu categories
    Menu {
        /// Catalog export to read (default: catalog.path from config)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only vehicles whose name contains this text
        #[arg(long)]
        name: Option<String>,

        /// Only vehicles up to this price (in cents)
        #[arg(long)]
        max_price: Option<u64>,

        /// Maximum number of vehicles fetched
        #[arg(short, long)]
        limit: Option<usize>,

        /// Hide empty categories
        #[arg(long)]
        compact: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List menu category rules in evaluation order
    Categories,

    /// Replay configurator events against a model table
    Configure {
        /// Model name (looked up in configurator.models_dir) or table path
        model: String,

        /// Events, separated by ',' or ';' (e.g. "next, select exterior_color=blue, open")
        #[arg(short, long, default_value = "")]
        events: String,

        /// Read events from a file (one per line)
        #[arg(long, conflicts_with = "events")]
        script: Option<PathBuf>,

        /// Stop at the first rejected event
        #[arg(long)]
        strict: bool,

        /// Print JSON snapshots instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check that every reachable selection of a model has images
    Validate {
        /// Model names or table paths (default: every table in models_dir)
        models: Vec<String>,

        /// Treat unused image sets as errors
        #[arg(long)]
        deny_unused: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., catalog.path)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., configurator.models_dir)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}
