//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod promos;
pub mod session;

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show items in this category (e.g. fruits, dairy).
    #[arg(short = 'C', long)]
    pub category: Option<String>,

    /// Case-insensitive name search.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Show the home screen's smart list and express strip.
    #[arg(long, conflicts_with_all = ["category", "search"])]
    pub featured: bool,
}

/// Arguments for the promos command.
#[derive(Args)]
pub struct PromosArgs {
    /// Check whether a single code is accepted.
    #[arg(long)]
    pub check: Option<String>,
}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    /// Script file with one action per line. Prompts interactively if omitted.
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Skip checkout gateway delays.
    #[arg(long)]
    pub fast: bool,

    /// Stop at the first failing script line.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Catalog file to reference.
        #[arg(long, default_value = "catalog.toml")]
        catalog: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config and its catalog.
    Validate,
}
