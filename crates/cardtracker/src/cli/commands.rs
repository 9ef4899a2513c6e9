//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands. Field values
//! are taken as text and validated by the library, so a bad value gets the
//! same message here as in the interactive menu.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Card name (e.g. "Chase Sapphire Preferred")
    #[arg(short, long)]
    pub name: String,

    /// Welcome bonus points (positive integer)
    #[arg(short, long, allow_hyphen_values = true)]
    pub points: String,

    /// Date opened (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Issuing bank
    #[arg(short, long)]
    pub issuer: Option<String>,

    /// Notes on card benefits
    #[arg(short, long)]
    pub benefits: Option<String>,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Row number as shown by `list`
    pub row: usize,

    /// Delete without asking
    #[arg(short, long)]
    pub yes: bool,
}

/// Wishlist commands.
#[derive(Debug, Subcommand)]
pub enum WishlistCommand {
    /// List wishlist entries
    List(ListCommand),

    /// Add a wishlist entry
    Add {
        /// Card name
        #[arg(short, long)]
        name: String,

        /// Issuing bank
        #[arg(short, long)]
        issuer: Option<String>,

        /// Target bonus points
        #[arg(short, long, allow_hyphen_values = true)]
        points: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a wishlist entry by its row number
    Delete(DeleteCommand),
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Evaluate as of this date instead of today
    #[arg(long, value_name = "DATE")]
    pub today: Option<String>,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}
