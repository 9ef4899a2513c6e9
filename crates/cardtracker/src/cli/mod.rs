//! Command-line interface for cardtracker.
//!
//! This module provides the CLI structure for the `cardtrack` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, ExportCommand, ListCommand, OutputFormat,
    StatusCommand, WishlistCommand,
};

/// cardtrack - Keep track of credit-card welcome bonuses
///
/// Records the cards you have opened and the bonuses they paid, keeps a
/// wishlist of cards to apply for, and shows your 5/24 count.
#[derive(Debug, Parser)]
#[command(name = "cardtrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the data file (overrides the configured one)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute (defaults to the interactive menu)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive numbered menu
    Menu,

    /// List held cards
    List(ListCommand),

    /// Add a held card
    Add(AddCommand),

    /// Delete a held card by its row number
    Delete(DeleteCommand),

    /// Manage the wishlist
    #[command(subcommand)]
    Wishlist(WishlistCommand),

    /// Show point totals and the 5/24 count
    Status(StatusCommand),

    /// Write all records as JSON
    Export(ExportCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
