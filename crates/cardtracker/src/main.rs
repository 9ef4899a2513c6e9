//! `cardtrack` - CLI for cardtracker
//!
//! This binary provides the command-line interface for recording welcome
//! bonuses, managing the wishlist, and checking 5/24 status.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;
use std::path::Path;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;

use cardtracker::cli::{Cli, Command};
use cardtracker::{actions, init_logging, Config, Menu, RecordStore};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let command = cli.command.unwrap_or(Command::Menu);
    let mut out = io::stdout();

    // Config commands load the file themselves so they can report on it
    if let Command::Config(cmd) = &command {
        actions::config(&mut out, cli.config, cmd)?;
        return Ok(());
    }

    let config = Config::load_from(cli.config).context("loading configuration")?;
    let data_path = cli.data.unwrap_or_else(|| config.data_path());

    match command {
        Command::Menu => handle_menu(&config, &data_path)?,
        Command::List(cmd) => {
            actions::list_cards(&mut out, &RecordStore::open(&data_path), cmd.format)?;
        }
        Command::Add(cmd) => actions::add_card(&mut out, &mut RecordStore::open(&data_path), &cmd)?,
        Command::Delete(cmd) => {
            actions::delete_card(&mut out, &mut RecordStore::open(&data_path), &cmd)?;
        }
        Command::Wishlist(cmd) => {
            actions::wishlist(&mut out, &mut RecordStore::open(&data_path), &cmd)?;
        }
        Command::Status(cmd) => actions::status(
            &mut out,
            &RecordStore::open(&data_path),
            &config.five_24_rule(),
            &cmd,
            today(),
        )?,
        Command::Export(cmd) => actions::export(
            &mut out,
            &RecordStore::open(&data_path),
            cmd.output.as_deref(),
        )
        .with_context(|| format!("exporting {}", data_path.display()))?,
        // Handled above
        Command::Config(_) => {}
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn handle_menu(config: &Config, data_path: &Path) -> anyhow::Result<()> {
    let mut store = RecordStore::open(data_path);
    let stdin = io::stdin();
    let exit = Menu::new(
        &mut store,
        config.five_24_rule(),
        today(),
        stdin.lock(),
        io::stdout(),
    )
    .run()?;
    tracing::debug!("Menu exited: {:?}", exit);
    Ok(())
}
