//! One-shot command handlers behind the `cardtrack` subcommands.
//!
//! Each handler writes its report to any [`Write`], so the binary passes
//! stdout and tests pass a buffer. Row numbers arrive 1-based, as `list`
//! shows them.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::cli::{
    AddCommand, ConfigCommand, DeleteCommand, OutputFormat, StatusCommand, WishlistCommand,
};
use crate::config::Config;
use crate::dates;
use crate::error::{Error, Field, ListKind, Result};
use crate::render;
use crate::rules::{FiveTwentyFourRule, Summary};
use crate::storage::{self, format, RecordStore};
use crate::validation::{validate_card, validate_wishlist};

/// Print held cards.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn list_cards(out: &mut impl Write, store: &RecordStore, format: OutputFormat) -> Result<()> {
    let cards = &store.document().current;
    match format {
        OutputFormat::Table => render::card_table(out, cards)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(cards)?)?,
    }
    Ok(())
}

/// Validate and append a held card, then save.
///
/// # Errors
///
/// Returns [`Error::InvalidField`] without touching the store if a field is
/// rejected, or the save error if writing fails.
pub fn add_card(out: &mut impl Write, store: &mut RecordStore, cmd: &AddCommand) -> Result<()> {
    let card = validate_card(&cmd.name, &cmd.points, &cmd.date)?.into_record(
        cmd.issuer.as_deref().unwrap_or_default(),
        cmd.benefits.as_deref().unwrap_or_default(),
    );
    let name = card.card_name.clone();

    store.add_card(card);
    store.save()?;
    writeln!(out, "✅ Card added: {name}")?;
    Ok(())
}

/// Delete a held card by row. Without `--yes` only reports what would go.
///
/// # Errors
///
/// Returns [`Error::NoSuchRow`] for a row that does not exist, or the save
/// error if writing fails.
pub fn delete_card(
    out: &mut impl Write,
    store: &mut RecordStore,
    cmd: &DeleteCommand,
) -> Result<()> {
    let index = store.document().row_index(ListKind::Current, cmd.row)?;

    if !cmd.yes {
        let card = store.document().card(index)?;
        writeln!(
            out,
            "Would delete row {}: '{}' ({} points, opened {}).",
            cmd.row, card.card_name, card.welcome_points, card.opened_date
        )?;
        writeln!(out, "Use --yes to confirm.")?;
        return Ok(());
    }

    let removed = store.remove_card(index)?;
    store.save()?;
    writeln!(out, "✅ Card '{}' deleted.", removed.card_name)?;
    Ok(())
}

/// Run a wishlist subcommand.
///
/// # Errors
///
/// Returns validation, row and save errors as [`add_card`] and
/// [`delete_card`] do.
pub fn wishlist(out: &mut impl Write, store: &mut RecordStore, cmd: &WishlistCommand) -> Result<()> {
    match cmd {
        WishlistCommand::List(list) => {
            let wishlist = &store.document().wishlist;
            match list.format {
                OutputFormat::Table => render::wishlist_table(out, wishlist)?,
                OutputFormat::Json => {
                    writeln!(out, "{}", serde_json::to_string_pretty(wishlist)?)?;
                }
            }
        }
        WishlistCommand::Add {
            name,
            issuer,
            points,
            notes,
        } => {
            let entry = validate_wishlist(name, points.as_deref().unwrap_or_default())?
                .into_record(
                    issuer.as_deref().unwrap_or_default(),
                    notes.as_deref().unwrap_or_default(),
                );
            let name = entry.card_name.clone();
            store.add_wishlist(entry);
            store.save()?;
            writeln!(out, "✅ Added to wishlist: {name}")?;
        }
        WishlistCommand::Delete(delete) => {
            let index = store.document().row_index(ListKind::Wishlist, delete.row)?;
            if !delete.yes {
                let entry = store.document().wish(index)?;
                writeln!(
                    out,
                    "Would delete wishlist row {}: '{}'.",
                    delete.row, entry.card_name
                )?;
                writeln!(out, "Use --yes to confirm.")?;
                return Ok(());
            }
            let removed = store.remove_wishlist(index)?;
            store.save()?;
            writeln!(out, "✅ Removed from wishlist: {}", removed.card_name)?;
        }
    }
    Ok(())
}

/// Print the status figures, as of `--today` or `today`.
///
/// # Errors
///
/// Returns [`Error::InvalidField`] if `--today` is not a valid date.
pub fn status(
    out: &mut impl Write,
    store: &RecordStore,
    rule: &FiveTwentyFourRule,
    cmd: &StatusCommand,
    today: NaiveDate,
) -> Result<()> {
    let as_of = match &cmd.today {
        Some(text) => dates::parse_date(text).ok_or_else(|| {
            Error::invalid_field(
                Field::StatusDate,
                format!("'{}' is not a valid date (use YYYY-MM-DD)", text.trim()),
            )
        })?,
        None => today,
    };

    let summary = Summary::compute(store.document(), rule, as_of);
    if cmd.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        render::summary(out, &summary)?;
    }
    Ok(())
}

/// Write the document in the current layout, to `output` or to `out`.
///
/// # Errors
///
/// Returns the save error if `output` cannot be written.
pub fn export(out: &mut impl Write, store: &RecordStore, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            storage::save(path, store.document())?;
            writeln!(out, "Exported to {}", path.display())?;
        }
        None => write!(out, "{}", format::encode(store.document())?)?,
    }
    Ok(())
}

/// Run a configuration subcommand.
///
/// Configuration is loaded here rather than up front, so `validate` can
/// report a broken file instead of failing before it runs.
///
/// # Errors
///
/// Returns an error if `show` cannot load the configuration or the output
/// cannot be written.
pub fn config(
    out: &mut impl Write,
    config_path: Option<PathBuf>,
    cmd: &ConfigCommand,
) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
            } else {
                writeln!(out, "Current Configuration")?;
                writeln!(out, "=====================")?;
                writeln!(out)?;
                writeln!(out, "[Storage]")?;
                writeln!(out, "  Data path:          {}", config.data_path().display())?;
                writeln!(out)?;
                writeln!(out, "[Rules]")?;
                writeln!(out, "  Issuer keyword:     {}", config.rules.issuer_keyword)?;
                writeln!(out, "  Window (days):      {}", config.rules.window_days)?;
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            writeln!(out, "{}", path.display())?;
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .clone()
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            writeln!(out, "Validating configuration: {}", path.display())?;
            match Config::load_from(Some(path)) {
                Ok(_) => writeln!(out, "Configuration is valid.")?,
                Err(e) => writeln!(out, "Configuration error: {e}")?,
            }
        }
    }
    Ok(())
}
