//! Input validation for new records.
//!
//! Front-ends pass raw text straight from the user; nothing is appended to a
//! [`Document`](crate::Document) until it has been through here.

use chrono::NaiveDate;

use crate::dates;
use crate::error::{Error, Field, Result};
use crate::record::{CardRecord, WishlistRecord};

/// A card name, point count and opened date that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCard {
    /// Trimmed, non-empty card name.
    pub card_name: String,
    /// Positive welcome bonus.
    pub welcome_points: u64,
    /// Real calendar date the card was opened.
    pub opened_date: NaiveDate,
}

impl ValidCard {
    /// Build the record, attaching the optional fields.
    #[must_use]
    pub fn into_record(self, issuer: &str, benefits: &str) -> CardRecord {
        CardRecord::new(self.card_name, self.welcome_points, self.opened_date)
            .with_issuer(issuer)
            .with_benefits(benefits)
    }
}

/// A wishlist name and target that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidWish {
    /// Trimmed, non-empty card name.
    pub card_name: String,
    /// Non-negative target points.
    pub target_points: u64,
}

impl ValidWish {
    /// Build the record, attaching the optional fields.
    #[must_use]
    pub fn into_record(self, issuer: &str, notes: &str) -> WishlistRecord {
        WishlistRecord::new(self.card_name, self.target_points)
            .with_issuer(issuer)
            .with_notes(notes)
    }
}

/// Validate the required fields of a new card.
///
/// # Errors
///
/// Returns [`Error::InvalidField`] naming the first field that fails: an
/// empty name, points that are not a positive integer, or a date that is not
/// a real calendar date in one of [`dates::ACCEPTED_FORMATS`].
pub fn validate_card(name: &str, points: &str, date: &str) -> Result<ValidCard> {
    let card_name = validate_name(name)?;
    let welcome_points = validate_card_points(points)?;
    let opened_date = validate_opened_date(date)?;
    Ok(ValidCard {
        card_name,
        welcome_points,
        opened_date,
    })
}

/// Validate the required fields of a wishlist entry.
///
/// Blank target points count as zero.
///
/// # Errors
///
/// Returns [`Error::InvalidField`] for an empty name or target points that
/// are not a non-negative integer.
pub fn validate_wishlist(name: &str, target_points: &str) -> Result<ValidWish> {
    let card_name = validate_name(name)?;
    let target_points = validate_target_points(target_points)?;
    Ok(ValidWish {
        card_name,
        target_points,
    })
}

/// Check a card name.
///
/// # Errors
///
/// Returns [`Error::InvalidField`] if the name is empty after trimming.
pub fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::invalid_field(Field::CardName, "cannot be empty"));
    }
    Ok(name.to_string())
}

/// Check welcome points.
///
/// # Errors
///
/// Returns [`Error::InvalidField`] unless the input is an integer above zero.
pub fn validate_card_points(points: &str) -> Result<u64> {
    match points.trim().parse::<i64>() {
        Ok(n) if n > 0 => u64::try_from(n)
            .map_err(|_| Error::invalid_field(Field::Points, "must be a positive integer")),
        _ => Err(Error::invalid_field(
            Field::Points,
            format!("must be a positive integer, got '{}'", points.trim()),
        )),
    }
}

/// Check wishlist target points.
///
/// # Errors
///
/// Returns [`Error::InvalidField`] unless the input is blank or an integer of
/// zero or more.
pub fn validate_target_points(points: &str) -> Result<u64> {
    let points = points.trim();
    if points.is_empty() {
        return Ok(0);
    }
    points.parse::<u64>().map_err(|_| {
        Error::invalid_field(
            Field::TargetPoints,
            format!("must be a non-negative integer, got '{points}'"),
        )
    })
}

/// Check an opened date.
///
/// # Errors
///
/// Returns [`Error::InvalidField`] unless the input parses as a real date.
pub fn validate_opened_date(date: &str) -> Result<NaiveDate> {
    dates::parse_date(date).ok_or_else(|| {
        Error::invalid_field(
            Field::OpenedDate,
            format!(
                "'{}' is not a valid date (use YYYY-MM-DD, e.g. 2025-11-28)",
                date.trim()
            ),
        )
    })
}
