//! Core record types for cardtracker.
//!
//! This module defines the cards a user holds, the cards they want, and the
//! [`Document`] that groups both lists in memory.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::error::{Error, ListKind, Result};

/// Issuer recorded when none is given.
pub const DEFAULT_ISSUER: &str = "Unknown";

/// A card the user has opened, with its welcome bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Display name of the card (e.g. "Chase Sapphire Preferred").
    #[serde(default, deserialize_with = "lenient::text")]
    pub card_name: String,

    /// Issuing bank.
    #[serde(default = "default_issuer", deserialize_with = "lenient::issuer")]
    pub issuer: String,

    /// Welcome bonus points earned.
    #[serde(default, deserialize_with = "lenient::points")]
    pub welcome_points: u64,

    /// Date the account was opened. ISO for new records; older files may
    /// carry other layouts, see [`dates::ACCEPTED_FORMATS`].
    #[serde(default, deserialize_with = "lenient::text")]
    pub opened_date: String,

    /// Free-form notes about card benefits.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_text"
    )]
    pub benefits: Option<String>,
}

impl CardRecord {
    /// Create a record from already-validated parts.
    #[must_use]
    pub fn new(card_name: impl Into<String>, welcome_points: u64, opened_date: NaiveDate) -> Self {
        Self {
            card_name: card_name.into(),
            issuer: DEFAULT_ISSUER.to_string(),
            welcome_points,
            opened_date: dates::to_iso(opened_date),
            benefits: None,
        }
    }

    /// Set the issuer; blank input keeps the default.
    #[must_use]
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.issuer = normalize_issuer(issuer);
        self
    }

    /// Set the benefits note; blank input clears it.
    #[must_use]
    pub fn with_benefits(mut self, benefits: &str) -> Self {
        self.benefits = normalize_note(benefits);
        self
    }

    /// The opened date, if it parses in any accepted layout.
    #[must_use]
    pub fn opened_on(&self) -> Option<NaiveDate> {
        dates::parse_date(&self.opened_date)
    }

    /// Case-insensitive substring match on the issuer.
    #[must_use]
    pub fn issuer_contains(&self, keyword: &str) -> bool {
        self.issuer
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }
}

/// A card the user intends to apply for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistRecord {
    /// Display name of the card.
    #[serde(default, deserialize_with = "lenient::text")]
    pub card_name: String,

    /// Issuing bank.
    #[serde(default = "default_issuer", deserialize_with = "lenient::issuer")]
    pub issuer: String,

    /// Points the user hopes to earn from the offer.
    #[serde(default, deserialize_with = "lenient::points")]
    pub target_points: u64,

    /// Free-form notes.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_text"
    )]
    pub notes: Option<String>,
}

impl WishlistRecord {
    /// Create a wishlist entry from already-validated parts.
    #[must_use]
    pub fn new(card_name: impl Into<String>, target_points: u64) -> Self {
        Self {
            card_name: card_name.into(),
            issuer: DEFAULT_ISSUER.to_string(),
            target_points,
            notes: None,
        }
    }

    /// Set the issuer; blank input keeps the default.
    #[must_use]
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.issuer = normalize_issuer(issuer);
        self
    }

    /// Set the notes; blank input clears them.
    #[must_use]
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = normalize_note(notes);
        self
    }
}

/// The in-memory record set: held cards and the wishlist.
///
/// Whatever layout the data file used, a loaded document always has this
/// two-list shape. It is also the shape written back on save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Cards currently held.
    #[serde(default)]
    pub current: Vec<CardRecord>,
    /// Cards the user wants.
    #[serde(default)]
    pub wishlist: Vec<WishlistRecord>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a held card.
    pub fn add_card(&mut self, card: CardRecord) {
        self.current.push(card);
    }

    /// Append a wishlist entry.
    pub fn add_wishlist(&mut self, entry: WishlistRecord) {
        self.wishlist.push(entry);
    }

    /// The zero-based index of a 1-based row number in `list`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchRow`] for row 0 or a row past the end.
    pub fn row_index(&self, list: ListKind, row: usize) -> Result<usize> {
        let len = match list {
            ListKind::Current => self.current.len(),
            ListKind::Wishlist => self.wishlist.len(),
        };
        row.checked_sub(1)
            .filter(|index| *index < len)
            .ok_or(Error::NoSuchRow { list, row, len })
    }

    /// The held card at a zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is past the end.
    pub fn card(&self, index: usize) -> Result<&CardRecord> {
        self.current.get(index).ok_or(Error::IndexOutOfRange {
            list: ListKind::Current,
            index,
            len: self.current.len(),
        })
    }

    /// The wishlist entry at a zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is past the end.
    pub fn wish(&self, index: usize) -> Result<&WishlistRecord> {
        self.wishlist.get(index).ok_or(Error::IndexOutOfRange {
            list: ListKind::Wishlist,
            index,
            len: self.wishlist.len(),
        })
    }

    /// Remove the held card at a zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] and leaves the list untouched if
    /// `index` is past the end.
    pub fn remove_card(&mut self, index: usize) -> Result<CardRecord> {
        self.card(index)?;
        Ok(self.current.remove(index))
    }

    /// Remove the wishlist entry at a zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] and leaves the list untouched if
    /// `index` is past the end.
    pub fn remove_wishlist(&mut self, index: usize) -> Result<WishlistRecord> {
        self.wish(index)?;
        Ok(self.wishlist.remove(index))
    }
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

/// Trimmed issuer, or the default when blank.
#[must_use]
pub fn normalize_issuer(issuer: &str) -> String {
    let issuer = issuer.trim();
    if issuer.is_empty() {
        default_issuer()
    } else {
        issuer.to_string()
    }
}

/// Trimmed note, or `None` when blank.
#[must_use]
pub fn normalize_note(note: &str) -> Option<String> {
    let note = note.trim();
    (!note.is_empty()).then(|| note.to_string())
}

/// Field deserializers that coerce odd values instead of failing.
///
/// Data files are hand-edited and come from older versions of the tool, so a
/// single bad field must not make the whole file unreadable.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn value_to_text(value: Value) -> String {
        match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
        }
    }

    pub(super) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(value_to_text)
    }

    pub(super) fn issuer<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        text(deserializer).map(|s| super::normalize_issuer(&s))
    }

    pub(super) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        text(deserializer).map(|s| super::normalize_note(&s))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(super) fn points<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let points = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_u64().unwrap_or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map_or(0, |f| f as u64)
            }),
            Value::String(s) => s.trim().parse().unwrap_or(0),
            _ => 0,
        };
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_card_new_defaults() {
        let card = CardRecord::new("Sapphire Preferred", 60_000, ymd(2025, 1, 5));
        assert_eq!(card.issuer, DEFAULT_ISSUER);
        assert_eq!(card.opened_date, "2025-01-05");
        assert!(card.benefits.is_none());
    }

    #[test]
    fn test_card_builders_trim_and_default() {
        let card = CardRecord::new("Gold", 90_000, ymd(2025, 1, 5))
            .with_issuer("  American Express ")
            .with_benefits("   ");
        assert_eq!(card.issuer, "American Express");
        assert!(card.benefits.is_none());

        let card = card.with_issuer("").with_benefits(" 4x dining ");
        assert_eq!(card.issuer, DEFAULT_ISSUER);
        assert_eq!(card.benefits.as_deref(), Some("4x dining"));
    }

    #[test]
    fn test_opened_on_accepts_legacy_layout() {
        let mut card = CardRecord::new("Freedom", 20_000, ymd(2024, 6, 1));
        card.opened_date = "06/01/2024".to_string();
        assert_eq!(card.opened_on(), Some(ymd(2024, 6, 1)));

        card.opened_date = "someday".to_string();
        assert_eq!(card.opened_on(), None);
    }

    #[test]
    fn test_issuer_contains_is_case_insensitive() {
        let card = CardRecord::new("Ink", 90_000, ymd(2024, 6, 1)).with_issuer("JPMorgan CHASE Bank");
        assert!(card.issuer_contains("chase"));
        assert!(!card.issuer_contains("citi"));
    }

    #[test]
    fn test_deserialize_missing_fields_default() {
        let card: CardRecord = serde_json::from_str(r#"{"card_name": "Venture"}"#).unwrap();
        assert_eq!(card.card_name, "Venture");
        assert_eq!(card.issuer, DEFAULT_ISSUER);
        assert_eq!(card.welcome_points, 0);
        assert_eq!(card.opened_date, "");
        assert!(card.benefits.is_none());
    }

    #[test]
    fn test_deserialize_coerces_odd_values() {
        let card: CardRecord = serde_json::from_str(
            r#"{"card_name": null, "issuer": "  ", "welcome_points": "75000",
                "opened_date": "2024-01-02", "benefits": null, "extra": [1, 2]}"#,
        )
        .unwrap();
        assert_eq!(card.card_name, "");
        assert_eq!(card.issuer, DEFAULT_ISSUER);
        assert_eq!(card.welcome_points, 75_000);

        let card: CardRecord =
            serde_json::from_str(r#"{"card_name": "X", "welcome_points": -5}"#).unwrap();
        assert_eq!(card.welcome_points, 0);

        let card: CardRecord =
            serde_json::from_str(r#"{"card_name": "X", "welcome_points": 1500.9}"#).unwrap();
        assert_eq!(card.welcome_points, 1500);

        let card: CardRecord =
            serde_json::from_str(r#"{"card_name": "X", "welcome_points": "lots"}"#).unwrap();
        assert_eq!(card.welcome_points, 0);
    }

    #[test]
    fn test_serialize_omits_absent_benefits() {
        let card = CardRecord::new("Venture X", 75_000, ymd(2024, 2, 1)).with_issuer("Capital One");
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"issuer\":\"Capital One\""));
        assert!(!json.contains("benefits"));
    }

    #[test]
    fn test_wishlist_deserialize_defaults() {
        let entry: WishlistRecord =
            serde_json::from_str(r#"{"card_name": "Aeroplan", "target_points": 70000}"#).unwrap();
        assert_eq!(entry.issuer, DEFAULT_ISSUER);
        assert_eq!(entry.target_points, 70_000);
        assert!(entry.notes.is_none());
    }

    #[test]
    fn test_document_add_and_remove() {
        let mut doc = Document::new();
        assert_eq!(doc, Document::default());

        doc.add_card(CardRecord::new("A", 1_000, ymd(2024, 1, 1)));
        doc.add_card(CardRecord::new("B", 2_000, ymd(2024, 1, 2)));
        doc.add_wishlist(WishlistRecord::new("C", 3_000));
        assert_eq!((doc.current.len(), doc.wishlist.len()), (2, 1));

        let removed = doc.remove_card(0).unwrap();
        assert_eq!(removed.card_name, "A");
        assert_eq!(doc.current.len(), 1);
        assert_eq!(doc.current[0].card_name, "B");

        let removed = doc.remove_wishlist(0).unwrap();
        assert_eq!(removed.card_name, "C");
        assert!(doc.wishlist.is_empty());
    }

    #[test]
    fn test_document_remove_out_of_range_leaves_list() {
        let mut doc = Document::new();
        doc.add_card(CardRecord::new("A", 1_000, ymd(2024, 1, 1)));

        let err = doc.remove_card(1).unwrap_err();
        assert!(matches!(
            err,
            Error::IndexOutOfRange {
                list: ListKind::Current,
                index: 1,
                len: 1
            }
        ));
        assert_eq!(doc.current.len(), 1);

        assert!(matches!(
            doc.remove_wishlist(0),
            Err(Error::IndexOutOfRange {
                list: ListKind::Wishlist,
                ..
            })
        ));
    }

    #[test]
    fn test_row_index_is_one_based() {
        let mut doc = Document::new();
        doc.add_card(CardRecord::new("A", 1_000, ymd(2024, 1, 1)));
        doc.add_card(CardRecord::new("B", 2_000, ymd(2024, 1, 2)));

        assert_eq!(doc.row_index(ListKind::Current, 1).unwrap(), 0);
        assert_eq!(doc.row_index(ListKind::Current, 2).unwrap(), 1);

        let err = doc.row_index(ListKind::Current, 3).unwrap_err();
        assert_eq!(err.to_string(), "no row 3 in card list (2 entries)");
        assert!(matches!(
            doc.row_index(ListKind::Current, 0),
            Err(Error::NoSuchRow { row: 0, .. })
        ));
        assert!(doc.row_index(ListKind::Wishlist, 1).is_err());
    }

    #[test]
    fn test_document_lookup_by_index() {
        let mut doc = Document::new();
        doc.add_card(CardRecord::new("A", 1_000, ymd(2024, 1, 1)));
        doc.add_wishlist(WishlistRecord::new("W", 10));

        assert_eq!(doc.card(0).unwrap().card_name, "A");
        assert_eq!(doc.wish(0).unwrap().card_name, "W");
        assert!(doc.card(1).is_err());
        assert!(doc.wish(1).is_err());
    }

    #[test]
    fn test_normalize_note() {
        assert_eq!(normalize_note(""), None);
        assert_eq!(normalize_note(" lounge access "), Some("lounge access".to_string()));
    }
}
