//! On-disk layouts of the data file.
//!
//! Two layouts exist: the older bare array of cards, and the current
//! object holding `current` and `wishlist` lists. The layout is decided once,
//! here, and everything past this module only sees a [`Document`].

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::record::{CardRecord, Document};

/// Which layout a data file used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Top-level array of card objects.
    Legacy,
    /// Object with `current` and `wishlist` arrays.
    Structured,
}

/// A decoded data file, tagged with its layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredDocument {
    /// Bare list of held cards; there was no wishlist yet.
    Legacy(Vec<CardRecord>),
    /// Both lists.
    Structured(Document),
}

impl StoredDocument {
    /// Decode the text of a data file.
    ///
    /// Individual entries that are not objects are dropped with a warning;
    /// odd field values inside an entry are coerced by the record types.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the text is not JSON, or
    /// [`Error::UnrecognizedLayout`] if the top-level value is neither an
    /// array nor an object.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Decode an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognizedLayout`] if `value` is neither an array
    /// nor an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Self::Legacy(decode_entries(items, "current"))),
            Value::Object(mut map) => {
                let current = map
                    .remove("current")
                    .map(|v| decode_list(v, "current"))
                    .unwrap_or_default();
                let wishlist = map
                    .remove("wishlist")
                    .map(|v| decode_list(v, "wishlist"))
                    .unwrap_or_default();
                Ok(Self::Structured(Document { current, wishlist }))
            }
            other => Err(Error::UnrecognizedLayout {
                found: json_type(&other),
            }),
        }
    }

    /// The layout this document was read from.
    #[must_use]
    pub fn layout(&self) -> Layout {
        match self {
            Self::Legacy(_) => Layout::Legacy,
            Self::Structured(_) => Layout::Structured,
        }
    }
}

impl From<StoredDocument> for Document {
    fn from(stored: StoredDocument) -> Self {
        match stored {
            StoredDocument::Legacy(current) => Document {
                current,
                wishlist: Vec::new(),
            },
            StoredDocument::Structured(document) => document,
        }
    }
}

/// Render a document in the structured layout with two-space indentation.
///
/// # Errors
///
/// Returns [`Error::Json`] if serialization fails.
pub fn encode(document: &Document) -> Result<String> {
    let mut text = serde_json::to_string_pretty(document)?;
    text.push('\n');
    Ok(text)
}

fn decode_list<T: DeserializeOwned>(value: Value, list: &str) -> Vec<T> {
    match value {
        Value::Array(items) => decode_entries(items, list),
        Value::Null => Vec::new(),
        other => {
            warn!(
                "Ignoring '{}': expected an array, found {}",
                list,
                json_type(&other)
            );
            Vec::new()
        }
    }
}

fn decode_entries<T: DeserializeOwned>(items: Vec<Value>, list: &str) -> Vec<T> {
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping entry {} of '{}': {}", index, list, e);
                None
            }
        })
        .collect();
    debug!("Decoded {} of {} '{}' entries", decoded.len(), total, list);
    decoded
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::WishlistRecord;
    use chrono::NaiveDate;

    #[test]
    fn test_legacy_array() {
        let stored = StoredDocument::parse(
            r#"[
                {"card_name": "Sapphire Preferred", "welcome_points": 60000, "opened_date": "2025-11-28"},
                {"card_name": "Freedom Flex", "welcome_points": 20000, "opened_date": "2024-03-01"}
            ]"#,
        )
        .unwrap();
        assert_eq!(stored.layout(), Layout::Legacy);

        let doc = Document::from(stored);
        assert!(doc.wishlist.is_empty());
        assert_eq!(doc.current.len(), 2);
        assert_eq!(doc.current[0].card_name, "Sapphire Preferred");
        assert_eq!(doc.current[0].issuer, "Unknown");
        assert_eq!(doc.current[1].welcome_points, 20_000);
        assert_eq!(doc.current[1].opened_date, "2024-03-01");
    }

    #[test]
    fn test_structured_object() {
        let stored = StoredDocument::parse(
            r#"{
                "current": [{"card_name": "Gold", "issuer": "Amex", "welcome_points": 90000,
                             "opened_date": "2025-02-01", "benefits": "4x dining"}],
                "wishlist": [{"card_name": "Aeroplan", "issuer": "Chase", "target_points": 70000}]
            }"#,
        )
        .unwrap();
        assert_eq!(stored.layout(), Layout::Structured);

        let doc = Document::from(stored);
        assert_eq!(doc.current.len(), 1);
        assert_eq!(doc.current[0].benefits.as_deref(), Some("4x dining"));
        assert_eq!(doc.wishlist.len(), 1);
        assert_eq!(doc.wishlist[0].target_points, 70_000);
    }

    #[test]
    fn test_structured_missing_lists() {
        let doc = Document::from(StoredDocument::parse("{}").unwrap());
        assert_eq!(doc, Document::new());

        let doc =
            Document::from(StoredDocument::parse(r#"{"current": null, "other": 1}"#).unwrap());
        assert_eq!(doc, Document::new());
    }

    #[test]
    fn test_structured_list_of_wrong_type() {
        let doc = Document::from(
            StoredDocument::parse(
                r#"{"current": "oops", "wishlist": [{"card_name": "X"}]}"#,
            )
            .unwrap(),
        );
        assert!(doc.current.is_empty());
        assert_eq!(doc.wishlist.len(), 1);
    }

    #[test]
    fn test_non_object_entries_are_skipped() {
        let doc = Document::from(
            StoredDocument::parse(r#"[1, {"card_name": "Kept"}, "junk", null]"#).unwrap(),
        );
        assert_eq!(doc.current.len(), 1);
        assert_eq!(doc.current[0].card_name, "Kept");
    }

    #[test]
    fn test_scalar_top_level_is_rejected() {
        for text in ["42", "\"cards\"", "true", "null"] {
            let err = StoredDocument::parse(text).unwrap_err();
            assert!(
                matches!(err, Error::UnrecognizedLayout { .. }),
                "text {text}"
            );
        }
    }

    #[test]
    fn test_invalid_json() {
        let err = StoredDocument::parse("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_encode_is_structured_and_indented() {
        let mut doc = Document::new();
        doc.add_card(CardRecord::new(
            "Ink Cash",
            75_000,
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        ));
        doc.add_wishlist(WishlistRecord::new("Venture X", 75_000));

        let text = encode(&doc).unwrap();
        assert!(text.starts_with("{\n  \"current\": [\n"));
        assert!(text.contains("\n  \"wishlist\": [\n"));
        assert!(text.ends_with("}\n"));

        let back = Document::from(StoredDocument::parse(&text).unwrap());
        assert_eq!(back, doc);
    }

    #[test]
    fn test_encode_empty_document() {
        let text = encode(&Document::new()).unwrap();
        assert_eq!(text, "{\n  \"current\": [],\n  \"wishlist\": []\n}\n");
    }
}
