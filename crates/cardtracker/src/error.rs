//! Error types for cardtracker.
//!
//! This module defines all error types used throughout the cardtracker crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A user-supplied field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The card name of a card or wishlist entry.
    CardName,
    /// The welcome bonus points of a held card.
    Points,
    /// The date a card was opened.
    OpenedDate,
    /// The target points of a wishlist entry.
    TargetPoints,
    /// The date status figures are computed for.
    StatusDate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CardName => write!(f, "card name"),
            Self::Points => write!(f, "welcome points"),
            Self::OpenedDate => write!(f, "opened date"),
            Self::TargetPoints => write!(f, "target points"),
            Self::StatusDate => write!(f, "status date"),
        }
    }
}

/// Which record list an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Cards currently held.
    Current,
    /// Cards on the wishlist.
    Wishlist,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "card list"),
            Self::Wishlist => write!(f, "wishlist"),
        }
    }
}

/// The main error type for cardtracker operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    /// A field failed validation; no record was created.
    #[error("invalid {field}: {message}")]
    InvalidField {
        /// The field that was rejected.
        field: Field,
        /// Why it was rejected.
        message: String,
    },

    /// A delete referred to a row that does not exist.
    #[error("no entry at index {index} in {list} ({len} entries)")]
    IndexOutOfRange {
        /// The list that was indexed.
        list: ListKind,
        /// The requested zero-based index.
        index: usize,
        /// The length of the list at the time.
        len: usize,
    },

    /// A user-facing row number that does not exist. Rows start at 1.
    #[error("no row {row} in {list} ({len} entries)")]
    NoSuchRow {
        /// The list that was addressed.
        list: ListKind,
        /// The requested 1-based row.
        row: usize,
        /// The length of the list at the time.
        len: usize,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the data file.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        /// Path of the file being written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The data file holds valid JSON of a shape no version ever wrote.
    #[error("unrecognized data file layout: top-level {found}")]
    UnrecognizedLayout {
        /// The JSON type found at the top level.
        found: &'static str,
    },
}

/// A specialized Result type for cardtracker operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error for the given field.
    #[must_use]
    pub fn invalid_field(field: Field, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// The rejected field, if this is a validation error.
    #[must_use]
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::InvalidField { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Check if this error came from user input rather than the environment.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidField { .. } | Self::IndexOutOfRange { .. } | Self::NoSuchRow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_display() {
        let err = Error::invalid_field(Field::Points, "must be a positive integer");
        assert_eq!(
            err.to_string(),
            "invalid welcome points: must be a positive integer"
        );
    }

    #[test]
    fn test_field_accessor() {
        let err = Error::invalid_field(Field::OpenedDate, "bad");
        assert_eq!(err.field(), Some(Field::OpenedDate));
        assert_eq!(Error::UnrecognizedLayout { found: "null" }.field(), None);
    }

    #[test]
    fn test_is_input_error() {
        assert!(Error::invalid_field(Field::CardName, "empty").is_input_error());
        assert!(Error::IndexOutOfRange {
            list: ListKind::Current,
            index: 3,
            len: 1,
        }
        .is_input_error());
        assert!(Error::NoSuchRow {
            list: ListKind::Current,
            row: 0,
            len: 1,
        }
        .is_input_error());
        assert!(!Error::UnrecognizedLayout { found: "string" }.is_input_error());
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = Error::IndexOutOfRange {
            list: ListKind::Wishlist,
            index: 5,
            len: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("wishlist"));
        assert!(msg.contains('5'));
        assert!(msg.contains("2 entries"));
    }

    #[test]
    fn test_field_display_names() {
        assert_eq!(Field::CardName.to_string(), "card name");
        assert_eq!(Field::TargetPoints.to_string(), "target points");
    }

    #[test]
    fn test_no_such_row_display() {
        let err = Error::NoSuchRow {
            list: ListKind::Current,
            row: 7,
            len: 3,
        };
        assert_eq!(err.to_string(), "no row 7 in card list (3 entries)");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_unrecognized_layout_display() {
        let err = Error::UnrecognizedLayout { found: "string" };
        assert_eq!(
            err.to_string(),
            "unrecognized data file layout: top-level string"
        );
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "window_days must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("window_days"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }

    #[test]
    fn test_file_write_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = Error::FileWrite {
            path: PathBuf::from("/data/cards.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/cards.json"));
        assert!(msg.contains("read-only"));
    }
}
