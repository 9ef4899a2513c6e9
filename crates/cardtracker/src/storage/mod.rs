//! Storage layer for cardtracker.
//!
//! Records live in a single JSON file. Loading never fails: a missing,
//! empty, unreadable or malformed file yields an empty [`Document`] after a
//! warning. Saving reports and returns every I/O failure so the caller can
//! decide whether to retry.

pub mod format;

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::record::{CardRecord, Document, WishlistRecord};

pub use format::{Layout, StoredDocument};

/// Load the document stored at `path`.
///
/// Legacy bare-array files are normalized to the two-list form.
#[must_use]
pub fn load(path: impl AsRef<Path>) -> Document {
    let path = path.as_ref();

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No data file at {}, starting empty", path.display());
            return Document::new();
        }
        Err(e) => {
            warn!(
                "Error reading {}: {}. Starting with an empty list.",
                path.display(),
                e
            );
            return Document::new();
        }
    };

    if text.trim().is_empty() {
        debug!("Data file {} is empty", path.display());
        return Document::new();
    }

    match StoredDocument::parse(&text) {
        Ok(stored) => {
            if stored.layout() == Layout::Legacy {
                info!(
                    "Read legacy card list from {}; it will be saved in the current layout",
                    path.display()
                );
            }
            let document = Document::from(stored);
            debug!(
                "Loaded {} cards and {} wishlist entries from {}",
                document.current.len(),
                document.wishlist.len(),
                path.display()
            );
            document
        }
        Err(e) => {
            warn!(
                "{} contains invalid data ({}). Starting with an empty list.",
                path.display(),
                e
            );
            Document::new()
        }
    }
}

/// Write `document` to `path`, creating the parent directory if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the document cannot
/// be serialized, or the file cannot be written. The failure is logged
/// before it is returned.
pub fn save(path: impl AsRef<Path>, document: &Document) -> Result<()> {
    let path = path.as_ref();
    match write_document(path, document) {
        Ok(()) => {
            info!("Saved {} cards to {}", document.current.len(), path.display());
            Ok(())
        }
        Err(e) => {
            error!("Error saving to {}: {}", path.display(), e);
            Err(e)
        }
    }
}

fn write_document(path: &Path, document: &Document) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let text = format::encode(document)?;
    debug!("Writing {} bytes to {}", text.len(), path.display());
    std::fs::write(path, text).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// A data file and its in-memory document.
///
/// This is the whole of a front-end's session state: mutations happen in
/// memory and reach disk only through [`RecordStore::save`].
#[derive(Debug)]
pub struct RecordStore {
    /// Path to the data file.
    path: PathBuf,
    /// Records as currently edited.
    document: Document,
    /// Whether `document` differs from what was last loaded or saved.
    dirty: bool,
}

impl RecordStore {
    /// Load the data file at `path`.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let document = load(&path);
        Self {
            path,
            document,
            dirty: false,
        }
    }

    /// Wrap an existing document, to be saved at `path`.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn with_document(path: impl AsRef<Path>, document: Document) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            document,
            dirty: true,
        }
    }

    /// Get the path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The records as currently edited.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Whether there are unsaved changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Append a held card.
    pub fn add_card(&mut self, card: CardRecord) {
        debug!("Adding card '{}'", card.card_name);
        self.document.add_card(card);
        self.dirty = true;
    }

    /// Append a wishlist entry.
    pub fn add_wishlist(&mut self, entry: WishlistRecord) {
        debug!("Adding wishlist entry '{}'", entry.card_name);
        self.document.add_wishlist(entry);
        self.dirty = true;
    }

    /// Remove the held card at a zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if there is no such card.
    pub fn remove_card(&mut self, index: usize) -> Result<CardRecord> {
        let removed = self.document.remove_card(index)?;
        debug!("Removed card '{}'", removed.card_name);
        self.dirty = true;
        Ok(removed)
    }

    /// Remove the wishlist entry at a zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if there is no such entry.
    pub fn remove_wishlist(&mut self, index: usize) -> Result<WishlistRecord> {
        let removed = self.document.remove_wishlist(index)?;
        debug!("Removed wishlist entry '{}'", removed.card_name);
        self.dirty = true;
        Ok(removed)
    }

    /// Write the document back to its data file.
    ///
    /// # Errors
    ///
    /// Returns the underlying error if writing fails; the store stays dirty.
    pub fn save(&mut self) -> Result<()> {
        save(&self.path, &self.document)?;
        self.dirty = false;
        Ok(())
    }

    /// Take the document out of the store.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }
}
