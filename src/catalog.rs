//! In-memory catalog backed by a whole-document [`Storage`] provider.
//!
//! The mapping keeps insertion order so listings and the JSON file read the
//! same way the books were entered.

use indexmap::IndexMap;
use tracing::{error, info};

use crate::error::PersistenceError;
use crate::models::BookRecord;
use crate::storage::Storage;

/// Book id to record, in insertion order.
pub type Books = IndexMap<String, BookRecord>;

pub struct CatalogStore<S> {
    books: Books,
    storage: S,
}

impl<S: Storage> CatalogStore<S> {
    /// Hydrate the catalog from `storage`. Nothing persisted yet means an
    /// empty catalog; unreadable or malformed data is an error so an existing
    /// file is never replaced by an empty one.
    pub fn load(storage: S) -> Result<Self, PersistenceError> {
        let books = match storage.read()? {
            Some(raw) if !raw.trim().is_empty() => {
                serde_json::from_str(&raw).map_err(|source| PersistenceError::Malformed {
                    location: storage.location(),
                    source,
                })?
            }
            _ => Books::new(),
        };

        info!(
            books = books.len(),
            location = %storage.location(),
            "catalog loaded"
        );
        Ok(Self { books, storage })
    }

    /// Write the full current mapping, overwriting whatever was stored.
    pub fn save(&mut self) -> Result<(), PersistenceError> {
        write_books(&mut self.storage, &self.books)
    }

    /// Apply `change` to a copy of the catalog, persist the copy, and only then
    /// make it live. On a write failure the in-memory catalog is untouched.
    pub fn commit_with<T>(
        &mut self,
        change: impl FnOnce(&mut Books) -> T,
    ) -> Result<T, PersistenceError> {
        let mut staged = self.books.clone();
        let outcome = change(&mut staged);
        write_books(&mut self.storage, &staged)?;
        self.books = staged;
        Ok(outcome)
    }

    pub fn get(&self, id: &str) -> Option<&BookRecord> {
        self.books.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.books.contains_key(id)
    }

    /// Insert or replace a record. Does not persist; see [`Self::save`].
    pub fn insert(&mut self, id: impl Into<String>, record: BookRecord) -> Option<BookRecord> {
        self.books.insert(id.into(), record)
    }

    /// Remove a record, keeping the order of the remaining ones.
    pub fn remove(&mut self, id: &str) -> Option<BookRecord> {
        self.books.shift_remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BookRecord)> + '_ {
        self.books.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

fn write_books<S: Storage>(storage: &mut S, books: &Books) -> Result<(), PersistenceError> {
    let encoded = serde_json::to_string_pretty(books).map_err(PersistenceError::Serialize)?;
    storage.write(&encoded).inspect_err(|err| {
        error!(location = %storage.location(), error = %err, "failed to persist catalog");
    })
}
