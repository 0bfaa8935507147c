//! Persistence providers. The catalog only ever reads or writes the whole
//! document, so a provider is little more than a blob slot.

mod json_file;
mod memory;

pub use json_file::JsonFile;
pub use memory::MemoryStorage;

use crate::error::PersistenceError;

/// Whole-document storage backing a [`crate::CatalogStore`].
pub trait Storage {
    /// Return the persisted document, or `None` when nothing was saved yet.
    fn read(&self) -> Result<Option<String>, PersistenceError>;

    /// Replace the persisted document with `contents`.
    fn write(&mut self, contents: &str) -> Result<(), PersistenceError>;

    /// Human-readable location used in log lines and error messages.
    fn location(&self) -> String;
}
