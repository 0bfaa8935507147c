use crate::error::PersistenceError;

use super::Storage;

/// In-memory blob slot. Useful for tests and for callers that want the catalog
/// semantics without touching disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-persisted document.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> Result<(), PersistenceError> {
        self.contents = Some(contents.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
