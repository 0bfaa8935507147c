use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::PersistenceError;

use super::Storage;

/// Catalog stored as a single JSON file. The file is opened and closed on
/// every call; nothing is held between operations.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Storage for JsonFile {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Read {
                location: self.location(),
                source,
            }),
        }
    }

    fn write(&mut self, contents: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| PersistenceError::Write {
                    location: parent.display().to_string(),
                    source,
                })?;
            }
        }

        fs::write(&self.path, contents).map_err(|source| PersistenceError::Write {
            location: self.location(),
            source,
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
