//! Error types surfaced by the catalog and the action processor.

use std::fmt;
use std::io;

use thiserror::Error;

/// Input fields a caller can supply to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BookId,
    Title,
    Author,
    Student,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::BookId => "Book ID",
            Field::Title => "Title",
            Field::Author => "Author",
            Field::Student => "Student Name",
        }
    }
}

/// Coarse classification of an [`ActionError`], for callers that branch on
/// the failure rather than display it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingField,
    DuplicateId,
    NotFound,
    AlreadyIssued,
    NotIssued,
    Persistence,
}

/// Everything that can go wrong while reading or writing the catalog file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read catalog from {location}")]
    Read {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write catalog to {location}")]
    Write {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("catalog data in {location} is malformed")]
    Malformed {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize catalog")]
    Serialize(#[source] serde_json::Error),
}

/// A rejected or failed action. Every variant except `Persistence` is raised
/// before the catalog is touched.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{}", RequiredFields(.required))]
    MissingField { required: &'static [Field] },

    #[error("Book ID already exists.")]
    DuplicateId { id: String },

    #[error("Book ID not found.")]
    NotFound { id: String },

    #[error("Book is already issued.")]
    AlreadyIssued { id: String },

    #[error("Book is not issued.")]
    NotIssued { id: String },

    #[error("Could not save the catalog.")]
    Persistence(#[from] PersistenceError),
}

impl ActionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::MissingField { .. } => ErrorKind::MissingField,
            ActionError::DuplicateId { .. } => ErrorKind::DuplicateId,
            ActionError::NotFound { .. } => ErrorKind::NotFound,
            ActionError::AlreadyIssued { .. } => ErrorKind::AlreadyIssued,
            ActionError::NotIssued { .. } => ErrorKind::NotIssued,
            ActionError::Persistence(_) => ErrorKind::Persistence,
        }
    }
}

/// Renders "Book ID is required." / "Book ID and Student Name are required." /
/// "Book ID, Title, and Author are required."
struct RequiredFields<'a>(&'a [Field]);

impl fmt::Display for RequiredFields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.0.iter().map(|field| field.label()).collect();
        match labels.as_slice() {
            [] => f.write_str("A required field is missing."),
            [only] => write!(f, "{only} is required."),
            [first, second] => write!(f, "{first} and {second} are required."),
            [init @ .., last] => write!(f, "{}, and {last} are required.", init.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_messages_list_every_required_field() {
        let single = ActionError::MissingField {
            required: &[Field::BookId],
        };
        let pair = ActionError::MissingField {
            required: &[Field::BookId, Field::Student],
        };
        let triple = ActionError::MissingField {
            required: &[Field::BookId, Field::Title, Field::Author],
        };

        assert_eq!(single.to_string(), "Book ID is required.");
        assert_eq!(pair.to_string(), "Book ID and Student Name are required.");
        assert_eq!(
            triple.to_string(),
            "Book ID, Title, and Author are required."
        );
    }

    #[test]
    fn persistence_errors_keep_their_source() {
        let err = ActionError::from(PersistenceError::Write {
            location: "library_data.json".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        });
        assert_eq!(err.kind(), ErrorKind::Persistence);
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(
            source.to_string(),
            "failed to write catalog to library_data.json"
        );
    }
}
