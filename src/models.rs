//! Domain models for the catalog. These types mirror the JSON document written
//! to disk, so field names and the date encoding here define the file format.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a single book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookStatus {
    #[default]
    Available,
    Issued,
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookStatus::Available => f.write_str("Available"),
            BookStatus::Issued => f.write_str("Issued"),
        }
    }
}

/// One entry in the catalog, keyed externally by its book id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub status: BookStatus,
    /// Borrower name. Empty while the book is on the shelf.
    #[serde(default)]
    pub issued_to: String,
    /// Stored as `"YYYY-MM-DD"`, or `""` when there is no open loan.
    #[serde(default, with = "due_date_format")]
    pub due_date: Option<NaiveDate>,
}

impl BookRecord {
    /// A freshly catalogued book: on the shelf with no loan attached.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            status: BookStatus::Available,
            issued_to: String::new(),
            due_date: None,
        }
    }

    pub fn is_issued(&self) -> bool {
        self.status == BookStatus::Issued
    }

    /// Move the book onto a loan held by `borrower` until `due_date`.
    pub(crate) fn lend(&mut self, borrower: &str, due_date: NaiveDate) {
        self.status = BookStatus::Issued;
        self.issued_to = borrower.to_string();
        self.due_date = Some(due_date);
    }

    /// Close the open loan and put the book back on the shelf.
    pub(crate) fn shelve(&mut self) {
        self.status = BookStatus::Available;
        self.issued_to.clear();
        self.due_date = None;
    }
}

/// Row shown by the "view books" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub status: BookStatus,
}

impl fmt::Display for BookSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Author: {}, Status: {}",
            self.id, self.title, self.author, self.status
        )
    }
}

mod due_date_format {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.collect_str(&date.format(FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, FORMAT)
            .map(Some)
            .map_err(|err| de::Error::custom(format!("invalid due_date `{raw}`: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn available_record_serializes_with_empty_loan_fields() {
        let record = BookRecord::new("Dune", "Herbert");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Dune",
                "author": "Herbert",
                "status": "Available",
                "issued_to": "",
                "due_date": ""
            })
        );
    }

    #[test]
    fn issued_record_parses_due_date() {
        let record: BookRecord = serde_json::from_value(json!({
            "title": "Dune",
            "author": "Herbert",
            "status": "Issued",
            "issued_to": "Alice",
            "due_date": "2024-01-15"
        }))
        .unwrap();

        assert!(record.is_issued());
        assert_eq!(record.issued_to, "Alice");
        assert_eq!(record.due_date, NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn garbage_due_date_is_rejected() {
        let result = serde_json::from_value::<BookRecord>(json!({
            "title": "Dune",
            "author": "Herbert",
            "status": "Issued",
            "issued_to": "Alice",
            "due_date": "next tuesday"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn shelve_clears_loan() {
        let mut record = BookRecord::new("Dune", "Herbert");
        record.lend("Alice", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        record.shelve();
        assert_eq!(record, BookRecord::new("Dune", "Herbert"));
    }
}
