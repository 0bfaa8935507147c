//! Request handling for the five catalog actions.
//!
//! Each action validates its inputs against the current catalog before
//! anything changes, then commits the new state through the store, which
//! writes the whole catalog before the change becomes visible.

use std::fmt;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::catalog::CatalogStore;
use crate::clock::Clock;
use crate::error::{ActionError, Field};
use crate::loan::LoanPolicy;
use crate::models::{BookRecord, BookSummary};
use crate::storage::Storage;

const ADD_FIELDS: &[Field] = &[Field::BookId, Field::Title, Field::Author];
const ISSUE_FIELDS: &[Field] = &[Field::BookId, Field::Student];
const ID_ONLY: &[Field] = &[Field::BookId];

/// The operations a caller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
    Issue,
    Return,
    View,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Add,
        Action::Remove,
        Action::Issue,
        Action::Return,
        Action::View,
    ];

    /// Short name used in log events.
    pub fn name(self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Remove => "remove",
            Action::Issue => "issue",
            Action::Return => "return",
            Action::View => "view",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Add => "Add Book",
            Action::Remove => "Remove Book",
            Action::Issue => "Issue Book",
            Action::Return => "Return Book",
            Action::View => "View Books",
        }
    }

    /// Fields that must be non-blank for this action.
    pub fn required_fields(self) -> &'static [Field] {
        match self {
            Action::Add => ADD_FIELDS,
            Action::Issue => ISSUE_FIELDS,
            Action::Remove | Action::Return => ID_ONLY,
            Action::View => &[],
        }
    }

    pub fn mutates(self) -> bool {
        !matches!(self, Action::View)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw field values collected by a front-end. Unused fields are ignored by
/// the selected action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRequest {
    pub id: String,
    pub title: String,
    pub author: String,
    pub student: String,
}

impl ActionRequest {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::BookId => &self.id,
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Student => &self.student,
        }
    }
}

/// Successful result of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added { id: String, title: String },
    Removed { id: String },
    Issued { id: String, student: String, due_date: NaiveDate },
    Returned { id: String, fine: u64 },
    /// Books in catalog order; empty when the catalog has none.
    Listing(Vec<BookSummary>),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Added { title, .. } => write!(f, "Book '{title}' added successfully!"),
            Outcome::Removed { id } => write!(f, "Book ID {id} removed successfully!"),
            Outcome::Issued {
                student, due_date, ..
            } => write!(
                f,
                "Book issued to {student}. Due date: {}",
                due_date.format("%Y-%m-%d")
            ),
            Outcome::Returned { fine: 0, .. } => f.write_str("Book returned. No fine."),
            Outcome::Returned { fine, .. } => write!(f, "Book returned. Fine: ${fine}"),
            Outcome::Listing(books) if books.is_empty() => f.write_str("No books available."),
            Outcome::Listing(books) => {
                f.write_str("Library Books:")?;
                for book in books {
                    write!(f, "\n{book}")?;
                }
                Ok(())
            }
        }
    }
}

/// Owns the catalog for one session and applies actions to it one at a time.
pub struct ActionProcessor<S, C> {
    store: CatalogStore<S>,
    clock: C,
    policy: LoanPolicy,
}

impl<S: Storage, C: Clock> ActionProcessor<S, C> {
    pub fn new(store: CatalogStore<S>, clock: C) -> Self {
        Self::with_policy(store, clock, LoanPolicy::default())
    }

    pub fn with_policy(store: CatalogStore<S>, clock: C, policy: LoanPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    pub fn store(&self) -> &CatalogStore<S> {
        &self.store
    }

    /// Dispatch `action` using the relevant fields of `request`.
    pub fn perform(
        &mut self,
        action: Action,
        request: &ActionRequest,
    ) -> Result<Outcome, ActionError> {
        let result = match action {
            Action::Add => self.add_book(&request.id, &request.title, &request.author),
            Action::Remove => self.remove_book(&request.id),
            Action::Issue => self.issue_book(&request.id, &request.student),
            Action::Return => self.return_book(&request.id),
            Action::View => Ok(self.view_books()),
        };

        result.inspect_err(|err| {
            debug!(action = action.name(), kind = ?err.kind(), error = %err, "action rejected");
        })
    }

    pub fn add_book(&mut self, id: &str, title: &str, author: &str) -> Result<Outcome, ActionError> {
        let [id, title, author] = require([id, title, author], Action::Add)?;
        if self.store.contains(id) {
            return Err(ActionError::DuplicateId { id: id.to_string() });
        }

        self.store.commit_with(|books| {
            books.insert(id.to_string(), BookRecord::new(title, author));
        })?;

        info!(book_id = id, title, "book added");
        Ok(Outcome::Added {
            id: id.to_string(),
            title: title.to_string(),
        })
    }

    /// Delete a record whatever its loan status.
    pub fn remove_book(&mut self, id: &str) -> Result<Outcome, ActionError> {
        let [id] = require([id], Action::Remove)?;
        if !self.store.contains(id) {
            return Err(ActionError::NotFound { id: id.to_string() });
        }

        self.store.commit_with(|books| {
            books.shift_remove(id);
        })?;

        info!(book_id = id, "book removed");
        Ok(Outcome::Removed { id: id.to_string() })
    }

    pub fn issue_book(&mut self, id: &str, student: &str) -> Result<Outcome, ActionError> {
        let [id, student] = require([id, student], Action::Issue)?;
        let record = self
            .store
            .get(id)
            .ok_or_else(|| ActionError::NotFound { id: id.to_string() })?;
        if record.is_issued() {
            return Err(ActionError::AlreadyIssued { id: id.to_string() });
        }

        let due_date = self.policy.due_date(self.clock.today());
        self.store.commit_with(|books| {
            if let Some(record) = books.get_mut(id) {
                record.lend(student, due_date);
            }
        })?;

        info!(book_id = id, student, %due_date, "book issued");
        Ok(Outcome::Issued {
            id: id.to_string(),
            student: student.to_string(),
            due_date,
        })
    }

    pub fn return_book(&mut self, id: &str) -> Result<Outcome, ActionError> {
        let [id] = require([id], Action::Return)?;
        let record = self
            .store
            .get(id)
            .ok_or_else(|| ActionError::NotFound { id: id.to_string() })?;
        if !record.is_issued() {
            return Err(ActionError::NotIssued { id: id.to_string() });
        }

        let today = self.clock.today();
        let fine = record
            .due_date
            .map_or(0, |due| self.policy.fine(due, today));

        self.store.commit_with(|books| {
            if let Some(record) = books.get_mut(id) {
                record.shelve();
            }
        })?;

        info!(book_id = id, fine, "book returned");
        Ok(Outcome::Returned {
            id: id.to_string(),
            fine,
        })
    }

    /// Snapshot of the catalog. Never writes.
    pub fn view_books(&self) -> Outcome {
        let books = self
            .store
            .iter()
            .map(|(id, record)| BookSummary {
                id: id.to_string(),
                title: record.title.clone(),
                author: record.author.clone(),
                status: record.status,
            })
            .collect();
        Outcome::Listing(books)
    }
}

/// Trim every input and reject the request if any of them is blank.
fn require<const N: usize>(values: [&str; N], action: Action) -> Result<[&str; N], ActionError> {
    let trimmed = values.map(str::trim);
    if trimmed.iter().any(|value| value.is_empty()) {
        Err(ActionError::MissingField {
            required: action.required_fields(),
        })
    } else {
        Ok(trimmed)
    }
}
