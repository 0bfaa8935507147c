//! Core library for the Library Manager terminal application.
//!
//! The catalog logic is independent of the terminal front-end: construct a
//! [`CatalogStore`] over any [`Storage`], wrap it in an [`ActionProcessor`]
//! with a [`Clock`], and feed it actions.
pub mod actions;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod loan;
pub mod logging;
pub mod models;
pub mod storage;
pub mod ui;

pub use actions::{Action, ActionProcessor, ActionRequest, Outcome};
pub use catalog::CatalogStore;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use error::{ActionError, ErrorKind, Field, PersistenceError};
pub use loan::LoanPolicy;
pub use models::{BookRecord, BookStatus, BookSummary};
pub use storage::{JsonFile, MemoryStorage, Storage};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
