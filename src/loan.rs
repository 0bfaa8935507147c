//! Loan period and overdue fine arithmetic. Dates only; time of day never
//! enters the calculation.

use chrono::{Days, NaiveDate};
use serde::Deserialize;

pub const DEFAULT_LOAN_DAYS: u32 = 14;
pub const DEFAULT_FINE_PER_DAY: u64 = 1;

/// Rules applied when issuing and returning books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoanPolicy {
    /// Calendar days between issue and due date.
    pub loan_days: u32,
    /// Currency units charged per whole day late.
    pub fine_per_day: u64,
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            loan_days: DEFAULT_LOAN_DAYS,
            fine_per_day: DEFAULT_FINE_PER_DAY,
        }
    }
}

impl LoanPolicy {
    /// Due date for a loan starting on `issued_on`. Saturates at the last
    /// representable date instead of overflowing.
    pub fn due_date(&self, issued_on: NaiveDate) -> NaiveDate {
        issued_on
            .checked_add_days(Days::new(u64::from(self.loan_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Fine owed when a book due on `due` comes back on `returned_on`.
    pub fn fine(&self, due: NaiveDate, returned_on: NaiveDate) -> u64 {
        let days_late = u64::try_from((returned_on - due).num_days()).unwrap_or(0);
        days_late.saturating_mul(self.fine_per_day)
    }
}
