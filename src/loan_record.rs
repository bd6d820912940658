use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    error::{LibraryError, Result},
    money::Money,
};

/// Date format used in every rendered record
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One borrow of one book by one student
///
/// Records are appended to the catalog history at checkout and never removed.
/// A record is active until `return_date` is set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoanRecord {
    /// Borrowing student
    pub student_id: String,
    /// Borrowed book
    pub book_id: String,
    /// Day the book left the library
    pub checkout_date: NaiveDate,
    /// Last day the book may be returned without penalty
    pub due_date: NaiveDate,
    /// Day the book came back, if it has
    pub return_date: Option<NaiveDate>,
    /// Penalty charged at return; zero while the loan is active
    pub penalty: Money,
}

impl LoanRecord {
    /// Open a loan due `period_days` after `checkout_date`
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::DateOutOfRange` if the due date falls outside the
    /// representable calendar.
    pub fn open(
        student_id: &str,
        book_id: &str,
        checkout_date: NaiveDate,
        period_days: u32,
    ) -> Result<Self> {
        let due_date = checkout_date
            .checked_add_days(Days::new(u64::from(period_days)))
            .ok_or(LibraryError::DateOutOfRange { date: checkout_date, days: period_days })?;

        Ok(Self {
            student_id: student_id.to_string(),
            book_id: book_id.to_string(),
            checkout_date,
            due_date,
            return_date: None,
            penalty: Money::ZERO,
        })
    }

    /// Whether the book is still out on this loan
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.return_date.is_none()
    }

    /// Whether the due date has passed as of the given day
    #[must_use]
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.due_date < as_of
    }

    /// Whole days past the due date, zero on or before it
    #[must_use]
    pub fn days_overdue(&self, as_of: NaiveDate) -> u64 {
        let days = as_of.signed_duration_since(self.due_date).num_days();
        u64::try_from(days).unwrap_or(0)
    }

    /// Penalty owed if the book came back on `as_of`
    #[must_use]
    pub fn penalty_as_of(&self, as_of: NaiveDate, rate: Money) -> Money {
        rate.times(self.days_overdue(as_of))
    }

    /// Record the return and settle the penalty
    pub(crate) fn close(&mut self, returned_on: NaiveDate, rate: Money) -> Money {
        let penalty = self.penalty_as_of(returned_on, rate);
        self.return_date = Some(returned_on);
        self.penalty = penalty;
        penalty
    }
}

impl fmt::Display for LoanRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student ID: {}, Book ID: {}, Checked Out: {}, Due: {}, ",
            self.student_id,
            self.book_id,
            self.checkout_date.format(DATE_FORMAT),
            self.due_date.format(DATE_FORMAT)
        )?;
        match self.return_date {
            Some(returned) => write!(
                f,
                "Returned: {}, Penalty Paid: {}",
                returned.format(DATE_FORMAT),
                self.penalty
            ),
            None => write!(f, "Not Returned Yet"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::LoanRecord;
    use crate::{error::LibraryError, money::Money};

    /// Calendar day helper for tests
    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn test_due_date_is_checkout_plus_period() {
        let record = LoanRecord::open("S1", "B1", day(2024, 1, 1), 14).expect("open loan");
        assert_eq!(record.due_date, day(2024, 1, 15));
        assert!(record.is_active());
        assert!(record.penalty.is_zero());
    }

    #[test]
    fn test_days_overdue_is_zero_until_after_due_date() {
        let record = LoanRecord::open("S1", "B1", day(2024, 1, 1), 14).expect("open loan");
        assert_eq!(record.days_overdue(day(2024, 1, 10)), 0);
        assert_eq!(record.days_overdue(day(2024, 1, 15)), 0);
        assert_eq!(record.days_overdue(day(2024, 1, 16)), 1);
        assert!(!record.is_overdue(day(2024, 1, 15)));
        assert!(record.is_overdue(day(2024, 1, 16)));
    }

    #[test]
    fn test_penalty_for_six_late_days() {
        let mut record = LoanRecord::open("S1", "B1", day(2024, 3, 1), 14).expect("open loan");
        let penalty = record.close(day(2024, 3, 21), Money::from_cents(50));

        assert_eq!(penalty, Money::from_cents(300));
        assert_eq!(record.penalty, penalty);
        assert_eq!(record.return_date, Some(day(2024, 3, 21)));
        assert!(!record.is_active());
    }

    #[test]
    fn test_due_date_out_of_range() {
        let result = LoanRecord::open("S1", "B1", NaiveDate::MAX, 1);
        assert_eq!(
            result,
            Err(LibraryError::DateOutOfRange { date: NaiveDate::MAX, days: 1 })
        );
    }

    #[test]
    fn test_display_active_and_returned() {
        let mut record = LoanRecord::open("S1", "B1", day(2024, 1, 1), 14).expect("open loan");
        assert_eq!(
            record.to_string(),
            "Student ID: S1, Book ID: B1, Checked Out: 2024-01-01, Due: 2024-01-15, Not Returned Yet"
        );

        record.close(day(2024, 1, 17), Money::from_cents(50));
        assert_eq!(
            record.to_string(),
            "Student ID: S1, Book ID: B1, Checked Out: 2024-01-01, Due: 2024-01-15, \
             Returned: 2024-01-17, Penalty Paid: $1.00"
        );
    }
}
