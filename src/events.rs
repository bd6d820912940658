use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{book::Book, loan_record::LoanRecord, money::Money, student::Student};

/// Outcome of a successful return
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReturnReceipt {
    /// Returned book
    pub book_id: String,
    /// Title of the returned book
    pub title: String,
    /// Student who held the loan
    pub student_id: String,
    /// That student's display name
    pub student_name: String,
    /// Day the book came back
    pub return_date: NaiveDate,
    /// Day it was due
    pub due_date: NaiveDate,
    /// Whole days late, zero when on time
    pub days_overdue: u64,
    /// Charge settled at return
    pub penalty: Money,
}

/// Successful catalog mutations, in the order they happened
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum CatalogEvent {
    /// A book joined the catalog
    BookAdded(Book),
    /// A student was registered
    StudentAdded(Student),
    /// A book left the library on a new loan
    CheckedOut {
        /// The opened loan
        record: LoanRecord,
        /// Borrower's display name
        student_name: String,
        /// Title of the borrowed book
        title: String,
    },
    /// A book came back and its loan was closed
    Returned(ReturnReceipt),
}
