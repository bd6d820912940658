//! In-memory library catalog for books, students and loans.
//!
//! This crate tracks which books are out, to whom, and when they are due,
//! and computes flat per-day penalties for late returns. All state lives in a
//! [`Library`] value; every date is supplied by the caller.

pub mod book;
pub mod error;
pub mod events;
pub mod loan_policy;
pub mod loan_record;
pub mod money;
pub mod observers;
pub mod student;
pub mod system;

pub use book::Book;
pub use error::{LibraryError, Result};
pub use events::{CatalogEvent, ReturnReceipt};
pub use loan_policy::LoanPolicy;
pub use loan_record::LoanRecord;
pub use money::Money;
pub use observers::{CatalogObserver, ConsoleReporter, TracingLogger};
pub use student::Student;
pub use system::{Library, OverdueLoan};
