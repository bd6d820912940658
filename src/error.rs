use chrono::NaiveDate;
use thiserror::Error;

/// Errors reported by catalog operations
///
/// Every variant is a local validation failure. The catalog is left exactly as it
/// was before the rejected call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// A book with this id is already catalogued
    #[error("Book ID {0} already exists")]
    DuplicateBook(String),

    /// A student with this id is already registered
    #[error("Student ID {0} already exists")]
    DuplicateStudent(String),

    /// No student is registered under this id
    #[error("Student ID {0} not found")]
    UnknownStudent(String),

    /// No book is catalogued under this id
    #[error("Book ID {0} not found")]
    UnknownBook(String),

    /// The book already has an active loan
    #[error("Book '{title}' (ID: {book_id}) is already borrowed")]
    AlreadyBorrowed { book_id: String, title: String },

    /// The book has no active loan to close
    #[error("Book '{title}' (ID: {book_id}) is not currently borrowed")]
    NotBorrowed { book_id: String, title: String },

    /// Adding the borrowing period to the checkout date leaves the calendar
    #[error("Cannot compute a due date {days} days after {date}")]
    DateOutOfRange { date: NaiveDate, days: u32 },

    /// The loan policy could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LibraryError>;
