use std::{
    collections::{BTreeMap, btree_map::Entry},
    fmt,
};

use chrono::NaiveDate;

use crate::{
    book::Book,
    error::{LibraryError, Result},
    events::{CatalogEvent, ReturnReceipt},
    loan_policy::LoanPolicy,
    loan_record::LoanRecord,
    money::Money,
    observers::CatalogObserver,
    student::Student,
};

/// An active loan that has run past its due date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverdueLoan<'a> {
    /// The loan itself
    pub record: &'a LoanRecord,
    /// Whole days late as of the listing date
    pub days_overdue: u64,
    /// Penalty accrued as of the listing date
    pub penalty: Money,
}

/// In-memory catalog of books, students and loans
///
/// Every operation validates before it mutates, so a rejected call leaves the
/// catalog exactly as it found it. Dates are always supplied by the caller.
pub struct Library {
    /// Books keyed by id
    books: BTreeMap<String, Book>,
    /// Students keyed by id
    students: BTreeMap<String, Student>,
    /// Book id to the position of its open record in `history`
    active_loans: BTreeMap<String, usize>,
    /// Every loan ever opened, in checkout order
    history: Vec<LoanRecord>,
    /// Borrowing period and penalty rate
    policy: LoanPolicy,
    /// Registered reporting collaborators
    observers: Vec<Box<dyn CatalogObserver>>,
}

// Manual implementation of Debug for Library
impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("books", &self.books)
            .field("students", &self.students)
            .field("active_loans", &self.active_loans)
            .field("history", &self.history)
            .field("policy", &self.policy)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    /// Create an empty catalog with the default loan policy
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(LoanPolicy::default())
    }

    /// Create an empty catalog with the given loan policy
    #[must_use]
    pub fn with_policy(policy: LoanPolicy) -> Self {
        tracing::debug!(
            borrowing_period_days = policy.borrowing_period_days,
            penalty_rate = %policy.penalty_rate,
            "Creating library catalog"
        );
        Self {
            books: BTreeMap::new(),
            students: BTreeMap::new(),
            active_loans: BTreeMap::new(),
            history: Vec::new(),
            policy,
            observers: Vec::new(),
        }
    }

    /// Register an observer to be told about every operation outcome
    pub fn register_observer(&mut self, observer: Box<dyn CatalogObserver>) {
        self.observers.push(observer);
    }

    /// The loan policy in force
    #[must_use]
    pub const fn policy(&self) -> &LoanPolicy {
        &self.policy
    }

    /// Tell every observer about a completed operation
    fn notify(&self, event: &CatalogEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    /// Tell every observer about a rejection and hand the error back
    fn reject<T>(&self, error: LibraryError) -> Result<T> {
        for observer in &self.observers {
            observer.on_rejected(&error);
        }
        Err(error)
    }

    /// Add a book to the catalog
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::DuplicateBook` if the id is already catalogued.
    pub fn add_book(&mut self, id: &str, title: &str, author: &str) -> Result<&Book> {
        if self.books.contains_key(id) {
            return self.reject(LibraryError::DuplicateBook(id.to_string()));
        }

        let book = Book::new(id, title, author);
        self.notify(&CatalogEvent::BookAdded(book.clone()));

        match self.books.entry(id.to_string()) {
            Entry::Vacant(slot) => Ok(slot.insert(book)),
            Entry::Occupied(_) => Err(LibraryError::DuplicateBook(id.to_string())),
        }
    }

    /// Register a student
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::DuplicateStudent` if the id is already registered.
    pub fn add_student(&mut self, id: &str, name: &str) -> Result<&Student> {
        if self.students.contains_key(id) {
            return self.reject(LibraryError::DuplicateStudent(id.to_string()));
        }

        let student = Student::new(id, name);
        self.notify(&CatalogEvent::StudentAdded(student.clone()));

        match self.students.entry(id.to_string()) {
            Entry::Vacant(slot) => Ok(slot.insert(student)),
            Entry::Occupied(_) => Err(LibraryError::DuplicateStudent(id.to_string())),
        }
    }

    /// Lend a book to a student on the given day
    ///
    /// The loan is due `borrowing_period_days` after `on`.
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError` if:
    /// - the student is not registered (`UnknownStudent`)
    /// - the book is not catalogued (`UnknownBook`)
    /// - the book is already out (`AlreadyBorrowed`)
    /// - the due date is not a representable date (`DateOutOfRange`)
    pub fn checkout(
        &mut self,
        student_id: &str,
        book_id: &str,
        on: NaiveDate,
    ) -> Result<LoanRecord> {
        let Some(student) = self.students.get(student_id) else {
            return self.reject(LibraryError::UnknownStudent(student_id.to_string()));
        };
        let Some(book) = self.books.get(book_id) else {
            return self.reject(LibraryError::UnknownBook(book_id.to_string()));
        };
        if book.is_borrowed || self.active_loans.contains_key(book_id) {
            return self.reject(LibraryError::AlreadyBorrowed {
                book_id: book_id.to_string(),
                title: book.title.clone(),
            });
        }

        let student_name = student.name.clone();
        let title = book.title.clone();
        let record =
            match LoanRecord::open(student_id, book_id, on, self.policy.borrowing_period_days) {
                Ok(record) => record,
                Err(error) => return self.reject(error),
            };

        self.active_loans.insert(book_id.to_string(), self.history.len());
        self.history.push(record.clone());
        if let Some(book) = self.books.get_mut(book_id) {
            book.is_borrowed = true;
        }

        self.notify(&CatalogEvent::CheckedOut { record: record.clone(), student_name, title });
        Ok(record)
    }

    /// Take a book back on the given day and settle any penalty
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::UnknownBook` if the book is not catalogued, or
    /// `LibraryError::NotBorrowed` if it has no active loan.
    pub fn return_book(&mut self, book_id: &str, on: NaiveDate) -> Result<ReturnReceipt> {
        let Some(book) = self.books.get(book_id) else {
            return self.reject(LibraryError::UnknownBook(book_id.to_string()));
        };
        let title = book.title.clone();
        let not_borrowed =
            || LibraryError::NotBorrowed { book_id: book_id.to_string(), title: title.clone() };

        let Some(&index) = self.active_loans.get(book_id).filter(|_| book.is_borrowed) else {
            return self.reject(not_borrowed());
        };
        let rate = self.policy.penalty_rate;
        let Some(record) = self.history.get_mut(index) else {
            return self.reject(not_borrowed());
        };

        let days_overdue = record.days_overdue(on);
        let penalty = record.close(on, rate);
        let due_date = record.due_date;
        let student_id = record.student_id.clone();

        self.active_loans.remove(book_id);
        if let Some(book) = self.books.get_mut(book_id) {
            book.is_borrowed = false;
        }

        let student_name =
            self.students.get(&student_id).map(|student| student.name.clone()).unwrap_or_default();
        let receipt = ReturnReceipt {
            book_id: book_id.to_string(),
            title,
            student_id,
            student_name,
            return_date: on,
            due_date,
            days_overdue,
            penalty,
        };

        self.notify(&CatalogEvent::Returned(receipt.clone()));
        Ok(receipt)
    }

    /// Look up a book by id
    #[must_use]
    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.get(id)
    }

    /// Look up a student by id
    #[must_use]
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.get(id)
    }

    /// The open loan on a book, if it is out
    #[must_use]
    pub fn active_loan(&self, book_id: &str) -> Option<&LoanRecord> {
        self.active_loans.get(book_id).and_then(|&index| self.history.get(index))
    }

    /// Every book, ordered by id
    #[must_use]
    pub fn list_books(&self) -> Vec<&Book> {
        self.books.values().collect()
    }

    /// Every student, ordered by id
    #[must_use]
    pub fn list_students(&self) -> Vec<&Student> {
        self.students.values().collect()
    }

    /// Open loans ordered by book id, optionally only those held by one student
    #[must_use]
    pub fn list_active_loans(&self, student_id: Option<&str>) -> Vec<&LoanRecord> {
        self.active_loans
            .values()
            .filter_map(|&index| self.history.get(index))
            .filter(|record| student_id.is_none_or(|id| record.student_id == id))
            .collect()
    }

    /// Open loans whose due date is before `as_of`, with penalties accrued to that day
    #[must_use]
    pub fn list_overdue(&self, as_of: NaiveDate) -> Vec<OverdueLoan<'_>> {
        let rate = self.policy.penalty_rate;
        self.list_active_loans(None)
            .into_iter()
            .filter(|record| record.is_overdue(as_of))
            .map(|record| OverdueLoan {
                record,
                days_overdue: record.days_overdue(as_of),
                penalty: record.penalty_as_of(as_of, rate),
            })
            .collect()
    }

    /// Every loan ever opened, in checkout order
    #[must_use]
    pub fn history(&self) -> &[LoanRecord] {
        &self.history
    }
}
