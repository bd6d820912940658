use chrono::NaiveDate;

use crate::{error::LibraryError, events::CatalogEvent};

/// Date format used in console output
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trait for reporting catalog activity
pub trait CatalogObserver {
    /// Called after an operation changed the catalog
    fn on_event(&self, event: &CatalogEvent);

    /// Called when an operation was rejected and the catalog left untouched
    fn on_rejected(&self, _error: &LibraryError) {}
}

/// Emits structured `tracing` events for everything the catalog does
#[derive(Debug, Default)]
pub struct TracingLogger;

impl CatalogObserver for TracingLogger {
    fn on_event(&self, event: &CatalogEvent) {
        match event {
            CatalogEvent::BookAdded(book) => {
                tracing::info!(book_id = %book.id, title = %book.title, "Book added");
            }
            CatalogEvent::StudentAdded(student) => {
                tracing::info!(student_id = %student.id, name = %student.name, "Student added");
            }
            CatalogEvent::CheckedOut { record, .. } => {
                tracing::info!(
                    student_id = %record.student_id,
                    book_id = %record.book_id,
                    due_date = %record.due_date,
                    "Book checked out"
                );
            }
            CatalogEvent::Returned(receipt) => {
                tracing::info!(
                    student_id = %receipt.student_id,
                    book_id = %receipt.book_id,
                    days_overdue = receipt.days_overdue,
                    penalty = %receipt.penalty,
                    "Book returned"
                );
            }
        }
    }

    fn on_rejected(&self, error: &LibraryError) {
        tracing::warn!(%error, "Operation rejected");
    }
}

/// Prints a human-readable account of each operation to stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter;

/// Render a date the way the console shows it
fn show(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

impl CatalogObserver for ConsoleReporter {
    fn on_event(&self, event: &CatalogEvent) {
        match event {
            CatalogEvent::BookAdded(book) => println!("Book added: {book}"),
            CatalogEvent::StudentAdded(student) => println!("Student added: {student}"),
            CatalogEvent::CheckedOut { record, student_name, title } => {
                println!("Checkout successful!");
                println!("   Student: {student_name} (ID: {})", record.student_id);
                println!("   Book: '{title}' (ID: {})", record.book_id);
                println!("   Checkout Date: {}", show(record.checkout_date));
                println!("   Due Date: {}", show(record.due_date));
            }
            CatalogEvent::Returned(receipt) => {
                println!("Return successful!");
                println!("   Book: '{}' (ID: {})", receipt.title, receipt.book_id);
                println!("   Student: {} (ID: {})", receipt.student_name, receipt.student_id);
                println!("   Return Date: {}", show(receipt.return_date));
                println!("   Due Date was: {}", show(receipt.due_date));
                if receipt.days_overdue > 0 {
                    println!("   Overdue by: {} days", receipt.days_overdue);
                    println!("   Penalty Due: {}", receipt.penalty);
                } else {
                    println!("   Returned on time or early.");
                }
            }
        }
    }

    fn on_rejected(&self, error: &LibraryError) {
        println!("Error: {error}");
    }
}
