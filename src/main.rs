use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Days, Local, NaiveDate};
use clap::Parser;
use library_ledger::{ConsoleReporter, Library, LoanPolicy, TracingLogger};
use tracing_subscriber::EnvFilter;

/// Date format used in listings
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Scripted walk through the library catalog
#[derive(Debug, Parser)]
#[command(name = "library-ledger", version, about)]
struct Cli {
    /// JSON file with `borrowing_period_days` and `penalty_rate_cents`
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today instead of the system clock
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Send structured logs to stderr so they stay out of the report
fn initialize_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Print every book with its availability
fn print_books(library: &Library) {
    println!("\n--- Library Book Catalog ---");
    let books = library.list_books();
    if books.is_empty() {
        println!("No books in the library yet.");
    }
    for book in books {
        println!("{book}");
    }
    println!("--------------------------\n");
}

/// Print every registered student
fn print_students(library: &Library) {
    println!("\n--- Registered Students ---");
    let students = library.list_students();
    if students.is_empty() {
        println!("No students registered yet.");
    }
    for student in students {
        println!("{student}");
    }
    println!("-------------------------\n");
}

/// Print open loans, optionally for one student only
fn print_active_loans(library: &Library, student_id: Option<&str>) {
    println!("\n--- Currently Borrowed Books ---");
    let loans = library.list_active_loans(student_id);
    for record in &loans {
        let title = library.book(&record.book_id).map_or("?", |book| book.title.as_str());
        let name = library.student(&record.student_id).map_or("?", |student| student.name.as_str());
        println!(
            "- '{title}' (ID: {}) borrowed by {name} (ID: {}) on {}, Due: {}",
            record.book_id,
            record.student_id,
            record.checkout_date.format(DATE_FORMAT),
            record.due_date.format(DATE_FORMAT)
        );
    }
    match (loans.is_empty(), student_id) {
        (true, Some(id)) => println!("Student {id} has no books currently borrowed."),
        (true, None) => println!("No books are currently borrowed."),
        (false, _) => {}
    }
    println!("-----------------------------\n");
}

/// Print overdue loans with penalties accrued to `today`
fn print_overdue(library: &Library, today: NaiveDate) {
    println!("\n--- Overdue Books ---");
    let overdue = library.list_overdue(today);
    if overdue.is_empty() {
        println!("No books are currently overdue.");
    }
    for loan in overdue {
        let record = loan.record;
        let title = library.book(&record.book_id).map_or("?", |book| book.title.as_str());
        let name = library.student(&record.student_id).map_or("?", |student| student.name.as_str());
        println!(
            "- '{title}' (ID: {}) borrowed by {name} (ID: {})",
            record.book_id, record.student_id
        );
        println!(
            "  Due: {} ({} days overdue)",
            record.due_date.format(DATE_FORMAT),
            loan.days_overdue
        );
        println!("  Current Penalty: {}", loan.penalty);
    }
    println!("---------------------\n");
}

/// Run the scripted catalog walkthrough
fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_level);

    let policy = match &cli.policy {
        Some(path) => LoanPolicy::load(path)?,
        None => LoanPolicy::default(),
    };
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let long_ago =
        today.checked_sub_days(Days::new(30)).context("today is too close to the calendar start")?;

    let mut library = Library::with_policy(policy);
    library.register_observer(Box::new(TracingLogger));
    library.register_observer(Box::new(ConsoleReporter));

    library.add_student("S001", "Narek G")?;
    library.add_student("S002", "Ani P")?;
    library.add_student("S003", "Lia S")?;

    library.add_book("B001", "Clean Code", "Robert C. Martin")?;
    library.add_book("B002", "The Pragmatic Programmer", "Andrew Hunt")?;
    library.add_book("B003", "Eloquent JavaScript", "Marijn Haverbeke")?;
    library.add_book("B004", "Designing Data-Intensive Applications", "Martin Kleppmann")?;

    print_books(&library);
    print_students(&library);

    println!("\n--- Simulating Checkouts ---");
    // Clean Code went out a month ago so it shows up as overdue
    library.checkout("S001", "B001", long_ago)?;
    library.checkout("S002", "B003", today)?;
    library.checkout("S001", "B004", today)?;
    // Rejected: already borrowed, then unknown student
    drop(library.checkout("S001", "B003", today));
    drop(library.checkout("S999", "B002", today));
    println!("--------------------------\n");

    print_active_loans(&library, None);
    print_active_loans(&library, Some("S001"));
    print_active_loans(&library, Some("S003"));

    print_overdue(&library, today);

    println!("\n--- Simulating Returns ---");
    library.return_book("B001", today)?;
    library.return_book("B003", today)?;
    // Rejected: never borrowed
    drop(library.return_book("B002", today));
    println!("------------------------\n");

    print_active_loans(&library, None);
    print_books(&library);

    println!("\n--- Final Check for Overdue ---");
    print_overdue(&library, today);

    println!("\n--- Loan History ---");
    for record in library.history() {
        println!("{record}");
    }

    Ok(())
}
