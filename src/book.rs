use std::fmt;

use serde::{Deserialize, Serialize};

/// A catalogued book
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Book {
    /// Unique catalogue id
    pub id: String,
    /// Title as printed on the cover
    pub title: String,
    /// Author name
    pub author: String,
    /// Set while the book has an active loan
    pub is_borrowed: bool,
}

impl Book {
    /// Create an available book
    #[must_use]
    pub fn new(id: &str, title: &str, author: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            is_borrowed: false,
        }
    }

    /// Human-readable availability
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.is_borrowed { "Borrowed" } else { "Available" }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: '{}' by {} ({})",
            self.id,
            self.title,
            self.author,
            self.status_label()
        )
    }
}
