use std::fmt;

use serde::{Deserialize, Serialize};

/// A registered borrower
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Student {
    /// Unique student id
    pub id: String,
    /// Display name
    pub name: String,
}

impl Student {
    /// Create a student record
    #[must_use]
    pub fn new(id: &str, name: &str) -> Self {
        Self { id: id.to_string(), name: name.to_string() }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID: {}, Name: {}", self.id, self.name)
    }
}
