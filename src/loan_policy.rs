use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{LibraryError, Result},
    money::Money,
};

/// Default number of days a book may be kept
pub const DEFAULT_BORROWING_PERIOD_DAYS: u32 = 14;

/// Default charge per overdue day, in cents
pub const DEFAULT_PENALTY_RATE_CENTS: u64 = 50;

/// The two constants that drive due dates and penalties
///
/// Loaded from JSON such as `{"borrowing_period_days": 21, "penalty_rate_cents": 25}`.
/// Omitted fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoanPolicy {
    /// Days between checkout and due date
    pub borrowing_period_days: u32,
    /// Charge per day past the due date
    #[serde(rename = "penalty_rate_cents")]
    pub penalty_rate: Money,
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            borrowing_period_days: DEFAULT_BORROWING_PERIOD_DAYS,
            penalty_rate: Money::from_cents(DEFAULT_PENALTY_RATE_CENTS),
        }
    }
}

impl LoanPolicy {
    /// Parse a policy from a JSON document
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` if the JSON is malformed or names an unknown field.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| LibraryError::Config(format!("Failed to parse loan policy: {e}")))
    }

    /// Read a policy from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            LibraryError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let policy = Self::from_json_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            borrowing_period_days = policy.borrowing_period_days,
            penalty_rate = %policy.penalty_rate,
            "Loaded loan policy"
        );
        Ok(policy)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::LoanPolicy;
    use crate::{error::LibraryError, money::Money};

    #[test]
    fn test_defaults() {
        let policy = LoanPolicy::default();
        assert_eq!(policy.borrowing_period_days, 14);
        assert_eq!(policy.penalty_rate, Money::from_cents(50));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let policy = LoanPolicy::from_json_str(r#"{"borrowing_period_days": 7}"#)
            .expect("valid policy");
        assert_eq!(policy.borrowing_period_days, 7);
        assert_eq!(policy.penalty_rate, Money::from_cents(50));

        let empty = LoanPolicy::from_json_str("{}").expect("valid policy");
        assert_eq!(empty, LoanPolicy::default());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result = LoanPolicy::from_json_str(r#"{"grace_days": 2}"#);
        assert!(matches!(result, Err(LibraryError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(br#"{"borrowing_period_days": 21, "penalty_rate_cents": 25}"#)
            .expect("write policy");

        let policy = LoanPolicy::load(file.path()).expect("load policy");
        assert_eq!(policy.borrowing_period_days, 21);
        assert_eq!(policy.penalty_rate, Money::from_cents(25));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = LoanPolicy::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(LibraryError::Config(_))));
    }
}
