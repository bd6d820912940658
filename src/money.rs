use std::fmt;

use serde::{Deserialize, Serialize};

/// An exact currency amount, stored in cents
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct Money {
    /// Amount in hundredths of the currency unit
    cents: u64,
}

impl Money {
    /// No charge
    pub const ZERO: Self = Self { cents: 0 };

    /// Build an amount from a number of cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// The amount in cents
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.cents
    }

    /// Whether the amount is exactly zero
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.cents == 0
    }

    /// Multiply a per-unit amount by a count, saturating at the largest representable amount
    #[must_use]
    pub const fn times(self, count: u64) -> Self {
        Self { cents: self.cents.saturating_mul(count) }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.cents / 100, self.cents % 100)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Money;

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(Money::from_cents(300).to_string(), "$3.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::from_cents(1_234).to_string(), "$12.34");
    }

    #[test]
    fn test_times_is_exact() {
        assert_eq!(Money::from_cents(50).times(6), Money::from_cents(300));
        assert!(Money::from_cents(50).times(0).is_zero());
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Money::from_cents(u64::MAX).times(2).cents(), u64::MAX);
    }

    #[test]
    fn test_serializes_as_plain_cents() {
        let json = serde_json::to_string(&Money::from_cents(50)).unwrap_or_default();
        assert_eq!(json, "50");
    }
}
