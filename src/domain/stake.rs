//! Stake policy: per-line amounts and ticket totals.
//!
//! Amounts are yen as `Decimal`. A per-line amount must be a positive
//! multiple of the unit and fall inside the configured range; the ticket
//! total (lines × amount) is capped separately.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Violation of the stake policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StakeViolation {
    #[error("amount {amount} is not a positive multiple of {unit}")]
    NotMultiple { amount: Decimal, unit: Decimal },
    #[error("amount {amount} outside [{min}, {max}]")]
    OutOfRange { amount: Decimal, min: Decimal, max: Decimal },
    #[error("ticket total {total} exceeds {max}")]
    TotalExceeded { total: Decimal, max: Decimal },
}

/// Limits applied to a priced selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakePolicy {
    unit: Decimal,
    min_line: Decimal,
    max_line: Decimal,
    max_total: Decimal,
}

impl StakePolicy {
    /// Creates a policy with custom limits.
    pub const fn new(unit: Decimal, min_line: Decimal, max_line: Decimal, max_total: Decimal) -> Self {
        Self {
            unit,
            min_line,
            max_line,
            max_total,
        }
    }

    /// Check a per-line amount. A non-positive unit accepts nothing.
    pub fn check_line_amount(&self, amount: Decimal) -> Result<(), StakeViolation> {
        let multiple = self.unit > Decimal::ZERO
            && amount.checked_rem(self.unit).is_some_and(|r| r.is_zero());
        if amount <= Decimal::ZERO || !multiple {
            return Err(StakeViolation::NotMultiple {
                amount,
                unit: self.unit,
            });
        }
        if amount < self.min_line || amount > self.max_line {
            return Err(StakeViolation::OutOfRange {
                amount,
                min: self.min_line,
                max: self.max_line,
            });
        }
        Ok(())
    }

    /// Price `line_count` lines at `amount` each, enforcing every limit.
    pub fn price(&self, line_count: u64, amount: Decimal) -> Result<Decimal, StakeViolation> {
        self.check_line_amount(amount)?;
        let total = Decimal::from(line_count)
            .checked_mul(amount)
            .ok_or(StakeViolation::TotalExceeded {
                total: Decimal::MAX,
                max: self.max_total,
            })?;
        if total > self.max_total {
            return Err(StakeViolation::TotalExceeded {
                total,
                max: self.max_total,
            });
        }
        Ok(total)
    }
}

impl Default for StakePolicy {
    /// 100-yen units, 100 to 100,000 per line, 1,000,000 per ticket.
    fn default() -> Self {
        Self {
            unit: dec!(100),
            min_line: dec!(100),
            max_line: dec!(100000),
            max_total: dec!(1000000),
        }
    }
}
