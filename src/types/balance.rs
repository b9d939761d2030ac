//! Running due balance
//!
//! The due balance is maintained incrementally on every redemption and reset
//! by a clear. It is intentionally not derived from the used ledger, so the
//! two can drift when a price changes after redemption.

use super::code::Denomination;
use super::error::LedgerError;
use rust_decimal::Decimal;

/// Cumulative value of redeemed codes not yet cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DueBalance {
    pub total_due: Decimal,
}

impl DueBalance {
    pub fn new(total_due: Decimal) -> Self {
        DueBalance { total_due }
    }

    pub fn zero() -> Self {
        DueBalance {
            total_due: Decimal::ZERO,
        }
    }

    /// Add the value of a redemption
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ArithmeticOverflow`] if the sum does not fit.
    pub fn credit(&mut self, value: Decimal, amount: Denomination) -> Result<(), LedgerError> {
        self.total_due = self
            .total_due
            .checked_add(value)
            .ok_or_else(|| LedgerError::arithmetic_overflow("due balance", amount))?;
        Ok(())
    }
}
