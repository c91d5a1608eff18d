//! Budget period model
//!
//! A budget period is a date range with a spending ceiling. Periods may
//! overlap; when several contain today, the one with the latest start date is
//! the "current" period.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::PeriodId;
use super::money::Money;

/// A budget period with its spending ceiling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetPeriod {
    /// Unique identifier
    pub id: PeriodId,

    /// First day of the period (inclusive)
    pub period_start: NaiveDate,

    /// Last day of the period (inclusive)
    pub period_end: NaiveDate,

    /// Spending ceiling for the period
    pub budget_amount: Money,

    /// When the period was created
    pub created_at: DateTime<Utc>,
}

impl BudgetPeriod {
    /// Create a new budget period
    pub fn new(period_start: NaiveDate, period_end: NaiveDate, budget_amount: Money) -> Self {
        Self {
            id: PeriodId::new(),
            period_start,
            period_end,
            budget_amount,
            created_at: Utc::now(),
        }
    }

    /// Whether the given date falls inside the period (inclusive on both ends)
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.period_start <= date && date <= self.period_end
    }

    /// Validate the period
    pub fn validate(&self) -> Result<(), PeriodValidationError> {
        if self.period_end < self.period_start {
            return Err(PeriodValidationError::EndBeforeStart);
        }

        if self.budget_amount.is_negative() {
            return Err(PeriodValidationError::NegativeAmount);
        }

        Ok(())
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.period_start, self.period_end)
    }
}

/// Validation errors for budget periods
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodValidationError {
    EndBeforeStart,
    NegativeAmount,
}

impl fmt::Display for PeriodValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndBeforeStart => write!(f, "Period end cannot be before period start"),
            Self::NegativeAmount => write!(f, "Budget amount cannot be negative"),
        }
    }
}

impl std::error::Error for PeriodValidationError {}
