//! Budget period storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LarderError, LarderResult};
use crate::models::{ids::PeriodId, BudgetPeriod};
use crate::storage::file_io::{read_json, write_json_atomic};

/// Container for budget data persistence
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct BudgetData {
    periods: Vec<BudgetPeriod>,
}

/// Repository for budget periods
pub struct BudgetRepository {
    periods: RwLock<HashMap<PeriodId, BudgetPeriod>>,
    file_path: PathBuf,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            periods: RwLock::new(HashMap::new()),
            file_path,
        }
    }

    /// Load budget periods from disk
    pub fn load(&self) -> LarderResult<()> {
        let data: BudgetData = read_json(&self.file_path)?;

        let mut periods = self
            .periods
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        periods.clear();
        for period in data.periods {
            periods.insert(period.id, period);
        }

        Ok(())
    }

    /// Save budget periods to disk
    pub fn save(&self) -> LarderResult<()> {
        let periods = self
            .periods
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let data = BudgetData {
            periods: periods.values().cloned().collect(),
        };

        write_json_atomic(&self.file_path, &data)
    }

    /// Get a budget period by ID
    pub fn get(&self, id: PeriodId) -> LarderResult<Option<BudgetPeriod>> {
        let periods = self
            .periods
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(periods.get(&id).cloned())
    }

    /// Get all budget periods, newest start date first
    pub fn get_all(&self) -> LarderResult<Vec<BudgetPeriod>> {
        let periods = self
            .periods
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut result: Vec<BudgetPeriod> = periods.values().cloned().collect();
        result.sort_by(|a, b| b.period_start.cmp(&a.period_start));

        Ok(result)
    }

    /// Insert or update a budget period
    pub fn upsert(&self, period: BudgetPeriod) -> LarderResult<()> {
        let mut periods = self
            .periods
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        periods.insert(period.id, period);
        Ok(())
    }

    /// The period governing the given date.
    ///
    /// When periods overlap, the one with the latest start date wins.
    pub fn current_period(&self, today: NaiveDate) -> LarderResult<Option<BudgetPeriod>> {
        let periods = self
            .periods
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(periods
            .values()
            .filter(|p| p.contains(today))
            .max_by_key(|p| (p.period_start, p.created_at))
            .cloned())
    }

    /// Count all budget periods
    pub fn count(&self) -> LarderResult<usize> {
        let periods = self
            .periods
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(periods.len())
    }
}
