//! Preparation history storage
//!
//! Append-only log of completed preparations. Records are never edited;
//! `discard` exists only to unwind an append whose persist step failed.

use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LarderError, LarderResult};
use crate::models::{ids::PreparationId, PreparationRecord};
use crate::storage::file_io::{read_json, write_json_atomic};

/// Container for preparation data persistence
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PreparationData {
    preparations: Vec<PreparationRecord>,
}

/// Repository for the preparation history
pub struct PreparationRepository {
    preparations: RwLock<Vec<PreparationRecord>>,
    file_path: PathBuf,
}

impl PreparationRepository {
    /// Create a new preparation repository
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            preparations: RwLock::new(Vec::new()),
            file_path,
        }
    }

    /// Load preparations from disk
    pub fn load(&self) -> LarderResult<()> {
        let data: PreparationData = read_json(&self.file_path)?;

        let mut preparations = self
            .preparations
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *preparations = data.preparations;
        Ok(())
    }

    /// Save preparations to disk
    pub fn save(&self) -> LarderResult<()> {
        let preparations = self
            .preparations
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let data = PreparationData {
            preparations: preparations.clone(),
        };

        write_json_atomic(&self.file_path, &data)
    }

    /// Append a completed preparation record
    pub fn append(&self, record: PreparationRecord) -> LarderResult<()> {
        let mut preparations = self
            .preparations
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        preparations.push(record);
        Ok(())
    }

    /// Remove a record, returning whether it was present.
    ///
    /// Only used to unwind an append whose persist step failed.
    pub fn discard(&self, id: PreparationId) -> LarderResult<bool> {
        let mut preparations = self
            .preparations
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = preparations.len();
        preparations.retain(|r| r.id != id);
        Ok(preparations.len() < before)
    }

    /// Most recent preparations, newest first, at most `limit`
    pub fn recent(&self, limit: usize) -> LarderResult<Vec<PreparationRecord>> {
        let preparations = self
            .preparations
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut result = preparations.clone();
        result.sort_by(|a, b| b.prepared_at.cmp(&a.prepared_at));
        result.truncate(limit);

        Ok(result)
    }

    /// Preparations whose UTC date falls within the range (inclusive)
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LarderResult<Vec<PreparationRecord>> {
        let preparations = self
            .preparations
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(preparations
            .iter()
            .filter(|r| {
                let date = r.prepared_at.date_naive();
                date >= start && date <= end
            })
            .cloned()
            .collect())
    }

    /// Count all preparation records
    pub fn count(&self) -> LarderResult<usize> {
        let preparations = self
            .preparations
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(preparations.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ids::MealId, Money, PreparationRecord};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, PreparationRepository) {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("preparations.json");
        let repo = PreparationRepository::new(file_path);
        (temp_dir, repo)
    }

    fn record_on(year: i32, month: u32, day: u32) -> PreparationRecord {
        PreparationRecord {
            id: PreparationId::new(),
            meal_id: MealId::new(),
            quantity_prepared: 1,
            total_cost: Money::new(Decimal::from(100)),
            prepared_at: Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_load() {
        let (_temp, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_append_and_save_reload() {
        let (_temp, repo) = create_test_repo();

        let record = PreparationRecord::new(MealId::new(), 2, Money::new(Decimal::from(500)));
        let id = record.id;

        repo.append(record).unwrap();
        repo.save().unwrap();

        let repo2 = PreparationRepository::new(repo.file_path.clone());
        repo2.load().unwrap();

        let all = repo2.recent(10).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].quantity_prepared, 2);
    }

    #[test]
    fn test_recent_newest_first() {
        let (_temp, repo) = create_test_repo();

        let old = record_on(2024, 1, 1);
        let newer = record_on(2024, 6, 1);
        let newest = record_on(2024, 12, 1);
        let newest_id = newest.id;

        repo.append(old).unwrap();
        repo.append(newest).unwrap();
        repo.append(newer).unwrap();

        let recent = repo.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, newest_id);
        assert!(recent[0].prepared_at > recent[1].prepared_at);
    }

    #[test]
    fn test_date_range_inclusive() {
        let (_temp, repo) = create_test_repo();

        repo.append(record_on(2024, 5, 31)).unwrap();
        repo.append(record_on(2024, 6, 1)).unwrap();
        repo.append(record_on(2024, 6, 30)).unwrap();
        repo.append(record_on(2024, 7, 1)).unwrap();

        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

        let in_range = repo.get_by_date_range(start, end).unwrap();
        assert_eq!(in_range.len(), 2);
    }

    #[test]
    fn test_discard() {
        let (_temp, repo) = create_test_repo();

        let record = PreparationRecord::new(MealId::new(), 1, Money::new(Decimal::from(50)));
        let id = record.id;
        repo.append(record).unwrap();

        assert!(repo.discard(id).unwrap());
        assert!(!repo.discard(id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
