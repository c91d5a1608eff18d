//! Unit catalog storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{LarderError, LarderResult};
use crate::models::{ids::UnitId, Unit};
use crate::storage::file_io::{read_json, write_json_atomic};

/// Container for unit data persistence
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UnitData {
    pub units: Vec<Unit>,
}

/// Repository for measurement units
pub struct UnitRepository {
    units: RwLock<HashMap<UnitId, Unit>>,
    file_path: PathBuf,
}

impl UnitRepository {
    /// Create a new unit repository
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            units: RwLock::new(HashMap::new()),
            file_path,
        }
    }

    /// Load units from disk
    pub fn load(&self) -> LarderResult<()> {
        let data: UnitData = read_json(&self.file_path)?;

        let mut units = self
            .units
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        units.clear();
        for unit in data.units {
            units.insert(unit.id, unit);
        }

        Ok(())
    }

    /// Save units to disk
    pub fn save(&self) -> LarderResult<()> {
        let units = self
            .units
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let data = UnitData {
            units: units.values().cloned().collect(),
        };

        write_json_atomic(&self.file_path, &data)
    }

    /// Get a unit by ID
    pub fn get(&self, id: UnitId) -> LarderResult<Option<Unit>> {
        let units = self
            .units
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(units.get(&id).cloned())
    }

    /// Get all units sorted by name
    pub fn get_all(&self) -> LarderResult<Vec<Unit>> {
        let units = self
            .units
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut result: Vec<Unit> = units.values().cloned().collect();
        result.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        Ok(result)
    }

    /// Find a unit by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> LarderResult<Option<Unit>> {
        let units = self
            .units
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(units
            .values()
            .find(|u| u.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a unit
    pub fn upsert(&self, unit: Unit) -> LarderResult<()> {
        let mut units = self
            .units
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        units.insert(unit.id, unit);
        Ok(())
    }

    /// Check if a unit exists
    pub fn exists(&self, id: UnitId) -> LarderResult<bool> {
        let units = self
            .units
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(units.contains_key(&id))
    }

    /// Check if a unit name is already taken (case-insensitive)
    pub fn name_exists(&self, name: &str, exclude_id: Option<UnitId>) -> LarderResult<bool> {
        let units = self
            .units
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(units
            .values()
            .any(|u| u.name.to_lowercase() == name_lower && Some(u.id) != exclude_id))
    }

    /// Count all units
    pub fn count(&self) -> LarderResult<usize> {
        let units = self
            .units
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(units.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, UnitRepository) {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("units.json");
        let repo = UnitRepository::new(file_path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp, repo) = create_test_repo();

        let unit = Unit::new("kg".to_string());
        let id = unit.id;

        repo.upsert(unit.clone()).unwrap();

        let loaded = repo.get(id).unwrap().unwrap();
        assert_eq!(loaded.name, "kg");
    }

    #[test]
    fn test_save_and_reload() {
        let (_temp, repo) = create_test_repo();

        let unit = Unit::new("L".to_string());
        let id = unit.id;

        repo.upsert(unit).unwrap();
        repo.save().unwrap();

        let repo2 = UnitRepository::new(repo.file_path.clone());
        repo2.load().unwrap();

        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded.name, "L");
    }

    #[test]
    fn test_get_by_name_case_insensitive() {
        let (_temp, repo) = create_test_repo();

        repo.upsert(Unit::new("mL".to_string())).unwrap();

        assert!(repo.get_by_name("ml").unwrap().is_some());
        assert!(repo.get_by_name("ML").unwrap().is_some());
        assert!(repo.get_by_name("oz").unwrap().is_none());
    }

    #[test]
    fn test_get_all_sorted() {
        let (_temp, repo) = create_test_repo();

        repo.upsert(Unit::new("pcs".to_string())).unwrap();
        repo.upsert(Unit::new("bunch".to_string())).unwrap();
        repo.upsert(Unit::new("g".to_string())).unwrap();

        let all = repo.get_all().unwrap();
        let names: Vec<&str> = all.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["bunch", "g", "pcs"]);
    }

    #[test]
    fn test_name_exists() {
        let (_temp, repo) = create_test_repo();

        let unit = Unit::new("kg".to_string());
        let id = unit.id;
        repo.upsert(unit).unwrap();

        assert!(repo.name_exists("KG", None).unwrap());
        assert!(!repo.name_exists("KG", Some(id)).unwrap());
        assert!(!repo.name_exists("tonne", None).unwrap());
    }
}
