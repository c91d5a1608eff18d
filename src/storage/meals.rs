//! Meal registry storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{LarderError, LarderResult};
use crate::models::{
    ids::{IngredientId, MealId},
    Meal,
};
use crate::storage::file_io::{read_json, write_json_atomic};

/// Container for meal data persistence
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct MealData {
    meals: Vec<Meal>,
}

/// Repository for meals and their recipe lines
pub struct MealRepository {
    meals: RwLock<HashMap<MealId, Meal>>,
    file_path: PathBuf,
}

impl MealRepository {
    /// Create a new meal repository
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            meals: RwLock::new(HashMap::new()),
            file_path,
        }
    }

    /// Load meals from disk
    pub fn load(&self) -> LarderResult<()> {
        let data: MealData = read_json(&self.file_path)?;

        let mut meals = self
            .meals
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        meals.clear();
        for meal in data.meals {
            meals.insert(meal.id, meal);
        }

        Ok(())
    }

    /// Save meals to disk
    pub fn save(&self) -> LarderResult<()> {
        let meals = self
            .meals
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let data = MealData {
            meals: meals.values().cloned().collect(),
        };

        write_json_atomic(&self.file_path, &data)
    }

    /// Get a meal by ID
    pub fn get(&self, id: MealId) -> LarderResult<Option<Meal>> {
        let meals = self
            .meals
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(meals.get(&id).cloned())
    }

    /// Get all meals sorted by name
    pub fn get_all(&self) -> LarderResult<Vec<Meal>> {
        let meals = self
            .meals
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut result: Vec<Meal> = meals.values().cloned().collect();
        result.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        Ok(result)
    }

    /// Find a meal by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> LarderResult<Option<Meal>> {
        let meals = self
            .meals
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(meals
            .values()
            .find(|m| m.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a meal
    pub fn upsert(&self, meal: Meal) -> LarderResult<()> {
        let mut meals = self
            .meals
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        meals.insert(meal.id, meal);
        Ok(())
    }

    /// Delete a meal, returning whether it existed
    pub fn delete(&self, id: MealId) -> LarderResult<bool> {
        let mut meals = self
            .meals
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(meals.remove(&id).is_some())
    }

    /// Check if a meal exists
    pub fn exists(&self, id: MealId) -> LarderResult<bool> {
        let meals = self
            .meals
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(meals.contains_key(&id))
    }

    /// Check if a meal name is already taken (case-insensitive)
    pub fn name_exists(&self, name: &str, exclude_id: Option<MealId>) -> LarderResult<bool> {
        let meals = self
            .meals
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(meals
            .values()
            .any(|m| m.name.to_lowercase() == name_lower && Some(m.id) != exclude_id))
    }

    /// Count all meals
    pub fn count(&self) -> LarderResult<usize> {
        let meals = self
            .meals
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(meals.len())
    }

    /// Names of meals whose recipe uses the given ingredient
    pub fn names_using_ingredient(&self, ingredient_id: IngredientId) -> LarderResult<Vec<String>> {
        let meals = self
            .meals
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut names: Vec<String> = meals
            .values()
            .filter(|m| m.lines.iter().any(|l| l.ingredient_id == ingredient_id))
            .map(|m| m.name.clone())
            .collect();
        names.sort();

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecipeLine;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, MealRepository) {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("meals.json");
        let repo = MealRepository::new(file_path);
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

        let meal = Meal::new("Jollof Rice");
        let id = meal.id;

        repo.upsert(meal).unwrap();

        let loaded = repo.get(id).unwrap().unwrap();
        assert_eq!(loaded.name, "Jollof Rice");
        assert!(loaded.lines.is_empty());
    }

    #[test]
    fn test_save_and_reload_keeps_lines() {
        let (_temp, repo) = create_test_repo();

        let mut meal = Meal::new("Jollof Rice");
        meal.description = Some("Party size".to_string());
        let ingredient_id = IngredientId::new();
        meal.set_lines(vec![RecipeLine {
            ingredient_id,
            quantity: Decimal::from(2),
        }]);
        let id = meal.id;

        repo.upsert(meal).unwrap();
        repo.save().unwrap();

        let repo2 = MealRepository::new(repo.file_path.clone());
        repo2.load().unwrap();

        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded.lines.len(), 1);
        assert_eq!(loaded.lines[0].ingredient_id, ingredient_id);
        assert_eq!(loaded.description.as_deref(), Some("Party size"));
    }

    #[test]
    fn test_get_by_name() {
        let (_temp, repo) = create_test_repo();

        repo.upsert(Meal::new("Egusi Soup")).unwrap();

        assert!(repo.get_by_name("egusi soup").unwrap().is_some());
        assert!(repo.get_by_name("Okra Soup").unwrap().is_none());
    }

    #[test]
    fn test_delete() {
        let (_temp, repo) = create_test_repo();

        let meal = Meal::new("Jollof Rice");
        let id = meal.id;
        repo.upsert(meal).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
    }

    #[test]
    fn test_names_using_ingredient() {
        let (_temp, repo) = create_test_repo();

        let rice_id = IngredientId::new();
        let oil_id = IngredientId::new();

        let mut jollof = Meal::new("Jollof Rice");
        jollof.set_lines(vec![
            RecipeLine {
                ingredient_id: rice_id,
                quantity: Decimal::from(2),
            },
            RecipeLine {
                ingredient_id: oil_id,
                quantity: Decimal::from(1),
            },
        ]);

        let mut fried = Meal::new("Fried Rice");
        fried.set_lines(vec![RecipeLine {
            ingredient_id: rice_id,
            quantity: Decimal::from(3),
        }]);

        repo.upsert(jollof).unwrap();
        repo.upsert(fried).unwrap();

        let users = repo.names_using_ingredient(rice_id).unwrap();
        assert_eq!(users, vec!["Fried Rice", "Jollof Rice"]);

        let users = repo.names_using_ingredient(oil_id).unwrap();
        assert_eq!(users, vec!["Jollof Rice"]);
    }
}
