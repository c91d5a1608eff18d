//! Ingredient ledger storage
//!
//! Besides the usual repository operations, this module provides the
//! reservation primitive behind meal preparation: `reserve` takes the
//! ledger's write lock, checks every demand against live stock, and hands
//! back a [`StockReservation`] that deducts and persists in one step while
//! the lock is still held. Nothing can read or change stock between the
//! check and the deduction.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockWriteGuard};

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LarderError, LarderResult, StockShortfall};
use crate::models::{ids::IngredientId, Ingredient};
use crate::storage::file_io::{read_json, write_json_atomic};

/// Container for ingredient data persistence
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct IngredientData {
    ingredients: Vec<Ingredient>,
}

/// A single requirement to check and deduct
#[derive(Debug, Clone)]
pub struct StockDemand {
    pub ingredient_id: IngredientId,
    pub needed: Decimal,
    /// Unit label carried along for shortfall reporting
    pub unit: String,
}

/// One checked line inside a reservation
#[derive(Debug, Clone)]
pub struct ReservedLine {
    /// Snapshot of the ingredient as it was when the reservation was taken
    pub ingredient: Ingredient,
    pub needed: Decimal,
    pub unit: String,
}

/// An exclusive claim on ledger stock.
///
/// Holds the ledger's write lock from the moment demands were checked until
/// [`commit`](StockReservation::commit) persists the deductions. Dropping the
/// reservation without committing releases the claim with stock untouched.
#[derive(Debug)]
pub struct StockReservation<'a> {
    guard: RwLockWriteGuard<'a, HashMap<IngredientId, Ingredient>>,
    file_path: &'a PathBuf,
    lines: Vec<ReservedLine>,
}

impl<'a> StockReservation<'a> {
    /// The checked lines, with pre-deduction ingredient snapshots
    pub fn lines(&self) -> &[ReservedLine] {
        &self.lines
    }

    /// Apply the reserved deductions and persist the ledger.
    ///
    /// If the write fails, in-memory stock is restored from the snapshots,
    /// so the ledger never exposes a partial deduction.
    pub fn commit(mut self) -> LarderResult<()> {
        let now = Utc::now();
        for line in &self.lines {
            if let Some(ingredient) = self.guard.get_mut(&line.ingredient.id) {
                ingredient.current_stock -= line.needed;
                ingredient.updated_at = now;
            }
        }

        let data = IngredientData {
            ingredients: self.guard.values().cloned().collect(),
        };

        if let Err(e) = write_json_atomic(self.file_path, &data) {
            for line in &self.lines {
                self.guard
                    .insert(line.ingredient.id, line.ingredient.clone());
            }
            return Err(e);
        }

        Ok(())
    }
}

/// Repository for the ingredient ledger
pub struct IngredientRepository {
    ingredients: RwLock<HashMap<IngredientId, Ingredient>>,
    file_path: PathBuf,
}

impl IngredientRepository {
    /// Create a new ingredient repository
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            ingredients: RwLock::new(HashMap::new()),
            file_path,
        }
    }

    /// Load ingredients from disk
    pub fn load(&self) -> LarderResult<()> {
        let data: IngredientData = read_json(&self.file_path)?;

        let mut ingredients = self
            .ingredients
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        ingredients.clear();
        for ingredient in data.ingredients {
            ingredients.insert(ingredient.id, ingredient);
        }

        Ok(())
    }

    /// Save ingredients to disk
    pub fn save(&self) -> LarderResult<()> {
        let ingredients = self
            .ingredients
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let data = IngredientData {
            ingredients: ingredients.values().cloned().collect(),
        };

        write_json_atomic(&self.file_path, &data)
    }

    /// Get an ingredient by ID
    pub fn get(&self, id: IngredientId) -> LarderResult<Option<Ingredient>> {
        let ingredients = self
            .ingredients
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(ingredients.get(&id).cloned())
    }

    /// Get all ingredients sorted by name
    pub fn get_all(&self) -> LarderResult<Vec<Ingredient>> {
        let ingredients = self
            .ingredients
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut result: Vec<Ingredient> = ingredients.values().cloned().collect();
        result.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        Ok(result)
    }

    /// Find an ingredient by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> LarderResult<Option<Ingredient>> {
        let ingredients = self
            .ingredients
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(ingredients
            .values()
            .find(|i| i.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update an ingredient
    pub fn upsert(&self, ingredient: Ingredient) -> LarderResult<()> {
        let mut ingredients = self
            .ingredients
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        ingredients.insert(ingredient.id, ingredient);
        Ok(())
    }

    /// Delete an ingredient, returning whether it existed
    pub fn delete(&self, id: IngredientId) -> LarderResult<bool> {
        let mut ingredients = self
            .ingredients
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(ingredients.remove(&id).is_some())
    }

    /// Check if an ingredient exists
    pub fn exists(&self, id: IngredientId) -> LarderResult<bool> {
        let ingredients = self
            .ingredients
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(ingredients.contains_key(&id))
    }

    /// Check if an ingredient name is already taken (case-insensitive)
    pub fn name_exists(
        &self,
        name: &str,
        exclude_id: Option<IngredientId>,
    ) -> LarderResult<bool> {
        let ingredients = self
            .ingredients
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(ingredients
            .values()
            .any(|i| i.name.to_lowercase() == name_lower && Some(i.id) != exclude_id))
    }

    /// Count all ingredients
    pub fn count(&self) -> LarderResult<usize> {
        let ingredients = self
            .ingredients
            .read()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(ingredients.len())
    }

    /// Apply a signed delta to an ingredient's stock.
    ///
    /// The delta may drive stock negative; callers decide whether that is
    /// acceptable for their operation.
    pub fn adjust_stock(
        &self,
        id: IngredientId,
        delta: Decimal,
    ) -> LarderResult<Option<Ingredient>> {
        let mut ingredients = self
            .ingredients
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match ingredients.get_mut(&id) {
            Some(ingredient) => {
                ingredient.current_stock += delta;
                ingredient.updated_at = Utc::now();
                Ok(Some(ingredient.clone()))
            }
            None => Ok(None),
        }
    }

    /// Add quantities back to ingredients, skipping any that no longer exist.
    ///
    /// Used to unwind committed deductions when a later step of the same
    /// operation fails.
    pub fn restock(&self, refunds: &[(IngredientId, Decimal)]) -> LarderResult<()> {
        let mut ingredients = self
            .ingredients
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let now = Utc::now();
        for (id, quantity) in refunds {
            if let Some(ingredient) = ingredients.get_mut(id) {
                ingredient.current_stock += *quantity;
                ingredient.updated_at = now;
            }
        }

        Ok(())
    }

    /// Check every demand against live stock and claim the ledger.
    ///
    /// All demands are validated before any is applied; if any ingredient is
    /// short, the full list of shortfalls is returned and nothing changes.
    pub fn reserve(&self, demands: &[StockDemand]) -> LarderResult<StockReservation<'_>> {
        let guard = self
            .ingredients
            .write()
            .map_err(|e| LarderError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut lines = Vec::with_capacity(demands.len());
        let mut shortfalls = Vec::new();

        for demand in demands {
            let ingredient = guard
                .get(&demand.ingredient_id)
                .ok_or_else(|| LarderError::ingredient_not_found(demand.ingredient_id.to_string()))?;

            if demand.needed > ingredient.current_stock {
                shortfalls.push(StockShortfall {
                    ingredient: ingredient.name.clone(),
                    needed: demand.needed,
                    available: ingredient.current_stock,
                    unit: demand.unit.clone(),
                });
            }

            lines.push(ReservedLine {
                ingredient: ingredient.clone(),
                needed: demand.needed,
                unit: demand.unit.clone(),
            });
        }

        if !shortfalls.is_empty() {
            return Err(LarderError::InsufficientStock { shortfalls });
        }

        Ok(StockReservation {
            guard,
            file_path: &self.file_path,
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ids::UnitId;
    use std::sync::Barrier;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, IngredientRepository) {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("ingredients.json");
        let repo = IngredientRepository::new(file_path);
        (temp_dir, repo)
    }

    fn stocked_ingredient(name: &str, stock: i64) -> Ingredient {
        let mut ingredient = Ingredient::new(name.to_string(), UnitId::new());
        ingredient.current_stock = Decimal::from(stock);
        ingredient
    }

    fn demand(id: IngredientId, needed: Decimal) -> StockDemand {
        StockDemand {
            ingredient_id: id,
            needed,
            unit: "kg".to_string(),
        }
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

        let ingredient = stocked_ingredient("Rice", 10);
        let id = ingredient.id;

        repo.upsert(ingredient).unwrap();

        let loaded = repo.get(id).unwrap().unwrap();
        assert_eq!(loaded.name, "Rice");
        assert_eq!(loaded.current_stock, Decimal::from(10));
    }

    #[test]
    fn test_save_and_reload() {
        let (_temp, repo) = create_test_repo();

        let ingredient = stocked_ingredient("Palm Oil", 3);
        let id = ingredient.id;

        repo.upsert(ingredient).unwrap();
        repo.save().unwrap();

        let repo2 = IngredientRepository::new(repo.file_path.clone());
        repo2.load().unwrap();

        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded.name, "Palm Oil");
        assert_eq!(loaded.current_stock, Decimal::from(3));
    }

    #[test]
    fn test_get_by_name() {
        let (_temp, repo) = create_test_repo();

        repo.upsert(stocked_ingredient("Rice", 10)).unwrap();

        assert!(repo.get_by_name("rice").unwrap().is_some());
        assert!(repo.get_by_name("RICE").unwrap().is_some());
        assert!(repo.get_by_name("Beans").unwrap().is_none());
    }

    #[test]
    fn test_delete() {
        let (_temp, repo) = create_test_repo();

        let ingredient = stocked_ingredient("Rice", 10);
        let id = ingredient.id;
        repo.upsert(ingredient).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }

    #[test]
    fn test_name_exists() {
        let (_temp, repo) = create_test_repo();

        let ingredient = stocked_ingredient("Rice", 10);
        let id = ingredient.id;
        repo.upsert(ingredient).unwrap();

        assert!(repo.name_exists("rice", None).unwrap());
        assert!(!repo.name_exists("rice", Some(id)).unwrap());
        assert!(!repo.name_exists("Beans", None).unwrap());
    }

    #[test]
    fn test_adjust_stock() {
        let (_temp, repo) = create_test_repo();

        let ingredient = stocked_ingredient("Rice", 10);
        let id = ingredient.id;
        repo.upsert(ingredient).unwrap();

        let updated = repo.adjust_stock(id, Decimal::from(5)).unwrap().unwrap();
        assert_eq!(updated.current_stock, Decimal::from(15));

        // Deltas may drive stock below zero
        let updated = repo.adjust_stock(id, Decimal::from(-20)).unwrap().unwrap();
        assert_eq!(updated.current_stock, Decimal::from(-5));
    }

    #[test]
    fn test_adjust_stock_missing() {
        let (_temp, repo) = create_test_repo();
        let result = repo.adjust_stock(IngredientId::new(), Decimal::from(1)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_reserve_deducts_on_commit() {
        let (_temp, repo) = create_test_repo();

        let ingredient = stocked_ingredient("Rice", 10);
        let id = ingredient.id;
        repo.upsert(ingredient).unwrap();

        let reservation = repo.reserve(&[demand(id, Decimal::from(6))]).unwrap();
        reservation.commit().unwrap();

        assert_eq!(
            repo.get(id).unwrap().unwrap().current_stock,
            Decimal::from(4)
        );

        // Commit also persisted the ledger
        let repo2 = IngredientRepository::new(repo.file_path.clone());
        repo2.load().unwrap();
        assert_eq!(
            repo2.get(id).unwrap().unwrap().current_stock,
            Decimal::from(4)
        );
    }

    #[test]
    fn test_reserve_exact_stock_allowed() {
        let (_temp, repo) = create_test_repo();

        let ingredient = stocked_ingredient("Rice", 10);
        let id = ingredient.id;
        repo.upsert(ingredient).unwrap();

        let reservation = repo.reserve(&[demand(id, Decimal::from(10))]).unwrap();
        reservation.commit().unwrap();

        assert_eq!(
            repo.get(id).unwrap().unwrap().current_stock,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_reserve_reports_all_shortfalls() {
        let (_temp, repo) = create_test_repo();

        let rice = stocked_ingredient("Rice", 10);
        let oil = stocked_ingredient("Palm Oil", 1);
        let (rice_id, oil_id) = (rice.id, oil.id);
        repo.upsert(rice).unwrap();
        repo.upsert(oil).unwrap();

        let err = repo
            .reserve(&[
                demand(rice_id, Decimal::from(12)),
                demand(oil_id, Decimal::from(2)),
            ])
            .unwrap_err();

        match err {
            LarderError::InsufficientStock { shortfalls } => {
                assert_eq!(shortfalls.len(), 2);
                assert_eq!(shortfalls[0].ingredient, "Rice");
                assert_eq!(shortfalls[1].ingredient, "Palm Oil");
            }
            other => panic!("expected InsufficientStock, got {:?}", other),
        }

        // Nothing was deducted
        assert_eq!(
            repo.get(rice_id).unwrap().unwrap().current_stock,
            Decimal::from(10)
        );
        assert_eq!(
            repo.get(oil_id).unwrap().unwrap().current_stock,
            Decimal::from(1)
        );
    }

    #[test]
    fn test_drop_without_commit_leaves_stock() {
        let (_temp, repo) = create_test_repo();

        let ingredient = stocked_ingredient("Rice", 10);
        let id = ingredient.id;
        repo.upsert(ingredient).unwrap();

        {
            let reservation = repo.reserve(&[demand(id, Decimal::from(6))]).unwrap();
            assert_eq!(reservation.lines().len(), 1);
        }

        assert_eq!(
            repo.get(id).unwrap().unwrap().current_stock,
            Decimal::from(10)
        );
    }

    #[test]
    fn test_commit_write_failure_restores_stock() {
        let (temp, repo) = create_test_repo();

        let ingredient = stocked_ingredient("Rice", 10);
        let id = ingredient.id;
        repo.upsert(ingredient).unwrap();

        // A directory squatting on the ledger path makes the persist step fail
        std::fs::create_dir(temp.path().join("ingredients.json")).unwrap();

        let reservation = repo.reserve(&[demand(id, Decimal::from(6))]).unwrap();
        let err = reservation.commit().unwrap_err();
        assert!(matches!(err, LarderError::Storage(_)));

        assert_eq!(
            repo.get(id).unwrap().unwrap().current_stock,
            Decimal::from(10)
        );
    }

    #[test]
    fn test_concurrent_reserve_only_one_wins() {
        let (_temp, repo) = create_test_repo();

        let ingredient = stocked_ingredient("Rice", 10);
        let id = ingredient.id;
        repo.upsert(ingredient).unwrap();

        let barrier = Barrier::new(2);
        let outcomes: Vec<bool> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let repo = &repo;
                    let barrier = &barrier;
                    s.spawn(move || {
                        barrier.wait();
                        match repo.reserve(&[demand(id, Decimal::from(6))]) {
                            Ok(reservation) => {
                                reservation.commit().unwrap();
                                true
                            }
                            Err(e) => {
                                assert!(e.is_insufficient_stock());
                                false
                            }
                        }
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        // Stock covered exactly one of the two claims
        assert_eq!(outcomes.iter().filter(|won| **won).count(), 1);
        assert_eq!(
            repo.get(id).unwrap().unwrap().current_stock,
            Decimal::from(4)
        );
    }

    #[test]
    fn test_restock() {
        let (_temp, repo) = create_test_repo();

        let ingredient = stocked_ingredient("Rice", 4);
        let id = ingredient.id;
        repo.upsert(ingredient).unwrap();

        repo.restock(&[(id, Decimal::from(6)), (IngredientId::new(), Decimal::from(1))])
            .unwrap();

        assert_eq!(
            repo.get(id).unwrap().unwrap().current_stock,
            Decimal::from(10)
        );
    }
}
