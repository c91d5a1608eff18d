//! Ingredient service
//!
//! Provides business logic for the ingredient ledger: CRUD operations,
//! stock adjustments, and validation.

use rust_decimal::Decimal;

use crate::audit::EntityType;
use crate::error::{LarderError, LarderResult};
use crate::models::{ids::IngredientId, ids::UnitId, Ingredient, Money, Unit};
use crate::storage::Storage;

/// Service for ingredient management
pub struct IngredientService<'a> {
    storage: &'a Storage,
}

/// An ingredient with its unit label resolved
#[derive(Debug, Clone)]
pub struct IngredientSummary {
    pub ingredient: Ingredient,
    pub unit_name: String,
}

/// Fields that can change on an existing ingredient
#[derive(Debug, Clone, Default)]
pub struct IngredientUpdate {
    pub name: Option<String>,
    /// Unit name or ID
    pub unit: Option<String>,
    pub cost_per_unit: Option<Money>,
    pub current_stock: Option<Decimal>,
    pub min_stock: Option<Decimal>,
    pub max_stock: Option<Decimal>,
    /// Remove the surplus threshold entirely
    pub clear_max: bool,
}

impl<'a> IngredientService<'a> {
    /// Create a new ingredient service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new ingredient
    pub fn create(
        &self,
        name: &str,
        unit: &str,
        cost_per_unit: Money,
        current_stock: Decimal,
        min_stock: Decimal,
        max_stock: Option<Decimal>,
    ) -> LarderResult<Ingredient> {
        // Validate name is not empty
        let name = name.trim();
        if name.is_empty() {
            return Err(LarderError::Validation(
                "Ingredient name cannot be empty".into(),
            ));
        }

        // Check for duplicate name
        if self.storage.ingredients.name_exists(name, None)? {
            return Err(LarderError::Duplicate {
                entity_type: "Ingredient",
                identifier: name.to_string(),
            });
        }

        let unit = self.resolve_unit(unit)?;

        if current_stock < Decimal::ZERO {
            return Err(LarderError::Validation(
                "Starting stock cannot be negative".into(),
            ));
        }

        // Create the ingredient
        let mut ingredient = Ingredient::new(name.to_string(), unit.id);
        ingredient.cost_per_unit = cost_per_unit;
        ingredient.current_stock = current_stock;
        ingredient.min_stock = min_stock;
        ingredient.max_stock = max_stock;

        // Validate
        ingredient
            .validate()
            .map_err(|e| LarderError::Validation(e.to_string()))?;

        // Save to storage
        self.storage.ingredients.upsert(ingredient.clone())?;
        self.storage.ingredients.save()?;

        // Audit log
        self.storage.log_create(
            EntityType::Ingredient,
            ingredient.id.to_string(),
            Some(ingredient.name.clone()),
            &ingredient,
        )?;

        Ok(ingredient)
    }

    /// Get an ingredient by ID
    pub fn get(&self, id: IngredientId) -> LarderResult<Option<Ingredient>> {
        self.storage.ingredients.get(id)
    }

    /// Find an ingredient by name or ID string
    ///
    /// Accepts the name (case-insensitive), a full UUID, or the short
    /// display form printed in listings and the audit log.
    pub fn find(&self, identifier: &str) -> LarderResult<Option<Ingredient>> {
        // Try by name first
        if let Some(ingredient) = self.storage.ingredients.get_by_name(identifier)? {
            return Ok(Some(ingredient));
        }

        // Try parsing as a full ID
        if let Ok(id) = identifier.parse::<IngredientId>() {
            if let Some(ingredient) = self.storage.ingredients.get(id)? {
                return Ok(Some(ingredient));
            }
        }

        // Fall back to the short display form
        let ingredients = self.storage.ingredients.get_all()?;
        Ok(ingredients
            .into_iter()
            .find(|i| i.id.to_string() == identifier))
    }

    /// Get all ingredients with their unit labels, sorted by name
    pub fn list(&self) -> LarderResult<Vec<IngredientSummary>> {
        let ingredients = self.storage.ingredients.get_all()?;

        let mut summaries = Vec::with_capacity(ingredients.len());
        for ingredient in ingredients {
            let unit_name = self.unit_label(ingredient.unit_id)?;
            summaries.push(IngredientSummary {
                ingredient,
                unit_name,
            });
        }

        Ok(summaries)
    }

    /// Get a single ingredient with its unit label
    pub fn get_summary(&self, ingredient: Ingredient) -> LarderResult<IngredientSummary> {
        let unit_name = self.unit_label(ingredient.unit_id)?;
        Ok(IngredientSummary {
            ingredient,
            unit_name,
        })
    }

    /// Update an ingredient
    pub fn update(&self, id: IngredientId, update: IngredientUpdate) -> LarderResult<Ingredient> {
        let mut ingredient = self
            .storage
            .ingredients
            .get(id)?
            .ok_or_else(|| LarderError::ingredient_not_found(id.to_string()))?;

        let before = ingredient.clone();
        let mut changes = Vec::new();

        // Update name if provided
        if let Some(new_name) = update.name.as_deref() {
            let new_name = new_name.trim();
            if new_name.is_empty() {
                return Err(LarderError::Validation(
                    "Ingredient name cannot be empty".into(),
                ));
            }

            // Check for duplicate name (excluding self)
            if self.storage.ingredients.name_exists(new_name, Some(id))? {
                return Err(LarderError::Duplicate {
                    entity_type: "Ingredient",
                    identifier: new_name.to_string(),
                });
            }

            if new_name != ingredient.name {
                changes.push(format!("name: {} -> {}", ingredient.name, new_name));
                ingredient.name = new_name.to_string();
            }
        }

        if let Some(unit) = update.unit.as_deref() {
            let unit = self.resolve_unit(unit)?;
            if unit.id != ingredient.unit_id {
                let old_label = self.unit_label(ingredient.unit_id)?;
                changes.push(format!("unit: {} -> {}", old_label, unit.name));
                ingredient.unit_id = unit.id;
            }
        }

        if let Some(cost) = update.cost_per_unit {
            if cost != ingredient.cost_per_unit {
                changes.push(format!(
                    "cost_per_unit: {} -> {}",
                    ingredient.cost_per_unit, cost
                ));
                ingredient.cost_per_unit = cost;
            }
        }

        if let Some(stock) = update.current_stock {
            if stock < Decimal::ZERO {
                return Err(LarderError::Validation("Stock cannot be negative".into()));
            }
            if stock != ingredient.current_stock {
                changes.push(format!(
                    "current_stock: {} -> {}",
                    ingredient.current_stock, stock
                ));
                ingredient.current_stock = stock;
            }
        }

        if let Some(min) = update.min_stock {
            if min != ingredient.min_stock {
                changes.push(format!("min_stock: {} -> {}", ingredient.min_stock, min));
                ingredient.min_stock = min;
            }
        }

        if update.clear_max {
            if ingredient.max_stock.is_some() {
                changes.push("max_stock: cleared".to_string());
                ingredient.max_stock = None;
            }
        } else if let Some(max) = update.max_stock {
            if ingredient.max_stock != Some(max) {
                let old = ingredient
                    .max_stock
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "(none)".to_string());
                changes.push(format!("max_stock: {} -> {}", old, max));
                ingredient.max_stock = Some(max);
            }
        }

        ingredient.updated_at = chrono::Utc::now();

        // Validate
        ingredient
            .validate()
            .map_err(|e| LarderError::Validation(e.to_string()))?;

        // Save
        self.storage.ingredients.upsert(ingredient.clone())?;
        self.storage.ingredients.save()?;

        // Audit log
        let diff = if changes.is_empty() {
            None
        } else {
            Some(changes.join(", "))
        };

        self.storage.log_update(
            EntityType::Ingredient,
            ingredient.id.to_string(),
            Some(ingredient.name.clone()),
            &before,
            &ingredient,
            diff,
        )?;

        Ok(ingredient)
    }

    /// Apply a signed stock correction.
    ///
    /// Unlike preparation, adjustments are manual corrections and may drive
    /// stock negative (the alert report will flag it as low).
    pub fn adjust_stock(&self, id: IngredientId, delta: Decimal) -> LarderResult<Ingredient> {
        let before = self
            .storage
            .ingredients
            .get(id)?
            .ok_or_else(|| LarderError::ingredient_not_found(id.to_string()))?;

        let ingredient = self
            .storage
            .ingredients
            .adjust_stock(id, delta)?
            .ok_or_else(|| LarderError::ingredient_not_found(id.to_string()))?;

        self.storage.ingredients.save()?;

        self.storage.log_update(
            EntityType::Ingredient,
            ingredient.id.to_string(),
            Some(ingredient.name.clone()),
            &before,
            &ingredient,
            Some(format!(
                "current_stock: {} -> {}",
                before.current_stock, ingredient.current_stock
            )),
        )?;

        Ok(ingredient)
    }

    /// Delete an ingredient.
    ///
    /// Refused while any meal's recipe still references it.
    pub fn delete(&self, id: IngredientId) -> LarderResult<Ingredient> {
        let ingredient = self
            .storage
            .ingredients
            .get(id)?
            .ok_or_else(|| LarderError::ingredient_not_found(id.to_string()))?;

        let users = self.storage.meals.names_using_ingredient(id)?;
        if !users.is_empty() {
            return Err(LarderError::Validation(format!(
                "Cannot delete {}: used by {}",
                ingredient.name,
                users.join(", ")
            )));
        }

        self.storage.ingredients.delete(id)?;
        self.storage.ingredients.save()?;

        self.storage.log_delete(
            EntityType::Ingredient,
            ingredient.id.to_string(),
            Some(ingredient.name.clone()),
            &ingredient,
        )?;

        Ok(ingredient)
    }

    /// Resolve a unit by name or ID string
    fn resolve_unit(&self, identifier: &str) -> LarderResult<Unit> {
        if let Some(unit) = self.storage.units.get_by_name(identifier)? {
            return Ok(unit);
        }

        if let Ok(id) = identifier.parse::<UnitId>() {
            if let Some(unit) = self.storage.units.get(id)? {
                return Ok(unit);
            }
        }

        Err(LarderError::unit_not_found(identifier))
    }

    /// Unit name for display, tolerating a dangling reference
    fn unit_label(&self, unit_id: UnitId) -> LarderResult<String> {
        Ok(self
            .storage
            .units
            .get(unit_id)?
            .map(|u| u.name)
            .unwrap_or_else(|| "(unknown)".to_string()))
    }
}
