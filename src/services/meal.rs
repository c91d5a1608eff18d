//! Meal service
//!
//! Provides business logic for recipes: CRUD operations plus the read-time
//! join of recipe lines with live ingredient names, units, and costs.

use rust_decimal::Decimal;

use crate::audit::EntityType;
use crate::error::{LarderError, LarderResult};
use crate::models::{
    ids::{IngredientId, MealId},
    Meal, Money, RecipeLine,
};
use crate::storage::Storage;

/// Service for meal management
pub struct MealService<'a> {
    storage: &'a Storage,
}

/// One raw recipe line as entered by the operator
#[derive(Debug, Clone)]
pub struct LineInput {
    /// Ingredient name or ID
    pub ingredient: String,
    pub quantity: Decimal,
}

/// A recipe line joined with live ingredient data
#[derive(Debug, Clone)]
pub struct ResolvedLine {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub quantity: Decimal,
    pub unit_name: String,
    pub cost_per_unit: Money,
}

/// A meal with its recipe lines resolved against the current ledger
#[derive(Debug, Clone)]
pub struct ResolvedMeal {
    pub meal: Meal,
    pub lines: Vec<ResolvedLine>,
    /// Cost of a single portion at current ingredient prices
    pub portion_cost: Money,
}

/// Fields that can change on an existing meal
#[derive(Debug, Clone, Default)]
pub struct MealUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    /// When present, replaces the full line set
    pub lines: Option<Vec<LineInput>>,
}

impl<'a> MealService<'a> {
    /// Create a new meal service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new meal with its recipe lines
    pub fn create(
        &self,
        name: &str,
        description: Option<String>,
        lines: Vec<LineInput>,
    ) -> LarderResult<ResolvedMeal> {
        // Validate name is not empty
        let name = name.trim();
        if name.is_empty() {
            return Err(LarderError::Validation("Meal name cannot be empty".into()));
        }

        // Check for duplicate name
        if self.storage.meals.name_exists(name, None)? {
            return Err(LarderError::Duplicate {
                entity_type: "Meal",
                identifier: name.to_string(),
            });
        }

        let mut meal = Meal::new(name);
        meal.description = description;
        meal.set_lines(self.resolve_line_inputs(&lines)?);

        // Validate
        meal.validate()
            .map_err(|e| LarderError::Validation(e.to_string()))?;

        // Save to storage
        self.storage.meals.upsert(meal.clone())?;
        self.storage.meals.save()?;

        // Audit log
        self.storage.log_create(
            EntityType::Meal,
            meal.id.to_string(),
            Some(meal.name.clone()),
            &meal,
        )?;

        self.resolve(meal)
    }

    /// Get a meal by ID
    pub fn get(&self, id: MealId) -> LarderResult<Option<Meal>> {
        self.storage.meals.get(id)
    }

    /// Find a meal by name or ID string
    ///
    /// Accepts the name (case-insensitive), a full UUID, or the short
    /// display form printed in listings and the audit log.
    pub fn find(&self, identifier: &str) -> LarderResult<Option<Meal>> {
        // Try by name first
        if let Some(meal) = self.storage.meals.get_by_name(identifier)? {
            return Ok(Some(meal));
        }

        // Try parsing as a full ID
        if let Ok(id) = identifier.parse::<MealId>() {
            if let Some(meal) = self.storage.meals.get(id)? {
                return Ok(Some(meal));
            }
        }

        // Fall back to the short display form
        let meals = self.storage.meals.get_all()?;
        Ok(meals.into_iter().find(|m| m.id.to_string() == identifier))
    }

    /// Get all meals with resolved recipe lines, sorted by name
    pub fn list(&self) -> LarderResult<Vec<ResolvedMeal>> {
        let meals = self.storage.meals.get_all()?;

        let mut resolved = Vec::with_capacity(meals.len());
        for meal in meals {
            resolved.push(self.resolve(meal)?);
        }

        Ok(resolved)
    }

    /// Join a meal's recipe lines with live ingredient data
    pub fn resolve(&self, meal: Meal) -> LarderResult<ResolvedMeal> {
        let mut lines = Vec::with_capacity(meal.lines.len());
        let mut portion_cost = Money::zero();

        for line in &meal.lines {
            let resolved = match self.storage.ingredients.get(line.ingredient_id)? {
                Some(ingredient) => {
                    let unit_name = self
                        .storage
                        .units
                        .get(ingredient.unit_id)?
                        .map(|u| u.name)
                        .unwrap_or_else(|| "(unknown)".to_string());

                    ResolvedLine {
                        ingredient_id: line.ingredient_id,
                        ingredient_name: ingredient.name,
                        quantity: line.quantity,
                        unit_name,
                        cost_per_unit: ingredient.cost_per_unit,
                    }
                }
                // Ingredient deletion is blocked while referenced, so this
                // only shows up for hand-edited data files
                None => ResolvedLine {
                    ingredient_id: line.ingredient_id,
                    ingredient_name: line.ingredient_id.to_string(),
                    quantity: line.quantity,
                    unit_name: "(unknown)".to_string(),
                    cost_per_unit: Money::zero(),
                },
            };

            portion_cost += resolved.cost_per_unit * resolved.quantity;
            lines.push(resolved);
        }

        Ok(ResolvedMeal {
            meal,
            lines,
            portion_cost,
        })
    }

    /// Update a meal
    ///
    /// Names and descriptions change only when given; the line set is
    /// replaced in full only when a new set is supplied.
    pub fn update(&self, id: MealId, update: MealUpdate) -> LarderResult<ResolvedMeal> {
        let mut meal = self
            .storage
            .meals
            .get(id)?
            .ok_or_else(|| LarderError::meal_not_found(id.to_string()))?;

        let before = meal.clone();
        let mut changes = Vec::new();

        // Update name if provided
        if let Some(new_name) = update.name.as_deref() {
            let new_name = new_name.trim();
            if new_name.is_empty() {
                return Err(LarderError::Validation("Meal name cannot be empty".into()));
            }

            // Check for duplicate name (excluding self)
            if self.storage.meals.name_exists(new_name, Some(id))? {
                return Err(LarderError::Duplicate {
                    entity_type: "Meal",
                    identifier: new_name.to_string(),
                });
            }

            if new_name != meal.name {
                changes.push(format!("name: {} -> {}", meal.name, new_name));
                meal.name = new_name.to_string();
            }
        }

        if let Some(description) = update.description {
            if meal.description.as_deref() != Some(description.as_str()) {
                changes.push("description updated".to_string());
                meal.description = Some(description);
            }
        }

        if let Some(inputs) = update.lines {
            let old_count = meal.lines.len();
            meal.set_lines(self.resolve_line_inputs(&inputs)?);
            changes.push(format!("lines: {} -> {}", old_count, meal.lines.len()));
        }

        meal.updated_at = chrono::Utc::now();

        // Validate
        meal.validate()
            .map_err(|e| LarderError::Validation(e.to_string()))?;

        // Save
        self.storage.meals.upsert(meal.clone())?;
        self.storage.meals.save()?;

        // Audit log
        let diff = if changes.is_empty() {
            None
        } else {
            Some(changes.join(", "))
        };

        self.storage.log_update(
            EntityType::Meal,
            meal.id.to_string(),
            Some(meal.name.clone()),
            &before,
            &meal,
            diff,
        )?;

        self.resolve(meal)
    }

    /// Delete a meal.
    ///
    /// Past preparations of the meal stay in the log.
    pub fn delete(&self, id: MealId) -> LarderResult<Meal> {
        let meal = self
            .storage
            .meals
            .get(id)?
            .ok_or_else(|| LarderError::meal_not_found(id.to_string()))?;

        self.storage.meals.delete(id)?;
        self.storage.meals.save()?;

        self.storage.log_delete(
            EntityType::Meal,
            meal.id.to_string(),
            Some(meal.name.clone()),
            &meal,
        )?;

        Ok(meal)
    }

    /// Turn raw operator input into recipe lines
    fn resolve_line_inputs(&self, inputs: &[LineInput]) -> LarderResult<Vec<RecipeLine>> {
        let mut lines = Vec::with_capacity(inputs.len());

        for input in inputs {
            if input.quantity <= Decimal::ZERO {
                return Err(LarderError::Validation(format!(
                    "Quantity for {} must be positive",
                    input.ingredient
                )));
            }

            let ingredient = self.find_ingredient(&input.ingredient)?;
            lines.push(RecipeLine {
                ingredient_id: ingredient,
                quantity: input.quantity,
            });
        }

        Ok(lines)
    }

    fn find_ingredient(&self, identifier: &str) -> LarderResult<IngredientId> {
        if let Some(ingredient) = self.storage.ingredients.get_by_name(identifier)? {
            return Ok(ingredient.id);
        }

        if let Ok(id) = identifier.parse::<IngredientId>() {
            if self.storage.ingredients.exists(id)? {
                return Ok(id);
            }
        }

        // Short display form, as printed in listings and the audit log
        let ingredients = self.storage.ingredients.get_all()?;
        ingredients
            .into_iter()
            .find(|i| i.id.to_string() == identifier)
            .map(|i| i.id)
            .ok_or_else(|| LarderError::ingredient_not_found(identifier))
    }
}
