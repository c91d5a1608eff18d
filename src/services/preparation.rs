//! Preparation service
//!
//! Executes meal preparations against the ingredient ledger: checks every
//! recipe demand, deducts stock, computes cost, and records the event. The
//! check and the deduction happen under one exclusive ledger claim, so
//! concurrent preparations can never jointly overdraw an ingredient.

use rust_decimal::Decimal;

use crate::audit::EntityType;
use crate::error::{LarderError, LarderResult};
use crate::models::{
    ids::{IngredientId, MealId},
    Money, PreparationRecord,
};
use crate::storage::{StockDemand, Storage};

/// Service for preparing meals and browsing the preparation log
pub struct PreparationService<'a> {
    storage: &'a Storage,
}

/// One ingredient deduction applied by a preparation
#[derive(Debug, Clone)]
pub struct DeductedLine {
    pub ingredient_id: IngredientId,
    pub ingredient_name: String,
    pub quantity_deducted: Decimal,
    pub unit: String,
    pub remaining_stock: Decimal,
}

/// The result of a successful preparation
#[derive(Debug, Clone)]
pub struct PreparationOutcome {
    pub preparation: PreparationRecord,
    pub total_cost: Money,
    pub deducted: Vec<DeductedLine>,
}

/// A preparation record joined with its meal's name
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub preparation: PreparationRecord,
    /// Raw meal id when the meal has since been deleted
    pub meal_name: String,
}

impl<'a> PreparationService<'a> {
    /// Create a new preparation service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Prepare a meal: check stock, deduct it, and record the cost.
    ///
    /// Quantities below one are clamped to one, not rejected.
    pub fn prepare(&self, meal_id: MealId, quantity: i64) -> LarderResult<PreparationOutcome> {
        let quantity = quantity.max(1) as u32;

        let meal = self
            .storage
            .meals
            .get(meal_id)?
            .ok_or_else(|| LarderError::meal_not_found(meal_id.to_string()))?;

        // A meal with no recipe lines cannot be prepared
        if !meal.has_lines() {
            return Err(LarderError::meal_not_found(meal.name.clone()));
        }

        let portions = Decimal::from(quantity);

        // Resolve unit labels and merge any repeated ingredients up front
        let mut demands: Vec<StockDemand> = Vec::with_capacity(meal.lines.len());
        for line in &meal.lines {
            let needed = line.quantity * portions;
            if let Some(existing) = demands
                .iter_mut()
                .find(|d| d.ingredient_id == line.ingredient_id)
            {
                existing.needed += needed;
                continue;
            }

            let ingredient = self
                .storage
                .ingredients
                .get(line.ingredient_id)?
                .ok_or_else(|| {
                    LarderError::ingredient_not_found(line.ingredient_id.to_string())
                })?;

            let unit = self
                .storage
                .units
                .get(ingredient.unit_id)?
                .map(|u| u.name)
                .unwrap_or_else(|| "(unknown)".to_string());

            demands.push(StockDemand {
                ingredient_id: line.ingredient_id,
                needed,
                unit,
            });
        }

        // Check and deduct under one exclusive claim on the ledger
        let reservation = self.storage.ingredients.reserve(&demands)?;

        // Cost from the reservation's snapshot rows; rounded only here,
        // at the point of persisting
        let total_cost: Money = reservation
            .lines()
            .iter()
            .map(|l| l.ingredient.cost_per_unit * l.needed)
            .sum();
        let total_cost = total_cost.rounded();

        let deducted: Vec<DeductedLine> = reservation
            .lines()
            .iter()
            .map(|l| DeductedLine {
                ingredient_id: l.ingredient.id,
                ingredient_name: l.ingredient.name.clone(),
                quantity_deducted: l.needed,
                unit: l.unit.clone(),
                remaining_stock: l.ingredient.current_stock - l.needed,
            })
            .collect();

        reservation.commit()?;

        let record = PreparationRecord::new(meal.id, quantity, total_cost);

        self.storage.preparations.append(record.clone())?;
        if let Err(e) = self.storage.preparations.save() {
            // Put the stock back so a half-recorded preparation never survives
            self.storage.preparations.discard(record.id)?;
            let refunds: Vec<(IngredientId, Decimal)> = deducted
                .iter()
                .map(|d| (d.ingredient_id, d.quantity_deducted))
                .collect();
            self.storage.ingredients.restock(&refunds)?;
            // The next successful save re-syncs the ledger file
            let _ = self.storage.ingredients.save();
            return Err(e);
        }

        self.storage.log_create(
            EntityType::Preparation,
            record.id.to_string(),
            Some(meal.name.clone()),
            &record,
        )?;

        Ok(PreparationOutcome {
            preparation: record,
            total_cost,
            deducted,
        })
    }

    /// Most recent preparations joined with meal names, newest first
    pub fn history(&self, limit: usize) -> LarderResult<Vec<HistoryEntry>> {
        let records = self.storage.preparations.recent(limit)?;

        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            let meal_name = self
                .storage
                .meals
                .get(record.meal_id)?
                .map(|m| m.name)
                .unwrap_or_else(|| record.meal_id.to_string());

            entries.push(HistoryEntry {
                preparation: record,
                meal_name,
            });
        }

        Ok(entries)
    }
}
