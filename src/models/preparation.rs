//! Preparation record model
//!
//! One record per executed preparation: which meal, how many portions, and
//! what the consumed stock cost at the time. Records are append-only; nothing
//! in the core mutates or deletes them after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{MealId, PreparationId};
use super::money::Money;

/// An immutable record of a meal preparation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparationRecord {
    /// Unique identifier
    pub id: PreparationId,

    /// The meal that was prepared
    pub meal_id: MealId,

    /// Number of portions prepared (always >= 1)
    pub quantity_prepared: u32,

    /// Total ingredient cost, rounded to 2 decimal places
    pub total_cost: Money,

    /// When the preparation happened (UTC)
    pub prepared_at: DateTime<Utc>,
}

impl PreparationRecord {
    /// Create a new preparation record stamped with the current time
    pub fn new(meal_id: MealId, quantity_prepared: u32, total_cost: Money) -> Self {
        Self {
            id: PreparationId::new(),
            meal_id,
            quantity_prepared,
            total_cost,
            prepared_at: Utc::now(),
        }
    }
}
