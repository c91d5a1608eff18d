//! Ingredient model
//!
//! An ingredient is one row of the stock ledger: how much is on hand, what a
//! unit of it costs, and the thresholds that drive restock/surplus alerts.
//! `current_stock` is mutated by direct edits and by preparation deductions;
//! the preparation path is the one that must never drive it negative.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{IngredientId, UnitId};
use super::money::Money;

/// A stocked ingredient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique identifier
    pub id: IngredientId,

    /// Ingredient name
    pub name: String,

    /// The measurement unit stock is counted in
    pub unit_id: UnitId,

    /// Cost of one unit of this ingredient
    pub cost_per_unit: Money,

    /// Quantity currently on hand
    pub current_stock: Decimal,

    /// Stock below this triggers a low-stock alert
    pub min_stock: Decimal,

    /// Stock above this triggers a surplus alert (no alert when unset)
    pub max_stock: Option<Decimal>,

    /// When the ingredient was created
    pub created_at: DateTime<Utc>,

    /// When the ingredient was last modified
    pub updated_at: DateTime<Utc>,
}

impl Ingredient {
    /// Create a new ingredient with zero cost and stock
    pub fn new(name: impl Into<String>, unit_id: UnitId) -> Self {
        let now = Utc::now();
        Self {
            id: IngredientId::new(),
            name: name.into(),
            unit_id,
            cost_per_unit: Money::zero(),
            current_stock: Decimal::ZERO,
            min_stock: Decimal::ZERO,
            max_stock: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether stock has fallen below the minimum threshold
    pub fn is_low_stock(&self) -> bool {
        self.current_stock < self.min_stock
    }

    /// Whether stock has risen above the maximum threshold
    pub fn is_surplus(&self) -> bool {
        match self.max_stock {
            Some(max) => self.current_stock > max,
            None => false,
        }
    }

    /// Validate the ingredient
    pub fn validate(&self) -> Result<(), IngredientValidationError> {
        if self.name.trim().is_empty() {
            return Err(IngredientValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(IngredientValidationError::NameTooLong(self.name.len()));
        }

        if self.cost_per_unit.is_negative() {
            return Err(IngredientValidationError::NegativeCost);
        }

        if self.min_stock < Decimal::ZERO {
            return Err(IngredientValidationError::NegativeMinStock);
        }

        if let Some(max) = self.max_stock {
            if max < self.min_stock {
                return Err(IngredientValidationError::MaxBelowMin);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for ingredients
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeCost,
    NegativeMinStock,
    MaxBelowMin,
}

impl fmt::Display for IngredientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Ingredient name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Ingredient name too long ({} chars, max 50)", len)
            }
            Self::NegativeCost => write!(f, "Cost per unit cannot be negative"),
            Self::NegativeMinStock => write!(f, "Minimum stock cannot be negative"),
            Self::MaxBelowMin => write!(f, "Maximum stock cannot be below minimum stock"),
        }
    }
}

impl std::error::Error for IngredientValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_new_ingredient() {
        let ingredient = Ingredient::new("Rice", UnitId::new());
        assert_eq!(ingredient.name, "Rice");
        assert!(ingredient.current_stock.is_zero());
        assert!(ingredient.max_stock.is_none());
        assert!(ingredient.validate().is_ok());
    }

    #[test]
    fn test_threshold_predicates() {
        let mut ingredient = Ingredient::new("Rice", UnitId::new());
        ingredient.min_stock = dec("5");
        ingredient.current_stock = dec("4");
        assert!(ingredient.is_low_stock());
        assert!(!ingredient.is_surplus());

        ingredient.current_stock = dec("6");
        assert!(!ingredient.is_low_stock());

        ingredient.max_stock = Some(dec("10"));
        ingredient.current_stock = dec("12");
        assert!(ingredient.is_surplus());
        assert!(!ingredient.is_low_stock());
    }

    #[test]
    fn test_boundary_is_not_alerting() {
        // Exactly at a threshold is healthy: the predicates are strict
        let mut ingredient = Ingredient::new("Rice", UnitId::new());
        ingredient.min_stock = dec("5");
        ingredient.current_stock = dec("5");
        assert!(!ingredient.is_low_stock());

        ingredient.max_stock = Some(dec("5"));
        assert!(!ingredient.is_surplus());
    }

    #[test]
    fn test_validation() {
        let mut ingredient = Ingredient::new("Rice", UnitId::new());

        ingredient.name = String::new();
        assert_eq!(
            ingredient.validate(),
            Err(IngredientValidationError::EmptyName)
        );

        ingredient.name = "Rice".to_string();
        ingredient.min_stock = dec("-1");
        assert_eq!(
            ingredient.validate(),
            Err(IngredientValidationError::NegativeMinStock)
        );

        ingredient.min_stock = dec("5");
        ingredient.max_stock = Some(dec("3"));
        assert_eq!(
            ingredient.validate(),
            Err(IngredientValidationError::MaxBelowMin)
        );

        ingredient.max_stock = Some(dec("10"));
        assert!(ingredient.validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let mut ingredient = Ingredient::new("Palm Oil", UnitId::new());
        ingredient.current_stock = dec("2.5");
        ingredient.cost_per_unit = Money::new(dec("1200"));

        let json = serde_json::to_string(&ingredient).unwrap();
        let deserialized: Ingredient = serde_json::from_str(&json).unwrap();
        assert_eq!(ingredient.id, deserialized.id);
        assert_eq!(ingredient.current_stock, deserialized.current_stock);
        assert_eq!(ingredient.cost_per_unit, deserialized.cost_per_unit);
    }
}
