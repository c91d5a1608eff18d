//! Meal and recipe line models
//!
//! A meal owns its recipe lines: the per-portion ingredient quantities. Lines
//! are embedded in the meal record, so replacing the ingredient set is a
//! single-record update and partial replacement is never observable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::ids::{IngredientId, MealId};

/// The quantity of one ingredient required for a single portion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    /// The ingredient consumed
    pub ingredient_id: IngredientId,

    /// Quantity per portion, in the ingredient's unit
    pub quantity: Decimal,
}

impl RecipeLine {
    /// Create a new recipe line
    pub fn new(ingredient_id: IngredientId, quantity: Decimal) -> Self {
        Self {
            ingredient_id,
            quantity,
        }
    }
}

/// A meal with its recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    /// Unique identifier
    pub id: MealId,

    /// Meal name
    pub name: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Per-portion ingredient requirements
    #[serde(default)]
    pub lines: Vec<RecipeLine>,

    /// When the meal was created
    pub created_at: DateTime<Utc>,

    /// When the meal was last modified
    pub updated_at: DateTime<Utc>,
}

impl Meal {
    /// Create a new meal with no recipe lines
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: MealId::new(),
            name: name.into(),
            description: None,
            lines: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the full set of recipe lines
    pub fn set_lines(&mut self, lines: Vec<RecipeLine>) {
        self.lines = lines;
        self.updated_at = Utc::now();
    }

    /// Whether the meal has any recipe lines (a meal without lines cannot be
    /// prepared)
    pub fn has_lines(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Validate the meal
    pub fn validate(&self) -> Result<(), MealValidationError> {
        if self.name.trim().is_empty() {
            return Err(MealValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(MealValidationError::NameTooLong(self.name.len()));
        }

        let mut seen = HashSet::new();
        for line in &self.lines {
            if line.quantity <= Decimal::ZERO {
                return Err(MealValidationError::NonPositiveLineQuantity);
            }
            if !seen.insert(line.ingredient_id) {
                return Err(MealValidationError::DuplicateIngredient);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for meals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealValidationError {
    EmptyName,
    NameTooLong(usize),
    NonPositiveLineQuantity,
    DuplicateIngredient,
}

impl fmt::Display for MealValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Meal name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "Meal name too long ({} chars, max 50)", len),
            Self::NonPositiveLineQuantity => {
                write!(f, "Recipe line quantities must be greater than zero")
            }
            Self::DuplicateIngredient => {
                write!(f, "An ingredient may appear at most once per meal")
            }
        }
    }
}

impl std::error::Error for MealValidationError {}
