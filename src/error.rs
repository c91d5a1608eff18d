//! Custom error types for larder
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use rust_decimal::Decimal;
use thiserror::Error;

/// A single ingredient deficit discovered while validating a preparation
#[derive(Debug, Clone, PartialEq)]
pub struct StockShortfall {
    /// Ingredient name
    pub ingredient: String,
    /// Quantity the preparation requires
    pub needed: Decimal,
    /// Quantity currently in stock
    pub available: Decimal,
    /// Unit name, for readable reporting
    pub unit: String,
}

impl std::fmt::Display for StockShortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: need {} {}, have {}",
            self.ingredient, self.needed, self.unit, self.available
        )
    }
}

fn format_shortfalls(shortfalls: &[StockShortfall]) -> String {
    shortfalls
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// The main error type for larder operations
#[derive(Error, Debug)]
pub enum LarderError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// One or more ingredients cannot cover a preparation's demand
    #[error("Insufficient stock: {}", format_shortfalls(.shortfalls))]
    InsufficientStock { shortfalls: Vec<StockShortfall> },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LarderError {
    /// Create a "not found" error for units
    pub fn unit_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Unit",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for ingredients
    pub fn ingredient_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Ingredient",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for meals
    pub fn meal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Meal",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an insufficient stock error
    pub fn is_insufficient_stock(&self) -> bool {
        matches!(self, Self::InsufficientStock { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LarderError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LarderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for larder operations
pub type LarderResult<T> = Result<T, LarderError>;
