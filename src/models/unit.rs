//! Measurement unit model
//!
//! Units are immutable reference data: seeded once at initialization and
//! referenced by ingredients. The core never mutates them afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UnitId;

/// A measurement unit (e.g., "kg", "L", "pcs")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Unique identifier
    pub id: UnitId,

    /// Unit name
    pub name: String,

    /// When the unit was created
    pub created_at: DateTime<Utc>,
}

impl Unit {
    /// Create a new unit
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UnitId::new(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Validate the unit
    pub fn validate(&self) -> Result<(), UnitValidationError> {
        if self.name.trim().is_empty() {
            return Err(UnitValidationError::EmptyName);
        }

        if self.name.len() > 20 {
            return Err(UnitValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Units seeded into a fresh catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultUnit {
    Kilogram,
    Gram,
    Liter,
    Milliliter,
    Piece,
    Bunch,
}

impl DefaultUnit {
    /// Get all default units in order
    pub fn all() -> &'static [Self] {
        &[
            Self::Kilogram,
            Self::Gram,
            Self::Liter,
            Self::Milliliter,
            Self::Piece,
            Self::Bunch,
        ]
    }

    /// Get the name for this default unit
    pub fn name(&self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Gram => "g",
            Self::Liter => "L",
            Self::Milliliter => "mL",
            Self::Piece => "pcs",
            Self::Bunch => "bunch",
        }
    }

    /// Create a Unit from this default
    pub fn to_unit(&self) -> Unit {
        Unit::new(self.name())
    }
}

/// Validation errors for units
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for UnitValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Unit name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "Unit name too long ({} chars, max 20)", len),
        }
    }
}

impl std::error::Error for UnitValidationError {}
