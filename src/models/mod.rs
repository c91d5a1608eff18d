//! Core data models for larder
//!
//! This module contains all the data structures that represent the kitchen
//! domain: units, ingredients, meals and their recipe lines, preparation
//! records, and budget periods.

pub mod budget;
pub mod ids;
pub mod ingredient;
pub mod meal;
pub mod money;
pub mod preparation;
pub mod unit;

pub use budget::BudgetPeriod;
pub use ids::{IngredientId, MealId, PeriodId, PreparationId, UnitId};
pub use ingredient::Ingredient;
pub use meal::{Meal, RecipeLine};
pub use money::Money;
pub use preparation::PreparationRecord;
pub use unit::{DefaultUnit, Unit};
