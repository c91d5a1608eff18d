//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod alerts;
pub mod audit;
pub mod budget;
pub mod config;
pub mod ingredient;
pub mod meal;
pub mod prepare;
pub mod unit;

pub use alerts::handle_alerts;
pub use audit::handle_audit;
pub use budget::{handle_budget_command, BudgetCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use ingredient::{handle_ingredient_command, IngredientCommands};
pub use meal::{handle_meal_command, MealCommands};
pub use prepare::{handle_history, handle_prepare};
pub use unit::{handle_unit_command, UnitCommands};
