//! Service layer for larder
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, read-time joins, and cross-entity operations.

pub mod alerts;
pub mod budget;
pub mod ingredient;
pub mod meal;
pub mod preparation;

pub use alerts::{AlertEntry, AlertReport, AlertService};
pub use budget::{BudgetService, UsageSnapshot};
pub use ingredient::{IngredientService, IngredientSummary, IngredientUpdate};
pub use meal::{LineInput, MealService, MealUpdate, ResolvedLine, ResolvedMeal};
pub use preparation::{
    DeductedLine, HistoryEntry, PreparationOutcome, PreparationService,
};
