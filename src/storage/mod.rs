//! Storage layer for the larder
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation, plus the audit log shared by all repositories.

pub mod budget;
pub mod file_io;
pub mod ingredients;
pub mod init;
pub mod meals;
pub mod preparations;
pub mod units;

pub use budget::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use ingredients::{IngredientRepository, ReservedLine, StockDemand, StockReservation};
pub use init::{initialize_storage, needs_initialization};
pub use meals::MealRepository;
pub use preparations::PreparationRepository;
pub use units::UnitRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::LarderPaths;
use crate::error::LarderResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LarderPaths,
    audit: AuditLogger,
    pub units: UnitRepository,
    pub ingredients: IngredientRepository,
    pub meals: MealRepository,
    pub preparations: PreparationRepository,
    pub budget: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LarderPaths) -> LarderResult<Self> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            units: UnitRepository::new(paths.units_file()),
            ingredients: IngredientRepository::new(paths.ingredients_file()),
            meals: MealRepository::new(paths.meals_file()),
            preparations: PreparationRepository::new(paths.preparations_file()),
            budget: BudgetRepository::new(paths.budget_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LarderPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> LarderResult<()> {
        self.units.load()?;
        self.ingredients.load()?;
        self.meals.load()?;
        self.preparations.load()?;
        self.budget.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> LarderResult<()> {
        self.units.save()?;
        self.ingredients.save()?;
        self.meals.save()?;
        self.preparations.save()?;
        self.budget.save()?;
        Ok(())
    }

    /// Check if storage has been initialized (has any data)
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }

    /// Record a create operation in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> LarderResult<()> {
        let entry = AuditEntry::create(entity_type, entity_id, entity_name, entity);
        self.audit.log(&entry)
    }

    /// Record an update operation in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        changes: Option<String>,
    ) -> LarderResult<()> {
        let entry = AuditEntry::update(entity_type, entity_id, entity_name, before, after, changes);
        self.audit.log(&entry)
    }

    /// Record a delete operation in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> LarderResult<()> {
        let entry = AuditEntry::delete(entity_type, entity_id, entity_name, entity);
        self.audit.log(&entry)
    }
}
