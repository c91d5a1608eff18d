//! Storage initialization
//!
//! Handles first-run setup and default data creation

use crate::config::paths::LarderPaths;
use crate::error::LarderResult;
use crate::models::{DefaultUnit, Unit};

use super::file_io::write_json_atomic;
use super::units::UnitData;

/// Initialize storage for a fresh installation
///
/// Creates the directory tree and seeds the default unit catalog. Returns
/// the units that were seeded (empty when the catalog already existed) so
/// the caller can record them in the audit log.
pub fn initialize_storage(paths: &LarderPaths) -> LarderResult<Vec<Unit>> {
    // Ensure all directories exist
    paths.ensure_directories()?;

    // Seed default units if units.json doesn't exist
    if !paths.units_file().exists() {
        return create_default_units(paths);
    }

    Ok(Vec::new())
}

/// Create the standard kitchen measurement units
fn create_default_units(paths: &LarderPaths) -> LarderResult<Vec<Unit>> {
    let units: Vec<Unit> = DefaultUnit::all().iter().map(|d| d.to_unit()).collect();

    let data = UnitData {
        units: units.clone(),
    };
    write_json_atomic(paths.units_file(), &data)?;

    Ok(units)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &LarderPaths) -> bool {
    !paths.units_file().exists()
}
