//! Alert service
//!
//! Scans the ingredient ledger for stock outside its thresholds. Evaluation
//! is read-only and recomputed from current stock on every call; alerts are
//! never stored.

use rust_decimal::Decimal;

use crate::error::LarderResult;
use crate::models::{ids::IngredientId, Ingredient};
use crate::storage::Storage;

/// Service for threshold alerts
pub struct AlertService<'a> {
    storage: &'a Storage,
}

/// One ingredient flagged by a threshold
#[derive(Debug, Clone)]
pub struct AlertEntry {
    pub ingredient_id: IngredientId,
    pub name: String,
    pub unit_name: String,
    pub current_stock: Decimal,
    pub min_stock: Decimal,
    pub max_stock: Option<Decimal>,
}

/// Alerts grouped by kind
#[derive(Debug, Clone, Default)]
pub struct AlertReport {
    /// Stock strictly below the minimum, most depleted first
    pub low_stock: Vec<AlertEntry>,

    /// Stock strictly above the maximum, lowest first
    pub surplus: Vec<AlertEntry>,
}

impl AlertReport {
    /// Whether no ingredient tripped a threshold
    pub fn is_empty(&self) -> bool {
        self.low_stock.is_empty() && self.surplus.is_empty()
    }
}

impl<'a> AlertService<'a> {
    /// Create a new alert service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Evaluate every ingredient against its thresholds in one pass
    pub fn evaluate(&self) -> LarderResult<AlertReport> {
        let ingredients = self.storage.ingredients.get_all()?;

        let mut report = AlertReport::default();
        for ingredient in ingredients {
            if ingredient.is_low_stock() {
                report.low_stock.push(self.entry(ingredient)?);
            } else if ingredient.is_surplus() {
                report.surplus.push(self.entry(ingredient)?);
            }
        }

        report
            .low_stock
            .sort_by(|a, b| a.current_stock.cmp(&b.current_stock));
        report
            .surplus
            .sort_by(|a, b| a.current_stock.cmp(&b.current_stock));

        Ok(report)
    }

    fn entry(&self, ingredient: Ingredient) -> LarderResult<AlertEntry> {
        let unit_name = self
            .storage
            .units
            .get(ingredient.unit_id)?
            .map(|u| u.name)
            .unwrap_or_else(|| "(unknown)".to_string());

        Ok(AlertEntry {
            ingredient_id: ingredient.id,
            name: ingredient.name,
            unit_name,
            current_stock: ingredient.current_stock,
            min_stock: ingredient.min_stock,
            max_stock: ingredient.max_stock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LarderPaths;
    use crate::models::{Money, Unit};
    use tempfile::TempDir;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LarderPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add_ingredient(
        storage: &Storage,
        name: &str,
        unit: &Unit,
        stock: &str,
        min: &str,
        max: Option<&str>,
    ) {
        let mut ingredient = Ingredient::new(name, unit.id);
        ingredient.cost_per_unit = Money::zero();
        ingredient.current_stock = dec(stock);
        ingredient.min_stock = dec(min);
        ingredient.max_stock = max.map(dec);
        storage.ingredients.upsert(ingredient).unwrap();
    }

    #[test]
    fn test_evaluate_splits_low_and_surplus() {
        let (_temp_dir, storage) = create_test_storage();
        let kg = Unit::new("kg");
        storage.units.upsert(kg.clone()).unwrap();

        add_ingredient(&storage, "Rice", &kg, "2", "5", Some("50"));
        add_ingredient(&storage, "Beans", &kg, "80", "5", Some("50"));
        add_ingredient(&storage, "Flour", &kg, "10", "5", Some("50"));

        let report = AlertService::new(&storage).evaluate().unwrap();

        assert_eq!(report.low_stock.len(), 1);
        assert_eq!(report.low_stock[0].name, "Rice");
        assert_eq!(report.low_stock[0].unit_name, "kg");
        assert_eq!(report.low_stock[0].current_stock, dec("2"));

        assert_eq!(report.surplus.len(), 1);
        assert_eq!(report.surplus[0].name, "Beans");

        assert!(!report.is_empty());
    }

    #[test]
    fn test_boundaries_do_not_alert() {
        let (_temp_dir, storage) = create_test_storage();
        let kg = Unit::new("kg");
        storage.units.upsert(kg.clone()).unwrap();

        // Exactly at min and exactly at max
        add_ingredient(&storage, "Rice", &kg, "5", "5", Some("50"));
        add_ingredient(&storage, "Beans", &kg, "50", "5", Some("50"));

        let report = AlertService::new(&storage).evaluate().unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_no_max_never_surplus() {
        let (_temp_dir, storage) = create_test_storage();
        let kg = Unit::new("kg");
        storage.units.upsert(kg.clone()).unwrap();

        add_ingredient(&storage, "Rice", &kg, "100000", "0", None);

        let report = AlertService::new(&storage).evaluate().unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_low_stock_most_depleted_first() {
        let (_temp_dir, storage) = create_test_storage();
        let kg = Unit::new("kg");
        storage.units.upsert(kg.clone()).unwrap();

        add_ingredient(&storage, "Rice", &kg, "4", "5", None);
        add_ingredient(&storage, "Beans", &kg, "0.5", "5", None);
        add_ingredient(&storage, "Flour", &kg, "2", "5", None);

        let report = AlertService::new(&storage).evaluate().unwrap();

        let names: Vec<&str> = report.low_stock.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Beans", "Flour", "Rice"]);
    }

    #[test]
    fn test_missing_unit_gets_placeholder_label() {
        let (_temp_dir, storage) = create_test_storage();

        // Unit never registered
        let orphan = Unit::new("ghost");
        add_ingredient(&storage, "Rice", &orphan, "1", "5", None);

        let report = AlertService::new(&storage).evaluate().unwrap();
        assert_eq!(report.low_stock.len(), 1);
        assert_eq!(report.low_stock[0].unit_name, "(unknown)");
    }
}
