//! Budget service
//!
//! Budget periods and the spend-against-budget snapshot. Spend is derived by
//! summing preparation costs inside the period window; there is no separate
//! spend ledger to keep in sync.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::audit::EntityType;
use crate::error::{LarderError, LarderResult};
use crate::models::{BudgetPeriod, Money};
use crate::storage::Storage;

/// Service for budget periods and usage reporting
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Spending measured against the active budget period
#[derive(Debug, Clone)]
pub struct UsageSnapshot {
    /// The period containing today; None when no period covers today
    pub period: Option<BudgetPeriod>,

    /// The period's ceiling
    pub budget_amount: Option<Money>,

    /// Total preparation cost inside the window
    pub spent: Money,

    /// Budget minus spend; negative when the budget is exceeded
    pub remaining: Option<Money>,

    /// Share of the budget consumed, capped at 100
    pub usage_percent: Option<Decimal>,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a budget period for a date range
    pub fn set_budget(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
        budget_amount: Money,
    ) -> LarderResult<BudgetPeriod> {
        let period = BudgetPeriod::new(period_start, period_end, budget_amount);

        // Validate
        period
            .validate()
            .map_err(|e| LarderError::Validation(e.to_string()))?;

        // Save
        self.storage.budget.upsert(period.clone())?;
        self.storage.budget.save()?;

        // Audit
        self.storage.log_create(
            EntityType::BudgetPeriod,
            period.id.to_string(),
            Some(period.to_string()),
            &period,
        )?;

        Ok(period)
    }

    /// All budget periods, newest first
    pub fn list(&self) -> LarderResult<Vec<BudgetPeriod>> {
        self.storage.budget.get_all()
    }

    /// Usage for today's active period
    pub fn usage(&self) -> LarderResult<UsageSnapshot> {
        self.usage_on(Utc::now().date_naive())
    }

    /// Usage as of a given day.
    ///
    /// With no period covering the day, the window collapses to that single
    /// day and only `spent` is reported.
    pub fn usage_on(&self, today: NaiveDate) -> LarderResult<UsageSnapshot> {
        let period = self.storage.budget.current_period(today)?;

        let (start, end) = match &period {
            Some(p) => (p.period_start, p.period_end),
            None => (today, today),
        };

        let spent: Money = self
            .storage
            .preparations
            .get_by_date_range(start, end)?
            .iter()
            .map(|r| r.total_cost)
            .sum();

        let budget_amount = period.as_ref().map(|p| p.budget_amount);
        let remaining = budget_amount.map(|budget| budget - spent);
        let usage_percent = budget_amount.and_then(|budget| {
            if budget.is_positive() {
                let percent = spent.amount() / budget.amount() * Decimal::ONE_HUNDRED;
                Some(percent.min(Decimal::ONE_HUNDRED))
            } else {
                None
            }
        });

        Ok(UsageSnapshot {
            period,
            budget_amount,
            spent,
            remaining,
            usage_percent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LarderPaths;
    use crate::models::{
        ids::{MealId, PreparationId},
        PreparationRecord,
    };
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LarderPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn prep_on(storage: &Storage, y: i32, m: u32, d: u32, cost: &str) {
        let record = PreparationRecord {
            id: PreparationId::new(),
            meal_id: MealId::new(),
            quantity_prepared: 1,
            total_cost: Money::new(dec(cost)),
            prepared_at: Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
        };
        storage.preparations.append(record).unwrap();
    }

    #[test]
    fn test_set_budget_and_list() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service
            .set_budget(date(2024, 5, 1), date(2024, 5, 31), Money::new(dec("90000")))
            .unwrap();
        service
            .set_budget(date(2024, 6, 1), date(2024, 6, 30), Money::new(dec("100000")))
            .unwrap();

        let periods = service.list().unwrap();
        assert_eq!(periods.len(), 2);
        // Newest first
        assert_eq!(periods[0].period_start, date(2024, 6, 1));
    }

    #[test]
    fn test_set_budget_rejects_reversed_range() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let err = service
            .set_budget(date(2024, 6, 30), date(2024, 6, 1), Money::new(dec("100000")))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.list().unwrap().len(), 0);
    }

    #[test]
    fn test_usage_within_period() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service
            .set_budget(date(2024, 6, 1), date(2024, 6, 30), Money::new(dec("100000")))
            .unwrap();

        prep_on(&storage, 2024, 6, 5, "20000");
        prep_on(&storage, 2024, 6, 12, "25000");
        // Outside the period, must not count
        prep_on(&storage, 2024, 7, 1, "9999");

        let snapshot = service.usage_on(date(2024, 6, 15)).unwrap();

        assert_eq!(snapshot.spent, Money::new(dec("45000")));
        assert_eq!(snapshot.budget_amount, Some(Money::new(dec("100000"))));
        assert_eq!(snapshot.remaining, Some(Money::new(dec("55000"))));
        assert_eq!(snapshot.usage_percent, Some(dec("45")));
    }

    #[test]
    fn test_usage_without_period_falls_back_to_today() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        prep_on(&storage, 2024, 6, 15, "3000");
        prep_on(&storage, 2024, 6, 14, "9999");

        let snapshot = service.usage_on(date(2024, 6, 15)).unwrap();

        // Only the single day counts
        assert_eq!(snapshot.spent, Money::new(dec("3000")));
        assert!(snapshot.period.is_none());
        assert!(snapshot.budget_amount.is_none());
        assert!(snapshot.remaining.is_none());
        assert!(snapshot.usage_percent.is_none());
    }

    #[test]
    fn test_usage_percent_capped_and_remaining_negative() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service
            .set_budget(date(2024, 6, 1), date(2024, 6, 30), Money::new(dec("1000")))
            .unwrap();

        prep_on(&storage, 2024, 6, 10, "2500");

        let snapshot = service.usage_on(date(2024, 6, 15)).unwrap();

        assert_eq!(snapshot.usage_percent, Some(dec("100")));
        assert_eq!(snapshot.remaining, Some(Money::new(dec("-1500"))));
    }

    #[test]
    fn test_usage_percent_none_for_zero_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service
            .set_budget(date(2024, 6, 1), date(2024, 6, 30), Money::zero())
            .unwrap();

        prep_on(&storage, 2024, 6, 10, "500");

        let snapshot = service.usage_on(date(2024, 6, 15)).unwrap();

        assert!(snapshot.usage_percent.is_none());
        assert_eq!(snapshot.remaining, Some(Money::new(dec("-500"))));
    }

    #[test]
    fn test_overlapping_periods_latest_start_wins() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service
            .set_budget(date(2024, 6, 1), date(2024, 6, 30), Money::new(dec("100000")))
            .unwrap();
        service
            .set_budget(date(2024, 6, 10), date(2024, 6, 20), Money::new(dec("40000")))
            .unwrap();

        let snapshot = service.usage_on(date(2024, 6, 15)).unwrap();

        assert_eq!(snapshot.budget_amount, Some(Money::new(dec("40000"))));
    }
}
