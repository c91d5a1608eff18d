//! Budget display formatting
//!
//! Formats budget periods and the usage snapshot.

use crate::models::BudgetPeriod;
use crate::services::budget::UsageSnapshot;

use super::format_date;

/// Format the budget periods as a table
pub fn format_period_list(periods: &[BudgetPeriod], symbol: &str, date_format: &str) -> String {
    if periods.is_empty() {
        return "No budget periods found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<12}  {:>14}\n",
        "Start", "End", "Amount"
    ));
    output.push_str(&format!("{:-<12}  {:-<12}  {:->14}\n", "", "", ""));

    for period in periods {
        output.push_str(&format!(
            "{:<12}  {:<12}  {:>14}\n",
            format_date(period.period_start, date_format),
            format_date(period.period_end, date_format),
            period.budget_amount.format_with_symbol(symbol),
        ));
    }

    output
}

/// Format the usage snapshot
pub fn format_usage(usage: &UsageSnapshot, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    match &usage.period {
        Some(period) => {
            output.push_str(&format!(
                "Budget Period: {} .. {}\n",
                format_date(period.period_start, date_format),
                format_date(period.period_end, date_format),
            ));
            output.push_str(&format!(
                "  Budget:    {}\n",
                period.budget_amount.format_with_symbol(symbol)
            ));
            output.push_str(&format!(
                "  Spent:     {}\n",
                usage.spent.format_with_symbol(symbol)
            ));
            if let Some(remaining) = usage.remaining {
                output.push_str(&format!(
                    "  Remaining: {}\n",
                    remaining.format_with_symbol(symbol)
                ));
            }
            match usage.usage_percent {
                Some(percent) => {
                    output.push_str(&format!("  Usage:     {:.1}%\n", percent));
                }
                None => output.push_str("  Usage:     n/a (budget is zero)\n"),
            }
        }
        None => {
            output.push_str("No budget period covers today.\n");
            output.push_str(&format!(
                "  Spent today: {}\n",
                usage.spent.format_with_symbol(symbol)
            ));
        }
    }

    output
}
