//! Preparation display formatting
//!
//! Formats preparation outcomes and the consumption history.

use crate::services::preparation::{HistoryEntry, PreparationOutcome};

/// Format the result of a successful preparation
pub fn format_preparation_result(
    outcome: &PreparationOutcome,
    meal_name: &str,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Prepared {} portion(s) of {}\n",
        outcome.preparation.quantity_prepared, meal_name
    ));

    output.push('\n');
    output.push_str("  Deducted:\n");

    let name_width = outcome
        .deducted
        .iter()
        .map(|d| d.ingredient_name.len())
        .max()
        .unwrap_or(4);

    for line in &outcome.deducted {
        output.push_str(&format!(
            "    {:<name_width$}  {} {} ({} remaining)\n",
            line.ingredient_name,
            line.quantity_deducted,
            line.unit,
            line.remaining_stock,
            name_width = name_width,
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Total Cost: {}\n",
        outcome.total_cost.format_with_symbol(symbol)
    ));

    output
}

/// Format the preparation history as a table
pub fn format_history(entries: &[HistoryEntry], symbol: &str) -> String {
    if entries.is_empty() {
        return "No preparations recorded.".to_string();
    }

    let meal_width = entries
        .iter()
        .map(|e| e.meal_name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<16}  {:<meal_width$}  {:>8}  {:>14}\n",
        "Date",
        "Meal",
        "Portions",
        "Cost",
        meal_width = meal_width,
    ));

    output.push_str(&format!(
        "{:-<16}  {:-<meal_width$}  {:->8}  {:->14}\n",
        "",
        "",
        "",
        "",
        meal_width = meal_width,
    ));

    for entry in entries {
        output.push_str(&format!(
            "{:<16}  {:<meal_width$}  {:>8}  {:>14}\n",
            entry.preparation.prepared_at.format("%Y-%m-%d %H:%M"),
            entry.meal_name,
            entry.preparation.quantity_prepared,
            entry.preparation.total_cost.format_with_symbol(symbol),
            meal_width = meal_width,
        ));
    }

    output
}
