//! Ingredient display formatting
//!
//! Formats the stock ledger for terminal output in table and detail views.

use crate::services::ingredient::IngredientSummary;

fn status_label(summary: &IngredientSummary) -> &'static str {
    if summary.ingredient.is_low_stock() {
        "LOW"
    } else if summary.ingredient.is_surplus() {
        "SURPLUS"
    } else {
        ""
    }
}

/// Format the stock ledger as a table
pub fn format_ingredient_list(summaries: &[IngredientSummary], symbol: &str) -> String {
    if summaries.is_empty() {
        return "No ingredients found.".to_string();
    }

    // Calculate column widths
    let name_width = summaries
        .iter()
        .map(|s| s.ingredient.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let unit_width = summaries
        .iter()
        .map(|s| s.unit_name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    // Build header
    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<unit_width$}  {:>10}  {:>8}  {:>8}  {:>12}  {}\n",
        "Name",
        "Unit",
        "Stock",
        "Min",
        "Max",
        "Unit Cost",
        "Status",
        name_width = name_width,
        unit_width = unit_width,
    ));

    // Separator line
    output.push_str(&format!(
        "{:-<name_width$}  {:-<unit_width$}  {:->10}  {:->8}  {:->8}  {:->12}  {:-<7}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        unit_width = unit_width,
    ));

    // Ingredient rows
    for summary in summaries {
        let max_display = summary
            .ingredient
            .max_stock
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());

        output.push_str(&format!(
            "{:<name_width$}  {:<unit_width$}  {:>10}  {:>8}  {:>8}  {:>12}  {}\n",
            summary.ingredient.name,
            summary.unit_name,
            summary.ingredient.current_stock.to_string(),
            summary.ingredient.min_stock.to_string(),
            max_display,
            summary.ingredient.cost_per_unit.format_with_symbol(symbol),
            status_label(summary),
            name_width = name_width,
            unit_width = unit_width,
        ));
    }

    output
}

/// Format a single ingredient's details
pub fn format_ingredient_details(summary: &IngredientSummary, symbol: &str) -> String {
    let ingredient = &summary.ingredient;

    let mut output = String::new();

    output.push_str(&format!("Ingredient: {}\n", ingredient.name));
    output.push_str(&format!("  ID:            {}\n", ingredient.id));
    output.push_str(&format!("  Unit:          {}\n", summary.unit_name));
    output.push_str(&format!(
        "  Unit Cost:     {}\n",
        ingredient.cost_per_unit.format_with_symbol(symbol)
    ));
    output.push('\n');
    output.push_str(&format!(
        "  Current Stock: {} {}\n",
        ingredient.current_stock, summary.unit_name
    ));
    output.push_str(&format!(
        "  Min Stock:     {} {}\n",
        ingredient.min_stock, summary.unit_name
    ));
    match ingredient.max_stock {
        Some(max) => {
            output.push_str(&format!("  Max Stock:     {} {}\n", max, summary.unit_name))
        }
        None => output.push_str("  Max Stock:     (none)\n"),
    }

    let status = status_label(summary);
    if !status.is_empty() {
        output.push_str(&format!("  Status:        {}\n", status));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        ingredient.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        ingredient.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
