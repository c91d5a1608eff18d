//! Meal display formatting
//!
//! Formats meals with their resolved recipe lines for terminal output.

use crate::services::meal::ResolvedMeal;

/// Format the meal registry as a table
pub fn format_meal_list(meals: &[ResolvedMeal], symbol: &str) -> String {
    if meals.is_empty() {
        return "No meals found.".to_string();
    }

    // Calculate column widths
    let name_width = meals
        .iter()
        .map(|m| m.meal.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    // Build header
    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>11}  {:>14}  {}\n",
        "Name",
        "Ingredients",
        "Portion Cost",
        "Description",
        name_width = name_width,
    ));

    // Separator line
    output.push_str(&format!(
        "{:-<name_width$}  {:->11}  {:->14}  {:-<11}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    // Meal rows
    for meal in meals {
        output.push_str(&format!(
            "{:<name_width$}  {:>11}  {:>14}  {}\n",
            meal.meal.name,
            meal.lines.len(),
            meal.portion_cost.format_with_symbol(symbol),
            meal.meal.description.as_deref().unwrap_or(""),
            name_width = name_width,
        ));
    }

    output
}

/// Format a single meal's details with its recipe
pub fn format_meal_details(meal: &ResolvedMeal, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Meal: {}\n", meal.meal.name));
    output.push_str(&format!("  ID: {}\n", meal.meal.id));
    if let Some(description) = &meal.meal.description {
        output.push_str(&format!("  Description: {}\n", description));
    }

    output.push('\n');
    if meal.lines.is_empty() {
        output.push_str("  No recipe lines. Add some with 'meal edit --line'.\n");
    } else {
        output.push_str("  Recipe (per portion):\n");
        for line in &meal.lines {
            let line_cost = line.cost_per_unit * line.quantity;
            output.push_str(&format!(
                "    {} {} {} @ {} = {}\n",
                line.quantity,
                line.unit_name,
                line.ingredient_name,
                line.cost_per_unit.format_with_symbol(symbol),
                line_cost.format_with_symbol(symbol),
            ));
        }
        output.push_str(&format!(
            "  Portion Cost: {}\n",
            meal.portion_cost.format_with_symbol(symbol)
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        meal.meal.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        meal.meal.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
