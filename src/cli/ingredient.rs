//! Ingredient CLI commands
//!
//! Implements CLI commands for the ingredient ledger.

use clap::Subcommand;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::config::settings::Settings;
use crate::display::ingredient::{format_ingredient_details, format_ingredient_list};
use crate::error::{LarderError, LarderResult};
use crate::models::Money;
use crate::services::{IngredientService, IngredientUpdate};
use crate::storage::Storage;

/// Ingredient subcommands
#[derive(Subcommand)]
pub enum IngredientCommands {
    /// Add a new ingredient to the ledger
    Add {
        /// Ingredient name
        name: String,
        /// Measurement unit (name, e.g. "kg")
        #[arg(short, long)]
        unit: String,
        /// Cost of one unit (e.g. "1200" or "1200.50")
        #[arg(short, long, default_value = "0")]
        cost: String,
        /// Starting stock quantity
        #[arg(short, long, default_value = "0")]
        stock: String,
        /// Low-stock alert threshold
        #[arg(long, default_value = "0")]
        min: String,
        /// Surplus alert threshold
        #[arg(long)]
        max: Option<String>,
    },
    /// List all ingredients
    List,
    /// Show ingredient details
    Show {
        /// Ingredient name or ID
        ingredient: String,
    },
    /// Edit an ingredient
    Edit {
        /// Ingredient name or ID
        ingredient: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New measurement unit
        #[arg(long)]
        unit: Option<String>,
        /// New cost per unit
        #[arg(long)]
        cost: Option<String>,
        /// New stock quantity
        #[arg(long)]
        stock: Option<String>,
        /// New low-stock threshold
        #[arg(long)]
        min: Option<String>,
        /// New surplus threshold
        #[arg(long, conflicts_with = "clear_max")]
        max: Option<String>,
        /// Remove the surplus threshold
        #[arg(long)]
        clear_max: bool,
    },
    /// Delete an ingredient (refused while a recipe uses it)
    Delete {
        /// Ingredient name or ID
        ingredient: String,
    },
    /// Apply a signed stock correction
    Adjust {
        /// Ingredient name or ID
        ingredient: String,
        /// Quantity to add (negative to remove)
        #[arg(allow_hyphen_values = true)]
        delta: String,
    },
}

fn parse_decimal(value: &str, field: &str) -> LarderResult<Decimal> {
    Decimal::from_str(value).map_err(|_| {
        LarderError::Validation(format!(
            "Invalid {}: '{}'. Use a decimal number like '2.5'.",
            field, value
        ))
    })
}

fn parse_money(value: &str, field: &str) -> LarderResult<Money> {
    Money::parse(value).map_err(|e| {
        LarderError::Validation(format!("Invalid {}: '{}'. {}", field, value, e))
    })
}

/// Handle an ingredient command
pub fn handle_ingredient_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IngredientCommands,
) -> LarderResult<()> {
    let service = IngredientService::new(storage);

    match cmd {
        IngredientCommands::Add {
            name,
            unit,
            cost,
            stock,
            min,
            max,
        } => {
            let cost = parse_money(&cost, "cost")?;
            let stock = parse_decimal(&stock, "stock")?;
            let min = parse_decimal(&min, "min")?;
            let max = max.map(|m| parse_decimal(&m, "max")).transpose()?;

            let ingredient = service.create(&name, &unit, cost, stock, min, max)?;
            let summary = service.get_summary(ingredient)?;

            println!("Created ingredient: {}", summary.ingredient.name);
            println!(
                "  Unit Cost: {}",
                summary
                    .ingredient
                    .cost_per_unit
                    .format_with_symbol(&settings.currency_symbol)
            );
            println!(
                "  Stock:     {} {}",
                summary.ingredient.current_stock, summary.unit_name
            );
            println!("  ID:        {}", summary.ingredient.id);
        }

        IngredientCommands::List => {
            let summaries = service.list()?;
            print!(
                "{}",
                format_ingredient_list(&summaries, &settings.currency_symbol)
            );
        }

        IngredientCommands::Show { ingredient } => {
            let found = service
                .find(&ingredient)?
                .ok_or_else(|| LarderError::ingredient_not_found(&ingredient))?;

            let summary = service.get_summary(found)?;
            print!(
                "{}",
                format_ingredient_details(&summary, &settings.currency_symbol)
            );
        }

        IngredientCommands::Edit {
            ingredient,
            name,
            unit,
            cost,
            stock,
            min,
            max,
            clear_max,
        } => {
            let found = service
                .find(&ingredient)?
                .ok_or_else(|| LarderError::ingredient_not_found(&ingredient))?;

            let update = IngredientUpdate {
                name,
                unit,
                cost_per_unit: cost.map(|c| parse_money(&c, "cost")).transpose()?,
                current_stock: stock.map(|s| parse_decimal(&s, "stock")).transpose()?,
                min_stock: min.map(|m| parse_decimal(&m, "min")).transpose()?,
                max_stock: max.map(|m| parse_decimal(&m, "max")).transpose()?,
                clear_max,
            };

            if update.name.is_none()
                && update.unit.is_none()
                && update.cost_per_unit.is_none()
                && update.current_stock.is_none()
                && update.min_stock.is_none()
                && update.max_stock.is_none()
                && !update.clear_max
            {
                println!("No changes specified. See 'larder ingredient edit --help'.");
                return Ok(());
            }

            let updated = service.update(found.id, update)?;
            println!("Updated ingredient: {}", updated.name);
        }

        IngredientCommands::Delete { ingredient } => {
            let found = service
                .find(&ingredient)?
                .ok_or_else(|| LarderError::ingredient_not_found(&ingredient))?;

            let deleted = service.delete(found.id)?;
            println!("Deleted ingredient: {}", deleted.name);
        }

        IngredientCommands::Adjust { ingredient, delta } => {
            let found = service
                .find(&ingredient)?
                .ok_or_else(|| LarderError::ingredient_not_found(&ingredient))?;

            let delta = parse_decimal(&delta, "delta")?;
            let updated = service.adjust_stock(found.id, delta)?;
            let summary = service.get_summary(updated)?;

            println!(
                "Adjusted {}: stock is now {} {}",
                summary.ingredient.name, summary.ingredient.current_stock, summary.unit_name
            );
        }
    }

    Ok(())
}
