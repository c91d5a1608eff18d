//! Meal CLI commands
//!
//! Implements CLI commands for the recipe registry. Recipe lines are entered
//! as repeatable `--line "<ingredient>=<quantity>"` arguments.

use clap::Subcommand;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::config::settings::Settings;
use crate::display::meal::{format_meal_details, format_meal_list};
use crate::error::{LarderError, LarderResult};
use crate::services::{LineInput, MealService, MealUpdate};
use crate::storage::Storage;

/// Meal subcommands
#[derive(Subcommand)]
pub enum MealCommands {
    /// Add a new meal with its recipe
    Add {
        /// Meal name
        name: String,
        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,
        /// Recipe line, repeatable (e.g. --line "Rice=3" --line "Palm Oil=0.5")
        #[arg(short, long = "line", value_name = "INGREDIENT=QTY")]
        lines: Vec<String>,
    },
    /// List all meals with portion costs
    List,
    /// Show a meal's recipe
    Show {
        /// Meal name or ID
        meal: String,
    },
    /// Edit a meal
    Edit {
        /// Meal name or ID
        meal: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// Replacement recipe line, repeatable; replaces the whole recipe
        #[arg(short, long = "line", value_name = "INGREDIENT=QTY")]
        lines: Vec<String>,
    },
    /// Delete a meal (past preparations are kept)
    Delete {
        /// Meal name or ID
        meal: String,
    },
}

fn parse_line(raw: &str) -> LarderResult<LineInput> {
    let (ingredient, quantity) = raw.rsplit_once('=').ok_or_else(|| {
        LarderError::Validation(format!(
            "Invalid recipe line: '{}'. Use '<ingredient>=<quantity>', e.g. 'Rice=1.5'.",
            raw
        ))
    })?;

    let quantity = Decimal::from_str(quantity.trim()).map_err(|_| {
        LarderError::Validation(format!("Invalid quantity in recipe line '{}'", raw))
    })?;

    Ok(LineInput {
        ingredient: ingredient.trim().to_string(),
        quantity,
    })
}

fn parse_lines(raw: &[String]) -> LarderResult<Vec<LineInput>> {
    raw.iter().map(|l| parse_line(l)).collect()
}

/// Handle a meal command
pub fn handle_meal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: MealCommands,
) -> LarderResult<()> {
    let service = MealService::new(storage);

    match cmd {
        MealCommands::Add {
            name,
            description,
            lines,
        } => {
            let lines = parse_lines(&lines)?;
            let created = service.create(&name, description, lines)?;

            println!("Created meal: {}", created.meal.name);
            print!(
                "{}",
                format_meal_details(&created, &settings.currency_symbol)
            );
        }

        MealCommands::List => {
            let meals = service.list()?;
            print!("{}", format_meal_list(&meals, &settings.currency_symbol));
        }

        MealCommands::Show { meal } => {
            let found = service
                .find(&meal)?
                .ok_or_else(|| LarderError::meal_not_found(&meal))?;

            let resolved = service.resolve(found)?;
            print!(
                "{}",
                format_meal_details(&resolved, &settings.currency_symbol)
            );
        }

        MealCommands::Edit {
            meal,
            name,
            description,
            lines,
        } => {
            let found = service
                .find(&meal)?
                .ok_or_else(|| LarderError::meal_not_found(&meal))?;

            let lines = if lines.is_empty() {
                None
            } else {
                Some(parse_lines(&lines)?)
            };

            if name.is_none() && description.is_none() && lines.is_none() {
                println!("No changes specified. See 'larder meal edit --help'.");
                return Ok(());
            }

            let updated = service.update(
                found.id,
                MealUpdate {
                    name,
                    description,
                    lines,
                },
            )?;

            println!("Updated meal: {}", updated.meal.name);
        }

        MealCommands::Delete { meal } => {
            let found = service
                .find(&meal)?
                .ok_or_else(|| LarderError::meal_not_found(&meal))?;

            let deleted = service.delete(found.id)?;
            println!("Deleted meal: {}", deleted.name);
        }
    }

    Ok(())
}
