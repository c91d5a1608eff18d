//! Preparation CLI commands
//!
//! `prepare` and `history` are top-level verbs rather than a subcommand
//! group; they are the commands used many times a day.

use crate::config::settings::Settings;
use crate::display::preparation::{format_history, format_preparation_result};
use crate::error::{LarderError, LarderResult};
use crate::services::{MealService, PreparationService};
use crate::storage::Storage;

/// Handle 'larder prepare <meal> [quantity]'
pub fn handle_prepare(
    storage: &Storage,
    settings: &Settings,
    meal: &str,
    quantity: i64,
) -> LarderResult<()> {
    let found = MealService::new(storage)
        .find(meal)?
        .ok_or_else(|| LarderError::meal_not_found(meal))?;

    let service = PreparationService::new(storage);
    let outcome = service.prepare(found.id, quantity)?;

    print!(
        "{}",
        format_preparation_result(&outcome, &found.name, &settings.currency_symbol)
    );

    Ok(())
}

/// Handle 'larder history [--limit <n>]'
pub fn handle_history(storage: &Storage, settings: &Settings, limit: usize) -> LarderResult<()> {
    let entries = PreparationService::new(storage).history(limit)?;
    print!("{}", format_history(&entries, &settings.currency_symbol));
    Ok(())
}
