//! Budget CLI commands
//!
//! Implements CLI commands for budget periods and the usage view.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::budget::{format_period_list, format_usage};
use crate::error::{LarderError, LarderResult};
use crate::models::Money;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget period
    Set {
        /// First day of the period (YYYY-MM-DD)
        start: String,
        /// Last day of the period (YYYY-MM-DD)
        end: String,
        /// Spending ceiling (e.g. "100000" or "100000.00")
        amount: String,
    },
    /// List budget periods, newest first
    List,
    /// Show spending against the current period
    Usage,
}

fn parse_date(value: &str, field: &str) -> LarderResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        LarderError::Validation(format!(
            "Invalid {} date: '{}'. Use YYYY-MM-DD.",
            field, value
        ))
    })
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> LarderResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Set { start, end, amount } => {
            let start = parse_date(&start, "start")?;
            let end = parse_date(&end, "end")?;
            let amount = Money::parse(&amount)
                .map_err(|e| LarderError::Validation(format!("Invalid amount: {}", e)))?;

            let period = service.set_budget(start, end, amount)?;

            println!(
                "Created budget period {} .. {}",
                period.period_start, period.period_end
            );
            println!(
                "  Amount: {}",
                period
                    .budget_amount
                    .format_with_symbol(&settings.currency_symbol)
            );
        }

        BudgetCommands::List => {
            let periods = service.list()?;
            print!(
                "{}",
                format_period_list(&periods, &settings.currency_symbol, &settings.date_format)
            );
        }

        BudgetCommands::Usage => {
            let usage = service.usage()?;
            print!(
                "{}",
                format_usage(&usage, &settings.currency_symbol, &settings.date_format)
            );
        }
    }

    Ok(())
}
