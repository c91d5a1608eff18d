//! Configuration CLI commands

use chrono::NaiveDate;
use clap::Subcommand;
use std::fmt::Write as _;

use crate::config::paths::LarderPaths;
use crate::config::settings::Settings;
use crate::error::{LarderError, LarderResult};

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show configuration and data paths
    Show,
    /// Change a setting
    Set {
        /// Setting key (currency_symbol, date_format)
        key: String,
        /// New value
        value: String,
    },
}

fn validate_date_format(format: &str) -> LarderResult<()> {
    let probe = NaiveDate::default();
    let mut out = String::new();
    if write!(out, "{}", probe.format(format)).is_err() {
        return Err(LarderError::Validation(format!(
            "Invalid date format: '{}'. Use strftime syntax like '%Y-%m-%d'.",
            format
        )));
    }
    Ok(())
}

/// Handle a config command
pub fn handle_config_command(
    paths: &LarderPaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> LarderResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Larder Configuration");
            println!("====================");
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  currency_symbol: {}", settings.currency_symbol);
            println!("  date_format:     {}", settings.date_format);
        }

        ConfigCommands::Set { key, value } => {
            match key.as_str() {
                "currency_symbol" => {
                    settings.currency_symbol = value.clone();
                }
                "date_format" => {
                    validate_date_format(&value)?;
                    settings.date_format = value.clone();
                }
                other => {
                    return Err(LarderError::Validation(format!(
                        "Unknown setting: '{}'. Valid keys: currency_symbol, date_format",
                        other
                    )));
                }
            }

            settings.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}
