//! Display formatting for terminal output
//!
//! Plain-text rendering of the service layer's views. Currency symbols and
//! date formats come from user settings; the core stores bare decimals.

pub mod alerts;
pub mod budget;
pub mod ingredient;
pub mod meal;
pub mod preparation;
pub mod unit;

pub use alerts::format_alert_report;
pub use budget::{format_period_list, format_usage};
pub use ingredient::{format_ingredient_details, format_ingredient_list};
pub use meal::{format_meal_details, format_meal_list};
pub use preparation::{format_history, format_preparation_result};
pub use unit::format_unit_list;

use chrono::NaiveDate;
use std::fmt::Write as _;

/// Format a date with the configured strftime string.
///
/// Falls back to ISO when the format string is invalid.
pub(crate) fn format_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}
