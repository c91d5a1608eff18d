//! Alerts CLI command

use crate::display::alerts::format_alert_report;
use crate::error::LarderResult;
use crate::services::AlertService;
use crate::storage::Storage;

/// Handle 'larder alerts'
pub fn handle_alerts(storage: &Storage) -> LarderResult<()> {
    let report = AlertService::new(storage).evaluate()?;
    print!("{}", format_alert_report(&report));
    Ok(())
}
