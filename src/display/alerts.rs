//! Alert display formatting

use crate::services::alerts::{AlertEntry, AlertReport};

fn name_width(entries: &[AlertEntry]) -> usize {
    entries.iter().map(|e| e.name.len()).max().unwrap_or(4).max(4)
}

/// Format the alert report
pub fn format_alert_report(report: &AlertReport) -> String {
    if report.is_empty() {
        return "All stock levels are within thresholds.".to_string();
    }

    let mut output = String::new();

    if !report.low_stock.is_empty() {
        output.push_str("LOW STOCK\n");
        let width = name_width(&report.low_stock);
        for entry in &report.low_stock {
            output.push_str(&format!(
                "  {:<width$}  {} {} (min {})\n",
                entry.name,
                entry.current_stock,
                entry.unit_name,
                entry.min_stock,
                width = width,
            ));
        }
    }

    if !report.surplus.is_empty() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str("SURPLUS\n");
        let width = name_width(&report.surplus);
        for entry in &report.surplus {
            let max = entry
                .max_stock
                .map(|m| m.to_string())
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!(
                "  {:<width$}  {} {} (max {})\n",
                entry.name,
                entry.current_stock,
                entry.unit_name,
                max,
                width = width,
            ));
        }
    }

    output
}
