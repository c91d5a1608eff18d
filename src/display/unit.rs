//! Unit display formatting

use crate::models::Unit;

/// Format the unit catalog as a simple list
pub fn format_unit_list(units: &[Unit]) -> String {
    if units.is_empty() {
        return "No units found. Run 'larder init' to seed the catalog.".to_string();
    }

    let mut output = String::new();
    for unit in units {
        output.push_str(&format!("  {}\n", unit.name));
    }
    output
}
