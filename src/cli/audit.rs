//! Audit log CLI command

use crate::error::LarderResult;
use crate::storage::Storage;

/// Handle 'larder audit [--limit <n>]'
pub fn handle_audit(storage: &Storage, limit: usize) -> LarderResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries recorded.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
