//! Unit CLI commands

use clap::Subcommand;

use crate::display::unit::format_unit_list;
use crate::error::LarderResult;
use crate::storage::Storage;

/// Unit subcommands
#[derive(Subcommand)]
pub enum UnitCommands {
    /// List all measurement units
    List,
}

/// Handle a unit command
pub fn handle_unit_command(storage: &Storage, cmd: UnitCommands) -> LarderResult<()> {
    match cmd {
        UnitCommands::List => {
            let units = storage.units.get_all()?;
            print!("{}", format_unit_list(&units));
        }
    }

    Ok(())
}
