use anyhow::Result;
use clap::{Parser, Subcommand};

use larder::cli::{
    handle_alerts, handle_audit, handle_budget_command, handle_config_command, handle_history,
    handle_ingredient_command, handle_meal_command, handle_prepare, handle_unit_command,
};
use larder::config::{paths::LarderPaths, settings::Settings};
use larder::storage::Storage;

#[derive(Parser)]
#[command(
    name = "larder",
    version,
    about = "Terminal-based kitchen inventory and meal costing",
    long_about = "larder tracks ingredient stock, recipes, and budget periods from \
                  the command line. Preparing a meal checks and deducts stock \
                  atomically, records what it cost, and keeps low-stock alerts and \
                  budget usage in step with the ledger."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Measurement unit commands
    #[command(subcommand)]
    Unit(larder::cli::UnitCommands),

    /// Ingredient ledger commands
    #[command(subcommand, alias = "ing")]
    Ingredient(larder::cli::IngredientCommands),

    /// Meal recipe commands
    #[command(subcommand)]
    Meal(larder::cli::MealCommands),

    /// Prepare a meal: check stock, deduct it, record the cost
    Prepare {
        /// Meal name or ID
        meal: String,
        /// Number of portions
        #[arg(default_value = "1")]
        quantity: i64,
    },

    /// Show recent preparations
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "200")]
        limit: usize,
    },

    /// Budget period commands
    #[command(subcommand)]
    Budget(larder::cli::BudgetCommands),

    /// Show low-stock and surplus alerts
    Alerts,

    /// Show or change configuration
    #[command(subcommand)]
    Config(larder::cli::ConfigCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory and seed the unit catalog
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LarderPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Unit(cmd)) => {
            handle_unit_command(&storage, cmd)?;
        }
        Some(Commands::Ingredient(cmd)) => {
            handle_ingredient_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Meal(cmd)) => {
            handle_meal_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Prepare { meal, quantity }) => {
            handle_prepare(&storage, &settings, &meal, quantity)?;
        }
        Some(Commands::History { limit }) => {
            handle_history(&storage, &settings, limit)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Alerts) => {
            handle_alerts(&storage)?;
        }
        Some(Commands::Config(cmd)) => {
            handle_config_command(&paths, &mut settings, cmd)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit(&storage, limit)?;
        }
        Some(Commands::Init) => {
            println!("Initializing larder at: {}", paths.data_dir().display());
            let seeded = larder::storage::initialize_storage(&paths)?;
            for unit in &seeded {
                storage.log_create(
                    larder::audit::EntityType::Unit,
                    unit.id.to_string(),
                    Some(unit.name.clone()),
                    unit,
                )?;
            }
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            if seeded.is_empty() {
                println!("Unit catalog already present, nothing to seed.");
            } else {
                let names: Vec<&str> = seeded.iter().map(|u| u.name.as_str()).collect();
                println!("Seeded measurement units: {}", names.join(", "));
            }
            println!();
            println!("Run 'larder ingredient add' to start stocking the ledger.");
        }
        None => {
            println!("larder - Kitchen inventory and meal costing");
            println!();
            println!("Run 'larder --help' for usage information.");
            println!("Run 'larder init' to set up the data directory.");
        }
    }

    Ok(())
}
