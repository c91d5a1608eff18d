//! Path management for larder
//!
//! Provides XDG-compliant path resolution for configuration and data files.
//!
//! ## Path Resolution Order
//!
//! 1. `LARDER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/larder` or `~/.config/larder`
//! 3. Windows: `%APPDATA%\larder`

use std::path::PathBuf;

use crate::error::LarderError;

/// Manages all paths used by larder
#[derive(Debug, Clone)]
pub struct LarderPaths {
    /// Base directory for all larder data
    base_dir: PathBuf,
}

impl LarderPaths {
    /// Create a new LarderPaths instance
    ///
    /// Path resolution:
    /// 1. `LARDER_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/larder` or `~/.config/larder`
    /// 3. Windows: `%APPDATA%\larder`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, LarderError> {
        let base_dir = if let Ok(custom) = std::env::var("LARDER_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create LarderPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/larder/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/larder/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to units.json
    pub fn units_file(&self) -> PathBuf {
        self.data_dir().join("units.json")
    }

    /// Get the path to ingredients.json (the stock ledger)
    pub fn ingredients_file(&self) -> PathBuf {
        self.data_dir().join("ingredients.json")
    }

    /// Get the path to meals.json (recipes)
    pub fn meals_file(&self) -> PathBuf {
        self.data_dir().join("meals.json")
    }

    /// Get the path to preparations.json (the consumption log)
    pub fn preparations_file(&self) -> PathBuf {
        self.data_dir().join("preparations.json")
    }

    /// Get the path to budget.json (budget periods)
    pub fn budget_file(&self) -> PathBuf {
        self.data_dir().join("budget.json")
    }

    /// Ensure all required directories exist
    ///
    /// Creates:
    /// - Base directory (~/.config/larder/)
    /// - Data directory (~/.config/larder/data/)
    pub fn ensure_directories(&self) -> Result<(), LarderError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LarderError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LarderError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if larder has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, LarderError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("larder"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, LarderError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| LarderError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("larder"))
}
