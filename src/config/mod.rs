//! Configuration module for larder
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LarderPaths;
pub use settings::Settings;
