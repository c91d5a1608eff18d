//! larder - Kitchen inventory and meal costing for the terminal
//!
//! This library provides the core functionality for the larder CLI: an
//! ingredient stock ledger, a recipe registry, and a preparation engine that
//! atomically checks, costs, and deducts stock when a meal is prepared.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (units, ingredients, meals, preparations,
//!   budget periods)
//! - `storage`: JSON file storage layer and the stock reservation primitive
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `display`: Plain-text formatting for the CLI
//! - `cli`: clap subcommands and handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use larder::config::{paths::LarderPaths, settings::Settings};
//!
//! let paths = LarderPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LarderError, LarderResult};
