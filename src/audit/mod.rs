//! Audit logging for the larder
//!
//! Records all create, update, delete operations with before/after values
//! in an append-only audit log.
//!
//! # Architecture
//!
//! The audit system consists of two components:
//!
//! - `AuditEntry`: Represents a single audit log entry with timestamp, operation,
//!   entity information, and optional before/after values.
//! - `AuditLogger`: Handles writing entries to the audit log file using a
//!   line-delimited JSON format (JSONL).
//!
//! # Example
//!
//! ```rust,ignore
//! use larder::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//!
//! // Log a create operation
//! let entry = AuditEntry::create(
//!     EntityType::Ingredient,
//!     "ing-12345678",
//!     Some("Rice".to_string()),
//!     &ingredient,
//! );
//! logger.log(&entry)?;
//!
//! // Log an update with a summary of what changed
//! let entry = AuditEntry::update(
//!     EntityType::Ingredient,
//!     "ing-12345678",
//!     Some("Rice".to_string()),
//!     &before,
//!     &after,
//!     Some("current_stock: 10 -> 4".to_string()),
//! );
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
