//! Audit entry data structures
//!
//! One entry per mutation: which operation, which entity, and the before
//! and after snapshots the change moved between.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    fn label(self) -> &'static str {
        match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Unit,
    Ingredient,
    Meal,
    Preparation,
    BudgetPeriod,
}

impl EntityType {
    fn label(self) -> &'static str {
        match self {
            EntityType::Unit => "Unit",
            EntityType::Ingredient => "Ingredient",
            EntityType::Meal => "Meal",
            EntityType::Preparation => "Preparation",
            EntityType::BudgetPeriod => "BudgetPeriod",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single audit log entry
///
/// Creates carry only an `after` snapshot, deletes only a `before`, and
/// updates carry both plus a one-line summary of what changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Type of entity affected
    pub entity_type: EntityType,

    /// ID of the affected entity
    pub entity_id: String,

    /// Human-readable label (e.g. the ingredient name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Snapshot of the entity before the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Snapshot of the entity after the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable field-level summary, updates only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl AuditEntry {
    fn record(
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: None,
            after: None,
            changes: None,
        }
    }

    /// Entry for a create operation
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::record(Operation::Create, entity_type, entity_id, entity_name);
        entry.after = serde_json::to_value(entity).ok();
        entry
    }

    /// Entry for an update operation
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        changes: Option<String>,
    ) -> Self {
        let mut entry = Self::record(Operation::Update, entity_type, entity_id, entity_name);
        entry.before = serde_json::to_value(before).ok();
        entry.after = serde_json::to_value(after).ok();
        entry.changes = changes;
        entry
    }

    /// Entry for a delete operation
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::record(Operation::Delete, entity_type, entity_id, entity_name);
        entry.before = serde_json::to_value(entity).ok();
        entry
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        use std::fmt::Write as _;

        let mut line = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            let _ = write!(line, " ({})", name);
        }

        if let Some(changes) = &self.changes {
            let _ = write!(line, "\n  Changes: {}", changes);
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_labels() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_entity_type_labels() {
        assert_eq!(EntityType::Ingredient.to_string(), "Ingredient");
        assert_eq!(EntityType::BudgetPeriod.to_string(), "BudgetPeriod");
    }

    #[test]
    fn test_entity_type_serializes_snake_case() {
        let json = serde_json::to_string(&EntityType::BudgetPeriod).unwrap();
        assert_eq!(json, "\"budget_period\"");
    }

    #[test]
    fn test_create_carries_after_only() {
        let data = json!({"name": "Rice", "current_stock": "10"});
        let entry = AuditEntry::create(
            EntityType::Ingredient,
            "ing-12345678",
            Some("Rice".to_string()),
            &data,
        );

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_type, EntityType::Ingredient);
        assert_eq!(entry.entity_id, "ing-12345678");
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
        assert!(entry.changes.is_none());
    }

    #[test]
    fn test_update_carries_both_snapshots() {
        let before = json!({"name": "Rice", "current_stock": "10"});
        let after = json!({"name": "Rice", "current_stock": "15"});

        let entry = AuditEntry::update(
            EntityType::Ingredient,
            "ing-12345678",
            Some("Rice".to_string()),
            &before,
            &after,
            Some("current_stock: 10 -> 15".to_string()),
        );

        assert_eq!(entry.operation, Operation::Update);
        assert!(entry.before.is_some());
        assert!(entry.after.is_some());
        assert_eq!(entry.changes, Some("current_stock: 10 -> 15".to_string()));
    }

    #[test]
    fn test_delete_carries_before_only() {
        let data = json!({"name": "Okra Soup"});
        let entry = AuditEntry::delete(
            EntityType::Meal,
            "meal-12345678",
            Some("Okra Soup".to_string()),
            &data,
        );

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_roundtrips_through_json() {
        let data = json!({"name": "kg"});
        let entry = AuditEntry::create(EntityType::Unit, "unit-123", None, &data);

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.operation, Operation::Create);
        assert_eq!(deserialized.entity_type, EntityType::Unit);
        assert_eq!(deserialized.entity_id, "unit-123");
    }

    #[test]
    fn test_human_readable_format() {
        let data = json!({"name": "Rice"});
        let mut entry = AuditEntry::create(
            EntityType::Ingredient,
            "ing-12345678",
            Some("Rice".to_string()),
            &data,
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("CREATE"));
        assert!(formatted.contains("Ingredient"));
        assert!(formatted.contains("ing-12345678"));
        assert!(formatted.contains("(Rice)"));
        assert!(!formatted.contains("Changes:"));

        entry.changes = Some("min_stock: 2 -> 3".to_string());
        let formatted = entry.format_human_readable();
        assert!(formatted.contains("Changes: min_stock: 2 -> 3"));
    }
}
