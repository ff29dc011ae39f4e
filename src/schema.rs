//! Schema model shared by the parser, the exporters and the history.
//!
//! Everything here is plain owned data: cloning a `Vec<Table>` gives a copy
//! that shares nothing with the original.

use serde::{Deserialize, Serialize};

/// Value stored in `default_value` for "now"-like defaults.
pub const CURRENT_TIMESTAMP: &str = "CURRENT_TIMESTAMP";

/// Table definition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<TableRelation>,
}

/// Column definition. `typ` holds a canonical type (see [`crate::types`]).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(rename = "type", alias = "typ")]
    pub typ: String,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub auto_increment: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    /// Target the column points to, usually `table.column`. Never checked.
    #[serde(default)]
    pub reference: Option<String>,
}

/// Descriptive link between two tables. Not enforced anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRelation {
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
    pub relation_type: RelationType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationType {
    OneToOne,
    OneToMany,
    ManyToMany,
}

/// Ready-made columns offered by the editing surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnTemplate {
    /// `id INT`, primary key, auto increment.
    Id,
    /// `created_at DATETIME` defaulting to the current timestamp.
    Timestamp,
    /// `foreign_id INT`, required.
    ForeignKey,
}

impl ColumnTemplate {
    pub const ALL: [ColumnTemplate; 3] = [Self::Id, Self::Timestamp, Self::ForeignKey];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Timestamp => "timestamp",
            Self::ForeignKey => "foreign_key",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "id" => Some(Self::Id),
            "timestamp" | "created_at" => Some(Self::Timestamp),
            "foreign_key" | "foreignkey" | "fk" => Some(Self::ForeignKey),
            _ => None,
        }
    }

    /// Build the column this template stands for.
    pub fn column(&self) -> Column {
        match self {
            Self::Id => Column {
                name: "id".to_string(),
                typ: crate::types::resolve("entier"),
                primary_key: true,
                auto_increment: true,
                required: true,
                unique: true,
                ..Column::default()
            },
            Self::Timestamp => Column {
                name: "created_at".to_string(),
                typ: crate::types::resolve("date"),
                required: true,
                default_value: Some(CURRENT_TIMESTAMP.to_string()),
                ..Column::default()
            },
            Self::ForeignKey => Column {
                name: "foreign_id".to_string(),
                typ: crate::types::resolve("entier"),
                required: true,
                ..Column::default()
            },
        }
    }
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn column(mut self, col: Column) -> Self {
        self.columns.push(col);
        self
    }
}

impl Column {
    /// Create a column with the given canonical type and no flags set.
    pub fn new(name: impl Into<String>, typ: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            typ: typ.into(),
            ..Self::default()
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn references(mut self, target: impl Into<String>) -> Self {
        self.reference = Some(target.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates() {
        let id = ColumnTemplate::Id.column();
        assert_eq!(id.typ, "INT");
        assert!(id.primary_key && id.auto_increment && id.required && id.unique);

        let ts = ColumnTemplate::Timestamp.column();
        assert_eq!(ts.name, "created_at");
        assert_eq!(ts.typ, "DATETIME");
        assert_eq!(ts.default_value.as_deref(), Some(CURRENT_TIMESTAMP));

        assert_eq!(ColumnTemplate::from_name("FK"), Some(ColumnTemplate::ForeignKey));
        assert_eq!(ColumnTemplate::from_name("nope"), None);
    }

    #[test]
    fn test_serde_keys() {
        let col = Column::new("id", "INT").primary_key();
        let json = serde_json::to_value(&col).unwrap();
        assert_eq!(json["type"], "INT");
        assert_eq!(json["primaryKey"], true);
        assert_eq!(json["autoIncrement"], false);
        assert!(json["defaultValue"].is_null());
    }

    #[test]
    fn test_relation_type_wire_name() {
        let json = serde_json::to_string(&RelationType::OneToMany).unwrap();
        assert_eq!(json, "\"oneToMany\"");
    }

    #[test]
    fn test_clone_is_independent() {
        let original = vec![Table::new("users").column(Column::new("id", "INT"))];
        let mut copy = original.clone();
        copy[0].columns[0].name = "changed".to_string();
        assert_eq!(original[0].columns[0].name, "id");
    }
}
