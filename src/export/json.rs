//! JSON interchange format.
//!
//! ```json
//! { "tables": [ { "name": "users",
//!                 "columns": [ { "name": "id", "type": "INT",
//!                                "primaryKey": true, "autoIncrement": true,
//!                                "required": true, "unique": true,
//!                                "reference": null, "defaultValue": null } ] } ] }
//! ```
//!
//! Export writes every column field explicitly. Import is lenient about flag
//! values but strict about structure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Exporter;
use crate::error::ImportError;
use crate::schema::{Column, Table, TableRelation};

/// Top-level interchange document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterchangeDocument {
    pub tables: Vec<Table>,
    /// Dialect the document was last generated for, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
}

impl InterchangeDocument {
    /// Wrap `tables`, turning empty `reference`/`defaultValue` strings into null.
    pub fn new(mut tables: Vec<Table>) -> Self {
        for col in tables.iter_mut().flat_map(|t| t.columns.iter_mut()) {
            col.reference = col.reference.take().filter(|r| !r.trim().is_empty());
            col.default_value = col.default_value.take().filter(|d| !d.trim().is_empty());
        }
        Self {
            tables,
            dialect: None,
        }
    }

    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = Some(dialect.into());
        self
    }

    /// Pretty-printed JSON text.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Emits the interchange document for a schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export(&self, tables: &[Table]) -> String {
        InterchangeDocument::new(tables.to_vec()).to_json()
    }
}

/// Import the tables of an interchange document.
pub fn import(json: &str) -> Result<Vec<Table>, ImportError> {
    import_document(json).map(|doc| doc.tables)
}

/// Import and validate a full interchange document.
pub fn import_document(json: &str) -> Result<InterchangeDocument, ImportError> {
    let root: Value = serde_json::from_str(json)?;

    let raw_tables = root
        .get("tables")
        .and_then(Value::as_array)
        .filter(|tables| !tables.is_empty())
        .ok_or(ImportError::NoTables)?;

    let tables = raw_tables
        .iter()
        .enumerate()
        .map(|(index, raw)| import_table(index, raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(InterchangeDocument {
        tables,
        dialect: non_empty_str(root.get("dialect")),
    })
}

fn import_table(index: usize, raw: &Value) -> Result<Table, ImportError> {
    let name = non_empty_str(raw.get("name")).ok_or(ImportError::InvalidTable { index })?;
    let raw_columns = raw
        .get("columns")
        .and_then(Value::as_array)
        .ok_or(ImportError::InvalidTable { index })?;

    let mut columns = Vec::with_capacity(raw_columns.len());
    for (col_index, col) in raw_columns.iter().enumerate() {
        let missing = || ImportError::ColumnMissingFields {
            table: name.clone(),
            index: col_index,
        };
        let col_name = non_empty_str(col.get("name")).ok_or_else(missing)?;
        let typ = non_empty_str(col.get("type")).ok_or_else(missing)?;

        columns.push(Column {
            name: col_name,
            typ,
            primary_key: truthy(col.get("primaryKey")),
            auto_increment: truthy(col.get("autoIncrement")),
            required: truthy(col.get("required")),
            unique: truthy(col.get("unique")),
            default_value: non_empty_str(col.get("defaultValue")),
            reference: non_empty_str(col.get("reference")),
        });
    }

    let relations = match raw.get("relations") {
        Some(Value::Null) | None => Vec::new(),
        Some(value) => serde_json::from_value::<Vec<TableRelation>>(value.clone())?,
    };

    Ok(Table {
        name,
        columns,
        relations,
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// JavaScript-style truthiness, so `1` and `"yes"` count as set.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
