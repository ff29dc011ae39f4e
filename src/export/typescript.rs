//! TypeScript interface exporter.

use super::{to_pascal_case, Exporter};
use crate::schema::Table;
use crate::types::base_type;

/// Emits one `interface` per table.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptExporter;

impl Exporter for TypeScriptExporter {
    fn export(&self, tables: &[Table]) -> String {
        let mut out = String::new();
        for table in tables {
            out.push_str(&format!("interface {} {{\n", to_pascal_case(&table.name)));
            for col in &table.columns {
                let optional = if col.required { "" } else { "?" };
                out.push_str(&format!("  {}{}: {};\n", col.name, optional, ts_type(&col.typ)));
            }
            out.push_str("}\n\n");
        }
        out
    }
}

/// Map a canonical SQL type to a TypeScript type.
pub fn ts_type(canonical: &str) -> &'static str {
    match base_type(canonical).as_str() {
        "INT" | "INTEGER" | "BIGINT" => "number",
        "VARCHAR" | "TEXT" => "string",
        "DATE" | "DATETIME" | "TIMESTAMP" => "Date",
        "BOOLEAN" => "boolean",
        _ => "any",
    }
}
