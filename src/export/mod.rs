//! Exporters for parsed schemas.
//!
//! Each local format implements [`Exporter`]. [`ExportFormat`] is the closed
//! list of everything a schema can be turned into; SQL is the one format that
//! is produced remotely (see [`crate::client`]).

pub mod java;
pub mod json;
pub mod typescript;

use std::fmt;

use crate::schema::Table;

pub use java::JavaEntityExporter;
pub use json::JsonExporter;
pub use typescript::TypeScriptExporter;

/// Trait for turning a schema into text.
pub trait Exporter {
    /// Render all tables.
    fn export(&self, tables: &[Table]) -> String;
}

/// Supported export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Sql,
    Json,
    TypeScript,
    JavaEntity,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [Self::Sql, Self::Json, Self::TypeScript, Self::JavaEntity];

    /// Render `tables` with a local exporter.
    ///
    /// Returns `None` for [`ExportFormat::Sql`], which has to go through the
    /// generation service.
    pub fn render(&self, tables: &[Table]) -> Option<String> {
        match self {
            Self::Sql => None,
            Self::Json => Some(JsonExporter.export(tables)),
            Self::TypeScript => Some(TypeScriptExporter.export(tables)),
            Self::JavaEntity => Some(JavaEntityExporter.export(tables)),
        }
    }

    /// File extension, also accepted by [`ExportFormat::from_name`].
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Sql => "sql",
            Self::Json => "json",
            Self::TypeScript => "ts",
            Self::JavaEntity => "java",
        }
    }

    /// File name used when the artifact is saved without an explicit path.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Sql => "schema.sql",
            Self::Json => "sql-tables.json",
            Self::TypeScript => "schema.ts",
            Self::JavaEntity => "Entities.java",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sql" => Some(Self::Sql),
            "json" => Some(Self::Json),
            "typescript" | "ts" => Some(Self::TypeScript),
            "java" | "java entity" | "java-entity" | "jpa" => Some(Self::JavaEntity),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sql => "SQL",
            Self::Json => "JSON",
            Self::TypeScript => "TypeScript",
            Self::JavaEntity => "Java Entity",
        };
        write!(f, "{}", name)
    }
}

/// `user_accounts` -> `UserAccounts`. Each underscore-separated segment gets
/// an uppercase first character and a lowercase rest.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("payment_events"), "PaymentEvents");
        assert_eq!(to_pascal_case("users"), "Users");
        assert_eq!(to_pascal_case("USER_ACCOUNTS"), "UserAccounts");
        assert_eq!(to_pascal_case("a__b"), "AB");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_render_dispatch() {
        let tables = vec![Table::new("users").column(Column::new("id", "INT"))];
        assert_eq!(ExportFormat::Sql.render(&tables), None);
        for format in [ExportFormat::Json, ExportFormat::TypeScript, ExportFormat::JavaEntity] {
            let out = format.render(&tables).unwrap();
            assert!(!out.is_empty(), "{} produced nothing", format);
        }
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::from_name("TS"), Some(ExportFormat::TypeScript));
        assert_eq!(ExportFormat::from_name("jpa"), Some(ExportFormat::JavaEntity));
        assert_eq!(ExportFormat::from_name("yaml"), None);
        assert_eq!(ExportFormat::JavaEntity.to_string(), "Java Entity");
        assert_eq!(ExportFormat::Json.default_file_name(), "sql-tables.json");
    }

    #[test]
    fn test_extensions_parse_back() {
        for format in ExportFormat::ALL {
            assert_eq!(ExportFormat::from_name(format.extension()), Some(format));
        }
    }
}
