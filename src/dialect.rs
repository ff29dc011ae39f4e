//! Target SQL dialects and their wire names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// SQL flavors understood by the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dialect {
    #[default]
    #[serde(rename = "MySQL")]
    MySql,
    #[serde(rename = "PostgreSQL")]
    PostgreSql,
    #[serde(rename = "SQLite")]
    Sqlite,
    #[serde(rename = "SQL Server")]
    SqlServer,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [Self::MySql, Self::PostgreSql, Self::Sqlite, Self::SqlServer];

    /// Name sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::PostgreSql => "PostgreSQL",
            Self::Sqlite => "SQLite",
            Self::SqlServer => "SQL Server",
        }
    }

    /// Lenient lookup: `postgres`, `PostgreSQL` and `pg` all work.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "mysql" => Some(Self::MySql),
            "postgresql" | "postgres" | "pg" => Some(Self::PostgreSql),
            "sqlite" => Some(Self::Sqlite),
            "sql server" | "sqlserver" | "mssql" => Some(Self::SqlServer),
            _ => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
