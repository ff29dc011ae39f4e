//! # tablesmith
//!
//! > **Write tables like a shopping list. Get schemas back.**
//!
//! tablesmith turns a small indented notation into table definitions, and
//! table definitions into TypeScript interfaces, JPA entities, a JSON
//! interchange document, or (through a generation service) SQL.
//!
//! ## Quick Example
//!
//! ```rust
//! use tablesmith::prelude::*;
//!
//! let tables = tablesmith::parse("
//!     table users:
//!     - id(entier, clé primaire, auto)
//!     - email(texte, requis, unique)
//! ");
//!
//! assert_eq!(tables[0].columns[1].typ, "VARCHAR(255)");
//!
//! let ts = ExportFormat::TypeScript.render(&tables).unwrap();
//! assert!(ts.contains("interface Users"));
//! ```
//!
//! ## Notation
//!
//! | Line                      | Meaning                        |
//! |---------------------------|--------------------------------|
//! | `table <name>:`           | Start a table                  |
//! | `- col(type, flags...)`   | Add a column to the open table |
//! | `clé primaire`            | Primary key                    |
//! | `auto`                    | Auto increment                 |
//! | `requis`                  | NOT NULL                       |
//! | `unique`                  | Unique                         |
//! | `référence: t.c`          | Points at another table        |
//! | `par défaut: v`           | Default value                  |

pub mod client;
pub mod config;
pub mod dialect;
pub mod error;
pub mod export;
pub mod history;
pub mod parser;
pub mod schema;
pub mod session;
pub mod types;

pub mod prelude {
    pub use crate::client::SqlGeneratorClient;
    pub use crate::config::Config;
    pub use crate::dialect::Dialect;
    pub use crate::error::*;
    pub use crate::export::{ExportFormat, Exporter};
    pub use crate::history::{HistoryFlags, HistoryManager};
    pub use crate::parser::parse;
    pub use crate::schema::*;
    pub use crate::session::{EditSession, LineOutcome};
    pub use crate::types::resolve;
}

/// Parse schema text into tables. Never fails.
///
/// # Example
///
/// ```
/// let tables = tablesmith::parse("table users:\n- id(entier, clé primaire)");
/// assert_eq!(tables[0].name, "users");
/// assert!(tables[0].columns[0].primary_key);
/// ```
pub fn parse(input: &str) -> Vec<schema::Table> {
    parser::parse(input)
}

/// Load tables from text that is either a JSON interchange document or DSL.
pub fn load_schema(content: &str) -> Result<Vec<schema::Table>, error::ImportError> {
    if content.trim_start().starts_with('{') {
        export::json::import(content)
    } else {
        Ok(parser::parse(content))
    }
}
