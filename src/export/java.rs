//! JPA entity exporter.

use super::{to_pascal_case, Exporter};
use crate::schema::Table;
use crate::types::base_type;

const HEADER: &str = "import jakarta.persistence.*;\nimport java.time.LocalDateTime;\n\n";

/// Emits one annotated `@Entity` class per table.
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaEntityExporter;

impl Exporter for JavaEntityExporter {
    fn export(&self, tables: &[Table]) -> String {
        if tables.is_empty() {
            return String::new();
        }

        let mut out = String::from(HEADER);
        for table in tables {
            out.push_str("@Entity\n");
            out.push_str(&format!("@Table(name = \"{}\")\n", table.name));
            out.push_str(&format!("public class {} {{\n", to_pascal_case(&table.name)));
            for col in &table.columns {
                if col.primary_key {
                    out.push_str("    @Id\n");
                }
                if col.auto_increment {
                    out.push_str("    @GeneratedValue(strategy = GenerationType.IDENTITY)\n");
                }
                out.push_str(&format!("    private {} {};\n", java_type(&col.typ), col.name));
            }
            out.push_str("}\n\n");
        }
        out
    }
}

/// Map a canonical SQL type to a boxed Java type.
pub fn java_type(canonical: &str) -> &'static str {
    match base_type(canonical).as_str() {
        "INT" | "INTEGER" => "Integer",
        "BIGINT" => "Long",
        "VARCHAR" | "TEXT" => "String",
        "DATE" | "DATETIME" | "TIMESTAMP" => "LocalDateTime",
        _ => "Object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entity() {
        let tables = vec![
            Table::new("blog_posts")
                .column(Column::new("id", "INT").primary_key().auto_increment())
                .column(Column::new("title", "VARCHAR(255)"))
                .column(Column::new("published", "BOOLEAN")),
        ];
        let expected = "\
import jakarta.persistence.*;
import java.time.LocalDateTime;

@Entity
@Table(name = \"blog_posts\")
public class BlogPosts {
    @Id
    @GeneratedValue(strategy = GenerationType.IDENTITY)
    private Integer id;
    private String title;
    private Object published;
}

";
        assert_eq!(JavaEntityExporter.export(&tables), expected);
    }

    #[test]
    fn test_java_type() {
        assert_eq!(java_type("BIGINT"), "Long");
        assert_eq!(java_type("DATETIME"), "LocalDateTime");
        assert_eq!(java_type("FLOAT"), "Object");
    }
}
