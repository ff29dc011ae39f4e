use pretty_assertions::assert_eq;
use tablesmith::error::ImportError;
use tablesmith::export::json::{import, import_document, InterchangeDocument};
use tablesmith::export::{ExportFormat, Exporter, JsonExporter};
use tablesmith::schema::{Column, RelationType, Table, TableRelation};

fn shop() -> Vec<Table> {
    tablesmith::parse(
        "table users:
         - id(entier, clé primaire, auto)
         - email(texte, requis, unique)
         table orders:
         - id(entier, clé primaire, auto)
         - user_id(entier, requis, référence: users.id)
         - placed_at(date, par défaut: maintenant)",
    )
}

#[test]
fn test_round_trip() {
    let tables = shop();
    let json = JsonExporter.export(&tables);
    let imported = import(&json).unwrap();
    assert_eq!(imported, tables);
}

#[test]
fn test_round_trip_normalizes_missing_fields() {
    let json = r#"{"tables":[{"name":"users","columns":[{"name":"id","type":"INT"}]}]}"#;
    let tables = import(json).unwrap();
    let exported: serde_json::Value =
        serde_json::from_str(&ExportFormat::Json.render(&tables).unwrap()).unwrap();

    let col = &exported["tables"][0]["columns"][0];
    assert_eq!(exported["tables"][0]["name"], "users");
    assert_eq!(col["name"], "id");
    assert_eq!(col["type"], "INT");
    for flag in ["primaryKey", "autoIncrement", "required", "unique"] {
        assert_eq!(col[flag], serde_json::Value::Bool(false), "{} not normalized", flag);
    }
    assert!(col["reference"].is_null());
    assert!(col["defaultValue"].is_null());
}

#[test]
fn test_empty_tables_array_is_rejected() {
    let err = import(r#"{"tables":[]}"#).unwrap_err();
    assert!(matches!(err, ImportError::NoTables));
    assert_eq!(err.to_string(), "No tables found in JSON");
}

#[test]
fn test_second_table_is_validated_too() {
    let err = import(r#"{"tables":[{"name":"a","columns":[]},{"columns":[]}]}"#).unwrap_err();
    assert!(matches!(err, ImportError::InvalidTable { index: 1 }));
}

#[test]
fn test_column_errors_name_the_table() {
    let err = import(r#"{"tables":[{"name":"users","columns":[{"type":"INT"}]}]}"#).unwrap_err();
    assert!(err.to_string().contains("users"));
}

#[test]
fn test_relations_survive_round_trip() {
    let mut tables = shop();
    tables[1].relations.push(TableRelation {
        source_table: "orders".to_string(),
        source_column: "user_id".to_string(),
        target_table: "users".to_string(),
        target_column: "id".to_string(),
        relation_type: RelationType::ManyToMany,
    });

    let json = JsonExporter.export(&tables);
    assert!(json.contains("\"relationType\": \"manyToMany\""));
    assert_eq!(import(&json).unwrap(), tables);
}

#[test]
fn test_document_with_dialect() {
    let doc = InterchangeDocument::new(vec![Table::new("a").column(Column::new("id", "INT"))])
        .with_dialect("PostgreSQL");
    let back = import_document(&doc.to_json()).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_load_schema_detects_format() {
    let from_dsl = tablesmith::load_schema("table a\n- id(entier)").unwrap();
    let from_json = tablesmith::load_schema(&JsonExporter.export(&from_dsl)).unwrap();
    assert_eq!(from_dsl, from_json);
    assert!(tablesmith::load_schema("  {\"tables\": []}").is_err());
}

#[test]
fn test_all_local_formats_render_the_shop() {
    let tables = shop();
    let ts = ExportFormat::TypeScript.render(&tables).unwrap();
    assert!(ts.contains("interface Users {\n  id?: number;\n  email: string;\n}"));
    assert!(ts.contains("  placed_at?: Date;"));

    let java = ExportFormat::JavaEntity.render(&tables).unwrap();
    assert!(java.contains("@Table(name = \"orders\")\npublic class Orders {"));
    assert!(java.contains("    private LocalDateTime placed_at;"));
}

#[test]
fn test_empty_reference_and_default_export_as_null() {
    let parsed = tablesmith::parse("table t\n- x(entier, référence:, par défaut:)");
    assert_eq!(parsed[0].columns[0].reference, None);
    assert_eq!(parsed[0].columns[0].default_value, None);

    let built = vec![Table::new("t").column(
        Column::new("x", "INT").references("").default_value("  "),
    )];
    for tables in [parsed, built] {
        let json = JsonExporter.export(&tables);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let col = &value["tables"][0]["columns"][0];
        assert!(col["reference"].is_null());
        assert!(col["defaultValue"].is_null());

        let back = import(&json).unwrap();
        assert_eq!(back[0].columns[0].reference, None);
        assert_eq!(back[0].columns[0].default_value, None);
        assert_eq!(JsonExporter.export(&back), json);
    }
}
