//! Canonical column types.
//!
//! The DSL speaks in domain words (`entier`, `texte`, ...). Everything
//! downstream of the parser works with the canonical SQL-facing names they
//! resolve to.

/// Domain word -> canonical type, followed by canonical names that map to
/// themselves.
const TYPE_TABLE: &[(&str, &str)] = &[
    ("entier", "INT"),
    ("texte", "VARCHAR(255)"),
    ("date", "DATETIME"),
    ("decimal", "DECIMAL(10,2)"),
    ("booleen", "BOOLEAN"),
    ("temps", "TIME"),
    ("timestamp", "TIMESTAMP"),
    ("long_texte", "TEXT"),
    ("date_seule", "DATE"),
    ("grand_entier", "BIGINT"),
    ("flottant", "FLOAT"),
    ("double", "DOUBLE"),
    // Already canonical
    ("INT", "INT"),
    ("VARCHAR", "VARCHAR(255)"),
    ("DATETIME", "DATETIME"),
    ("DECIMAL", "DECIMAL(10,2)"),
    ("BOOLEAN", "BOOLEAN"),
    ("TIME", "TIME"),
    ("TIMESTAMP", "TIMESTAMP"),
    ("TEXT", "TEXT"),
    ("DATE", "DATE"),
    ("BIGINT", "BIGINT"),
    ("FLOAT", "FLOAT"),
    ("DOUBLE", "DOUBLE"),
];

fn lookup(token: &str) -> Option<&'static str> {
    TYPE_TABLE
        .iter()
        .find(|(key, _)| *key == token)
        .map(|(_, canonical)| *canonical)
}

/// Resolve a type token to its canonical name.
///
/// Tries an exact match, then the lowercased token. Unknown tokens come back
/// uppercased, so the function never fails and resolving a canonical name
/// returns it unchanged.
///
/// ```
/// use tablesmith::types::resolve;
///
/// assert_eq!(resolve("entier"), "INT");
/// assert_eq!(resolve("TEXTE"), "VARCHAR(255)");
/// assert_eq!(resolve("uuid"), "UUID");
/// ```
pub fn resolve(token: &str) -> String {
    if let Some(canonical) = lookup(token) {
        return canonical.to_string();
    }
    if let Some(canonical) = lookup(&token.to_lowercase()) {
        return canonical.to_string();
    }
    token.to_uppercase()
}

/// Type name without parameters: `VARCHAR(255)` -> `VARCHAR`.
pub fn base_type(canonical: &str) -> String {
    canonical
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_uppercase()
}

/// Domain words understood by [`resolve`], with their canonical types.
pub fn known_types() -> impl Iterator<Item = (&'static str, &'static str)> {
    TYPE_TABLE
        .iter()
        .copied()
        .filter(|(key, _)| key.chars().any(|c| c.is_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_words() {
        assert_eq!(resolve("entier"), "INT");
        assert_eq!(resolve("texte"), "VARCHAR(255)");
        assert_eq!(resolve("date"), "DATETIME");
        assert_eq!(resolve("date_seule"), "DATE");
        assert_eq!(resolve("grand_entier"), "BIGINT");
        assert_eq!(resolve("long_texte"), "TEXT");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(resolve("ENTIER"), "INT");
        assert_eq!(resolve("Booleen"), "BOOLEAN");
        // Exact match wins before lowercasing
        assert_eq!(resolve("DATE"), "DATE");
    }

    #[test]
    fn test_canonical_is_fixed_point() {
        for (_, canonical) in TYPE_TABLE {
            assert_eq!(resolve(canonical), *canonical);
        }
        assert_eq!(resolve("VARCHAR"), "VARCHAR(255)");
    }

    #[test]
    fn test_unknown_passes_through_uppercased() {
        assert_eq!(resolve("uuid"), "UUID");
        assert_eq!(resolve("jsonb"), "JSONB");
        assert_eq!(resolve(""), "");
        assert_eq!(resolve("uuid"), resolve("uuid"));
    }

    #[test]
    fn test_base_type() {
        assert_eq!(base_type("VARCHAR(255)"), "VARCHAR");
        assert_eq!(base_type("DECIMAL(10,2)"), "DECIMAL");
        assert_eq!(base_type("int"), "INT");
    }

    #[test]
    fn test_known_types_are_domain_words() {
        let words: Vec<_> = known_types().map(|(w, _)| w).collect();
        assert_eq!(words.len(), 12);
        assert!(words.contains(&"flottant"));
        assert!(!words.contains(&"INT"));
    }
}
