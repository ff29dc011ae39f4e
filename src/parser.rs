//! Schema text parser using nom.
//!
//! Turns the line-oriented table notation into [`Table`]s.
//!
//! # Syntax Overview
//!
//! ```text
//! table users:
//! - id(entier, clé primaire, auto)
//! - email(texte, requis, unique)
//! - team_id(entier, référence: teams.id)
//! - created_at(date, par défaut: maintenant)
//! ─┬ ──┬───── ──┬─── ───────────┬───────────
//!  │   │        │               └── Flags (any order)
//!  │   │        └── Type (resolved to a canonical type)
//!  │   └── Column name
//!  └── Column marker
//! ```
//!
//! Parsing never fails. Lines that fit neither rule are dropped, and so are
//! column lines that appear before the first `table` line.

use nom::{
    bytes::complete::{tag_no_case, take_till1, take_while, take_while1},
    character::complete::char,
    sequence::delimited,
    IResult,
};

use crate::schema::{Column, Table, CURRENT_TIMESTAMP};
use crate::types;

const PRIMARY_KEY_FLAGS: &[&str] = &["clé primaire", "primary key"];
const AUTO_INCREMENT_FLAGS: &[&str] = &["auto", "auto_increment"];
const REQUIRED_FLAGS: &[&str] = &["requis", "required"];
const UNIQUE_FLAGS: &[&str] = &["unique"];
const REFERENCE_PREFIXES: &[&str] = &["référence:", "reference:"];
const DEFAULT_PREFIXES: &[&str] = &["par défaut:", "default:"];
const NOW_WORDS: &[&str] = &["maintenant", "aujourd'hui", "now", "today"];

/// Parse a complete schema text.
///
/// ```
/// let tables = tablesmith::parser::parse("table users:\n- id(entier, clé primaire)");
/// assert_eq!(tables[0].name, "users");
/// assert_eq!(tables[0].columns[0].typ, "INT");
/// ```
pub fn parse(input: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut current: Option<Table> = None;

    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(name) = parse_table_header(line) {
            if let Some(table) = current.take() {
                tables.push(table);
            }
            current = Some(Table::new(name));
        } else if line.starts_with('-') {
            match current.as_mut() {
                Some(table) => match parse_column_line(line) {
                    Some(column) => table.columns.push(column),
                    None => tracing::debug!("Dropping malformed column line: {}", line),
                },
                None => tracing::debug!("Dropping column line outside a table: {}", line),
            }
        } else {
            tracing::debug!("Ignoring line: {}", line);
        }
    }

    if let Some(table) = current {
        tables.push(table);
    }

    tables
}

/// Recognize a table header (`table <name>[:]`) and return the table name.
pub fn parse_table_header(line: &str) -> Option<String> {
    match table_header(line.trim()) {
        Ok((_, name)) => Some(name),
        Err(_) => None,
    }
}

/// Recognize a column line (`- name(type, flags...)`) and build the column.
pub fn parse_column_line(line: &str) -> Option<Column> {
    let def = line.trim().strip_prefix('-')?.trim();
    parse_column_definition(def)
}

/// Build a column from `name(type, flag, ...)`.
///
/// The first `name(...)` group found anywhere in the text is used.
pub fn parse_column_definition(def: &str) -> Option<Column> {
    let (name, attrs) = def
        .char_indices()
        .find_map(|(i, _)| column_group(&def[i..]).ok().map(|(_, found)| found))?;

    let attrs: Vec<String> = attrs.split(',').map(|s| s.trim().to_lowercase()).collect();
    let (typ, flags) = attrs.split_first()?;

    let has = |words: &[&str]| flags.iter().any(|f| words.contains(&f.as_str()));

    Some(Column {
        name: name.to_string(),
        typ: types::resolve(typ),
        primary_key: has(PRIMARY_KEY_FLAGS),
        auto_increment: has(AUTO_INCREMENT_FLAGS),
        required: has(REQUIRED_FLAGS),
        unique: has(UNIQUE_FLAGS),
        default_value: prefixed_value(flags, DEFAULT_PREFIXES).map(normalize_default),
        reference: prefixed_value(flags, REFERENCE_PREFIXES),
    })
}

/// Value of the first flag starting with one of `prefixes`, taken after the
/// first colon. An empty value counts as absent.
fn prefixed_value(flags: &[String], prefixes: &[&str]) -> Option<String> {
    flags
        .iter()
        .find(|f| prefixes.iter().any(|p| f.starts_with(p)))
        .and_then(|f| f.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn normalize_default(value: String) -> String {
    if NOW_WORDS.contains(&value.as_str()) {
        CURRENT_TIMESTAMP.to_string()
    } else {
        value
    }
}

// =============================================================================
// Parsing Combinators
// =============================================================================

/// Parse a word (column name): ASCII letters, digits and underscore.
fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

/// Parse `name (attrs)`, returning the name and the raw group contents.
fn column_group(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, name) = word(input)?;
    let (input, _) = take_while(char::is_whitespace)(input)?;
    let (input, attrs) = delimited(char('('), take_till1(|c| c == ')'), char(')'))(input)?;
    Ok((input, (name, attrs)))
}

/// Parse `table<ws>rest`, returning the cleaned-up table name.
fn table_header(input: &str) -> IResult<&str, String> {
    let (input, _) = tag_no_case("table")(input)?;
    let (rest, _) = take_while1(char::is_whitespace)(input)?;
    let rest = rest.trim();
    let name = rest.strip_suffix(':').unwrap_or(rest).trim();
    Ok(("", name.to_string()))
}
