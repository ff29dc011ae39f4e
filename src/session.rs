//! Editing session: a working copy plus its history.
//!
//! Every successful edit is committed to the [`HistoryManager`]. Exporters and
//! the generation client read [`EditSession::tables`], never the history.

use crate::error::{SchemaError, SchemaResult};
use crate::history::HistoryManager;
use crate::parser;
use crate::schema::{Column, ColumnTemplate, Table, TableRelation};

/// What a single DSL line did to the working copy.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    TableOpened(String),
    ColumnAdded { table: String, column: String },
    Ignored,
}

#[derive(Debug)]
pub struct EditSession {
    tables: Vec<Table>,
    history: HistoryManager,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(HistoryManager::new())
    }
}

impl EditSession {
    /// Start an empty session. The empty schema is the first snapshot.
    pub fn new(mut history: HistoryManager) -> Self {
        history.clear();
        history.push(&[]);
        Self {
            tables: Vec::new(),
            history,
        }
    }

    /// The working copy.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Mutable access for registering observers.
    pub fn history_mut(&mut self) -> &mut HistoryManager {
        &mut self.history
    }

    /// Replace the working copy.
    pub fn load(&mut self, tables: Vec<Table>) {
        self.tables = tables;
        self.commit();
    }

    /// Parse `text` and append its tables.
    pub fn append_text(&mut self, text: &str) -> usize {
        let parsed = parser::parse(text);
        let count = parsed.len();
        if count > 0 {
            self.tables.extend(parsed);
            self.commit();
        }
        count
    }

    /// Apply one DSL line: a table header opens a new table, a column line
    /// adds to the most recent table. Anything else is ignored.
    pub fn apply_line(&mut self, line: &str) -> LineOutcome {
        if let Some(name) = parser::parse_table_header(line) {
            self.tables.push(Table::new(name.clone()));
            self.commit();
            return LineOutcome::TableOpened(name);
        }

        let Some(table) = self.tables.last_mut() else {
            return LineOutcome::Ignored;
        };
        match parser::parse_column_line(line) {
            Some(column) => {
                let outcome = LineOutcome::ColumnAdded {
                    table: table.name.clone(),
                    column: column.name.clone(),
                };
                table.columns.push(column);
                self.commit();
                outcome
            }
            None => LineOutcome::Ignored,
        }
    }

    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
        self.commit();
    }

    pub fn add_column(&mut self, table: &str, column: Column) -> SchemaResult<()> {
        self.table_mut(table)?.columns.push(column);
        self.commit();
        Ok(())
    }

    pub fn add_template(&mut self, table: &str, template: ColumnTemplate) -> SchemaResult<()> {
        self.add_column(table, template.column())
    }

    /// Attach a relation to its source table.
    pub fn add_relation(&mut self, relation: TableRelation) -> SchemaResult<()> {
        let source = relation.source_table.clone();
        self.table_mut(&source)?.relations.push(relation);
        self.commit();
        Ok(())
    }

    /// Remove the first table named `name`.
    pub fn remove_table(&mut self, name: &str) -> SchemaResult<Table> {
        let index = self
            .tables
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| SchemaError::not_found(format!("table '{}'", name)))?;
        let removed = self.tables.remove(index);
        self.commit();
        Ok(removed)
    }

    /// Remove the first column named `column` from `table`.
    pub fn remove_column(&mut self, table: &str, column: &str) -> SchemaResult<Column> {
        let target = self.table_mut(table)?;
        let index = target
            .columns
            .iter()
            .position(|c| c.name == column)
            .ok_or_else(|| SchemaError::not_found(format!("column '{}.{}'", table, column)))?;
        let removed = target.columns.remove(index);
        self.commit();
        Ok(removed)
    }

    /// Restore the previous snapshot. Returns `false` when there is none.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(tables) => {
                self.tables = tables;
                true
            }
            None => false,
        }
    }

    /// Restore the next snapshot. Returns `false` when there is none.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(tables) => {
                self.tables = tables;
                true
            }
            None => false,
        }
    }

    fn table_mut(&mut self, name: &str) -> SchemaResult<&mut Table> {
        self.tables
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| SchemaError::not_found(format!("table '{}'", name)))
    }

    fn commit(&mut self) {
        self.history.push(&self.tables);
    }
}
