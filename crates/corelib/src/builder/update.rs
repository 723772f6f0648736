//! UPDATE statement builder.

use serde::Serialize;

use crate::builder::insert::SCOPE_IDENTITY;
use crate::builder::traits::{Statement, StatementKind};
use crate::builder::{non_blank, push_clause};
use crate::check;
use crate::error::{BuildError, BuildResult};
use crate::ident::{Ident, add_brackets};
use crate::value::{SqlValue, ValueMap, render_value};

/// UPDATE statement: `SET` assignments plus an optional raw WHERE predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Target table
    table_name: Option<String>,
    /// Schema prefixed to the table
    schema: Option<String>,
    /// SET assignments in insertion order
    values: ValueMap,
    /// Raw WHERE predicate
    where_clause: Option<String>,
    /// Append `SELECT SCOPE_IDENTITY();`
    return_id: bool,
    /// Render values as literals (true) or raw text (false)
    force_format_values: bool,
    /// First invalid fluent call, reported by `build`
    build_error: Option<BuildError>,
}

impl Default for Update {
    fn default() -> Self {
        Self {
            table_name: None,
            schema: None,
            values: ValueMap::new(),
            where_clause: None,
            return_id: false,
            force_format_values: true,
            build_error: None,
        }
    }
}

impl Update {
    /// Create an empty UPDATE.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target table.
    pub fn table(mut self, table_name: &str) -> Self {
        self.table_name = Some(table_name.to_string());
        self
    }

    /// Set the schema that qualifies the table.
    pub fn set_schema(mut self, schema: &str) -> Self {
        self.schema = non_blank(schema);
        self
    }

    /// Assign `value` to `column`. Assigning a column twice keeps the last value.
    pub fn set(mut self, column: &str, value: impl Into<SqlValue>) -> Self {
        if column.trim().is_empty() {
            self.record_error(BuildError::argument_null("Column"));
        } else {
            self.values.insert(column, value);
        }
        self
    }

    /// Add several assignments from tuples, arrays, vectors or maps.
    pub fn set_many<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<SqlValue>,
    {
        pairs
            .into_iter()
            .fold(self, |qb, (k, v)| qb.set(k.as_ref(), v))
    }

    /// Add one assignment per field of a serializable struct or map.
    pub fn set_from<T: Serialize + ?Sized>(mut self, row: &T) -> Self {
        match ValueMap::from_serialize(row) {
            Ok(map) => self.set_many(map),
            Err(err) => {
                self.record_error(err);
                self
            }
        }
    }

    /// Set the raw WHERE predicate, emitted verbatim. Blank text clears it.
    pub fn where_clause(mut self, predicate: &str) -> Self {
        self.where_clause = non_blank(predicate);
        self
    }

    /// Append `SELECT SCOPE_IDENTITY();` after the statement.
    pub fn return_id(mut self, enabled: bool) -> Self {
        self.return_id = enabled;
        self
    }

    /// Render values as SQL literals (default) or as raw text.
    pub fn force_format_values(mut self, enabled: bool) -> Self {
        self.force_format_values = enabled;
        self
    }

    fn record_error(&mut self, err: BuildError) {
        if self.build_error.is_none() {
            self.build_error = Some(err);
        }
    }

    // ==================== Accessors ====================

    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn value_map(&self) -> &ValueMap {
        &self.values
    }

    pub fn predicate(&self) -> Option<&str> {
        self.where_clause.as_deref()
    }

    pub fn is_return_id(&self) -> bool {
        self.return_id
    }

    pub fn is_force_format_values(&self) -> bool {
        self.force_format_values
    }

    fn target(&self) -> Ident {
        Ident::qualified(self.schema.as_deref(), self.table_name.as_deref().unwrap_or_default())
    }
}

impl Statement for Update {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn validate(&self) -> BuildResult<()> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        check::identifier(self.table_name.as_deref(), "TableName")?;
        check::must_have_any(self.values.as_slice(), "Values")
    }

    fn render(&self, indent: &str) -> String {
        let assignments: Vec<String> = self
            .values
            .iter()
            .map(|(col, v)| {
                format!(
                    "{} = {}",
                    add_brackets(col),
                    render_value(v, self.force_format_values)
                )
            })
            .collect();

        let mut sql = format!("UPDATE {}", self.target());
        push_clause(&mut sql, indent, &format!("SET {}", assignments.join(", ")));
        if let Some(predicate) = &self.where_clause {
            push_clause(&mut sql, indent, &format!("WHERE {predicate}"));
        }
        if self.return_id {
            sql.push(';');
            push_clause(&mut sql, indent, SCOPE_IDENTITY);
        }
        sql
    }
}
