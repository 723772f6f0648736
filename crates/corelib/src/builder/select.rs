//! SELECT statement builder.

use std::fmt::Write as _;

use crate::builder::{non_blank, push_clause};
use crate::builder::traits::{Statement, StatementKind};
use crate::check;
use crate::error::{BuildError, BuildResult};
use crate::ident::{Ident, add_brackets};

/// Sort direction of the single ORDER BY key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    #[default]
    None,
    Ascending,
    Descending,
}

impl OrderDirection {
    fn keyword(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Ascending => Some("ASC"),
            Self::Descending => Some("DESC"),
        }
    }
}

/// SELECT statement: projection, target table, optional TOP/WHERE/ORDER BY
/// and the `NOLOCK` table hint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Select {
    /// Target table, possibly dotted (`dbo.Person`)
    table_name: Option<String>,
    /// Schema prefixed to the table
    schema: Option<String>,
    /// Projection; empty renders `*`
    columns: Vec<String>,
    /// TOP (n)
    top_count: Option<u64>,
    /// Raw WHERE predicate
    where_clause: Option<String>,
    /// ORDER BY column
    order_by_column: Option<String>,
    /// ORDER BY direction
    order_by_direction: OrderDirection,
    /// WITH (NOLOCK)
    with_no_lock: bool,
    /// First invalid fluent call, reported by `build`
    build_error: Option<BuildError>,
}

impl Select {
    /// Create an empty SELECT. A table must be set with [`from`](Self::from)
    /// before it can be built.
    pub fn new() -> Self {
        Self::default()
    }

    fn record_error(&mut self, err: BuildError) {
        if self.build_error.is_none() {
            self.build_error = Some(err);
        }
    }

    // ==================== Target ====================

    /// Set the table to select from. Dotted names (`dbo.Person`) are allowed.
    pub fn from(mut self, table_name: &str) -> Self {
        self.table_name = Some(table_name.to_string());
        self
    }

    /// Set the schema that qualifies the table.
    pub fn set_schema(mut self, schema: &str) -> Self {
        self.schema = non_blank(schema);
        self
    }

    // ==================== Columns ====================

    /// Replace the projection.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.clear();
        self.add_columns(columns)
    }

    /// Append one column to the projection.
    pub fn add_column(mut self, column: impl Into<String>) -> Self {
        let column = column.into();
        if column.trim().is_empty() {
            self.record_error(BuildError::argument_null("Column"));
        } else {
            self.columns.push(column);
        }
        self
    }

    /// Append several columns. Duplicates are kept.
    ///
    /// `*` and `alias.*` render unbracketed, so `columns(["*"])` selects
    /// every column just like [`star`](Self::star).
    pub fn add_columns<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        columns.into_iter().fold(self, |qb, c| qb.add_column(c))
    }

    /// Select every column (`*`).
    pub fn star(mut self) -> Self {
        self.columns.clear();
        self
    }

    /// Alias for [`star`](Self::star).
    pub fn all_columns(self) -> Self {
        self.star()
    }

    // ==================== Filtering ====================

    /// Limit the result to `n` rows (`TOP (n)`). `n` must be positive.
    pub fn top(mut self, n: u64) -> Self {
        if n == 0 {
            self.record_error(BuildError::argument_invalid(
                "TopCount",
                "must be greater than zero",
            ));
        } else {
            self.top_count = Some(n);
        }
        self
    }

    /// Set the raw WHERE predicate, emitted verbatim. Blank text clears it.
    pub fn where_clause(mut self, predicate: &str) -> Self {
        self.where_clause = non_blank(predicate);
        self
    }

    // ==================== Ordering ====================

    /// Order by `column`. Defaults the direction to ascending if none was set.
    pub fn order_by(mut self, column: &str) -> Self {
        match non_blank(column) {
            Some(column) => {
                self.order_by_column = Some(column);
                if self.order_by_direction == OrderDirection::None {
                    self.order_by_direction = OrderDirection::Ascending;
                }
            }
            None => self.record_error(BuildError::argument_null("OrderByColumn")),
        }
        self
    }

    /// Sort ascending.
    pub fn ascending(mut self) -> Self {
        self.order_by_direction = OrderDirection::Ascending;
        self
    }

    /// Sort descending.
    pub fn descending(mut self) -> Self {
        self.order_by_direction = OrderDirection::Descending;
        self
    }

    /// Order by `column` descending.
    pub fn order_by_descending(self, column: &str) -> Self {
        self.order_by(column).descending()
    }

    /// Remove the ORDER BY clause.
    pub fn clear_ordering(mut self) -> Self {
        self.order_by_column = None;
        self.order_by_direction = OrderDirection::None;
        self
    }

    // ==================== Hints ====================

    /// Toggle the `WITH (NOLOCK)` table hint.
    pub fn with_no_lock(mut self, enabled: bool) -> Self {
        self.with_no_lock = enabled;
        self
    }

    // ==================== Accessors ====================

    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Projection columns; empty means `*`.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn top_count(&self) -> Option<u64> {
        self.top_count
    }

    pub fn predicate(&self) -> Option<&str> {
        self.where_clause.as_deref()
    }

    pub fn order_by_column(&self) -> Option<&str> {
        self.order_by_column.as_deref()
    }

    pub fn order_by_direction(&self) -> OrderDirection {
        self.order_by_direction
    }

    pub fn is_no_lock(&self) -> bool {
        self.with_no_lock
    }

    fn target(&self) -> Ident {
        Ident::qualified(self.schema.as_deref(), self.table_name.as_deref().unwrap_or_default())
    }
}

impl Statement for Select {
    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }

    fn validate(&self) -> BuildResult<()> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        check::identifier(self.table_name.as_deref(), "TableName")?;
        check::must_be(
            self.order_by_direction == OrderDirection::None || self.order_by_column.is_some(),
            "OrderByColumn",
            || "an ordering direction requires an ORDER BY column".to_string(),
        )
    }

    fn render(&self, indent: &str) -> String {
        let mut sql = String::from("SELECT");
        if let Some(n) = self.top_count {
            let _ = write!(sql, " TOP ({n})");
        }
        sql.push(' ');
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            let cols: Vec<String> = self.columns.iter().map(|c| projection_column(c)).collect();
            sql.push_str(&cols.join(", "));
        }

        push_clause(&mut sql, indent, &format!("FROM {}", self.target()));

        if let Some(predicate) = &self.where_clause {
            push_clause(&mut sql, indent, &format!("WHERE {predicate}"));
        }

        if let (Some(column), Some(dir)) =
            (&self.order_by_column, self.order_by_direction.keyword())
        {
            push_clause(
                &mut sql,
                indent,
                &format!("ORDER BY {} {dir}", add_brackets(column)),
            );
        }

        if self.with_no_lock {
            push_clause(&mut sql, indent, "WITH (NOLOCK)");
        }

        sql
    }
}

/// Bracket a projection entry. `*` and `alias.*` keep their star bare.
fn projection_column(column: &str) -> String {
    let column = column.trim();
    if column == "*" {
        return column.to_string();
    }
    match column.strip_suffix(".*") {
        Some(qualifier) => format!("{}.*", add_brackets(qualifier)),
        None => add_brackets(column),
    }
}
