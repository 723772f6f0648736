//! INSERT statement builder.

use serde::Serialize;

use crate::builder::{non_blank, push_clause};
use crate::builder::traits::{Statement, StatementKind};
use crate::check;
use crate::error::{BuildError, BuildResult};
use crate::ident::{Ident, add_brackets};
use crate::value::{SqlValue, ValueMap, render_value};

/// Statement appended when the generated identity is requested.
pub(crate) const SCOPE_IDENTITY: &str = "SELECT SCOPE_IDENTITY();";

/// INSERT statement with a single row of column/value pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Target table
    table_name: Option<String>,
    /// Schema prefixed to the table
    schema: Option<String>,
    /// Column/value pairs in insertion order
    values: ValueMap,
    /// Append `SELECT SCOPE_IDENTITY();`
    return_id: bool,
    /// Render values as literals (true) or raw text (false)
    force_format_values: bool,
    /// First invalid fluent call, reported by `build`
    build_error: Option<BuildError>,
}

impl Default for Insert {
    fn default() -> Self {
        Self {
            table_name: None,
            schema: None,
            values: ValueMap::new(),
            return_id: false,
            force_format_values: true,
            build_error: None,
        }
    }
}

impl Insert {
    /// Create an empty INSERT.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target table.
    pub fn into_table(mut self, table_name: &str) -> Self {
        self.table_name = Some(table_name.to_string());
        self
    }

    /// Set the schema that qualifies the table.
    pub fn set_schema(mut self, schema: &str) -> Self {
        self.schema = non_blank(schema);
        self
    }

    /// Add one column/value pair. Setting a column twice keeps the last value.
    pub fn value(mut self, column: &str, value: impl Into<SqlValue>) -> Self {
        if column.trim().is_empty() {
            self.record_error(BuildError::argument_null("Column"));
        } else {
            self.values.insert(column, value);
        }
        self
    }

    /// Add column/value pairs from tuples, arrays, vectors or maps.
    ///
    /// # Example
    /// ```
    /// use corelib::builder::{insert, Statement};
    ///
    /// let sql = insert("Person").values([("Name", "Ali"), ("City", "Tehran")]).build()?;
    /// assert_eq!(sql, "INSERT INTO [Person] ([Name], [City])\n    VALUES (N'Ali', N'Tehran')");
    /// # Ok::<(), corelib::BuildError>(())
    /// ```
    pub fn values<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<SqlValue>,
    {
        pairs
            .into_iter()
            .fold(self, |qb, (k, v)| qb.value(k.as_ref(), v))
    }

    /// Add one pair per field of a serializable struct or map.
    pub fn values_from<T: Serialize + ?Sized>(mut self, row: &T) -> Self {
        match ValueMap::from_serialize(row) {
            Ok(map) => self.values(map),
            Err(err) => {
                self.record_error(err);
                self
            }
        }
    }

    /// Append `SELECT SCOPE_IDENTITY();` to return the new identity value.
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

impl Statement for Insert {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn validate(&self) -> BuildResult<()> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        check::identifier(self.table_name.as_deref(), "TableName")?;
        check::must_have_any(self.values.as_slice(), "Values")
    }

    fn render(&self, indent: &str) -> String {
        let columns: Vec<String> = self.values.columns().map(add_brackets).collect();
        let values: Vec<String> = self
            .values
            .values()
            .map(|v| render_value(v, self.force_format_values))
            .collect();

        let mut sql = format!("INSERT INTO {} ({})", self.target(), columns.join(", "));
        push_clause(&mut sql, indent, &format!("VALUES ({})", values.join(", ")));
        if self.return_id {
            sql.push(';');
            push_clause(&mut sql, indent, SCOPE_IDENTITY);
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_insert_basic() {
        let sql = Insert::new()
            .into_table("dbo.Person")
            .value("Name", "Ali")
            .value("Age", 5)
            .build()
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO [dbo].[Person] ([Name], [Age])\n    VALUES (N'Ali', 5)"
        );
    }

    #[test]
    fn test_insert_return_id() {
        let sql = Insert::new()
            .into_table("Person")
            .value("Name", "Ali")
            .return_id(true)
            .build()
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO [Person] ([Name])\n    VALUES (N'Ali');\n    SELECT SCOPE_IDENTITY();"
        );
    }

    #[test]
    fn test_insert_raw_values() {
        let sql = Insert::new()
            .into_table("Person")
            .value("Created", "GETDATE()")
            .value("Note", Option::<&str>::None)
            .force_format_values(false)
            .build()
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO [Person] ([Created], [Note])\n    VALUES (GETDATE(), NULL)"
        );
    }

    #[test]
    fn test_insert_values_from_map() {
        let mut row = BTreeMap::new();
        row.insert("Age", 5);
        row.insert("Score", 10);
        let qb = Insert::new().into_table("Person").values(row);
        assert_eq!(qb.value_map().columns().collect::<Vec<_>>(), ["Age", "Score"]);
    }

    #[test]
    fn test_insert_requires_values() {
        let err = Insert::new().into_table("T").build().unwrap_err();
        assert!(err.is_must_have_any());
        assert_eq!(err.argument_name(), Some("Values"));
    }

    #[test]
    fn test_insert_values_from_scalar_is_deferred_error() {
        let err = Insert::new()
            .into_table("T")
            .values_from(&"not a row")
            .build()
            .unwrap_err();
        assert!(err.is_argument_invalid());
    }

    #[test]
    fn test_schema_does_not_stand_in_for_table() {
        let err = Insert::new()
            .into_table("..")
            .set_schema("dbo")
            .value("A", 1)
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::argument_null("TableName"));
    }
}
