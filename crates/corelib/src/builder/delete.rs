//! DELETE statement builder.

use crate::builder::traits::{Statement, StatementKind};
use crate::builder::{non_blank, push_clause};
use crate::check;
use crate::error::BuildResult;
use crate::ident::Ident;

/// DELETE statement with an optional raw WHERE predicate.
///
/// Without a predicate the statement deletes every row of the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delete {
    table_name: Option<String>,
    schema: Option<String>,
    where_clause: Option<String>,
}

impl Delete {
    /// Create an empty DELETE.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table to delete from.
    pub fn from(mut self, table_name: &str) -> Self {
        self.table_name = Some(table_name.to_string());
        self
    }

    /// Set the schema that qualifies the table.
    pub fn set_schema(mut self, schema: &str) -> Self {
        self.schema = non_blank(schema);
        self
    }

    /// Set the raw WHERE predicate, emitted verbatim. Blank text clears it.
    pub fn where_clause(mut self, predicate: &str) -> Self {
        self.where_clause = non_blank(predicate);
        self
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn predicate(&self) -> Option<&str> {
        self.where_clause.as_deref()
    }

    fn target(&self) -> Ident {
        Ident::qualified(self.schema.as_deref(), self.table_name.as_deref().unwrap_or_default())
    }
}

impl Statement for Delete {
    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }

    fn validate(&self) -> BuildResult<()> {
        check::identifier(self.table_name.as_deref(), "TableName")?;
        Ok(())
    }

    fn render(&self, indent: &str) -> String {
        let mut sql = format!("DELETE FROM {}", self.target());
        if let Some(predicate) = &self.where_clause {
            push_clause(&mut sql, indent, &format!("WHERE {predicate}"));
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_basic() {
        let sql = Delete::new()
            .from("dbo.Person")
            .where_clause("Id = 5")
            .build()
            .unwrap();
        assert_eq!(sql, "DELETE FROM [dbo].[Person]\n    WHERE Id = 5");
    }

    #[test]
    fn test_delete_all_rows() {
        let sql = Delete::new().from("Person").build().unwrap();
        assert_eq!(sql, "DELETE FROM [Person]");
    }

    #[test]
    fn test_delete_requires_table() {
        assert!(Delete::new().build().unwrap_err().is_argument_null());
        assert!(Delete::new().from("").build().is_err());
        assert!(Delete::new().from("..").build().is_err());
    }

    #[test]
    fn test_schema_does_not_stand_in_for_table() {
        let err = Delete::new().from(".").set_schema("dbo").build().unwrap_err();
        assert_eq!(err, crate::BuildError::argument_null("TableName"));
    }
}
