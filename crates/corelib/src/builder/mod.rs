//! Fluent SQL statement builders.
//!
//! Each statement (SELECT, INSERT, UPDATE, DELETE) starts empty from its
//! factory, is configured by a chain of consuming calls, and is rendered by
//! [`Statement::build`]:
//!
//! ```
//! use corelib::builder::{Select, Statement};
//!
//! let sql = Select::new()
//!     .columns(["Id", "Name", "Age"])
//!     .from("dbo.Person")
//!     .where_clause("Age > 0")
//!     .order_by("Id")
//!     .descending()
//!     .build()?;
//! assert_eq!(
//!     sql,
//!     "SELECT [Id], [Name], [Age]\n    FROM [dbo].[Person]\n    WHERE Age > 0\n    ORDER BY [Id] DESC"
//! );
//! # Ok::<(), corelib::BuildError>(())
//! ```
//!
//! ## Layout
//!
//! - The first clause starts the text; every later clause starts on a new
//!   line prefixed with the indent (four spaces unless `build_with` says otherwise).
//! - Identifiers are bracket-quoted; `where_clause` text is emitted verbatim.
//! - A statement missing its table (or, for INSERT/UPDATE, its values) fails
//!   to build instead of producing partial SQL.

pub mod delete;
pub mod insert;
pub mod select;
pub mod traits;
pub mod update;

use std::borrow::Cow;

pub use delete::Delete;
pub use insert::Insert;
pub use select::{OrderDirection, Select};
pub use traits::{Statement, StatementKind};
pub use update::Update;

use crate::error::BuildResult;

/// Indent placed before every clause after the first.
pub const DEFAULT_INDENT: &str = "    ";

/// Longest SQL text emitted in a single log event.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) const LOG_SQL_MAX_LEN: usize = 200;

/// Create a SELECT for the given table.
///
/// # Example
/// ```
/// use corelib::builder::{select, Statement};
///
/// assert_eq!(select("Person").star().build()?, "SELECT *\n    FROM [Person]");
/// # Ok::<(), corelib::BuildError>(())
/// ```
pub fn select(table: &str) -> Select {
    Select::new().from(table)
}

/// Create an INSERT into the given table.
pub fn insert(table: &str) -> Insert {
    Insert::new().into_table(table)
}

/// Create an UPDATE of the given table.
pub fn update(table: &str) -> Update {
    Update::new().table(table)
}

/// Create a DELETE from the given table.
pub fn delete(table: &str) -> Delete {
    Delete::new().from(table)
}

/// Any of the four statements, for heterogeneous lists.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyStatement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

impl AnyStatement {
    fn inner(&self) -> &dyn Statement {
        match self {
            Self::Select(s) => s,
            Self::Insert(s) => s,
            Self::Update(s) => s,
            Self::Delete(s) => s,
        }
    }
}

impl Statement for AnyStatement {
    fn kind(&self) -> StatementKind {
        self.inner().kind()
    }

    fn validate(&self) -> BuildResult<()> {
        self.inner().validate()
    }

    fn render(&self, indent: &str) -> String {
        self.inner().render(indent)
    }
}

impl From<Select> for AnyStatement {
    fn from(s: Select) -> Self {
        Self::Select(s)
    }
}

impl From<Insert> for AnyStatement {
    fn from(s: Insert) -> Self {
        Self::Insert(s)
    }
}

impl From<Update> for AnyStatement {
    fn from(s: Update) -> Self {
        Self::Update(s)
    }
}

impl From<Delete> for AnyStatement {
    fn from(s: Delete) -> Self {
        Self::Delete(s)
    }
}

/// Start a new clause line.
pub(crate) fn push_clause(out: &mut String, indent: &str, clause: &str) {
    out.push('\n');
    out.push_str(indent);
    out.push_str(clause);
}

/// `Some(s)` unless `s` is empty or whitespace.
pub(crate) fn non_blank(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Shorten SQL for log output, cutting on a char boundary.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_for_log(sql: &str, max_bytes: usize) -> Cow<'_, str> {
    if sql.len() <= max_bytes {
        return Cow::Borrowed(sql);
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(format!("{}...", &sql[..end]))
}

#[cfg(test)]
mod tests;
