//! # corelib
//!
//! Fluent builders that produce SQL Server statement text, plus a general
//! success/failure value.
//!
//! ## Features
//!
//! - **Text only**: statements are rendered to strings; nothing is executed
//! - **Bracket quoting**: table and column names become `[schema].[name]`
//! - **Literal formatting**: values are rendered as T-SQL literals (`5`, `N'Ali'`, `NULL`)
//! - **Fail fast**: a statement missing its table or values never renders partial SQL
//! - **Result value**: [`Outcome`] collects errors for validation callers branch on
//!
//! ## Statement builders
//!
//! ```
//! use corelib::builder::{insert, select, update, delete, Statement};
//!
//! let sql = select("dbo.Person")
//!     .columns(["Id", "Name"])
//!     .where_clause("Age > 0")
//!     .order_by("Id")
//!     .build()?;
//! assert_eq!(sql, "SELECT [Id], [Name]\n    FROM [dbo].[Person]\n    WHERE Age > 0\n    ORDER BY [Id] ASC");
//!
//! let sql = insert("Person").value("Name", "Ali").value("Age", 5).build()?;
//! assert_eq!(sql, "INSERT INTO [Person] ([Name], [Age])\n    VALUES (N'Ali', 5)");
//!
//! let sql = update("Person").set("Age", 6).where_clause("Id = 1").build()?;
//! assert_eq!(sql, "UPDATE [Person]\n    SET [Age] = 6\n    WHERE Id = 1");
//!
//! let sql = delete("Person").where_clause("Id = 1").build()?;
//! assert_eq!(sql, "DELETE FROM [Person]\n    WHERE Id = 1");
//! # Ok::<(), corelib::BuildError>(())
//! ```
//!
//! ## Logging
//!
//! With the `tracing` feature every successful build emits a `debug` event on
//! target `corelib.sql`; rejected builds emit a `warn` event.

pub mod builder;
pub mod check;
pub mod connection;
pub mod error;
pub mod ident;
pub mod outcome;
pub mod prelude;
pub mod value;

pub use connection::ConnectionStringBuilder;
pub use error::{BuildError, BuildResult};
pub use ident::{Ident, add_brackets};
pub use outcome::{Outcome, OutcomeError};
pub use value::{NULL, SqlValue, ValueMap, format_value, render_value};

// Re-export builder entry points for easy access
pub use builder::{
    AnyStatement, DEFAULT_INDENT, Delete, Insert, OrderDirection, Select, Statement,
    StatementKind, Update, delete, insert, select, update,
};
