//! Convenient imports for typical `corelib` usage.
//!
//! ```
//! use corelib::prelude::*;
//!
//! let sql = select("Person").top(1).build()?;
//! assert_eq!(sql, "SELECT TOP (1) *\n    FROM [Person]");
//! # Ok::<(), BuildError>(())
//! ```

pub use crate::{BuildError, BuildResult, Outcome, SqlValue, ValueMap};
pub use crate::{Delete, Insert, OrderDirection, Select, Statement, Update};
pub use crate::{delete, insert, select, update};
