//! Guard functions used by the statement builders.
//!
//! Each guard returns `Err(BuildError)` naming the offending argument, so
//! builders can stop with `?` instead of emitting partial SQL.

use crate::error::{BuildError, BuildResult};
use crate::ident::Ident;

/// Fails with [`BuildError::ArgumentNull`] if `value` is `None`, empty, or only whitespace.
pub fn not_null_or_empty<'a>(value: Option<&'a str>, name: &str) -> BuildResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(BuildError::argument_null(name)),
    }
}

/// Like [`not_null_or_empty`], but also fails when `value` has no
/// identifier segment of its own (`"."`, `"[]"`).
pub fn identifier<'a>(value: Option<&'a str>, name: &str) -> BuildResult<&'a str> {
    let value = not_null_or_empty(value, name)?;
    if Ident::parse(value).is_empty() {
        return Err(BuildError::argument_null(name));
    }
    Ok(value)
}

/// Fails with [`BuildError::MustHaveAny`] if the collection is empty.
pub fn must_have_any<T>(items: &[T], name: &str) -> BuildResult<()> {
    if items.is_empty() {
        return Err(BuildError::must_have_any(name));
    }
    Ok(())
}

/// Fails with [`BuildError::ArgumentInvalid`] unless `condition` holds.
pub fn must_be(condition: bool, name: &str, reason: impl FnOnce() -> String) -> BuildResult<()> {
    if !condition {
        return Err(BuildError::argument_invalid(name, reason()));
    }
    Ok(())
}
