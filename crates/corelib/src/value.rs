//! Typed SQL values and their literal text form.
//!
//! [`SqlValue`] is what the INSERT and UPDATE builders store for each column.
//! [`format_value`] turns a value into a SQL literal (`N'Ali'`, `5`, `NULL`);
//! [`render_value`] picks between that and the raw text depending on the
//! statement's `force_format_values` flag.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{BuildError, BuildResult};

/// Literal emitted for an absent value.
pub const NULL: &str = "NULL";

/// A runtime value destined for an INSERT or UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    #[cfg(feature = "rust_decimal")]
    Decimal(rust_decimal::Decimal),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    Uuid(Uuid),
    /// JSON arrays and objects; rendered as their JSON text.
    Json(serde_json::Value),
    /// Any other value, carried as its display text.
    Other(String),
}

impl SqlValue {
    /// Wrap any displayable value that has no dedicated variant.
    pub fn other(value: impl std::fmt::Display) -> Self {
        Self::Other(value.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Integers, floats and decimals.
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Int(_) | Self::UInt(_) | Self::Float(_) => true,
            #[cfg(feature = "rust_decimal")]
            Self::Decimal(_) => true,
            _ => false,
        }
    }

    /// The value's own text, without any SQL quoting. Null renders as `NULL`.
    pub fn raw_text(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed(NULL),
            Self::Bool(v) => Cow::Owned(v.to_string()),
            Self::Int(v) => Cow::Owned(v.to_string()),
            Self::UInt(v) => Cow::Owned(v.to_string()),
            Self::Float(v) => Cow::Owned(v.to_string()),
            #[cfg(feature = "rust_decimal")]
            Self::Decimal(v) => Cow::Owned(v.to_string()),
            Self::Text(v) | Self::Other(v) => Cow::Borrowed(v),
            Self::Date(v) => Cow::Owned(v.format("%Y-%m-%d").to_string()),
            Self::Time(v) => Cow::Owned(v.format("%H:%M:%S%.f").to_string()),
            Self::DateTime(v) => Cow::Owned(v.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
            Self::DateTimeOffset(v) => {
                Cow::Owned(v.format("%Y-%m-%d %H:%M:%S%.f %:z").to_string())
            }
            Self::Uuid(v) => Cow::Owned(v.to_string()),
            Self::Json(v) => Cow::Owned(v.to_string()),
        }
    }
}

/// Format a value as a SQL literal.
///
/// Rules, first match wins:
/// 1. text already starting with `'` is returned unchanged (caller pre-quoted);
/// 2. numbers are bare;
/// 3. the empty string is `''`;
/// 4. other strings are `N'...'` Unicode literals;
/// 5. null is `NULL`;
/// 6. everything else is `'...'`.
///
/// Quotes at both ends of a string are trimmed and embedded quotes are doubled.
pub fn format_value(value: &SqlValue) -> String {
    if value.is_null() {
        return NULL.to_string();
    }
    let text = value.raw_text();
    if text.starts_with('\'') || value.is_numeric() {
        return text.into_owned();
    }
    match value {
        SqlValue::Text(s) if s.is_empty() => "''".to_string(),
        SqlValue::Text(s) => format!("N'{}'", escape_quotes(s.trim_matches('\''))),
        _ => format!("'{}'", escape_quotes(text.trim_matches('\''))),
    }
}

/// Render a value for a statement: the literal form when `force_format` is
/// set, the raw text otherwise.
pub fn render_value(value: &SqlValue, force_format: bool) -> String {
    if force_format {
        format_value(value)
    } else {
        value.raw_text().into_owned()
    }
}

fn escape_quotes(s: &str) -> Cow<'_, str> {
    if s.contains('\'') {
        Cow::Owned(s.replace('\'', "''"))
    } else {
        Cow::Borrowed(s)
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for SqlValue {
                fn from(v: $t) -> Self {
                    Self::$variant(<$target>::from(v))
                }
            }
        )*
    };
}

impl_from_int!(Int, i64: i8, i16, i32, i64);
impl_from_int!(UInt, u64: u8, u16, u32, u64);

impl From<isize> for SqlValue {
    fn from(v: isize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<usize> for SqlValue {
    fn from(v: usize) -> Self {
        Self::UInt(v as u64)
    }
}

impl From<f32> for SqlValue {
    /// Goes through the f32's shortest decimal text so `1.1f32` stays `1.1`
    /// instead of picking up the widened binary tail.
    fn from(v: f32) -> Self {
        Self::Float(v.to_string().parse().unwrap_or(f64::from(v)))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

#[cfg(feature = "rust_decimal")]
impl From<rust_decimal::Decimal> for SqlValue {
    fn from(v: rust_decimal::Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<char> for SqlValue {
    fn from(v: char) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for SqlValue {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveTime> for SqlValue {
    fn from(v: NaiveTime) -> Self {
        Self::Time(v)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(v: NaiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for SqlValue {
    fn from(v: DateTime<Tz>) -> Self {
        Self::DateTimeOffset(v.fixed_offset())
    }
}

impl From<Uuid> for SqlValue {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for SqlValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    n.as_f64().map_or_else(|| Self::Other(n.to_string()), Self::Float)
                }
            }
            Value::String(s) => Self::Text(s),
            other => Self::Json(other),
        }
    }
}

/// Ordered column → value mapping used by INSERT and UPDATE.
///
/// Columns keep the order of their first insertion; setting a column again
/// replaces its value in place. Names are compared exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMap {
    entries: Vec<(String, SqlValue)>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column` to `value`, replacing any earlier value for it.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    /// Look up a column's value by name.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &SqlValue> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn as_slice(&self) -> &[(String, SqlValue)] {
        &self.entries
    }

    /// Map the fields of a serializable struct (or map) to columns, in
    /// declaration order.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> BuildResult<Self> {
        match serde_json::to_value(value)? {
            serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(BuildError::argument_invalid(
                "Values",
                format!("expected a struct or map, got {}", json_kind(&other)),
            )),
        }
    }
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl<K: Into<String>, V: Into<SqlValue>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl IntoIterator for ValueMap {
    type Item = (String, SqlValue);
    type IntoIter = std::vec::IntoIter<(String, SqlValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<SqlValue>> Extend<(K, V)> for ValueMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
