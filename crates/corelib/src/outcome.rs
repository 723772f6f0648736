//! General-purpose success/failure value.
//!
//! [`Outcome`] is the value-returning error channel: validation that a caller
//! is expected to branch on (see [`crate::connection`]) reports through it
//! instead of returning `Err`. The statement builders do not use it; they
//! fail fast with [`BuildError`](crate::BuildError).
//!
//! ```
//! use corelib::Outcome;
//!
//! let checked = Outcome::<()>::success().with_message("schema ok")
//!     + Outcome::fail("missing table").with_error("TableName", "required");
//! assert!(!checked.is_succeed());
//! assert_eq!(checked.message.as_deref(), Some("missing table"));
//! assert_eq!(checked.errors.len(), 1);
//! ```

use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// One entry of an [`Outcome`]'s error list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeError {
    /// What the error is about (field name, code, ...), if anything.
    pub id: Option<String>,
    pub error: String,
}

/// Success/failure value with optional status, message, error list, extra
/// data and payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome<T = ()> {
    /// Explicit success flag. When unset, success is derived from `status`
    /// and `errors`.
    pub succeed: Option<bool>,
    pub status: Option<i32>,
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<OutcomeError>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
    pub value: Option<T>,
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Self {
            succeed: None,
            status: None,
            message: None,
            errors: Vec::new(),
            extra: BTreeMap::new(),
            value: None,
        }
    }
}

impl<T> Outcome<T> {
    /// An outcome with nothing set; it counts as succeeded.
    pub fn new() -> Self {
        Self::default()
    }

    /// An explicitly succeeded outcome.
    pub fn success() -> Self {
        Self {
            succeed: Some(true),
            ..Self::default()
        }
    }

    /// An explicitly succeeded outcome carrying `value`.
    pub fn success_with(value: T) -> Self {
        Self {
            succeed: Some(true),
            value: Some(value),
            ..Self::default()
        }
    }

    /// An explicitly failed outcome with a message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            succeed: Some(false),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: i32) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Append an `(id, error)` pair.
    pub fn with_error(mut self, id: impl Into<String>, error: impl Into<String>) -> Self {
        self.errors.push(OutcomeError {
            id: Some(id.into()),
            error: error.into(),
        });
        self
    }

    /// Append an error that is not tied to an id.
    pub fn with_anonymous_error(mut self, error: impl Into<String>) -> Self {
        self.errors.push(OutcomeError {
            id: None,
            error: error.into(),
        });
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn with_value(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }

    /// The explicit flag if set; otherwise status is absent, 0 or 200 and
    /// there are no errors.
    pub fn is_succeed(&self) -> bool {
        self.succeed.unwrap_or_else(|| {
            matches!(self.status, None | Some(0) | Some(200)) && self.errors.is_empty()
        })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_succeed()
    }

    /// Merge two outcomes: success is ANDed, the last non-null status and
    /// message win, errors and extra data are concatenated (later keys
    /// overwrite), and the right-hand value wins when present.
    pub fn combine(self, other: Outcome<T>) -> Outcome<T> {
        let succeed = self.is_succeed() && other.is_succeed();
        let mut errors = self.errors;
        errors.extend(other.errors);
        let mut extra = self.extra;
        extra.extend(other.extra);
        Outcome {
            succeed: Some(succeed),
            status: other.status.or(self.status),
            message: other.message.or(self.message),
            errors,
            extra,
            value: other.value.or(self.value),
        }
    }

    /// Change the payload type, keeping everything else.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            succeed: self.succeed,
            status: self.status,
            message: self.message,
            errors: self.errors,
            extra: self.extra,
            value: self.value.map(f),
        }
    }

    /// Convert to a plain `Result`, using the value on success and the
    /// outcome itself (minus its value) on failure.
    pub fn into_result(self) -> Result<Option<T>, Outcome<()>> {
        if self.is_succeed() {
            Ok(self.value)
        } else {
            Err(Outcome {
                value: None,
                ..self.map(|_| ())
            })
        }
    }
}

impl<T> Add for Outcome<T> {
    type Output = Outcome<T>;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs)
    }
}

impl<T> AddAssign for Outcome<T> {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = std::mem::take(self);
        *self = lhs.combine(rhs);
    }
}

/// Capture a builder guard failure for callers that collect outcomes.
impl<T> From<BuildError> for Outcome<T> {
    fn from(err: BuildError) -> Self {
        let outcome = Outcome::fail(err.to_string());
        match err.argument_name() {
            Some(name) => outcome.with_error(name.to_string(), err.to_string()),
            None => outcome.with_anonymous_error(err.to_string()),
        }
    }
}
