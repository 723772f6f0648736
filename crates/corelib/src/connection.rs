//! SQL Server connection string builder.
//!
//! Unlike the statement builders, [`ConnectionStringBuilder::build`] reports
//! problems through an [`Outcome`] so callers can collect and show every
//! missing setting at once:
//!
//! ```
//! use corelib::ConnectionStringBuilder;
//!
//! let outcome = ConnectionStringBuilder::new()
//!     .data_source(".\\SQLEXPRESS")
//!     .initial_catalog("Shop")
//!     .integrated_security(true)
//!     .build();
//! assert!(outcome.is_succeed());
//! assert_eq!(
//!     outcome.value.as_deref(),
//!     Some("Data Source=.\\SQLEXPRESS;Initial Catalog=Shop;Integrated Security=True")
//! );
//! ```

use std::borrow::Cow;

use crate::outcome::Outcome;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionStringBuilder {
    data_source: Option<String>,
    initial_catalog: Option<String>,
    integrated_security: bool,
    user_id: Option<String>,
    password: Option<String>,
    connect_timeout: Option<u32>,
    options: Vec<(String, String)>,
}

impl ConnectionStringBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Server (and optional instance) to connect to.
    pub fn data_source(mut self, server: &str) -> Self {
        self.data_source = Some(server.to_string());
        self
    }

    /// Database name.
    pub fn initial_catalog(mut self, database: &str) -> Self {
        self.initial_catalog = Some(database.to_string());
        self
    }

    /// Use Windows authentication instead of user/password.
    pub fn integrated_security(mut self, enabled: bool) -> Self {
        self.integrated_security = enabled;
        self
    }

    /// SQL authentication credentials.
    pub fn credentials(mut self, user_id: &str, password: &str) -> Self {
        self.user_id = Some(user_id.to_string());
        self.password = Some(password.to_string());
        self
    }

    /// Connection timeout in seconds.
    pub fn connect_timeout(mut self, seconds: u32) -> Self {
        self.connect_timeout = Some(seconds);
        self
    }

    /// Any other `key=value` option, appended in call order.
    pub fn option(mut self, key: &str, value: &str) -> Self {
        self.options.push((key.to_string(), value.to_string()));
        self
    }

    /// Validate the settings and render the connection string.
    ///
    /// Every problem found is listed in the returned outcome's errors; the
    /// value is only set on success.
    pub fn build(&self) -> Outcome<String> {
        let mut outcome = Outcome::new();

        if is_blank(self.data_source.as_deref()) {
            outcome += Outcome::new().with_error("DataSource", "server name is required");
        }
        if !self.integrated_security && is_blank(self.user_id.as_deref()) {
            outcome += Outcome::new().with_error(
                "UserId",
                "a user id is required unless integrated security is enabled",
            );
        }
        if self.connect_timeout == Some(0) {
            outcome += Outcome::new().with_error("ConnectTimeout", "must be greater than zero");
        }
        for (key, _) in &self.options {
            if key.trim().is_empty() || key.contains(['=', ';']) {
                outcome += Outcome::new().with_error(key.clone(), "invalid option name");
            }
        }

        if outcome.is_failure() {
            return outcome.with_message("invalid connection settings");
        }

        let mut parts: Vec<String> = Vec::new();
        let mut push = |key: &str, value: &str| parts.push(format!("{key}={}", quote(value)));

        push("Data Source", self.data_source.as_deref().unwrap_or_default());
        if let Some(db) = self.initial_catalog.as_deref().filter(|s| !s.trim().is_empty()) {
            push("Initial Catalog", db);
        }
        if self.integrated_security {
            push("Integrated Security", "True");
        } else {
            push("User ID", self.user_id.as_deref().unwrap_or_default());
            push("Password", self.password.as_deref().unwrap_or_default());
        }
        if let Some(timeout) = self.connect_timeout {
            push("Connect Timeout", &timeout.to_string());
        }
        for (key, value) in &self.options {
            push(key.trim(), value);
        }

        outcome.with_value(parts.join(";"))
    }
}

fn is_blank(s: Option<&str>) -> bool {
    s.is_none_or(|s| s.trim().is_empty())
}

/// Quote a value that would otherwise break `key=value;` parsing.
fn quote(value: &str) -> Cow<'_, str> {
    let needs_quotes = value.contains([';', '"', '\''])
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace);
    if !needs_quotes {
        return Cow::Borrowed(value);
    }
    Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
}
