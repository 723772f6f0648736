//! Trait shared by the four statement builders.

use crate::builder::DEFAULT_INDENT;
use crate::error::BuildResult;

/// Statement kind, used for logging and heterogeneous lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base trait for statement builders.
///
/// Implementors provide [`validate`](Statement::validate) and
/// [`render`](Statement::render); callers use [`build`](Statement::build),
/// which never renders a statement that failed validation.
pub trait Statement {
    /// Which kind of statement this is.
    fn kind(&self) -> StatementKind;

    /// Check required fields and deferred fluent-call errors.
    fn validate(&self) -> BuildResult<()>;

    /// Render SQL text. Only meaningful after `validate` succeeded.
    fn render(&self, indent: &str) -> String;

    /// Validate and render with the default four-space indent.
    fn build(&self) -> BuildResult<String> {
        self.build_with(DEFAULT_INDENT)
    }

    /// Validate and render, prefixing every clause after the first with `indent`.
    fn build_with(&self, indent: &str) -> BuildResult<String> {
        if let Err(err) = self.validate() {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "corelib.sql", kind = %self.kind(), error = %err, "statement rejected");
            return Err(err);
        }
        let sql = self.render(indent);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "corelib.sql",
            kind = %self.kind(),
            sql = %crate::builder::truncate_for_log(&sql, crate::builder::LOG_SQL_MAX_LEN),
            "statement built"
        );
        Ok(sql)
    }
}

#[cfg(all(test, feature = "tracing"))]
mod tests {
    use std::collections::BTreeMap;
    use std::fmt::Write as _;
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;
    use crate::builder::{LOG_SQL_MAX_LEN, select};

    #[derive(Debug)]
    struct Captured {
        level: Level,
        target: String,
        fields: BTreeMap<String, String>,
    }

    #[derive(Clone, Default)]
    struct CaptureLayer(Arc<Mutex<Vec<Captured>>>);

    struct FieldVisitor<'a>(&'a mut BTreeMap<String, String>);

    impl Visit for FieldVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            let mut text = String::new();
            let _ = write!(text, "{value:?}");
            self.0.insert(field.name().to_string(), text);
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }
    }

    impl<S: Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = BTreeMap::new();
            event.record(&mut FieldVisitor(&mut fields));
            self.0.lock().unwrap().push(Captured {
                level: *event.metadata().level(),
                target: event.metadata().target().to_string(),
                fields,
            });
        }
    }

    fn capture(f: impl FnOnce()) -> Vec<Captured> {
        let layer = CaptureLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        tracing::subscriber::with_default(subscriber, f);
        let mut events = layer.0.lock().unwrap();
        std::mem::take(&mut *events)
    }

    #[test]
    fn successful_build_logs_debug_event() {
        let events = capture(|| {
            select("Person").build().unwrap();
        });
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.level, Level::DEBUG);
        assert_eq!(event.target, "corelib.sql");
        assert_eq!(event.fields["kind"], "SELECT");
        assert_eq!(event.fields["sql"], "SELECT *\n    FROM [Person]");
        assert_eq!(event.fields["message"], "statement built");
    }

    #[test]
    fn rejected_build_logs_warn_event() {
        let events = capture(|| {
            select("").build().unwrap_err();
        });
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.level, Level::WARN);
        assert_eq!(event.target, "corelib.sql");
        assert!(event.fields["error"].contains("TableName"));
        assert_eq!(event.fields["message"], "statement rejected");
    }

    #[test]
    fn logged_sql_is_truncated() {
        let predicate = format!("Name = '{}'", "x".repeat(300));
        let events = capture(|| {
            select("Person").where_clause(&predicate).build().unwrap();
        });
        let sql = &events[0].fields["sql"];
        assert_eq!(sql.len(), LOG_SQL_MAX_LEN + "...".len());
        assert!(sql.starts_with("SELECT *\n    FROM [Person]"));
        assert!(sql.ends_with("..."));
    }
}
