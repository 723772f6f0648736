//! SQL Server style identifier quoting.
//!
//! [`Ident`] holds the dot-separated segments of an identifier
//! (`schema.table`, `alias.column`) and renders each one bracket-quoted:
//!
//! ```
//! use corelib::{Ident, add_brackets};
//!
//! assert_eq!(add_brackets("dbo.Person"), "[dbo].[Person]");
//! assert_eq!(Ident::qualified(Some("dbo"), "Person").to_sql(), "[dbo].[Person]");
//! ```
//!
//! Segments that already carry a bracket keep it; only the missing bracket
//! character is added. Empty segments (`a..b`, leading or trailing dots) and
//! bracket-only segments (`[`, `]`, `[]`) are dropped so the output never
//! contains `[]`.

/// A dot-separated SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ident {
    segments: Vec<String>,
}

impl Ident {
    /// Split `s` on `.`, dropping segments that are empty or hold nothing
    /// but brackets.
    pub fn parse(s: &str) -> Self {
        Self {
            segments: s
                .split('.')
                .filter(|seg| !seg.trim_matches(['[', ']']).is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Build `schema.name`, omitting the schema when it is `None` or empty.
    pub fn qualified(schema: Option<&str>, name: &str) -> Self {
        let mut ident = match schema {
            Some(schema) if !schema.is_empty() => Self::parse(schema),
            _ => Self::default(),
        };
        ident.segments.extend(Self::parse(name).segments);
        ident
    }

    /// Raw segments, as given (brackets included if the caller supplied them).
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Render the identifier with every segment bracket-quoted.
    pub fn to_sql(&self) -> String {
        // brackets + dots
        let cap = self.segments.iter().map(|s| s.len() + 3).sum::<usize>();
        let mut out = String::with_capacity(cap);
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            if !seg.starts_with('[') {
                out.push('[');
            }
            out.push_str(seg);
            if !seg.ends_with(']') {
                out.push(']');
            }
        }
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Bracket-quote every dot-separated segment of `identifier`.
pub fn add_brackets(identifier: &str) -> String {
    Ident::parse(identifier).to_sql()
}
