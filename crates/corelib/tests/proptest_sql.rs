//! Property-based tests for identifier quoting and statement shape.

use corelib::builder::{Statement, insert, select};
use corelib::{add_brackets, format_value};
use proptest::prelude::*;

// =============================================================================
// Identifier quoting
// =============================================================================

proptest! {
    /// A plain name is wrapped in exactly one pair of brackets.
    #[test]
    fn plain_name_is_wrapped(name in "[A-Za-z_][A-Za-z0-9_]{0,20}") {
        prop_assert_eq!(add_brackets(&name), format!("[{name}]"));
    }

    /// Quoting is idempotent.
    #[test]
    fn quoting_twice_is_quoting_once(
        parts in prop::collection::vec("[A-Za-z_][A-Za-z0-9_]{0,10}", 1..4)
    ) {
        let once = add_brackets(&parts.join("."));
        prop_assert_eq!(add_brackets(&once), once.clone());
    }

    /// Every dot-separated segment gets its own brackets.
    #[test]
    fn segments_are_quoted_separately(
        schema in "[A-Za-z_][A-Za-z0-9_]{0,10}",
        table in "[A-Za-z_][A-Za-z0-9_]{0,10}"
    ) {
        prop_assert_eq!(
            add_brackets(&format!("{schema}.{table}")),
            format!("[{schema}].[{table}]")
        );
    }
}

// =============================================================================
// Statement shape
// =============================================================================

proptest! {
    /// The SELECT list has one bracketed entry per column, in call order.
    #[test]
    fn select_lists_columns_in_order(
        columns in prop::collection::vec("[A-Za-z_][A-Za-z0-9_]{0,20}", 1..12)
    ) {
        let sql = select("T").columns(columns.iter().map(String::as_str)).build().unwrap();
        let expected: Vec<String> = columns.iter().map(|c| format!("[{c}]")).collect();
        prop_assert_eq!(sql, format!("SELECT {}\n    FROM [T]", expected.join(", ")));
    }

    /// INSERT renders as many values as columns, paired by position.
    #[test]
    fn insert_pairs_columns_with_values(values in prop::collection::vec(any::<i64>(), 1..12)) {
        let qb = values
            .iter()
            .enumerate()
            .fold(insert("T"), |qb, (i, v)| qb.value(&format!("c{i}"), *v));
        let sql = qb.build().unwrap();

        let columns: Vec<String> = (0..values.len()).map(|i| format!("[c{i}]")).collect();
        let literals: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        prop_assert_eq!(
            sql,
            format!(
                "INSERT INTO [T] ({})\n    VALUES ({})",
                columns.join(", "),
                literals.join(", ")
            )
        );
    }

    /// Building twice yields the same text.
    #[test]
    fn build_is_idempotent(top in 1u64..1000, column in "[A-Za-z_][A-Za-z0-9_]{0,20}") {
        let qb = select("T").top(top).order_by(&column);
        prop_assert_eq!(qb.build().unwrap(), qb.build().unwrap());
    }

    /// String literals never leak an unescaped quote.
    #[test]
    fn text_literals_double_inner_quotes(s in "[a-z]{1,5}'[a-z]{1,5}") {
        let literal = format_value(&s.as_str().into());
        prop_assert_eq!(literal, format!("N'{}'", s.replace('\'', "''")));
    }
}
