use super::*;

#[test]
fn test_select_full_chain() {
    let sql = Select::new()
        .columns(["Id", "Name", "Age"])
        .from("dbo.Person")
        .where_clause("Age > 0")
        .order_by("Id")
        .descending()
        .build()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT [Id], [Name], [Age]\n    FROM [dbo].[Person]\n    WHERE Age > 0\n    ORDER BY [Id] DESC"
    );
}

#[test]
fn test_select_star() {
    let sql = select("Person").star().build().unwrap();
    assert_eq!(sql, "SELECT *\n    FROM [Person]");
}

#[test]
fn test_columns_replace_and_add_append() {
    let qb = select("Person")
        .columns(["A", "B"])
        .columns(["C"])
        .add_column("D")
        .add_columns(["D", "E"]);
    assert_eq!(qb.column_names(), ["C", "D", "D", "E"]);

    let qb = qb.all_columns();
    assert!(qb.column_names().is_empty());
}

#[test]
fn test_dotted_column_is_bracketed_per_segment() {
    let sql = select("Person").columns(["p.Id"]).build().unwrap();
    assert_eq!(sql, "SELECT [p].[Id]\n    FROM [Person]");
}

#[test]
fn test_custom_indent() {
    let sql = select("Person")
        .where_clause("Id = 1")
        .build_with("\t")
        .unwrap();
    assert_eq!(sql, "SELECT *\n\tFROM [Person]\n\tWHERE Id = 1");
}

#[test]
fn test_clause_order_is_fixed() {
    let sql = select("Person")
        .with_no_lock(true)
        .order_by_descending("Id")
        .where_clause("Age > 0")
        .top(5)
        .build()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT TOP (5) *\n    FROM [Person]\n    WHERE Age > 0\n    ORDER BY [Id] DESC\n    WITH (NOLOCK)"
    );
}

#[test]
fn test_build_is_idempotent() {
    let qb = select("Person").columns(["Id"]).order_by("Id");
    assert_eq!(qb.build().unwrap(), qb.build().unwrap());

    let ins = insert("Person").value("Name", "Ali").return_id(true);
    assert_eq!(ins.build().unwrap(), ins.build().unwrap());
}

#[test]
fn test_select_without_table_fails() {
    let err = Select::new().build().unwrap_err();
    assert!(err.is_argument_null());
    assert_eq!(err.argument_name(), Some("TableName"));
}

#[test]
fn test_insert_without_values_fails() {
    let err = Insert::new().into_table("T").build().unwrap_err();
    assert!(err.is_must_have_any());
}

#[test]
fn test_direction_without_column_fails() {
    let err = select("Person").ascending().build().unwrap_err();
    assert!(err.is_argument_invalid());
    assert_eq!(err.argument_name(), Some("OrderByColumn"));
}

#[test]
fn test_deferred_error_wins_over_later_calls() {
    let err = select("Person")
        .add_column("")
        .top(0)
        .columns(["Id"])
        .build()
        .unwrap_err();
    assert_eq!(err, crate::BuildError::argument_null("Column"));
}

#[test]
fn test_update_canonical_rendering() {
    let sql = update("dbo.Person")
        .set("Name", "Ali")
        .set("Age", 5)
        .where_clause("Id = 5")
        .build()
        .unwrap();
    assert_eq!(
        sql,
        "UPDATE [dbo].[Person]\n    SET [Name] = N'Ali', [Age] = 5\n    WHERE Id = 5"
    );
}

#[test]
fn test_schema_and_dotted_table_combine() {
    let sql = delete("Person").set_schema("dbo").build().unwrap();
    assert_eq!(sql, "DELETE FROM [dbo].[Person]");
}

#[test]
fn test_any_statement_dispatch() {
    let statements: Vec<AnyStatement> = vec![
        select("A").into(),
        insert("B").value("X", 1).into(),
        update("C").set("Y", 2).into(),
        delete("D").into(),
    ];
    let kinds: Vec<StatementKind> = statements.iter().map(Statement::kind).collect();
    assert_eq!(
        kinds,
        [
            StatementKind::Select,
            StatementKind::Insert,
            StatementKind::Update,
            StatementKind::Delete
        ]
    );
    let built: Vec<String> = statements.iter().map(|s| s.build().unwrap()).collect();
    assert_eq!(built[3], "DELETE FROM [D]");
    assert_eq!(built[2], "UPDATE [C]\n    SET [Y] = 2");
}

#[test]
fn test_truncate_for_log() {
    assert_eq!(truncate_for_log("SELECT 1", 200), "SELECT 1");
    assert_eq!(truncate_for_log("SELECT 1", 6), "SELECT...");
    // multi-byte char straddling the cut
    assert_eq!(truncate_for_log("ab\u{e9}cd", 3), "ab...");
}
