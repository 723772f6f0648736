use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use corelib::builder::{Insert, Select, Statement, insert, select};
use corelib::{SqlValue, add_brackets, format_value};

/// SELECT [col0], [col1], ... FROM [dbo].[t] WHERE col0 > 0 ORDER BY [col0] DESC
fn build_select(n: usize) -> Select {
    select("dbo.t")
        .columns((0..n).map(|i| format!("col{i}")))
        .where_clause("col0 > 0")
        .order_by_descending("col0")
}

/// INSERT INTO [dbo].[t] ([col0], ...) VALUES (N'v0', ...)
fn build_insert(n: usize) -> Insert {
    (0..n).fold(insert("dbo.t"), |qb, i| {
        qb.value(&format!("col{i}"), format!("v{i}"))
    })
}

fn bench_select_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/select_render");

    for n in [1, 5, 10, 50, 100] {
        let qb = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.build()));
        });
    }

    group.finish();
}

fn bench_insert_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/insert_build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let qb = build_insert(n).return_id(true);
                black_box(qb.build());
            });
        });
    }

    group.finish();
}

fn bench_format_value(c: &mut Criterion) {
    let values = [
        ("int", SqlValue::from(42)),
        ("text", SqlValue::from("Ali")),
        ("quoted_text", SqlValue::from("O'Brien")),
        ("null", SqlValue::Null),
    ];

    let mut group = c.benchmark_group("sql_builder/format_value");
    for (name, value) in &values {
        group.bench_with_input(BenchmarkId::from_parameter(name), value, |b, value| {
            b.iter(|| black_box(format_value(value)));
        });
    }
    group.finish();
}

fn bench_add_brackets(c: &mut Criterion) {
    c.bench_function("sql_builder/add_brackets", |b| {
        b.iter(|| black_box(add_brackets(black_box("dbo.Person.Name"))));
    });
}

criterion_group!(
    benches,
    bench_select_render,
    bench_insert_build_and_render,
    bench_format_value,
    bench_add_brackets
);
criterion_main!(benches);
