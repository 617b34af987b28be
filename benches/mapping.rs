//! Benchmarks for rename-table loading and lookups.
//!
//! Tests performance of:
//! - Loading a generated table with many classes and overloads
//! - Class and member lookups, forward and reverse
//! - Descriptor remapping

extern crate remapper;

use criterion::{criterion_group, criterion_main, Criterion};
use remapper::RenameTable;
use std::hint::black_box;

const CLASSES: usize = 2_000;

/// Generate a table of `CLASSES` classes with four fields and four overloads each.
fn generate_table() -> String {
    let mut table = String::new();
    for class in 0..CLASSES {
        table.push_str(&format!("pkg/sub/Class{class} c{class}\n"));
        for field in 0..4 {
            table.push_str(&format!("\tfield{field} f{field}\n"));
        }
        table.push_str("\trun ()V m0\n");
        table.push_str("\trun (I)V m1\n");
        table.push_str(&format!("\trun (Lpkg/sub/Class{class};)V m2\n"));
        table.push_str(&format!("\trun (Lpkg/sub/Class{class};I)Lpkg/sub/Class0; m3\n"));
    }
    table
}

/// Benchmark parsing the generated table.
fn bench_load_table(c: &mut Criterion) {
    let data = generate_table().into_bytes();

    c.bench_function("mapping_load_table", |b| {
        b.iter(|| {
            let table = RenameTable::from_mem(black_box(data.clone())).unwrap();
            black_box(table)
        });
    });
}

/// Benchmark class lookups, internal and dotted.
fn bench_resolve_class(c: &mut Criterion) {
    let table: RenameTable = generate_table().parse().unwrap();

    c.bench_function("mapping_resolve_class", |b| {
        b.iter(|| black_box(table.resolve_class(black_box("pkg/sub/Class1000")).unwrap()));
    });

    c.bench_function("mapping_resolve_class_dotted", |b| {
        b.iter(|| black_box(table.resolve_class(black_box("pkg.sub.Class1000")).unwrap()));
    });
}

/// Benchmark member lookups with and without narrowing.
fn bench_resolve_member(c: &mut Criterion) {
    let table: RenameTable = generate_table().parse().unwrap();

    c.bench_function("mapping_resolve_field", |b| {
        b.iter(|| black_box(table.resolve_field(black_box("pkg/sub/Class10"), "field2").unwrap()));
    });

    c.bench_function("mapping_resolve_method_partial", |b| {
        b.iter(|| {
            black_box(
                table
                    .resolve_member(black_box("pkg/sub/Class10"), "run", Some("(I)"))
                    .unwrap(),
            )
        });
    });

    c.bench_function("mapping_resolve_member_reverse", |b| {
        b.iter(|| black_box(table.resolve_member_reverse(black_box("c10"), "m3").unwrap()));
    });
}

/// Benchmark rewriting a descriptor with several class references.
fn bench_map_descriptor(c: &mut Criterion) {
    let table: RenameTable = generate_table().parse().unwrap();
    let descriptor = "(Lpkg/sub/Class1;[[Lpkg/sub/Class2;ILjava/lang/String;)Lpkg/sub/Class3;";

    c.bench_function("mapping_map_method_descriptor", |b| {
        b.iter(|| black_box(table.map_method_descriptor(black_box(descriptor)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_load_table,
    bench_resolve_class,
    bench_resolve_member,
    bench_map_descriptor
);
criterion_main!(benches);
