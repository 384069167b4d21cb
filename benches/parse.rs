//! Tokenizer and parser throughput on synthetic documents.
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use minijson::{parse, tokenizer::tokenize};

/// Builds an array of `n` small objects, each with a nested array.
fn wide_document(n: usize) -> String {
    let members: Vec<String> = (0..n)
        .map(|i| format!(r#"{{"id": {i}, "name": "item{i}", "tags": [1, 2, 3]}}"#))
        .collect();
    format!("[{}]", members.join(","))
}

/// Builds `depth` nested single-member objects.
fn deep_document(depth: usize) -> String {
    format!("{}1{}", r#"{"k":["#.repeat(depth), "]}".repeat(depth))
}

fn bench_parse(c: &mut Criterion) {
    let wide = wide_document(1_000);
    let deep = deep_document(200);

    c.bench_function("tokenize wide", |b| {
        b.iter(|| tokenize(black_box(wide.as_bytes())));
    });
    c.bench_function("parse wide", |b| {
        b.iter(|| parse(black_box(&wide)));
    });
    c.bench_function("parse deep", |b| {
        b.iter(|| parse(black_box(&deep)));
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
