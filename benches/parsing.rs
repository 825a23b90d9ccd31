use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kvp_text::{from_str, to_string, KvpMap, Value};

fn sample_text(lines: usize) -> String {
    let mut text = String::new();
    for i in 0..lines {
        match i % 5 {
            0 => text.push_str(&format!("count{i} = {i}\n")),
            1 => text.push_str(&format!("ratio{i} = {}.5\n", i)),
            2 => text.push_str(&format!("name{i} = \"item number {i}\"\n")),
            3 => text.push_str(&format!("list{i} = {i},{i},'x' # trailing note\n")),
            _ => text.push_str(&format!("flag{i}\n")),
        }
    }
    text
}

fn benchmark_parse_simple(c: &mut Criterion) {
    let text = "thing = 124\nname = \"Alice\"\nflags = 1,2,3\nverbose\n";

    c.bench_function("parse_simple_record", |b| {
        b.iter(|| from_str(black_box(text)))
    });
}

fn benchmark_parse_sized(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_lines");

    for size in [10, 50, 100, 500].iter() {
        let text = sample_text(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_write_sized(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_lines");

    for size in [10, 50, 100, 500].iter() {
        let map = from_str(&sample_text(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &map, |b, map| {
            b.iter(|| to_string(black_box(map)))
        });
    }
    group.finish();
}

fn benchmark_value_kinds(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_value_kinds");

    let integers: String = (0..100).map(|i| format!("k{i} = {i}\n")).collect();
    let floats: String = (0..100).map(|i| format!("k{i} = {i}.25\n")).collect();
    let strings: String = (0..100).map(|i| format!("k{i} = \"value {i}\"\n")).collect();
    let lists: String = (0..100).map(|i| format!("k{i} = {i},{i}.5,'x'\n")).collect();

    group.bench_function("integers", |b| b.iter(|| from_str(black_box(&integers))));
    group.bench_function("floats", |b| b.iter(|| from_str(black_box(&floats))));
    group.bench_function("strings", |b| b.iter(|| from_str(black_box(&strings))));
    group.bench_function("lists", |b| b.iter(|| from_str(black_box(&lists))));

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let map: KvpMap = [
        ("id".to_string(), Value::Int(123)),
        ("name".to_string(), Value::from("Alice")),
        ("active".to_string(), Value::Bool(true)),
        (
            "scores".to_string(),
            Value::List(vec![Value::Float(0.5), Value::Float(0.9), Value::Float(0.99)]),
        ),
    ]
    .into_iter()
    .collect();

    c.bench_function("roundtrip_simple", |b| {
        b.iter(|| {
            let written = to_string(black_box(&map));
            let _reparsed = from_str(black_box(&written)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse_simple,
    benchmark_parse_sized,
    benchmark_write_sized,
    benchmark_value_kinds,
    benchmark_roundtrip
);
criterion_main!(benches);
