use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gqlmark::{args, dumps, dumps_compact, loads, Document, Selection};

const SIMPLE: &str = "{ user(id: 232) { id, name } }";

const NESTED: &str = r#"
{
    user(id: 232) {
        id,
        name,
        friends(recent: true).after(2434423).first(10) {
            id,
            name,
            photos(size: 50).sortBy("url") {
                url,
                width,
                height
            }
        }
    }
}"#;

fn wide_document(size: usize) -> Document {
    (0..size)
        .map(|i| {
            Selection::new(format!("item{}", i))
                .with_params(args! { "id" => i as i64, "label" => format!("Item {}", i) })
                .with_filter("first", 10)
                .with_field("id")
                .with_field("name")
        })
        .collect::<Vec<_>>()
        .into()
}

fn benchmark_loads_simple(c: &mut Criterion) {
    c.bench_function("loads_simple", |b| b.iter(|| loads(black_box(SIMPLE))));
}

fn benchmark_loads_nested(c: &mut Criterion) {
    c.bench_function("loads_nested", |b| b.iter(|| loads(black_box(NESTED))));
}

fn benchmark_dumps_nested(c: &mut Criterion) {
    let doc = loads(NESTED).unwrap();

    c.bench_function("dumps_nested", |b| b.iter(|| dumps(black_box(&doc))));
    c.bench_function("dumps_compact_nested", |b| {
        b.iter(|| dumps_compact(black_box(&doc)))
    });
}

fn benchmark_wide_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_document");

    for size in [10, 100, 1000].iter() {
        let doc = wide_document(*size);
        let text = dumps(&doc).unwrap();

        group.bench_with_input(BenchmarkId::new("dumps", size), size, |b, _| {
            b.iter(|| dumps(black_box(&doc)))
        });
        group.bench_with_input(BenchmarkId::new("loads", size), size, |b, _| {
            b.iter(|| loads(black_box(&text)))
        });
    }
    group.finish();
}

fn benchmark_string_literals(c: &mut Criterion) {
    let text = format!(
        "{{ search(q: {}) {{ hits }} }}",
        serde_json::to_string(&"escaped \"quotes\"\n and unicode é ".repeat(50)).unwrap()
    );

    c.bench_function("loads_long_string", |b| b.iter(|| loads(black_box(&text))));
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let doc = loads(NESTED).unwrap();

    c.bench_function("roundtrip_nested", |b| {
        b.iter(|| {
            let text = dumps(black_box(&doc)).unwrap();
            loads(&text).unwrap()
        })
    });
}

criterion_group!(
    benches,
    benchmark_loads_simple,
    benchmark_loads_nested,
    benchmark_dumps_nested,
    benchmark_wide_documents,
    benchmark_string_literals,
    benchmark_roundtrip
);
criterion_main!(benches);
