use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dumper::{
    to_value, ConsoleFormatter, HtmlFormatter, HtmlStyles, ParserOptions, Realm, Theme, Value,
};
use serde::Serialize;

#[derive(Serialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect()
}

fn benchmark_tokenize_simple(c: &mut Criterion) {
    let realm = Realm::new();
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };
    let value = to_value(&realm, &user).unwrap();

    c.bench_function("tokenize_simple_struct", |b| {
        b.iter(|| dumper::tokenize(black_box(&value)))
    });
}

fn benchmark_tokenize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize_array");

    for size in [10, 50, 100, 500].iter() {
        let realm = Realm::new();
        let value = to_value(&realm, &products(*size)).unwrap();
        let options = ParserOptions::new().with_max_array_length(usize::MAX);

        group.bench_with_input(BenchmarkId::from_parameter(size), &value, |b, value| {
            b.iter(|| dumper::tokenize_with_options(black_box(value), options.clone()))
        });
    }
    group.finish();
}

fn benchmark_tokenize_cyclic(c: &mut Criterion) {
    let realm = Realm::new();
    let nodes: Vec<_> = (0..50).map(|_| realm.object()).collect();
    for (i, node) in nodes.iter().enumerate() {
        node.insert("id", i as u32);
        node.insert("next", &nodes[(i + 1) % nodes.len()]);
        node.insert("root", &nodes[0]);
    }
    let value = Value::from(&nodes[0]);
    let options = ParserOptions::new().with_depth(usize::MAX);

    c.bench_function("tokenize_cyclic_ring", |b| {
        b.iter(|| dumper::tokenize_with_options(black_box(&value), options.clone()))
    });
}

fn benchmark_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");

    let realm = Realm::new();
    let tokens = dumper::tokenize(&to_value(&realm, &products(100)).unwrap());
    let plain = ConsoleFormatter::new(Theme::plain());
    let colored = ConsoleFormatter::new(Theme::default());
    let html = HtmlFormatter::new(HtmlStyles::default());

    group.bench_function("plain", |b| b.iter(|| plain.format(black_box(&tokens))));
    group.bench_function("colored", |b| b.iter(|| colored.format(black_box(&tokens))));
    group.bench_function("html", |b| b.iter(|| html.format(black_box(&tokens))));

    group.finish();
}

fn benchmark_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize_strings");

    let short = Value::from("short");
    let long = Value::from("This is a very long string that contains a lot of text\n".repeat(200));

    group.bench_function("short_string", |b| {
        b.iter(|| dumper::tokenize(black_box(&short)))
    });
    group.bench_function("truncated_string", |b| {
        b.iter(|| dumper::tokenize(black_box(&long)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_tokenize_simple,
    benchmark_tokenize_array,
    benchmark_tokenize_cyclic,
    benchmark_format,
    benchmark_strings,
);
criterion_main!(benches);
