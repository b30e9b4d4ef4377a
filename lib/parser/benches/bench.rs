use criterion::{criterion_group, criterion_main, Criterion};
use errors::Counter;
use parser::parse_source;

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("arithmetic", |b| {
        b.iter(|| {
            let source = r#"
                (1 + 2) * 3 - 4 / (5 - 6) * -7,
                !(8 >= 9) == (10 < 11) ? 12.5 : "thirteen",
                /* nested /* comment */ here */ nil != true
            "#;
            let counter = Counter::new();
            parse_source(source, &counter).unwrap();
        })
    });

    c.bench_function("deep nesting", |b| {
        let source = format!("{}1{}", "(".repeat(200), " + 1)".repeat(200));
        b.iter(|| {
            let counter = Counter::new();
            parse_source(&source, &counter).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
