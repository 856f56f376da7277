// benches/extract_bench.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sitecheck::check::ErrorLog;
use sitecheck::config::FieldLimits;
use sitecheck::extraction::SeoExtractor;
use sitecheck::normalize::FieldNormalizer;

fn sample_page() -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html><html><head><title>Benchmark page</title>
        <meta name="viewport" content="width=device-width">
        <meta name="description" content="A page with a lot of body text."></head><body>"#,
    );
    for i in 0..500 {
        html.push_str(&format!("<div class=\"row\"><p>Paragraph {i} <b>bold</b> <a href=\"/p/{i}\">link</a></p></div>"));
    }
    html.push_str(&format!("<h1>{}</h1></body></html>", "Heading ".repeat(60)));
    html
}

fn bench_extract(c: &mut Criterion) {
    let page = sample_page();
    let extractor = SeoExtractor::new();
    let limits = FieldLimits::default();

    c.bench_function("extract_seo_fields", |b| {
        b.iter(|| {
            let mut log = ErrorLog::new();
            let fields = extractor.extract(black_box(page.as_bytes()), Some("text/html"), &mut log);
            black_box(fields)
        })
    });

    c.bench_function("extract_and_normalize", |b| {
        b.iter(|| {
            let mut log = ErrorLog::new();
            let fields = extractor.extract(black_box(page.as_bytes()), Some("text/html"), &mut log);
            black_box(FieldNormalizer::normalize(fields, &limits))
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
