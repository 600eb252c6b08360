//! Benchmarks for htmlblocks conversion performance.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use htmlblocks::{Converter, KeyGenerator, RenderOptions};

/// Creates a synthetic article with the given number of sections.
fn create_test_html(sections: usize) -> String {
    let mut html = String::new();
    for i in 0..sections {
        html.push_str(&format!("<h2>Section {}</h2>\n", i + 1));
        html.push_str(
            "<p>Some <em>styled</em> text with a <a href=\"https://example.com\" \
             data-linktype=\"external\">link</a> and <strong>bold</strong> words.</p>\n",
        );
        html.push_str("<ul><li>one</li><li>two<ul><li>nested</li></ul></li></ul>\n");
        html.push_str("<p><img class=\"image-left\" src=\"a/b/@@images/image/preview\"></p>\n");
        html.push_str("<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>\n");
        html.push_str("<iframe src=\"https://www.youtube.com/embed/VASywEuqFd8\"></iframe>\n");
    }
    html
}

/// Benchmark conversion at various sizes.
fn bench_convert(c: &mut Criterion) {
    let converter = Converter::new();
    let mut group = c.benchmark_group("convert");

    for sections in [1, 10, 100].iter() {
        let html = create_test_html(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| {
                let mut keys = KeyGenerator::with_seed(1);
                converter.convert_with_keys(black_box(&html), &mut keys)
            });
        });
    }

    group.finish();
}

/// Benchmark JSON rendering of converted blocks.
fn bench_render(c: &mut Criterion) {
    let blocks = Converter::new().convert(&create_test_html(10));

    c.bench_function("render_blocks_compact", |b| {
        b.iter(|| htmlblocks::render::to_json(black_box(&blocks), &RenderOptions::new().compact()));
    });

    c.bench_function("render_volto_compact", |b| {
        b.iter(|| {
            htmlblocks::render::to_json(black_box(&blocks), &RenderOptions::new().compact().volto())
        });
    });
}

/// Benchmark builder pattern overhead, which includes compiling the video id matcher.
fn bench_builder_creation(c: &mut Criterion) {
    c.bench_function("builder_creation", |b| {
        b.iter(|| Converter::new().without_hook().text_only());
    });
}

criterion_group!(benches, bench_convert, bench_render, bench_builder_creation);
criterion_main!(benches);
