//! Benchmarks for rendering nested content trees.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use folio_content::{Composite, Compound, Content, Element, Headline, Page, PageTree, Paragraph};
use folio_renderer::{HtmlRenderer, LayoutDirs, LayoutResolver, MemoryLayoutStore, MiniJinjaEngine};
use folio_repository::MockRepository;

fn layouts() -> LayoutResolver {
    let store = MemoryLayoutStore::new()
        .with_layout("/layouts/headline.jinja", "<h{{ level }}>{{ text|e }}</h{{ level }}>")
        .with_layout("/layouts/paragraph.jinja", "<p>{{ text|e }}</p>")
        .with_layout(
            "/layouts/slider.jinja",
            "<div id=\"{{ id }}\">{% for e in elements %}<div>{{ e.html }}</div>{% endfor %}</div>",
        )
        .with_layout(
            "/layouts/tabs.jinja",
            "<ul id=\"{{ id }}\">{% for e in elements %}<li>{{ e.html }}</li>{% endfor %}</ul>",
        );
    LayoutResolver::new(
        LayoutDirs::new("/layouts"),
        Box::new(store),
        Box::new(MiniJinjaEngine::new()),
    )
}

fn renderer() -> HtmlRenderer {
    let pages = PageTree::builder(Page::new("Home", "")).build();
    HtmlRenderer::new(layouts(), Arc::new(MockRepository::new(pages)))
}

/// Tabs of sliders of paragraphs, `depth` levels of composites deep.
fn nested(depth: usize, width: usize) -> Content {
    if depth == 0 {
        return Content::Paragraph(Paragraph::new("Lorem ipsum dolor sit amet."));
    }
    let elements = (0..width)
        .map(|_| Element::new(nested(depth - 1, width)))
        .collect();
    let composite = Composite {
        title: Some(format!("Level {depth}")),
        elements,
        ..Default::default()
    };
    if depth % 2 == 0 {
        Content::Tabs(composite)
    } else {
        Content::Slider(composite)
    }
}

fn bench_render_leaf(c: &mut Criterion) {
    let mut renderer = renderer();
    let content = Content::Headline(Headline::new("Title", 1));

    c.bench_function("render_headline", |b| {
        b.iter(|| {
            renderer.render(&content).unwrap();
            renderer.finish()
        });
    });
}

fn bench_render_structural(c: &mut Criterion) {
    let mut renderer = renderer();
    let elements = (0..50)
        .map(|i| Element::new(Content::Paragraph(Paragraph::new(format!("Paragraph {i}")))))
        .collect();
    let content = Content::Compound(Compound::new("section", elements));

    c.bench_function("render_compound_50_paragraphs", |b| {
        b.iter(|| {
            renderer.render(&content).unwrap();
            renderer.finish()
        });
    });
}

fn bench_render_nested_composites(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_nested_composites");

    for depth in [1, 2, 3, 4] {
        let content = nested(depth, 3);
        let leaves = 3u64.pow(u32::try_from(depth).unwrap_or(0));
        group.throughput(Throughput::Elements(leaves));

        let mut renderer = renderer();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &content, |b, content| {
            b.iter(|| {
                renderer.render(content).unwrap();
                renderer.finish()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render_leaf,
    bench_render_structural,
    bench_render_nested_composites
);
criterion_main!(benches);
