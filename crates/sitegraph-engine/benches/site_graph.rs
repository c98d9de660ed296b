//! Benchmarks for tree building and link validation.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sitegraph_engine::{PageInput, PageNode, SiteIndex, SiteInput, SiteTree, build, validate};

/// Create a site with given depth and breadth. Each page links to a sibling,
/// a missing page, an anchor and an external URL.
fn create_site_input(depth: usize, breadth: usize) -> SiteInput {
    fn create_level(prefix: &str, depth: usize, max_depth: usize, breadth: usize, out: &mut Vec<String>) {
        if depth > max_depth {
            return;
        }
        for i in 0..breadth {
            let slug = format!("{prefix}section-{i}/");
            out.push(slug.clone());
            create_level(&slug, depth + 1, max_depth, breadth, out);
        }
    }

    let mut slugs = Vec::new();
    create_level("/", 1, depth, breadth, &mut slugs);

    let pages = slugs
        .iter()
        .map(|slug| {
            let parent = slug.trim_end_matches('/').rsplit_once('/').map_or("/", |(p, _)| p);
            PageInput::new(slug.clone())
                .with_title(format!("Page {slug}"))
                .with_links([
                    format!("{parent}/section-0/"),
                    format!("{slug}missing/"),
                    "#top".to_owned(),
                    "https://example.com".to_owned(),
                ])
        })
        .collect();

    SiteInput { slugs, pages }
}

fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_build");

    for (depth, breadth) in [(3, 5), (5, 3), (2, 30)] {
        let input = create_site_input(depth, breadth);
        let nodes: Vec<PageNode> = input.pages.iter().map(PageNode::from_input).collect();
        let index = SiteIndex::build(&input.slugs);

        group.bench_with_input(
            BenchmarkId::new("build_and_resolve", format!("d{depth}_b{breadth}")),
            &nodes,
            |b, nodes| {
                b.iter(|| {
                    let mut tree = SiteTree::build(nodes);
                    tree.resolve_titles(&index)
                });
            },
        );
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let input = create_site_input(3, 5);
    let nodes: Vec<PageNode> = input.pages.iter().map(PageNode::from_input).collect();
    let index = SiteIndex::build(&input.slugs);

    c.bench_function("validate_d3_b5", |b| b.iter(|| validate(&nodes, &index)));
}

fn bench_full_build(c: &mut Criterion) {
    let input = create_site_input(3, 5);

    c.bench_function("build_d3_b5", |b| b.iter(|| build(&input)));
}

criterion_group!(benches, bench_tree_build, bench_validate, bench_full_build);
criterion_main!(benches);
