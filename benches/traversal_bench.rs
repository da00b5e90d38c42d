use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use measuretree::catalog::{
    COMPLEXITY_IN_FUNCTIONS, FUNCTIONS, FUNCTION_COMPLEXITY, FUNCTION_COMPLEXITY_DISTRIBUTION,
    NCLOC,
};
use measuretree::{
    AverageFormula, Component, DistributionFormula, FormulaExecutor, InMemoryMeasureRepository,
    InMemoryMetricRepository, Measure, Metric, MetricType, RegisteredFormula, SumFormula,
};
use std::hint::black_box;

const NCLOC_TOTAL: &str = "ncloc_total";

/// `directories` directories of `files_per_directory` files each, all with
/// raw measures for every benchmarked formula.
fn create_wide_tree(
    directories: usize,
    files_per_directory: usize,
) -> (Component, InMemoryMeasureRepository) {
    let mut measures = InMemoryMeasureRepository::new();
    let children = (0..directories)
        .map(|d| {
            let files = (0..files_per_directory)
                .map(|f| {
                    let key = format!("p/d{}/f{}.rs", d, f);
                    let value = (d * files_per_directory + f) as i64;
                    measures.set_raw_measure(key.clone(), NCLOC, Measure::int(value % 500));
                    measures.set_raw_measure(key.clone(), FUNCTIONS, Measure::int(1 + value % 7));
                    measures.set_raw_measure(
                        key.clone(),
                        COMPLEXITY_IN_FUNCTIONS,
                        Measure::int(value % 31),
                    );
                    measures.set_raw_measure(
                        key.clone(),
                        FUNCTION_COMPLEXITY_DISTRIBUTION,
                        Measure::text(format!("1={};2={};4={}", value % 3, value % 5, value % 2)),
                    );
                    Component::file(key)
                })
                .collect();
            Component::directory(format!("p/d{}", d), files)
        })
        .collect();
    (Component::project("p", children), measures)
}

fn metrics() -> InMemoryMetricRepository {
    let mut metrics = InMemoryMetricRepository::with_default_metrics();
    metrics
        .register(Metric::new(NCLOC_TOTAL, "Total lines of code", MetricType::Int))
        .unwrap();
    metrics
}

fn formulas() -> Vec<RegisteredFormula> {
    vec![
        SumFormula::int(NCLOC, NCLOC_TOTAL).into(),
        AverageFormula::new(FUNCTION_COMPLEXITY, COMPLEXITY_IN_FUNCTIONS, FUNCTIONS).into(),
        DistributionFormula::new(FUNCTION_COMPLEXITY_DISTRIBUTION, FUNCTION_COMPLEXITY_DISTRIBUTION)
            .into(),
    ]
}

fn benchmark_wide_tree(c: &mut Criterion) {
    let metrics = metrics();
    let mut group = c.benchmark_group("formula_execution");

    for (directories, files) in [(10, 10), (100, 50), (1000, 10)] {
        let (tree, raw) = create_wide_tree(directories, files);
        group.bench_with_input(
            BenchmarkId::new("wide_tree", format!("{}x{}", directories, files)),
            &tree,
            |b, tree| {
                b.iter(|| {
                    let mut measures = raw.clone();
                    let summary = FormulaExecutor::builder(&metrics, &mut measures)
                        .build_for(formulas())
                        .unwrap()
                        .visit(black_box(tree))
                        .unwrap();
                    black_box(summary)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_wide_tree);
criterion_main!(benches);
