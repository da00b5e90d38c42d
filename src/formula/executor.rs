//! Bottom-up formula execution over a component tree.
//!
//! The executor walks the tree once, post-order, with one [`Counters`]
//! bucket per open project/module/directory level:
//!
//! - on a file, every formula gets a fresh counter fed with the file's raw
//!   data; measures are derived from it and it is merged into the bucket of
//!   the file's parent;
//! - on any other component, the counter its descendants accumulated (if
//!   any) is used to derive measures and is merged into the parent bucket in
//!   turn.
//!
//! Buckets are dropped as soon as their component is closed. A formula with
//! no counter in a bucket had no file contributing below that component: no
//! measure is written for it and nothing is propagated.

use super::context::{CreateMeasureContext, FileAggregateContext};
use super::counters::Counters;
use super::{BoxedCounter, FormulaId, RegisteredFormula};
use crate::core::{Component, ComponentType, Error, Period, Result};
use crate::observability::{self, ExecutionPhase};
use crate::repository::{MeasureRepository, MetricRepository, PeriodsHolder};
use crate::visitor::{Order, Path, PathAwareCrawler, PathAwareVisitor};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, debug_span, info, trace};

/// Everything needed to build a [`FormulaExecutor`].
///
/// Validated eagerly by [`FormulaExecutor::new`].
pub struct ExecutorConfig<'a> {
    /// Formulas to run, in execution order. Must not be empty.
    pub formulas: Vec<RegisteredFormula>,
    pub metric_repository: &'a dyn MetricRepository,
    pub measure_repository: &'a mut dyn MeasureRepository,
    /// Enables variation support. Required when any formula reads periods.
    pub periods_holder: Option<&'a dyn PeriodsHolder>,
}

/// Counts of what one traversal did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionSummary {
    pub components_visited: usize,
    pub files_visited: usize,
    pub measures_added: usize,
}

/// Runs a fixed set of formulas over component trees.
pub struct FormulaExecutor<'a> {
    formulas: Arc<[RegisteredFormula]>,
    metrics: &'a dyn MetricRepository,
    measures: &'a mut dyn MeasureRepository,
    periods: Option<&'a dyn PeriodsHolder>,
    summary: ExecutionSummary,
}

impl<'a> FormulaExecutor<'a> {
    /// Validate the configuration and build the executor.
    ///
    /// Fails when no formula is given, when formula ids or output metric
    /// keys collide, when an output metric key is unknown, or when a
    /// formula requires periods and no periods holder is configured.
    pub fn new(config: ExecutorConfig<'a>) -> Result<Self> {
        let _phase = observability::set_phase(ExecutionPhase::Validation);
        validate(&config)?;
        debug!(formulas = config.formulas.len(), "formula executor configured");

        Ok(Self {
            formulas: config.formulas.into(),
            metrics: config.metric_repository,
            measures: config.measure_repository,
            periods: config.periods_holder,
            summary: ExecutionSummary::default(),
        })
    }

    pub fn builder(
        metric_repository: &'a dyn MetricRepository,
        measure_repository: &'a mut dyn MeasureRepository,
    ) -> FormulaExecutorBuilder<'a> {
        FormulaExecutorBuilder {
            metrics: metric_repository,
            measures: measure_repository,
            periods: None,
        }
    }

    pub fn formulas(&self) -> &[RegisteredFormula] {
        &self.formulas
    }

    /// Run every formula over the tree rooted at `root`.
    ///
    /// Any error aborts the traversal; measures already handed to the
    /// measure repository stay there, and the traversal must not be resumed.
    pub fn visit(&mut self, root: &Component) -> Result<ExecutionSummary> {
        let span = debug_span!(
            "formula_execution",
            root = root.key(),
            formulas = self.formulas.len()
        );
        let _enter = span.enter();

        self.summary = ExecutionSummary::default();
        observability::start_progress(root.iter().count());

        PathAwareCrawler::new(ComponentType::File, Order::PostOrder)
            .visit(&mut Traversal(&mut *self), root)?;

        info!(
            components = self.summary.components_visited,
            files = self.summary.files_visited,
            measures = self.summary.measures_added,
            "formula execution complete"
        );
        Ok(self.summary)
    }

    fn periods(&self) -> Option<&'a [Period]> {
        self.periods.map(|holder| holder.periods())
    }

    fn process_file(&mut self, file: &Component, path: &mut Path<Counters>) -> Result<()> {
        let _component = observability::set_current_component(file.key());
        let formulas = Arc::clone(&self.formulas);

        for formula in formulas.iter() {
            let _formula = observability::set_current_formula(formula.id().as_str());
            let mut counter = formula.inner().new_counter();
            {
                let _phase = observability::set_phase(ExecutionPhase::FileAggregation);
                let context = FileAggregateContext::new(
                    file,
                    formula.id(),
                    self.metrics,
                    &*self.measures,
                    self.periods(),
                );
                formula.inner().aggregate_file(&mut counter, &context)?;
            }
            self.add_measures(file, formula, &counter)?;
            aggregate_to_parent(path, formula, counter)?;
        }

        self.summary.files_visited += 1;
        self.close(file);
        Ok(())
    }

    fn process_not_file(&mut self, component: &Component, path: &mut Path<Counters>) -> Result<()> {
        let _component = observability::set_current_component(component.key());
        let formulas = Arc::clone(&self.formulas);
        if let Some(counters) = path.current() {
            trace!(
                component = component.key(),
                counters = counters.len(),
                "closing level"
            );
        }

        for formula in formulas.iter() {
            // no file below this component contributed to the formula
            let Some(counter) = path
                .current_mut()
                .and_then(|counters| counters.take(formula.id()))
            else {
                trace!(component = component.key(), formula = %formula.id(), "no counter, skipping");
                continue;
            };
            let _formula = observability::set_current_formula(formula.id().as_str());
            self.add_measures(component, formula, &counter)?;
            aggregate_to_parent(path, formula, counter)?;
        }

        self.close(component);
        Ok(())
    }

    fn add_measures(
        &mut self,
        component: &Component,
        formula: &RegisteredFormula,
        counter: &BoxedCounter,
    ) -> Result<()> {
        let _phase = observability::set_phase(ExecutionPhase::MeasureCreation);
        let metrics = self.metrics;
        let periods = self.periods();

        for key in formula.output_metric_keys() {
            let metric = metrics.get_by_key(key)?;
            let context = CreateMeasureContext::new(component, metric, formula.id(), periods);
            match formula.inner().create_measure(counter, &context)? {
                Some(measure) => {
                    trace!(component = component.key(), metric = %key, "adding measure");
                    self.measures.add(component, metric, measure)?;
                    self.summary.measures_added += 1;
                }
                None => {
                    trace!(component = component.key(), metric = %key, "no measure produced");
                }
            }
        }
        Ok(())
    }

    fn close(&mut self, component: &Component) {
        self.summary.components_visited += 1;
        observability::increment_processed();
        trace!(component = component.key(), "component closed");
    }
}

/// Crawler-facing side of the executor.
struct Traversal<'e, 'a>(&'e mut FormulaExecutor<'a>);

impl PathAwareVisitor for Traversal<'_, '_> {
    type Element = Counters;

    fn create_for_any(&mut self, _component: &Component) -> Counters {
        Counters::default()
    }

    fn create_for_file(&mut self, _file: &Component) -> Option<Counters> {
        None
    }

    fn visit_file(&mut self, file: &Component, path: &mut Path<Counters>) -> Result<()> {
        self.0.process_file(file, path)
    }

    fn visit_any(&mut self, component: &Component, path: &mut Path<Counters>) -> Result<()> {
        self.0.process_not_file(component, path)
    }
}

fn aggregate_to_parent(
    path: &mut Path<Counters>,
    formula: &RegisteredFormula,
    counter: BoxedCounter,
) -> Result<()> {
    let _phase = observability::set_phase(ExecutionPhase::Propagation);
    match path.parent_mut() {
        Some(parent) => parent.aggregate(formula, counter),
        None => Ok(()),
    }
}

fn validate(config: &ExecutorConfig<'_>) -> Result<()> {
    if config.formulas.is_empty() {
        return Err(Error::NoFormulas);
    }

    let mut ids: HashSet<&FormulaId> = HashSet::new();
    let mut producers: HashMap<&str, &FormulaId> = HashMap::new();
    for formula in &config.formulas {
        if !ids.insert(formula.id()) {
            return Err(Error::DuplicateFormula {
                id: formula.id().to_string(),
            });
        }
        if formula.output_metric_keys().is_empty() {
            return Err(Error::EmptyOutputMetrics {
                formula: formula.id().to_string(),
            });
        }
        for key in formula.output_metric_keys() {
            config.metric_repository.get_by_key(key)?;
            if let Some(first) = producers.insert(key.as_str(), formula.id()) {
                return Err(Error::DuplicateOutputMetric {
                    key: key.clone(),
                    first: first.to_string(),
                    second: formula.id().to_string(),
                });
            }
        }
        if formula.requires_periods() && config.periods_holder.is_none() {
            return Err(Error::PeriodsNotConfigured {
                formula: formula.id().to_string(),
            });
        }
    }
    Ok(())
}

/// Fluent construction of a [`FormulaExecutor`].
pub struct FormulaExecutorBuilder<'a> {
    metrics: &'a dyn MetricRepository,
    measures: &'a mut dyn MeasureRepository,
    periods: Option<&'a dyn PeriodsHolder>,
}

impl<'a> FormulaExecutorBuilder<'a> {
    #[must_use]
    pub fn with_variation_support(mut self, periods_holder: &'a dyn PeriodsHolder) -> Self {
        self.periods = Some(periods_holder);
        self
    }

    pub fn build_for(
        self,
        formulas: impl IntoIterator<Item = RegisteredFormula>,
    ) -> Result<FormulaExecutor<'a>> {
        FormulaExecutor::new(ExecutorConfig {
            formulas: formulas.into_iter().collect(),
            metric_repository: self.metrics,
            measure_repository: self.measures,
            periods_holder: self.periods,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Measure, Metric, MetricType};
    use crate::formula::{Counter, Formula};
    use crate::observability::current_context;
    use crate::repository::{InMemoryMeasureRepository, InMemoryMetricRepository};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    const RAW: &str = "raw";
    const OTHER_RAW: &str = "other_raw";
    const TOTAL: &str = "total";
    const FILES: &str = "files";
    const OTHER_TOTAL: &str = "other_total";

    /// Sums an integer raw metric and counts contributing files.
    struct RawSum {
        id: FormulaId,
        input: String,
        outputs: Vec<String>,
        needs_periods: bool,
        seen_components: Mutex<Vec<String>>,
    }

    impl RawSum {
        fn new(id: &str, input: &str, outputs: &[&str]) -> Self {
            Self {
                id: FormulaId::new(id),
                input: input.to_string(),
                outputs: outputs.iter().map(|key| key.to_string()).collect(),
                needs_periods: false,
                seen_components: Mutex::new(Vec::new()),
            }
        }
    }

    struct RawSumCounter {
        input: String,
        sum: i64,
        files: i64,
    }

    impl Counter for RawSumCounter {
        fn aggregate_file(&mut self, context: &FileAggregateContext<'_>) -> Result<()> {
            self.files += 1;
            if let Some(measure) = context.measure(&self.input)? {
                self.sum += measure.value.as_i64().unwrap_or_default();
            }
            Ok(())
        }

        fn aggregate_counter(&mut self, other: Self) -> Result<()> {
            self.sum += other.sum;
            self.files += other.files;
            Ok(())
        }
    }

    impl Formula for RawSum {
        type Counter = RawSumCounter;

        fn id(&self) -> &FormulaId {
            &self.id
        }

        fn create_new_counter(&self) -> RawSumCounter {
            RawSumCounter {
                input: self.input.clone(),
                sum: 0,
                files: 0,
            }
        }

        fn output_metric_keys(&self) -> &[String] {
            &self.outputs
        }

        fn create_measure(
            &self,
            counter: &RawSumCounter,
            context: &CreateMeasureContext<'_>,
        ) -> Result<Option<Measure>> {
            if let Some(component) = current_context().current_component {
                self.seen_components.lock().unwrap().push(component);
            }
            Ok(match context.metric().key.as_str() {
                FILES => Some(Measure::int(counter.files)),
                _ => Some(Measure::int(counter.sum)),
            })
        }

        fn requires_periods(&self) -> bool {
            self.needs_periods
        }
    }

    fn metrics() -> InMemoryMetricRepository {
        InMemoryMetricRepository::new(
            [RAW, OTHER_RAW, TOTAL, FILES, OTHER_TOTAL]
                .into_iter()
                .map(|key| Metric::new(key, key, MetricType::Int)),
        )
        .unwrap()
    }

    fn tree() -> Component {
        Component::project(
            "project",
            vec![
                Component::directory(
                    "dirA",
                    vec![Component::file("file1"), Component::file("file2")],
                ),
                Component::directory("dirB", vec![Component::file("file3")]),
            ],
        )
    }

    fn raw_measures() -> InMemoryMeasureRepository {
        InMemoryMeasureRepository::new()
            .with_raw_measure("file1", RAW, Measure::int(3))
            .with_raw_measure("file2", RAW, Measure::int(4))
            .with_raw_measure("file3", RAW, Measure::int(5))
            .with_raw_measure("file1", OTHER_RAW, Measure::int(100))
    }

    fn value(measures: &InMemoryMeasureRepository, component: &str, metric: &str) -> Option<i64> {
        measures
            .get(component, metric)
            .and_then(|measure| measure.value.as_i64())
    }

    fn run(
        formulas: Vec<RegisteredFormula>,
        root: &Component,
        measures: &mut InMemoryMeasureRepository,
    ) -> Result<ExecutionSummary> {
        let metrics = metrics();
        let mut executor = FormulaExecutor::builder(&metrics, measures).build_for(formulas)?;
        executor.visit(root)
    }

    #[test]
    fn test_sums_propagate_bottom_up() {
        let mut measures = raw_measures();
        let summary = run(
            vec![RawSum::new("sum", RAW, &[TOTAL]).into()],
            &tree(),
            &mut measures,
        )
        .unwrap();

        assert_eq!(value(&measures, "file1", TOTAL), Some(3));
        assert_eq!(value(&measures, "file2", TOTAL), Some(4));
        assert_eq!(value(&measures, "file3", TOTAL), Some(5));
        assert_eq!(value(&measures, "dirA", TOTAL), Some(7));
        assert_eq!(value(&measures, "dirB", TOTAL), Some(5));
        assert_eq!(value(&measures, "project", TOTAL), Some(12));
        assert_eq!(
            summary,
            ExecutionSummary {
                components_visited: 6,
                files_visited: 3,
                measures_added: 6,
            }
        );
    }

    #[test]
    fn test_empty_directory_gets_no_measure() {
        let root = Component::project(
            "project",
            vec![
                Component::directory(
                    "dirA",
                    vec![Component::file("file1"), Component::file("file2")],
                ),
                Component::directory("dirB", vec![]),
            ],
        );
        let mut measures = raw_measures();
        run(vec![RawSum::new("sum", RAW, &[TOTAL]).into()], &root, &mut measures).unwrap();

        assert_eq!(value(&measures, "dirA", TOTAL), Some(7));
        assert_eq!(value(&measures, "dirB", TOTAL), None);
        assert_eq!(value(&measures, "project", TOTAL), Some(7));
    }

    #[test]
    fn test_tree_without_files_emits_nothing() {
        let root = Component::project(
            "project",
            vec![Component::module(
                "module",
                vec![Component::directory("empty", vec![])],
            )],
        );
        let mut measures = InMemoryMeasureRepository::new();
        let summary =
            run(vec![RawSum::new("sum", RAW, &[TOTAL]).into()], &root, &mut measures).unwrap();

        assert!(measures.is_empty());
        assert_eq!(summary.components_visited, 3);
        assert_eq!(summary.measures_added, 0);
    }

    #[test]
    fn test_counters_cross_module_levels() {
        let root = Component::project(
            "project",
            vec![
                Component::module(
                    "core",
                    vec![Component::directory(
                        "core/src",
                        vec![Component::file("file1"), Component::file("file2")],
                    )],
                ),
                Component::module(
                    "cli",
                    vec![Component::directory(
                        "cli/src",
                        vec![Component::directory("cli/src/nested", vec![Component::file("file3")])],
                    )],
                ),
            ],
        );
        let mut measures = raw_measures();
        run(
            vec![RawSum::new("sum", RAW, &[TOTAL, FILES]).into()],
            &root,
            &mut measures,
        )
        .unwrap();

        assert_eq!(value(&measures, "core", TOTAL), Some(7));
        assert_eq!(value(&measures, "cli/src/nested", TOTAL), Some(5));
        assert_eq!(value(&measures, "cli", TOTAL), Some(5));
        assert_eq!(value(&measures, "project", TOTAL), Some(12));
        assert_eq!(value(&measures, "project", FILES), Some(3));
        assert_eq!(value(&measures, "cli/src", FILES), Some(1));
    }

    #[test]
    fn test_removing_a_formula_does_not_change_the_other() {
        let mut both = raw_measures();
        run(
            vec![
                RawSum::new("sum", RAW, &[TOTAL]).into(),
                RawSum::new("other", OTHER_RAW, &[OTHER_TOTAL]).into(),
            ],
            &tree(),
            &mut both,
        )
        .unwrap();

        let mut alone = raw_measures();
        run(vec![RawSum::new("sum", RAW, &[TOTAL]).into()], &tree(), &mut alone).unwrap();

        let totals = |measures: &InMemoryMeasureRepository| -> Vec<(String, i64)> {
            measures
                .computed_measures()
                .into_iter()
                .filter(|(key, _)| key.metric == TOTAL)
                .map(|(key, measure)| (key.component.clone(), measure.value.as_i64().unwrap()))
                .collect()
        };
        assert_eq!(totals(&both), totals(&alone));
        assert_eq!(value(&both, "project", OTHER_TOTAL), Some(100));
    }

    #[test]
    fn test_measures_are_created_with_component_context() {
        let formula = Arc::new(RawSum::new("sum", RAW, &[TOTAL]));
        let mut measures = raw_measures();
        let metrics = metrics();

        struct Shared(Arc<RawSum>);
        impl Formula for Shared {
            type Counter = RawSumCounter;
            fn id(&self) -> &FormulaId {
                self.0.id()
            }
            fn create_new_counter(&self) -> RawSumCounter {
                self.0.create_new_counter()
            }
            fn output_metric_keys(&self) -> &[String] {
                self.0.output_metric_keys()
            }
            fn create_measure(
                &self,
                counter: &RawSumCounter,
                context: &CreateMeasureContext<'_>,
            ) -> Result<Option<Measure>> {
                self.0.create_measure(counter, context)
            }
        }

        FormulaExecutor::builder(&metrics, &mut measures)
            .build_for(vec![Shared(Arc::clone(&formula)).into()])
            .unwrap()
            .visit(&tree())
            .unwrap();

        assert_eq!(
            *formula.seen_components.lock().unwrap(),
            vec!["file1", "file2", "dirA", "file3", "dirB", "project"]
        );
    }

    #[test]
    fn test_no_measure_when_formula_returns_none() {
        struct Silent(FormulaId, Vec<String>);
        impl Formula for Silent {
            type Counter = RawSumCounter;
            fn id(&self) -> &FormulaId {
                &self.0
            }
            fn create_new_counter(&self) -> RawSumCounter {
                RawSumCounter {
                    input: RAW.to_string(),
                    sum: 0,
                    files: 0,
                }
            }
            fn output_metric_keys(&self) -> &[String] {
                &self.1
            }
            fn create_measure(
                &self,
                counter: &RawSumCounter,
                _context: &CreateMeasureContext<'_>,
            ) -> Result<Option<Measure>> {
                Ok((counter.sum > 5).then(|| Measure::int(counter.sum)))
            }
        }

        let mut measures = raw_measures();
        let summary = run(
            vec![Silent(FormulaId::new("silent"), vec![TOTAL.to_string()]).into()],
            &tree(),
            &mut measures,
        )
        .unwrap();

        assert_eq!(value(&measures, "file3", TOTAL), None);
        assert_eq!(value(&measures, "dirB", TOTAL), None);
        assert_eq!(value(&measures, "dirA", TOTAL), Some(7));
        assert_eq!(value(&measures, "project", TOTAL), Some(12));
        assert_eq!(summary.measures_added, 2);
    }

    #[test]
    fn test_duplicate_measure_aborts_traversal() {
        let metrics = metrics();
        let mut measures = raw_measures();
        measures
            .add(
                &Component::directory("dirA", vec![]),
                metrics.get_by_key(TOTAL).unwrap(),
                Measure::int(0),
            )
            .unwrap();

        let err = run(
            vec![RawSum::new("sum", RAW, &[TOTAL]).into()],
            &tree(),
            &mut measures,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::DuplicateMeasure { ref component, ref metric } if component == "dirA" && metric == TOTAL
        ));
        assert_eq!(value(&measures, "dirA", TOTAL), Some(0));
        assert_eq!(value(&measures, "project", TOTAL), None);
    }

    #[test]
    fn test_formula_failure_aborts_traversal() {
        struct Failing(FormulaId, Vec<String>);
        impl Formula for Failing {
            type Counter = RawSumCounter;
            fn id(&self) -> &FormulaId {
                &self.0
            }
            fn create_new_counter(&self) -> RawSumCounter {
                RawSumCounter {
                    input: RAW.to_string(),
                    sum: 0,
                    files: 0,
                }
            }
            fn output_metric_keys(&self) -> &[String] {
                &self.1
            }
            fn create_measure(
                &self,
                _counter: &RawSumCounter,
                context: &CreateMeasureContext<'_>,
            ) -> Result<Option<Measure>> {
                Err(anyhow::anyhow!("cannot measure {}", context.component().key()).into())
            }
        }

        let mut measures = raw_measures();
        let err = run(
            vec![Failing(FormulaId::new("failing"), vec![TOTAL.to_string()]).into()],
            &tree(),
            &mut measures,
        )
        .unwrap_err();

        assert!(matches!(err, Error::External(_)));
        assert_eq!(err.to_string(), "cannot measure file1");
        assert!(!err.is_configuration());
        assert!(measures.is_empty());
    }

    #[test]
    fn test_configuration_is_validated_eagerly() {
        let metrics = metrics();
        let mut measures = InMemoryMeasureRepository::new();

        let build = |formulas: Vec<RegisteredFormula>, measures: &mut InMemoryMeasureRepository| {
            FormulaExecutor::builder(&metrics, measures)
                .build_for(formulas)
                .err()
        };

        assert!(matches!(build(vec![], &mut measures), Some(Error::NoFormulas)));
        assert!(matches!(
            build(
                vec![
                    RawSum::new("sum", RAW, &[TOTAL]).into(),
                    RawSum::new("sum", RAW, &[FILES]).into()
                ],
                &mut measures
            ),
            Some(Error::DuplicateFormula { .. })
        ));
        assert!(matches!(
            build(
                vec![
                    RawSum::new("a", RAW, &[TOTAL]).into(),
                    RawSum::new("b", RAW, &[TOTAL]).into()
                ],
                &mut measures
            ),
            Some(Error::DuplicateOutputMetric { ref key, ref first, ref second })
                if key == TOTAL && first == "a" && second == "b"
        ));
        assert!(matches!(
            build(vec![RawSum::new("a", RAW, &[]).into()], &mut measures),
            Some(Error::EmptyOutputMetrics { .. })
        ));
        assert!(matches!(
            build(vec![RawSum::new("a", RAW, &["unknown"]).into()], &mut measures),
            Some(Error::UnknownMetric { .. })
        ));

        let mut variation = RawSum::new("variation", RAW, &[TOTAL]);
        variation.needs_periods = true;
        assert!(matches!(
            build(vec![variation.into()], &mut measures),
            Some(Error::PeriodsNotConfigured { ref formula }) if formula == "variation"
        ));
    }

    #[test]
    fn test_variation_support_satisfies_period_requirement() {
        let metrics = metrics();
        let mut measures = raw_measures();
        let periods = crate::repository::Periods::default();
        let mut variation = RawSum::new("variation", RAW, &[TOTAL]);
        variation.needs_periods = true;

        let summary = FormulaExecutor::builder(&metrics, &mut measures)
            .with_variation_support(&periods)
            .build_for(vec![variation.into()])
            .unwrap()
            .visit(&tree())
            .unwrap();

        assert_eq!(summary.measures_added, 6);
    }

    #[test]
    fn test_executor_can_visit_several_trees() {
        let metrics = metrics();
        let mut measures = raw_measures().with_raw_measure("other_file", RAW, Measure::int(9));
        let mut executor = FormulaExecutor::builder(&metrics, &mut measures)
            .build_for(vec![RawSum::new("sum", RAW, &[TOTAL]).into()])
            .unwrap();

        executor.visit(&tree()).unwrap();
        let second = executor
            .visit(&Component::project(
                "other_project",
                vec![Component::file("other_file")],
            ))
            .unwrap();
        assert_eq!(executor.formulas().len(), 1);

        assert_eq!(second.components_visited, 2);
        assert_eq!(value(&measures, "other_project", TOTAL), Some(9));
        assert_eq!(value(&measures, "project", TOTAL), Some(12));
    }
}
