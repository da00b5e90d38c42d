//! Bottom-up measure aggregation over a project/module/directory/file tree.
//!
//! Formulas fold raw per-file measures into counters, counters are merged
//! up the tree in a single post-order traversal, and each component whose
//! subtree contributed at least one file gets the measures its formulas
//! derive.
//!
//! ```ignore
//! use measuretree::{Component, FormulaExecutor, InMemoryMeasureRepository,
//!     InMemoryMetricRepository, Measure, SumFormula};
//!
//! let tree = Component::project("p", vec![Component::file("p/a.rs")]);
//! let metrics = InMemoryMetricRepository::with_default_metrics();
//! let mut measures = InMemoryMeasureRepository::new()
//!     .with_raw_measure("p/a.rs", "ncloc", Measure::int(10));
//!
//! FormulaExecutor::builder(&metrics, &mut measures)
//!     .build_for([SumFormula::int("ncloc", "lines").into()])?
//!     .visit(&tree)?;
//! ```

// Export modules for library usage
pub mod config;
pub mod core;
pub mod formula;
pub mod observability;
pub mod repository;
pub mod visitor;

// Re-export commonly used types
pub use crate::core::{
    catalog, Component, ComponentType, Error, Measure, MeasureValue, MeasureVariations, Metric,
    MetricType, Period, Result, MAX_PERIODS,
};

pub use crate::formula::{
    builtin::{
        AverageFormula, DistributionFormula, RangeDistribution, SumFormula, SumKind,
        VariationSumFormula,
    },
    Counter, CreateMeasureContext, ExecutionSummary, ExecutorConfig, FileAggregateContext,
    Formula, FormulaExecutor, FormulaExecutorBuilder, FormulaId, RegisteredFormula,
};

pub use crate::repository::{
    InMemoryMeasureRepository, InMemoryMetricRepository, MeasureRepository, MetricRepository,
    Periods, PeriodsHolder,
};

pub use crate::config::FormulasConfig;
pub use crate::visitor::{Order, PathAwareCrawler, PathAwareVisitor};
