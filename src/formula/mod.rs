//! Formula contract and the executor running formulas over a component tree.
//!
//! A [`Formula`] describes how raw per-file data is folded into its
//! [`Counter`], and how a measure is derived from a counter on any
//! component. Formulas know nothing about the tree shape: the
//! [`FormulaExecutor`] creates a fresh counter for each file, merges counters
//! of siblings into the bucket of their parent, and asks the formula for a
//! measure on every component whose subtree contributed at least one file.

pub mod builtin;
pub mod context;
mod counters;
pub mod executor;

pub use context::{CreateMeasureContext, FileAggregateContext};
pub use executor::{ExecutionSummary, ExecutorConfig, FormulaExecutor, FormulaExecutorBuilder};

use crate::core::{Error, Measure, Result};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Stable identifier of a registered formula.
///
/// Counters are bucketed by this identifier, so two formula values with the
/// same id are treated as the same formula and cannot be registered together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FormulaId(String);

impl FormulaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormulaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FormulaId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Per-formula accumulation state for one component.
///
/// `aggregate_counter` must be associative and commutative in effect: the
/// executor merges sibling counters in tree order, and that order must not
/// change the derived measures.
pub trait Counter: 'static {
    /// Fold in the raw data of a single file. Called once per file.
    fn aggregate_file(&mut self, context: &FileAggregateContext<'_>) -> Result<()>;

    /// Fold in the fully aggregated counter of a child component.
    fn aggregate_counter(&mut self, other: Self) -> Result<()>
    where
        Self: Sized;
}

/// A pluggable computation producing one or more metrics from per-file data.
pub trait Formula: Send + Sync + 'static {
    type Counter: Counter;

    fn id(&self) -> &FormulaId;

    fn create_new_counter(&self) -> Self::Counter;

    /// Keys of the metrics this formula produces. Must be non-empty and must
    /// not change during the formula's lifetime.
    fn output_metric_keys(&self) -> &[String];

    /// Derive the measure for `context.metric()` on `context.component()`.
    ///
    /// Called once per component and output metric with a read-only counter.
    /// `Ok(None)` means there is nothing meaningful to report and no measure
    /// is written.
    fn create_measure(
        &self,
        counter: &Self::Counter,
        context: &CreateMeasureContext<'_>,
    ) -> Result<Option<Measure>>;

    /// Whether this formula reads periods. The executor refuses to be built
    /// without a periods holder when any registered formula returns `true`.
    fn requires_periods(&self) -> bool {
        false
    }
}

pub(crate) type BoxedCounter = Box<dyn Any>;

/// Object-safe view of a [`Formula`], with counters erased to `dyn Any`.
pub(crate) trait DynFormula: Send + Sync {
    fn id(&self) -> &FormulaId;
    fn output_metric_keys(&self) -> &[String];
    fn requires_periods(&self) -> bool;
    fn new_counter(&self) -> BoxedCounter;
    fn aggregate_file(
        &self,
        counter: &mut BoxedCounter,
        context: &FileAggregateContext<'_>,
    ) -> Result<()>;
    fn aggregate_counter(&self, counter: &mut BoxedCounter, other: BoxedCounter) -> Result<()>;
    fn create_measure(
        &self,
        counter: &BoxedCounter,
        context: &CreateMeasureContext<'_>,
    ) -> Result<Option<Measure>>;
}

impl<F: Formula> DynFormula for F {
    fn id(&self) -> &FormulaId {
        Formula::id(self)
    }

    fn output_metric_keys(&self) -> &[String] {
        Formula::output_metric_keys(self)
    }

    fn requires_periods(&self) -> bool {
        Formula::requires_periods(self)
    }

    fn new_counter(&self) -> BoxedCounter {
        Box::new(self.create_new_counter())
    }

    fn aggregate_file(
        &self,
        counter: &mut BoxedCounter,
        context: &FileAggregateContext<'_>,
    ) -> Result<()> {
        downcast_mut::<F>(self, counter)?.aggregate_file(context)
    }

    fn aggregate_counter(&self, counter: &mut BoxedCounter, other: BoxedCounter) -> Result<()> {
        let other = other
            .downcast::<F::Counter>()
            .map_err(|_| counter_mismatch(Formula::id(self)))?;
        downcast_mut::<F>(self, counter)?.aggregate_counter(*other)
    }

    fn create_measure(
        &self,
        counter: &BoxedCounter,
        context: &CreateMeasureContext<'_>,
    ) -> Result<Option<Measure>> {
        let counter = counter
            .downcast_ref::<F::Counter>()
            .ok_or_else(|| counter_mismatch(Formula::id(self)))?;
        Formula::create_measure(self, counter, context)
    }
}

fn downcast_mut<'c, F: Formula>(
    formula: &F,
    counter: &'c mut BoxedCounter,
) -> Result<&'c mut F::Counter> {
    counter
        .downcast_mut::<F::Counter>()
        .ok_or_else(|| counter_mismatch(Formula::id(formula)))
}

fn counter_mismatch(id: &FormulaId) -> Error {
    Error::CounterMismatch {
        formula: id.to_string(),
    }
}

/// A formula ready to be handed to the executor.
///
/// Wraps any [`Formula`] behind a shared pointer so formulas of different
/// types can be registered together and cheaply reused across executors.
#[derive(Clone)]
pub struct RegisteredFormula(Arc<dyn DynFormula>);

impl RegisteredFormula {
    pub fn new<F: Formula>(formula: F) -> Self {
        Self(Arc::new(formula))
    }

    pub fn id(&self) -> &FormulaId {
        self.0.id()
    }

    pub fn output_metric_keys(&self) -> &[String] {
        self.0.output_metric_keys()
    }

    pub fn requires_periods(&self) -> bool {
        self.0.requires_periods()
    }

    pub(crate) fn inner(&self) -> &dyn DynFormula {
        self.0.as_ref()
    }
}

impl<F: Formula> From<F> for RegisteredFormula {
    fn from(formula: F) -> Self {
        Self::new(formula)
    }
}

impl fmt::Debug for RegisteredFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredFormula")
            .field("id", self.id())
            .field("output_metric_keys", &self.output_metric_keys())
            .finish()
    }
}
