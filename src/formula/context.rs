//! Read-only views handed to formulas and counters.

use super::FormulaId;
use crate::core::{Component, Error, Measure, Metric, Period, Result};
use crate::repository::{MeasureRepository, MetricRepository};

/// What a counter can see while folding in one file.
pub struct FileAggregateContext<'a> {
    file: &'a Component,
    formula: &'a FormulaId,
    metrics: &'a dyn MetricRepository,
    measures: &'a dyn MeasureRepository,
    periods: Option<&'a [Period]>,
}

impl<'a> FileAggregateContext<'a> {
    pub(crate) fn new(
        file: &'a Component,
        formula: &'a FormulaId,
        metrics: &'a dyn MetricRepository,
        measures: &'a dyn MeasureRepository,
        periods: Option<&'a [Period]>,
    ) -> Self {
        Self {
            file,
            formula,
            metrics,
            measures,
            periods,
        }
    }

    pub fn file(&self) -> &'a Component {
        self.file
    }

    /// Raw measure of the current file for a metric key.
    ///
    /// An unknown metric key is an error; a known metric without a measure
    /// on this file is `Ok(None)`.
    pub fn measure(&self, metric_key: &str) -> Result<Option<&'a Measure>> {
        let metric = self.metrics.get_by_key(metric_key)?;
        Ok(self.measures.get_raw_measure(self.file, metric))
    }

    /// Periods to compute variations for.
    pub fn periods(&self) -> Result<&'a [Period]> {
        periods_or_error(self.periods, self.formula)
    }
}

/// What a formula can see while deriving one measure.
pub struct CreateMeasureContext<'a> {
    component: &'a Component,
    metric: &'a Metric,
    formula: &'a FormulaId,
    periods: Option<&'a [Period]>,
}

impl<'a> CreateMeasureContext<'a> {
    pub(crate) fn new(
        component: &'a Component,
        metric: &'a Metric,
        formula: &'a FormulaId,
        periods: Option<&'a [Period]>,
    ) -> Self {
        Self {
            component,
            metric,
            formula,
            periods,
        }
    }

    pub fn component(&self) -> &'a Component {
        self.component
    }

    pub fn metric(&self) -> &'a Metric {
        self.metric
    }

    pub fn periods(&self) -> Result<&'a [Period]> {
        periods_or_error(self.periods, self.formula)
    }
}

fn periods_or_error<'a>(periods: Option<&'a [Period]>, formula: &FormulaId) -> Result<&'a [Period]> {
    periods.ok_or_else(|| Error::PeriodsNotConfigured {
        formula: formula.to_string(),
    })
}
