use super::float_value;
use crate::core::{Measure, Result};
use crate::formula::{Counter, CreateMeasureContext, FileAggregateContext, Formula, FormulaId};
use std::sync::Arc;

/// Average of a main metric over a "by" metric, e.g. complexity per
/// function: `sum(complexity_in_functions) / sum(functions)`.
///
/// A file contributes only when both values are present. When the main
/// metric is missing on a file, the fallback metric is read instead.
#[derive(Debug, Clone)]
pub struct AverageFormula {
    id: FormulaId,
    output_metrics: Vec<String>,
    main_metric: Arc<str>,
    by_metric: Arc<str>,
    fallback_metric: Option<Arc<str>>,
}

impl AverageFormula {
    /// The formula id defaults to the output metric key.
    pub fn new(output_metric: &str, main_metric: &str, by_metric: &str) -> Self {
        Self {
            id: FormulaId::new(output_metric),
            output_metrics: vec![output_metric.to_string()],
            main_metric: Arc::from(main_metric),
            by_metric: Arc::from(by_metric),
            fallback_metric: None,
        }
    }

    #[must_use]
    pub fn with_fallback_metric(mut self, fallback_metric: &str) -> Self {
        self.fallback_metric = Some(Arc::from(fallback_metric));
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: FormulaId) -> Self {
        self.id = id;
        self
    }
}

#[derive(Debug, Clone)]
pub struct AverageCounter {
    main_metric: Arc<str>,
    by_metric: Arc<str>,
    fallback_metric: Option<Arc<str>>,
    main_sum: f64,
    by_sum: f64,
    initialized: bool,
}

impl AverageCounter {
    fn read(&self, context: &FileAggregateContext<'_>, metric_key: &str) -> Result<Option<f64>> {
        match context.measure(metric_key)? {
            Some(measure) => float_value(measure, metric_key),
            None => Ok(None),
        }
    }

    fn add(&mut self, main: f64, by: f64) {
        self.main_sum += main;
        self.by_sum += by;
        self.initialized = true;
    }

    /// `main / by` over everything aggregated so far, if defined.
    pub fn average(&self) -> Option<f64> {
        (self.initialized && self.by_sum != 0.0).then(|| self.main_sum / self.by_sum)
    }
}

impl Counter for AverageCounter {
    fn aggregate_file(&mut self, context: &FileAggregateContext<'_>) -> Result<()> {
        let mut main = self.read(context, &self.main_metric)?;
        if main.is_none() {
            if let Some(fallback) = &self.fallback_metric {
                main = self.read(context, fallback)?;
            }
        }
        let by = self.read(context, &self.by_metric)?;

        if let (Some(main), Some(by)) = (main, by) {
            self.add(main, by);
        }
        Ok(())
    }

    fn aggregate_counter(&mut self, other: Self) -> Result<()> {
        if other.initialized {
            self.add(other.main_sum, other.by_sum);
        }
        Ok(())
    }
}

impl Formula for AverageFormula {
    type Counter = AverageCounter;

    fn id(&self) -> &FormulaId {
        &self.id
    }

    fn create_new_counter(&self) -> AverageCounter {
        AverageCounter {
            main_metric: Arc::clone(&self.main_metric),
            by_metric: Arc::clone(&self.by_metric),
            fallback_metric: self.fallback_metric.clone(),
            main_sum: 0.0,
            by_sum: 0.0,
            initialized: false,
        }
    }

    fn output_metric_keys(&self) -> &[String] {
        &self.output_metrics
    }

    fn create_measure(
        &self,
        counter: &AverageCounter,
        _context: &CreateMeasureContext<'_>,
    ) -> Result<Option<Measure>> {
        Ok(counter.average().map(Measure::float))
    }
}
