use crate::core::{Measure, MeasureVariations, Result, MAX_PERIODS};
use crate::formula::{Counter, CreateMeasureContext, FileAggregateContext, Formula, FormulaId};
use std::sync::Arc;

/// Sums the variations of a raw metric, period by period.
///
/// Produces a measure without value carrying one variation per period for
/// which at least one file had a variation. Requires variation support.
#[derive(Debug, Clone)]
pub struct VariationSumFormula {
    id: FormulaId,
    input_metric: Arc<str>,
    output_metrics: Vec<String>,
}

impl VariationSumFormula {
    /// The formula id defaults to the output metric key.
    pub fn new(input_metric: &str, output_metric: &str) -> Self {
        Self {
            id: FormulaId::new(output_metric),
            input_metric: Arc::from(input_metric),
            output_metrics: vec![output_metric.to_string()],
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: FormulaId) -> Self {
        self.id = id;
        self
    }
}

#[derive(Debug, Clone)]
pub struct VariationSumCounter {
    input_metric: Arc<str>,
    sums: [Option<f64>; MAX_PERIODS],
}

impl VariationSumCounter {
    fn add(&mut self, slot: usize, value: f64) {
        let sum = &mut self.sums[slot];
        *sum = Some(sum.unwrap_or(0.0) + value);
    }

    /// Sum of variations for the period with this index.
    pub fn sum(&self, period_index: usize) -> Option<f64> {
        period_index
            .checked_sub(1)
            .and_then(|slot| self.sums.get(slot).copied().flatten())
    }
}

impl Counter for VariationSumCounter {
    fn aggregate_file(&mut self, context: &FileAggregateContext<'_>) -> Result<()> {
        let periods = context.periods()?;
        let Some(measure) = context.measure(&self.input_metric)? else {
            return Ok(());
        };
        for period in periods {
            if let Some(variation) = measure.variation(period.index()) {
                self.add(period.index() - 1, variation);
            }
        }
        Ok(())
    }

    fn aggregate_counter(&mut self, other: Self) -> Result<()> {
        for (slot, value) in other.sums.iter().enumerate() {
            if let Some(value) = value {
                self.add(slot, *value);
            }
        }
        Ok(())
    }
}

impl Formula for VariationSumFormula {
    type Counter = VariationSumCounter;

    fn id(&self) -> &FormulaId {
        &self.id
    }

    fn create_new_counter(&self) -> VariationSumCounter {
        VariationSumCounter {
            input_metric: Arc::clone(&self.input_metric),
            sums: [None; MAX_PERIODS],
        }
    }

    fn output_metric_keys(&self) -> &[String] {
        &self.output_metrics
    }

    fn create_measure(
        &self,
        counter: &VariationSumCounter,
        context: &CreateMeasureContext<'_>,
    ) -> Result<Option<Measure>> {
        let variations = context
            .periods()?
            .iter()
            .filter_map(|period| counter.sum(period.index()).map(|sum| (period.index(), sum)))
            .fold(MeasureVariations::new(), |variations, (index, sum)| {
                variations.with(index, sum)
            });

        if variations.is_empty() {
            return Ok(None);
        }
        Ok(Some(Measure::no_value().with_variations(variations)))
    }

    fn requires_periods(&self) -> bool {
        true
    }
}
