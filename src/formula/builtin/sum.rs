use super::{float_value, int_value, integral};
use crate::core::{Measure, Result};
use crate::formula::{Counter, CreateMeasureContext, FileAggregateContext, Formula, FormulaId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SumKind {
    Int,
    Float,
}

/// Sums a raw metric over all files of a component.
///
/// No measure is produced for components where no file carried the raw
/// measure, unless a default input value is set, in which case files
/// without the measure count as that value.
#[derive(Debug, Clone)]
pub struct SumFormula {
    id: FormulaId,
    kind: SumKind,
    input_metric: Arc<str>,
    output_metrics: Vec<String>,
    default_input_value: Option<f64>,
}

impl SumFormula {
    /// Integer sum. Float raw values must be integral, and a component whose
    /// total overflows `i64` gets no measure.
    pub fn int(input_metric: &str, output_metric: &str) -> Self {
        Self::new(SumKind::Int, input_metric, output_metric)
    }

    pub fn float(input_metric: &str, output_metric: &str) -> Self {
        Self::new(SumKind::Float, input_metric, output_metric)
    }

    /// The formula id defaults to the output metric key.
    pub fn new(kind: SumKind, input_metric: &str, output_metric: &str) -> Self {
        Self {
            id: FormulaId::new(output_metric),
            kind,
            input_metric: Arc::from(input_metric),
            output_metrics: vec![output_metric.to_string()],
            default_input_value: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: FormulaId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_default_input_value(mut self, value: f64) -> Self {
        self.default_input_value = Some(value);
        self
    }
}

#[derive(Debug, Clone)]
pub struct SumCounter {
    kind: SumKind,
    input_metric: Arc<str>,
    default_input_value: Option<f64>,
    int_sum: i64,
    float_sum: f64,
    initialized: bool,
    overflowed: bool,
}

impl SumCounter {
    fn add_int(&mut self, value: i64) {
        match self.int_sum.checked_add(value) {
            Some(sum) => self.int_sum = sum,
            None => {
                if !self.overflowed {
                    tracing::warn!(metric = %self.input_metric, "integer sum overflowed");
                }
                self.overflowed = true;
            }
        }
        self.initialized = true;
    }

    fn add_float(&mut self, value: f64) {
        self.float_sum += value;
        self.initialized = true;
    }

    /// Current total, `None` while no file contributed or once an integer
    /// sum overflowed.
    pub fn total(&self) -> Option<Measure> {
        if !self.initialized || (self.kind == SumKind::Int && self.overflowed) {
            return None;
        }
        Some(match self.kind {
            SumKind::Int => Measure::int(self.int_sum),
            SumKind::Float => Measure::float(self.float_sum),
        })
    }
}

impl Counter for SumCounter {
    fn aggregate_file(&mut self, context: &FileAggregateContext<'_>) -> Result<()> {
        let measure = context.measure(&self.input_metric)?;
        match self.kind {
            SumKind::Int => {
                let value = match measure {
                    Some(measure) => int_value(measure, &self.input_metric)?,
                    None => self
                        .default_input_value
                        .map(|value| integral(value, &self.input_metric))
                        .transpose()?,
                };
                if let Some(value) = value {
                    self.add_int(value);
                }
            }
            SumKind::Float => {
                let value = match measure {
                    Some(measure) => float_value(measure, &self.input_metric)?,
                    None => self.default_input_value,
                };
                if let Some(value) = value {
                    self.add_float(value);
                }
            }
        }
        Ok(())
    }

    fn aggregate_counter(&mut self, other: Self) -> Result<()> {
        self.overflowed |= other.overflowed;
        if other.initialized {
            self.add_int(other.int_sum);
            self.add_float(other.float_sum);
        }
        Ok(())
    }
}

impl Formula for SumFormula {
    type Counter = SumCounter;

    fn id(&self) -> &FormulaId {
        &self.id
    }

    fn create_new_counter(&self) -> SumCounter {
        SumCounter {
            kind: self.kind,
            input_metric: Arc::clone(&self.input_metric),
            default_input_value: self.default_input_value,
            int_sum: 0,
            float_sum: 0.0,
            initialized: false,
            overflowed: false,
        }
    }

    fn output_metric_keys(&self) -> &[String] {
        &self.output_metrics
    }

    fn create_measure(
        &self,
        counter: &SumCounter,
        _context: &CreateMeasureContext<'_>,
    ) -> Result<Option<Measure>> {
        Ok(counter.total())
    }
}
