//! Ready-made formulas covering the usual aggregations.
//!
//! - [`SumFormula`]: integer or float sum of a raw metric
//! - [`AverageFormula`]: ratio of two summed raw metrics
//! - [`DistributionFormula`]: merge of range distributions
//! - [`VariationSumFormula`]: per-period sum of raw metric variations

pub mod average;
pub mod distribution;
pub mod sum;
pub mod variation;

pub use average::{AverageCounter, AverageFormula};
pub use distribution::{DistributionCounter, DistributionFormula, RangeDistribution};
pub use sum::{SumCounter, SumFormula, SumKind};
pub use variation::{VariationSumCounter, VariationSumFormula};

use crate::core::{Error, Measure, MeasureValue, Result};

/// Integer view of a raw measure. Measures without value read as absent,
/// floats must be integral.
pub(crate) fn int_value(measure: &Measure, metric_key: &str) -> Result<Option<i64>> {
    match &measure.value {
        MeasureValue::NoValue => Ok(None),
        MeasureValue::Float(value) => integral(*value, metric_key).map(Some),
        value => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| not_numeric(metric_key)),
    }
}

/// Float view of a raw measure. Measures without value read as absent.
pub(crate) fn float_value(measure: &Measure, metric_key: &str) -> Result<Option<f64>> {
    match &measure.value {
        MeasureValue::NoValue => Ok(None),
        value => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| not_numeric(metric_key)),
    }
}

/// `value` as an `i64`, rejecting fractional, non-finite and out of range
/// values instead of truncating them.
pub(crate) fn integral(value: f64, metric_key: &str) -> Result<i64> {
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Ok(value as i64)
    } else {
        Err(Error::InvalidMeasure(format!(
            "value {} of metric '{}' is not an integer",
            value, metric_key
        )))
    }
}

fn not_numeric(metric_key: &str) -> Error {
    Error::InvalidMeasure(format!("measure of metric '{}' is not numeric", metric_key))
}
