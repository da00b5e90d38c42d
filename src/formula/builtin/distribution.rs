use crate::core::{Error, Measure, MeasureValue, Result};
use crate::formula::{Counter, CreateMeasureContext, FileAggregateContext, Formula, FormulaId};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Counts per range, serialized as `limit=count` pairs joined by `;`,
/// e.g. `1=3;2=0;4=5` (three items in `[1, 2)`, five at or above 4).
#[derive(Debug, Clone, PartialEq)]
pub struct RangeDistribution {
    ranges: Vec<(String, i64)>,
}

impl RangeDistribution {
    /// Add the counts of `other` range by range. Returns `false`, leaving
    /// `self` untouched, when the two distributions use different limits or
    /// a count would overflow.
    pub fn merge(&mut self, other: &RangeDistribution) -> bool {
        let same_limits = self.ranges.len() == other.ranges.len()
            && self
                .ranges
                .iter()
                .zip(&other.ranges)
                .all(|((limit, _), (other_limit, _))| limit == other_limit);
        if !same_limits {
            return false;
        }
        let merged: Option<Vec<i64>> = self
            .ranges
            .iter()
            .zip(&other.ranges)
            .map(|((_, count), (_, other_count))| count.checked_add(*other_count))
            .collect();
        let Some(merged) = merged else {
            return false;
        };
        for ((_, count), sum) in self.ranges.iter_mut().zip(merged) {
            *count = sum;
        }
        true
    }

    pub fn counts(&self) -> impl Iterator<Item = (&str, i64)> {
        self.ranges
            .iter()
            .map(|(limit, count)| (limit.as_str(), *count))
    }
}

impl FromStr for RangeDistribution {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let invalid = |reason: &str| {
            Error::InvalidMeasure(format!("invalid distribution '{}': {}", text, reason))
        };
        let ranges = text
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| -> Result<(String, i64)> {
                let (limit, count) = part
                    .split_once('=')
                    .ok_or_else(|| invalid("missing '='"))?;
                let limit = limit.trim();
                limit
                    .parse::<f64>()
                    .map_err(|_| invalid("limit is not a number"))?;
                let count = count
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| invalid("count is not an integer"))?;
                Ok((limit.to_string(), count))
            })
            .collect::<Result<Vec<_>>>()?;

        if ranges.is_empty() {
            return Err(invalid("no range"));
        }
        Ok(Self { ranges })
    }
}

impl fmt::Display for RangeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (limit, count)) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}={}", limit, count)?;
        }
        Ok(())
    }
}

/// Merges range distributions of a raw metric.
///
/// Once two contributions with different limits meet, or a count overflows,
/// the aggregate is invalid and no measure is produced for that component or
/// any ancestor.
#[derive(Debug, Clone)]
pub struct DistributionFormula {
    id: FormulaId,
    input_metric: Arc<str>,
    output_metrics: Vec<String>,
}

impl DistributionFormula {
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
pub struct DistributionCounter {
    input_metric: Arc<str>,
    distribution: Option<RangeDistribution>,
    incompatible: bool,
}

impl DistributionCounter {
    fn add(&mut self, distribution: RangeDistribution) {
        match &mut self.distribution {
            Some(current) => {
                if !current.merge(&distribution) {
                    self.incompatible = true;
                }
            }
            None => self.distribution = Some(distribution),
        }
    }

    /// Aggregated distribution, `None` when empty or incompatible.
    pub fn distribution(&self) -> Option<&RangeDistribution> {
        if self.incompatible {
            return None;
        }
        self.distribution.as_ref()
    }
}

impl Counter for DistributionCounter {
    fn aggregate_file(&mut self, context: &FileAggregateContext<'_>) -> Result<()> {
        let Some(measure) = context.measure(&self.input_metric)? else {
            return Ok(());
        };
        match &measure.value {
            MeasureValue::Text(text) => self.add(text.parse()?),
            MeasureValue::NoValue => {}
            _ => {
                return Err(Error::InvalidMeasure(format!(
                    "measure of metric '{}' is not a distribution",
                    self.input_metric
                )))
            }
        }
        Ok(())
    }

    fn aggregate_counter(&mut self, other: Self) -> Result<()> {
        self.incompatible |= other.incompatible;
        if let Some(distribution) = other.distribution {
            self.add(distribution);
        }
        Ok(())
    }
}

impl Formula for DistributionFormula {
    type Counter = DistributionCounter;

    fn id(&self) -> &FormulaId {
        &self.id
    }

    fn create_new_counter(&self) -> DistributionCounter {
        DistributionCounter {
            input_metric: Arc::clone(&self.input_metric),
            distribution: None,
            incompatible: false,
        }
    }

    fn output_metric_keys(&self) -> &[String] {
        &self.output_metrics
    }

    fn create_measure(
        &self,
        counter: &DistributionCounter,
        _context: &CreateMeasureContext<'_>,
    ) -> Result<Option<Measure>> {
        Ok(counter
            .distribution()
            .map(|distribution| Measure::text(distribution.to_string())))
    }
}
