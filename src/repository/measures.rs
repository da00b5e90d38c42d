use crate::core::{Component, Error, Measure, Metric, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Read access to raw per-file measures and write access for computed ones.
pub trait MeasureRepository {
    /// Measure produced upstream (e.g. by scanning) for this component.
    fn get_raw_measure(&self, component: &Component, metric: &Metric) -> Option<&Measure>;

    /// Record a computed measure.
    ///
    /// Implementations must fail with [`Error::DuplicateMeasure`] when a
    /// measure was already added for the same component and metric.
    fn add(&mut self, component: &Component, metric: &Metric, measure: Measure) -> Result<()>;
}

/// Identifies a measure by component key and metric key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MeasureKey {
    pub component: String,
    pub metric: String,
}

impl MeasureKey {
    pub fn new(component: impl Into<String>, metric: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            metric: metric.into(),
        }
    }
}

/// Measure repository keeping raw and computed measures apart.
///
/// Raw measures are seeded by the caller and are never written by
/// formulas; `add` only checks for duplicates among computed measures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMeasureRepository {
    raw: HashMap<MeasureKey, Measure>,
    computed: HashMap<MeasureKey, Measure>,
}

impl InMemoryMeasureRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_raw_measure(
        mut self,
        component_key: impl Into<String>,
        metric_key: impl Into<String>,
        measure: Measure,
    ) -> Self {
        self.set_raw_measure(component_key, metric_key, measure);
        self
    }

    pub fn set_raw_measure(
        &mut self,
        component_key: impl Into<String>,
        metric_key: impl Into<String>,
        measure: Measure,
    ) {
        self.raw
            .insert(MeasureKey::new(component_key, metric_key), measure);
    }

    /// Computed measure for a component key and metric key.
    pub fn get(&self, component_key: &str, metric_key: &str) -> Option<&Measure> {
        self.computed
            .get(&MeasureKey::new(component_key, metric_key))
    }

    /// All computed measures sorted by component key then metric key.
    pub fn computed_measures(&self) -> Vec<(&MeasureKey, &Measure)> {
        let mut measures: Vec<_> = self.computed.iter().collect();
        measures.sort_by(|a, b| a.0.cmp(b.0));
        measures
    }

    /// Number of computed measures.
    pub fn len(&self) -> usize {
        self.computed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.computed.is_empty()
    }
}

impl MeasureRepository for InMemoryMeasureRepository {
    fn get_raw_measure(&self, component: &Component, metric: &Metric) -> Option<&Measure> {
        self.raw
            .get(&MeasureKey::new(component.key(), metric.key.as_str()))
    }

    fn add(&mut self, component: &Component, metric: &Metric, measure: Measure) -> Result<()> {
        let key = MeasureKey::new(component.key(), metric.key.as_str());
        if self.computed.contains_key(&key) {
            return Err(Error::DuplicateMeasure {
                component: key.component,
                metric: key.metric,
            });
        }
        self.computed.insert(key, measure);
        Ok(())
    }
}
