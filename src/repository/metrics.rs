use crate::core::{catalog, Error, Metric, Result};
use std::collections::HashMap;

/// Resolves metric keys to metric definitions.
pub trait MetricRepository {
    /// Fails with [`Error::UnknownMetric`] when no metric has this key.
    fn get_by_key(&self, key: &str) -> Result<&Metric>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryMetricRepository {
    metrics: HashMap<String, Metric>,
}

impl InMemoryMetricRepository {
    /// Build a repository, rejecting duplicate keys.
    pub fn new(metrics: impl IntoIterator<Item = Metric>) -> Result<Self> {
        let mut repository = Self::default();
        for metric in metrics {
            repository.register(metric)?;
        }
        Ok(repository)
    }

    /// Repository preloaded with [`catalog::default_metrics`].
    pub fn with_default_metrics() -> Self {
        Self {
            metrics: catalog::default_metrics()
                .into_iter()
                .map(|metric| (metric.key.clone(), metric))
                .collect(),
        }
    }

    pub fn register(&mut self, metric: Metric) -> Result<()> {
        if self.metrics.contains_key(&metric.key) {
            return Err(Error::configuration(format!(
                "metric '{}' is defined more than once",
                metric.key
            )));
        }
        self.metrics.insert(metric.key.clone(), metric);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl MetricRepository for InMemoryMetricRepository {
    fn get_by_key(&self, key: &str) -> Result<&Metric> {
        self.metrics
            .get(key)
            .ok_or_else(|| Error::UnknownMetric {
                key: key.to_string(),
            })
    }
}
