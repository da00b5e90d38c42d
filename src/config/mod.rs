//! Declarative formula configuration.
//!
//! A TOML document declares extra metrics and the built-in formulas to run:
//!
//! ```toml
//! [[metric]]
//! key = "ncloc_total"
//! name = "Total lines of code"
//! type = "int"
//!
//! [[formula]]
//! kind = "sum"
//! input = "ncloc"
//! output = "ncloc_total"
//! ```
//!
//! Formula kinds are `sum`, `average`, `distribution` and `variation_sum`.

mod loader;

use crate::core::{catalog, Error, Metric, MetricType, Result};
use crate::formula::builtin::{
    AverageFormula, DistributionFormula, SumFormula, SumKind, VariationSumFormula,
};
use crate::formula::{FormulaId, RegisteredFormula};
use crate::repository::InMemoryMetricRepository;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulasConfig {
    /// Register the well-known catalog metrics before the declared ones.
    #[serde(default = "default_include_default_metrics")]
    pub include_default_metrics: bool,

    #[serde(default, rename = "metric")]
    pub metrics: Vec<MetricConfig>,

    #[serde(default, rename = "formula")]
    pub formulas: Vec<FormulaConfig>,
}

fn default_include_default_metrics() -> bool {
    true
}

impl Default for FormulasConfig {
    fn default() -> Self {
        Self {
            include_default_metrics: default_include_default_metrics(),
            metrics: Vec::new(),
            formulas: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricConfig {
    pub key: String,
    /// Defaults to the key.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub value_type: MetricType,
}

impl MetricConfig {
    fn to_metric(&self) -> Metric {
        let name = self.name.clone().unwrap_or_else(|| self.key.clone());
        Metric::new(self.key.clone(), name, self.value_type)
    }
}

/// One built-in formula. Ids default to the output metric key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormulaConfig {
    Sum {
        #[serde(default)]
        id: Option<String>,
        input: String,
        output: String,
        /// `int` unless stated otherwise.
        #[serde(default, rename = "type")]
        value_type: Option<SumKind>,
        #[serde(default)]
        default_input_value: Option<f64>,
    },
    Average {
        #[serde(default)]
        id: Option<String>,
        output: String,
        main: String,
        by: String,
        #[serde(default)]
        fallback: Option<String>,
    },
    Distribution {
        #[serde(default)]
        id: Option<String>,
        input: String,
        output: String,
    },
    VariationSum {
        #[serde(default)]
        id: Option<String>,
        input: String,
        output: String,
    },
}

impl FormulaConfig {
    fn id(&self) -> Option<&str> {
        match self {
            Self::Sum { id, .. }
            | Self::Average { id, .. }
            | Self::Distribution { id, .. }
            | Self::VariationSum { id, .. } => id.as_deref(),
        }
    }

    fn output(&self) -> &str {
        match self {
            Self::Sum { output, .. }
            | Self::Average { output, .. }
            | Self::Distribution { output, .. }
            | Self::VariationSum { output, .. } => output,
        }
    }

    fn metric_keys(&self) -> Vec<&str> {
        match self {
            Self::Sum { input, output, .. }
            | Self::Distribution { input, output, .. }
            | Self::VariationSum { input, output, .. } => vec![input.as_str(), output.as_str()],
            Self::Average {
                output,
                main,
                by,
                fallback,
                ..
            } => {
                let mut keys = vec![output.as_str(), main.as_str(), by.as_str()];
                keys.extend(fallback.as_deref());
                keys
            }
        }
    }

    fn build(&self) -> RegisteredFormula {
        let id = FormulaId::new(self.id().unwrap_or_else(|| self.output()));
        match self {
            Self::Sum {
                input,
                output,
                value_type,
                default_input_value,
                ..
            } => {
                let formula = SumFormula::new(value_type.unwrap_or(SumKind::Int), input, output)
                    .with_id(id);
                match default_input_value {
                    Some(value) => formula.with_default_input_value(*value).into(),
                    None => formula.into(),
                }
            }
            Self::Average {
                output,
                main,
                by,
                fallback,
                ..
            } => {
                let formula = AverageFormula::new(output, main, by).with_id(id);
                match fallback {
                    Some(fallback) => formula.with_fallback_metric(fallback).into(),
                    None => formula.into(),
                }
            }
            Self::Distribution { input, output, .. } => {
                DistributionFormula::new(input, output).with_id(id).into()
            }
            Self::VariationSum { input, output, .. } => {
                VariationSumFormula::new(input, output).with_id(id).into()
            }
        }
    }
}

impl FormulasConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        loader::load_config_from_path(path.as_ref())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        loader::parse_and_validate_config(contents)
    }

    /// Metric repository holding the catalog metrics (unless disabled)
    /// followed by the declared metrics.
    ///
    /// Declaring a metric whose key is already registered is an error.
    pub fn metric_repository(&self) -> Result<InMemoryMetricRepository> {
        let defaults = if self.include_default_metrics {
            catalog::default_metrics()
        } else {
            Vec::new()
        };
        InMemoryMetricRepository::new(
            defaults
                .into_iter()
                .chain(self.metrics.iter().map(MetricConfig::to_metric)),
        )
    }

    /// Build the declared formulas, in declaration order.
    ///
    /// Cross-formula checks (duplicate ids or outputs, unknown metrics) are
    /// left to the executor.
    pub fn build_formulas(&self) -> Result<Vec<RegisteredFormula>> {
        self.validate()?;
        Ok(self.formulas.iter().map(FormulaConfig::build).collect())
    }

    fn validate(&self) -> Result<()> {
        if let Some(metric) = self.metrics.iter().find(|m| m.key.trim().is_empty()) {
            return Err(Error::configuration(format!(
                "metric declared with an empty key (name {:?})",
                metric.name
            )));
        }
        for (position, formula) in self.formulas.iter().enumerate() {
            if formula.metric_keys().iter().any(|key| key.trim().is_empty()) {
                return Err(Error::configuration(format!(
                    "formula #{} refers to an empty metric key",
                    position + 1
                )));
            }
            if formula.id().is_some_and(|id| id.trim().is_empty()) {
                return Err(Error::configuration(format!(
                    "formula #{} has an empty id",
                    position + 1
                )));
            }
        }
        Ok(())
    }
}
