//! Metric definitions and the catalog of well-known metric keys.

use serde::{Deserialize, Serialize};

/// Kind of value a metric carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Int,
    Float,
    Percent,
    Distribution,
    Text,
}

/// A metric definition, resolved from its key by a metric repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Metric {
    pub key: String,
    pub name: String,
    pub value_type: MetricType,
}

impl Metric {
    pub fn new(key: impl Into<String>, name: impl Into<String>, value_type: MetricType) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            value_type,
        }
    }
}

/// Well-known metric keys and their default definitions.
pub mod catalog {
    use super::{Metric, MetricType};

    pub const LINES: &str = "lines";
    pub const NCLOC: &str = "ncloc";
    pub const FUNCTIONS: &str = "functions";
    pub const COMPLEXITY: &str = "complexity";
    pub const COMPLEXITY_IN_FUNCTIONS: &str = "complexity_in_functions";
    pub const FUNCTION_COMPLEXITY: &str = "function_complexity";
    pub const FUNCTION_COMPLEXITY_DISTRIBUTION: &str = "function_complexity_distribution";
    pub const FILE_COMPLEXITY_DISTRIBUTION: &str = "file_complexity_distribution";
    pub const COMMENT_LINES: &str = "comment_lines";
    pub const NEW_LINES: &str = "new_lines";

    /// Default definitions for every key in this catalog.
    pub fn default_metrics() -> Vec<Metric> {
        vec![
            Metric::new(LINES, "Lines", MetricType::Int),
            Metric::new(NCLOC, "Lines of code", MetricType::Int),
            Metric::new(FUNCTIONS, "Functions", MetricType::Int),
            Metric::new(COMPLEXITY, "Cyclomatic complexity", MetricType::Int),
            Metric::new(
                COMPLEXITY_IN_FUNCTIONS,
                "Cyclomatic complexity in functions",
                MetricType::Int,
            ),
            Metric::new(
                FUNCTION_COMPLEXITY,
                "Complexity / function",
                MetricType::Float,
            ),
            Metric::new(
                FUNCTION_COMPLEXITY_DISTRIBUTION,
                "Function distribution / complexity",
                MetricType::Distribution,
            ),
            Metric::new(
                FILE_COMPLEXITY_DISTRIBUTION,
                "File distribution / complexity",
                MetricType::Distribution,
            ),
            Metric::new(COMMENT_LINES, "Comment lines", MetricType::Int),
            Metric::new(NEW_LINES, "Lines on new code", MetricType::Int),
        ]
    }
}
