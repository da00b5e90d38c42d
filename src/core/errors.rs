//! Shared error types for formula execution

use thiserror::Error;

/// Main error type for measuretree operations
#[derive(Debug, Error)]
pub enum Error {
    /// No formula was registered with the executor
    #[error("Configuration error: at least one formula must be registered")]
    NoFormulas,

    /// Two registered formulas share the same identifier
    #[error("Configuration error: formula '{id}' is registered more than once")]
    DuplicateFormula { id: String },

    /// A formula declares no output metric
    #[error("Configuration error: formula '{formula}' declares no output metric")]
    EmptyOutputMetrics { formula: String },

    /// Two formulas would write the same metric on the same components
    #[error(
        "Configuration error: metric '{key}' is produced by both formula '{first}' and formula '{second}'"
    )]
    DuplicateOutputMetric {
        key: String,
        first: String,
        second: String,
    },

    /// A metric key does not resolve to a known metric
    #[error("Configuration error: unknown metric '{key}'")]
    UnknownMetric { key: String },

    /// Periods were requested but the executor has no periods holder
    #[error("Configuration error: formula '{formula}' requires variation support but no periods are configured")]
    PeriodsNotConfigured { formula: String },

    /// Invalid period definition
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Other configuration errors (declarative config, metric catalog)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A measure was written twice for the same component and metric
    #[error("Measure for metric '{metric}' already exists on component '{component}'")]
    DuplicateMeasure { component: String, metric: String },

    /// A counter did not belong to the formula handling it
    #[error("Counter type mismatch for formula '{formula}'")]
    CounterMismatch { formula: String },

    /// A raw measure value could not be interpreted
    #[error("Invalid measure: {0}")]
    InvalidMeasure(String),

    /// Failures raised by formula implementations
    #[error(transparent)]
    External(#[from] anyhow::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Whether the error signals a wiring mistake by the host rather than a
    /// problem with the data being aggregated.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NoFormulas
                | Self::DuplicateFormula { .. }
                | Self::EmptyOutputMetrics { .. }
                | Self::DuplicateOutputMetric { .. }
                | Self::UnknownMetric { .. }
                | Self::PeriodsNotConfigured { .. }
                | Self::InvalidPeriod(_)
                | Self::Configuration(_)
                | Self::Toml(_)
        )
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
