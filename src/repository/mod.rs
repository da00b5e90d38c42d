//! Collaborators the formula executor reads from and writes to.
//!
//! The executor only depends on the traits defined here. The in-memory
//! implementations are complete enough for hosts that keep everything in
//! process and are what the test-suite runs against.

pub mod measures;
pub mod metrics;
pub mod periods;

pub use measures::{InMemoryMeasureRepository, MeasureKey, MeasureRepository};
pub use metrics::{InMemoryMetricRepository, MetricRepository};
pub use periods::{Periods, PeriodsHolder};
