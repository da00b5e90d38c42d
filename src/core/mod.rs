pub mod component;
pub mod errors;
pub mod measure;
pub mod metric;
pub mod period;

pub use component::{Component, ComponentIter, ComponentType};
pub use errors::{Error, Result};
pub use measure::{Measure, MeasureValue, MeasureVariations};
pub use metric::{catalog, Metric, MetricType};
pub use period::{Period, MAX_PERIODS};
