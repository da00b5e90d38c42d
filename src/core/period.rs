//! Historical comparison periods.

use super::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest period index supported by measure variations.
pub const MAX_PERIODS: usize = 5;

/// A historical reference point measures can be compared against.
///
/// `index` ranges from 1 to [`MAX_PERIODS`] and selects the variation slot
/// of a [`Measure`](super::measure::Measure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    index: usize,
    mode: String,
    parameter: Option<String>,
    snapshot_date: DateTime<Utc>,
    snapshot_id: i64,
}

impl Period {
    pub fn new(
        index: usize,
        mode: impl Into<String>,
        parameter: Option<String>,
        snapshot_date: DateTime<Utc>,
        snapshot_id: i64,
    ) -> Result<Self> {
        if !(1..=MAX_PERIODS).contains(&index) {
            return Err(Error::InvalidPeriod(format!(
                "index {} is outside 1..={}",
                index, MAX_PERIODS
            )));
        }
        Ok(Self {
            index,
            mode: mode.into(),
            parameter,
            snapshot_date,
            snapshot_id,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// How the period was selected, e.g. `days` or `previous_version`.
    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    pub fn snapshot_date(&self) -> DateTime<Utc> {
        self.snapshot_date
    }

    pub fn snapshot_id(&self) -> i64 {
        self.snapshot_id
    }
}
