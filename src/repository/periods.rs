use crate::core::{Error, Period, Result};

/// Supplies the resolved comparison periods.
pub trait PeriodsHolder {
    /// Periods ordered by index.
    fn periods(&self) -> &[Period];
}

/// Validated, index-ordered set of periods.
#[derive(Debug, Clone, Default)]
pub struct Periods {
    periods: Vec<Period>,
}

impl Periods {
    /// Fails when two periods share an index.
    pub fn new(mut periods: Vec<Period>) -> Result<Self> {
        periods.sort_by_key(Period::index);
        if let Some(pair) = periods.windows(2).find(|pair| pair[0].index() == pair[1].index()) {
            return Err(Error::InvalidPeriod(format!(
                "index {} is used by more than one period",
                pair[0].index()
            )));
        }
        Ok(Self { periods })
    }
}

impl PeriodsHolder for Periods {
    fn periods(&self) -> &[Period] {
        &self.periods
    }
}
