//! Measure values attached to components.

use super::period::MAX_PERIODS;
use serde::{Deserialize, Serialize};

/// Value of a measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum MeasureValue {
    Int(i64),
    Float(f64),
    Text(String),
    /// The measure only carries variations.
    NoValue,
}

impl MeasureValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(_) | Self::NoValue => None,
        }
    }

    /// Integer view of the value. Floats convert only when integral and in
    /// range.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(value)
                if value.fract() == 0.0
                    && *value >= i64::MIN as f64
                    && *value < i64::MAX as f64 =>
            {
                Some(*value as i64)
            }
            Self::Float(_) => None,
            Self::Text(_) | Self::NoValue => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Variations of a measure against each period, indexed 1..=5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasureVariations([Option<f64>; MAX_PERIODS]);

impl MeasureVariations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variation for the period with the given index, if any.
    pub fn get(&self, period_index: usize) -> Option<f64> {
        period_index
            .checked_sub(1)
            .and_then(|slot| self.0.get(slot).copied().flatten())
    }

    /// Set the variation of a period. Indexes outside 1..=5 are ignored.
    #[must_use]
    pub fn with(mut self, period_index: usize, variation: f64) -> Self {
        if let Some(slot) = period_index.checked_sub(1).and_then(|i| self.0.get_mut(i)) {
            *slot = Some(variation);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

/// A computed or raw value for one (component, metric) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub value: MeasureValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variations: Option<MeasureVariations>,
}

impl Measure {
    pub fn int(value: i64) -> Self {
        Self::from_value(MeasureValue::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Self::from_value(MeasureValue::Float(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::from_value(MeasureValue::Text(value.into()))
    }

    /// A measure without value, only meaningful with variations.
    pub fn no_value() -> Self {
        Self::from_value(MeasureValue::NoValue)
    }

    fn from_value(value: MeasureValue) -> Self {
        Self {
            value,
            variations: None,
        }
    }

    #[must_use]
    pub fn with_variations(mut self, variations: MeasureVariations) -> Self {
        self.variations = Some(variations);
        self
    }

    pub fn variation(&self, period_index: usize) -> Option<f64> {
        self.variations.and_then(|v| v.get(period_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numeric_views() {
        assert_eq!(MeasureValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(MeasureValue::Float(3.0).as_i64(), Some(3));
        assert_eq!(MeasureValue::Float(2.9).as_i64(), None);
        assert_eq!(MeasureValue::Float(f64::NAN).as_i64(), None);
        assert_eq!(MeasureValue::Text("1=2".into()).as_f64(), None);
        assert_eq!(MeasureValue::NoValue.as_i64(), None);
        assert_eq!(MeasureValue::Text("1=2".into()).as_text(), Some("1=2"));
    }

    #[test]
    fn test_variations_are_one_indexed() {
        let variations = MeasureVariations::new().with(1, 10.0).with(5, 2.0).with(0, 7.0).with(6, 7.0);
        assert_eq!(variations.get(1), Some(10.0));
        assert_eq!(variations.get(5), Some(2.0));
        assert_eq!(variations.get(2), None);
        assert_eq!(variations.get(0), None);
        assert_eq!(variations.get(6), None);
        assert!(!variations.is_empty());
        assert!(MeasureVariations::new().is_empty());
    }

    #[test]
    fn test_measure_serialization() {
        let measure = Measure::int(12);
        let json = serde_json::to_string(&measure).unwrap();
        assert_eq!(json, r#"{"value":{"type":"int","value":12}}"#);

        let with_variations =
            Measure::no_value().with_variations(MeasureVariations::new().with(2, 4.0));
        let back: Measure =
            serde_json::from_str(&serde_json::to_string(&with_variations).unwrap()).unwrap();
        assert_eq!(back.variation(2), Some(4.0));
        assert_eq!(back.value, MeasureValue::NoValue);
    }
}
