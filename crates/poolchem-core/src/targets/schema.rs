use crate::model::PoolType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Acceptable band for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub minimum: f64,
    pub target: f64,
    pub maximum: f64,
}

impl ParameterRange {
    pub const fn new(minimum: f64, target: f64, maximum: f64) -> Self {
        Self {
            minimum,
            target,
            maximum,
        }
    }

    pub fn status(&self, value: f64) -> RangeStatus {
        if value < self.minimum {
            RangeStatus::TooLow
        } else if value > self.maximum {
            RangeStatus::TooHigh
        } else {
            RangeStatus::InRange
        }
    }

    pub fn is_in_range(&self, value: f64) -> bool {
        self.status(value) == RangeStatus::InRange
    }

    pub fn is_low(&self, value: f64) -> bool {
        value < self.minimum
    }

    pub fn is_high(&self, value: f64) -> bool {
        value > self.maximum
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeStatus {
    TooLow,
    InRange,
    TooHigh,
}

impl fmt::Display for RangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeStatus::TooLow => write!(f, "too low"),
            RangeStatus::InRange => write!(f, "in range"),
            RangeStatus::TooHigh => write!(f, "too high"),
        }
    }
}

/// Target ranges for one pool category.
///
/// FC thresholds are not configurable here; they follow the FC/CYA chart in
/// [`crate::chemistry::fc_cya`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetRanges {
    pub name: String,
    #[serde(default)]
    pub pool_type: PoolType,
    pub ph: ParameterRange,
    pub total_alkalinity: ParameterRange,
    pub calcium_hardness: ParameterRange,
    pub cyanuric_acid: ParameterRange,
    /// Only SWG pools track salt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<ParameterRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borates: Option<ParameterRange>,
    #[serde(default = "default_csi")]
    pub csi: ParameterRange,
}

fn default_csi() -> ParameterRange {
    ParameterRange::new(-0.3, 0.0, 0.3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_status() {
        let range = ParameterRange::new(7.2, 7.5, 7.8);
        assert_eq!(range.status(7.0), RangeStatus::TooLow);
        assert_eq!(range.status(7.2), RangeStatus::InRange);
        assert_eq!(range.status(7.8), RangeStatus::InRange);
        assert_eq!(range.status(8.0), RangeStatus::TooHigh);
        assert!(range.is_low(7.1));
        assert!(range.is_high(7.9));
        assert!(range.is_in_range(7.5));
    }

    #[test]
    fn test_defaults_when_deserializing() {
        let json = r#"{
            "name": "minimal",
            "ph": { "minimum": 7.2, "target": 7.5, "maximum": 7.8 },
            "total_alkalinity": { "minimum": 80, "target": 100, "maximum": 120 },
            "calcium_hardness": { "minimum": 200, "target": 300, "maximum": 400 },
            "cyanuric_acid": { "minimum": 30, "target": 50, "maximum": 80 }
        }"#;
        let ranges: TargetRanges = serde_json::from_str(json).unwrap();
        assert_eq!(ranges.pool_type, PoolType::Traditional);
        assert_eq!(ranges.csi, ParameterRange::new(-0.3, 0.0, 0.3));
        assert!(ranges.salt.is_none());
    }
}
