//! Free chlorine thresholds as a function of cyanuric acid (TFP chart).
//!
//! All thresholds are whole ppm values.

use serde::{Deserialize, Serialize};

/// Minimum acceptable FC for a CYA level.
pub fn min_fc(cyanuric_acid: f64, is_swg: bool) -> f64 {
    if cyanuric_acid <= 0.0 {
        return 1.0;
    }
    let slope = if is_swg { 0.045 } else { 0.075 };
    (cyanuric_acid * slope + 0.7).floor().max(1.0)
}

/// Recommended FC band. SWG pools get a single target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FcTarget {
    pub low: f64,
    pub high: f64,
}

pub fn target_fc(cyanuric_acid: f64, is_swg: bool) -> FcTarget {
    if cyanuric_acid <= 0.0 {
        return FcTarget { low: 3.0, high: 3.0 };
    }
    if is_swg {
        let target = (cyanuric_acid * 0.075).floor().max(3.0);
        return FcTarget {
            low: target,
            high: target,
        };
    }
    FcTarget {
        low: (cyanuric_acid / 10.0 + 1.5).floor().max(3.0),
        high: (cyanuric_acid / 10.0 + 3.5).floor().max(3.0),
    }
}

/// FC to hold during a SLAM.
pub fn shock_fc(cyanuric_acid: f64) -> f64 {
    if cyanuric_acid <= 0.0 {
        return 10.0;
    }
    (cyanuric_acid * 0.393 + 0.5).floor().max(10.0)
}

pub fn mustard_algae_shock_fc(cyanuric_acid: f64) -> f64 {
    if cyanuric_acid <= 0.0 {
        return 12.0;
    }
    (cyanuric_acid / 2.0 + 4.5).floor().max(12.0)
}

pub fn is_fc_adequate(free_chlorine: f64, cyanuric_acid: f64, is_swg: bool) -> bool {
    free_chlorine >= min_fc(cyanuric_acid, is_swg)
}

/// All FC thresholds for one CYA level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChlorineLevels {
    pub minimum: f64,
    pub target: FcTarget,
    pub shock: f64,
    pub mustard_algae_shock: f64,
}

pub fn chlorine_levels(cyanuric_acid: f64, is_swg: bool) -> ChlorineLevels {
    ChlorineLevels {
        minimum: min_fc(cyanuric_acid, is_swg),
        target: target_fc(cyanuric_acid, is_swg),
        shock: shock_fc(cyanuric_acid),
        mustard_algae_shock: mustard_algae_shock_fc(cyanuric_acid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_fc() {
        assert_eq!(min_fc(50.0, false), 4.0);
        assert_eq!(min_fc(70.0, true), 3.0);
        assert_eq!(min_fc(0.0, false), 1.0);
        assert_eq!(min_fc(5.0, false), 1.0);
    }

    #[test]
    fn test_target_fc() {
        assert_eq!(target_fc(50.0, false), FcTarget { low: 6.0, high: 8.0 });
        assert_eq!(target_fc(70.0, true), FcTarget { low: 5.0, high: 5.0 });
        assert_eq!(target_fc(0.0, true), FcTarget { low: 3.0, high: 3.0 });
        assert_eq!(target_fc(10.0, false), FcTarget { low: 3.0, high: 4.0 });
    }

    #[test]
    fn test_shock_fc() {
        assert_eq!(shock_fc(50.0), 20.0);
        assert_eq!(shock_fc(30.0), 12.0);
        assert_eq!(shock_fc(10.0), 10.0);
        assert_eq!(shock_fc(-1.0), 10.0);
    }

    #[test]
    fn test_mustard_algae_shock() {
        assert_eq!(mustard_algae_shock_fc(50.0), 29.0);
        assert_eq!(mustard_algae_shock_fc(30.0), 19.0);
        assert_eq!(mustard_algae_shock_fc(0.0), 12.0);
    }

    #[test]
    fn test_fc_adequate() {
        assert!(is_fc_adequate(5.0, 50.0, false));
        assert!(is_fc_adequate(4.0, 50.0, false));
        assert!(!is_fc_adequate(2.0, 50.0, false));
    }

    #[test]
    fn test_chlorine_levels_bundle() {
        let levels = chlorine_levels(50.0, false);
        assert_eq!(levels.minimum, 4.0);
        assert_eq!(levels.target.high, 8.0);
        assert_eq!(levels.shock, 20.0);
        assert_eq!(levels.mustard_algae_shock, 29.0);
    }
}
