//! Whole-pool water assessment against the target ranges of its category.

use crate::chemistry::{
    compute_csi, is_fc_adequate, min_fc, target_fc, CsiBand, FcTarget, SaturationInputs,
};
use crate::config::ChemistryConfig;
use crate::error::PoolChemError;
use crate::model::{Parameter, Pool, PoolType, WaterState};
use crate::targets::schema::{ParameterRange, RangeStatus, TargetRanges};
use crate::targets::target_ranges_for;
use serde::{Deserialize, Serialize};

/// One parameter compared to its range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterAssessment {
    pub parameter: Parameter,
    pub value: f64,
    pub range: ParameterRange,
    pub status: RangeStatus,
}

/// CSI value and band, or why it could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsiAssessment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<CsiBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RangeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChlorineAssessment {
    pub free_chlorine: f64,
    pub minimum: f64,
    pub target: FcTarget,
    pub adequate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterAssessment {
    /// Name of the target ranges applied.
    pub ranges_name: String,
    pub pool_type: PoolType,
    pub parameters: Vec<ParameterAssessment>,
    pub csi: CsiAssessment,
    pub chlorine: ChlorineAssessment,
    /// Every parameter in range, CSI in range and FC adequate.
    pub balanced: bool,
}

impl WaterAssessment {
    /// Parameters outside their range.
    pub fn out_of_range(&self) -> impl Iterator<Item = &ParameterAssessment> {
        self.parameters
            .iter()
            .filter(|p| p.status != RangeStatus::InRange)
    }

    pub fn status_of(&self, parameter: Parameter) -> Option<RangeStatus> {
        self.parameters
            .iter()
            .find(|p| p.parameter == parameter)
            .map(|p| p.status)
    }
}

/// Assess water against the preset ranges for the pool's category.
pub fn assess_water(
    water: &WaterState,
    pool: &Pool,
    config: &ChemistryConfig,
) -> Result<WaterAssessment, PoolChemError> {
    let ranges = target_ranges_for(pool.pool_type)?;
    assess_water_with_ranges(water, pool, &ranges, config)
}

/// Assess water against explicit target ranges.
pub fn assess_water_with_ranges(
    water: &WaterState,
    pool: &Pool,
    ranges: &TargetRanges,
    config: &ChemistryConfig,
) -> Result<WaterAssessment, PoolChemError> {
    let mut checks = vec![
        (Parameter::Ph, ranges.ph),
        (Parameter::TotalAlkalinity, ranges.total_alkalinity),
        (Parameter::CalciumHardness, ranges.calcium_hardness),
        (Parameter::CyanuricAcid, ranges.cyanuric_acid),
    ];
    checks.extend(ranges.salt.map(|r| (Parameter::Salt, r)));
    checks.extend(ranges.borates.map(|r| (Parameter::Borates, r)));

    let parameters: Vec<ParameterAssessment> = checks
        .into_iter()
        .map(|(parameter, range)| {
            let value = water.get(parameter);
            ParameterAssessment {
                parameter,
                value,
                range,
                status: range.status(value),
            }
        })
        .collect();

    let csi = match compute_csi(&SaturationInputs::from(water), config) {
        Ok(value) => CsiAssessment {
            value: Some(value),
            band: Some(CsiBand::from_value(value)),
            status: Some(ranges.csi.status(value)),
            error: None,
        },
        Err(e) if e.is_calculation_error() => CsiAssessment {
            value: None,
            band: None,
            status: None,
            error: Some(e.to_string()),
        },
        Err(e) => return Err(e),
    };

    let is_swg = pool.is_swg();
    let cya = water.cyanuric_acid();
    let chlorine = ChlorineAssessment {
        free_chlorine: water.free_chlorine(),
        minimum: min_fc(cya, is_swg),
        target: target_fc(cya, is_swg),
        adequate: is_fc_adequate(water.free_chlorine(), cya, is_swg),
    };

    let balanced = parameters.iter().all(|p| p.status == RangeStatus::InRange)
        && csi.status == Some(RangeStatus::InRange)
        && chlorine.adequate;

    tracing::debug!(
        ranges = %ranges.name,
        balanced,
        csi = ?csi.value,
        "assessed water"
    );

    Ok(WaterAssessment {
        ranges_name: ranges.name.clone(),
        pool_type: pool.pool_type,
        parameters,
        csi,
        chlorine,
        balanced,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traditional_pool() -> Pool {
        Pool::new(15000.0, PoolType::Traditional).unwrap()
    }

    fn balanced_water() -> WaterState {
        WaterState::builder()
            .ph(7.5)
            .temperature_f(84.0)
            .free_chlorine(5.0)
            .total_alkalinity(100.0)
            .calcium_hardness(300.0)
            .cyanuric_acid(40.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_balanced_traditional_pool() {
        let result =
            assess_water(&balanced_water(), &traditional_pool(), &ChemistryConfig::default())
                .unwrap();
        assert!(result.balanced, "{result:?}");
        assert_eq!(result.parameters.len(), 4);
        assert_eq!(result.csi.band, Some(CsiBand::Balanced));
        assert_eq!(result.chlorine.minimum, 3.0);
        assert!(result.chlorine.adequate);
        assert_eq!(result.out_of_range().count(), 0);
    }

    #[test]
    fn test_swg_pool_checks_salt() {
        let pool = Pool::new(20000.0, PoolType::Swg).unwrap();
        let water = WaterState::builder()
            .ph(7.6)
            .temperature_f(84.0)
            .free_chlorine(4.0)
            .total_alkalinity(70.0)
            .calcium_hardness(350.0)
            .cyanuric_acid(70.0)
            .salt(3200.0)
            .build()
            .unwrap();
        let result = assess_water(&water, &pool, &ChemistryConfig::default()).unwrap();
        assert_eq!(result.status_of(Parameter::Salt), Some(RangeStatus::InRange));
        assert_eq!(result.chlorine.minimum, 3.0);
        assert!(result.balanced, "{result:?}");
    }

    #[test]
    fn test_unbalanced_water() {
        let water = WaterState::builder()
            .ph(7.0)
            .temperature_f(70.0)
            .free_chlorine(1.0)
            .total_alkalinity(50.0)
            .calcium_hardness(100.0)
            .cyanuric_acid(40.0)
            .build()
            .unwrap();
        let result =
            assess_water(&water, &traditional_pool(), &ChemistryConfig::default()).unwrap();
        assert!(!result.balanced);
        assert_eq!(result.status_of(Parameter::Ph), Some(RangeStatus::TooLow));
        assert_eq!(
            result.status_of(Parameter::CalciumHardness),
            Some(RangeStatus::TooLow)
        );
        assert_eq!(result.csi.band, Some(CsiBand::Corrosive));
        assert!(!result.chlorine.adequate);
    }

    #[test]
    fn test_csi_failure_is_reported_not_raised() {
        let water = balanced_water().to_builder().calcium_hardness(0.0).build().unwrap();
        let result =
            assess_water(&water, &traditional_pool(), &ChemistryConfig::default()).unwrap();
        assert!(result.csi.value.is_none());
        assert!(result.csi.error.as_deref().unwrap().contains("Calcium hardness"));
        assert!(!result.balanced);
    }
}
