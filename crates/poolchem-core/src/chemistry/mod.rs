pub mod csi;
pub mod factors;
pub mod fc_cya;
pub mod lookup;
pub mod lsi;

pub use csi::{compute_csi, csi_breakdown, CsiBand, CsiBreakdown};
pub use fc_cya::{
    chlorine_levels, is_fc_adequate, min_fc, mustard_algae_shock_fc, shock_fc, target_fc,
    ChlorineLevels, FcTarget,
};
pub use lookup::LookupTable;
pub use lsi::{compute_lsi, lsi_breakdown, LsiBand, LsiBreakdown};

use crate::error::PoolChemError;
use crate::model::WaterState;
use serde::{Deserialize, Serialize};

/// Inputs to the saturation index engines.
///
/// pH, temperature, calcium hardness and total alkalinity are required; the
/// engines fail with [`PoolChemError::MissingParameter`] when one is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturationInputs {
    pub ph: Option<f64>,
    pub temperature_f: Option<f64>,
    pub calcium_hardness: Option<f64>,
    pub total_alkalinity: Option<f64>,
    pub cyanuric_acid: f64,
    pub salt: f64,
    pub borates: f64,
}

impl SaturationInputs {
    pub fn new(ph: f64, temperature_f: f64, calcium_hardness: f64, total_alkalinity: f64) -> Self {
        Self {
            ph: Some(ph),
            temperature_f: Some(temperature_f),
            calcium_hardness: Some(calcium_hardness),
            total_alkalinity: Some(total_alkalinity),
            ..Self::default()
        }
    }

    pub fn with_cyanuric_acid(mut self, ppm: f64) -> Self {
        self.cyanuric_acid = ppm;
        self
    }

    pub fn with_salt(mut self, ppm: f64) -> Self {
        self.salt = ppm;
        self
    }

    pub fn with_borates(mut self, ppm: f64) -> Self {
        self.borates = ppm;
        self
    }

    /// Check required fields and the calcium precondition shared by both indices.
    pub(crate) fn require(&self, calculation: &'static str) -> Result<Required, PoolChemError> {
        let missing = |parameter| PoolChemError::MissingParameter {
            parameter,
            calculation,
        };
        let required = Required {
            ph: self.ph.ok_or_else(|| missing("pH"))?,
            temperature_f: self.temperature_f.ok_or_else(|| missing("Temperature"))?,
            calcium_hardness: self
                .calcium_hardness
                .ok_or_else(|| missing("Calcium hardness"))?,
            total_alkalinity: self
                .total_alkalinity
                .ok_or_else(|| missing("Total alkalinity"))?,
        };
        if required.calcium_hardness <= 0.0 {
            return Err(PoolChemError::Calculation(
                "Calcium hardness must be greater than 0".into(),
            ));
        }
        Ok(required)
    }
}

impl From<&WaterState> for SaturationInputs {
    fn from(water: &WaterState) -> Self {
        SaturationInputs::new(
            water.ph(),
            water.temperature_f(),
            water.calcium_hardness(),
            water.total_alkalinity(),
        )
        .with_cyanuric_acid(water.cyanuric_acid())
        .with_salt(water.salt())
        .with_borates(water.borates())
    }
}

pub(crate) struct Required {
    pub ph: f64,
    pub temperature_f: f64,
    pub calcium_hardness: f64,
    pub total_alkalinity: f64,
}
