//! Calcium Saturation Index (PoolMath/TroubleFreePool).
//!
//! ```text
//! CSI = pH - 11.677 + log10(CH) + log10(CarbAlk)
//!       - 2.56·√I / (1 + 1.65·√I)
//!       - 1412.5 / (T_C + 273.15) + 4.7375
//! ```
//!
//! CarbAlk is corrected for cyanurate and borate buffering; the ionic strength
//! `I` accounts for hardness, alkalinity and free salt.

use super::factors::{carbonate_alkalinity, ionic_strength};
use super::SaturationInputs;
use crate::config::ChemistryConfig;
use crate::error::PoolChemError;
use crate::units;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every intermediate of a CSI evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CsiBreakdown {
    pub carbonate_alkalinity: f64,
    pub ionic_strength: f64,
    pub ionic_term: f64,
    pub temperature_term: f64,
    pub csi: f64,
}

impl CsiBreakdown {
    pub fn band(&self) -> CsiBand {
        CsiBand::from_value(self.csi)
    }
}

pub fn compute_csi(
    inputs: &SaturationInputs,
    config: &ChemistryConfig,
) -> Result<f64, PoolChemError> {
    csi_breakdown(inputs, config).map(|b| b.csi)
}

pub fn csi_breakdown(
    inputs: &SaturationInputs,
    config: &ChemistryConfig,
) -> Result<CsiBreakdown, PoolChemError> {
    let required = inputs.require("CSI")?;

    let carb_alk = carbonate_alkalinity(
        required.total_alkalinity,
        inputs.cyanuric_acid,
        required.ph,
        inputs.borates,
        config,
    );
    if carb_alk <= 0.0 {
        return Err(PoolChemError::Calculation(
            "Carbonate alkalinity is too low (CYA/Borate correction exceeds TA)".into(),
        ));
    }

    let ionic = ionic_strength(
        required.calcium_hardness,
        required.total_alkalinity,
        inputs.salt,
        config,
    );
    let sqrt_ionic = ionic.sqrt();
    let ionic_term = (config.csi_ionic_coefficient * sqrt_ionic)
        / (1.0 + config.csi_ionic_denominator_coefficient * sqrt_ionic);

    let temp_c = units::fahrenheit_to_celsius(required.temperature_f);
    let temperature_term = config.csi_temp_numerator / (temp_c + 273.15);

    let csi = required.ph - config.csi_ph_constant
        + required.calcium_hardness.log10()
        + carb_alk.log10()
        - ionic_term
        - temperature_term
        + config.csi_final_constant;

    tracing::debug!(csi, carb_alk, ionic, "computed CSI");

    Ok(CsiBreakdown {
        carbonate_alkalinity: carb_alk,
        ionic_strength: ionic,
        ionic_term,
        temperature_term,
        csi,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsiBand {
    Corrosive,
    SlightlyCorrosive,
    Balanced,
    SlightlyScaleForming,
    ScaleForming,
}

impl CsiBand {
    pub fn from_value(csi: f64) -> CsiBand {
        if csi <= -0.6 {
            CsiBand::Corrosive
        } else if csi <= -0.3 {
            CsiBand::SlightlyCorrosive
        } else if csi <= 0.3 {
            CsiBand::Balanced
        } else if csi <= 0.6 {
            CsiBand::SlightlyScaleForming
        } else {
            CsiBand::ScaleForming
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CsiBand::Corrosive => "Corrosive (aggressive water, will etch surfaces)",
            CsiBand::SlightlyCorrosive => "Slightly corrosive (may cause slow corrosion)",
            CsiBand::Balanced => "Balanced (ideal)",
            CsiBand::SlightlyScaleForming => "Slightly scale-forming (may form light scale)",
            CsiBand::ScaleForming => "Scale-forming (scale formation likely)",
        }
    }
}

impl fmt::Display for CsiBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Human-readable interpretation of a CSI value.
pub fn interpret_csi(csi: f64) -> &'static str {
    CsiBand::from_value(csi).description()
}
