//! Langelier Saturation Index, Orenda style: `LSI = pH + TF + CF + AF - 12.1`.
//!
//! AF uses carbonate alkalinity from the table-based correction
//! `TA - CYA·factor(pH)`.

use super::factors::{
    alkalinity_factor, calcium_factor, cya_correction_factor, temperature_factor,
};
use super::SaturationInputs;
use crate::config::ChemistryConfig;
use crate::error::PoolChemError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LsiBreakdown {
    pub carbonate_alkalinity: f64,
    pub temperature_factor: f64,
    pub calcium_factor: f64,
    pub alkalinity_factor: f64,
    pub lsi: f64,
}

impl LsiBreakdown {
    pub fn band(&self) -> LsiBand {
        LsiBand::from_value(self.lsi)
    }
}

pub fn compute_lsi(
    inputs: &SaturationInputs,
    config: &ChemistryConfig,
) -> Result<f64, PoolChemError> {
    lsi_breakdown(inputs, config).map(|b| b.lsi)
}

pub fn lsi_breakdown(
    inputs: &SaturationInputs,
    config: &ChemistryConfig,
) -> Result<LsiBreakdown, PoolChemError> {
    let required = inputs.require("LSI")?;

    let carb_alk = required.total_alkalinity
        - inputs.cyanuric_acid * cya_correction_factor(required.ph, config);
    if carb_alk <= 0.0 {
        return Err(PoolChemError::Calculation(
            "Carbonate alkalinity is too low (CYA correction exceeds TA)".into(),
        ));
    }

    let tf = temperature_factor(required.temperature_f, config);
    let cf = calcium_factor(required.calcium_hardness)?;
    let af = alkalinity_factor(carb_alk)?;
    let lsi = required.ph + tf + cf + af - config.lsi_constant;

    tracing::debug!(lsi, tf, cf, af, "computed LSI");

    Ok(LsiBreakdown {
        carbonate_alkalinity: carb_alk,
        temperature_factor: tf,
        calcium_factor: cf,
        alkalinity_factor: af,
        lsi,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LsiBand {
    Aggressive,
    Acceptable,
    Ideal,
    OverSaturated,
}

impl LsiBand {
    pub fn from_value(lsi: f64) -> LsiBand {
        if lsi <= -0.31 {
            LsiBand::Aggressive
        } else if lsi < 0.0 {
            LsiBand::Acceptable
        } else if lsi <= 0.30 {
            LsiBand::Ideal
        } else {
            LsiBand::OverSaturated
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LsiBand::Aggressive => "Red - Aggressive (corrosive, will etch surfaces)",
            LsiBand::Acceptable => "Yellow - Acceptable (close to balanced)",
            LsiBand::Ideal => "Green - Ideal (perfectly balanced)",
            LsiBand::OverSaturated => "Purple - Over-saturated (scale-forming)",
        }
    }
}

impl fmt::Display for LsiBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

pub fn interpret_lsi(lsi: f64) -> &'static str {
    LsiBand::from_value(lsi).description()
}
