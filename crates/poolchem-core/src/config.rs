//! Formula constants and lookup tables for every calculation.
//!
//! A [`ChemistryConfig`] is passed explicitly to the index, factor, dosing and
//! assessment functions. Defaults follow the TroubleFreePool/PoolMath and
//! Orenda formulas; any subset can be overridden from JSON:
//!
//! ```json
//! { "lsi_constant": 12.14, "temperature_factors": [[32, 0.0], [105, 0.9]] }
//! ```

use crate::chemistry::lookup::LookupTable;
use crate::error::PoolChemError;
use serde::{Deserialize, Serialize};
use std::path::Path;

const TEMPERATURE_FACTORS: &[(f64, f64)] = &[
    (32.0, 0.0),
    (37.0, 0.1),
    (46.0, 0.2),
    (53.0, 0.3),
    (60.0, 0.4),
    (66.0, 0.5),
    (76.0, 0.6),
    (84.0, 0.7),
    (94.0, 0.8),
    (105.0, 0.9),
];

const CYA_CORRECTION_FACTORS: &[(f64, f64)] = &[
    (7.0, 0.22),
    (7.2, 0.27),
    (7.4, 0.31),
    (7.5, 0.33),
    (7.6, 0.33),
    (7.8, 0.35),
    (8.0, 0.38),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChemistryConfig {
    /// Subtracted in `LSI = pH + TF + CF + AF - lsi_constant`.
    pub lsi_constant: f64,

    pub csi_ph_constant: f64,
    pub csi_final_constant: f64,
    /// Numerator of the `1412.5 / (T_C + 273.15)` temperature term.
    pub csi_temp_numerator: f64,
    pub csi_ionic_coefficient: f64,
    pub csi_ionic_denominator_coefficient: f64,

    pub cya_coefficient: f64,
    pub cya_ph_constant: f64,
    pub borate_coefficient: f64,
    pub borate_ph_constant: f64,

    pub ionic_ch_coefficient: f64,
    pub ionic_ta_coefficient: f64,
    pub ionic_divisor: f64,
    pub ionic_nacl_divisor: f64,
    /// Salt bound per ppm CH; `salt - ratio * CH` is the free NaCl.
    pub ch_to_nacl_ratio: f64,

    /// °F → LSI temperature factor.
    pub temperature_factors: LookupTable,
    /// pH → fraction of CYA counted against TA in the LSI alkalinity correction.
    pub cya_correction_factors: LookupTable,

    pub dosing: DosingConstants,
}

impl Default for ChemistryConfig {
    fn default() -> Self {
        Self {
            lsi_constant: 12.1,
            csi_ph_constant: 11.677,
            csi_final_constant: 4.7375,
            csi_temp_numerator: 1412.5,
            csi_ionic_coefficient: 2.56,
            csi_ionic_denominator_coefficient: 1.65,
            cya_coefficient: 0.38772,
            cya_ph_constant: 6.83,
            borate_coefficient: 4.63,
            borate_ph_constant: 9.11,
            ionic_ch_coefficient: 1.5,
            ionic_ta_coefficient: 1.0,
            ionic_divisor: 50045.0,
            ionic_nacl_divisor: 58440.0,
            ch_to_nacl_ratio: 1.1678,
            temperature_factors: LookupTable::from_static(TEMPERATURE_FACTORS),
            cya_correction_factors: LookupTable::from_static(CYA_CORRECTION_FACTORS),
            dosing: DosingConstants::default(),
        }
    }
}

/// Constants of the pH dose model.
///
/// With `t = (T_F - temperature_offset) / temperature_scale`:
/// `adj = poly(ph_temperature_coefficients, t) * (TA + ph_ta_offset) / ph_ta_divisor`
/// and `extra = poly(borate_coefficients, t) * borates * delta_pH`.
/// Both are calibrated for `reference_volume` gallons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DosingConstants {
    pub temperature_offset: f64,
    pub temperature_scale: f64,
    /// Cubic coefficients, constant term first.
    pub ph_temperature_coefficients: [f64; 4],
    pub ph_ta_offset: f64,
    pub ph_ta_divisor: f64,
    /// Cubic coefficients, constant term first.
    pub borate_coefficients: [f64; 4],
    pub reference_volume: f64,
}

impl Default for DosingConstants {
    fn default() -> Self {
        Self {
            temperature_offset: 60.0,
            temperature_scale: 20.0,
            ph_temperature_coefficients: [192.1626, -60.1221, 6.0752, -0.1943],
            ph_ta_offset: 13.91,
            ph_ta_divisor: 114.6,
            borate_coefficients: [-5.476259, 2.414292, -0.355882, 0.01755],
            reference_volume: 10000.0,
        }
    }
}

/// Load a configuration from a JSON file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<ChemistryConfig, PoolChemError> {
    let content = std::fs::read_to_string(path).map_err(|e| PoolChemError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: ChemistryConfig =
        serde_json::from_str(&content).map_err(|e| PoolChemError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    tracing::info!(path = %path.display(), "loaded chemistry configuration");
    Ok(config)
}

/// Parse a configuration from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ChemistryConfig, PoolChemError> {
    let config: ChemistryConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Check that every constant is finite and every divisor is positive.
pub fn validate_config(config: &ChemistryConfig) -> Result<(), PoolChemError> {
    let dosing = &config.dosing;
    let scalars = [
        ("lsi_constant", config.lsi_constant),
        ("csi_ph_constant", config.csi_ph_constant),
        ("csi_final_constant", config.csi_final_constant),
        ("csi_temp_numerator", config.csi_temp_numerator),
        ("csi_ionic_coefficient", config.csi_ionic_coefficient),
        (
            "csi_ionic_denominator_coefficient",
            config.csi_ionic_denominator_coefficient,
        ),
        ("cya_coefficient", config.cya_coefficient),
        ("cya_ph_constant", config.cya_ph_constant),
        ("borate_coefficient", config.borate_coefficient),
        ("borate_ph_constant", config.borate_ph_constant),
        ("ionic_ch_coefficient", config.ionic_ch_coefficient),
        ("ionic_ta_coefficient", config.ionic_ta_coefficient),
        ("ch_to_nacl_ratio", config.ch_to_nacl_ratio),
        ("dosing.temperature_offset", dosing.temperature_offset),
        ("dosing.ph_ta_offset", dosing.ph_ta_offset),
    ];
    for (name, value) in scalars {
        if !value.is_finite() {
            return Err(PoolChemError::ConfigInvalid(format!(
                "{name} must be a finite number"
            )));
        }
    }

    if dosing
        .ph_temperature_coefficients
        .iter()
        .chain(dosing.borate_coefficients.iter())
        .any(|c| !c.is_finite())
    {
        return Err(PoolChemError::ConfigInvalid(
            "dosing polynomial coefficients must be finite".into(),
        ));
    }

    let divisors = [
        ("ionic_divisor", config.ionic_divisor),
        ("ionic_nacl_divisor", config.ionic_nacl_divisor),
        ("dosing.temperature_scale", dosing.temperature_scale),
        ("dosing.ph_ta_divisor", dosing.ph_ta_divisor),
        ("dosing.reference_volume", dosing.reference_volume),
    ];
    for (name, value) in divisors {
        if !(value.is_finite() && value > 0.0) {
            return Err(PoolChemError::ConfigInvalid(format!(
                "{name} must be greater than 0, got {value}"
            )));
        }
    }

    Ok(())
}
