//! Intermediate quantities shared by the LSI and CSI engines.

use crate::config::ChemistryConfig;
use crate::error::PoolChemError;

/// Carbonate alkalinity (ppm as CaCO3): total alkalinity minus the buffering
/// contributed by cyanurate and borate.
///
/// `CarbAlk = TA - (k_cya·CYA)/(1 + 10^(pK_cya - pH)) - (k_b·Borate)/(1 + 10^(pK_b - pH))`,
/// clamped at zero.
pub fn carbonate_alkalinity(
    total_alkalinity: f64,
    cyanuric_acid: f64,
    ph: f64,
    borates: f64,
    config: &ChemistryConfig,
) -> f64 {
    let cya_correction = (config.cya_coefficient * cyanuric_acid)
        / (1.0 + 10f64.powf(config.cya_ph_constant - ph));

    let borate_correction = if borates > 0.0 {
        (config.borate_coefficient * borates) / (1.0 + 10f64.powf(config.borate_ph_constant - ph))
    } else {
        0.0
    };

    let carbonate = total_alkalinity - cya_correction - borate_correction;
    if carbonate < 0.0 {
        tracing::warn!(
            total_alkalinity,
            cyanuric_acid,
            borates,
            "CYA/borate correction exceeds total alkalinity; carbonate alkalinity clamped to 0"
        );
        return 0.0;
    }
    carbonate
}

/// Ionic strength of the water, from hardness, alkalinity and the salt not
/// bound to calcium.
pub fn ionic_strength(
    calcium_hardness: f64,
    total_alkalinity: f64,
    salt: f64,
    config: &ChemistryConfig,
) -> f64 {
    let excess_nacl = (salt - config.ch_to_nacl_ratio * calcium_hardness).max(0.0);
    let ionic = (config.ionic_ch_coefficient * calcium_hardness
        + config.ionic_ta_coefficient * total_alkalinity)
        / config.ionic_divisor
        + excess_nacl / config.ionic_nacl_divisor;
    ionic.max(0.0)
}

/// LSI calcium factor: `log10(CH)`.
pub fn calcium_factor(calcium_hardness: f64) -> Result<f64, PoolChemError> {
    positive_log10(calcium_hardness, "Calcium hardness")
}

/// LSI alkalinity factor: `log10(alkalinity)`. Pass carbonate alkalinity here.
pub fn alkalinity_factor(alkalinity: f64) -> Result<f64, PoolChemError> {
    positive_log10(alkalinity, "Alkalinity")
}

/// LSI temperature factor for a water temperature in °F.
pub fn temperature_factor(temperature_f: f64, config: &ChemistryConfig) -> f64 {
    config.temperature_factors.interpolate(temperature_f)
}

/// Fraction of CYA subtracted from TA in the LSI alkalinity correction.
pub fn cya_correction_factor(ph: f64, config: &ChemistryConfig) -> f64 {
    config.cya_correction_factors.interpolate(ph)
}

fn positive_log10(value: f64, name: &str) -> Result<f64, PoolChemError> {
    if value > 0.0 {
        Ok(value.log10())
    } else {
        Err(PoolChemError::Calculation(format!(
            "{name} must be greater than 0, got {value}"
        )))
    }
}
