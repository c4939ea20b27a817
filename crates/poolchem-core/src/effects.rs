//! Predict how a chemical addition changes the water.
//!
//! Each effect adds `amount / gallons * multiplier` to its parameter; pH
//! multipliers are on a ppm-like scale and are divided by 100. This is a
//! linear approximation, not a titration model.

use crate::dosing::chemicals::ChemicalId;
use crate::error::PoolChemError;
use crate::model::{validate_volume, Parameter, WaterState};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Water chemistry after adding `amount` (in the product's dose unit) of a chemical.
pub fn predict_effect(
    water: &WaterState,
    chemical: ChemicalId,
    amount: f64,
    pool_gallons: f64,
) -> Result<WaterState, PoolChemError> {
    validate_volume(pool_gallons)?;
    if !(amount.is_finite() && amount >= 0.0) {
        return Err(PoolChemError::Validation(format!(
            "chemical amount must be a non-negative number, got {amount}"
        )));
    }

    let product = chemical.chemical();
    let factor = amount / pool_gallons;
    let mut levels = Levels::from(water);

    levels.apply(product.affects, factor * product.primary_effect());
    for &(parameter, multiplier) in product.secondary_effects {
        levels.apply(parameter, factor * multiplier);
    }

    tracing::debug!(chemical = %chemical, amount, pool_gallons, "predicted chemical effect");
    levels.into_state(water)
}

/// Apply additions in order, each on top of the previous prediction.
pub fn predict_multiple_effects(
    water: &WaterState,
    additions: &[(ChemicalId, f64)],
    pool_gallons: f64,
) -> Result<WaterState, PoolChemError> {
    additions
        .iter()
        .try_fold(*water, |current, &(chemical, amount)| {
            predict_effect(&current, chemical, amount, pool_gallons)
        })
}

struct Levels {
    free_chlorine: f64,
    combined_chlorine: f64,
    ph: f64,
    total_alkalinity: f64,
    calcium_hardness: f64,
    cyanuric_acid: f64,
    salt: f64,
    borates: f64,
}

impl From<&WaterState> for Levels {
    fn from(water: &WaterState) -> Self {
        Self {
            free_chlorine: water.free_chlorine(),
            combined_chlorine: water.combined_chlorine(),
            ph: water.ph(),
            total_alkalinity: water.total_alkalinity(),
            calcium_hardness: water.calcium_hardness(),
            cyanuric_acid: water.cyanuric_acid(),
            salt: water.salt(),
            borates: water.borates(),
        }
    }
}

impl Levels {
    fn apply(&mut self, parameter: Parameter, change: f64) {
        match parameter {
            Parameter::FreeChlorine => self.free_chlorine += change,
            Parameter::CombinedChlorine => self.combined_chlorine += change,
            Parameter::Ph => self.ph += change / 100.0,
            Parameter::TotalAlkalinity => self.total_alkalinity += change,
            Parameter::CalciumHardness => self.calcium_hardness += change,
            Parameter::CyanuricAcid => self.cyanuric_acid += change,
            Parameter::Salt => self.salt += change,
            Parameter::Borates => self.borates += change,
        }
    }

    /// Clamp, round to reporting precision and carry temperature and TDS over.
    fn into_state(self, previous: &WaterState) -> Result<WaterState, PoolChemError> {
        previous
            .to_builder()
            .ph(round_to(self.ph.clamp(0.0, 14.0), 2))
            .free_chlorine(round_to(self.free_chlorine.max(0.0), 1))
            .combined_chlorine(round_to(self.combined_chlorine.max(0.0), 1))
            .total_alkalinity(round_to(self.total_alkalinity.max(0.0), 0))
            .calcium_hardness(round_to(self.calcium_hardness.max(0.0), 0))
            .cyanuric_acid(round_to(self.cyanuric_acid.max(0.0), 0))
            .salt(round_to(self.salt.max(0.0), 0))
            .borates(round_to(self.borates.max(0.0), 0))
            .build()
    }
}

/// Round half to even at `dp` places, on the exact binary value of `value`.
fn round_to(value: f64, dp: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .and_then(|d| d.round_dp(dp).to_f64())
        .unwrap_or(value)
}
