use crate::error::PoolChemError;
use crate::units;
use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_TEMPERATURE_F: f64 = 32.0;
const MAX_TEMPERATURE_F: f64 = 120.0;
const DEFAULT_TDS: f64 = 1000.0;

/// A tracked water parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    FreeChlorine,
    CombinedChlorine,
    Ph,
    TotalAlkalinity,
    CalciumHardness,
    CyanuricAcid,
    Salt,
    Borates,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::FreeChlorine => write!(f, "FC"),
            Parameter::CombinedChlorine => write!(f, "CC"),
            Parameter::Ph => write!(f, "pH"),
            Parameter::TotalAlkalinity => write!(f, "TA"),
            Parameter::CalciumHardness => write!(f, "CH"),
            Parameter::CyanuricAcid => write!(f, "CYA"),
            Parameter::Salt => write!(f, "Salt"),
            Parameter::Borates => write!(f, "Borates"),
        }
    }
}

/// Immutable snapshot of pool water chemistry.
///
/// Concentrations are in ppm, temperature in °F. Build one with
/// [`WaterState::builder`]; every construction path validates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WaterStateBuilder")]
pub struct WaterState {
    ph: f64,
    temperature_f: f64,
    free_chlorine: f64,
    combined_chlorine: f64,
    total_alkalinity: f64,
    calcium_hardness: f64,
    cyanuric_acid: f64,
    salt: f64,
    borates: f64,
    tds: f64,
}

impl WaterState {
    pub fn builder() -> WaterStateBuilder {
        WaterStateBuilder::default()
    }

    pub fn ph(&self) -> f64 {
        self.ph
    }

    pub fn temperature_f(&self) -> f64 {
        self.temperature_f
    }

    pub fn temperature_c(&self) -> f64 {
        units::fahrenheit_to_celsius(self.temperature_f)
    }

    pub fn free_chlorine(&self) -> f64 {
        self.free_chlorine
    }

    pub fn combined_chlorine(&self) -> f64 {
        self.combined_chlorine
    }

    pub fn total_chlorine(&self) -> f64 {
        self.free_chlorine + self.combined_chlorine
    }

    pub fn total_alkalinity(&self) -> f64 {
        self.total_alkalinity
    }

    pub fn calcium_hardness(&self) -> f64 {
        self.calcium_hardness
    }

    pub fn cyanuric_acid(&self) -> f64 {
        self.cyanuric_acid
    }

    pub fn salt(&self) -> f64 {
        self.salt
    }

    pub fn borates(&self) -> f64 {
        self.borates
    }

    pub fn tds(&self) -> f64 {
        self.tds
    }

    /// Value of a tracked parameter.
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::FreeChlorine => self.free_chlorine,
            Parameter::CombinedChlorine => self.combined_chlorine,
            Parameter::Ph => self.ph,
            Parameter::TotalAlkalinity => self.total_alkalinity,
            Parameter::CalciumHardness => self.calcium_hardness,
            Parameter::CyanuricAcid => self.cyanuric_acid,
            Parameter::Salt => self.salt,
            Parameter::Borates => self.borates,
        }
    }

    /// A builder pre-filled with this state's values, for deriving a new snapshot.
    pub fn to_builder(&self) -> WaterStateBuilder {
        WaterStateBuilder {
            ph: Some(self.ph),
            temperature_f: Some(self.temperature_f),
            free_chlorine: self.free_chlorine,
            combined_chlorine: self.combined_chlorine,
            total_alkalinity: Some(self.total_alkalinity),
            calcium_hardness: Some(self.calcium_hardness),
            cyanuric_acid: self.cyanuric_acid,
            salt: self.salt,
            borates: self.borates,
            tds: self.tds,
        }
    }
}

/// Builder for [`WaterState`]. pH, temperature, TA and CH are required.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WaterStateBuilder {
    ph: Option<f64>,
    temperature_f: Option<f64>,
    free_chlorine: f64,
    combined_chlorine: f64,
    total_alkalinity: Option<f64>,
    calcium_hardness: Option<f64>,
    cyanuric_acid: f64,
    salt: f64,
    borates: f64,
    tds: f64,
}

impl Default for WaterStateBuilder {
    fn default() -> Self {
        Self {
            ph: None,
            temperature_f: None,
            free_chlorine: 0.0,
            combined_chlorine: 0.0,
            total_alkalinity: None,
            calcium_hardness: None,
            cyanuric_acid: 0.0,
            salt: 0.0,
            borates: 0.0,
            tds: DEFAULT_TDS,
        }
    }
}

impl WaterStateBuilder {
    pub fn ph(mut self, ph: f64) -> Self {
        self.ph = Some(ph);
        self
    }
    pub fn temperature_f(mut self, temperature_f: f64) -> Self {
        self.temperature_f = Some(temperature_f);
        self
    }
    pub fn free_chlorine(mut self, ppm: f64) -> Self {
        self.free_chlorine = ppm;
        self
    }
    pub fn combined_chlorine(mut self, ppm: f64) -> Self {
        self.combined_chlorine = ppm;
        self
    }
    pub fn total_alkalinity(mut self, ppm: f64) -> Self {
        self.total_alkalinity = Some(ppm);
        self
    }
    pub fn calcium_hardness(mut self, ppm: f64) -> Self {
        self.calcium_hardness = Some(ppm);
        self
    }
    pub fn cyanuric_acid(mut self, ppm: f64) -> Self {
        self.cyanuric_acid = ppm;
        self
    }
    pub fn salt(mut self, ppm: f64) -> Self {
        self.salt = ppm;
        self
    }
    pub fn borates(mut self, ppm: f64) -> Self {
        self.borates = ppm;
        self
    }
    pub fn tds(mut self, ppm: f64) -> Self {
        self.tds = ppm;
        self
    }

    pub fn build(self) -> Result<WaterState, PoolChemError> {
        let ph = required(self.ph, "ph")?;
        let temperature_f = required(self.temperature_f, "temperature_f")?;
        let total_alkalinity = required(self.total_alkalinity, "total_alkalinity")?;
        let calcium_hardness = required(self.calcium_hardness, "calcium_hardness")?;

        if !(0.0..=14.0).contains(&ph) {
            return Err(PoolChemError::Validation(format!(
                "ph must be between 0 and 14, got {ph}"
            )));
        }
        if !(MIN_TEMPERATURE_F..=MAX_TEMPERATURE_F).contains(&temperature_f) {
            return Err(PoolChemError::Validation(format!(
                "temperature_f must be between {MIN_TEMPERATURE_F} and {MAX_TEMPERATURE_F}, got {temperature_f}"
            )));
        }

        for (name, value) in [
            ("free_chlorine", self.free_chlorine),
            ("combined_chlorine", self.combined_chlorine),
            ("total_alkalinity", total_alkalinity),
            ("calcium_hardness", calcium_hardness),
            ("cyanuric_acid", self.cyanuric_acid),
            ("salt", self.salt),
            ("borates", self.borates),
            ("tds", self.tds),
        ] {
            non_negative(name, value)?;
        }

        Ok(WaterState {
            ph,
            temperature_f,
            free_chlorine: self.free_chlorine,
            combined_chlorine: self.combined_chlorine,
            total_alkalinity,
            calcium_hardness,
            cyanuric_acid: self.cyanuric_acid,
            salt: self.salt,
            borates: self.borates,
            tds: self.tds,
        })
    }
}

impl TryFrom<WaterStateBuilder> for WaterState {
    type Error = PoolChemError;

    fn try_from(builder: WaterStateBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

fn required(value: Option<f64>, name: &str) -> Result<f64, PoolChemError> {
    value.ok_or_else(|| PoolChemError::Validation(format!("{name} is required")))
}

fn non_negative(name: &str, value: f64) -> Result<(), PoolChemError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PoolChemError::Validation(format!(
            "{name} must be a finite, non-negative number, got {value}"
        )))
    }
}

/// Pool category; selects the target ranges that apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolType {
    #[default]
    Traditional,
    Swg,
    Spa,
}

impl fmt::Display for PoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolType::Traditional => write!(f, "traditional"),
            PoolType::Swg => write!(f, "swg"),
            PoolType::Spa => write!(f, "spa"),
        }
    }
}

impl PoolType {
    pub fn from_str_loose(s: &str) -> Option<PoolType> {
        let lower = s.trim().to_lowercase();
        if lower.contains("swg") || lower.contains("salt") {
            Some(PoolType::Swg)
        } else if lower.contains("spa") || lower.contains("hot tub") {
            Some(PoolType::Spa)
        } else if lower.contains("traditional") || lower.contains("chlorine") {
            Some(PoolType::Traditional)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolSurface {
    #[default]
    Plaster,
    Vinyl,
    Fiberglass,
    Painted,
    Pebble,
}

/// Pool configuration. Volume is in US gallons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PoolDef")]
pub struct Pool {
    pub name: Option<String>,
    volume_gallons: f64,
    pub pool_type: PoolType,
    pub surface: PoolSurface,
    pub has_heater: bool,
    pub has_swg: bool,
}

impl Pool {
    pub fn new(volume_gallons: f64, pool_type: PoolType) -> Result<Self, PoolChemError> {
        validate_volume(volume_gallons)?;
        Ok(Self {
            name: None,
            volume_gallons,
            pool_type,
            surface: PoolSurface::default(),
            has_heater: false,
            has_swg: pool_type == PoolType::Swg,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_surface(mut self, surface: PoolSurface) -> Self {
        self.surface = surface;
        self
    }

    pub fn volume_gallons(&self) -> f64 {
        self.volume_gallons
    }

    pub fn volume_liters(&self) -> f64 {
        units::gallons_to_liters(self.volume_gallons)
    }

    /// Whether chlorine is produced by a salt water generator.
    pub fn is_swg(&self) -> bool {
        self.has_swg || self.pool_type == PoolType::Swg
    }
}

#[derive(Deserialize)]
struct PoolDef {
    #[serde(default)]
    name: Option<String>,
    volume_gallons: f64,
    #[serde(default)]
    pool_type: PoolType,
    #[serde(default)]
    surface: PoolSurface,
    #[serde(default)]
    has_heater: bool,
    #[serde(default)]
    has_swg: bool,
}

impl TryFrom<PoolDef> for Pool {
    type Error = PoolChemError;

    fn try_from(def: PoolDef) -> Result<Self, Self::Error> {
        validate_volume(def.volume_gallons)?;
        Ok(Pool {
            name: def.name,
            volume_gallons: def.volume_gallons,
            pool_type: def.pool_type,
            surface: def.surface,
            has_heater: def.has_heater,
            has_swg: def.has_swg,
        })
    }
}

/// Pool volumes feed every dose and effect formula as a divisor or scale.
pub(crate) fn validate_volume(volume: f64) -> Result<(), PoolChemError> {
    if volume.is_finite() && volume > 0.0 {
        Ok(())
    } else {
        Err(PoolChemError::Validation(format!(
            "pool volume must be greater than 0, got {volume}"
        )))
    }
}
