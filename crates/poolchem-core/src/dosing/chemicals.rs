//! Static registry of pool chemicals and their dosing multipliers.
//!
//! Multipliers follow the PoolMath tables: `dose = Δppm * gallons / multiplier`.
//! Secondary effects use the same model and carry their own sign.

use crate::error::PoolChemError;
use crate::model::Parameter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ChemicalId as Id;
use DoseUnit::{FluidOunces, Ounces};
use Parameter::{
    CalciumHardness as Ch, CyanuricAcid as Cya, FreeChlorine as Fc, Ph, Salt, TotalAlkalinity as Ta,
};

/// Muriatic acid multipliers are relative to 31.45% (20° Baumé).
const MURIATIC_PH: f64 = 240.15;
const MURIATIC_TA: f64 = -3911.47;

/// Identifier of a chemical product in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChemicalId {
    #[serde(rename = "bleach_6")]
    Bleach6,
    #[serde(rename = "bleach_8.25")]
    Bleach8_25,
    #[serde(rename = "bleach_10")]
    Bleach10,
    #[serde(rename = "bleach_12.5")]
    Bleach12_5,
    #[serde(rename = "trichlor")]
    Trichlor,
    #[serde(rename = "dichlor")]
    Dichlor,
    #[serde(rename = "cal_hypo_48")]
    CalHypo48,
    #[serde(rename = "cal_hypo_53")]
    CalHypo53,
    #[serde(rename = "cal_hypo_65")]
    CalHypo65,
    #[serde(rename = "cal_hypo_73")]
    CalHypo73,
    #[serde(rename = "lithium_hypo")]
    LithiumHypo,
    #[serde(rename = "chlorine_gas")]
    ChlorineGas,
    #[serde(rename = "muriatic_acid_14.5")]
    MuriaticAcid14_5,
    #[serde(rename = "muriatic_acid_15.7")]
    MuriaticAcid15_7,
    #[serde(rename = "muriatic_acid_20")]
    MuriaticAcid20,
    #[serde(rename = "muriatic_acid_28.3")]
    MuriaticAcid28_3,
    #[serde(rename = "muriatic_acid_31.45")]
    MuriaticAcid31_45,
    #[serde(rename = "muriatic_acid_34.6")]
    MuriaticAcid34_6,
    #[serde(rename = "dry_acid")]
    DryAcid,
    #[serde(rename = "soda_ash")]
    SodaAsh,
    #[serde(rename = "borax")]
    Borax,
    #[serde(rename = "baking_soda")]
    BakingSoda,
    #[serde(rename = "calcium_chloride_anhydrous")]
    CalciumChlorideAnhydrous,
    #[serde(rename = "calcium_chloride_dihydrate")]
    CalciumChlorideDihydrate,
    #[serde(rename = "cya_granular")]
    CyaGranular,
    #[serde(rename = "cya_liquid")]
    CyaLiquid,
    #[serde(rename = "pool_salt")]
    PoolSalt,
    #[serde(rename = "borax_borate")]
    BoraxBorate,
    #[serde(rename = "boric_acid")]
    BoricAcid,
    #[serde(rename = "sodium_tetraborate_pentahydrate")]
    SodiumTetraboratePentahydrate,
}

impl ChemicalId {
    /// Every registered chemical, in registry order.
    pub const ALL: [ChemicalId; 30] = [
        ChemicalId::Bleach6,
        ChemicalId::Bleach8_25,
        ChemicalId::Bleach10,
        ChemicalId::Bleach12_5,
        ChemicalId::Trichlor,
        ChemicalId::Dichlor,
        ChemicalId::CalHypo48,
        ChemicalId::CalHypo53,
        ChemicalId::CalHypo65,
        ChemicalId::CalHypo73,
        ChemicalId::LithiumHypo,
        ChemicalId::ChlorineGas,
        ChemicalId::MuriaticAcid14_5,
        ChemicalId::MuriaticAcid15_7,
        ChemicalId::MuriaticAcid20,
        ChemicalId::MuriaticAcid28_3,
        ChemicalId::MuriaticAcid31_45,
        ChemicalId::MuriaticAcid34_6,
        ChemicalId::DryAcid,
        ChemicalId::SodaAsh,
        ChemicalId::Borax,
        ChemicalId::BakingSoda,
        ChemicalId::CalciumChlorideAnhydrous,
        ChemicalId::CalciumChlorideDihydrate,
        ChemicalId::CyaGranular,
        ChemicalId::CyaLiquid,
        ChemicalId::PoolSalt,
        ChemicalId::BoraxBorate,
        ChemicalId::BoricAcid,
        ChemicalId::SodiumTetraboratePentahydrate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChemicalId::Bleach6 => "bleach_6",
            ChemicalId::Bleach8_25 => "bleach_8.25",
            ChemicalId::Bleach10 => "bleach_10",
            ChemicalId::Bleach12_5 => "bleach_12.5",
            ChemicalId::Trichlor => "trichlor",
            ChemicalId::Dichlor => "dichlor",
            ChemicalId::CalHypo48 => "cal_hypo_48",
            ChemicalId::CalHypo53 => "cal_hypo_53",
            ChemicalId::CalHypo65 => "cal_hypo_65",
            ChemicalId::CalHypo73 => "cal_hypo_73",
            ChemicalId::LithiumHypo => "lithium_hypo",
            ChemicalId::ChlorineGas => "chlorine_gas",
            ChemicalId::MuriaticAcid14_5 => "muriatic_acid_14.5",
            ChemicalId::MuriaticAcid15_7 => "muriatic_acid_15.7",
            ChemicalId::MuriaticAcid20 => "muriatic_acid_20",
            ChemicalId::MuriaticAcid28_3 => "muriatic_acid_28.3",
            ChemicalId::MuriaticAcid31_45 => "muriatic_acid_31.45",
            ChemicalId::MuriaticAcid34_6 => "muriatic_acid_34.6",
            ChemicalId::DryAcid => "dry_acid",
            ChemicalId::SodaAsh => "soda_ash",
            ChemicalId::Borax => "borax",
            ChemicalId::BakingSoda => "baking_soda",
            ChemicalId::CalciumChlorideAnhydrous => "calcium_chloride_anhydrous",
            ChemicalId::CalciumChlorideDihydrate => "calcium_chloride_dihydrate",
            ChemicalId::CyaGranular => "cya_granular",
            ChemicalId::CyaLiquid => "cya_liquid",
            ChemicalId::PoolSalt => "pool_salt",
            ChemicalId::BoraxBorate => "borax_borate",
            ChemicalId::BoricAcid => "boric_acid",
            ChemicalId::SodiumTetraboratePentahydrate => "sodium_tetraborate_pentahydrate",
        }
    }

    /// The registry entry for this chemical.
    pub fn chemical(self) -> &'static Chemical {
        // CHEMICALS is laid out in declaration order; checked by tests.
        &CHEMICALS[self as usize]
    }
}

impl fmt::Display for ChemicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChemicalId {
    type Err = PoolChemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        ChemicalId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == key)
            .ok_or_else(|| PoolChemError::ChemicalNotFound(s.to_string()))
    }
}

/// Unit a dose is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoseUnit {
    #[serde(rename = "oz")]
    Ounces,
    #[serde(rename = "fl_oz")]
    FluidOunces,
    #[serde(rename = "lbs")]
    Pounds,
    #[serde(rename = "cups")]
    Cups,
}

impl DoseUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoseUnit::Ounces => "oz",
            DoseUnit::FluidOunces => "fl_oz",
            DoseUnit::Pounds => "lbs",
            DoseUnit::Cups => "cups",
        }
    }

    pub fn is_weight(&self) -> bool {
        matches!(self, DoseUnit::Ounces | DoseUnit::Pounds)
    }
}

impl fmt::Display for DoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dosing properties of one chemical product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chemical {
    pub id: ChemicalId,
    pub name: &'static str,
    /// Parameter the product is dosed for.
    pub affects: Parameter,
    /// Positive by convention; see [`Chemical::lowers_primary`].
    pub multiplier: f64,
    pub unit: DoseUnit,
    /// Weight → volume factor (e.g. oz → cups) where the product is measured by volume.
    pub volume_factor: Option<f64>,
    /// Signed multipliers for other parameters the product moves.
    pub secondary_effects: &'static [(Parameter, f64)],
    /// Acids lower their primary parameter even though the multiplier is positive.
    pub lowers_primary: bool,
    /// oz of 31.45% muriatic acid needed per oz of product to neutralize its pH rise.
    pub neutralizing_acid_ratio: Option<f64>,
}

impl Chemical {
    /// Primary multiplier with the direction of the change applied.
    pub fn primary_effect(&self) -> f64 {
        if self.lowers_primary {
            -self.multiplier
        } else {
            self.multiplier
        }
    }

    /// Signed multiplier for a secondary parameter, if the product moves it.
    pub fn secondary_effect(&self, parameter: Parameter) -> Option<f64> {
        self.secondary_effects
            .iter()
            .find(|(p, _)| *p == parameter)
            .map(|(_, m)| *m)
    }

    /// Unit of `amount * volume_factor`: cups for dry products, else the product's own unit.
    pub fn volume_unit(&self) -> DoseUnit {
        if self.unit.is_weight() {
            DoseUnit::Cups
        } else {
            self.unit
        }
    }
}

const fn chemical(
    id: ChemicalId,
    name: &'static str,
    affects: Parameter,
    multiplier: f64,
    unit: DoseUnit,
    volume_factor: Option<f64>,
    secondary_effects: &'static [(Parameter, f64)],
) -> Chemical {
    Chemical {
        id,
        name,
        affects,
        multiplier,
        unit,
        volume_factor,
        secondary_effects,
        lowers_primary: false,
        neutralizing_acid_ratio: None,
    }
}

/// A liquid acid dosed in fl oz that lowers pH.
const fn acid(
    id: ChemicalId,
    name: &'static str,
    multiplier: f64,
    secondary_effects: &'static [(Parameter, f64)],
) -> Chemical {
    Chemical {
        lowers_primary: true,
        ..chemical(
            id,
            name,
            Parameter::Ph,
            multiplier,
            DoseUnit::FluidOunces,
            None,
            secondary_effects,
        )
    }
}

static CHEMICALS: [Chemical; 30] = [
    chemical(Id::Bleach6, "Bleach 6%", Fc, 600.0, FluidOunces, None, &[]),
    chemical(Id::Bleach8_25, "Bleach 8.25%", Fc, 825.0, FluidOunces, None, &[]),
    chemical(Id::Bleach10, "Bleach 10%", Fc, 1000.0, FluidOunces, None, &[]),
    chemical(Id::Bleach12_5, "Bleach 12.5%", Fc, 1250.0, FluidOunces, None, &[]),
    chemical(
        Id::Trichlor,
        "Trichlor (90%)",
        Fc,
        6854.95,
        Ounces,
        Some(0.9351),
        &[(Cya, 4159.41), (Ph, -367.0), (Salt, 5600.0)],
    ),
    chemical(
        Id::Dichlor,
        "Dichlor (56%)",
        Fc,
        4149.03,
        Ounces,
        Some(0.9352),
        &[(Cya, 3776.46), (Ph, -158.0), (Salt, 3384.0)],
    ),
    chemical(
        Id::CalHypo48,
        "Cal-Hypo 48%",
        Fc,
        3565.44,
        Ounces,
        Some(0.9352),
        &[(Ch, 2938.56)],
    ),
    chemical(
        Id::CalHypo53,
        "Cal-Hypo 53%",
        Fc,
        3936.84,
        Ounces,
        Some(0.9352),
        &[(Ch, 3245.92)],
    ),
    chemical(
        Id::CalHypo65,
        "Cal-Hypo 65%",
        Fc,
        5422.41,
        Ounces,
        Some(0.9352),
        &[(Ch, 3827.09), (Salt, 5500.0)],
    ),
    chemical(
        Id::CalHypo73,
        "Cal-Hypo 73%",
        Fc,
        6092.62,
        Ounces,
        Some(0.9352),
        &[(Ch, 4295.56), (Salt, 6175.0)],
    ),
    chemical(
        Id::LithiumHypo,
        "Lithium Hypochlorite (35%)",
        Fc,
        2637.5,
        Ounces,
        Some(0.978),
        &[(Salt, 2711.0)],
    ),
    chemical(
        Id::ChlorineGas,
        "Chlorine Gas",
        Fc,
        7489.4,
        Ounces,
        None,
        &[(Ph, -625.0), (Salt, 6140.0)],
    ),
    acid(
        Id::MuriaticAcid14_5,
        "Muriatic Acid 14.5% (10° Baumé)",
        MURIATIC_PH / 2.16897,
        &[(Ta, MURIATIC_TA / 2.16897)],
    ),
    acid(
        Id::MuriaticAcid15_7,
        "Muriatic Acid 15.7%",
        MURIATIC_PH / 2.0,
        &[(Ta, MURIATIC_TA / 2.0)],
    ),
    acid(
        Id::MuriaticAcid20,
        "Muriatic Acid 20% (22° Baumé)",
        MURIATIC_PH / 1.5725,
        &[(Ta, MURIATIC_TA / 1.5725)],
    ),
    acid(
        Id::MuriaticAcid28_3,
        "Muriatic Acid 28.3%",
        MURIATIC_PH / 1.11111,
        &[(Ta, MURIATIC_TA / 1.11111)],
    ),
    acid(
        Id::MuriaticAcid31_45,
        "Muriatic Acid 31.45% (20° Baumé)",
        MURIATIC_PH,
        &[(Ta, MURIATIC_TA)],
    ),
    acid(
        Id::MuriaticAcid34_6,
        "Muriatic Acid 34.6%",
        MURIATIC_PH / 0.909091,
        &[(Ta, MURIATIC_TA / 0.909091)],
    ),
    Chemical {
        lowers_primary: true,
        ..chemical(
            Id::DryAcid,
            "Dry Acid (Sodium Bisulfate)",
            Ph,
            178.66,
            Ounces,
            Some(0.6657),
            &[(Ta, -2909.47)],
        )
    },
    chemical(
        Id::SodaAsh,
        "Soda Ash (Sodium Carbonate)",
        Ph,
        218.68,
        Ounces,
        Some(0.8715),
        &[(Ta, 7072.46)],
    ),
    chemical(
        Id::Borax,
        "Borax (20 Mule Team)",
        Ph,
        110.05,
        Ounces,
        Some(0.9586),
        &[(Parameter::Borates, 849.271)],
    ),
    chemical(
        Id::BakingSoda,
        "Baking Soda (Sodium Bicarbonate)",
        Ta,
        4259.15,
        Ounces,
        Some(0.7988),
        &[(Ph, 9.091)],
    ),
    chemical(
        Id::CalciumChlorideAnhydrous,
        "Calcium Chloride Anhydrous (94-97%)",
        Ch,
        6754.11,
        Ounces,
        Some(0.7988),
        &[],
    ),
    chemical(
        Id::CalciumChlorideDihydrate,
        "Calcium Chloride Dihydrate/Flake (77-80%)",
        Ch,
        5098.82,
        Ounces,
        Some(1.148),
        &[],
    ),
    chemical(
        Id::CyaGranular,
        "Cyanuric Acid Granular",
        Cya,
        7489.51,
        Ounces,
        Some(1.042),
        &[(Ph, -138.8)],
    ),
    chemical(
        Id::CyaLiquid,
        "Cyanuric Acid Liquid",
        Cya,
        2890.0,
        FluidOunces,
        None,
        &[],
    ),
    chemical(
        Id::PoolSalt,
        "Pool Salt (Sodium Chloride)",
        Salt,
        7468.64,
        Ounces,
        None,
        &[],
    ),
    chemical(
        Id::BoraxBorate,
        "Borax (for borate level)",
        Parameter::Borates,
        849.271,
        Ounces,
        Some(1.075),
        &[(Ph, 110.05)],
    ),
    Chemical {
        neutralizing_acid_ratio: Some(0.624),
        ..chemical(
            Id::BoricAcid,
            "Boric Acid",
            Parameter::Borates,
            1309.52,
            Ounces,
            Some(0.5296),
            &[],
        )
    },
    Chemical {
        neutralizing_acid_ratio: Some(0.4765),
        ..chemical(
            Id::SodiumTetraboratePentahydrate,
            "Sodium Tetraborate Pentahydrate (ProTeam Supreme)",
            Parameter::Borates,
            1111.69,
            Ounces,
            Some(0.9586),
            &[],
        )
    },
];

/// Registry entry for a chemical id.
pub fn get_chemical(id: ChemicalId) -> &'static Chemical {
    id.chemical()
}

/// Look up a chemical by its string identifier (e.g. `"bleach_8.25"`).
pub fn lookup_chemical(key: &str) -> Result<&'static Chemical, PoolChemError> {
    key.parse::<ChemicalId>().map(ChemicalId::chemical)
}

/// All registered chemicals.
pub fn all_chemicals() -> &'static [Chemical] {
    &CHEMICALS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_registry_order_matches_ids() {
        for (i, id) in ChemicalId::ALL.iter().enumerate() {
            assert_eq!(CHEMICALS[i].id, *id, "registry slot {i}");
            assert_eq!(id.chemical().id, *id);
        }
    }

    #[test]
    fn test_parse_identifiers() {
        assert_eq!(
            "bleach_8.25".parse::<ChemicalId>().unwrap(),
            ChemicalId::Bleach8_25
        );
        assert_eq!(
            " Muriatic_Acid_31.45 ".parse::<ChemicalId>().unwrap(),
            ChemicalId::MuriaticAcid31_45
        );
        for id in ChemicalId::ALL {
            assert_eq!(id.as_str().parse::<ChemicalId>().unwrap(), id);
        }
    }

    #[test]
    fn test_unknown_chemical_is_lookup_error() {
        let err = lookup_chemical("unobtainium").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
        assert!(err.to_string().contains("unobtainium"));
    }

    #[test]
    fn test_serde_uses_identifier_strings() {
        let json = serde_json::to_string(&ChemicalId::CalHypo65).unwrap();
        assert_eq!(json, "\"cal_hypo_65\"");
        let id: ChemicalId = serde_json::from_str("\"bleach_12.5\"").unwrap();
        assert_eq!(id, ChemicalId::Bleach12_5);
    }

    #[test]
    fn test_muriatic_strengths_scale_from_reference() {
        let reference = get_chemical(ChemicalId::MuriaticAcid31_45);
        assert_eq!(reference.multiplier, 240.15);
        assert_eq!(reference.secondary_effect(Parameter::TotalAlkalinity), Some(-3911.47));

        let weak = get_chemical(ChemicalId::MuriaticAcid15_7);
        assert!((weak.multiplier - 120.075).abs() < 1e-9);
        assert!((weak.secondary_effect(Parameter::TotalAlkalinity).unwrap() + 1955.735).abs() < 1e-9);
        for id in [
            ChemicalId::MuriaticAcid14_5,
            ChemicalId::MuriaticAcid20,
            ChemicalId::MuriaticAcid28_3,
            ChemicalId::MuriaticAcid34_6,
        ] {
            let c = get_chemical(id);
            assert_eq!(c.unit, DoseUnit::FluidOunces);
            assert!(c.lowers_primary);
            let ratio = c.secondary_effect(Parameter::TotalAlkalinity).unwrap() / c.multiplier;
            assert!((ratio - MURIATIC_TA / MURIATIC_PH).abs() < 1e-9);
        }
    }

    #[test]
    fn test_secondary_effects() {
        let trichlor = get_chemical(ChemicalId::Trichlor);
        assert_eq!(trichlor.secondary_effect(Parameter::CyanuricAcid), Some(4159.41));
        assert_eq!(trichlor.secondary_effect(Parameter::Ph), Some(-367.0));
        assert_eq!(trichlor.secondary_effect(Parameter::CalciumHardness), None);
    }

    #[test]
    fn test_acids_lower_primary() {
        assert!(get_chemical(ChemicalId::DryAcid).primary_effect() < 0.0);
        assert!(get_chemical(ChemicalId::SodaAsh).primary_effect() > 0.0);
        assert_eq!(get_chemical(ChemicalId::Bleach6).primary_effect(), 600.0);
    }

    #[test]
    fn test_volume_units() {
        assert_eq!(get_chemical(ChemicalId::BakingSoda).volume_unit(), DoseUnit::Cups);
        assert_eq!(
            get_chemical(ChemicalId::Bleach10).volume_unit(),
            DoseUnit::FluidOunces
        );
    }

    #[test]
    fn test_neutralizing_ratios() {
        assert_eq!(get_chemical(ChemicalId::BoricAcid).neutralizing_acid_ratio, Some(0.624));
        assert_eq!(
            get_chemical(ChemicalId::SodiumTetraboratePentahydrate).neutralizing_acid_ratio,
            Some(0.4765)
        );
        assert_eq!(get_chemical(ChemicalId::BoraxBorate).neutralizing_acid_ratio, None);
    }

    #[test]
    fn test_all_multipliers_positive() {
        assert_eq!(all_chemicals().len(), ChemicalId::ALL.len());
        assert!(all_chemicals().iter().all(|c| c.multiplier > 0.0));
    }
}
