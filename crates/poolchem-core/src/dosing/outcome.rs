use crate::dosing::chemicals::{Chemical, ChemicalId, DoseUnit};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A dosing recommendation for one chemical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DosingResult {
    /// The chemical to add.
    pub chemical: ChemicalId,
    /// Amount to add, in `unit`. Zero when no addition is needed.
    pub amount: Decimal,
    pub unit: DoseUnit,
    /// The same dose measured by volume, for products with a volume factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_volume: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_unit: Option<DoseUnit>,
    /// Advisory notes, e.g. why nothing is needed or what else to add.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl DosingResult {
    /// A zero-amount result explaining why no dose is needed.
    pub(crate) fn nothing_needed(chemical: &Chemical, unit: DoseUnit, note: String) -> Self {
        Self {
            chemical: chemical.id,
            amount: Decimal::ZERO,
            unit,
            amount_volume: None,
            volume_unit: None,
            notes: vec![note],
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn chemical_info(&self) -> &'static Chemical {
        self.chemical.chemical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_serialization_skips_empty_fields() {
        let result = DosingResult {
            chemical: ChemicalId::Bleach12_5,
            amount: dec!(40),
            unit: DoseUnit::FluidOunces,
            amount_volume: None,
            volume_unit: None,
            notes: vec![],
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"chemical":"bleach_12.5","amount":"40","unit":"fl_oz"}"#
        );
    }

    #[test]
    fn test_nothing_needed() {
        let chemical = ChemicalId::PoolSalt.chemical();
        let result =
            DosingResult::nothing_needed(chemical, DoseUnit::Pounds, "already there".into());
        assert!(result.is_zero());
        assert_eq!(result.chemical_info().name, "Pool Salt (Sodium Chloride)");
        assert_eq!(result.notes, vec!["already there".to_string()]);
    }
}
