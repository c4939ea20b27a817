use crate::error::PoolChemError;
use serde::{Deserialize, Serialize};

/// Piecewise-linear table of `(x, y)` breakpoints with strictly increasing `x`.
///
/// Serialized as a list of `[x, y]` pairs. Inputs outside the table's domain
/// clamp to the first or last value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct LookupTable {
    points: Vec<(f64, f64)>,
}

impl LookupTable {
    pub fn new(points: Vec<(f64, f64)>) -> Result<Self, PoolChemError> {
        if points.is_empty() {
            return Err(PoolChemError::ConfigInvalid(
                "lookup table must have at least one entry".into(),
            ));
        }
        if let Some((x, y)) = points.iter().find(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(PoolChemError::ConfigInvalid(format!(
                "lookup table entry ({x}, {y}) is not finite"
            )));
        }
        if let Some(pair) = points.windows(2).find(|w| w[1].0 <= w[0].0) {
            return Err(PoolChemError::ConfigInvalid(format!(
                "lookup table breakpoints must be strictly increasing ({} then {})",
                pair[0].0, pair[1].0
            )));
        }
        Ok(Self { points })
    }

    /// Build from a fixed table known to be well-formed.
    pub(crate) fn from_static(points: &[(f64, f64)]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn interpolate(&self, x: f64) -> f64 {
        // `new` guarantees at least one entry
        let (first_x, first_y) = self.points[0];
        let (last_x, last_y) = self.points[self.points.len() - 1];

        if x <= first_x {
            return first_y;
        }
        if x >= last_x {
            return last_y;
        }

        self.points
            .windows(2)
            .find(|w| w[0].0 <= x && x < w[1].0)
            .map(|w| {
                let (x1, y1) = w[0];
                let (x2, y2) = w[1];
                y1 + (y2 - y1) * (x - x1) / (x2 - x1)
            })
            .unwrap_or(last_y)
    }
}

impl TryFrom<Vec<(f64, f64)>> for LookupTable {
    type Error = PoolChemError;

    fn try_from(points: Vec<(f64, f64)>) -> Result<Self, Self::Error> {
        LookupTable::new(points)
    }
}

impl From<LookupTable> for Vec<(f64, f64)> {
    fn from(table: LookupTable) -> Self {
        table.points
    }
}
