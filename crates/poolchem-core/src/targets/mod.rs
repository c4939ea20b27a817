pub mod builtin;
pub mod schema;

use crate::error::PoolChemError;
use schema::{ParameterRange, TargetRanges};
use std::path::Path;

pub use builtin::{load_preset, target_ranges_for, PRESETS};
pub use schema::RangeStatus;

/// Load target ranges from a JSON file.
pub fn load_target_ranges(path: &Path) -> Result<TargetRanges, PoolChemError> {
    let content = std::fs::read_to_string(path).map_err(|e| PoolChemError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let ranges: TargetRanges =
        serde_json::from_str(&content).map_err(|e| PoolChemError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_target_ranges(&ranges)?;
    tracing::info!(path = %path.display(), name = %ranges.name, "loaded target ranges");
    Ok(ranges)
}

/// Parse target ranges from a JSON string (no file path context).
pub fn parse_target_ranges_str(json: &str) -> Result<TargetRanges, PoolChemError> {
    let ranges: TargetRanges = serde_json::from_str(json)?;
    validate_target_ranges(&ranges)?;
    Ok(ranges)
}

/// Check that every range is ordered `minimum <= target <= maximum`.
pub fn validate_target_ranges(ranges: &TargetRanges) -> Result<(), PoolChemError> {
    if ranges.name.trim().is_empty() {
        return Err(PoolChemError::ConfigInvalid(
            "target ranges name must not be empty".into(),
        ));
    }

    let mut named = vec![
        ("ph", ranges.ph),
        ("total_alkalinity", ranges.total_alkalinity),
        ("calcium_hardness", ranges.calcium_hardness),
        ("cyanuric_acid", ranges.cyanuric_acid),
        ("csi", ranges.csi),
    ];
    named.extend(ranges.salt.map(|r| ("salt", r)));
    named.extend(ranges.borates.map(|r| ("borates", r)));

    for (name, range) in named {
        validate_range(name, &range)?;
    }
    Ok(())
}

fn validate_range(name: &str, range: &ParameterRange) -> Result<(), PoolChemError> {
    let ordered = range.minimum <= range.target && range.target <= range.maximum;
    if !ordered {
        return Err(PoolChemError::ConfigInvalid(format!(
            "range '{}' must satisfy minimum <= target <= maximum (got {} / {} / {})",
            name, range.minimum, range.target, range.maximum
        )));
    }
    Ok(())
}
