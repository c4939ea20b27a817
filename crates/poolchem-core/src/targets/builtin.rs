use crate::error::PoolChemError;
use crate::model::PoolType;
use crate::targets::schema::TargetRanges;

const TRADITIONAL_JSON: &str = include_str!("../../presets/traditional.json");
const SWG_JSON: &str = include_str!("../../presets/swg.json");
const SPA_JSON: &str = include_str!("../../presets/spa.json");

/// Available predefined target ranges.
pub const PRESETS: &[&str] = &["traditional", "swg", "spa"];

/// Load predefined target ranges by pool-type name.
///
/// Names are matched loosely, so "Salt water" selects the SWG preset and
/// "hot tub" the spa one.
pub fn load_preset(name: &str) -> Result<TargetRanges, PoolChemError> {
    let pool_type = PoolType::from_str_loose(name).ok_or_else(|| {
        PoolChemError::ConfigInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))
    })?;
    target_ranges_for(pool_type)
}

/// Target ranges for a pool category.
pub fn target_ranges_for(pool_type: PoolType) -> Result<TargetRanges, PoolChemError> {
    let json = match pool_type {
        PoolType::Traditional => TRADITIONAL_JSON,
        PoolType::Swg => SWG_JSON,
        PoolType::Spa => SPA_JSON,
    };
    let ranges: TargetRanges = serde_json::from_str(json)?;
    Ok(ranges)
}
