//! Pool and spa water chemistry: saturation indices (CSI, LSI), FC/CYA
//! thresholds, chemical dosing and effect prediction.
//!
//! Every formula constant lives in [`ChemistryConfig`], which is passed
//! explicitly to the functions that need it.

pub mod assessment;
pub mod chemistry;
pub mod config;
pub mod dosing;
pub mod effects;
pub mod error;
pub mod model;
pub mod targets;
pub mod units;

pub use assessment::{assess_water, assess_water_with_ranges, WaterAssessment};
pub use chemistry::{compute_csi, compute_lsi, SaturationInputs};
pub use config::{load_config, parse_config_str, ChemistryConfig};
pub use dosing::{ChemicalId, DosingResult, PhDoseRequest};
pub use effects::{predict_effect, predict_multiple_effects};
pub use error::{ErrorKind, PoolChemError};
pub use model::{Parameter, Pool, PoolSurface, PoolType, WaterState, WaterStateBuilder};
pub use targets::schema::{ParameterRange, TargetRanges};
