pub mod calculator;
pub mod chemicals;
pub mod outcome;

pub use calculator::{
    calculate_alkalinity_dose, calculate_borate_dose, calculate_calcium_dose,
    calculate_chlorine_dose, calculate_cya_dose, calculate_ph_dose, calculate_salt_dose,
    calculate_water_replacement, PhDoseRequest,
};
pub use chemicals::{all_chemicals, get_chemical, lookup_chemical, Chemical, ChemicalId, DoseUnit};
pub use outcome::DosingResult;
