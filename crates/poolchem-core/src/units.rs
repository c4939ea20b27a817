//! Unit conversions used around the dosing and index formulas.

pub const GALLONS_TO_LITERS: f64 = 3.78541;
pub const CUBIC_FEET_TO_GALLONS: f64 = 7.48052;
pub const OZ_TO_GRAMS: f64 = 28.3495;
pub const LBS_TO_OZ: f64 = 16.0;
pub const FL_OZ_TO_ML: f64 = 29.5735;
pub const IMPERIAL_GALLON_TO_US_GALLON: f64 = 1.20095;

pub fn fahrenheit_to_celsius(temp_f: f64) -> f64 {
    (temp_f - 32.0) * 5.0 / 9.0
}

pub fn celsius_to_fahrenheit(temp_c: f64) -> f64 {
    temp_c * 9.0 / 5.0 + 32.0
}

pub fn gallons_to_liters(gallons: f64) -> f64 {
    gallons * GALLONS_TO_LITERS
}

pub fn liters_to_gallons(liters: f64) -> f64 {
    liters / GALLONS_TO_LITERS
}

pub fn imperial_to_us_gallons(imperial_gallons: f64) -> f64 {
    imperial_gallons * IMPERIAL_GALLON_TO_US_GALLON
}

pub fn cubic_feet_to_gallons(cubic_feet: f64) -> f64 {
    cubic_feet * CUBIC_FEET_TO_GALLONS
}

pub fn oz_to_grams(oz: f64) -> f64 {
    oz * OZ_TO_GRAMS
}

pub fn grams_to_oz(grams: f64) -> f64 {
    grams / OZ_TO_GRAMS
}

pub fn oz_to_lbs(oz: f64) -> f64 {
    oz / LBS_TO_OZ
}

pub fn lbs_to_oz(lbs: f64) -> f64 {
    lbs * LBS_TO_OZ
}

pub fn fl_oz_to_ml(fl_oz: f64) -> f64 {
    fl_oz * FL_OZ_TO_ML
}

pub fn ml_to_fl_oz(ml: f64) -> f64 {
    ml / FL_OZ_TO_ML
}
