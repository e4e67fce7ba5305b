//! Converts raw dataset fields into the units the engines expect.

use crate::types::variable::WeatherVariable;

const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Speed from eastward and northward components.
pub fn wind_speed(u: f64, v: f64) -> f64 {
    (u * u + v * v).sqrt()
}

/// Relative humidity (percent, clipped to `[0, 100]`) from specific humidity
/// (kg/kg), air temperature (K) and surface pressure (Pa).
pub fn relative_humidity(specific_humidity: f64, temperature_k: f64, pressure_pa: f64) -> f64 {
    let temperature_c = kelvin_to_celsius(temperature_k);
    // saturation vapour pressure, Pa
    let es = 611.2 * (17.67 * temperature_c / (temperature_k - 29.65)).exp();
    let rh = 100.0 * (specific_humidity * pressure_pa) / (0.622 * es);
    rh.clamp(0.0, 100.0)
}

/// Derives the variable's value from its raw columns, given in the order of
/// [`WeatherVariable::raw_columns`]. Returns `None` if a needed field is absent
/// or the result is not a number.
pub fn derive_value(variable: WeatherVariable, raw: &[Option<f64>]) -> Option<f64> {
    let field = |i: usize| raw.get(i).copied().flatten().filter(|x| !x.is_nan());
    let value = match variable {
        WeatherVariable::Temperature => kelvin_to_celsius(field(0)?),
        WeatherVariable::Precipitation => field(0)?,
        WeatherVariable::WindSpeed => wind_speed(field(0)?, field(1)?),
        WeatherVariable::Humidity => relative_humidity(field(0)?, field(1)?, field(2)?),
    };
    Some(value).filter(|v| !v.is_nan())
}
