//! The weather variables that can be queried, with their units and provenance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A queryable weather variable.
///
/// Each variable is read from its own gridded dataset and converted to a fixed
/// unit before it reaches the statistics engines.
///
/// # Examples
///
/// ```
/// use weather_probability::WeatherVariable;
///
/// assert_eq!(WeatherVariable::Precipitation.unit(), "mm/day");
/// assert_eq!(WeatherVariable::WindSpeed.to_string(), "wind_speed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherVariable {
    /// Daily mean 2 m air temperature.
    Temperature,
    /// Daily precipitation.
    Precipitation,
    /// 2 m wind speed at the midday sample.
    WindSpeed,
    /// 2 m relative humidity at the midday sample.
    Humidity,
}

/// Name and landing page of the dataset a variable comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub name: String,
    pub url: String,
}

impl WeatherVariable {
    pub const ALL: [WeatherVariable; 4] = [
        WeatherVariable::Temperature,
        WeatherVariable::Precipitation,
        WeatherVariable::WindSpeed,
        WeatherVariable::Humidity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherVariable::Temperature => "temperature",
            WeatherVariable::Precipitation => "precipitation",
            WeatherVariable::WindSpeed => "wind_speed",
            WeatherVariable::Humidity => "humidity",
        }
    }

    /// Unit of the values handed to the engines.
    pub fn unit(&self) -> &'static str {
        match self {
            WeatherVariable::Temperature => "celsius",
            WeatherVariable::Precipitation => "mm/day",
            WeatherVariable::WindSpeed => "m/s",
            WeatherVariable::Humidity => "percent",
        }
    }

    /// Short label of the gridded collection, reported next to the grid point.
    pub fn grid_dataset(&self) -> &'static str {
        match self {
            WeatherVariable::Temperature => "MERRA-2 M2SDNXSLV",
            WeatherVariable::Precipitation => "GPM IMERG v07",
            WeatherVariable::WindSpeed | WeatherVariable::Humidity => "MERRA-2 M2T1NXSLV",
        }
    }

    pub fn data_source(&self) -> DataSource {
        let (name, url) = match self {
            WeatherVariable::Temperature => (
                "MERRA-2 M2SDNXSLV v5.12.4",
                "https://disc.gsfc.nasa.gov/datasets/M2SDNXSLV_5.12.4/summary",
            ),
            WeatherVariable::Precipitation => {
                ("GPM IMERG Final v07", "https://gpm.nasa.gov/data/imerg")
            }
            WeatherVariable::WindSpeed | WeatherVariable::Humidity => (
                "MERRA-2 M2T1NXSLV v5.12.4",
                "https://disc.gsfc.nasa.gov/datasets/M2T1NXSLV_5.12.4/summary",
            ),
        };
        DataSource {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    /// Raw dataset columns the value is derived from, in the order
    /// [`crate::fetch::conversions::derive_value`] expects them.
    pub fn raw_columns(&self) -> &'static [&'static str] {
        match self {
            WeatherVariable::Temperature => &["T2MMEAN"],
            WeatherVariable::Precipitation => &["precipitation"],
            WeatherVariable::WindSpeed => &["U2M", "V2M"],
            WeatherVariable::Humidity => &["QV2M", "T2M", "PS"],
        }
    }

    /// UTC hour sampled from hourly collections; `None` for daily ones.
    pub fn sample_hour(&self) -> Option<u32> {
        match self {
            WeatherVariable::Temperature | WeatherVariable::Precipitation => None,
            WeatherVariable::WindSpeed | WeatherVariable::Humidity => Some(12),
        }
    }
}

impl fmt::Display for WeatherVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
