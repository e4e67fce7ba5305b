use haversine::{distance, Location as HaversineLocation, Units};
use serde::{Deserialize, Serialize};

/// How far the sampled grid point lies from the requested coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridOffset {
    /// Great-circle distance (haversine, earth radius 6371 km).
    pub offset_km: f64,
    /// `actual_lat - requested_lat`, in degrees.
    pub offset_lat: f64,
    /// `actual_lon - requested_lon`, in degrees.
    pub offset_lon: f64,
}

/// Computes the [`GridOffset`] between a requested point and the grid point
/// actually sampled. Inputs are decimal degrees.
pub fn compute_grid_offset(
    requested_lat: f64,
    requested_lon: f64,
    actual_lat: f64,
    actual_lon: f64,
) -> GridOffset {
    GridOffset {
        offset_km: great_circle_km(requested_lat, requested_lon, actual_lat, actual_lon),
        offset_lat: actual_lat - requested_lat,
        offset_lon: actual_lon - requested_lon,
    }
}

pub(crate) fn great_circle_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance(
        HaversineLocation {
            latitude: lat1,
            longitude: lon1,
        },
        HaversineLocation {
            latitude: lat2,
            longitude: lon2,
        },
        Units::Kilometers,
    )
}
