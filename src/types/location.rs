//! Coordinates of requested locations and of sampled grid points.

use rstar::{PointDistance, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use weather_probability::LatLon;
///
/// let nyeri = LatLon(-0.4197, 36.9489);
/// assert_eq!(nyeri.0, -0.4197); // Latitude
/// assert_eq!(nyeri.1, 36.9489); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// A requested location, optionally named (e.g. `"Nyeri, Kenya"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Location {
    pub fn new(coordinate: LatLon, name: Option<String>) -> Self {
        Self {
            lat: coordinate.0,
            lon: coordinate.1,
            name,
        }
    }

    pub fn coordinate(&self) -> LatLon {
        LatLon(self.lat, self.lon)
    }
}

/// A cell centre of a gridded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GridPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

// --- R-Tree Implementations ---

impl RTreeObject for GridPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.lat, self.lon])
    }
}

/// Squared euclidean distance in degree space, which is how a nearest-cell
/// selection on a regular lat/lon grid behaves.
impl PointDistance for GridPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let d_lat = self.lat - point[0];
        let d_lon = self.lon - point[1];
        d_lat * d_lat + d_lon * d_lon
    }
}
