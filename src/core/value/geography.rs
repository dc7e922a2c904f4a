//! Spatial point values

use serde::Serialize;

/// A WGS-84 point as returned by the server's `point()` function
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "point({{latitude: {}, longitude: {}}})",
            self.latitude, self.longitude
        )
    }
}
