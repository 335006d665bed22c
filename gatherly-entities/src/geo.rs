use thiserror::Error;

/// A position on earth in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeoPointError {
    #[error("latitude must be within [-90, 90]")]
    Latitude,
    #[error("longitude must be within [-180, 180]")]
    Longitude,
}

impl GeoPoint {
    pub fn try_from_lat_lng(lat: f64, lng: f64) -> Result<Self, GeoPointError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoPointError::Latitude);
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(GeoPointError::Longitude);
        }
        Ok(Self { lat, lng })
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }
}
