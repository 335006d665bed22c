use anyhow::{anyhow, Result};
use gatherly_core::entities::{GeoPoint, Location};
use serde::Deserialize;

use super::GeoCodingGateway;

const API_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Google Maps geocoding API.
#[derive(Debug, Clone)]
pub struct GoogleGeoCoding {
    api_key: String,
}

impl GoogleGeoCoding {
    pub const fn new(api_key: String) -> Self {
        Self { api_key }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    place_id: String,
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

fn first_location(response: GeocodeResponse) -> Result<Option<Location>> {
    let GeocodeResponse {
        status,
        results,
        error_message,
    } = response;
    match status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" => return Ok(None),
        _ => {
            return Err(anyhow!(
                "Geocoding failed with status {status}: {}",
                error_message.unwrap_or_default()
            ));
        }
    }
    let Some(GeocodeResult {
        place_id,
        formatted_address,
        geometry,
    }) = results.into_iter().next()
    else {
        return Ok(None);
    };
    let pos = GeoPoint::try_from_lat_lng(geometry.location.lat, geometry.location.lng)?;
    Ok(Some(Location {
        place_id,
        formatted_address,
        pos,
        room_notes: None,
    }))
}

impl GeoCodingGateway for GoogleGeoCoding {
    fn resolve_location(&self, query: &str) -> Result<Option<Location>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }
        log::debug!("Resolving location '{query}'");
        let response = reqwest::blocking::Client::new()
            .get(API_URL)
            .query(&[("address", query), ("key", self.api_key.as_str())])
            .send()?
            .error_for_status()?
            .json::<GeocodeResponse>()?;
        first_location(response)
    }
}
