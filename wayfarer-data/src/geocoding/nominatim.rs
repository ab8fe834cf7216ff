//! Nominatim `search` response types.
//!
//! With `format=jsonv2` the service answers with a JSON array of places.
//! Coordinates arrive as decimal strings.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Search/>

use serde::Deserialize;
use wayfarer_core::{Coordinate, Location};

/// One entry of a Nominatim search response.
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    /// Nominatim's internal place identifier.
    pub place_id: Option<u64>,
    /// Human-readable address.
    #[serde(default)]
    pub display_name: String,
    /// Latitude as a decimal string.
    pub lat: String,
    /// Longitude as a decimal string.
    pub lon: String,
}

impl SearchResult {
    /// Convert into a [`Location`], or explain why the entry is unusable.
    pub fn into_location(self) -> Result<Location, String> {
        let latitude: f64 = self
            .lat
            .trim()
            .parse()
            .map_err(|err| format!("latitude {:?}: {err}", self.lat))?;
        let longitude: f64 = self
            .lon
            .trim()
            .parse()
            .map_err(|err| format!("longitude {:?}: {err}", self.lon))?;
        let coordinate = Coordinate::new(longitude, latitude).map_err(|err| err.to_string())?;
        let id = self
            .place_id
            .map_or_else(|| self.display_name.clone(), |id| id.to_string());
        Ok(Location::new(id, self.display_name, coordinate))
    }
}
