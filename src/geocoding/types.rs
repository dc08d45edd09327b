//! Core types for the geocoding subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lng: f64,
}

impl GeoCoordinate {
    /// Build a coordinate, rejecting latitudes outside [-90, 90] and
    /// longitudes outside [-180, 180].
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeocodeError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(GeocodeError::InvalidCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    /// Build a coordinate without range checks (provider and cache data).
    pub fn from_parts(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Distance to `other` in kilometers.
    pub fn distance_km(&self, other: &GeoCoordinate) -> f64 {
        crate::distance::distance_km(self.lat, self.lng, other.lat, other.lng)
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Why a geocoding call failed.
///
/// Callers only need to know that resolution failed; the variant is there
/// for logs and diagnostics.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("geocoder returned status {0}")]
    Status(String),
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
    #[error("invalid geocoder response: {0}")]
    InvalidResponse(String),
    #[error("offline and no cached result")]
    Offline,
    #[error("coordinate out of range: ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },
}

/// Settings for [`super::Geocoder`].
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Geocoding endpoint; `latlng=` or `address=` is appended as a query parameter.
    pub endpoint: String,
    pub api_key: Option<String>,
    pub user_agent: String,
    /// Root directory holding `location_cache/` and `address_cache/`.
    pub cache_dir: PathBuf,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            user_agent: format!("geo-tools/{}", env!("CARGO_PKG_VERSION")),
            cache_dir: default_cache_dir(),
        }
    }
}

/// `~/.geotools`, or `./.geotools` when no home directory is known.
pub fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".geotools")
}
