//! Remote geocoding provider: HTTP transport and response parsing.
//!
//! Speaks the Google Geocoding JSON shape:
//! `{"status": "OK", "results": [{"formatted_address": .., "geometry": {"location": {"lat": .., "lng": ..}}}]}`

use super::types::{GeoCoordinate, GeocodeError, GeocoderConfig};
use serde::Deserialize;

/// A single-shot HTTP GET. Implementations must not retry.
pub trait Transport {
    /// Fetch `url` with the given query parameters and return the response body.
    fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<String, GeocodeError>;
}

/// Blocking transport backed by `ureq`. Uses the agent's default timeouts.
pub struct UreqTransport {
    user_agent: String,
}

impl UreqTransport {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<String, GeocodeError> {
        let mut request = ureq::get(url).set("User-Agent", &self.user_agent);
        for (name, value) in params {
            request = request.query(name, value);
        }
        let response = request
            .call()
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;
        response
            .into_string()
            .map_err(|e| GeocodeError::Transport(e.to_string()))
    }
}

// ─── Response schema ────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct GeocodeResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Deserialize, Debug)]
struct GeocodeResult {
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Deserialize, Debug)]
struct Geometry {
    #[serde(default)]
    location: Option<LatLng>,
}

#[derive(Deserialize, Debug)]
struct LatLng {
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
}

impl GeocodeResponse {
    fn parse(body: &str) -> Result<Self, GeocodeError> {
        serde_json::from_str(body).map_err(|e| GeocodeError::InvalidResponse(e.to_string()))
    }

    fn first(self) -> Option<GeocodeResult> {
        self.results.and_then(|r| r.into_iter().next())
    }
}

/// Extract the formatted address from a reverse-geocoding body.
///
/// Anything but `status == "OK"` is a failure, whatever the reason.
pub fn parse_reverse_response(body: &str) -> Result<String, GeocodeError> {
    let response = GeocodeResponse::parse(body)?;
    match response.status.as_deref() {
        Some("OK") => {}
        Some(other) => return Err(GeocodeError::Status(other.to_string())),
        None => return Err(GeocodeError::MissingField("status")),
    }
    response
        .first()
        .and_then(|r| r.formatted_address)
        .ok_or(GeocodeError::MissingField("formatted_address"))
}

/// Extract the first result's location from a forward-geocoding body.
///
/// `status` is not consulted; a missing result or location is the failure.
pub fn parse_forward_response(body: &str) -> Result<GeoCoordinate, GeocodeError> {
    let result = GeocodeResponse::parse(body)?
        .first()
        .ok_or(GeocodeError::MissingField("results"))?;
    let location = result
        .geometry
        .and_then(|g| g.location)
        .ok_or(GeocodeError::MissingField("geometry.location"))?;
    let lat = location.lat.ok_or(GeocodeError::MissingField("location.lat"))?;
    let lng = location.lng.ok_or(GeocodeError::MissingField("location.lng"))?;
    Ok(GeoCoordinate::from_parts(lat, lng))
}

/// Query a provider for the address at `(lat, lng)`.
pub fn request_reverse<T: Transport + ?Sized>(
    transport: &T,
    config: &GeocoderConfig,
    lat: f64,
    lng: f64,
) -> Result<String, GeocodeError> {
    let latlng = format!("{},{}", lat, lng);
    let body = send(transport, config, ("latlng", &latlng))?;
    parse_reverse_response(&body)
}

/// Query a provider for the coordinates of `address`.
pub fn request_forward<T: Transport + ?Sized>(
    transport: &T,
    config: &GeocoderConfig,
    address: &str,
) -> Result<GeoCoordinate, GeocodeError> {
    let body = send(transport, config, ("address", address))?;
    parse_forward_response(&body)
}

fn send<T: Transport + ?Sized>(
    transport: &T,
    config: &GeocoderConfig,
    lookup: (&str, &str),
) -> Result<String, GeocodeError> {
    let mut params = vec![lookup];
    if let Some(key) = config.api_key.as_deref() {
        params.push(("key", key));
    }
    tracing::debug!(endpoint = %config.endpoint, param = lookup.0, "geocoder request");
    transport.get(&config.endpoint, &params)
}
