//! Geocoder — cache-first lookups in both directions.
//!
//! Flow per call:  cache → single provider request → cache write on success.
//! Failures are never cached and never retried.

use super::cache::{AddressKey, CoordKey, GeoCache};
use super::providers::{self, Transport, UreqTransport};
use super::types::{GeoCoordinate, GeocodeError, GeocoderConfig};

/// Cache-backed geocoder.
pub struct Geocoder<T: Transport = UreqTransport> {
    config: GeocoderConfig,
    cache: GeoCache,
    transport: T,
    offline: bool,
}

impl Geocoder<UreqTransport> {
    pub fn new(config: GeocoderConfig) -> Self {
        let transport = UreqTransport::new(config.user_agent.clone());
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Geocoder<T> {
    /// Create a geocoder with a specific transport (for testing).
    pub fn with_transport(config: GeocoderConfig, transport: T) -> Self {
        let cache = GeoCache::open(config.cache_dir.clone());
        Self {
            config,
            cache,
            transport,
            offline: false,
        }
    }

    /// Set offline mode — answer from the cache only.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn cache(&self) -> &GeoCache {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Address at `(lat, lng)`, or `None` if it could not be resolved.
    ///
    /// The cause of a failure is logged at `warn`.
    pub fn reverse_geocode(&self, lat: f64, lng: f64) -> Option<String> {
        match self.try_reverse_geocode(lat, lng) {
            Ok(address) => Some(address),
            Err(e) => {
                tracing::warn!(lat, lng, error = %e, "reverse geocoding failed");
                None
            }
        }
    }

    /// Like [`Self::reverse_geocode`] but keeps the failure cause.
    pub fn try_reverse_geocode(&self, lat: f64, lng: f64) -> Result<String, GeocodeError> {
        // NaN and infinities would saturate onto a real key.
        if !lat.is_finite() || !lng.is_finite() {
            return Err(GeocodeError::InvalidCoordinate { lat, lng });
        }
        let key = CoordKey::from_coords(lat, lng);
        if let Some(address) = self.cache.get_address(&key) {
            tracing::debug!(lat_e6 = key.lat_e6, lng_e6 = key.lng_e6, "reverse cache hit");
            return Ok(address);
        }
        if self.offline {
            return Err(GeocodeError::Offline);
        }

        let address = providers::request_reverse(&self.transport, &self.config, lat, lng)?;
        if let Err(e) = self.cache.put_address(&key, &address) {
            tracing::warn!(error = %e, "could not write reverse cache entry");
        }
        Ok(address)
    }

    /// Coordinates of `address`. The address is used verbatim as the cache key.
    pub fn forward_geocode(&self, address: &str) -> Result<GeoCoordinate, GeocodeError> {
        let key = AddressKey::from_address(address);
        if let Some(coord) = self.cache.get_coordinate(&key) {
            tracing::debug!(address, "forward cache hit");
            return Ok(coord);
        }
        if self.offline {
            return Err(GeocodeError::Offline);
        }

        match providers::request_forward(&self.transport, &self.config, address) {
            Ok(coord) => {
                if let Err(e) = self.cache.put_coordinate(&key, &coord) {
                    tracing::warn!(error = %e, "could not write forward cache entry");
                }
                Ok(coord)
            }
            Err(e) => {
                tracing::warn!(address, error = %e, "forward geocoding failed");
                Err(e)
            }
        }
    }
}
