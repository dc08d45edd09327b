//! Geocoding, reverse geocoding, great-circle distance and ISO 3166-1
//! country names.

pub mod country;
pub mod distance;
pub mod geocoding;

pub use country::{country_code, country_name};
pub use distance::{distance_km, distance_m};
pub use geocoding::{GeoCoordinate, GeocodeError, Geocoder, GeocoderConfig};
