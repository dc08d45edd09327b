//! Geocoding subsystem.
//!
//! Forward and reverse lookups against a remote provider, memoized in a
//! permanent file cache.

pub mod cache;
pub mod providers;
pub mod resolver;
pub mod types;

pub use cache::{AddressKey, CacheError, CoordKey, GeoCache};
pub use providers::{Transport, UreqTransport};
pub use resolver::Geocoder;
pub use types::{GeoCoordinate, GeocodeError, GeocoderConfig};
