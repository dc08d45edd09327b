//! File-based geocoding cache, by default under ~/.geotools.
//!
//! Two namespaces, one JSON file per entry:
//!   location_cache/{latE6}_{lngE6}.json  → {"address": "..."}
//!   address_cache/{base64url(address)}.json → {"lat": .., "lng": ..}
//!
//! Encoded addresses longer than one path segment are split every
//! 200 characters into nested directories, so no name exceeds the
//! usual 255-byte filesystem limit.
//!
//! Entries never expire. There is no locking: two processes missing the
//! same key both write it and the last write wins.

use super::types::{default_cache_dir, GeoCoordinate};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const REVERSE_DIR: &str = "location_cache";
const FORWARD_DIR: &str = "address_cache";
const SCALE: f64 = 1_000_000.0;
const SEGMENT_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Reverse-lookup key: each axis scaled by 10^6 and truncated toward zero.
///
/// Coordinates that truncate to the same micro-degree share an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordKey {
    pub lat_e6: i32,
    pub lng_e6: i32,
}

impl CoordKey {
    pub fn from_coords(lat: f64, lng: f64) -> Self {
        Self {
            lat_e6: quantize(lat),
            lng_e6: quantize(lng),
        }
    }

    fn file_name(&self) -> String {
        format!("{}_{}.json", self.lat_e6, self.lng_e6)
    }
}

fn quantize(deg: f64) -> i32 {
    (deg * SCALE) as i32
}

/// Forward-lookup key: URL-safe base64 of the exact address bytes.
///
/// Case and whitespace are significant; "Paris" and "paris " are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressKey(String);

impl AddressKey {
    pub fn from_address(address: &str) -> Self {
        Self(URL_SAFE.encode(address.as_bytes()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the address this key was derived from.
    pub fn decode(&self) -> Option<String> {
        let bytes = URL_SAFE.decode(&self.0).ok()?;
        String::from_utf8(bytes).ok()
    }

    /// Path of this entry relative to `address_cache/`.
    fn relative_path(&self) -> PathBuf {
        // base64url is pure ASCII, so byte chunks are char boundaries.
        let mut segments: Vec<&str> = self
            .0
            .as_bytes()
            .chunks(SEGMENT_LEN)
            .filter_map(|c| std::str::from_utf8(c).ok())
            .collect();
        let last = segments.pop().unwrap_or("");
        let mut path: PathBuf = segments.into_iter().collect();
        path.push(format!("{}.json", last));
        path
    }
}

#[derive(Serialize, Deserialize)]
struct AddressRecord {
    address: String,
}

/// The on-disk cache for both lookup directions.
pub struct GeoCache {
    reverse_dir: PathBuf,
    forward_dir: PathBuf,
}

impl GeoCache {
    /// Use `root` as the cache directory. Nothing is created until the first write.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            reverse_dir: root.join(REVERSE_DIR),
            forward_dir: root.join(FORWARD_DIR),
        }
    }

    /// Open the cache at the default location (~/.geotools).
    pub fn open_default() -> Self {
        Self::open(default_cache_dir())
    }

    /// Cached address for a coordinate key, if any.
    pub fn get_address(&self, key: &CoordKey) -> Option<String> {
        let record: AddressRecord = read_record(&self.reverse_dir.join(key.file_name()))?;
        Some(record.address)
    }

    pub fn put_address(&self, key: &CoordKey, address: &str) -> Result<(), CacheError> {
        let record = AddressRecord {
            address: address.to_string(),
        };
        write_record(&self.reverse_dir.join(key.file_name()), &record)
    }

    /// Cached coordinate for an address key, if any.
    pub fn get_coordinate(&self, key: &AddressKey) -> Option<GeoCoordinate> {
        read_record(&self.forward_dir.join(key.relative_path()))
    }

    pub fn put_coordinate(&self, key: &AddressKey, coord: &GeoCoordinate) -> Result<(), CacheError> {
        write_record(&self.forward_dir.join(key.relative_path()), coord)
    }
}

/// Missing, unreadable, and corrupt records all read as a miss.
fn read_record<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "ignoring corrupt cache record");
            None
        }
    }
}

fn write_record<T: Serialize>(path: &Path, value: &T) -> Result<(), CacheError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string(value)?;
    fs::write(path, json)?;
    Ok(())
}
