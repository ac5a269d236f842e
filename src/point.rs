use core::fmt;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{GeoAreaError, Result};

/// Decimal places kept on every vertex (~0.1 m at the equator).
pub const COORDINATE_PRECISION: i32 = 6;

pub fn round_to(value: f64, precision: i32) -> f64 {
    let factor = 10f64.powi(precision);
    (value * factor).round() / factor
}

/// A vertex on the reference ellipsoid, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WGS84Point {
    pub lon: f64,
    pub lat: f64,
}

impl WGS84Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lon, lat }
    }

    pub fn validate(&self) -> Result<()> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lon_ok = self.lon.is_finite() && (-180.0..=180.0).contains(&self.lon);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(GeoAreaError::CoordinateOutOfRange {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }

    pub fn rounded(&self) -> Self {
        Self {
            lon: round_to(self.lon, COORDINATE_PRECISION),
            lat: round_to(self.lat, COORDINATE_PRECISION),
        }
    }
}

impl fmt::Display for WGS84Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wgs(lat: {:.6}, lon: {:.6})", self.lat, self.lon)
    }
}

impl Eq for WGS84Point {}

impl PartialOrd for WGS84Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WGS84Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lon
            .total_cmp(&other.lon)
            .then_with(|| self.lat.total_cmp(&other.lat))
    }
}

/// Display-order coordinate, serialized as `[lat, lng]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng(pub f64, pub f64);

/// GeoJSON-order coordinate, serialized as `[lng, lat]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LngLat(pub f64, pub f64);

impl LatLng {
    pub fn lat(&self) -> f64 {
        self.0
    }
    pub fn lng(&self) -> f64 {
        self.1
    }
}

impl LngLat {
    pub fn lng(&self) -> f64 {
        self.0
    }
    pub fn lat(&self) -> f64 {
        self.1
    }
    pub fn position(&self) -> Vec<f64> {
        vec![self.0, self.1]
    }
    /// Reads a GeoJSON position; extra values (elevation) are ignored.
    pub fn from_position(position: &[f64]) -> Result<Self> {
        match position {
            [lng, lat, ..] => Ok(LngLat(*lng, *lat)),
            _ => Err(GeoAreaError::MalformedInput(format!(
                "position needs 2 values, got {}",
                position.len()
            ))),
        }
    }
}

impl From<LatLng> for WGS84Point {
    fn from(c: LatLng) -> Self {
        WGS84Point { lon: c.1, lat: c.0 }
    }
}

impl From<LngLat> for WGS84Point {
    fn from(c: LngLat) -> Self {
        WGS84Point { lon: c.0, lat: c.1 }
    }
}

impl From<WGS84Point> for LatLng {
    fn from(p: WGS84Point) -> Self {
        LatLng(p.lat, p.lon)
    }
}

impl From<WGS84Point> for LngLat {
    fn from(p: WGS84Point) -> Self {
        LngLat(p.lon, p.lat)
    }
}

impl From<LngLat> for LatLng {
    fn from(c: LngLat) -> Self {
        LatLng(c.1, c.0)
    }
}

impl From<LatLng> for LngLat {
    fn from(c: LatLng) -> Self {
        LngLat(c.1, c.0)
    }
}

#[derive(Clone, Debug)]
pub struct WGS84BoundingBox {
    pub min: WGS84Point,
    pub max: WGS84Point,
}

impl WGS84BoundingBox {
    pub fn from(p1: &WGS84Point, p2: &WGS84Point) -> Self {
        let min = WGS84Point {
            lon: p1.lon.min(p2.lon),
            lat: p1.lat.min(p2.lat),
        };
        let max = WGS84Point {
            lon: p1.lon.max(p2.lon),
            lat: p1.lat.max(p2.lat),
        };
        Self { min, max }
    }
    pub fn extend(&self, p: &WGS84Point) -> Self {
        Self {
            min: WGS84Point {
                lon: self.min.lon.min(p.lon),
                lat: self.min.lat.min(p.lat),
            },
            max: WGS84Point {
                lon: self.max.lon.max(p.lon),
                lat: self.max.lat.max(p.lat),
            },
        }
    }
}

impl fmt::Display for WGS84BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wgsbbox(min: {}, max: {})", self.min, self.max)
    }
}
