use core::fmt;
use std::str::FromStr;

use geographiclib_rs::Geodesic;

use crate::error::{GeoAreaError, Result};

/// Reference ellipsoid the area is measured on.
///
/// Immutable value handed to the calculator; there is no process-wide
/// ellipsoid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Equatorial radius in meters.
    pub semi_major_axis: f64,
    pub flattening: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        semi_major_axis: 6_378_137.0,
        flattening: 1.0 / 298.257_223_563,
    };

    pub const GRS80: Ellipsoid = Ellipsoid {
        semi_major_axis: 6_378_137.0,
        flattening: 1.0 / 298.257_222_101,
    };

    pub fn new(semi_major_axis: f64, flattening: f64) -> Result<Self> {
        let valid = semi_major_axis.is_finite()
            && semi_major_axis > 0.0
            && flattening.is_finite()
            && (0.0..1.0).contains(&flattening);
        if !valid {
            return Err(GeoAreaError::InvalidEllipsoid {
                semi_major_axis,
                flattening,
            });
        }
        Ok(Self {
            semi_major_axis,
            flattening,
        })
    }

    /// A sphere of the given radius.
    pub fn sphere(radius: f64) -> Result<Self> {
        Self::new(radius, 0.0)
    }

    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.flattening)
    }

    pub fn geodesic(&self) -> Geodesic {
        Geodesic::new(self.semi_major_axis, self.flattening)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Ellipsoid::WGS84
    }
}

impl fmt::Display for Ellipsoid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ellipsoid(a: {:.3}, b: {:.3}, 1/f: {:.9})",
            self.semi_major_axis,
            self.semi_minor_axis(),
            1.0 / self.flattening
        )
    }
}

/// Accepts `wgs84`, `grs80`, or `<semi-major axis>,<flattening>`.
impl FromStr for Ellipsoid {
    type Err = GeoAreaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wgs84" => Ok(Ellipsoid::WGS84),
            "grs80" => Ok(Ellipsoid::GRS80),
            custom => {
                let Some((a, f)) = custom.split_once(',') else {
                    return Err(GeoAreaError::MalformedInput(format!(
                        "unknown ellipsoid: {}",
                        s
                    )));
                };
                let parse = |v: &str| {
                    v.trim().parse::<f64>().map_err(|e| {
                        GeoAreaError::MalformedInput(format!("ellipsoid {}: {}", s, e))
                    })
                };
                Ellipsoid::new(parse(a)?, parse(f)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_presets() {
        assert_eq!(Ellipsoid::default(), Ellipsoid::WGS84);
        assert_relative_eq!(
            Ellipsoid::WGS84.semi_minor_axis(),
            6_356_752.314_245,
            epsilon = 1e-6
        );
        assert_ne!(Ellipsoid::WGS84, Ellipsoid::GRS80);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Ellipsoid::WGS84.to_string(),
            "ellipsoid(a: 6378137.000, b: 6356752.314, 1/f: 298.257223563)"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("WGS84".parse::<Ellipsoid>().unwrap(), Ellipsoid::WGS84);
        assert_eq!(" grs80 ".parse::<Ellipsoid>().unwrap(), Ellipsoid::GRS80);
        let sphere: Ellipsoid = "6371000,0".parse().unwrap();
        assert_eq!(sphere, Ellipsoid::sphere(6_371_000.0).unwrap());
        assert!("clarke1866".parse::<Ellipsoid>().is_err());
        assert!("6371000,abc".parse::<Ellipsoid>().is_err());
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(Ellipsoid::new(0.0, 0.0).is_err());
        assert!(Ellipsoid::new(6_378_137.0, 1.0).is_err());
        assert!(Ellipsoid::new(6_378_137.0, -0.1).is_err());
        assert!(Ellipsoid::new(f64::NAN, 0.0).is_err());
    }
}
