use std::collections::BTreeSet;

use geo::{Area, Coord, LineString, Validation};

use crate::error::{GeoAreaError, Result};
use crate::point::{WGS84BoundingBox, WGS84Point};

/// Planar area (square degrees) below which a ring counts as degenerate.
const DEGENERATE_AREA: f64 = 1e-14;

/// A closed polygon boundary: the last vertex repeats the first.
///
/// Only built through [`Ring::normalize`], so it always holds at least four
/// vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    wgs: Vec<WGS84Point>,
}

impl Ring {
    /// Rounds the vertices and closes the ring.
    ///
    /// Fails on fewer than 3 vertices (before or after dropping duplicates)
    /// and on any vertex outside the latitude/longitude ranges.
    pub fn normalize(points: &[WGS84Point]) -> Result<Self> {
        if points.len() < 3 {
            return Err(GeoAreaError::InsufficientVertices {
                count: points.len(),
            });
        }
        for p in points {
            p.validate()?;
        }
        let mut wgs: Vec<WGS84Point> = points.iter().map(WGS84Point::rounded).collect();

        let distinct: BTreeSet<WGS84Point> = wgs.iter().copied().collect();
        if distinct.len() < 3 {
            return Err(GeoAreaError::InsufficientVertices {
                count: distinct.len(),
            });
        }

        let first = wgs[0];
        if wgs.last() != Some(&first) {
            wgs.push(first);
        }
        Ok(Ring { wgs })
    }

    /// Normalizes then checks that the ring is a simple polygon.
    pub fn from_points(points: &[WGS84Point]) -> Result<Self> {
        let ring = Self::normalize(points)?;
        ring.validate()?;
        Ok(ring)
    }

    pub fn validate(&self) -> Result<()> {
        let polygon = self.to_geo();
        polygon
            .check_validation()
            .map_err(|e| GeoAreaError::InvalidGeometry(e.to_string()))?;
        if polygon.unsigned_area() < DEGENERATE_AREA {
            return Err(GeoAreaError::InvalidGeometry(
                "ring encloses no area".to_string(),
            ));
        }
        Ok(())
    }

    /// All vertices, closing repetition included.
    pub fn wgs(&self) -> &[WGS84Point] {
        &self.wgs
    }

    pub fn is_closed(&self) -> bool {
        self.wgs.len() > 1 && self.wgs.first() == self.wgs.last()
    }

    /// The vertices without the closing repetition.
    pub fn open(&self) -> &[WGS84Point] {
        if self.is_closed() {
            &self.wgs[..self.wgs.len() - 1]
        } else {
            &self.wgs
        }
    }

    pub fn to_geo(&self) -> geo::Polygon {
        let coords: Vec<Coord<f64>> = self
            .wgs
            .iter()
            .map(|p| Coord { x: p.lon, y: p.lat })
            .collect();
        geo::Polygon::new(LineString::new(coords), vec![])
    }

    pub fn wgsbbox(&self) -> WGS84BoundingBox {
        let first = self.wgs[0];
        self.wgs
            .iter()
            .fold(WGS84BoundingBox::from(&first, &first), |bbox, p| {
                bbox.extend(p)
            })
    }

    pub fn info(&self) {
        log::info!("ring: len: {}", self.wgs.len());
        log::info!("ring: wgs bbox: {}", self.wgsbbox());
    }
}
