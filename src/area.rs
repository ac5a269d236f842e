//! Geodesic polygon area on a reference ellipsoid.
//!
//! The ring is split into geodesic segments between consecutive vertices and
//! the enclosed area is integrated with Karney's method, so the result holds
//! for regions of any size, not just those where a flat projection is good
//! enough.

use chrono::{DateTime, Utc};
use geographiclib_rs::{PolygonArea, Winding};

use crate::ellipsoid::Ellipsoid;
use crate::error::Result;
use crate::point::{LatLng, WGS84Point, round_to};
use crate::polygon::Ring;

pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Signed area (m², positive for counter-clockwise) and perimeter (m).
pub fn geodesic_area_perimeter(ring: &Ring, ellipsoid: &Ellipsoid) -> (f64, f64) {
    let geodesic = ellipsoid.geodesic();
    let mut polygon = PolygonArea::new(&geodesic, Winding::CounterClockwise);
    // PolygonArea closes the ring itself.
    for p in ring.open() {
        polygon.add_point(p.lat, p.lon);
    }
    let (perimeter, area, _) = polygon.compute(true);
    (area, perimeter)
}

/// Outcome of one area calculation. Built once, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaResult {
    /// Closed, rounded boundary.
    pub ring: Ring,
    pub area_m2: f64,
    pub area_ha: f64,
    pub perimeter_m: f64,
    /// Length of the caller's coordinate list, before closing.
    pub coordinate_count: usize,
    pub timestamp: DateTime<Utc>,
}

impl AreaResult {
    pub fn boundary(&self) -> Vec<LatLng> {
        self.ring.wgs().iter().map(|p| LatLng::from(*p)).collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AreaCalculator {
    ellipsoid: Ellipsoid,
}

impl AreaCalculator {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn calculate(&self, coordinates: &[LatLng]) -> Result<AreaResult> {
        self.calculate_at(coordinates, Utc::now())
    }

    /// Same as [`calculate`](Self::calculate) with a caller supplied timestamp.
    pub fn calculate_at(
        &self,
        coordinates: &[LatLng],
        timestamp: DateTime<Utc>,
    ) -> Result<AreaResult> {
        let points: Vec<WGS84Point> = coordinates.iter().map(|c| WGS84Point::from(*c)).collect();
        let ring = Ring::from_points(&points)?;
        log::debug!("ring: {} vertices, closed: {}", ring.wgs().len(), ring.is_closed());

        let (signed_area, perimeter) = geodesic_area_perimeter(&ring, &self.ellipsoid);
        let area = signed_area.abs();
        log::trace!("signed area: {:.3}, perimeter: {:.3}", signed_area, perimeter);

        Ok(AreaResult {
            ring,
            area_m2: round_to(area, 2),
            area_ha: round_to(area / SQUARE_METERS_PER_HECTARE, 4),
            perimeter_m: round_to(perimeter, 2),
            coordinate_count: coordinates.len(),
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoAreaError;
    use approx::assert_relative_eq;
    use geo::algorithm::geodesic_area::GeodesicArea;
    use geo::orient::{Direction, Orient};

    fn square() -> Vec<LatLng> {
        vec![
            LatLng(0.0, 0.0),
            LatLng(0.0, 1.0),
            LatLng(1.0, 1.0),
            LatLng(1.0, 0.0),
        ]
    }

    fn field() -> Vec<LatLng> {
        vec![
            LatLng(48.137154, 11.576124),
            LatLng(48.139012, 11.581231),
            LatLng(48.135501, 11.584990),
            LatLng(48.132203, 11.580004),
            LatLng(48.133870, 11.575512),
        ]
    }

    #[test]
    fn test_one_degree_square() {
        let result = AreaCalculator::default().calculate(&square()).unwrap();
        // ~12,308 km², well off the planar figure for a 111 km square.
        assert_relative_eq!(result.area_m2, 1.2308778e10, max_relative = 1e-4);
        assert_relative_eq!(result.area_ha, result.area_m2 / 10_000.0, epsilon = 1e-4);
        assert_eq!(result.coordinate_count, 4);
        assert_eq!(result.ring.wgs().len(), 5);
        assert_relative_eq!(result.perimeter_m, 443_770.0, max_relative = 1e-3);
    }

    #[test]
    fn test_agrees_with_geo_crate() {
        let result = AreaCalculator::new(Ellipsoid::WGS84)
            .calculate(&field())
            .unwrap();
        let reference = result
            .ring
            .to_geo()
            .orient(Direction::Default)
            .geodesic_area_unsigned();
        assert_relative_eq!(result.area_m2, reference, epsilon = 0.01);
    }

    #[test]
    fn test_winding_invariance() {
        let calc = AreaCalculator::default();
        let mut reversed = field();
        reversed.reverse();
        let a = calc.calculate(&field()).unwrap();
        let b = calc.calculate(&reversed).unwrap();
        assert_relative_eq!(a.area_m2, b.area_m2, epsilon = 0.02);
        assert_relative_eq!(a.perimeter_m, b.perimeter_m, epsilon = 0.02);
    }

    #[test]
    fn test_rotation_invariance() {
        let calc = AreaCalculator::default();
        let base = calc.calculate(&field()).unwrap();
        for shift in 1..field().len() {
            let mut rotated = field();
            rotated.rotate_left(shift);
            let r = calc.calculate(&rotated).unwrap();
            assert_relative_eq!(base.area_m2, r.area_m2, epsilon = 0.02);
        }
    }

    #[test]
    fn test_signed_area_follows_winding() {
        let mut points: Vec<WGS84Point> = square().into_iter().map(WGS84Point::from).collect();
        let ring = Ring::from_points(&points).unwrap();
        points.reverse();
        let reversed = Ring::from_points(&points).unwrap();
        let (ccw, _) = geodesic_area_perimeter(&ring, &Ellipsoid::WGS84);
        let (cw, _) = geodesic_area_perimeter(&reversed, &Ellipsoid::WGS84);
        assert!(ccw > 0.0);
        assert!(cw < 0.0);
        assert_relative_eq!(ccw, -cw, max_relative = 1e-12);
    }

    #[test]
    fn test_ellipsoid_matters() {
        let wgs = AreaCalculator::new(Ellipsoid::WGS84).calculate(&square()).unwrap();
        let sphere = AreaCalculator::new(Ellipsoid::sphere(6_371_000.0).unwrap())
            .calculate(&square())
            .unwrap();
        assert!((wgs.area_m2 - sphere.area_m2).abs() > 1e6);
    }

    #[test]
    fn test_sphere_octant() {
        // One eighth of the sphere: 4 pi r^2 / 8.
        let r: f64 = 6_371_000.0;
        let calc = AreaCalculator::new(Ellipsoid::sphere(r).unwrap());
        let result = calc
            .calculate(&[LatLng(0.0, 0.0), LatLng(0.0, 90.0), LatLng(90.0, 0.0)])
            .unwrap();
        let expected = std::f64::consts::PI * r * r / 2.0;
        assert_relative_eq!(result.area_m2, expected, max_relative = 1e-9);
    }

    #[test]
    fn test_closed_input() {
        let mut closed = square();
        closed.push(LatLng(0.0, 0.0));
        let calc = AreaCalculator::default();
        let a = calc.calculate(&square()).unwrap();
        let b = calc.calculate(&closed).unwrap();
        assert_eq!(b.ring.wgs().len(), 5);
        assert_eq!(b.coordinate_count, 5);
        assert_eq!(a.area_m2, b.area_m2);
    }

    #[test]
    fn test_rounding() {
        let result = AreaCalculator::default().calculate(&field()).unwrap();
        assert_eq!(result.area_m2, round_to(result.area_m2, 2));
        assert_eq!(result.area_ha, round_to(result.area_ha, 4));
        assert_eq!(result.boundary()[0], LatLng(48.137154, 11.576124));
    }

    #[test]
    fn test_errors() {
        let calc = AreaCalculator::default();
        assert!(matches!(
            calc.calculate(&[LatLng(0.0, 0.0), LatLng(1.0, 1.0)]),
            Err(GeoAreaError::InsufficientVertices { count: 2 })
        ));
        let bowtie = [
            LatLng(0.0, 0.0),
            LatLng(1.0, 1.0),
            LatLng(0.0, 1.0),
            LatLng(1.0, 0.0),
        ];
        assert!(matches!(
            calc.calculate(&bowtie),
            Err(GeoAreaError::InvalidGeometry(_))
        ));
        assert!(matches!(
            calc.calculate(&[LatLng(0.0, 0.0), LatLng(0.0, 200.0), LatLng(1.0, 1.0)]),
            Err(GeoAreaError::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_timestamp_is_kept() {
        let at = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let result = AreaCalculator::default().calculate_at(&square(), at).unwrap();
        assert_eq!(result.timestamp, at);
    }
}
