use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{GeoAreaError, Result};
use crate::point::LatLng;

mod lockml {
    use super::*;
    use kml::Kml;
    use kml::types::Geometry;

    fn find_first_polygon(kml: &Kml) -> Option<geo::Polygon> {
        match kml {
            Kml::KmlDocument(doc) => doc.elements.iter().find_map(find_first_polygon),
            Kml::Document { elements, .. } => elements.iter().find_map(find_first_polygon),
            Kml::Folder(z) => z.elements.iter().find_map(find_first_polygon),
            Kml::Placemark(p) => {
                if let Some(Geometry::Polygon(polygon)) = &p.geometry {
                    Some(geo::Polygon::from(polygon.clone()))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub fn read(content: &str) -> Result<Vec<LatLng>> {
        let kml: Kml = content
            .parse()
            .map_err(|e: kml::Error| GeoAreaError::MalformedInput(e.to_string()))?;
        let polygon = find_first_polygon(&kml).ok_or_else(|| {
            GeoAreaError::UnsupportedGeometryType("no Polygon in KML".to_string())
        })?;
        Ok(polygon
            .exterior()
            .0
            .iter()
            .map(|p| LatLng(p.y, p.x))
            .collect())
    }
}

mod locgpx {
    use super::*;
    use std::io::Cursor;

    /// The first track segment, taken as a walked boundary.
    pub fn read(content: &str) -> Result<Vec<LatLng>> {
        let gpx = gpx::read(Cursor::new(content))
            .map_err(|e| GeoAreaError::MalformedInput(e.to_string()))?;
        let segment = gpx
            .tracks
            .iter()
            .flat_map(|track| track.segments.iter())
            .next()
            .ok_or_else(|| {
                GeoAreaError::UnsupportedGeometryType("no track segment in GPX".to_string())
            })?;
        Ok(segment
            .points
            .iter()
            .map(|waypoint| {
                let p = waypoint.point();
                LatLng(p.y(), p.x())
            })
            .collect())
    }
}

mod locjson {
    use super::*;
    use crate::geojson_io;

    pub fn read(content: &str) -> Result<Vec<LatLng>> {
        Ok(geojson_io::extract_str(content)?.coordinates)
    }
}

fn parse(extension: &str, content: &str) -> Result<Vec<LatLng>> {
    match extension {
        "kml" => lockml::read(content),
        "gpx" => locgpx::read(content),
        "geojson" | "json" => locjson::read(content),
        other => Err(GeoAreaError::UnsupportedFormat(other.to_string())),
    }
}

/// Reads the first polygon boundary of a `.kml`, `.gpx` or `.geojson` file
/// as `[lat, lng]` pairs.
pub fn read_ring(path: &Path) -> Result<Vec<LatLng>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !matches!(extension.as_str(), "kml" | "gpx" | "geojson" | "json") {
        return Err(GeoAreaError::UnsupportedFormat(path.display().to_string()));
    }
    let mut file = File::open(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    let ring = parse(&extension, &content)?;
    log::info!("{}: {} vertices", path.display(), ring.len());
    Ok(ring)
}
