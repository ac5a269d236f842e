use chrono::SecondsFormat;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

use crate::area::AreaResult;
use crate::error::{GeoAreaError, Result};
use crate::point::{LatLng, LngLat};

const GEOMETRY_TYPES: [&str; 7] = [
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Polygon",
    "MultiPolygon",
    "GeometryCollection",
];

/// First polygon of a GeoJSON document, in display order.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractedPolygon {
    pub coordinates: Vec<LatLng>,
    pub properties: JsonObject,
}

pub fn feature_collection(result: &AreaResult) -> FeatureCollection {
    let ring: Vec<Vec<f64>> = result
        .boundary()
        .into_iter()
        .map(|c| LngLat::from(c).position())
        .collect();

    let mut properties = JsonObject::new();
    properties.insert("area_ha".to_string(), json!(result.area_ha));
    properties.insert("area_m2".to_string(), json!(result.area_m2));
    properties.insert("perimeter_m".to_string(), json!(result.perimeter_m));
    properties.insert(
        "timestamp".to_string(),
        json!(result.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)),
    );
    properties.insert(
        "coordinate_count".to_string(),
        json!(result.coordinate_count),
    );

    let feature = Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    };
    FeatureCollection {
        bbox: None,
        features: vec![feature],
        foreign_members: None,
    }
}

fn type_of(value: &serde_json::Value) -> &str {
    value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("none")
}

/// Finds the first Polygon in a FeatureCollection, Feature or bare geometry
/// and returns its outer ring as `[lat, lng]` pairs.
///
/// Only the first feature of a collection is looked at; the others may hold
/// anything.
pub fn extract(mut value: serde_json::Value) -> Result<ExtractedPolygon> {
    let kind = type_of(&value).to_string();
    let (geometry, properties) = match kind.as_str() {
        "FeatureCollection" => {
            let features = value
                .get_mut("features")
                .and_then(serde_json::Value::as_array_mut)
                .ok_or_else(|| {
                    GeoAreaError::MalformedInput("FeatureCollection without features".to_string())
                })?;
            let first = features.first_mut().ok_or(GeoAreaError::NoFeatures)?;
            (
                first.get_mut("geometry").map(serde_json::Value::take),
                first.get_mut("properties").map(serde_json::Value::take),
            )
        }
        "Feature" => (
            value.get_mut("geometry").map(serde_json::Value::take),
            value.get_mut("properties").map(serde_json::Value::take),
        ),
        k if GEOMETRY_TYPES.contains(&k) => (Some(value), None),
        other => return Err(GeoAreaError::UnsupportedGeometryType(other.to_string())),
    };

    let geometry = match geometry {
        Some(g) if !g.is_null() => g,
        _ => return Err(GeoAreaError::UnsupportedGeometryType("null".to_string())),
    };
    let geometry_kind = type_of(&geometry);
    if geometry_kind != "Polygon" {
        return Err(GeoAreaError::UnsupportedGeometryType(
            geometry_kind.to_string(),
        ));
    }

    let geometry = Geometry::from_json_value(geometry)
        .map_err(|e| GeoAreaError::MalformedInput(e.to_string()))?;
    let exterior = match geometry.value {
        Value::Polygon(rings) => rings.into_iter().next().unwrap_or_default(),
        other => {
            return Err(GeoAreaError::UnsupportedGeometryType(
                other.type_name().to_string(),
            ));
        }
    };
    if exterior.len() < 3 {
        return Err(GeoAreaError::InsufficientVertices {
            count: exterior.len(),
        });
    }

    let coordinates = exterior
        .iter()
        .map(|position| LngLat::from_position(position).map(LatLng::from))
        .collect::<Result<Vec<_>>>()?;
    log::debug!("extracted polygon with {} positions", coordinates.len());

    let properties = match properties {
        Some(serde_json::Value::Object(map)) => map,
        _ => JsonObject::new(),
    };
    Ok(ExtractedPolygon {
        coordinates,
        properties,
    })
}

pub fn extract_str(content: &str) -> Result<ExtractedPolygon> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| GeoAreaError::MalformedInput(e.to_string()))?;
    extract(value)
}
