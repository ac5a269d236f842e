//! JSON request/response boundary.
//!
//! The handlers never fail: every outcome, including bad requests, is turned
//! into a [`Response`] carrying an HTTP-equivalent status and a JSON body.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::area::AreaCalculator;
use crate::error::{GeoAreaError, Result};
use crate::geojson_io::{self, ExtractedPolygon};
use crate::point::LatLng;

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub coordinates: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(default = "empty_object")]
    pub geojson: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    json!({})
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub coordinates: Vec<LatLng>,
    pub properties: geojson::JsonObject,
}

impl From<ExtractedPolygon> for VerifyResponse {
    fn from(p: ExtractedPolygon) -> Self {
        VerifyResponse {
            coordinates: p.coordinates,
            properties: p.properties,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: serde_json::Value,
}

impl Response {
    fn ok(body: serde_json::Value) -> Self {
        Response { status: 200, body }
    }

    fn error(route: &str, err: &GeoAreaError) -> Self {
        let status = err.status();
        if err.is_validation() {
            log::warn!("{}: rejected: {}", route, err);
        } else {
            log::error!("{}: failed: {}", route, err);
        }
        let body = serde_json::to_value(ErrorResponse {
            error: err.to_string(),
        })
        .unwrap_or_else(|_| json!({ "error": err.to_string() }));
        Response { status, body }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Pair arity and number types are checked here; the rest is the
/// calculator's job.
fn parse_coordinates(raw: Vec<serde_json::Value>) -> Result<Vec<LatLng>> {
    raw.into_iter()
        .enumerate()
        .map(|(i, pair)| {
            serde_json::from_value::<LatLng>(pair).map_err(|e| {
                GeoAreaError::MalformedInput(format!("coordinate {}: {}", i, e))
            })
        })
        .collect()
}

fn calculate(body: &str, calculator: &AreaCalculator) -> Result<serde_json::Value> {
    let request: CalculateRequest = serde_json::from_str(body)?;
    if request.coordinates.len() < 3 {
        return Err(GeoAreaError::InsufficientVertices {
            count: request.coordinates.len(),
        });
    }
    let coordinates = parse_coordinates(request.coordinates)?;
    let result = calculator.calculate(&coordinates)?;
    log::info!(
        "calculate: {} coordinates, {:.2} m2, {:.4} ha",
        result.coordinate_count,
        result.area_m2,
        result.area_ha
    );
    Ok(serde_json::to_value(geojson_io::feature_collection(&result))?)
}

fn verify(body: &str) -> Result<serde_json::Value> {
    let request: VerifyRequest = serde_json::from_str(body)?;
    let extracted = geojson_io::extract(request.geojson)?;
    log::info!("verify: {} coordinates", extracted.coordinates.len());
    Ok(serde_json::to_value(VerifyResponse::from(extracted))?)
}

/// `{"coordinates": [[lat, lng], ...]}` to a GeoJSON FeatureCollection.
pub fn handle_calculate(body: &str, calculator: &AreaCalculator) -> Response {
    match calculate(body, calculator) {
        Ok(value) => Response::ok(value),
        Err(e) => Response::error("calculate", &e),
    }
}

/// `{"geojson": {...}}` to `{"coordinates": [[lat, lng], ...], "properties": {...}}`.
pub fn handle_verify(body: &str) -> Response {
    match verify(body) {
        Ok(value) => Response::ok(value),
        Err(e) => Response::error("verify", &e),
    }
}
