use thiserror::Error;

/// Everything that can go wrong between a request body and an area figure.
#[derive(Debug, Error)]
pub enum GeoAreaError {
    #[error("at least 3 coordinates required (got {count})")]
    InsufficientVertices { count: usize },

    #[error("invalid polygon geometry: {0}")]
    InvalidGeometry(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("coordinate out of range: lat {lat}, lon {lon}")]
    CoordinateOutOfRange { lat: f64, lon: f64 },

    #[error("no features found in GeoJSON")]
    NoFeatures,

    #[error("only Polygon geometry supported (got {0})")]
    UnsupportedGeometryType(String),

    #[error("invalid ellipsoid: semi-major axis {semi_major_axis}, flattening {flattening}")]
    InvalidEllipsoid {
        semi_major_axis: f64,
        flattening: f64,
    },

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl GeoAreaError {
    /// True for failures caused by the caller's data rather than by us.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GeoAreaError::InsufficientVertices { .. }
                | GeoAreaError::InvalidGeometry(_)
                | GeoAreaError::MalformedInput(_)
                | GeoAreaError::CoordinateOutOfRange { .. }
                | GeoAreaError::NoFeatures
                | GeoAreaError::UnsupportedGeometryType(_)
                | GeoAreaError::UnsupportedFormat(_)
        )
    }

    /// HTTP-equivalent status code.
    pub fn status(&self) -> u16 {
        if self.is_validation() { 400 } else { 500 }
    }
}

pub type Result<T> = std::result::Result<T, GeoAreaError>;
