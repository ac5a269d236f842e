pub mod api;
pub mod area;
pub mod ellipsoid;
pub mod error;
pub mod geojson_io;
pub mod point;
pub mod polygon;
pub mod read_polygon;

pub use area::{AreaCalculator, AreaResult};
pub use ellipsoid::Ellipsoid;
pub use error::{GeoAreaError, Result};
pub use point::{LatLng, LngLat, WGS84Point};
