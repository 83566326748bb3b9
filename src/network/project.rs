//! Required structures to project between geographic and planar coordinates

use serde::{Deserialize, Serialize};

pub const MEAN_EARTH_RADIUS: f64 = 6371008.8;

/// Converts between geographic (lon, lat) positions and the planar
/// coordinate system a network stores its geometry in.
///
/// ### Example
/// ```rust
/// use waymatch::network::Projection;
/// use geo::coord;
///
/// let projection = Projection::Equirectangular { origin: coord! { x: 13.40, y: 52.52 } };
/// let (x, y) = projection.project(13.41, 52.52);
///
/// // Roughly 676m east of the origin, on the same parallel.
/// assert!((x - 676.6).abs() < 1.0);
/// assert!(y.abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// Coordinates are used as-is, the network is already geographic
    /// (or the caller works purely in planar space).
    #[default]
    Identity,

    /// A local equirectangular projection about `origin` (lon, lat), in metres.
    /// *Learn more [here](https://en.wikipedia.org/wiki/Equirectangular_projection).*
    Equirectangular { origin: geo::Coord },
}

impl Projection {
    /// Projects a geographic position into the planar system.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        match self {
            Projection::Identity => (lon, lat),
            Projection::Equirectangular { origin } => {
                let scale = origin.y.to_radians().cos();
                let x = MEAN_EARTH_RADIUS * (lon - origin.x).to_radians() * scale;
                let y = MEAN_EARTH_RADIUS * (lat - origin.y).to_radians();
                (x, y)
            }
        }
    }

    /// Inverse of [`Projection::project`].
    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Projection::Identity => (x, y),
            Projection::Equirectangular { origin } => {
                let scale = origin.y.to_radians().cos();
                let lon = origin.x + (x / (MEAN_EARTH_RADIUS * scale)).to_degrees();
                let lat = origin.y + (y / MEAN_EARTH_RADIUS).to_degrees();
                (lon, lat)
            }
        }
    }
}
