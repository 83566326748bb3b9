use crate::network::{EdgeId, Network};

use geo::LineString;
use log::trace;
use serde::{Deserialize, Serialize};
#[cfg(feature = "tracing")]
use tracing::Level;

/// Distance reported for points no edge could be found for.
pub const UNSNAPPABLE_DISTANCE: f64 = 99_999.0;

const DEFAULT_ATTEMPTS: u32 = 90;

/// The assignment of a point to its nearest edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snap {
    /// `None` when the point is unsnappable.
    pub edge: Option<EdgeId>,
    /// Distance between the point and the edge, in projected units.
    pub distance: f64,
}

impl Snap {
    pub fn unsnapped() -> Self {
        Snap {
            edge: None,
            distance: UNSNAPPABLE_DISTANCE,
        }
    }

    #[inline]
    pub fn is_snapped(&self) -> bool {
        self.edge.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Number of search rings tried before a point is declared unsnappable.
    pub attempts: u32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        SnapConfig {
            attempts: DEFAULT_ATTEMPTS,
        }
    }
}

impl SnapConfig {
    pub fn with_attempts(self, attempts: u32) -> Self {
        SnapConfig { attempts }
    }
}

/// Snaps geographic points onto the edges of a [`Network`].
///
/// ### Example
/// ```rust
/// use waymatch::fixtures::square;
/// use waymatch::snap::Snapper;
///
/// let network = square::network().unwrap();
/// let snap = Snapper::new(&network).snap_point(5.0, 0.5);
///
/// assert_eq!(snap.edge, Some(square::A));
/// assert!((snap.distance - 0.5).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct Snapper<'a, N> {
    network: &'a N,
    config: SnapConfig,
}

impl<'a, N: Network> Snapper<'a, N> {
    pub fn new(network: &'a N) -> Self {
        Snapper {
            network,
            config: SnapConfig::default(),
        }
    }

    pub fn with_config(self, config: SnapConfig) -> Self {
        Snapper { config, ..self }
    }

    /// Finds the nearest edge to the geographic position `(lon, lat)`.
    ///
    /// Rings are widened one at a time, the first ring holding any edge is
    /// decided on. Equal distances resolve to the smaller edge identifier.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::TRACE, skip(self)))]
    pub fn snap_point(&self, lon: f64, lat: f64) -> Snap {
        let (x, y) = self.network.to_projected(lon, lat);

        for ring in 0..self.config.attempts {
            let nearest = self
                .network
                .nearest_edges(x, y, ring)
                .into_iter()
                .min_by(|(a, da), (b, db)| da.total_cmp(db).then_with(|| a.cmp(b)));

            if let Some((edge, distance)) = nearest {
                return Snap {
                    edge: Some(edge),
                    distance,
                };
            }
        }

        trace!(
            "No edge within {} rings of ({lon}, {lat})",
            self.config.attempts
        );
        Snap::unsnapped()
    }

    /// Snaps every point of the trajectory, in order.
    pub fn snap_all(&self, trajectory: &LineString) -> Vec<Snap> {
        trajectory
            .coords()
            .map(|coord| self.snap_point(coord.x, coord.y))
            .collect()
    }
}
