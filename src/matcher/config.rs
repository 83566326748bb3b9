use crate::network::VehicleClass;
use crate::route::Objective;
use crate::snap::SnapConfig;

use serde::{Deserialize, Serialize};

/// Tuning of the [`Matcher`](crate::matcher::Matcher).
///
/// The defaults reproduce the reference matching pipeline. The
/// configuration is plain data and can be loaded from any serde format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Maximum snap distances tried by the adaptive search, in order.
    pub max_distances: Vec<f64>,
    /// Consecutive-run thresholds tried by the adaptive search, in order.
    /// Thresholds form the outer loop of the grid.
    pub thresholds: Vec<usize>,

    /// Scores at or below this are accepted without trying further strategies.
    pub acceptance_threshold: f64,
    /// Stop the adaptive grid at the first accepted score.
    pub early_stop: bool,

    /// Objective used to join candidate waypoints.
    pub reconcile_objective: Objective,
    pub vehicle_class: Option<VehicleClass>,
    pub snap: SnapConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            max_distances: vec![0.0, 0.01, 0.025, 0.05, 0.1],
            thresholds: vec![1],
            acceptance_threshold: 5e-5,
            early_stop: true,
            reconcile_objective: Objective::Fastest,
            vehicle_class: None,
            snap: SnapConfig::default(),
        }
    }
}

impl MatchConfig {
    pub fn with_max_distances(self, max_distances: impl IntoIterator<Item = f64>) -> Self {
        MatchConfig {
            max_distances: max_distances.into_iter().collect(),
            ..self
        }
    }

    pub fn with_thresholds(self, thresholds: impl IntoIterator<Item = usize>) -> Self {
        MatchConfig {
            thresholds: thresholds.into_iter().collect(),
            ..self
        }
    }

    pub fn with_acceptance_threshold(self, acceptance_threshold: f64) -> Self {
        MatchConfig {
            acceptance_threshold,
            ..self
        }
    }

    pub fn with_early_stop(self, early_stop: bool) -> Self {
        MatchConfig { early_stop, ..self }
    }

    pub fn with_reconcile_objective(self, reconcile_objective: Objective) -> Self {
        MatchConfig {
            reconcile_objective,
            ..self
        }
    }

    pub fn with_vehicle_class(self, vehicle_class: Option<VehicleClass>) -> Self {
        MatchConfig {
            vehicle_class,
            ..self
        }
    }

    pub fn with_snap(self, snap: SnapConfig) -> Self {
        MatchConfig { snap, ..self }
    }

    #[inline]
    pub(crate) fn accepts(&self, score: f64) -> bool {
        score <= self.acceptance_threshold
    }
}
