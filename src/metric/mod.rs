//! Trajectory similarity, used to score candidate matches.

#[doc(hidden)]
pub mod sspd;

#[doc(inline)]
pub use sspd::{directed_mean_distance, point_to_segment, point_to_trajectory, sspd};
