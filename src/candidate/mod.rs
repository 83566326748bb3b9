//! Turns per-point snaps into contiguous, loop-free candidate routes.
//!
//! A trajectory is snapped point by point. Edges the trajectory lingers on
//! become waypoints of a [`CandidateSkeleton`], one per maximum snap
//! distance. Each skeleton is then [reconciled](reconcile) into a
//! contiguous [`ReconciledPath`] through pairwise path searches, and its
//! detours are [cut out](remove_loops).

#[doc(hidden)]
pub mod builder;
#[doc(hidden)]
pub mod definition;
#[doc(hidden)]
pub mod reconcile;
#[cfg(test)]
mod test;

#[doc(inline)]
pub use builder::{CandidateBuilder, build_candidates};
#[doc(inline)]
pub use definition::{CandidateSkeleton, ReconciledPath, persistent_edges};
#[doc(inline)]
pub use reconcile::{reconcile, remove_loops};
