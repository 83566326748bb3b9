//! Assigns raw points to their nearest network edge.

#[doc(hidden)]
pub mod snapper;

#[doc(inline)]
pub use snapper::{Snap, SnapConfig, Snapper, UNSNAPPABLE_DISTANCE};
