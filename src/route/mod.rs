//! Single-pair optimal path search over edge-based road networks.

pub mod cache;
#[doc(hidden)]
pub mod error;
mod frontier;
#[doc(hidden)]
pub mod internal;
#[doc(hidden)]
pub mod length;
#[doc(hidden)]
pub mod query;
#[doc(hidden)]
pub mod search;

#[doc(inline)]
pub use error::RouteError;
#[doc(inline)]
pub use internal::InternalPath;
#[doc(inline)]
pub use length::route_length;
#[doc(inline)]
pub use query::{Objective, PathQuery, PathResult};
#[doc(inline)]
pub use search::find_optimal_path;
