//! The road-network query capability consumed by the matching core,
//! along with an in-memory implementation of it.

#[doc(hidden)]
pub mod definition;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod memory;
pub mod project;

#[doc(inline)]
pub use definition::*;
#[doc(inline)]
pub use error::NetworkError;
#[doc(inline)]
pub use memory::{EdgeSpec, MemoryNetwork, NetworkBuilder};
#[doc(inline)]
pub use project::Projection;
