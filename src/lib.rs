#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod candidate;
pub mod error;
#[doc(hidden)]
pub mod fixtures;
pub mod matcher;
pub mod metric;
pub mod network;
pub mod route;
pub mod snap;
pub mod trip;
pub mod util;

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use matcher::{MatchConfig, MatchResult, Matcher, Strategy};
#[doc(inline)]
pub use network::{EdgeId, MemoryNetwork, Network};
