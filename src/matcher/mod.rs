//! Picks the best-scoring route for a trajectory among several strategies.

#[doc(hidden)]
pub mod adaptive;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod controller;
#[doc(hidden)]
pub mod definition;
#[doc(hidden)]
pub mod error;
#[cfg(test)]
mod test;

#[doc(inline)]
pub use config::MatchConfig;
#[doc(inline)]
pub use controller::Matcher;
#[doc(inline)]
pub use definition::{MatchRequest, MatchResult, Strategy};
#[doc(inline)]
pub use error::MatchError;
