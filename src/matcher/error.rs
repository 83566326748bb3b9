use crate::impl_err;
use crate::route::RouteError;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("no input points were given")]
    NoPointsProvided,

    #[error("could not route between candidate edges: {0}")]
    Route(RouteError),
}

impl_err!(RouteError, MatchError, Route);
