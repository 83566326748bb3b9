use crate::impl_err;
use crate::matcher::MatchError;
use crate::network::NetworkError;
use crate::route::RouteError;

use thiserror::Error;

/// Any failure surfaced by the crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("network: {0}")]
    Network(NetworkError),

    #[error("route: {0}")]
    Route(RouteError),

    #[error("match: {0}")]
    Match(MatchError),
}

impl_err!(NetworkError, Network);
impl_err!(RouteError, Route);
impl_err!(MatchError, Match);

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use crate::fixtures::square;
    use crate::matcher::{MatchError, Matcher};
    use crate::network::EdgeId;
    use crate::route::RouteError;

    use geo::LineString;

    fn match_empty() -> crate::Result<()> {
        let network = square::network()?;
        Matcher::new(&network).match_trajectory(&LineString::new(vec![]), square::A, square::C)?;

        Ok(())
    }

    #[test_log::test]
    fn converts_area_errors() {
        assert_eq!(
            match_empty(),
            Err(crate::Error::Match(MatchError::NoPointsProvided))
        );

        let route: crate::Error = RouteError::InvalidEdge(EdgeId(3)).into();
        assert_eq!(route.to_string(), "route: edge e3 is not part of the network");
    }
}
