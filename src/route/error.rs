use crate::network::{EdgeId, NetworkError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("edge {0} is not part of the network")]
    InvalidEdge(EdgeId),

    #[error("network could not answer the query: {0}")]
    Network(NetworkError),
}

impl From<NetworkError> for RouteError {
    fn from(value: NetworkError) -> Self {
        match value {
            NetworkError::UnknownEdge(id) => RouteError::InvalidEdge(id),
            other => RouteError::Network(other),
        }
    }
}
