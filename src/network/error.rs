use crate::network::{EdgeId, NodeId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("edge {0} does not exist in the network")]
    UnknownEdge(EdgeId),

    #[error("node {0} does not exist in the network")]
    UnknownNode(NodeId),

    #[error("edge {0} was declared more than once")]
    DuplicateEdge(EdgeId),

    #[error("edge {0} has invalid attributes: {1}")]
    InvalidAttribute(EdgeId, &'static str),
}
