//! Grid and network error types.

use thiserror::Error;

use crate::{Cell, NodeId};

/// Errors produced by [`Grid`](crate::Grid).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell {cell} is outside a {width}x{height} grid")]
    OutOfBounds { cell: Cell, width: usize, height: usize },

    #[error("cell {0} is already occupied")]
    Occupied(Cell),

    #[error("cell {0} is empty")]
    Empty(Cell),
}

pub type GridResult<T> = Result<T, GridError>;

/// Errors produced by [`Network`](crate::Network) and its builder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetworkError {
    #[error("{node} is not in a network of {nodes} nodes")]
    UnknownNode { node: NodeId, nodes: usize },

    #[error("{0} cannot be connected to itself")]
    SelfLoop(NodeId),

    #[error("{0} is already occupied")]
    Occupied(NodeId),

    #[error("{0} is empty")]
    Empty(NodeId),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
