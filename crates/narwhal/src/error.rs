#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("edge {edge_id} references a node that is not in the graph: {node_id}")]
    MissingEndpoint { edge_id: String, node_id: String },
    #[error("graph contains a duplicate node id: {node_id}")]
    DuplicateNode { node_id: String },
    #[error("graph contains a duplicate edge id: {edge_id}")]
    DuplicateEdge { edge_id: String },
    #[error("node {node_id} has a non-finite initial position")]
    NonFinitePosition { node_id: String },
    #[error("node not found: {node_id}")]
    NodeNotFound { node_id: String },
    #[error("invalid layout option `{name}` = {value}: {reason}")]
    InvalidOption {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
