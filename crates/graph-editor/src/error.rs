use crate::graph::NodeSlot;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("edge {edge} has weight {raw:?}, which is not a number")]
    InvalidWeight { edge: usize, raw: String },
    #[error("node id {id} is beyond the {limit} slots a graph may hold")]
    IdOutOfRange { id: NodeSlot, limit: usize },
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    #[error("step {step} references node {node}, which is not in the graph")]
    UnknownNode { step: usize, node: NodeSlot },
    #[error("traversal summary references node {node}, which is not in the graph")]
    UnknownResultNode { node: NodeSlot },
    #[error("step {step} references edge {a}-{b}, which is not in the graph")]
    UnknownEdge {
        step: usize,
        a: NodeSlot,
        b: NodeSlot,
    },
    #[error("traversal JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot validate against the current graph: {0}")]
    Snapshot(#[from] SnapshotError),
}
