#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("node {node_id} must be pinned before it can be dragged")]
    NotPinned { node_id: String },
    #[error("node {node_id} is not part of the current layout")]
    UnknownNode { node_id: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
