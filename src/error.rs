#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ClusterError {
    /// Range expression is not of the form `start-end`.
    #[error("Invalid range expression: {0:?}")]
    InvalidInput(String),

    /// Range bounds are swapped or fall outside of the virtual nodes.
    #[error("Invalid range {start}-{end} for {count} virtual nodes")]
    InvalidRange { start: i64, end: i64, count: usize },

    /// No server registered under the given name.
    #[error("Server not found: {0}")]
    ServerNotFound(String),

    /// Cluster must have at least one virtual node.
    #[error("No virtual nodes")]
    NoVirtualNodes,

    /// Ring must place at least one point per node.
    #[error("No ring points per node")]
    NoRingPoints,
}

pub type ClusterResult<T> = Result<T, ClusterError>;
