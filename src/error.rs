use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapkeepError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{name} does not exist in {}", .root.display())]
    MissingArchive { name: String, root: PathBuf },

    #[error("remote tool failed: {0}")]
    RemoteTool(String),

    #[error("disk usage measurement failed: {0}")]
    DiskUsage(String),

    #[error("internal inconsistency: {0}")]
    Inconsistency(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SnapkeepError>;
