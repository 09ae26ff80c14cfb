use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Failed to read markdown file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}
