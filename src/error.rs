use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum R50Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not replace store file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Amount is required unless using --list")]
    MissingAmount,

    #[error("Clipboard copy failed: {0}")]
    Clipboard(String),

    #[error("Store is locked by another process: {}", .0.display())]
    Locked(PathBuf),

    #[error("Not a budget record: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, R50Error>;
