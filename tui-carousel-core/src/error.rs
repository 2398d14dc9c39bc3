//! Error types for the carousel adapter and settings loading

use std::path::PathBuf;

use thiserror::Error;

use crate::adapter::EngineHandle;

/// Result alias used by the adapter and views.
pub type Result<T> = std::result::Result<T, CarouselError>;

/// Misuse of the carousel adapter.
///
/// Every variant is a programming error on the caller's side; nothing here is
/// worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    #[error("cannot initialize a carousel engine with {slide_count} slides")]
    EngineInit { slide_count: usize },
    #[error("engine handle {handle} has been released")]
    StaleHandle { handle: EngineHandle },
    #[error("invalid carousel config: {0}")]
    InvalidConfig(String),
}

/// Failures while loading policies or a page description from disk.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}
