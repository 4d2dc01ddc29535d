//! Unified error types surfaced by the overlay API.
//!
//! Cycle-level conditions (no area, nothing targeted, render contention) are
//! not errors; they show up as skipped cycles or frames. What remains here are
//! configuration and worker failures.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OverlayError>;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("failed to read overlay config {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse overlay config")]
    ConfigParse(#[from] toml::de::Error),

    #[error("tick driver join failed")]
    DriverJoin(#[source] tokio::task::JoinError),
}
