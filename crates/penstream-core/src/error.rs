//! Error handling for penstream.
//!
//! One orchestration pass can fail at validation, asset extraction, device
//! discovery, persistence, or session launch. Each failure kind carries the
//! operator-facing diagnostic as its display text; the orchestrator stores
//! that text as the status readout for subsequent passes.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Error raised by one orchestration pass.
///
/// Every variant is terminal for the current pass and none are retried
/// automatically. Per-endpoint probe failures during discovery never reach
/// this type; they are logged and the scan continues.
#[derive(Error, Debug)]
pub enum PlotError {
    /// The plotter identifier input was empty or whitespace.
    #[error("Please supply a valid identifier string.")]
    EmptyIdentifier,

    /// The interpreter executable does not exist on disk.
    #[error("Cannot find interpreter at: {}", .path.display())]
    InterpreterNotFound {
        /// The path that was checked.
        path: PathBuf,
    },

    /// The output directory input was empty.
    #[error("Please supply a valid G-code folder path.")]
    EmptyOutputDirectory,

    /// The output directory was missing and could not be created.
    #[error("Cannot create directory: {reason}")]
    OutputDirectoryCreate {
        /// The underlying cause.
        reason: String,
    },

    /// The embedded streaming script could not be materialized on disk.
    #[error("Failed to extract stream script: {reason}")]
    AssetExtraction {
        /// The underlying cause.
        reason: String,
    },

    /// The scan exhausted every serial endpoint without a match.
    #[error("No plotter found. Are you sure it's connected or that you input the correct identifier?")]
    DeviceNotFound,

    /// Writing the G-code artifact failed.
    #[error("Error writing G-code file: {reason}")]
    Persistence {
        /// The underlying cause.
        reason: String,
    },

    /// The streaming session process could not be started.
    #[error("Error launching streaming session: {reason}")]
    Launch {
        /// The underlying cause.
        reason: String,
    },
}

impl PlotError {
    /// Check if this is an input validation error.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PlotError::EmptyIdentifier
                | PlotError::InterpreterNotFound { .. }
                | PlotError::EmptyOutputDirectory
                | PlotError::OutputDirectoryCreate { .. }
        )
    }

    /// Check if this is a device discovery error.
    pub fn is_device_not_found(&self) -> bool {
        matches!(self, PlotError::DeviceNotFound)
    }
}

/// Result type using PlotError.
pub type Result<T> = std::result::Result<T, PlotError>;
