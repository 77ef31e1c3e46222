//! # Penstream Core
//!
//! Core types, errors, and protocol constants for penstream.
//! Provides the shared vocabulary of the workspace: the run request and
//! device data model, the error taxonomy for one orchestration pass, and
//! the fixed GRBL probe/serial parameters.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{PlotError, Result};
pub use types::{DeviceHandle, GcodeArtifact, RunRequest};
