//! Shared data model for one orchestration pass.

use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Snapshot of the operator inputs for a single activation.
///
/// Produced once per activation and immutable for the duration of the
/// pass. A non-triggered request performs a pure status readout.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Whether this activation should execute the pipeline.
    pub triggered: bool,

    /// Text to identify the connected plotter with, matched against the
    /// response of the `$I` identification probe. For iDraw boards this is
    /// "DrawCore", for DrawBot "DRAWBOT".
    pub identifier: String,

    /// GRBL and G-code command lines to stream, in order.
    pub commands: Vec<String>,

    /// Directory where G-code files are saved.
    pub output_directory: PathBuf,

    /// Location of the interpreter executable that runs the streaming
    /// engine.
    pub interpreter_path: PathBuf,
}

impl RunRequest {
    /// Create a triggered request.
    pub fn new(
        identifier: impl Into<String>,
        commands: Vec<String>,
        output_directory: impl Into<PathBuf>,
        interpreter_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            triggered: true,
            identifier: identifier.into(),
            commands,
            output_directory: output_directory.into(),
            interpreter_path: interpreter_path.into(),
        }
    }

    /// Create a non-triggered request for a status readout.
    pub fn readout() -> Self {
        Self {
            triggered: false,
            identifier: String::new(),
            commands: Vec::new(),
            output_directory: PathBuf::new(),
            interpreter_path: PathBuf::new(),
        }
    }
}

/// A located plotter endpoint.
///
/// Discovered at most once per runner lifetime and cached; only a process
/// restart invalidates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceHandle {
    /// Serial port name (e.g., "/dev/ttyUSB0", "COM3").
    pub port_name: String,
}

impl DeviceHandle {
    /// Create a handle for a port name.
    pub fn new(port_name: impl Into<String>) -> Self {
        Self {
            port_name: port_name.into(),
        }
    }
}

/// A persisted G-code file.
#[derive(Debug, Clone)]
pub struct GcodeArtifact {
    /// Where the file was written.
    pub file_path: PathBuf,

    /// Local time the file was created; also the source of its name.
    pub created_at: DateTime<Local>,
}
