//! The run orchestrator.
//!
//! `PlotRunner` is the context object for the whole process lifetime: it
//! holds the last status readout, the cached device handle, and the
//! extracted script path, and sequences one activation through
//! validation, asset extraction, discovery, persistence, and launch.
//! Every step is fatal-and-terminal on failure; nothing is retried inside
//! a pass.

use crate::assets;
use crate::launcher::{SessionLauncher, TerminalSessionLauncher};
use crate::persister;
use penstream_communication::{locate, DeviceScanner, SerialDeviceScanner};
use penstream_core::constants::IDLE_MESSAGE;
use penstream_core::{DeviceHandle, PlotError, Result, RunRequest};
use std::path::PathBuf;

/// Banner shown at the top of every streaming session.
const BANNER: &[&str] = &[
    "",
    "██████╗ ███████╗███╗   ██╗███████╗████████╗██████╗ ███████╗ █████╗ ███╗   ███╗",
    "██╔══██╗██╔════╝████╗  ██║██╔════╝╚══██╔══╝██╔══██╗██╔════╝██╔══██╗████╗ ████║",
    "██████╔╝█████╗  ██╔██╗ ██║███████╗   ██║   ██████╔╝█████╗  ███████║██╔████╔██║",
    "██╔═══╝ ██╔══╝  ██║╚██╗██║╚════██║   ██║   ██╔══██╗██╔══╝  ██╔══██║██║╚██╔╝██║",
    "██║     ███████╗██║ ╚████║███████║   ██║   ██║  ██║███████╗██║  ██║██║ ╚═╝ ██║",
    "╚═╝     ╚══════╝╚═╝  ╚═══╝╚══════╝   ╚═╝   ╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝╚═╝     ╚═╝",
    "",
    "Stream GRBL and G-code commands to pen plotters.",
    "",
];

/// Top-level state machine for plot runs.
///
/// Constructed once at process start and threaded through every
/// activation; all cached state dies with it.
pub struct PlotRunner {
    has_ever_run: bool,
    last_message: String,
    cached_device: Option<DeviceHandle>,
    stream_script: Option<PathBuf>,
    scanner: Box<dyn DeviceScanner>,
    launcher: Box<dyn SessionLauncher>,
}

impl PlotRunner {
    /// Create a runner over the host's serial ports and terminal.
    pub fn new() -> Self {
        Self::with_backends(
            Box::new(SerialDeviceScanner::new()),
            Box::new(TerminalSessionLauncher::new()),
        )
    }

    /// Create a runner over explicit backends. Tests substitute simulated
    /// scanners and launchers here.
    pub fn with_backends(
        scanner: Box<dyn DeviceScanner>,
        launcher: Box<dyn SessionLauncher>,
    ) -> Self {
        Self {
            has_ever_run: false,
            last_message: IDLE_MESSAGE.to_string(),
            cached_device: None,
            stream_script: None,
            scanner,
            launcher,
        }
    }

    /// Status stored by the most recent pass.
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    /// The cached device, once discovery has succeeded in this process.
    pub fn device(&self) -> Option<&DeviceHandle> {
        self.cached_device.as_ref()
    }

    /// Run one orchestration pass.
    ///
    /// Not triggered: a pure readout with no side effects — the fixed
    /// idle message until the first successful run, afterwards the stored
    /// status of the last run. Triggered: the pipeline below,
    /// short-circuiting at the first failure. The failure text is stored
    /// for later readouts and returned as the error.
    pub fn activate(&mut self, request: &RunRequest) -> Result<String> {
        if !request.triggered {
            return Ok(if self.has_ever_run {
                self.last_message.clone()
            } else {
                IDLE_MESSAGE.to_string()
            });
        }

        match self.execute(request) {
            Ok(message) => {
                self.last_message = message.clone();
                self.has_ever_run = true;
                Ok(message)
            }
            Err(e) => {
                self.last_message = e.to_string();
                tracing::error!("{}", self.last_message);
                Err(e)
            }
        }
    }

    fn execute(&mut self, request: &RunRequest) -> Result<String> {
        if request.identifier.trim().is_empty() {
            return Err(PlotError::EmptyIdentifier);
        }

        if !request.interpreter_path.is_file() {
            return Err(PlotError::InterpreterNotFound {
                path: request.interpreter_path.clone(),
            });
        }

        if request.output_directory.as_os_str().is_empty() {
            return Err(PlotError::EmptyOutputDirectory);
        }
        if !request.output_directory.exists() {
            std::fs::create_dir_all(&request.output_directory).map_err(|e| {
                PlotError::OutputDirectoryCreate {
                    reason: e.to_string(),
                }
            })?;
        }

        // Extract-once, reuse-if-present.
        let script = match &self.stream_script {
            Some(path) if path.exists() => path.clone(),
            _ => {
                let path = assets::materialize_stream_script()?;
                self.stream_script = Some(path.clone());
                path
            }
        };

        // Discovery runs at most once per process; a failed scan leaves
        // the cache empty so the next activation scans again.
        if self.cached_device.is_none() {
            self.cached_device = Some(locate(self.scanner.as_mut(), &request.identifier)?);
        }
        let device = self.cached_device.clone().ok_or(PlotError::DeviceNotFound)?;

        let artifact = persister::persist(&request.commands, &request.output_directory)?;

        self.launcher.launch(
            &request.interpreter_path,
            &script,
            &artifact.file_path,
            &device,
            BANNER,
        )?;

        Ok(format!("G-code saved to: {}", artifact.file_path.display()))
    }
}

impl Default for PlotRunner {
    fn default() -> Self {
        Self::new()
    }
}
