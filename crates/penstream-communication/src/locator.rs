//! Plotter discovery by identification probe.
//!
//! GRBL boards cannot be told apart by port metadata alone, so discovery
//! is a blind scan: every endpoint gets the `$I` build-info query and the
//! first response containing the operator-supplied identifier wins. The
//! worst case is every endpoint timing out, which makes the scan cost
//! roughly (endpoint count) x (settle interval + I/O timeouts).

use crate::communication::serial::{list_ports, with_session};
use penstream_core::constants::PROBE_COMMAND;
use penstream_core::{DeviceHandle, PlotError, Result};

/// Backend the locator scans through.
///
/// Production code uses [`SerialDeviceScanner`]; tests substitute scripted
/// implementations with simulated endpoints.
pub trait DeviceScanner {
    /// Candidate endpoint names, in enumeration order.
    fn endpoints(&mut self) -> Vec<String>;

    /// Probe one endpoint with the identification command and return its
    /// buffered response. `None` when the endpoint could not be opened or
    /// the exchange failed; the scan treats that like an empty response.
    fn probe(&mut self, port_name: &str) -> Option<String>;
}

/// Scanner over the host's real serial ports.
#[derive(Debug, Default)]
pub struct SerialDeviceScanner;

impl SerialDeviceScanner {
    /// Create a scanner.
    pub fn new() -> Self {
        Self
    }
}

impl DeviceScanner for SerialDeviceScanner {
    fn endpoints(&mut self) -> Vec<String> {
        match list_ports() {
            Ok(ports) => ports.into_iter().map(|p| p.port_name).collect(),
            Err(e) => {
                tracing::warn!("Failed to enumerate serial ports: {}", e);
                Vec::new()
            }
        }
    }

    fn probe(&mut self, port_name: &str) -> Option<String> {
        with_session(port_name, |channel| channel.exchange(PROBE_COMMAND))
    }
}

/// Scan for the endpoint whose probe response contains `identifier`.
///
/// Linear, synchronous, and blocking: endpoints are probed one at a time
/// in enumeration order and the scan stops at the first match. The match
/// is a case-sensitive literal substring test on a non-empty response.
/// Endpoints that fail or stay silent are skipped; only an exhausted list
/// is an error.
pub fn locate(scanner: &mut dyn DeviceScanner, identifier: &str) -> Result<DeviceHandle> {
    for port_name in scanner.endpoints() {
        tracing::debug!("Probing {} for plotter identifier", port_name);

        if let Some(response) = scanner.probe(&port_name) {
            if !response.is_empty() && response.contains(identifier) {
                tracing::info!("Plotter identified on {}", port_name);
                return Ok(DeviceHandle::new(port_name));
            }
        }
    }

    Err(PlotError::DeviceNotFound)
}
