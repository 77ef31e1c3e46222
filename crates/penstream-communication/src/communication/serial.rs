//! Serial port session for plotter probing.
//!
//! Provides port enumeration and a scoped-acquisition wrapper around a
//! single endpoint: the port is opened with the fixed plotter parameters,
//! handed to a caller-supplied action as a [`ProbeChannel`], and released
//! on every exit path. Open, write, and read failures never cross this
//! boundary as errors; they become a diagnostic and an absent result, so
//! callers treat "no result" and "explicit failure" identically.

use penstream_core::constants::{BAUD_RATE, IO_TIMEOUT_MS, LINE_TERMINATOR, SETTLE_INTERVAL_MS};
use std::io::{self, Read, Write};
use std::thread;
use std::time::Duration;

/// Information about an available serial port
#[derive(Debug, Clone)]
pub struct SerialPortInfo {
    /// Port name (e.g., "/dev/ttyUSB0", "COM3")
    pub port_name: String,

    /// Port description (e.g., "USB Serial Port")
    pub description: String,

    /// Manufacturer name if available
    pub manufacturer: Option<String>,
}

impl SerialPortInfo {
    /// Create a new port info
    pub fn new(port_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            port_name: port_name.into(),
            description: description.into(),
            manufacturer: None,
        }
    }

    /// Set manufacturer
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }
}

/// List available serial ports on the system, in enumeration order.
///
/// Every endpoint the host presents is returned; discovery relies on the
/// identification probe, not on port-name patterns, to tell plotters from
/// other serial devices.
pub fn list_ports() -> io::Result<Vec<SerialPortInfo>> {
    let ports = serialport::available_ports().map_err(io::Error::from)?;

    Ok(ports
        .iter()
        .map(|port| {
            let info = SerialPortInfo::new(&port.port_name, port_description(port));
            match &port.port_type {
                serialport::SerialPortType::UsbPort(usb_info) => {
                    match &usb_info.manufacturer {
                        Some(mfg) => info.with_manufacturer(mfg),
                        None => info,
                    }
                }
                _ => info,
            }
        })
        .collect())
}

/// Get a user-friendly description for a port
fn port_description(port: &serialport::SerialPortInfo) -> String {
    match &port.port_type {
        serialport::SerialPortType::UsbPort(usb_info) => {
            format!(
                "USB {} {}",
                usb_info.manufacturer.as_deref().unwrap_or("Device"),
                usb_info.product.as_deref().unwrap_or("Serial Port")
            )
        }
        serialport::SerialPortType::BluetoothPort => "Bluetooth Serial".to_string(),
        serialport::SerialPortType::PciPort => "PCI Serial".to_string(),
        _ => "Serial Port".to_string(),
    }
}

/// Capability handed to a probe action while the port is open.
///
/// Exactly one operation: send a command line, wait the settle interval,
/// return whatever the device has buffered. The caller defines what to
/// send and how to interpret the response; the session owns the port.
pub trait ProbeChannel {
    /// Write `command` plus the line terminator, sleep the settle
    /// interval, then read all currently buffered response text.
    fn exchange(&mut self, command: &str) -> io::Result<String>;
}

struct OpenPort {
    port: Box<dyn serialport::SerialPort>,
}

impl ProbeChannel for OpenPort {
    fn exchange(&mut self, command: &str) -> io::Result<String> {
        self.port.write_all(command.as_bytes())?;
        self.port.write_all(LINE_TERMINATOR.as_bytes())?;
        self.port.flush()?;

        // Give the firmware time to answer before draining the buffer.
        thread::sleep(Duration::from_millis(SETTLE_INTERVAL_MS));

        let available = self.port.bytes_to_read().map_err(io::Error::from)? as usize;
        if available == 0 {
            return Ok(String::new());
        }

        let mut buf = vec![0u8; available];
        self.port.read_exact(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Run `action` against a freshly opened endpoint.
///
/// The port is bound to the fixed plotter parameters (115200 baud, 1000ms
/// read/write timeout) for the lifetime of the action and dropped before
/// this returns, on success and failure alike. Any failure during open or
/// inside the action is logged and collapses to `None`.
pub fn with_session<R>(
    port_name: &str,
    action: impl FnOnce(&mut dyn ProbeChannel) -> io::Result<R>,
) -> Option<R> {
    let port = match serialport::new(port_name, BAUD_RATE)
        .timeout(Duration::from_millis(IO_TIMEOUT_MS))
        .open()
    {
        Ok(port) => port,
        Err(e) => {
            tracing::warn!("Failed to open serial port {}: {}", port_name, e);
            return None;
        }
    };

    let mut session = OpenPort { port };
    match action(&mut session) {
        Ok(result) => Some(result),
        Err(e) => {
            tracing::warn!("Serial exchange on {} failed: {}", port_name, e);
            None
        }
    }
}
