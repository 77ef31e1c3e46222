//! # Penstream Communication
//!
//! Serial port enumeration, the scoped probe session, and plotter
//! discovery. The streaming protocol itself is not here; it belongs to the
//! external engine the streamer crate launches.

pub mod communication;
pub mod locator;

pub use communication::serial::{list_ports, with_session, ProbeChannel, SerialPortInfo};
pub use locator::{locate, DeviceScanner, SerialDeviceScanner};
