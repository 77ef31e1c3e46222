//! Fixed protocol and product constants.
//!
//! The serial parameters match what GRBL-based plotter boards ship with;
//! they are deliberately not configurable. Changing the baud rate or the
//! line terminator here would break every supported device.

/// Baud rate used for every plotter connection.
pub const BAUD_RATE: u32 = 115_200;

/// Line terminator GRBL expects on command lines.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Read/write timeout for a single serial operation, in milliseconds.
pub const IO_TIMEOUT_MS: u64 = 1_000;

/// Delay between sending the identification probe and reading the
/// response, so the firmware has time to fill its transmit buffer.
pub const SETTLE_INTERVAL_MS: u64 = 200;

/// GRBL build/identification query. The response text is used as a fuzzy
/// device fingerprint during discovery.
pub const PROBE_COMMAND: &str = "$I";

/// Extension given to persisted command files.
pub const GCODE_EXTENSION: &str = "gcode";

/// Comment written as the first line of every persisted command file.
pub const PROVENANCE_COMMENT: &str = ";Created with penstream by Penstream Contributors";

/// Status shown before the first successful run.
pub const IDLE_MESSAGE: &str = "Idle. Trigger a run to start.";

/// Title of the terminal session running the streaming engine. Closing
/// that window is the only way to abort an in-progress plot.
pub const SESSION_TITLE: &str = "PLOTTING! Closing this window will stop the plot!";

/// File name the embedded streaming script is materialized under in the
/// temp directory.
pub const STREAM_SCRIPT_FILE_NAME: &str = "penstream_stream.py";
