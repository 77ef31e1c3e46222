//! # Penstream
//!
//! Stream GRBL and G-code commands to serial pen plotters (iDraw,
//! DrawBot, and other GRBL boards).
//!
//! ## Architecture
//!
//! Penstream is organized as a workspace with multiple crates:
//!
//! 1. **penstream-core** - Error taxonomy, shared types, protocol constants
//! 2. **penstream-communication** - Serial probe session and plotter discovery
//! 3. **penstream-settings** - Operator configuration files
//! 4. **penstream-streamer** - G-code persistence, session launch, orchestration
//! 5. **penstream** - CLI binary that integrates all crates
//!
//! A run locates the plotter by sending the `$I` identification query to
//! every serial endpoint, saves the command list to a timestamped
//! `.gcode` file, and opens a terminal session running the embedded
//! streaming engine against the located port. Closing that window is how
//! an operator aborts a plot.

pub use penstream_communication::{list_ports, SerialPortInfo};
pub use penstream_core::{DeviceHandle, GcodeArtifact, PlotError, Result, RunRequest};
pub use penstream_settings::{default_config_path, Config};
pub use penstream_streamer::PlotRunner;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - stderr output, keeping status readouts on stdout clean
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
