//! # Penstream Settings
//!
//! Operator configuration: which plotter to look for, where G-code files
//! go, and which interpreter runs the streaming engine. Values here are
//! defaults the CLI merges its flags over; the serial protocol parameters
//! are fixed in `penstream-core` and intentionally not configurable.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config, FileSettings, InterpreterSettings, PlotterSettings};
pub use error::{SettingsError, SettingsResult};
