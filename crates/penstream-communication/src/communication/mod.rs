//! Low-level serial communication.

pub mod serial;
