//! Firmware protocol decoders
//!
//! Supported controllers:
//! - GRBL 1.1 and grblHAL (line-oriented text protocol)

pub mod grbl;

pub use grbl::{parse_line, GrblMessage};
