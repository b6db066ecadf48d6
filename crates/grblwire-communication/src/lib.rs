//! # grblwire Communication
//!
//! Protocol decoding for GRBL-family CNC controllers.
//! Provides the line dispatcher, the real-time status report decoder and its
//! field grammars, error/alarm code descriptions, and an ordered line stream
//! that feeds the decoder from any async byte source.

pub mod communication;
pub mod firmware;

pub use communication::{
    decode_lines, spawn_line_stream, DecodedLine, FailurePolicy, LineStreamConfig,
    LineStreamStats, StreamError,
};

pub use firmware::grbl::{decode_status, describe_alarm, describe_error, parse_line, GrblMessage};
