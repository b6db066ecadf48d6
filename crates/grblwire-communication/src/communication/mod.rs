//! Transport-facing plumbing
//!
//! The decoder itself is pure; this module feeds it from a byte stream and
//! preserves line order for downstream consumers.

pub mod line_stream;

pub use line_stream::{
    decode_lines, spawn_line_stream, DecodedLine, FailurePolicy, LineStreamConfig,
    LineStreamStats, StreamError,
};
