//! Ordered line decoding over a byte stream
//!
//! A transport hands over a reader; one task frames it into lines, decodes
//! each line and publishes the results in framing order over a bounded
//! channel. Consumers therefore never observe a stale status report after a
//! newer one.

use crate::firmware::grbl::{parse_line, GrblMessage};
use grblwire_core::{DecodeError, DecodeResult};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// What to do with a line that fails to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log a warning and drop the line
    #[default]
    Skip,
    /// Publish the failure to the consumer
    Forward,
    /// End the stream with the failure
    Stop,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Forward => write!(f, "forward"),
            Self::Stop => write!(f, "stop"),
        }
    }
}

/// Configuration for the line stream
#[derive(Debug, Clone)]
pub struct LineStreamConfig {
    /// Capacity of the decoded-line channel
    pub channel_capacity: usize,
    /// Handling of undecodable lines
    pub failure_policy: FailurePolicy,
}

impl Default for LineStreamConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 64,
            failure_policy: FailurePolicy::Skip,
        }
    }
}

/// One decoded source line
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLine {
    /// 1-based line number in the source
    pub line_number: u64,
    /// Line text as read, terminator removed
    pub raw: String,
    /// Decode outcome
    pub result: DecodeResult<GrblMessage>,
}

impl DecodedLine {
    /// Decode a single source line
    pub fn decode(line_number: u64, raw: String) -> Self {
        let result = parse_line(&raw);
        Self {
            line_number,
            raw,
            result,
        }
    }
}

/// Counters reported when the stream ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStreamStats {
    /// Non-blank lines read
    pub lines: u64,
    /// Lines decoded successfully
    pub decoded: u64,
    /// Lines that failed to decode
    pub failed: u64,
}

/// Errors that end a line stream
#[derive(Error, Debug)]
pub enum StreamError {
    /// Reading from the transport failed
    #[error("I/O error after line {line_number}: {source}")]
    Io {
        line_number: u64,
        #[source]
        source: io::Error,
    },

    /// A line failed to decode under [`FailurePolicy::Stop`]
    #[error("Line {line_number}: {source}")]
    Decode {
        line_number: u64,
        #[source]
        source: DecodeError,
    },
}

/// Spawn a task that decodes `reader` line by line
///
/// Returns the receiving end of the decoded-line channel and the task handle.
/// The task finishes at end of input, when the receiver is dropped, or on the
/// first failure under [`FailurePolicy::Stop`].
pub fn spawn_line_stream<R>(
    reader: R,
    config: LineStreamConfig,
) -> (
    mpsc::Receiver<DecodedLine>,
    JoinHandle<Result<LineStreamStats, StreamError>>,
)
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));
    let handle = tokio::spawn(run_line_stream(reader, config.failure_policy, tx));
    (rx, handle)
}

async fn run_line_stream<R>(
    reader: R,
    policy: FailurePolicy,
    tx: mpsc::Sender<DecodedLine>,
) -> Result<LineStreamStats, StreamError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut stats = LineStreamStats::default();
    let mut line_number = 0u64;

    loop {
        let raw = match lines.next_line().await {
            Ok(Some(raw)) => raw,
            Ok(None) => break,
            Err(source) => return Err(StreamError::Io { line_number, source }),
        };
        line_number += 1;

        if raw.trim().is_empty() {
            continue;
        }
        stats.lines += 1;

        let decoded = DecodedLine::decode(line_number, raw);
        match &decoded.result {
            Ok(message) => {
                stats.decoded += 1;
                tracing::trace!(line = line_number, kind = message.kind(), "Decoded line");
            }
            Err(err) => {
                stats.failed += 1;
                match policy {
                    FailurePolicy::Skip => {
                        tracing::warn!(line = line_number, error = %err, "Dropping undecodable line");
                        continue;
                    }
                    FailurePolicy::Forward => {
                        tracing::debug!(line = line_number, error = %err, "Forwarding decode failure");
                    }
                    FailurePolicy::Stop => {
                        return Err(StreamError::Decode {
                            line_number,
                            source: err.clone(),
                        });
                    }
                }
            }
        }

        if tx.send(decoded).await.is_err() {
            tracing::debug!(line = line_number, "Receiver dropped, stopping line stream");
            break;
        }
    }

    tracing::debug!(
        lines = stats.lines,
        decoded = stats.decoded,
        failed = stats.failed,
        "Line stream finished"
    );
    Ok(stats)
}

/// Decode a blocking reader line by line
///
/// Blank lines are skipped but still counted in `line_number`.
pub fn decode_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<DecodedLine>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(index, line)| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(Ok(DecodedLine::decode(index as u64 + 1, line))),
            Err(e) => Some(Err(e)),
        })
}
