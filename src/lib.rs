//! # grblwire
//!
//! Decoder for the line protocol spoken by GRBL-family CNC controllers:
//! - Real-time status reports (`<Idle|MPos:...|FS:...>`) into typed snapshots
//! - Acknowledgements, error and alarm codes, banners, settings and feedback
//! - Ordered decoding of whole sessions from any byte stream
//!
//! ## Architecture
//!
//! grblwire is organized as a workspace with multiple crates:
//!
//! 1. **grblwire-core** - Status report data model, machine states, pin and accessory flags, errors
//! 2. **grblwire-communication** - Line dispatcher, status decoder, field grammars, line stream
//! 3. **grblwire-settings** - Configuration files, defaults and validation
//! 4. **grblwire** - Command-line inspector that integrates all crates

use anyhow::Context;
use grblwire_communication::{spawn_line_stream, DecodedLine, GrblMessage, LineStreamStats};
use grblwire_core::{ACCESSORY_LETTERS, INPUT_PIN_LETTERS};
use grblwire_settings::{Config, LogFormat, LoggingSettings, OutputFormat};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};

pub use grblwire_communication::{
    decode_lines, decode_status, describe_alarm, describe_error, parse_line, FailurePolicy,
    LineStreamConfig, StreamError,
};
pub use grblwire_core::{
    AccessoryState, BufferState, CoordinateVector, DecodeError, DecodeResult, FeedSpindle,
    InputPins, MachineState, OverridePercentages, Position, PositionType, StatusReport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging from the logging settings
///
/// Sets up structured logging with:
/// - Output on stderr, so decoded messages on stdout stay machine-readable
/// - RUST_LOG environment variable support, overriding the configured filter
/// - Pretty or JSON formatting
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.filter)
            .with_context(|| format!("invalid log filter {:?}", settings.filter))?,
    };

    match settings.format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_line_number(true)
                .pretty();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .json();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}

/// Serialized form of one decoded line
#[derive(Debug, Serialize)]
struct LineRecord<'a> {
    line: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a GrblMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<&'a str>,
}

impl<'a> From<&'a DecodedLine> for LineRecord<'a> {
    fn from(line: &'a DecodedLine) -> Self {
        match &line.result {
            Ok(message) => Self {
                line: line.line_number,
                message: Some(message),
                error: None,
                raw: None,
            },
            Err(err) => Self {
                line: line.line_number,
                message: None,
                error: Some(err.to_string()),
                raw: Some(&line.raw),
            },
        }
    }
}

fn format_vector(vector: CoordinateVector) -> String {
    let [x, y, z, a] = vector.to_array();
    format!("{:.3},{:.3},{:.3},{:.3}", x, y, z, a)
}

fn letters<F: Copy>(flags: F, table: &[(char, F)], contains: impl Fn(F, F) -> bool) -> String {
    table
        .iter()
        .filter(|(_, flag)| contains(flags, *flag))
        .map(|(letter, _)| *letter)
        .collect()
}

fn describe_status(status: &StatusReport) -> String {
    let mut text = status.state.to_string();
    if let Some(sub) = status.sub_state {
        text.push_str(&format!(":{}", sub));
    }
    if let Some(position) = status.position {
        let label = match position.position_type() {
            PositionType::MachinePosition => "MPos",
            PositionType::WorkPosition => "WPos",
        };
        text.push_str(&format!(" {}={}", label, format_vector(position.coordinates())));
    }
    if let Some(wco) = status.work_coordinate_offset {
        text.push_str(&format!(" WCO={}", format_vector(wco)));
    }
    if let Some(buffer) = status.buffer {
        text.push_str(&format!(" buffer={},{}", buffer.planner_blocks, buffer.rx_bytes));
    }
    if let Some(line) = status.line_number {
        text.push_str(&format!(" line={}", line));
    }
    if let Some(feed) = status.feed() {
        text.push_str(&format!(" feed={}", feed));
    }
    if let Some(speed) = status.spindle_speed() {
        text.push_str(&format!(" spindle={}", speed));
    }
    if let Some(ov) = status.overrides {
        text.push_str(&format!(" ov={},{},{}", ov.feed, ov.rapid, ov.spindle));
    }
    if !status.pins.is_empty() {
        let pins = letters(status.pins, INPUT_PIN_LETTERS, |set: InputPins, pin| set.contains(pin));
        text.push_str(&format!(" pins={}", pins));
    }
    if !status.accessories.is_empty() {
        let accessories =
            letters(status.accessories, ACCESSORY_LETTERS, |set: AccessoryState, acc| set.contains(acc));
        text.push_str(&format!(" accessories={}", accessories));
    }
    text
}

/// Render one decoded line in the requested output format
pub fn render_line(line: &DecodedLine, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(&LineRecord::from(line))?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&LineRecord::from(line))?,
        OutputFormat::Text => match &line.result {
            Ok(GrblMessage::Status(status)) => {
                format!("{:>5} status {}", line.line_number, describe_status(status))
            }
            Ok(message) => format!("{:>5} {}", line.line_number, message),
            Err(err) => format!("{:>5} ! {}", line.line_number, err),
        },
    };
    Ok(rendered)
}

/// Decode every line from `reader` and write the rendered results to `out`
///
/// Lines are written in source order. Failing lines are handled according
/// to the configured failure policy.
pub async fn decode_to_writer<R, W>(
    reader: R,
    config: &Config,
    out: &mut W,
) -> anyhow::Result<LineStreamStats>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin,
{
    let (mut rx, handle) = spawn_line_stream(reader, config.to_stream_config());

    while let Some(line) = rx.recv().await {
        let mut rendered = render_line(&line, config.output.format)?;
        rendered.push('\n');
        out.write_all(rendered.as_bytes())
            .await
            .context("failed to write decoded output")?;
    }
    out.flush().await.context("failed to flush decoded output")?;

    let stats = handle.await.context("line stream task failed")??;
    Ok(stats)
}
